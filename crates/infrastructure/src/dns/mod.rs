pub mod pool;
pub mod record_type_map;
pub mod request;
pub mod resolver;
pub mod server;
pub mod transport;
pub mod wire_response;

mod listener;

pub use pool::{ShutdownOutcome, WorkerPool, WorkerPoolConfig};
pub use request::RequestHandler;
pub use resolver::ZoneResolver;
pub use server::{DnsServer, DnsServerConfig};
