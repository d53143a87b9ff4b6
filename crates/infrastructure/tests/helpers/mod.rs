#![allow(unused_imports)]

mod builders;
mod dns_client;
mod mock_resolver;

pub use builders::{example_store, server_config, QueryBuilder, ZoneBuilder};
pub use dns_client::{tcp_exchange, tcp_send_raw, udp_exchange};
pub use mock_resolver::{StubBehavior, StubResolver};
