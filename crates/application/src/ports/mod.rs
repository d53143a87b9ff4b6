mod dns_resolver;
mod zone_updater;

pub use dns_resolver::{DnsResolver, Protocol, QueryContext, Reply};
pub use zone_updater::ZoneUpdater;
