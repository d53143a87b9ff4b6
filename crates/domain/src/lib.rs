//! Ferrous DynDNS Domain Layer
pub mod config;
pub mod dns_record;
pub mod dyndns;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError, DnsConfig, LogFormat, ZoneConfig};
pub use dns_record::{RecordType, ZoneRecord};
pub use dyndns::{canonical_hostname, hostname_key, ReturnCode, UpdateCredentialSet, UpdateResult};
pub use errors::DomainError;
