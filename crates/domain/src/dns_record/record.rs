use super::RecordType;
use crate::dyndns::canonical_hostname;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRecord {
    /// Absolute zone name, e.g. `example.com.`
    pub zone: String,
    /// `@`, a name relative to the zone, or an absolute name ending in `.`
    pub name: String,
    pub record_type: RecordType,
    pub value: String,
    pub ttl: u32,
    pub token: Option<String>,
}

impl ZoneRecord {
    /// Fully-qualified owner name without the trailing dot, lowercased.
    pub fn hostname(&self) -> String {
        canonical_hostname(&self.name, &self.zone).to_lowercase()
    }
}
