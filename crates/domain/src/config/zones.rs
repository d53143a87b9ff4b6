use serde::{Deserialize, Serialize};

use crate::RecordType;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneConfig {
    /// Zone apex, with or without the trailing dot
    pub name: String,

    #[serde(default)]
    pub records: Vec<ZoneRecordConfig>,
}

impl ZoneConfig {
    /// Zone name in absolute form (`example.com.`), lowercased.
    pub fn fqdn(&self) -> String {
        let name = self.name.trim().to_lowercase();
        if name.ends_with('.') {
            name
        } else {
            format!("{}.", name)
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneRecordConfig {
    /// `@` for the apex, a relative label, or an absolute name ending in `.`
    pub name: String,

    #[serde(rename = "type")]
    pub record_type: String,

    pub value: String,

    #[serde(default)]
    pub ttl: Option<u32>,

    /// Update token allowing DynDNS2 clients to change this record
    #[serde(default)]
    pub token: Option<String>,
}

impl ZoneRecordConfig {
    pub fn parsed_type(&self) -> Option<RecordType> {
        self.record_type.parse().ok()
    }
}
