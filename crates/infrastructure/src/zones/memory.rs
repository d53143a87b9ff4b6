//! In-memory authoritative zone data, seeded from configuration.
//!
//! Serves record lookups for the DNS resolver and applies DynDNS2 updates.
//! Nothing is persisted: a restart reloads the configured values.

use async_trait::async_trait;
use ferrous_dyndns_application::ports::ZoneUpdater;
use ferrous_dyndns_domain::{
    hostname_key, DomainError, RecordType, UpdateResult, ZoneConfig, ZoneRecord,
};
use std::net::IpAddr;
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneLookup {
    /// The name is not below any zone served here.
    OutOfZone,
    /// The name is inside `zone` but does not exist.
    NxDomain { zone: String },
    /// The name exists; `records` may be empty for an empty non-terminal.
    Found {
        zone: String,
        records: Vec<ZoneRecord>,
    },
}

#[derive(Debug, Clone)]
struct Zone {
    /// Absolute, lowercased: `example.com.`
    name: String,
    /// `name` without the trailing dot, used for suffix matching
    domain: String,
    records: Vec<ZoneRecord>,
}

impl Zone {
    fn contains(&self, hostname: &str) -> bool {
        hostname == self.domain
            || (hostname.len() > self.domain.len()
                && hostname.ends_with(&self.domain)
                && hostname.as_bytes()[hostname.len() - self.domain.len() - 1] == b'.')
    }
}

pub struct MemoryZoneStore {
    zones: RwLock<Vec<Zone>>,
}

impl MemoryZoneStore {
    pub fn new() -> Self {
        Self {
            zones: RwLock::new(Vec::new()),
        }
    }

    /// Build the store from `[[zones]]` configuration.
    ///
    /// Records without a TTL get `default_ttl`; empty tokens are treated as
    /// absent.
    pub fn from_config(zones: &[ZoneConfig], default_ttl: u32) -> Result<Self, DomainError> {
        let mut loaded = Vec::with_capacity(zones.len());

        for zone_config in zones {
            let name = zone_config.fqdn();
            let mut records = Vec::with_capacity(zone_config.records.len());

            for record in &zone_config.records {
                let record_type: RecordType = record.record_type.parse()?;
                records.push(ZoneRecord {
                    zone: name.clone(),
                    name: record.name.trim().to_string(),
                    record_type,
                    value: record.value.trim().to_string(),
                    ttl: record.ttl.unwrap_or(default_ttl),
                    token: record
                        .token
                        .as_deref()
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(String::from),
                });
            }

            debug!(zone = %name, records = records.len(), "Zone loaded");
            loaded.push(Zone {
                domain: name.trim_end_matches('.').to_string(),
                name,
                records,
            });
        }

        Ok(Self {
            zones: RwLock::new(loaded),
        })
    }

    pub async fn zone_count(&self) -> usize {
        self.zones.read().await.len()
    }

    /// Resolve `qname` against the most specific zone that contains it.
    pub async fn lookup(&self, qname: &str) -> ZoneLookup {
        let hostname = hostname_key(qname);
        let zones = self.zones.read().await;

        let Some(zone) = zones
            .iter()
            .filter(|zone| zone.contains(&hostname))
            .max_by_key(|zone| zone.domain.len())
        else {
            return ZoneLookup::OutOfZone;
        };

        let records: Vec<ZoneRecord> = zone
            .records
            .iter()
            .filter(|record| record.hostname() == hostname)
            .cloned()
            .collect();

        if records.is_empty() && !has_descendant(zone, &hostname) {
            return ZoneLookup::NxDomain {
                zone: zone.name.clone(),
            };
        }

        ZoneLookup::Found {
            zone: zone.name.clone(),
            records,
        }
    }
}

impl Default for MemoryZoneStore {
    fn default() -> Self {
        Self::new()
    }
}

fn has_descendant(zone: &Zone, hostname: &str) -> bool {
    let suffix = format!(".{}", hostname);
    zone.records
        .iter()
        .any(|record| record.hostname().ends_with(&suffix))
}

fn token_matches(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

#[async_trait]
impl ZoneUpdater for MemoryZoneStore {
    async fn record_dynamic_update(
        &self,
        remote_address: &str,
        token: &str,
        ip: &str,
    ) -> Result<Vec<UpdateResult>, DomainError> {
        let address: IpAddr = ip
            .trim()
            .parse()
            .map_err(|_| DomainError::ValidationFailed(format!("Not an IP address: {}", ip)))?;
        let wanted = match address {
            IpAddr::V4(_) => RecordType::A,
            IpAddr::V6(_) => RecordType::AAAA,
        };
        let value = address.to_string();

        let mut zones = self.zones.write().await;
        let mut token_known = false;
        let mut results = Vec::new();

        for record in zones.iter_mut().flat_map(|zone| zone.records.iter_mut()) {
            let Some(record_token) = record.token.as_deref() else {
                continue;
            };
            if !token_matches(record_token, token) {
                continue;
            }
            token_known = true;
            if record.record_type != wanted {
                continue;
            }

            let changed = record.value.parse::<IpAddr>().ok() != Some(address);
            if changed {
                info!(
                    remote = %remote_address,
                    hostname = %record.hostname(),
                    record_type = %record.record_type,
                    old = %record.value,
                    new = %value,
                    "Dynamic update applied"
                );
                record.value = value.clone();
            }

            results.push(UpdateResult {
                record: record.name.clone(),
                zone: record.zone.clone(),
                record_type: record.record_type,
                value: value.clone(),
                changed,
            });
        }

        if results.is_empty() {
            return Err(DomainError::NotFound(if token_known {
                format!("No {} record for this token", wanted)
            } else {
                "No record for this token".to_string()
            }));
        }

        Ok(results)
    }
}
