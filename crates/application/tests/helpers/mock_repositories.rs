#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_dyndns_application::ports::ZoneUpdater;
use ferrous_dyndns_domain::{DomainError, RecordType, UpdateResult};
use std::collections::HashMap;
use std::sync::Mutex;

type UpdateKey = (String, String);

#[derive(Default)]
pub struct MockZoneUpdater {
    responses: Mutex<HashMap<UpdateKey, Result<Vec<UpdateResult>, DomainError>>>,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl MockZoneUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_results(&self, token: &str, ip: &str, results: Vec<UpdateResult>) {
        self.responses
            .lock()
            .unwrap()
            .insert((token.to_string(), ip.to_string()), Ok(results));
    }

    pub fn set_error(&self, token: &str, ip: &str, error: DomainError) {
        self.responses
            .lock()
            .unwrap()
            .insert((token.to_string(), ip.to_string()), Err(error));
    }

    /// `(remote_address, token, ip)` of every call, in call order.
    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ZoneUpdater for MockZoneUpdater {
    async fn record_dynamic_update(
        &self,
        remote_address: &str,
        token: &str,
        ip: &str,
    ) -> Result<Vec<UpdateResult>, DomainError> {
        self.calls.lock().unwrap().push((
            remote_address.to_string(),
            token.to_string(),
            ip.to_string(),
        ));

        self.responses
            .lock()
            .unwrap()
            .get(&(token.to_string(), ip.to_string()))
            .cloned()
            .unwrap_or_else(|| Err(DomainError::NotFound(format!("token {}", token))))
    }
}

pub struct UpdateResultBuilder;

impl UpdateResultBuilder {
    pub fn a(record: &str, zone: &str, value: &str, changed: bool) -> UpdateResult {
        Self::build(record, zone, RecordType::A, value, changed)
    }

    pub fn aaaa(record: &str, zone: &str, value: &str, changed: bool) -> UpdateResult {
        Self::build(record, zone, RecordType::AAAA, value, changed)
    }

    pub fn build(
        record: &str,
        zone: &str,
        record_type: RecordType,
        value: &str,
        changed: bool,
    ) -> UpdateResult {
        UpdateResult {
            record: record.to_string(),
            zone: zone.to_string(),
            record_type,
            value: value.to_string(),
            changed,
        }
    }
}
