use ferrous_dyndns_domain::{
    hostname_key, DomainError, ReturnCode, UpdateCredentialSet, UpdateResult,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::ports::ZoneUpdater;

/// Raw DynDNS2 request parameters as received by the web layer.
#[derive(Debug, Clone, Default)]
pub struct DynDnsUpdateRequest {
    /// Basic-auth password: one or more comma-separated update tokens
    pub tokens: Option<String>,
    /// `hostname` query parameter
    pub hostnames: Option<String>,
    /// `myip` query parameter
    pub myip: Option<String>,
    /// Detected address of the caller
    pub remote_address: String,
}

pub struct DynDnsUpdateUseCase {
    zone_updater: Arc<dyn ZoneUpdater>,
}

impl DynDnsUpdateUseCase {
    pub fn new(zone_updater: Arc<dyn ZoneUpdater>) -> Self {
        Self { zone_updater }
    }

    /// Apply every token/IP combination and report one return code per
    /// requested hostname, in request order.
    ///
    /// Records matched by a token but not named in the request are still
    /// updated; they are simply not reported.
    pub async fn execute(
        &self,
        request: &DynDnsUpdateRequest,
    ) -> Result<Vec<ReturnCode>, DomainError> {
        let Some(credentials) = UpdateCredentialSet::parse(
            request.tokens.as_deref(),
            request.hostnames.as_deref(),
            request.myip.as_deref(),
            &request.remote_address,
        ) else {
            return Ok(vec![ReturnCode::BadAgent]);
        };

        let mut slots: HashMap<String, HostnameSlot> = credentials
            .hostnames
            .iter()
            .map(|hostname| (hostname_key(hostname), HostnameSlot::default()))
            .collect();

        for ip in &credentials.ips {
            for token in &credentials.tokens {
                let results = match self
                    .zone_updater
                    .record_dynamic_update(&request.remote_address, token, ip)
                    .await
                {
                    Ok(results) => results,
                    Err(e) if e.is_update_mismatch() => {
                        debug!(ip = %ip, reason = %e, "Update combination matched nothing");
                        continue;
                    }
                    Err(e) => return Err(e),
                };

                for result in results {
                    if !result.record_type.is_address() {
                        continue;
                    }
                    if let Some(slot) = slots.get_mut(&hostname_key(&result.hostname())) {
                        slot.record(result);
                    }
                }
            }
        }

        Ok(credentials
            .hostnames
            .iter()
            .map(|hostname| {
                slots
                    .get(&hostname_key(hostname))
                    .map(HostnameSlot::return_code)
                    .unwrap_or(ReturnCode::NoHost)
            })
            .collect())
    }
}

/// Latest A and AAAA result for one requested hostname, in first-seen order.
#[derive(Debug, Default)]
struct HostnameSlot {
    results: Vec<UpdateResult>,
}

impl HostnameSlot {
    fn record(&mut self, result: UpdateResult) {
        match self
            .results
            .iter_mut()
            .find(|existing| existing.record_type == result.record_type)
        {
            Some(existing) => *existing = result,
            None => self.results.push(result),
        }
    }

    fn return_code(&self) -> ReturnCode {
        if self.results.is_empty() {
            return ReturnCode::NoHost;
        }

        let values = self.results.iter().map(|r| r.value.clone()).collect();
        if self.results.iter().any(|r| r.changed) {
            ReturnCode::Good(values)
        } else {
            ReturnCode::NoChg(values)
        }
    }
}
