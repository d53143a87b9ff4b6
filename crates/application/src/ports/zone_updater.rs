use async_trait::async_trait;
use ferrous_dyndns_domain::{DomainError, UpdateResult};

#[async_trait]
pub trait ZoneUpdater: Send + Sync {
    /// Point every A/AAAA record guarded by `token` at `ip`.
    ///
    /// Fails with `DomainError::NotFound` when the token matches no record of
    /// the IP's family and with `DomainError::ValidationFailed` when `ip` is
    /// not an address literal. `remote_address` is the caller's detected
    /// address, used for auditing only.
    async fn record_dynamic_update(
        &self,
        remote_address: &str,
        token: &str,
        ip: &str,
    ) -> Result<Vec<UpdateResult>, DomainError>;
}
