use ferrous_dyndns_api::AppState;
use ferrous_dyndns_application::ports::DnsResolver;
use ferrous_dyndns_application::use_cases::DynDnsUpdateUseCase;
use ferrous_dyndns_domain::Config;
use ferrous_dyndns_infrastructure::dns::ZoneResolver;
use ferrous_dyndns_infrastructure::zones::MemoryZoneStore;
use std::sync::Arc;
use tracing::{info, warn};

pub struct Services {
    pub resolver: Arc<dyn DnsResolver>,
    pub dyndns_update: Arc<DynDnsUpdateUseCase>,
    remote_address_header: Option<String>,
}

impl Services {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let zone_store = Arc::new(MemoryZoneStore::from_config(
            &config.zones,
            config.dns.default_ttl,
        )?);

        let zones = zone_store.zone_count().await;
        if zones == 0 {
            warn!("No zones configured, every DNS query will be refused");
        } else {
            info!(zones, "Zones loaded");
        }

        let resolver: Arc<dyn DnsResolver> = Arc::new(ZoneResolver::new(Arc::clone(&zone_store)));
        let dyndns_update = Arc::new(DynDnsUpdateUseCase::new(zone_store));

        Ok(Self {
            resolver,
            dyndns_update,
            remote_address_header: config.web.remote_address_header.clone(),
        })
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            dyndns_update: self.dyndns_update.clone(),
            remote_address_header: self.remote_address_header.clone(),
        }
    }
}
