use ferrous_dyndns_application::use_cases::DynDnsUpdateUseCase;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dyndns_update: Arc<DynDnsUpdateUseCase>,
    /// Trusted header carrying the client address when behind a proxy
    pub remote_address_header: Option<String>,
}
