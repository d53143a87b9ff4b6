use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WebConfig {
    /// Header carrying the real client address when running behind a reverse
    /// proxy (e.g. `X-Forwarded-For`). Only set this when the proxy is trusted.
    #[serde(default)]
    pub remote_address_header: Option<String>,
}
