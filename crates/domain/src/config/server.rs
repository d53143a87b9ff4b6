use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// UDP port for DNS queries, 0 disables the UDP transport
    #[serde(default = "default_dns_port")]
    pub dns_udp_port: u16,

    /// TCP port for DNS queries, 0 disables the TCP transport
    #[serde(default = "default_dns_port")]
    pub dns_tcp_port: u16,

    /// Port of the DynDNS2 HTTP endpoint, 0 disables it
    #[serde(default = "default_web_port")]
    pub web_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            dns_udp_port: default_dns_port(),
            dns_tcp_port: default_dns_port(),
            web_port: default_web_port(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_dns_port() -> u16 {
    53
}

fn default_web_port() -> u16 {
    8080
}
