use ferrous_dyndns_application::ports::DnsResolver;
use ferrous_dyndns_domain::Config;
use ferrous_dyndns_infrastructure::dns::{DnsServer, DnsServerConfig};
use std::sync::Arc;
use tracing::info;

pub fn start_dns_server(
    config: &Config,
    resolver: Arc<dyn DnsResolver>,
) -> anyhow::Result<DnsServer> {
    let server_config = DnsServerConfig::from_config(config)?;

    info!(
        udp = ?server_config.udp_addr,
        tcp = ?server_config.tcp_addr,
        "Starting DNS server"
    );

    Ok(DnsServer::start(server_config, resolver)?)
}
