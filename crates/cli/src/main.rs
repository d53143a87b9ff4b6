use clap::Parser;
use ferrous_dyndns_domain::CliOverrides;
use mimalloc::MiMalloc;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "ferrous-dyndns")]
#[command(version)]
#[command(about = "Ferrous DynDNS - authoritative DNS server with DynDNS2 updates")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS UDP port (0 disables UDP)
    #[arg(short = 'u', long)]
    udp_port: Option<u16>,

    /// DNS TCP port (0 disables TCP)
    #[arg(short = 't', long)]
    tcp_port: Option<u16>,

    /// Web server port (0 disables the DynDNS2 endpoint)
    #[arg(short = 'w', long)]
    web_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        udp_port: cli.udp_port,
        tcp_port: cli.tcp_port,
        web_port: cli.web_port,
        bind_address: cli.bind,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting Ferrous DynDNS v{}", env!("CARGO_PKG_VERSION"));

    let services = di::Services::new(&config).await?;

    let dns_server = server::start_dns_server(&config, services.resolver.clone())?;
    let web_server = server::start_web_server(&config, services.app_state())?;

    server::shutdown_signal().await;
    info!("Shutdown requested");

    if let Some(web_server) = web_server {
        web_server.shutdown().await;
    }
    dns_server.shutdown().await;

    info!("Server shutdown complete");
    Ok(())
}
