use axum::Router;
use ferrous_dyndns_api::{create_api_routes, AppState};
use ferrous_dyndns_domain::Config;
use std::net::{IpAddr, SocketAddr};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub struct WebServer {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl WebServer {
    /// Stop accepting requests and wait for in-flight ones to complete.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Web server task ended abnormally");
        }
        info!("Web server stopped");
    }
}

/// `None` when `web_port` is 0.
pub fn start_web_server(config: &Config, state: AppState) -> anyhow::Result<Option<WebServer>> {
    if config.server.web_port == 0 {
        info!("Web server disabled");
        return Ok(None);
    }

    let bind_addr = web_bind_addr(config)?;
    let std_listener = std::net::TcpListener::bind(bind_addr)?;
    std_listener.set_nonblocking(true)?;
    let listener = tokio::net::TcpListener::from_std(std_listener)?;

    info!(
        bind_address = %bind_addr,
        update_url = %format!("http://{}/nic/update", bind_addr),
        "Starting web server"
    );

    let app = create_app(state);
    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();

    let handle = tokio::spawn(async move {
        let result = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await;

        if let Err(e) = result {
            error!(error = %e, "Web server error");
        }
    });

    Ok(Some(WebServer { cancel, handle }))
}

fn web_bind_addr(config: &Config) -> anyhow::Result<SocketAddr> {
    let ip: IpAddr = config.server.bind_address.parse().map_err(|_| {
        anyhow::anyhow!("Invalid bind address: {}", config.server.bind_address)
    })?;
    Ok(SocketAddr::new(ip, config.server.web_port))
}

fn create_app(state: AppState) -> Router {
    create_api_routes(state).layer(TraceLayer::new_for_http())
}
