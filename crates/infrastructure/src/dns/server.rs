//! DNS server facade: owns the worker pool and the optional UDP and TCP
//! listeners, and coordinates shutdown.

use super::listener::{bind_tcp, bind_udp, run_tcp_listener, run_udp_listener};
use super::pool::{ShutdownOutcome, WorkerPool, WorkerPoolConfig};
use super::request::RequestHandler;
use ferrous_dyndns_application::ports::DnsResolver;
use ferrous_dyndns_domain::{Config, DomainError};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct DnsServerConfig {
    /// `None` disables the UDP transport.
    pub udp_addr: Option<SocketAddr>,
    /// `None` disables the TCP transport.
    pub tcp_addr: Option<SocketAddr>,
    pub pool: WorkerPoolConfig,
    pub query_timeout: Duration,
    pub log_queries: bool,
    pub shutdown_grace_period: Duration,
}

impl DnsServerConfig {
    /// Port 0 in the configuration disables that transport.
    pub fn from_config(config: &Config) -> Result<Self, DomainError> {
        let ip: IpAddr = config.server.bind_address.parse().map_err(|_| {
            DomainError::InvalidIpAddress(format!(
                "Invalid bind address: {}",
                config.server.bind_address
            ))
        })?;
        let enabled = |port: u16| (port != 0).then(|| SocketAddr::new(ip, port));

        Ok(Self {
            udp_addr: enabled(config.server.dns_udp_port),
            tcp_addr: enabled(config.server.dns_tcp_port),
            pool: WorkerPoolConfig::from(&config.dns),
            query_timeout: config.dns.query_timeout(),
            log_queries: config.dns.log_queries,
            shutdown_grace_period: config.dns.shutdown_grace_period(),
        })
    }
}

pub struct DnsServer {
    pool: Arc<WorkerPool>,
    cancel: CancellationToken,
    listeners: Vec<JoinHandle<()>>,
    udp_local_addr: Option<SocketAddr>,
    tcp_local_addr: Option<SocketAddr>,
    shutdown_grace_period: Duration,
}

impl DnsServer {
    /// Bind the enabled transports and start serving. Must be called from
    /// inside a tokio runtime.
    pub fn start(
        config: DnsServerConfig,
        resolver: Arc<dyn DnsResolver>,
    ) -> Result<Self, DomainError> {
        let bind_error = |proto: &str, addr: SocketAddr, e: std::io::Error| {
            DomainError::IoError(format!("Failed to bind {} {}: {}", proto, addr, e))
        };

        // Bind first so a port conflict leaves nothing running.
        let udp_socket = config
            .udp_addr
            .map(|addr| bind_udp(addr).map_err(|e| bind_error("UDP", addr, e)))
            .transpose()?;
        let tcp_listener = config
            .tcp_addr
            .map(|addr| bind_tcp(addr).map_err(|e| bind_error("TCP", addr, e)))
            .transpose()?;

        let udp_local_addr = udp_socket
            .as_ref()
            .map(|s| s.local_addr())
            .transpose()
            .map_err(|e| DomainError::IoError(e.to_string()))?;
        let tcp_local_addr = tcp_listener
            .as_ref()
            .map(|l| l.local_addr())
            .transpose()
            .map_err(|e| DomainError::IoError(e.to_string()))?;

        let pool = Arc::new(WorkerPool::new(config.pool.clone()));
        let handler = Arc::new(RequestHandler::new(
            resolver,
            config.query_timeout,
            config.log_queries,
        ));
        let cancel = CancellationToken::new();
        let mut listeners = Vec::with_capacity(2);

        if let Some(socket) = udp_socket {
            listeners.push(tokio::spawn(run_udp_listener(
                Arc::new(socket),
                Arc::clone(&pool),
                Arc::clone(&handler),
                cancel.child_token(),
            )));
        }
        if let Some(listener) = tcp_listener {
            listeners.push(tokio::spawn(run_tcp_listener(
                listener,
                Arc::clone(&pool),
                Arc::clone(&handler),
                cancel.child_token(),
            )));
        }

        if listeners.is_empty() {
            warn!("DNS server started with both UDP and TCP disabled");
        }
        info!(
            udp = ?udp_local_addr,
            tcp = ?tcp_local_addr,
            min_workers = config.pool.min_workers,
            max_workers = config.pool.max_workers,
            backlog = config.pool.backlog,
            "DNS server ready"
        );

        Ok(Self {
            pool,
            cancel,
            listeners,
            udp_local_addr,
            tcp_local_addr,
            shutdown_grace_period: config.shutdown_grace_period,
        })
    }

    pub fn udp_local_addr(&self) -> Option<SocketAddr> {
        self.udp_local_addr
    }

    pub fn tcp_local_addr(&self) -> Option<SocketAddr> {
        self.tcp_local_addr
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Stop the listeners, then drain the pool for up to the configured
    /// grace period before cancelling what is still running.
    pub async fn shutdown(self) -> ShutdownOutcome {
        info!("Stopping DNS listeners");
        self.cancel.cancel();
        for listener in self.listeners {
            if let Err(e) = listener.await {
                warn!(error = %e, "DNS listener task ended abnormally");
            }
        }

        let outcome = self.pool.shutdown(self.shutdown_grace_period).await;
        info!(outcome = ?outcome, "DNS server stopped");
        outcome
    }
}
