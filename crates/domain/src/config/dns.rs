use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Seconds a single request task may spend reading, resolving and replying
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    #[serde(default = "default_true")]
    pub log_queries: bool,

    #[serde(default = "default_min_workers")]
    pub min_workers: usize,

    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Seconds an extra worker stays idle before it retires
    #[serde(default = "default_worker_idle_timeout")]
    pub worker_idle_timeout: u64,

    /// Pending request tasks accepted before submissions are rejected
    #[serde(default = "default_backlog")]
    pub backlog: usize,

    /// Seconds in-flight requests get to finish on shutdown
    #[serde(default = "default_shutdown_grace_period")]
    pub shutdown_grace_period: u64,

    #[serde(default = "default_ttl")]
    pub default_ttl: u32,
}

impl DnsConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout)
    }

    pub fn worker_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.worker_idle_timeout)
    }

    pub fn shutdown_grace_period(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_period)
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            query_timeout: default_query_timeout(),
            log_queries: true,
            min_workers: default_min_workers(),
            max_workers: default_max_workers(),
            worker_idle_timeout: default_worker_idle_timeout(),
            backlog: default_backlog(),
            shutdown_grace_period: default_shutdown_grace_period(),
            default_ttl: default_ttl(),
        }
    }
}

fn default_query_timeout() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

fn default_min_workers() -> usize {
    3
}

fn default_max_workers() -> usize {
    10
}

fn default_worker_idle_timeout() -> u64 {
    60
}

fn default_backlog() -> usize {
    1000
}

fn default_shutdown_grace_period() -> u64 {
    5
}

fn default_ttl() -> u32 {
    300
}
