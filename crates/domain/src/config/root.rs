use serde::{Deserialize, Serialize};

use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::web::WebConfig;
use super::zones::ZoneConfig;

const LOCAL_CONFIG_PATH: &str = "ferrous-dyndns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-dyndns/config.toml";

/// Main configuration structure for Ferrous DynDNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (ports, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Request dispatch configuration
    #[serde(default)]
    pub dns: DnsConfig,

    /// DynDNS2 web endpoint configuration
    #[serde(default)]
    pub web: WebConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Authoritative zones served from memory
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-dyndns.toml in current directory
    /// 3. /etc/ferrous-dyndns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.udp_port {
            self.server.dns_udp_port = port;
        }
        if let Some(port) = overrides.tcp_port {
            self.server.dns_tcp_port = port;
        }
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dns.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "query_timeout must be at least 1 second".to_string(),
            ));
        }

        if self.dns.min_workers == 0 {
            return Err(ConfigError::Validation(
                "min_workers must be at least 1".to_string(),
            ));
        }

        if self.dns.max_workers < self.dns.min_workers {
            return Err(ConfigError::Validation(format!(
                "max_workers ({}) is lower than min_workers ({})",
                self.dns.max_workers, self.dns.min_workers
            )));
        }

        if self.dns.backlog == 0 {
            return Err(ConfigError::Validation(
                "backlog must be at least 1".to_string(),
            ));
        }

        for zone in &self.zones {
            if zone.name.trim().trim_end_matches('.').is_empty() {
                return Err(ConfigError::Validation("Zone name cannot be empty".to_string()));
            }

            for record in &zone.records {
                if record.parsed_type().is_none() {
                    return Err(ConfigError::Validation(format!(
                        "Zone '{}': record '{}' has unsupported type '{}'",
                        zone.name, record.name, record.record_type
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub udp_port: Option<u16>,
    pub tcp_port: Option<u16>,
    pub web_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}
