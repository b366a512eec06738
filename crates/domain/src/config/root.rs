use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "delve-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/delve-dns/config.toml";

/// Main configuration structure for Delve DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listening socket
    #[serde(default)]
    pub server: ServerConfig,

    /// Iterative resolution (seed server, timeouts, referral bounds)
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Response cache and its snapshot
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. delve-dns.toml in current directory
    /// 3. /etc/delve-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::default_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(root) = overrides.root_server {
            self.resolver.root_server = root;
        }
        if let Some(path) = overrides.cache_path {
            self.cache.snapshot_path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.max_datagram_size < 12 {
            return Err(ConfigError::Validation(
                "max_datagram_size must hold at least a DNS header (12 bytes)".to_string(),
            ));
        }

        if self.resolver.root_address().is_none() {
            return Err(ConfigError::Validation(format!(
                "root_server '{}' is not an IP address",
                self.resolver.root_server
            )));
        }

        if self.resolver.query_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "query_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.resolver.max_referral_depth == 0 || self.resolver.max_queries_per_resolution == 0 {
            return Err(ConfigError::Validation(
                "referral bounds must be greater than 0".to_string(),
            ));
        }

        if self.cache.sweep_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "sweep_interval_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    fn default_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|path| std::path::Path::new(path).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub root_server: Option<String>,
    pub cache_path: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
