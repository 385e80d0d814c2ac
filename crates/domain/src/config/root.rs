use serde::{Deserialize, Serialize};

use super::bootstrap::BootstrapConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::topology::TopologyConfig;
use super::zones::ZonesConfig;

/// Main configuration for fabric-dns. Supplied once at startup; only the
/// bootstrap file contents are hot-reloaded.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,

    pub zones: ZonesConfig,

    /// Topology database (dynamic zone) settings.
    pub topology: TopologyConfig,

    /// Static bootstrap file (bootstrap zone) settings.
    pub bootstrap: BootstrapConfig,

    pub logging: LoggingConfig,
}

/// Command-line flags that override file-based configuration.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub datasource: Option<String>,
    pub bootstrap_path: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from file or use defaults.
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. fabric-dns.toml in current directory
    /// 3. /etc/fabric-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("fabric-dns.toml").exists() {
            Self::from_file("fabric-dns.toml")?
        } else if std::path::Path::new("/etc/fabric-dns/config.toml").exists() {
            Self::from_file("/etc/fabric-dns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(datasource) = overrides.datasource {
            self.topology.datasource = datasource;
        }
        if let Some(path) = overrides.bootstrap_path {
            self.bootstrap.path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.zones.dynamic.is_empty() {
            return Err(ConfigError::Validation(
                "zones.dynamic must not be empty".to_string(),
            ));
        }
        if self.zones.bootstrap.is_empty() {
            return Err(ConfigError::Validation(
                "zones.bootstrap must not be empty".to_string(),
            ));
        }
        if self.bootstrap.path.is_empty() {
            return Err(ConfigError::Validation(
                "bootstrap.path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
