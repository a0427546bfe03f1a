use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::geo::GeoConfig;
use super::intercept::InterceptConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;
use super::zones::ZonesConfig;

/// Main configuration structure for geomx-dns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (bind address, TCP toggle)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream DNS server
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// MX interception service
    #[serde(default)]
    pub intercept: InterceptConfig,

    /// Answer cache store
    #[serde(default)]
    pub cache: CacheConfig,

    /// Geolocation database
    #[serde(default)]
    pub geo: GeoConfig,

    /// Geo zone resolver service
    #[serde(default)]
    pub zones: ZonesConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. geomx-dns.toml in current directory
    /// 3. /etc/geomx-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("geomx-dns.toml").exists() {
            Self::from_file("geomx-dns.toml")?
        } else if std::path::Path::new("/etc/geomx-dns/config.toml").exists() {
            Self::from_file("/etc/geomx-dns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.intercept_port {
            self.intercept.port = port;
        }
        if let Some(port) = overrides.zone_port {
            self.zones.port = port;
            self.zones.enabled = true;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(upstream) = overrides.upstream {
            self.upstream.server = upstream;
        }
        if !overrides.skip.is_empty() {
            self.intercept.skip.extend(overrides.skip);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration. Failures here abort startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.intercept.enabled && !self.zones.enabled {
            return Err(ConfigError::Validation(
                "No service enabled: enable [intercept] or [zones]".to_string(),
            ));
        }

        if self.intercept.enabled {
            if self.intercept.port == 0 {
                return Err(ConfigError::Validation(
                    "Intercept port cannot be 0".to_string(),
                ));
            }
            self.upstream.socket_addr()?;
            self.intercept.build_gateway_table()?;
        }

        if self.zones.enabled {
            if self.zones.port == 0 {
                return Err(ConfigError::Validation("Zone port cannot be 0".to_string()));
            }
            if self.zones.directory.is_empty() {
                return Err(ConfigError::Validation(
                    "Zone directory cannot be empty".to_string(),
                ));
            }
        }

        if self.intercept.enabled && self.zones.enabled && self.intercept.port == self.zones.port {
            return Err(ConfigError::Validation(format!(
                "Intercept and zone services cannot share port {}",
                self.intercept.port
            )));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub intercept_port: Option<u16>,
    pub zone_port: Option<u16>,
    pub bind_address: Option<String>,
    pub upstream: Option<String>,
    pub skip: Vec<String>,
    pub log_level: Option<String>,
}
