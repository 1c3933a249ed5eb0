//! Environment-backed configuration.
//!
//! Scorer settings are required and fail startup when absent; everything
//! else has defaults. Override with `SCREENGATE_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

/// Default HTTP port used when `SCREENGATE_PORT` is not set.
pub const DEFAULT_PORT: u16 = 8080;

/// Default data directory used when `SCREENGATE_DATA_PATH` is not set.
pub const DEFAULT_DATA_PATH: &str = "./.data";

/// Server configuration loaded once at process start.
///
/// Use [`Config::from_env`] to read `SCREENGATE_*` variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory for persisted screening records. Default: `./.data`.
    pub data_path: PathBuf,

    /// Remote scoring function identifier. Required.
    pub scorer_function: String,

    /// Region the scoring function is deployed in. Required.
    pub scorer_region: String,

    /// Base endpoint override for the scorer (local stubs). Optional.
    pub scorer_endpoint: Option<String>,
}

impl Config {
    const ENV_PORT: &'static str = "SCREENGATE_PORT";
    const ENV_BIND_ADDR: &'static str = "SCREENGATE_BIND_ADDR";
    const ENV_DATA_PATH: &'static str = "SCREENGATE_DATA_PATH";
    const ENV_SCORER_FUNCTION: &'static str = "SCREENGATE_SCORER_FUNCTION";
    const ENV_SCORER_REGION: &'static str = "SCREENGATE_SCORER_REGION";
    const ENV_SCORER_ENDPOINT: &'static str = "SCREENGATE_SCORER_ENDPOINT";

    /// Loads configuration from environment variables.
    ///
    /// Missing scorer settings fail here, at startup, rather than on the
    /// first request that needs them.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = Self::parse_port_from_env(DEFAULT_PORT)?;
        let bind_addr =
            Self::parse_bind_addr_from_env(IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)))?;
        let data_path = Self::parse_path_from_env(Self::ENV_DATA_PATH, DEFAULT_DATA_PATH.into());
        let scorer_function = Self::require_string_from_env(Self::ENV_SCORER_FUNCTION)?;
        let scorer_region = Self::require_string_from_env(Self::ENV_SCORER_REGION)?;
        let scorer_endpoint = Self::parse_optional_string_from_env(Self::ENV_SCORER_ENDPOINT);

        Ok(Self {
            port,
            bind_addr,
            data_path,
            scorer_function,
            scorer_region,
            scorer_endpoint,
        })
    }

    /// Validates path invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_path.exists() && !self.data_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.data_path.clone(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn require_string_from_env(var_name: &'static str) -> Result<String, ConfigError> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingEnvVar { name: var_name })
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
