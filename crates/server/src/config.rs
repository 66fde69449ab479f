//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CRM_DATABASE_URL` - SQLite connection string (default: `sqlite:brightdesk.db?mode=rwc`)
//! - `CRM_HOST` - Bind address (default: 127.0.0.1)
//! - `CRM_PORT` - Listen port (default: 8000)
//! - `CRM_BASE_DIR` - Fallback directory for job log files when the primary
//!   `/tmp` path is unwritable (default: current directory)
//! - `CRM_HEARTBEAT_INTERVAL_SECS` - Heartbeat cadence (default: 300)
//! - `CRM_LOW_STOCK_INTERVAL_SECS` - Low-stock job cadence (default: 43200)
//! - `CRM_REPORT_INTERVAL_SECS` - Report job cadence (default: 604800)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite:brightdesk.db?mode=rwc";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HEARTBEAT_SECS: u64 = 300;
const DEFAULT_LOW_STOCK_SECS: u64 = 43_200;
const DEFAULT_REPORT_SECS: u64 = 604_800;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CRM server configuration.
#[derive(Debug, Clone)]
pub struct CrmConfig {
    /// SQLite database connection URL.
    pub database_url: SecretString,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Fallback directory for job log files.
    pub base_dir: PathBuf,
    /// Heartbeat job cadence.
    pub heartbeat_interval: Duration,
    /// Low-stock replenishment job cadence.
    pub low_stock_interval: Duration,
    /// Report job cadence.
    pub report_interval: Duration,
}

impl CrmConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if a variable is present but
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("CRM_DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned())
            .into();

        let host = parse_var("CRM_HOST", DEFAULT_HOST.parse().map_err(|_| {
            ConfigError::InvalidEnvVar("CRM_HOST".into(), "bad default".into())
        })?)?;
        let port = parse_var("CRM_PORT", DEFAULT_PORT)?;

        let base_dir = std::env::var("CRM_BASE_DIR")
            .map_or_else(|_| PathBuf::from("."), PathBuf::from);

        Ok(Self {
            database_url,
            host,
            port,
            base_dir,
            heartbeat_interval: duration_var(
                "CRM_HEARTBEAT_INTERVAL_SECS",
                DEFAULT_HEARTBEAT_SECS,
            )?,
            low_stock_interval: duration_var(
                "CRM_LOW_STOCK_INTERVAL_SECS",
                DEFAULT_LOW_STOCK_SECS,
            )?,
            report_interval: duration_var("CRM_REPORT_INTERVAL_SECS", DEFAULT_REPORT_SECS)?,
        })
    }

    /// Socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Base URL of the local query surface, used by the heartbeat probe.
    #[must_use]
    pub fn local_base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidEnvVar(name.to_owned(), raw)),
        Err(_) => Ok(default),
    }
}

fn duration_var(name: &str, default_secs: u64) -> Result<Duration, ConfigError> {
    parse_var(name, default_secs).map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Only inspects defaults; env vars are not set in the test runner.
        let config = CrmConfig::from_env().expect("config loads");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.heartbeat_interval, Duration::from_secs(300));
        assert_eq!(config.low_stock_interval, Duration::from_secs(43_200));
    }

    #[test]
    fn test_socket_addr() {
        let config = CrmConfig::from_env().expect("config loads");
        assert_eq!(config.socket_addr().port(), config.port);
    }
}
