//! Process configuration read from environment variables.
//!
//! # Environment Variables
//! - `RUNNING_MODE` (optional, default: `local`): `local` or `server`, both
//!   run the standalone HTTP server
//! - `HOST` (optional, default: `0.0.0.0`): bind host
//! - `PORT` (optional, default: `8080`): bind port
//!
//! Backend selection (`REPOSITORY_TYPE`, `KV_PATH`, `KV_TABLE`,
//! `REPOSITORY_CONFIG`) is read by [`crate::db::RepositoryFactory::from_env`].

use std::env;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported RUNNING_MODE '{0}': expected 'local' or 'server'")]
    UnsupportedRunMode(String),

    #[error("PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),
}

/// How the process serves requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Developer machine
    #[default]
    Local,
    /// Deployed behind a load balancer
    Server,
}

impl FromStr for RunMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "local" => Ok(Self::Local),
            "server" => Ok(Self::Server),
            other => Err(ConfigError::UnsupportedRunMode(other.to_string())),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Server => f.write_str("server"),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub run_mode: RunMode,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            run_mode: RunMode::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// An unknown `RUNNING_MODE` or an unparsable `PORT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let run_mode = match env::var("RUNNING_MODE") {
            Ok(mode) => mode.parse()?,
            Err(_) => RunMode::default(),
        };

        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var("PORT") {
            Ok(port) => port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            run_mode,
            host,
            port,
        })
    }

    /// `host:port` suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
