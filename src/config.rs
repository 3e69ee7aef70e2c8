use std::env;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://./db/main.db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_PAYLOAD_SIZE: usize = 10 * 1024 * 1024;
const DEFAULT_MAX_DB_CONNECTIONS: u32 = 5;
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has an invalid value: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database location
    /// Format: sqlite://PATH (the file and its directory are created if missing)
    pub database_url: String,

    pub host: String,
    pub port: u16,

    /// Maximum payload size for all requests (in bytes)
    /// Default: 10MB (10 * 1024 * 1024)
    pub max_payload_size: usize,

    /// Maximum number of pooled database connections
    pub max_db_connections: u32,

    /// Directory for the rotating log files
    pub log_dir: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Optional environment variables:
    /// - DATABASE_URL: SQLite connection string (default: sqlite://./db/main.db)
    /// - HOST / PORT: bind address (default: 0.0.0.0:8080)
    /// - MAX_PAYLOAD_SIZE: Maximum request payload size in bytes (default: 10485760 = 10MB)
    /// - MAX_DB_CONNECTIONS: Pool size (default: 5)
    /// - LOG_DIR: Log directory (default: logs)
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let max_payload_size = parse_or(&lookup, "MAX_PAYLOAD_SIZE", DEFAULT_MAX_PAYLOAD_SIZE)?;
        let max_db_connections =
            parse_or(&lookup, "MAX_DB_CONNECTIONS", DEFAULT_MAX_DB_CONNECTIONS)?;
        if max_db_connections == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MAX_DB_CONNECTIONS",
                value: "0".to_string(),
            });
        }
        let log_dir = lookup("LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_string());

        Ok(Config {
            database_url,
            host,
            port,
            max_payload_size,
            max_db_connections,
            log_dir,
        })
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}
