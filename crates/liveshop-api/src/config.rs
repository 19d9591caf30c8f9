//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::AppError;

/// Runtime configuration. Read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Postgres connection string (`DATABASE_URL`, required).
    pub database_url: String,
    /// Redis connection string (`REDIS_URL`, required).
    pub redis_url: String,
    /// Bind host (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// Bind port (`PORT`, default `8000`).
    pub port: u16,
    /// Postgres pool size (`DATABASE_MAX_CONNECTIONS`, default 10).
    pub database_max_connections: u32,
    /// Upper bound on store and log calls (`STORE_TIMEOUT_SECS`, default 5).
    pub store_timeout: Duration,
    /// Insert the demo catalog at startup (`SEED_DEMO_DATA`, default false).
    pub seed_demo_data: bool,
    /// OTLP gRPC collector (`OTEL_EXPORTER_OTLP_ENDPOINT`, optional).
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| AppError::Config(format!("{key} environment variable must be set")))
        };

        let port = parse_or(&lookup, "PORT", 8000_u16)?;
        let database_max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10_u32)?;
        let store_timeout_secs = parse_or(&lookup, "STORE_TIMEOUT_SECS", 5_u64)?;
        let seed_demo_data = match lookup("SEED_DEMO_DATA") {
            None => false,
            Some(value) => parse_flag(&value).ok_or_else(|| {
                AppError::Config(format!("SEED_DEMO_DATA must be true or false, got {value:?}"))
            })?,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            redis_url: required("REDIS_URL")?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port,
            database_max_connections,
            store_timeout: Duration::from_secs(store_timeout_secs),
            seed_demo_data,
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty()),
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a valid address.
    pub fn bind_address(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be a valid number: {e}"))),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
