//! Configuration for the storage backend
//!
//! The only required value is `DATABASE_URL`. It is read lazily on first use
//! (see [`crate::database::pool`]), so the environment may be populated after
//! process start but before the first retrieval call. Missing configuration
//! is a fatal [`Error::Config`](crate::Error::Config) at that point, never a
//! startup panic.

use secrecy::SecretString;
use serde::Deserialize;

use crate::error::{Error, Result};

/// PostgreSQL configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PostgresConfig {
    /// Database URL
    pub url: SecretString,
    /// Maximum connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    30
}

impl PostgresConfig {
    /// Build a configuration from the process environment.
    ///
    /// `DATABASE_URL` is required. `MEMRECALL_MAX_CONNECTIONS` and
    /// `MEMRECALL_CONNECT_TIMEOUT_SECS` override the pool defaults.
    pub fn from_env() -> Result<Self> {
        // Load .env if present; ignore absence.
        dotenvy::dotenv().ok();

        let url = std::env::var("DATABASE_URL")
            .map_err(|_| Error::Config("DATABASE_URL is not set".into()))?;

        let max_connections = match std::env::var("MEMRECALL_MAX_CONNECTIONS") {
            Ok(v) => v.parse().map_err(|_| {
                Error::Config(format!("MEMRECALL_MAX_CONNECTIONS is not a number: {}", v))
            })?,
            Err(_) => default_max_connections(),
        };

        let connect_timeout_secs = match std::env::var("MEMRECALL_CONNECT_TIMEOUT_SECS") {
            Ok(v) => v.parse().map_err(|_| {
                Error::Config(format!("MEMRECALL_CONNECT_TIMEOUT_SECS is not a number: {}", v))
            })?,
            Err(_) => default_connect_timeout(),
        };

        Ok(PostgresConfig {
            url: SecretString::from(url),
            max_connections,
            connect_timeout_secs,
        })
    }
}
