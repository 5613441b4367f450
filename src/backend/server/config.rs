/**
 * Server Configuration
 *
 * This module loads server configuration from the environment and opens
 * the SQLite connection pool.
 *
 * # Configuration Sources
 *
 * - `DATABASE_URL` - storage connection string (required)
 * - `JWT_SECRET` - token signing secret (required)
 * - `PORT` - listen port (default 5000)
 * - `BIND_ADDRESS` - listen address (default 0.0.0.0)
 *
 * # Error Handling
 *
 * Unlike request-time failures, a missing setting or an unreachable store is
 * fatal: the binary refuses to start rather than serve degraded traffic.
 */

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::backend::error::BackendError;

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Configuration loading errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("{0} is not defined")]
    Missing(&'static str),

    /// A variable is set but unparsable
    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Everything the server needs at startup
#[derive(Clone)]
pub struct ServerConfig {
    /// Storage connection string
    pub database_url: String,
    /// Symmetric token signing secret
    pub jwt_secret: String,
    /// Socket to listen on
    pub bind_address: SocketAddr,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .field("bind_address", &self.bind_address)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let ip = match lookup("BIND_ADDRESS") {
            Some(value) => value
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::Invalid { key: "BIND_ADDRESS", value })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_address: SocketAddr::new(ip, port),
        })
    }
}

/// Open the SQLite pool and run migrations
///
/// In-memory URLs get a single, never-recycled connection so every query
/// sees the same database.
///
/// # Errors
///
/// Returns `StorageUnavailable` if the URL is invalid, the connection fails
/// or migrations cannot be applied.
pub async fn open_database(database_url: &str) -> Result<SqlitePool, BackendError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| BackendError::StorageUnavailable(format!("Invalid DATABASE_URL: {}", e)))?
        .create_if_missing(true)
        .foreign_keys(true);

    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(10)
    };

    tracing::info!("Connecting to database...");
    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| BackendError::StorageUnavailable(e.to_string()))?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| BackendError::StorageUnavailable(format!("Migration failed: {}", e)))?;
    tracing::info!("Database ready");

    Ok(pool)
}
