//! Database configuration module.
//!
//! Provides configuration structures for MongoDB connection management.

use std::env;

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// MongoDB connection string
    pub database_url: String,

    /// Name of the database holding the tournament collections
    pub database_name: String,

    /// Application name reported to the server
    pub app_name: String,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
}

impl DatabaseConfig {
    /// Create a configuration with default pool and timeout settings
    pub fn new(database_url: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            database_name: database_name.into(),
            app_name: "tourney".to_string(),
            connect_timeout_secs: 5,
            server_selection_timeout_secs: 5,
            max_pool_size: 20,
            min_pool_size: 0,
        }
    }

    /// Override pool and timeout settings from the environment
    ///
    /// - `DB_CONNECT_TIMEOUT_SECS`: connect timeout in seconds (default: 5)
    /// - `DB_SERVER_SELECTION_TIMEOUT_SECS`: server selection timeout (default: 5)
    /// - `DB_MAX_POOL_SIZE`: maximum pool size (default: 20)
    /// - `DB_MIN_POOL_SIZE`: minimum pool size (default: 0)
    pub fn with_env_tuning(self) -> Self {
        Self {
            connect_timeout_secs: parse_env_or(
                "DB_CONNECT_TIMEOUT_SECS",
                self.connect_timeout_secs,
            ),
            server_selection_timeout_secs: parse_env_or(
                "DB_SERVER_SELECTION_TIMEOUT_SECS",
                self.server_selection_timeout_secs,
            ),
            max_pool_size: parse_env_or("DB_MAX_POOL_SIZE", self.max_pool_size),
            min_pool_size: parse_env_or("DB_MIN_POOL_SIZE", self.min_pool_size),
            ..self
        }
    }
}

fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
