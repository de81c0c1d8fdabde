//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::net::SocketAddr;

use tourney::db::DatabaseConfig;

/// Port used when neither a bind address nor `PORT` is given
pub const DEFAULT_PORT: u16 = 8000;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Database configuration, absent when the URL or name is not set
    pub database: Option<DatabaseConfig>,
    /// Which database settings were supplied
    pub status: ConfigStatus,
    /// Prometheus exporter address, absent to disable the exporter
    pub metrics_bind: Option<SocketAddr>,
}

/// Presence of the database settings, reported by the diagnostics endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigStatus {
    pub database_url_set: bool,
    pub database_name_set: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `database_url_override` - Optional database URL override (from CLI args)
    /// * `database_name_override` - Optional database name override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed. Missing
    /// database settings are not an error.
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        database_url_override: Option<String>,
        database_name_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => match std::env::var("SERVER_BIND") {
                Ok(raw) => parse_var("SERVER_BIND", &raw)?,
                Err(_) => {
                    let port = match std::env::var("PORT") {
                        Ok(raw) => parse_var("PORT", &raw)?,
                        Err(_) => DEFAULT_PORT,
                    };
                    SocketAddr::from(([0, 0, 0, 0], port))
                }
            },
        };

        let database_url = database_url_override.or_else(|| std::env::var("DATABASE_URL").ok());
        let database_name =
            database_name_override.or_else(|| std::env::var("DATABASE_NAME").ok());

        let status = ConfigStatus {
            database_url_set: database_url.is_some(),
            database_name_set: database_name.is_some(),
        };

        let database = match (database_url, database_name) {
            (Some(url), Some(name)) => Some(DatabaseConfig::new(url, name).with_env_tuning()),
            _ => None,
        };

        let metrics_bind = match std::env::var("METRICS_BIND") {
            Ok(raw) => Some(parse_var("METRICS_BIND", &raw)?),
            Err(_) => None,
        };

        Ok(ServerConfig {
            bind,
            database,
            status,
            metrics_bind,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(database) = &self.database else {
            return Ok(());
        };

        if database.database_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "DATABASE_NAME".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if database.max_pool_size == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_POOL_SIZE".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if database.min_pool_size > database.max_pool_size {
            return Err(ConfigError::Invalid {
                var: "DB_MIN_POOL_SIZE".to_string(),
                reason: format!(
                    "Must not exceed max pool size ({})",
                    database.max_pool_size
                ),
            });
        }

        if database.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_CONNECT_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if database.server_selection_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_SERVER_SELECTION_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        var: var.to_string(),
        reason: format!("{raw:?}: {e}"),
    })
}
