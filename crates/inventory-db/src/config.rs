//! Environment-driven configuration.
//!
//! Configuration is loaded from environment variables with fallback to the
//! [`DbConfig::new`] defaults.
//!
//! | Variable                             | Default            |
//! |--------------------------------------|--------------------|
//! | `INVENTORY_DB_PATH`                  | `./inventory.db`   |
//! | `INVENTORY_DB_MAX_CONNECTIONS`       | `5`                |
//! | `INVENTORY_DB_MIN_CONNECTIONS`       | `1`                |
//! | `INVENTORY_DB_ACQUIRE_TIMEOUT_SECS`  | `30`               |
//! | `INVENTORY_DB_CREATE_SCHEMA`         | `true`             |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::pool::DbConfig;

pub const DEFAULT_DB_PATH: &str = "./inventory.db";

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

impl DbConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup("INVENTORY_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let mut config = DbConfig::new(path);

        if let Some(max) = parse_var::<u32, _>(&lookup, "INVENTORY_DB_MAX_CONNECTIONS")? {
            config = config.max_connections(max);
        }
        if let Some(min) = parse_var::<u32, _>(&lookup, "INVENTORY_DB_MIN_CONNECTIONS")? {
            config = config.min_connections(min);
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "INVENTORY_DB_ACQUIRE_TIMEOUT_SECS")? {
            config = config.acquire_timeout(Duration::from_secs(secs));
        }
        if let Some(create) = parse_var::<bool, _>(&lookup, "INVENTORY_DB_CREATE_SCHEMA")? {
            config = config.create_schema(create);
        }

        if config.min_connections > config.max_connections {
            return Err(ConfigError::InvalidValue(
                "INVENTORY_DB_MIN_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(None),
    }
}
