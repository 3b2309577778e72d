//! Storefront configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use signboard_core::format::Locale;
use signboard_db::DbConfig;

/// Default database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "./signboard.db";

/// Storefront configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// SQLite database path (`SIGNBOARD_DB_PATH`), or `:memory:`
    pub db_path: PathBuf,

    /// Maximum pooled connections (`SIGNBOARD_DB_MAX_CONNECTIONS`)
    pub db_max_connections: u32,

    /// Display locale for prices and labels (`SIGNBOARD_LOCALE`)
    pub locale: Locale,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            db_max_connections: 5,
            locale: Locale::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    ///
    /// `load` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = StorefrontConfig::default();

        let db_path = lookup("SIGNBOARD_DB_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let db_max_connections = match lookup("SIGNBOARD_DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue("SIGNBOARD_DB_MAX_CONNECTIONS".to_string()))?,
            None => defaults.db_max_connections,
        };

        let locale = match lookup("SIGNBOARD_LOCALE") {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::InvalidValue("SIGNBOARD_LOCALE".to_string()))
            }
            Some(raw) => Locale::from_language(raw.trim()),
            None => defaults.locale,
        };

        Ok(StorefrontConfig {
            db_path,
            db_max_connections,
            locale,
        })
    }

    /// Pool settings for this configuration.
    pub fn db_config(&self) -> DbConfig {
        if self.db_path.as_os_str() == ":memory:" {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.db_path).max_connections(self.db_max_connections)
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
