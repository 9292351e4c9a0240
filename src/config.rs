//! Server configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable overriding [`ServerConfig::db_path`].
pub const DB_PATH_ENV: &str = "KYOUEN_DB_PATH";

/// Configuration for the stage registry.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Page size when a listing gives no limit.
    #[serde(default = "default_limit")]
    default_limit: i64,

    /// Largest page size a listing may request.
    #[serde(default = "default_max_limit")]
    max_limit: i64,
}

#[instrument]
fn default_db_path() -> String {
    "kyouen.db".to_string()
}

#[instrument]
fn default_limit() -> i64 {
    10
}

#[instrument]
fn default_max_limit() -> i64 {
    100
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.check()?;
        info!(db_path = %config.db_path, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise uses defaults, then applies
    /// the `KYOUEN_DB_PATH` environment override.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };

        if let Ok(db_path) = std::env::var(DB_PATH_ENV) {
            info!(db_path = %db_path, "Database path from environment");
            config.db_path = db_path;
        }
        Ok(config)
    }

    /// Returns a copy with a different database path.
    #[instrument(skip(self))]
    pub fn with_db_path(mut self, db_path: String) -> Self {
        self.db_path = db_path;
        self
    }

    /// Resolves a requested page size against the configured bounds.
    #[instrument(skip(self))]
    pub fn page_limit(&self, requested: Option<i64>) -> i64 {
        requested.unwrap_or(self.default_limit).clamp(1, self.max_limit)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.max_limit < 1 {
            return Err(ConfigError::new(format!("max_limit must be positive, got {}", self.max_limit)));
        }
        if self.default_limit < 1 || self.default_limit > self.max_limit {
            return Err(ConfigError::new(format!(
                "default_limit must be in 1..={}, got {}",
                self.max_limit, self.default_limit
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: ServerConfig = toml::from_str("db_path = \"stages.db\"").unwrap();
        assert_eq!(config.db_path(), "stages.db");
        assert_eq!(*config.default_limit(), 10);
        assert_eq!(*config.max_limit(), 100);
    }

    #[test]
    fn test_page_limit_clamps() {
        let config = ServerConfig::default();
        assert_eq!(config.page_limit(None), 10);
        assert_eq!(config.page_limit(Some(500)), 100);
        assert_eq!(config.page_limit(Some(0)), 1);
        assert_eq!(config.page_limit(Some(25)), 25);
    }

    #[test]
    fn test_rejects_default_above_max() {
        let config: ServerConfig = toml::from_str("default_limit = 50\nmax_limit = 20").unwrap();
        assert!(config.check().is_err());
    }
}
