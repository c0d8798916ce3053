//! Environment-driven core configuration.
//!
//! # Responsibility
//! - Resolve database path and logging settings from `QRLOG_*` variables.
//! - Validate values before any storage or logger is touched.
//!
//! # Invariants
//! - Blank variables behave as unset.
//! - Logging stays disabled unless `QRLOG_LOG_DIR` is set.

use crate::db::{open_db, DbResult};
use crate::logging::{default_log_level, normalize_level, normalize_log_dir, LoggingConfig};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "QRLOG_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "QRLOG_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "QRLOG_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "qrlog.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    InvalidLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(value) => {
                write!(f, "{LOG_LEVEL_ENV} has unsupported value `{value}`")
            }
            Self::InvalidLogDir(value) => {
                write!(f, "{LOG_DIR_ENV} must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file backing the key/value store.
    pub db_path: PathBuf,
    /// Normalized log level.
    pub log_level: &'static str,
    /// Directory for rolling logs; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = non_blank(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let log_level = match non_blank(LOG_LEVEL_ENV) {
            Some(raw) => {
                normalize_level(&raw).map_err(|_| ConfigError::InvalidLogLevel(raw.clone()))?
            }
            None => default_log_level(),
        };

        let log_dir = match non_blank(LOG_DIR_ENV) {
            Some(raw) => Some(
                normalize_log_dir(Path::new(&raw))
                    .map_err(|_| ConfigError::InvalidLogDir(raw.clone()))?,
            ),
            None => None,
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }

    /// Logging setup, when a log directory is configured.
    pub fn logging_config(&self) -> Option<LoggingConfig> {
        self.log_dir
            .as_ref()
            .map(|log_dir| LoggingConfig::new(self.log_level, log_dir.clone()))
    }

    /// Opens the configured database with migrations applied.
    pub fn open_db(&self) -> DbResult<Connection> {
        open_db(&self.db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let config = CoreConfig::from_lookup(lookup_from(&[(DB_PATH_ENV, "   ")])).unwrap();
        assert_eq!(config.db_path, std::env::temp_dir().join("qrlog.sqlite3"));
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
        assert!(config.logging_config().is_none());
    }

    #[test]
    fn reads_explicit_values() {
        let log_dir = std::env::temp_dir().join("qrlog-logs");
        let log_dir_text = log_dir.to_str().unwrap();
        let config = CoreConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, " /data/history.sqlite3 "),
            (LOG_LEVEL_ENV, "WARNING"),
            (LOG_DIR_ENV, log_dir_text),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/data/history.sqlite3"));
        assert_eq!(config.log_level, "warn");
        let logging = config.logging_config().unwrap();
        assert_eq!(logging.level, "warn");
        assert_eq!(logging.log_dir, log_dir);
    }

    #[test]
    fn rejects_bad_level_and_relative_log_dir() {
        let err = CoreConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "loud")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidLogLevel("loud".to_string()));

        let err = CoreConfig::from_lookup(lookup_from(&[(LOG_DIR_ENV, "logs")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidLogDir("logs".to_string()));
    }

    #[test]
    fn open_db_creates_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configured.sqlite3");
        let config = CoreConfig {
            db_path: path.clone(),
            log_level: "info",
            log_dir: None,
        };

        config.open_db().unwrap();
        assert!(path.exists());
    }
}
