//! Runtime configuration resolved from the process environment.
//!
//! # Invariants
//! - Blank environment values behave as if unset.
//! - Resolution never fails; invalid log levels are reported by `init_logging`.

use crate::logging::default_log_level;
use crate::persist::DEFAULT_SLOT_KEY;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "TASKLIST_DB_PATH";
pub const ENV_SLOT_KEY: &str = "TASKLIST_SLOT_KEY";
pub const ENV_LOG_LEVEL: &str = "TASKLIST_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TASKLIST_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "tasklist.sqlite3";

/// Effective settings for opening a task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListConfig {
    /// SQLite file holding the storage slot.
    pub db_path: PathBuf,
    /// Slot key the task list is persisted under.
    pub slot_key: String,
    /// Log level passed to `init_logging`.
    pub log_level: String,
    /// Log directory; logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for TaskListConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl TaskListConfig {
    /// Resolves configuration from `TASKLIST_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: non_blank(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            slot_key: non_blank(ENV_SLOT_KEY).unwrap_or(defaults.slot_key),
            log_level: non_blank(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: non_blank(ENV_LOG_DIR).map(PathBuf::from),
        }
    }
}
