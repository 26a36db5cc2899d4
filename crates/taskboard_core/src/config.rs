//! Runtime configuration for the task board.
//!
//! # Responsibility
//! - Hold the data directory, log level and slot key in one place.
//! - Derive database and log paths from the data directory.

use crate::logging::default_log_level;
use crate::storage::persistence::DEFAULT_STORAGE_KEY;
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = ".taskboard";
const DB_FILE_NAME: &str = "taskboard.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub storage_key: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::with_data_dir(default_data_dir())
    }
}

impl BoardConfig {
    /// Creates a config rooted at `data_dir` with default level and key.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            log_level: default_log_level().to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

/// `~/.taskboard`, or `./.taskboard` when no home directory is known.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}
