//! Command-line arguments.

use clap::Parser;
use std::path::{Path, PathBuf};
use taskboard_core::BoardConfig;

#[derive(Debug, Parser)]
#[command(name = "taskboard")]
#[command(version)]
#[command(about = "Track pending and completed tasks from the terminal")]
pub struct Args {
    /// Directory holding the task database and logs (default: ~/.taskboard)
    #[arg(long, env = "TASKBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
    /// Log level: trace|debug|info|warn|error
    #[arg(long, env = "TASKBOARD_LOG_LEVEL")]
    pub log_level: Option<String>,
    /// Keep tasks in memory only; nothing is written to disk
    #[arg(long)]
    pub in_memory: bool,
}

impl Args {
    pub fn board_config(&self) -> BoardConfig {
        let mut config = match &self.data_dir {
            Some(dir) => BoardConfig::with_data_dir(absolutize(dir)),
            None => BoardConfig::default(),
        };
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config
    }
}

/// Logging requires an absolute directory; resolve relative input against cwd.
fn absolutize(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(dir))
        .unwrap_or_else(|_| dir.to_path_buf())
}
