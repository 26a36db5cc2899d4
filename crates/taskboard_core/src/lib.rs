//! Core domain logic for Taskboard.
//! This crate is the single source of truth for task invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod presenter;
pub mod service;
pub mod storage;

pub use config::BoardConfig;
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::task::{Task, TaskId, TaskRecordError, TaskValidationError};
pub use presenter::view::{BoardView, CardMode, DisplayZone, EditDraft, SectionView, TaskCard};
pub use presenter::{Command, DispatchOutcome, InputField, Notice, Presenter, TaskUi};
pub use service::task_store::{TaskPartitions, TaskStore};
pub use storage::persistence::{
    PersistError, PersistResult, PersistenceAdapter, DEFAULT_STORAGE_KEY,
};
pub use storage::slot::{
    MemorySlotStorage, SlotStorage, SqliteSlotStorage, StorageError, StorageResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
