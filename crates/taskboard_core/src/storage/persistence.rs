//! Task collection persistence over one storage slot.
//!
//! # Responsibility
//! - Encode the full ordered task collection into a single slot.
//! - Decode the slot back into tasks at startup.
//!
//! # Invariants
//! - `save` overwrites the whole slot; there are no partial writes.
//! - `load` never fails: absent, unreadable or malformed data yields an empty
//!   collection and a diagnostic log line.
//! - Malformed data is rejected as a whole; no per-record salvage.

use crate::model::task::{Task, TaskId};
use crate::storage::slot::{SlotStorage, StorageError};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key used by the original browser storage layout.
pub const DEFAULT_STORAGE_KEY: &str = "todoAppTasks";

pub type PersistResult<T> = Result<T, PersistError>;

/// Save-path failure.
#[derive(Debug)]
pub enum PersistError {
    Encode(serde_json::Error),
    Storage(StorageError),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

impl From<StorageError> for PersistError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Reads and writes the task collection through a `SlotStorage`.
pub struct PersistenceAdapter<S: SlotStorage> {
    storage: S,
    key: String,
}

impl<S: SlotStorage> PersistenceAdapter<S> {
    /// Creates an adapter using `DEFAULT_STORAGE_KEY`.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Serializes all tasks in order and overwrites the slot.
    ///
    /// # Errors
    /// - `PersistError::Storage` when the backend rejects the write.
    pub fn save(&self, tasks: &[Task]) -> PersistResult<()> {
        let encoded = serde_json::to_string(tasks)?;
        self.storage.write_slot(&self.key, &encoded)?;
        debug!(
            "event=tasks_save module=persistence status=ok count={} bytes={}",
            tasks.len(),
            encoded.len()
        );
        Ok(())
    }

    /// Loads the persisted collection, falling back to empty on any problem.
    pub fn load(&self) -> Vec<Task> {
        let raw = match self.storage.read_slot(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("event=tasks_load module=persistence status=empty reason=absent");
                return Vec::new();
            }
            Err(err) => {
                error!(
                    "event=tasks_load module=persistence status=error error_code=slot_read_failed error={}",
                    err
                );
                return Vec::new();
            }
        };

        match decode_tasks(&raw) {
            Ok(tasks) => {
                info!(
                    "event=tasks_load module=persistence status=ok count={}",
                    tasks.len()
                );
                tasks
            }
            Err(reason) => {
                warn!(
                    "event=tasks_load module=persistence status=discarded error_code=malformed_slot bytes={} error={}",
                    raw.len(),
                    reason
                );
                Vec::new()
            }
        }
    }
}

/// Decodes slot text, rejecting wrong shapes and duplicate ids.
fn decode_tasks(raw: &str) -> Result<Vec<Task>, String> {
    let tasks: Vec<Task> = serde_json::from_str(raw).map_err(|err| err.to_string())?;

    let mut seen: HashSet<&TaskId> = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id()) {
            return Err(format!("duplicate task id `{}`", task.id()));
        }
    }

    Ok(tasks)
}
