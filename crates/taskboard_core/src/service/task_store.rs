//! Task store: the in-memory collection and its write-through persistence.
//!
//! # Responsibility
//! - Own the ordered task collection for the process lifetime.
//! - Apply add/toggle/edit/delete and persist after each mutation.
//! - Provide the pending/completed partition read.
//!
//! # Invariants
//! - Insertion order is preserved; only `delete` removes elements.
//! - Validation failures never touch the collection or the slot.
//! - Unknown ids are silent no-ops.
//! - A failed save leaves in-memory state authoritative.

use crate::model::task::{normalize_task_text, now_millis, Task, TaskId, TaskValidationError};
use crate::storage::persistence::{PersistError, PersistenceAdapter};
use crate::storage::slot::SlotStorage;
use log::{debug, error, info};

/// Pending and completed views over the collection, in collection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPartitions<'a> {
    pub pending: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
}

/// Owner of the task collection.
pub struct TaskStore<S: SlotStorage> {
    tasks: Vec<Task>,
    persistence: PersistenceAdapter<S>,
    last_save_error: Option<PersistError>,
}

impl<S: SlotStorage> TaskStore<S> {
    /// Loads the persisted collection and takes ownership of the adapter.
    pub fn open(persistence: PersistenceAdapter<S>) -> Self {
        let tasks = persistence.load();
        Self {
            tasks,
            persistence,
            last_save_error: None,
        }
    }

    /// Appends a new pending task.
    ///
    /// # Errors
    /// - `TaskValidationError` when title or description is blank; the
    ///   collection is left unchanged.
    pub fn add(&mut self, title: &str, description: &str) -> Result<Task, TaskValidationError> {
        let task = Task::new(title, description)?;
        self.tasks.push(task.clone());
        info!(
            "event=task_add module=store status=ok id={} count={}",
            task.id(),
            self.tasks.len()
        );
        self.persist();
        Ok(task)
    }

    /// Flips completion of the task with `id`.
    ///
    /// Returns the updated task, or `None` when the id is unknown.
    pub fn toggle_completion(&mut self, id: &TaskId) -> Option<&Task> {
        let index = self.position(id)?;
        self.tasks[index].toggle_completion(now_millis());
        info!(
            "event=task_toggle module=store status=ok id={} completed={}",
            id,
            self.tasks[index].is_completed()
        );
        self.persist();
        Some(&self.tasks[index])
    }

    /// Replaces title and description of the task with `id`.
    ///
    /// Returns `Ok(None)` when the id is unknown.
    ///
    /// # Errors
    /// - `TaskValidationError` when either new value is blank; the stored
    ///   task is left unchanged.
    pub fn edit(
        &mut self,
        id: &TaskId,
        title: &str,
        description: &str,
    ) -> Result<Option<&Task>, TaskValidationError> {
        let (title, description) = normalize_task_text(title, description)?;
        let Some(index) = self.position(id) else {
            debug!("event=task_edit module=store status=skipped reason=unknown_id id={id}");
            return Ok(None);
        };

        self.tasks[index].set_text(title, description);
        info!("event=task_edit module=store status=ok id={id}");
        self.persist();
        Ok(Some(&self.tasks[index]))
    }

    /// Removes the task with `id` if present, then persists.
    pub fn delete(&mut self, id: &TaskId) -> Option<Task> {
        let removed = self.position(id).map(|index| self.tasks.remove(index));
        info!(
            "event=task_delete module=store status={} id={} count={}",
            if removed.is_some() { "ok" } else { "skipped" },
            id,
            self.tasks.len()
        );
        self.persist();
        removed
    }

    /// Splits the collection by completion state.
    pub fn list(&self) -> TaskPartitions<'_> {
        let (completed, pending): (Vec<&Task>, Vec<&Task>) = self
            .tasks
            .iter()
            .partition(|task| task.is_completed());
        TaskPartitions { pending, completed }
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Most recent save failure; cleared by the next successful save.
    pub fn last_save_error(&self) -> Option<&PersistError> {
        self.last_save_error.as_ref()
    }

    pub fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    fn persist(&mut self) {
        match self.persistence.save(&self.tasks) {
            Ok(()) => self.last_save_error = None,
            Err(err) => {
                error!(
                    "event=tasks_save module=store status=error error_code=save_failed count={} error={}",
                    self.tasks.len(),
                    err
                );
                self.last_save_error = Some(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use crate::model::task::TaskId;
    use crate::storage::persistence::PersistenceAdapter;
    use crate::storage::slot::MemorySlotStorage;

    fn memory_store() -> TaskStore<MemorySlotStorage> {
        TaskStore::open(PersistenceAdapter::new(MemorySlotStorage::new()))
    }

    #[test]
    fn edit_validates_before_looking_up_id() {
        let mut store = memory_store();
        let err = store
            .edit(&TaskId::from("missing"), " ", "body")
            .unwrap_err();
        assert_eq!(err, crate::TaskValidationError::EmptyTitle);
    }

    #[test]
    fn failed_save_is_recorded_and_cleared() {
        let mut store = memory_store();
        store.persistence().storage().set_fail_writes(true);

        let task = store.add("title", "body").unwrap();
        assert!(store.last_save_error().is_some());
        assert_eq!(store.len(), 1);

        store.persistence().storage().set_fail_writes(false);
        store.toggle_completion(task.id()).unwrap();
        assert!(store.last_save_error().is_none());
    }
}
