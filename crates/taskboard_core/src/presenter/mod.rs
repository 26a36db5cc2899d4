//! Presenter: command dispatch and board rendering.
//!
//! # Responsibility
//! - Map user commands to task store operations.
//! - Own edit-mode state and the delete confirmation step.
//! - Render the pending/completed board through an external `TaskUi`.
//!
//! # Invariants
//! - Every dispatched command ends with a render from current store state.
//! - Validation failures are reported as notices, never as errors.
//! - At most one card is in edit mode.

pub mod view;

use self::view::{build_board, BoardView, DisplayZone, EditDraft};
use crate::model::task::{TaskId, TaskValidationError};
use crate::service::task_store::TaskStore;
use crate::storage::slot::SlotStorage;
use log::debug;
use std::fmt::{Display, Formatter};

/// External presentation medium driven by the presenter.
pub trait TaskUi {
    /// Shows the whole board, replacing anything shown before.
    fn render(&mut self, board: &BoardView);
    /// Asks a yes/no question; `true` means proceed.
    fn confirm(&mut self, prompt: &str) -> bool;
    /// Shows a non-blocking message.
    fn notify(&mut self, notice: &Notice);
}

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { title: String, description: String },
    Toggle(TaskId),
    BeginEdit(TaskId),
    SaveEdit {
        id: TaskId,
        title: String,
        description: String,
    },
    CancelEdit,
    /// Asks for confirmation before removing the task.
    Delete(TaskId),
    Refresh,
}

/// Input field a validation notice refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Title,
    Description,
}

/// Message surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Validation {
        field: InputField,
        message: &'static str,
    },
    /// Last save failed; changes live only in memory for now.
    StorageUnavailable { reason: String },
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { message, .. } => f.write_str(message),
            Self::StorageUnavailable { reason } => write!(
                f,
                "Changes could not be saved and will be lost on exit: {reason}"
            ),
        }
    }
}

/// Result of one dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Applied,
    Rejected(TaskValidationError),
    /// Delete was not confirmed.
    Declined,
    /// Command referenced an unknown task id.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EditState {
    id: TaskId,
    draft: EditDraft,
}

/// Drives a `TaskUi` from commands applied to a `TaskStore`.
pub struct Presenter<U: TaskUi> {
    ui: U,
    editing: Option<EditState>,
    zone: DisplayZone,
}

impl<U: TaskUi> Presenter<U> {
    /// Creates a presenter rendering timestamps in local time.
    pub fn new(ui: U) -> Self {
        Self::with_zone(ui, DisplayZone::Local)
    }

    pub fn with_zone(ui: U, zone: DisplayZone) -> Self {
        Self {
            ui,
            editing: None,
            zone,
        }
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn into_ui(self) -> U {
        self.ui
    }

    /// Id of the card currently in edit mode.
    pub fn editing(&self) -> Option<&TaskId> {
        self.editing.as_ref().map(|state| &state.id)
    }

    /// Builds the board from current store state without rendering it.
    pub fn board<S: SlotStorage>(&self, store: &TaskStore<S>) -> BoardView {
        let editing = self
            .editing
            .as_ref()
            .map(|state| (&state.id, &state.draft));
        build_board(&store.list(), editing, self.zone)
    }

    /// Renders the board from current store state.
    pub fn render<S: SlotStorage>(&mut self, store: &TaskStore<S>) {
        let board = self.board(store);
        self.ui.render(&board);
    }

    /// Applies one command, then re-renders.
    pub fn dispatch<S: SlotStorage>(
        &mut self,
        store: &mut TaskStore<S>,
        command: Command,
    ) -> DispatchOutcome {
        let mutating = matches!(
            command,
            Command::Add { .. }
                | Command::Toggle(_)
                | Command::SaveEdit { .. }
                | Command::Delete(_)
        );
        let outcome = self.apply(store, command);
        debug!("event=command_dispatch module=presenter outcome={outcome:?}");

        if mutating && outcome == DispatchOutcome::Applied {
            if let Some(err) = store.last_save_error() {
                self.ui.notify(&Notice::StorageUnavailable {
                    reason: err.to_string(),
                });
            }
        }

        self.render(store);
        outcome
    }

    fn apply<S: SlotStorage>(
        &mut self,
        store: &mut TaskStore<S>,
        command: Command,
    ) -> DispatchOutcome {
        match command {
            Command::Add { title, description } => match store.add(&title, &description) {
                Ok(_) => {
                    self.editing = None;
                    DispatchOutcome::Applied
                }
                Err(err) => self.reject(err, add_message(err)),
            },
            Command::Toggle(id) => match store.toggle_completion(&id) {
                Some(_) => {
                    self.editing = None;
                    DispatchOutcome::Applied
                }
                None => DispatchOutcome::Ignored,
            },
            Command::BeginEdit(id) => {
                let Some(task) = store.get(&id) else {
                    return DispatchOutcome::Ignored;
                };
                let draft = EditDraft {
                    title: task.title().to_string(),
                    description: task.description().to_string(),
                };
                self.editing = Some(EditState { id, draft });
                DispatchOutcome::Applied
            }
            Command::SaveEdit {
                id,
                title,
                description,
            } => match store.edit(&id, &title, &description) {
                Ok(Some(_)) => {
                    self.editing = None;
                    DispatchOutcome::Applied
                }
                Ok(None) => {
                    self.editing = None;
                    DispatchOutcome::Ignored
                }
                Err(err) => {
                    self.editing = Some(EditState {
                        id,
                        draft: EditDraft { title, description },
                    });
                    self.reject(err, edit_message(err))
                }
            },
            Command::CancelEdit => {
                self.editing = None;
                DispatchOutcome::Applied
            }
            Command::Delete(id) => {
                let Some(task) = store.get(&id) else {
                    return DispatchOutcome::Ignored;
                };
                let prompt = format!(
                    "Are you sure you want to delete task:\n\"{}\"?",
                    task.title()
                );
                if !self.ui.confirm(&prompt) {
                    return DispatchOutcome::Declined;
                }
                store.delete(&id);
                self.editing = None;
                DispatchOutcome::Applied
            }
            Command::Refresh => DispatchOutcome::Applied,
        }
    }

    fn reject(&mut self, err: TaskValidationError, message: &'static str) -> DispatchOutcome {
        let field = match err {
            TaskValidationError::EmptyTitle => InputField::Title,
            TaskValidationError::EmptyDescription => InputField::Description,
        };
        self.ui.notify(&Notice::Validation { field, message });
        DispatchOutcome::Rejected(err)
    }
}

fn add_message(err: TaskValidationError) -> &'static str {
    match err {
        TaskValidationError::EmptyTitle => "Please enter a task title.",
        TaskValidationError::EmptyDescription => "Please enter a task description.",
    }
}

fn edit_message(err: TaskValidationError) -> &'static str {
    match err {
        TaskValidationError::EmptyTitle => "Title cannot be empty.",
        TaskValidationError::EmptyDescription => "Description cannot be empty.",
    }
}
