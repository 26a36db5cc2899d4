//! Task domain model.
//!
//! # Responsibility
//! - Define the single record tracked by the board.
//! - Own the text normalization and completion lifecycle rules.
//! - Define the persisted wire shape and validate it on decode.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` and `description` are trimmed and never empty.
//! - `completed_at.is_some() == is_completed`.
//! - Timestamps carry millisecond precision so the wire form round-trips.

use chrono::{DateTime, SecondsFormat, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque task identifier.
///
/// Generated ids are UUID v4 in simple form, but any non-empty string read
/// back from storage is accepted so older records keep their identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Text validation failures for task title/description input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Description is empty after trimming.
    EmptyDescription,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::EmptyDescription => write!(f, "task description cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Decode failures for persisted task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRecordError {
    EmptyId,
    Validation(TaskValidationError),
    InvalidTimestamp { field: &'static str, value: String },
    /// `completedAt` presence disagrees with `isCompleted`.
    CompletionMismatch { is_completed: bool },
}

impl Display for TaskRecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id cannot be empty"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidTimestamp { field, value } => {
                write!(f, "invalid timestamp `{value}` in {field}")
            }
            Self::CompletionMismatch { is_completed } => write!(
                f,
                "completedAt must be {} when isCompleted is {is_completed}",
                if *is_completed { "set" } else { "absent" }
            ),
        }
    }
}

impl Error for TaskRecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for TaskRecordError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Trims title/description and rejects empty values.
///
/// Title is checked first, matching the order input fields are shown in.
pub fn normalize_task_text(
    title: &str,
    description: &str,
) -> Result<(String, String), TaskValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    let description = description.trim();
    if description.is_empty() {
        return Err(TaskValidationError::EmptyDescription);
    }
    Ok((title.to_string(), description.to_string()))
}

/// Current wall-clock time at persisted precision.
pub(crate) fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    is_completed: bool,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a pending task with a generated id.
    ///
    /// # Errors
    /// - Returns `TaskValidationError` when either text is blank.
    pub fn new(title: &str, description: &str) -> Result<Self, TaskValidationError> {
        let (title, description) = normalize_task_text(title, description)?;
        Ok(Self {
            id: TaskId::generate(),
            title,
            description,
            is_completed: false,
            created_at: now_millis(),
            completed_at: None,
        })
    }

    /// Rebuilds a task from already-persisted parts.
    ///
    /// Used by the decode path where identity and timestamps exist externally.
    /// Completion state is derived from `completed_at`.
    pub fn restore(
        id: TaskId,
        title: &str,
        description: &str,
        created_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Self, TaskRecordError> {
        if id.as_str().trim().is_empty() {
            return Err(TaskRecordError::EmptyId);
        }
        let (title, description) = normalize_task_text(title, description)?;
        Ok(Self {
            id,
            title,
            description,
            is_completed: completed_at.is_some(),
            created_at,
            completed_at,
        })
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Flips completion and keeps `completed_at` in lockstep.
    pub(crate) fn toggle_completion(&mut self, now: DateTime<Utc>) {
        self.is_completed = !self.is_completed;
        self.completed_at = if self.is_completed { Some(now) } else { None };
    }

    /// Replaces title/description; callers pass normalized text.
    pub(crate) fn set_text(&mut self, title: String, description: String) {
        self.title = title;
        self.description = description;
    }
}

/// Persisted timestamp: RFC 3339 text on write, text or epoch millis on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum WireTimestamp {
    Millis(i64),
    Text(String),
}

impl WireTimestamp {
    fn encode(value: DateTime<Utc>) -> Self {
        Self::Text(value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Returns `Ok(None)` for the empty string.
    fn decode(&self, field: &'static str) -> Result<Option<DateTime<Utc>>, TaskRecordError> {
        let invalid = |value: String| TaskRecordError::InvalidTimestamp { field, value };
        match self {
            Self::Millis(millis) => Utc
                .timestamp_millis_opt(*millis)
                .single()
                .map(Some)
                .ok_or_else(|| invalid(millis.to_string())),
            Self::Text(text) if text.trim().is_empty() => Ok(None),
            Self::Text(text) => DateTime::parse_from_rfc3339(text.trim())
                .map(|parsed| Some(parsed.with_timezone(&Utc)))
                .map_err(|_| invalid(text.clone())),
        }
    }
}

/// Wire shape of one task inside the persistence slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: String,
    title: String,
    description: String,
    is_completed: bool,
    created_at: WireTimestamp,
    #[serde(default)]
    completed_at: Option<WireTimestamp>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskRecordError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let created_at = record
            .created_at
            .decode("createdAt")?
            .ok_or(TaskRecordError::InvalidTimestamp {
                field: "createdAt",
                value: String::new(),
            })?;
        let completed_at = match &record.completed_at {
            Some(value) => value.decode("completedAt")?,
            None => None,
        };
        if completed_at.is_some() != record.is_completed {
            return Err(TaskRecordError::CompletionMismatch {
                is_completed: record.is_completed,
            });
        }

        Task::restore(
            TaskId::from(record.id),
            &record.title,
            &record.description,
            created_at,
            completed_at,
        )
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.0,
            title: task.title,
            description: task.description,
            is_completed: task.is_completed,
            created_at: WireTimestamp::encode(task.created_at),
            completed_at: task.completed_at.map(WireTimestamp::encode),
        }
    }
}
