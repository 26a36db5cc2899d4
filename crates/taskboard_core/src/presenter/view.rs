//! Render-ready view models for the task board.
//!
//! # Responsibility
//! - Turn store partitions into display units with preformatted labels.
//! - Format timestamps as `YYYY-MM-DD HH:MM` (24-hour, zero-padded).
//!
//! # Invariants
//! - Card order equals collection order within each section.
//! - A section carries a placeholder exactly when it has no cards.

use crate::model::task::{Task, TaskId};
use crate::service::task_store::TaskPartitions;
use chrono::{DateTime, FixedOffset, Local, Utc};

pub const PENDING_PLACEHOLDER: &str = "No pending tasks";
pub const COMPLETED_PLACEHOLDER: &str = "No completed tasks";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Time zone used for human-facing timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// System local time.
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// Formats `value` as `YYYY-MM-DD HH:MM` in this zone.
    pub fn format(&self, value: DateTime<Utc>) -> String {
        match self {
            Self::Local => value
                .with_timezone(&Local)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            Self::Fixed(offset) => value
                .with_timezone(offset)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
        }
    }
}

/// Which partition a section shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Pending,
    Completed,
}

impl SectionKind {
    pub fn heading(self) -> &'static str {
        match self {
            Self::Pending => "Pending Tasks",
            Self::Completed => "Completed Tasks",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Pending => PENDING_PLACEHOLDER,
            Self::Completed => COMPLETED_PLACEHOLDER,
        }
    }
}

/// Text-entry values shown while a card is in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardMode {
    Display,
    Editing(EditDraft),
}

/// One task display unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    /// `Added: YYYY-MM-DD HH:MM`.
    pub created_label: String,
    /// `Completed: YYYY-MM-DD HH:MM`, only for completed tasks.
    pub completed_label: Option<String>,
    /// Accessible name of the toggle action.
    pub toggle_label: &'static str,
    pub mode: CardMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub kind: SectionKind,
    pub cards: Vec<TaskCard>,
    pub placeholder: Option<&'static str>,
}

impl SectionView {
    pub fn heading(&self) -> &'static str {
        self.kind.heading()
    }
}

/// Whole-board snapshot handed to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub pending: SectionView,
    pub completed: SectionView,
}

impl BoardView {
    /// All cards, pending section first.
    pub fn cards(&self) -> impl Iterator<Item = &TaskCard> {
        self.pending.cards.iter().chain(self.completed.cards.iter())
    }

    pub fn sections(&self) -> [&SectionView; 2] {
        [&self.pending, &self.completed]
    }
}

/// Builds the board from store partitions.
///
/// `editing` names the card currently in edit mode and its drafts.
pub fn build_board(
    partitions: &TaskPartitions<'_>,
    editing: Option<(&TaskId, &EditDraft)>,
    zone: DisplayZone,
) -> BoardView {
    BoardView {
        pending: build_section(SectionKind::Pending, &partitions.pending, editing, zone),
        completed: build_section(
            SectionKind::Completed,
            &partitions.completed,
            editing,
            zone,
        ),
    }
}

fn build_section(
    kind: SectionKind,
    tasks: &[&Task],
    editing: Option<(&TaskId, &EditDraft)>,
    zone: DisplayZone,
) -> SectionView {
    let cards: Vec<TaskCard> = tasks
        .iter()
        .map(|task| build_card(task, editing, zone))
        .collect();
    let placeholder = cards.is_empty().then(|| kind.placeholder());
    SectionView {
        kind,
        cards,
        placeholder,
    }
}

fn build_card(task: &Task, editing: Option<(&TaskId, &EditDraft)>, zone: DisplayZone) -> TaskCard {
    let mode = match editing {
        Some((id, draft)) if id == task.id() => CardMode::Editing(draft.clone()),
        _ => CardMode::Display,
    };
    let completed_label = match (task.is_completed(), task.completed_at()) {
        (true, Some(at)) => Some(format!("Completed: {}", zone.format(at))),
        _ => None,
    };

    TaskCard {
        id: task.id().clone(),
        title: task.title().to_string(),
        description: task.description().to_string(),
        is_completed: task.is_completed(),
        created_label: format!("Added: {}", zone.format(task.created_at())),
        completed_label,
        toggle_label: if task.is_completed() {
            "Mark task as pending"
        } else {
            "Mark task as complete"
        },
        mode,
    }
}

#[cfg(test)]
mod tests {
    use super::DisplayZone;
    use chrono::{FixedOffset, TimeZone, Utc};

    #[test]
    fn format_pads_and_uses_24_hour_clock() {
        let utc = DisplayZone::Fixed(FixedOffset::east_opt(0).unwrap());
        let value = Utc.with_ymd_and_hms(2024, 3, 7, 21, 5, 59).unwrap();
        assert_eq!(utc.format(value), "2024-03-07 21:05");
    }

    #[test]
    fn format_applies_offset() {
        let plus_two = DisplayZone::Fixed(FixedOffset::east_opt(2 * 3600).unwrap());
        let value = Utc.with_ymd_and_hms(2024, 12, 31, 23, 30, 0).unwrap();
        assert_eq!(plus_two.format(value), "2025-01-01 01:30");
    }
}
