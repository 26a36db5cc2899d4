//! Domain model for the task board.
//!
//! # Responsibility
//! - Define the canonical task record used by store, persistence and views.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion removes the task; there are no tombstones.

pub mod task;
