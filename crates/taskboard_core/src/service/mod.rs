//! Core use-case services.
//!
//! # Responsibility
//! - Own the task collection and orchestrate persistence after mutations.
//! - Keep UI layers decoupled from storage details.

pub mod task_store;
