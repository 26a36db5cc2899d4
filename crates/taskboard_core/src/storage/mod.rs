//! Storage layer: slot backends and task collection persistence.
//!
//! # Responsibility
//! - Define the string-keyed slot contract and its SQLite/in-memory backends.
//! - Isolate the wire format of the task collection from the store.
//!
//! # Invariants
//! - Only `PersistenceAdapter` reads or writes the task slot.

pub mod persistence;
pub mod slot;
