//! In-memory task store and its change notifications.
//!
//! # Responsibility
//! - Own the authoritative ordered task collection.
//! - Apply add/toggle/delete/clear-completed keyed strictly by `TaskId`.
//! - Notify observers after every effective mutation.
//!
//! # Invariants
//! - Insertion order is preserved; no mutation reorders surviving tasks.
//! - No-op calls never notify observers.

pub mod observer;
pub mod todo_store;
