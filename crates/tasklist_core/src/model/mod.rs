//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, persistence and views.
//!
//! # Invariants
//! - Every task is identified by a store-unique `TaskId`.
//! - Task text is trimmed and never empty.

pub mod task;
