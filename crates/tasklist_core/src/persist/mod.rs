//! Persistence bridge between the task store and a named storage slot.
//!
//! # Responsibility
//! - Define the string-keyed slot storage contract and its implementations.
//! - Encode/decode the full task list to the slot payload.
//! - Write through on every store change and restore on startup.
//!
//! # Invariants
//! - Every write fully overwrites the previous slot value.
//! - Startup never fails on absent or corrupt data; it yields an empty list.

pub mod bridge;
pub mod codec;
pub mod slot;

/// Slot key used when callers do not configure one.
pub const DEFAULT_SLOT_KEY: &str = "todos";
