//! Derived, read-only projections of the task list.

pub mod filter;
