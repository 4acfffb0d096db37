//! Flutter-facing bindings for TaskList core.

pub mod api;
