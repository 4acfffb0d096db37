//! Use-case services.
//!
//! # Responsibility
//! - Own task list state on behalf of presentation layers.
//! - Keep UI/FFI/CLI layers decoupled from store and storage details.

pub mod task_list_service;
