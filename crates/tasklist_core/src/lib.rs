//! Core domain logic for TaskList.
//! This crate is the single source of truth for task list invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod persist;
pub mod service;
pub mod store;
pub mod view;

pub use config::TaskListConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use persist::bridge::{LoadOutcome, LoadedTasks, PersistError, PersistenceBridge};
pub use persist::codec::{decode_tasks, encode_tasks, SlotDecodeError};
pub use persist::slot::{
    MemorySlotStorage, SlotResult, SlotStorage, SlotStorageError, SqliteSlotStorage,
};
pub use persist::DEFAULT_SLOT_KEY;
pub use service::task_list_service::{TaskListService, TaskListView};
pub use store::observer::{StoreChange, StoreObserver};
pub use store::todo_store::TaskStore;
pub use view::filter::{
    empty_state_message, filter_tasks, FilterMode, FilterModeParseError, TaskSummary,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
