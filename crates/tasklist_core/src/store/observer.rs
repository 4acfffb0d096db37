//! Store observer contract.

use crate::model::task::{Task, TaskId};

/// Describes one effective store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Added(TaskId),
    Toggled { id: TaskId, completed: bool },
    Deleted(TaskId),
    ClearedCompleted { removed: usize },
}

impl StoreChange {
    /// Stable event name used in log lines.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Added(_) => "task_add",
            Self::Toggled { .. } => "task_toggle",
            Self::Deleted(_) => "task_delete",
            Self::ClearedCompleted { .. } => "task_clear_completed",
        }
    }
}

/// Receives the full task slice after each effective store mutation.
///
/// Observers run synchronously, in registration order, before the mutating
/// call returns.
pub trait StoreObserver {
    fn on_change(&mut self, change: &StoreChange, tasks: &[Task]);
}
