//! Slot payload codec.
//!
//! The payload is a JSON array of `{"text", "completed", "id"}` objects in
//! store order. Unknown fields are ignored on read.

use crate::model::task::{Task, TaskId, TaskValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reasons a persisted payload cannot seed the store.
#[derive(Debug)]
pub enum SlotDecodeError {
    /// Payload is not a JSON list of task records.
    Json(serde_json::Error),
    /// A record violates the task text invariant.
    InvalidTask {
        id: TaskId,
        source: TaskValidationError,
    },
    /// Two records share one id.
    DuplicateId(TaskId),
}

impl Display for SlotDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed task payload: {err}"),
            Self::InvalidTask { id, source } => write!(f, "invalid task {id}: {source}"),
            Self::DuplicateId(id) => write!(f, "duplicate task id {id}"),
        }
    }
}

impl Error for SlotDecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidTask { source, .. } => Some(source),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for SlotDecodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Serializes the full ordered task list.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tasks)
}

/// Parses and validates a slot payload.
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>, SlotDecodeError> {
    let tasks: Vec<Task> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        task.validate()
            .map_err(|source| SlotDecodeError::InvalidTask {
                id: task.id,
                source,
            })?;
        if !seen.insert(task.id) {
            return Err(SlotDecodeError::DuplicateId(task.id));
        }
    }

    Ok(tasks)
}
