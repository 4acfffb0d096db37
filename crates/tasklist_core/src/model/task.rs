//! Task domain model.
//!
//! # Responsibility
//! - Define the single entity of the task list.
//! - Normalize user-entered text at creation time.
//!
//! # Invariants
//! - `id` is unique within one store and never reassigned.
//! - `text` is trimmed, non-empty and immutable after creation.
//! - `completed` starts as `false` and only changes through toggling.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-unique task identifier (creation timestamp in epoch milliseconds).
pub type TaskId = i64;

/// One to-do item.
///
/// Field order matches the persisted wire shape `{text, completed, id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Display text, already trimmed.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Stable identifier used by every mutation.
    pub id: TaskId,
}

/// Validation errors for task construction and persisted records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Text is empty or whitespace-only.
    EmptyText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Creates a pending task from raw user input.
    ///
    /// Returns `EmptyText` when `text` is empty after trimming.
    pub fn new(id: TaskId, text: &str) -> Result<Self, TaskValidationError> {
        let text = normalize_text(text).ok_or(TaskValidationError::EmptyText)?;
        Ok(Self {
            text,
            completed: false,
            id,
        })
    }

    /// Checks the text invariant on records that did not pass through `new`.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(())
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub fn is_pending(&self) -> bool {
        !self.completed
    }
}

/// Trims task input; `None` means the input must be rejected.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
