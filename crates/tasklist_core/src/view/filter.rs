//! Filter modes and summary counts for task list rendering.
//!
//! # Invariants
//! - Nothing here mutates the task collection.
//! - Summary counts always cover the full list, whatever the filter mode.

use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// String value for the `all` filter.
pub const FILTER_ALL: &str = "all";
/// String value for the `pending` filter.
pub const FILTER_PENDING: &str = "pending";
/// String value for the `completed` filter.
pub const FILTER_COMPLETED: &str = "completed";

const SUPPORTED_FILTER_STRINGS: &[&str] = &[FILTER_ALL, FILTER_PENDING, FILTER_COMPLETED];

/// Which tasks a view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterMode {
    #[default]
    All,
    Pending,
    Completed,
}

impl FilterMode {
    pub const ALL_MODES: [FilterMode; 3] = [Self::All, Self::Pending, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => FILTER_ALL,
            Self::Pending => FILTER_PENDING,
            Self::Completed => FILTER_COMPLETED,
        }
    }

    /// Returns whether `task` is visible under this mode.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl Display for FilterMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter mode parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterModeParseError(pub String);

impl Display for FilterModeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported filter `{}`; expected {}",
            self.0,
            SUPPORTED_FILTER_STRINGS.join("|")
        )
    }
}

impl Error for FilterModeParseError {}

impl FromStr for FilterMode {
    type Err = FilterModeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            FILTER_ALL => Ok(Self::All),
            FILTER_PENDING => Ok(Self::Pending),
            FILTER_COMPLETED => Ok(Self::Completed),
            other => Err(FilterModeParseError(other.to_string())),
        }
    }
}

/// Returns the ordered subsequence of `tasks` visible under `mode`.
pub fn filter_tasks(tasks: &[Task], mode: FilterMode) -> Vec<&Task> {
    tasks.iter().filter(|task| mode.matches(task)).collect()
}

/// Placeholder text shown when a filtered list is empty.
pub fn empty_state_message(mode: FilterMode) -> String {
    match mode {
        FilterMode::All => "No tasks yet".to_string(),
        other => format!("No {other} tasks"),
    }
}

/// Progress counts over the full, unfiltered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub completed: usize,
    pub total: usize,
    pub remaining: usize,
}

impl TaskSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            completed,
            total: tasks.len(),
            remaining: tasks.len() - completed,
        }
    }

    /// Completed share in `[0.0, 1.0]`; `0.0` for an empty list.
    pub fn progress_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }
}
