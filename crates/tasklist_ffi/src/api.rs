//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose task list use cases to Dart via FRB as sync calls.
//! - Return render-ready snapshots so the UI stays a read-only observer.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each call runs one full load-mutate-persist cycle under a process-wide
//!   lock, so concurrent host threads never interleave writes to the slot.
//! - The database comes from `TASKLIST_*` env vars, resolved once per process.

use log::warn;
use std::sync::{Mutex, OnceLock};
use tasklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    FilterMode, TaskListConfig, TaskListService, TaskListView,
};

static ENTRY_CONFIG: OnceLock<TaskListConfig> = OnceLock::new();
static ENTRY_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One task row as rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Stable task ID used for toggle/delete callbacks.
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

/// Snapshot envelope returned by every task list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Whether the call reached the task list.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Effective filter (`all|pending|completed`).
    pub filter: String,
    /// Tasks visible under `filter`.
    pub items: Vec<TaskItem>,
    pub completed_count: u32,
    pub total_count: u32,
    pub remaining_count: u32,
    /// Placeholder text when `items` is empty.
    pub empty_message: Option<String>,
    /// Whether to offer the clear-completed control.
    pub show_clear_completed: bool,
    /// ID of the task created by `tasks_add`, if any.
    pub created_id: Option<i64>,
}

impl TaskListResponse {
    fn success(message: impl Into<String>, view: TaskListView) -> Self {
        Self {
            ok: true,
            message: message.into(),
            filter: view.filter.as_str().to_string(),
            items: view
                .items
                .into_iter()
                .map(|task| TaskItem {
                    id: task.id,
                    text: task.text,
                    completed: task.completed,
                })
                .collect(),
            completed_count: saturating_u32(view.summary.completed),
            total_count: saturating_u32(view.summary.total),
            remaining_count: saturating_u32(view.summary.remaining),
            empty_message: view.empty_message,
            show_clear_completed: view.show_clear_completed,
            created_id: None,
        }
    }

    fn failure(message: impl Into<String>, filter: FilterMode) -> Self {
        Self {
            ok: false,
            message: message.into(),
            filter: filter.as_str().to_string(),
            items: Vec::new(),
            completed_count: 0,
            total_count: 0,
            remaining_count: 0,
            empty_message: None,
            show_clear_completed: false,
            created_id: None,
        }
    }
}

/// Returns the current list under `filter` without mutating it.
///
/// Unknown filter strings fall back to `all`.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_view(filter: String) -> TaskListResponse {
    with_task_list("tasks_view", &filter, |_| "OK.".to_string())
}

/// Adds one task; blank text is ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_add(text: String, filter: String) -> TaskListResponse {
    let mut created_id = None;
    let mut response = with_task_list("tasks_add", &filter, |service| {
        match service.add_task(&text) {
            Some(id) => {
                created_id = Some(id);
                "Task added.".to_string()
            }
            None => "Empty task ignored.".to_string(),
        }
    });
    response.created_id = created_id;
    response
}

/// Flips completion for task `id`; unknown ids are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_toggle(id: i64, filter: String) -> TaskListResponse {
    with_task_list("tasks_toggle", &filter, |service| {
        if service.toggle_task(id) {
            "Task updated.".to_string()
        } else {
            "Task not found.".to_string()
        }
    })
}

/// Deletes task `id`; unknown ids are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_delete(id: i64, filter: String) -> TaskListResponse {
    with_task_list("tasks_delete", &filter, |service| {
        if service.delete_task(id) {
            "Task deleted.".to_string()
        } else {
            "Task not found.".to_string()
        }
    })
}

/// Removes every completed task.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_clear_completed(filter: String) -> TaskListResponse {
    with_task_list("tasks_clear_completed", &filter, |service| {
        format!("Cleared {} task(s).", service.clear_completed())
    })
}

fn with_task_list(
    operation: &str,
    filter: &str,
    f: impl FnOnce(&mut TaskListService) -> String,
) -> TaskListResponse {
    let filter = parse_filter(filter);
    let _guard = ENTRY_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let mut service = match TaskListService::open_with_config(entry_config()) {
        Ok(service) => service,
        Err(err) => {
            return TaskListResponse::failure(format!("{operation} failed: {err}"), filter);
        }
    };
    service.set_filter(filter);

    let message = f(&mut service);
    TaskListResponse::success(message, service.view())
}

fn parse_filter(raw: &str) -> FilterMode {
    if raw.trim().is_empty() {
        return FilterMode::All;
    }
    raw.parse().unwrap_or_else(|err| {
        warn!("event=ffi_filter module=ffi status=fallback error={err}");
        FilterMode::All
    })
}

fn entry_config() -> &'static TaskListConfig {
    ENTRY_CONFIG.get_or_init(resolve_entry_config)
}

#[cfg(not(test))]
fn resolve_entry_config() -> TaskListConfig {
    TaskListConfig::from_env()
}

/// Unit tests never read `TASKLIST_*` and never touch the user's database.
#[cfg(test)]
fn resolve_entry_config() -> TaskListConfig {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    TaskListConfig {
        db_path: std::env::temp_dir().join(format!(
            "tasklist-ffi-test-{}-{nanos}.sqlite3",
            std::process::id()
        )),
        ..TaskListConfig::default()
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
