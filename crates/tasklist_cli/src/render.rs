//! Plain-text rendering of task list snapshots.

use std::fmt::Write;
use tasklist_core::TaskListView;

/// Renders the progress header, visible rows and footer.
pub fn render_view(view: &TaskListView) -> String {
    let mut out = String::new();
    let summary = view.summary;

    if summary.total > 0 {
        let _ = writeln!(
            out,
            "{} / {} completed ({:.0}%)",
            summary.completed,
            summary.total,
            summary.progress_ratio() * 100.0
        );
    }

    for task in &view.items {
        let mark = if task.completed { 'x' } else { ' ' };
        let _ = writeln!(out, "[{mark}] {}  {}", task.id, task.text);
    }

    if let Some(message) = &view.empty_message {
        let _ = writeln!(out, "{message}");
    }

    if view.show_clear_completed {
        let _ = writeln!(out, "{} remaining", summary.remaining);
    }

    out
}
