//! CLI schema for the tasklist binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tasklist_core::FilterMode;

#[derive(Parser, Debug)]
#[command(name = "tasklist")]
#[command(about = "A persistent single-list task tracker")]
#[command(version)]
pub struct Cli {
    /// SQLite file holding the task list (overrides TASKLIST_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Storage slot key (overrides TASKLIST_SLOT_KEY)
    #[arg(long, global = true)]
    pub slot: Option<String>,

    /// Absolute directory for rolling log files (overrides TASKLIST_LOG_DIR)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a task; words are joined with single spaces
    Add {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Flip a task between pending and completed
    Toggle {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Delete a task
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Remove every completed task
    ClearCompleted,
    /// Print tasks under a filter
    List {
        /// all | pending | completed
        #[arg(long, short, default_value = "all")]
        filter: FilterMode,
    },
}
