//! SQLite database behind the task list storage slots.
//!
//! # Responsibility
//! - Open connections and bring the `storage_slots` schema up to date.
//! - Report failures with the slot-storage step that produced them.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A connection is handed out only after every migration has applied.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while preparing or querying the slot database.
#[derive(Debug)]
pub enum DbError {
    /// The database file (or in-memory handle) could not be opened.
    Open(rusqlite::Error),
    /// Applying slot schema migration `version` failed; nothing was committed.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build; its slots are left untouched.
    SchemaTooNew { found: u32, supported: u32 },
    /// A slot read or write statement failed.
    Query(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "cannot open task database: {err}"),
            Self::Migration { version, source } => {
                write!(f, "storage slot migration {version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "task database uses slot schema {found}, this build supports up to {supported}"
            ),
            Self::Query(err) => write!(f, "storage slot query failed: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) | Self::Query(err) => Some(err),
            Self::Migration { source, .. } => Some(source),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Query(value)
    }
}
