//! String-keyed slot storage contracts and implementations.
//!
//! # Responsibility
//! - Store raw string payloads under named keys.
//! - Keep encoding concerns out of the storage layer.
//!
//! # Invariants
//! - `write_slot` replaces any prior value for the key.
//! - `read_slot` returns `None` for keys that were never written.

use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::rc::Rc;

pub type SlotResult<T> = Result<T, SlotStorageError>;

/// Storage-layer failure for slot reads and writes.
#[derive(Debug)]
pub enum SlotStorageError {
    Db(DbError),
    /// Slot keys must be non-empty after trimming.
    InvalidKey,
}

impl Display for SlotStorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey => write!(f, "slot key cannot be empty"),
        }
    }
}

impl Error for SlotStorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey => None,
        }
    }
}

impl From<DbError> for SlotStorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SlotStorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Query(value))
    }
}

/// Key-value storage holding raw string payloads.
pub trait SlotStorage {
    fn read_slot(&self, key: &str) -> SlotResult<Option<String>>;
    fn write_slot(&mut self, key: &str, value: &str) -> SlotResult<()>;
}

/// Process-local slot storage.
///
/// Clones share the same slots, so tests can keep a handle for inspection
/// after moving one clone into the store.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStorage {
    slots: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read_slot(&self, key: &str) -> SlotResult<Option<String>> {
        let key = normalize_key(key)?;
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write_slot(&mut self, key: &str, value: &str) -> SlotResult<()> {
        let key = normalize_key(key)?;
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// SQLite-backed slot storage over the `storage_slots` table.
pub struct SqliteSlotStorage {
    conn: Connection,
}

impl SqliteSlotStorage {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> SlotResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a migrated in-memory database.
    pub fn open_in_memory() -> SlotResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps a connection previously returned by `open_db*`.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Returns the underlying connection for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SlotStorage for SqliteSlotStorage {
    fn read_slot(&self, key: &str) -> SlotResult<Option<String>> {
        let key = normalize_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM storage_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_slot(&mut self, key: &str, value: &str) -> SlotResult<()> {
        let key = normalize_key(key)?;
        self.conn.execute(
            "INSERT INTO storage_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

fn normalize_key(key: &str) -> SlotResult<&str> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(SlotStorageError::InvalidKey);
    }
    Ok(trimmed)
}
