//! Write-through persistence for the task store.
//!
//! # Responsibility
//! - Restore the initial task list from one named slot.
//! - Overwrite that slot with the full list after every store change.
//!
//! # Invariants
//! - Absent or corrupt payloads load as an empty list.
//! - A slot that cannot be read is an error, so a later save never
//!   overwrites tasks that were merely unreachable.
//! - Save failures are logged, never propagated into store mutations.

use crate::model::task::Task;
use crate::persist::codec::{decode_tasks, encode_tasks};
use crate::persist::slot::{SlotResult, SlotStorage, SlotStorageError};
use crate::store::observer::{StoreChange, StoreObserver};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Failure while writing the task list to its slot.
#[derive(Debug)]
pub enum PersistError {
    Encode(serde_json::Error),
    Storage(SlotStorageError),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<SlotStorageError> for PersistError {
    fn from(value: SlotStorageError) -> Self {
        Self::Storage(value)
    }
}

/// How the startup collection was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Slot held a valid payload with this many tasks.
    Restored(usize),
    /// Slot was never written.
    Absent,
    /// Slot content was unreadable or invalid and has been ignored.
    Discarded(String),
}

/// Result of reading the slot at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTasks {
    pub tasks: Vec<Task>,
    pub outcome: LoadOutcome,
}

/// Synchronizes one storage slot with the task store.
pub struct PersistenceBridge<S: SlotStorage> {
    storage: S,
    slot_key: String,
}

impl<S: SlotStorage> PersistenceBridge<S> {
    pub fn new(storage: S, slot_key: impl Into<String>) -> Self {
        Self {
            storage,
            slot_key: slot_key.into(),
        }
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    /// Reads the initial task list.
    ///
    /// Payload problems become an empty list with the reason recorded in
    /// `outcome`; only storage read failures are returned as errors.
    pub fn load(&self) -> SlotResult<LoadedTasks> {
        let raw = match self.storage.read_slot(&self.slot_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("event=slot_load module=persist status=ok outcome=absent");
                return Ok(LoadedTasks {
                    tasks: Vec::new(),
                    outcome: LoadOutcome::Absent,
                });
            }
            Err(err) => {
                error!("event=slot_load module=persist status=error error={err}");
                return Err(err);
            }
        };

        let loaded = match decode_tasks(&raw) {
            Ok(tasks) => {
                info!(
                    "event=slot_load module=persist status=ok outcome=restored count={}",
                    tasks.len()
                );
                let count = tasks.len();
                LoadedTasks {
                    tasks,
                    outcome: LoadOutcome::Restored(count),
                }
            }
            Err(err) => discarded(err.to_string()),
        };
        Ok(loaded)
    }

    /// Overwrites the slot with the full ordered list.
    pub fn save(&mut self, tasks: &[Task]) -> Result<(), PersistError> {
        let started_at = Instant::now();
        let payload = encode_tasks(tasks).map_err(PersistError::Encode)?;
        self.storage.write_slot(&self.slot_key, &payload)?;
        debug!(
            "event=slot_save module=persist status=ok count={} bytes={} duration_ms={}",
            tasks.len(),
            payload.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

impl<S: SlotStorage> StoreObserver for PersistenceBridge<S> {
    fn on_change(&mut self, change: &StoreChange, tasks: &[Task]) {
        if let Err(err) = self.save(tasks) {
            error!(
                "event=slot_save module=persist status=error trigger={} error={}",
                change.event_name(),
                err
            );
        }
    }
}

fn discarded(reason: String) -> LoadedTasks {
    warn!("event=slot_load module=persist status=degraded outcome=discarded error={reason}");
    LoadedTasks {
        tasks: Vec::new(),
        outcome: LoadOutcome::Discarded(reason),
    }
}
