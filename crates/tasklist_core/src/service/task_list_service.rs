//! Task list use-case service.
//!
//! # Responsibility
//! - Wire the task store to its persistence bridge at startup.
//! - Hold the current filter mode alongside the store.
//! - Produce render-ready view snapshots for presentation layers.
//!
//! # Invariants
//! - The service is the single writer of task state; presentation layers
//!   read snapshots and call back into the mutation APIs.
//! - Every effective mutation is persisted before the call returns.

use crate::config::TaskListConfig;
use crate::model::task::{Task, TaskId};
use crate::persist::bridge::{LoadOutcome, PersistenceBridge};
use crate::persist::slot::{SlotResult, SlotStorage, SqliteSlotStorage};
use crate::store::observer::StoreObserver;
use crate::store::todo_store::TaskStore;
use crate::view::filter::{empty_state_message, filter_tasks, FilterMode, TaskSummary};
use log::info;

/// Render-ready snapshot of the task list.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskListView {
    /// Tasks visible under `filter`, in store order.
    pub items: Vec<Task>,
    /// Active filter mode.
    pub filter: FilterMode,
    /// Counts over the full list.
    pub summary: TaskSummary,
    /// Placeholder text when `items` is empty.
    pub empty_message: Option<String>,
    /// The clear-completed control is offered only for non-empty lists.
    pub show_clear_completed: bool,
}

/// Single-owner state container for one persisted task list.
pub struct TaskListService {
    store: TaskStore,
    filter: FilterMode,
    load_outcome: LoadOutcome,
}

impl TaskListService {
    /// Restores the list from `slot_key` and persists every later change there.
    ///
    /// Fails when the slot cannot be read; a corrupt payload still opens as
    /// an empty list.
    pub fn open<S: SlotStorage + 'static>(
        storage: S,
        slot_key: impl Into<String>,
    ) -> SlotResult<Self> {
        let bridge = PersistenceBridge::new(storage, slot_key);
        let loaded = bridge.load()?;
        info!(
            "event=task_list_open module=service status=ok slot={} count={}",
            bridge.slot_key(),
            loaded.tasks.len()
        );

        let mut store = TaskStore::from_tasks(loaded.tasks);
        store.subscribe(Box::new(bridge));
        Ok(Self {
            store,
            filter: FilterMode::default(),
            load_outcome: loaded.outcome,
        })
    }

    /// Opens the SQLite-backed list described by `config`.
    pub fn open_with_config(config: &TaskListConfig) -> SlotResult<Self> {
        let storage = SqliteSlotStorage::open(&config.db_path)?;
        Self::open(storage, config.slot_key.clone())
    }

    /// Reports how the startup list was obtained.
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// Registers an extra change observer (for example a re-render hook).
    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) {
        self.store.subscribe(observer);
    }

    pub fn add_task(&mut self, text: &str) -> Option<TaskId> {
        self.store.add(text)
    }

    pub fn toggle_task(&mut self, id: TaskId) -> bool {
        self.store.toggle(id)
    }

    pub fn delete_task(&mut self, id: TaskId) -> bool {
        self.store.delete(id)
    }

    pub fn clear_completed(&mut self) -> usize {
        self.store.clear_completed()
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        self.filter = mode;
    }

    /// Full ordered task list, independent of the filter.
    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    /// Builds a snapshot for the active filter.
    pub fn view(&self) -> TaskListView {
        let tasks = self.store.tasks();
        let items = filter_tasks(tasks, self.filter)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
        let empty_message = items
            .is_empty()
            .then(|| empty_state_message(self.filter));

        TaskListView {
            items,
            filter: self.filter,
            summary: TaskSummary::from_tasks(tasks),
            empty_message,
            show_clear_completed: !tasks.is_empty(),
        }
    }
}
