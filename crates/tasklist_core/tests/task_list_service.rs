use std::cell::Cell;
use std::rc::Rc;
use tasklist_core::{
    decode_tasks, FilterMode, LoadOutcome, MemorySlotStorage, SlotResult, SlotStorage,
    SlotStorageError, StoreChange, StoreObserver, Task, TaskListConfig, TaskListService,
    DEFAULT_SLOT_KEY,
};

/// Slot storage that can no longer be read but still accepts writes.
struct UnreadableStorage {
    inner: MemorySlotStorage,
}

impl SlotStorage for UnreadableStorage {
    fn read_slot(&self, _key: &str) -> SlotResult<Option<String>> {
        Err(SlotStorageError::from(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            Some("database is locked".to_string()),
        )))
    }

    fn write_slot(&mut self, key: &str, value: &str) -> SlotResult<()> {
        self.inner.write_slot(key, value)
    }
}

#[derive(Clone, Default)]
struct RenderCounter {
    renders: Rc<Cell<usize>>,
}

impl StoreObserver for RenderCounter {
    fn on_change(&mut self, _change: &StoreChange, _tasks: &[Task]) {
        self.renders.set(self.renders.get() + 1);
    }
}

#[test]
fn fresh_service_shows_empty_state() {
    let service = TaskListService::open(MemorySlotStorage::new(), DEFAULT_SLOT_KEY).unwrap();
    let view = service.view();

    assert_eq!(service.load_outcome(), &LoadOutcome::Absent);
    assert!(view.items.is_empty());
    assert_eq!(view.filter, FilterMode::All);
    assert_eq!(view.empty_message.as_deref(), Some("No tasks yet"));
    assert!(!view.show_clear_completed);
    assert_eq!(view.summary.total, 0);
}

#[test]
fn view_applies_filter_but_summary_covers_everything() {
    let mut service = TaskListService::open(MemorySlotStorage::new(), DEFAULT_SLOT_KEY).unwrap();
    let milk = service.add_task("buy milk").unwrap();
    service.add_task("walk dog").unwrap();
    service.toggle_task(milk);

    service.set_filter(FilterMode::Completed);
    let view = service.view();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].id, milk);
    assert_eq!(view.empty_message, None);
    assert_eq!(view.summary.completed, 1);
    assert_eq!(view.summary.total, 2);
    assert_eq!(view.summary.remaining, 1);
    assert!(view.show_clear_completed);

    service.clear_completed();
    let view = service.view();
    assert!(view.items.is_empty());
    assert_eq!(view.empty_message.as_deref(), Some("No completed tasks"));
    assert!(view.show_clear_completed);
}

#[test]
fn mutations_persist_and_reload_in_a_new_service() {
    let storage = MemorySlotStorage::new();

    let (first, second) = {
        let mut service = TaskListService::open(storage.clone(), DEFAULT_SLOT_KEY).unwrap();
        let first = service.add_task("  first  ").unwrap();
        let second = service.add_task("second").unwrap();
        service.add_task("third").unwrap();
        service.toggle_task(second);
        let third = service.tasks()[2].id;
        service.delete_task(third);
        (first, second)
    };

    let reopened = TaskListService::open(storage, DEFAULT_SLOT_KEY).unwrap();
    assert_eq!(reopened.load_outcome(), &LoadOutcome::Restored(2));
    assert_eq!(
        reopened.tasks(),
        &[
            Task {
                text: "first".to_string(),
                completed: false,
                id: first,
            },
            Task {
                text: "second".to_string(),
                completed: true,
                id: second,
            },
        ]
    );
}

#[test]
fn corrupt_slot_starts_empty_and_is_overwritten_on_next_change() {
    let mut storage = MemorySlotStorage::new();
    storage
        .write_slot(DEFAULT_SLOT_KEY, "{\"todos\": \"not a list\"}")
        .unwrap();

    let mut service = TaskListService::open(storage.clone(), DEFAULT_SLOT_KEY).unwrap();
    assert!(service.tasks().is_empty());
    assert!(matches!(service.load_outcome(), LoadOutcome::Discarded(_)));

    service.add_task("fresh start").unwrap();
    let payload = storage.read_slot(DEFAULT_SLOT_KEY).unwrap().unwrap();
    assert!(payload.starts_with('['));
}

#[test]
fn extra_observers_run_after_persistence() {
    let counter = RenderCounter::default();
    let mut service = TaskListService::open(MemorySlotStorage::new(), DEFAULT_SLOT_KEY).unwrap();
    service.subscribe(Box::new(counter.clone()));

    let id = service.add_task("render me").unwrap();
    assert_eq!(service.add_task(""), None);
    service.toggle_task(id);
    service.set_filter(FilterMode::Pending);

    assert_eq!(counter.renders.get(), 2);
}

#[test]
fn sqlite_backed_service_restores_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = TaskListConfig {
        db_path: dir.path().join("tasks.sqlite3"),
        ..TaskListConfig::default()
    };

    let id = {
        let mut service = TaskListService::open_with_config(&config).unwrap();
        assert_eq!(service.load_outcome(), &LoadOutcome::Absent);
        service.add_task("persist me").unwrap()
    };

    let service = TaskListService::open_with_config(&config).unwrap();
    assert_eq!(service.tasks().len(), 1);
    assert_eq!(service.tasks()[0].id, id);
    assert_eq!(service.tasks()[0].text, "persist me");
}

#[test]
fn unreadable_slot_fails_to_open_and_keeps_stored_tasks() {
    let mut storage = MemorySlotStorage::new();
    let stored = "[{\"text\":\"a\",\"completed\":false,\"id\":1},{\"text\":\"b\",\"completed\":true,\"id\":2}]";
    storage.write_slot(DEFAULT_SLOT_KEY, stored).unwrap();

    let unreadable = UnreadableStorage {
        inner: storage.clone(),
    };
    let result = TaskListService::open(unreadable, DEFAULT_SLOT_KEY);
    assert!(matches!(result, Err(SlotStorageError::Db(_))));

    assert_eq!(
        storage.read_slot(DEFAULT_SLOT_KEY).unwrap().as_deref(),
        Some(stored)
    );
    let reopened = TaskListService::open(storage, DEFAULT_SLOT_KEY).unwrap();
    assert_eq!(reopened.load_outcome(), &LoadOutcome::Restored(2));
}

#[test]
fn adding_after_max_id_task_keeps_ids_unique_across_reload() {
    let mut storage = MemorySlotStorage::new();
    storage
        .write_slot(
            DEFAULT_SLOT_KEY,
            "[{\"text\":\"a\",\"completed\":false,\"id\":9223372036854775807}]",
        )
        .unwrap();

    let mut service = TaskListService::open(storage.clone(), DEFAULT_SLOT_KEY).unwrap();
    let added = service.add_task("b").unwrap();
    assert_ne!(added, i64::MAX);

    let persisted = decode_tasks(&storage.read_slot(DEFAULT_SLOT_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(persisted.len(), 2);

    let reopened = TaskListService::open(storage, DEFAULT_SLOT_KEY).unwrap();
    assert_eq!(reopened.load_outcome(), &LoadOutcome::Restored(2));
}
