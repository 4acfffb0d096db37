use tasklist_core::{
    decode_tasks, encode_tasks, LoadOutcome, MemorySlotStorage, PersistenceBridge, SlotResult,
    SlotStorage, SlotStorageError, SqliteSlotStorage, Task, TaskStore, DEFAULT_SLOT_KEY,
};

/// Slot storage whose reads fail while writes still land in `inner`.
struct UnreadableStorage {
    inner: MemorySlotStorage,
}

impl SlotStorage for UnreadableStorage {
    fn read_slot(&self, _key: &str) -> SlotResult<Option<String>> {
        Err(SlotStorageError::from(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_IOERR),
            Some("disk I/O error".to_string()),
        )))
    }

    fn write_slot(&mut self, key: &str, value: &str) -> SlotResult<()> {
        self.inner.write_slot(key, value)
    }
}

fn sample_tasks() -> Vec<Task> {
    vec![
        Task {
            text: "buy milk".to_string(),
            completed: false,
            id: 1_700_000_000_000,
        },
        Task {
            text: "write \"quoted\" report\nwith newline".to_string(),
            completed: true,
            id: 1_700_000_000_001,
        },
        Task {
            text: "ünïcödé ✓".to_string(),
            completed: false,
            id: 42,
        },
    ]
}

#[test]
fn encoded_payload_round_trips_in_order() {
    let tasks = sample_tasks();
    let decoded = decode_tasks(&encode_tasks(&tasks).unwrap()).unwrap();
    assert_eq!(decoded, tasks);
}

#[test]
fn payload_matches_original_wire_shape() {
    let payload = encode_tasks(&sample_tasks()[..1]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();

    assert!(value.is_array());
    assert_eq!(value[0]["text"], "buy milk");
    assert_eq!(value[0]["completed"], false);
    assert_eq!(value[0]["id"], 1_700_000_000_000_i64);
}

#[test]
fn load_reports_absent_slot_as_empty() {
    let bridge = PersistenceBridge::new(MemorySlotStorage::new(), DEFAULT_SLOT_KEY);
    let loaded = bridge.load().unwrap();

    assert!(loaded.tasks.is_empty());
    assert_eq!(loaded.outcome, LoadOutcome::Absent);
}

#[test]
fn load_discards_corrupt_payloads() {
    let corrupt_payloads = [
        "not json at all",
        "{\"text\":\"a\",\"completed\":false,\"id\":1}",
        "42",
        "null",
        "[{\"text\":\"missing id\",\"completed\":false}]",
        "[{\"text\":\"\",\"completed\":false,\"id\":1}]",
        "[{\"text\":\"a\",\"completed\":false,\"id\":1},{\"text\":\"b\",\"completed\":true,\"id\":1}]",
    ];

    for payload in corrupt_payloads {
        let mut storage = MemorySlotStorage::new();
        storage.write_slot(DEFAULT_SLOT_KEY, payload).unwrap();

        let loaded = PersistenceBridge::new(storage, DEFAULT_SLOT_KEY).load().unwrap();

        assert!(loaded.tasks.is_empty(), "payload `{payload}` should load empty");
        assert!(
            matches!(loaded.outcome, LoadOutcome::Discarded(_)),
            "payload `{payload}` should be discarded"
        );
    }
}

#[test]
fn load_returns_storage_read_errors() {
    let storage = UnreadableStorage {
        inner: MemorySlotStorage::new(),
    };

    let err = PersistenceBridge::new(storage, DEFAULT_SLOT_KEY)
        .load()
        .unwrap_err();
    assert!(matches!(err, SlotStorageError::Db(_)));
    assert!(err.to_string().contains("disk I/O error"));
}

#[test]
fn load_accepts_empty_list() {
    let mut storage = MemorySlotStorage::new();
    storage.write_slot(DEFAULT_SLOT_KEY, "[]").unwrap();

    let loaded = PersistenceBridge::new(storage, DEFAULT_SLOT_KEY).load().unwrap();
    assert_eq!(loaded.outcome, LoadOutcome::Restored(0));
}

#[test]
fn bridge_writes_through_on_every_store_change() {
    let storage = MemorySlotStorage::new();
    let inspector = storage.clone();
    let mut store = TaskStore::new();
    store.subscribe(Box::new(PersistenceBridge::new(storage, DEFAULT_SLOT_KEY)));

    let first = store.add("first").unwrap();
    store.add("second").unwrap();
    store.toggle(first);

    let persisted = decode_tasks(&inspector.read_slot(DEFAULT_SLOT_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(persisted, store.tasks());

    store.clear_completed();
    let persisted = decode_tasks(&inspector.read_slot(DEFAULT_SLOT_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].text, "second");
}

#[test]
fn bridge_uses_its_own_slot_key() {
    let storage = MemorySlotStorage::new();
    let inspector = storage.clone();
    let mut bridge = PersistenceBridge::new(storage, "work");

    bridge.save(&sample_tasks()).unwrap();

    assert!(inspector.read_slot("work").unwrap().is_some());
    assert_eq!(inspector.read_slot(DEFAULT_SLOT_KEY).unwrap(), None);
}

#[test]
fn sqlite_slot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");

    {
        let storage = SqliteSlotStorage::open(&path).unwrap();
        let mut bridge = PersistenceBridge::new(storage, DEFAULT_SLOT_KEY);
        bridge.save(&sample_tasks()).unwrap();
        bridge.save(&sample_tasks()[..2]).unwrap();
    }

    let storage = SqliteSlotStorage::open(&path).unwrap();
    let rows: i64 = storage
        .connection()
        .query_row("SELECT COUNT(*) FROM storage_slots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);

    let loaded = PersistenceBridge::new(storage, DEFAULT_SLOT_KEY).load().unwrap();
    assert_eq!(loaded.outcome, LoadOutcome::Restored(2));
    assert_eq!(loaded.tasks, sample_tasks()[..2].to_vec());
}

#[test]
fn sqlite_slot_write_overwrites_previous_value() {
    let mut storage = SqliteSlotStorage::open_in_memory().unwrap();

    assert_eq!(storage.read_slot("todos").unwrap(), None);
    storage.write_slot("todos", "[]").unwrap();
    storage.write_slot("todos", "[1]").unwrap();
    storage.write_slot("work", "[2]").unwrap();

    assert_eq!(storage.read_slot("todos").unwrap().as_deref(), Some("[1]"));
    assert_eq!(storage.read_slot("work").unwrap().as_deref(), Some("[2]"));
}
