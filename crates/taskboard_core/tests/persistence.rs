use chrono::{TimeZone, Utc};
use taskboard_core::db::open_db;
use taskboard_core::{
    MemorySlotStorage, PersistenceAdapter, SlotStorage, SqliteSlotStorage, StorageError,
    StorageResult, Task, TaskId, TaskStore,
};

const KEY: &str = "todoAppTasks";

fn sample_tasks() -> Vec<Task> {
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 0).unwrap();
    let done = Utc.timestamp_millis_opt(1_709_290_000_123).unwrap();
    vec![
        Task::restore(TaskId::from("_k2j4h5l6m"), "Buy milk", "2% milk", created, None).unwrap(),
        Task::restore(TaskId::from("abc"), "Ship", "release", created, Some(done)).unwrap(),
    ]
}

#[test]
fn save_then_load_round_trips_all_fields() {
    let adapter = PersistenceAdapter::new(MemorySlotStorage::new());
    let tasks = sample_tasks();

    adapter.save(&tasks).unwrap();
    assert_eq!(adapter.load(), tasks);
}

#[test]
fn round_trip_with_generated_timestamps_is_exact() {
    let mut store = TaskStore::open(PersistenceAdapter::new(MemorySlotStorage::new()));
    let first = store.add("one", "body").unwrap();
    store.add("two", "body").unwrap();
    store.toggle_completion(first.id()).unwrap();

    let loaded = store.persistence().load();
    assert_eq!(loaded, store.tasks());
}

#[test]
fn save_writes_camel_case_wire_records() {
    let adapter = PersistenceAdapter::new(MemorySlotStorage::new());
    adapter.save(&sample_tasks()).unwrap();

    let raw = adapter.storage().raw(KEY).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let records = json.as_array().expect("top level should be an array");
    assert_eq!(records.len(), 2);

    assert_eq!(records[0]["id"], "_k2j4h5l6m");
    assert_eq!(records[0]["title"], "Buy milk");
    assert_eq!(records[0]["description"], "2% milk");
    assert_eq!(records[0]["isCompleted"], false);
    assert_eq!(records[0]["createdAt"], "2024-03-01T09:05:00.000Z");
    assert!(records[0]["completedAt"].is_null());

    assert_eq!(records[1]["isCompleted"], true);
    assert_eq!(records[1]["completedAt"], "2024-03-01T10:46:40.123Z");
}

#[test]
fn load_accepts_browser_storage_format() {
    let raw = r#"[
        {"id":"_a1b2c3d4e","title":"Old task","description":"from the browser","isCompleted":true,
         "createdAt":"2023-11-05T08:00:00.000Z","completedAt":"2023-11-06T17:45:10.500Z"},
        {"id":"_z9y8x7w6v","title":"Pending","description":"still open","isCompleted":false,
         "createdAt":"2023-11-07T08:00:00.000Z","completedAt":null}
    ]"#;
    let adapter = PersistenceAdapter::new(MemorySlotStorage::with_slot(KEY, raw));

    let tasks = adapter.load();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id().as_str(), "_a1b2c3d4e");
    assert!(tasks[0].is_completed());
    assert_eq!(
        tasks[0].completed_at(),
        Some(Utc.timestamp_millis_opt(1_699_292_710_500).unwrap())
    );
    assert_eq!(tasks[1].completed_at(), None);
}

#[test]
fn load_accepts_epoch_millis_and_empty_completed_at() {
    let raw = r#"[
        {"id":"n1","title":"t","description":"d","isCompleted":false,
         "createdAt":1700000000000,"completedAt":""},
        {"id":"n2","title":"t","description":"d","isCompleted":false,
         "createdAt":1700000000000}
    ]"#;
    let adapter = PersistenceAdapter::new(MemorySlotStorage::with_slot(KEY, raw));

    let tasks = adapter.load();
    assert_eq!(tasks.len(), 2);
    assert_eq!(
        tasks[0].created_at(),
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    );
    assert!(tasks.iter().all(|task| task.completed_at().is_none()));
}

#[test]
fn load_absent_slot_returns_empty() {
    let adapter = PersistenceAdapter::new(MemorySlotStorage::new());
    assert!(adapter.load().is_empty());
}

#[test]
fn load_corrupted_slot_returns_empty() {
    let corrupted = [
        "not json at all",
        "{\"id\":\"x\"}",
        "42",
        "[{\"id\":\"x\"}]",
        "[{\"id\":\"x\",\"title\":\"\",\"description\":\"d\",\"isCompleted\":false,\"createdAt\":\"2024-01-01T00:00:00Z\"}]",
        "[{\"id\":\"x\",\"title\":\"t\",\"description\":\"d\",\"isCompleted\":false,\"createdAt\":\"yesterday\"}]",
        "[{\"id\":\"x\",\"title\":\"t\",\"description\":\"d\",\"isCompleted\":true,\"createdAt\":\"2024-01-01T00:00:00Z\",\"completedAt\":null}]",
    ];

    for raw in corrupted {
        let adapter = PersistenceAdapter::new(MemorySlotStorage::with_slot(KEY, raw));
        assert!(adapter.load().is_empty(), "expected empty load for {raw}");
    }
}

#[test]
fn one_bad_record_discards_the_whole_collection() {
    let raw = r#"[
        {"id":"good","title":"t","description":"d","isCompleted":false,"createdAt":"2024-01-01T00:00:00Z"},
        {"id":"bad","title":"t","description":"d","isCompleted":"yes","createdAt":"2024-01-01T00:00:00Z"}
    ]"#;
    let adapter = PersistenceAdapter::new(MemorySlotStorage::with_slot(KEY, raw));
    assert!(adapter.load().is_empty());
}

struct UnreadableStorage;

impl SlotStorage for UnreadableStorage {
    fn read_slot(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable("medium offline".to_string()))
    }

    fn write_slot(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("medium offline".to_string()))
    }
}

#[test]
fn load_read_failure_returns_empty_and_save_reports_error() {
    let adapter = PersistenceAdapter::new(UnreadableStorage);
    assert!(adapter.load().is_empty());
    assert!(adapter.save(&sample_tasks()).is_err());
}

#[test]
fn custom_key_is_isolated_from_default_slot() {
    let storage = MemorySlotStorage::new();
    let adapter = PersistenceAdapter::with_key(&storage, "otherBoard");
    adapter.save(&sample_tasks()).unwrap();

    assert_eq!(adapter.key(), "otherBoard");
    assert!(storage.raw(KEY).is_none());
    assert!(PersistenceAdapter::new(&storage).load().is_empty());
}

#[test]
fn sqlite_slot_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskboard.sqlite3");

    let created_id = {
        let conn = open_db(&path).unwrap();
        let mut store = TaskStore::open(PersistenceAdapter::new(SqliteSlotStorage::new(&conn)));
        let first = store.add("A", "first").unwrap();
        store.add("B", "second").unwrap();
        store.toggle_completion(first.id()).unwrap();
        first.id().clone()
    };

    let conn = open_db(&path).unwrap();
    let store = TaskStore::open(PersistenceAdapter::new(SqliteSlotStorage::new(&conn)));
    let titles: Vec<_> = store.tasks().iter().map(|task| task.title()).collect();
    assert_eq!(titles, vec!["A", "B"]);
    assert!(store.get(&created_id).unwrap().is_completed());
}
