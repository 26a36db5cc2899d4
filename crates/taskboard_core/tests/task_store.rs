use taskboard_core::{
    MemorySlotStorage, PersistenceAdapter, TaskId, TaskStore, TaskValidationError,
};

fn memory_store() -> TaskStore<MemorySlotStorage> {
    TaskStore::open(PersistenceAdapter::new(MemorySlotStorage::new()))
}

#[test]
fn add_appends_one_task_at_the_end() {
    let mut store = memory_store();

    for (index, title) in ["first", "second", "third"].iter().enumerate() {
        let task = store.add(title, "details").unwrap();
        assert_eq!(store.len(), index + 1);
        assert_eq!(store.tasks().last().unwrap().id(), task.id());
    }
}

#[test]
fn add_trims_and_starts_pending() {
    let mut store = memory_store();

    let task = store.add("  Buy milk ", "\t2% milk, 1 gallon\n").unwrap();
    assert_eq!(task.title(), "Buy milk");
    assert_eq!(task.description(), "2% milk, 1 gallon");
    assert!(!task.is_completed());
    assert_eq!(task.completed_at(), None);
}

#[test]
fn add_with_blank_text_leaves_collection_and_slot_untouched() {
    let mut store = memory_store();

    assert_eq!(
        store.add("", "details").unwrap_err(),
        TaskValidationError::EmptyTitle
    );
    assert_eq!(
        store.add("title", "   ").unwrap_err(),
        TaskValidationError::EmptyDescription
    );
    assert!(store.is_empty());
    assert_eq!(store.persistence().storage().raw("todoAppTasks"), None);
}

#[test]
fn generated_ids_are_unique() {
    let mut store = memory_store();
    let mut ids = std::collections::HashSet::new();

    for _ in 0..50 {
        let task = store.add("t", "d").unwrap();
        assert!(task.id().as_str().len() >= 9);
        assert!(ids.insert(task.id().clone()));
    }
}

#[test]
fn buy_milk_toggles_between_partitions() {
    let mut store = memory_store();
    let task = store.add("Buy milk", "2% milk, 1 gallon").unwrap();

    let partitions = store.list();
    assert_eq!(partitions.pending.len(), 1);
    assert!(partitions.completed.is_empty());
    assert_eq!(partitions.pending[0].title(), "Buy milk");
    assert_eq!(partitions.pending[0].description(), "2% milk, 1 gallon");
    assert!(!partitions.pending[0].is_completed());

    let toggled = store.toggle_completion(task.id()).unwrap();
    assert!(toggled.is_completed());
    let completed_at = toggled.completed_at().expect("completed_at should be set");
    assert!(completed_at >= toggled.created_at());

    let partitions = store.list();
    assert!(partitions.pending.is_empty());
    assert_eq!(partitions.completed.len(), 1);
    assert_eq!(partitions.completed[0].id(), task.id());

    let toggled = store.toggle_completion(task.id()).unwrap();
    assert!(!toggled.is_completed());
    assert_eq!(toggled.completed_at(), None);
    assert_eq!(store.list().pending.len(), 1);
}

#[test]
fn list_preserves_insertion_order_within_partitions() {
    let mut store = memory_store();
    let a = store.add("A", "a").unwrap();
    let b = store.add("B", "b").unwrap();
    let c = store.add("C", "c").unwrap();
    let d = store.add("D", "d").unwrap();

    store.toggle_completion(c.id()).unwrap();
    store.toggle_completion(a.id()).unwrap();

    let partitions = store.list();
    let pending: Vec<_> = partitions.pending.iter().map(|task| task.id()).collect();
    let completed: Vec<_> = partitions.completed.iter().map(|task| task.id()).collect();
    assert_eq!(pending, vec![b.id(), d.id()]);
    assert_eq!(completed, vec![a.id(), c.id()]);

    let all: Vec<_> = store.tasks().iter().map(|task| task.title()).collect();
    assert_eq!(all, vec!["A", "B", "C", "D"]);
}

#[test]
fn edit_replaces_text_only() {
    let mut store = memory_store();
    let task = store.add("draft", "first body").unwrap();
    store.toggle_completion(task.id()).unwrap();
    let before = store.get(task.id()).unwrap().clone();

    let edited = store
        .edit(task.id(), " final ", " second body ")
        .unwrap()
        .expect("task should exist");
    assert_eq!(edited.title(), "final");
    assert_eq!(edited.description(), "second body");
    assert_eq!(edited.id(), before.id());
    assert_eq!(edited.created_at(), before.created_at());
    assert_eq!(edited.completed_at(), before.completed_at());
    assert!(edited.is_completed());
}

#[test]
fn edit_to_empty_title_is_rejected_and_title_kept() {
    let mut store = memory_store();
    let task = store.add("keep me", "body").unwrap();
    let saved_before = store.persistence().storage().raw("todoAppTasks");

    let err = store.edit(task.id(), "", "new body").unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);

    let stored = store.get(task.id()).unwrap();
    assert_eq!(stored.title(), "keep me");
    assert_eq!(stored.description(), "body");
    assert_eq!(store.persistence().storage().raw("todoAppTasks"), saved_before);
}

#[test]
fn operations_on_deleted_id_are_silent_noops() {
    let mut store = memory_store();
    let keep = store.add("keep", "body").unwrap();
    let gone = store.add("gone", "body").unwrap();

    let removed = store.delete(gone.id()).expect("task should be removed");
    assert_eq!(removed.id(), gone.id());
    assert_eq!(store.len(), 1);

    assert!(store.toggle_completion(gone.id()).is_none());
    assert!(store.edit(gone.id(), "t", "d").unwrap().is_none());
    assert!(store.delete(gone.id()).is_none());
    assert!(store.get(gone.id()).is_none());
    assert_eq!(store.tasks()[0].id(), keep.id());
}

#[test]
fn unknown_id_leaves_state_unchanged() {
    let mut store = memory_store();
    store.add("only", "task").unwrap();
    let before = store.tasks().to_vec();

    let missing = TaskId::from("_doesnotexist");
    assert!(store.toggle_completion(&missing).is_none());
    assert!(store.edit(&missing, "x", "y").unwrap().is_none());
    assert!(store.delete(&missing).is_none());
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn every_mutation_is_written_through() {
    let mut store = memory_store();
    let task = store.add("title", "body").unwrap();

    let reopened = |store: &TaskStore<MemorySlotStorage>| {
        let raw = store.persistence().storage().raw("todoAppTasks").unwrap();
        TaskStore::open(PersistenceAdapter::new(MemorySlotStorage::with_slot(
            "todoAppTasks",
            raw,
        )))
    };

    assert_eq!(reopened(&store).tasks(), store.tasks());

    store.toggle_completion(task.id()).unwrap();
    assert_eq!(reopened(&store).tasks(), store.tasks());

    store.edit(task.id(), "renamed", "body").unwrap();
    assert_eq!(reopened(&store).tasks(), store.tasks());

    store.delete(task.id());
    assert!(reopened(&store).is_empty());
}

#[test]
fn storage_write_failure_keeps_memory_authoritative() {
    let storage = MemorySlotStorage::new();
    storage.set_fail_writes(true);
    let mut store = TaskStore::open(PersistenceAdapter::new(storage));

    let task = store.add("offline", "still tracked").unwrap();
    store.toggle_completion(task.id()).unwrap();

    assert_eq!(store.len(), 1);
    assert!(store.get(task.id()).unwrap().is_completed());
    assert!(store.last_save_error().is_some());
    assert_eq!(store.persistence().storage().raw("todoAppTasks"), None);
}
