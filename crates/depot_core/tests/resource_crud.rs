use depot_core::{
    FieldPatch, MemoryResourceStore, NewResource, Priority, ResourcePatch, ResourceStore,
};
use std::thread::sleep;
use std::time::Duration;
use uuid::Uuid;

fn draft(name: &str) -> NewResource {
    NewResource {
        name: name.to_string(),
        ..NewResource::default()
    }
}

#[test]
fn create_and_get_roundtrip() {
    let store = MemoryResourceStore::new();

    let created = store
        .create(
            NewResource {
                name: "first resource".to_string(),
                description: Some("kick-off".to_string()),
                priority: Some(Priority::High),
                category: Some("general".to_string()),
                ..NewResource::default()
            },
            false,
        )
        .unwrap();

    assert_eq!(created.created_at, created.updated_at);
    assert!(!created.completed);

    let loaded = store.get(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.name, "first resource");
    assert_eq!(loaded.priority, Priority::High);
}

#[test]
fn get_unknown_id_is_absent_not_an_error() {
    let store = MemoryResourceStore::new();
    assert!(store.get(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn update_merges_only_supplied_fields() {
    let store = MemoryResourceStore::new();
    let created = store
        .create(
            NewResource {
                name: "draft".to_string(),
                description: Some("original text".to_string()),
                category: Some("inbox".to_string()),
                ..NewResource::default()
            },
            false,
        )
        .unwrap();

    sleep(Duration::from_millis(5));
    let patch = ResourcePatch {
        description: FieldPatch::Set("revised text".to_string()),
        priority: Some(Priority::Low),
        ..ResourcePatch::default()
    };
    let updated = store.update(created.id, patch).unwrap().unwrap();

    // Untouched fields survive the merge.
    assert_eq!(updated.name, "draft");
    assert_eq!(updated.category.as_deref(), Some("inbox"));
    assert_eq!(updated.description.as_deref(), Some("revised text"));
    assert_eq!(updated.priority, Priority::Low);

    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[test]
fn patch_can_clear_optional_fields() {
    let store = MemoryResourceStore::new();
    let created = store
        .create(
            NewResource {
                name: "has extras".to_string(),
                description: Some("to be removed".to_string()),
                due_at: Some(i64::MAX - 1),
                ..NewResource::default()
            },
            false,
        )
        .unwrap();

    let patch = ResourcePatch {
        description: FieldPatch::Clear,
        due_at: FieldPatch::Clear,
        ..ResourcePatch::default()
    };
    let updated = store.update(created.id, patch).unwrap().unwrap();
    assert!(updated.description.is_none());
    assert!(updated.due_at.is_none());
}

#[test]
fn update_unknown_id_returns_none_and_changes_nothing() {
    let store = MemoryResourceStore::new();
    store.create(draft("stable"), false).unwrap();

    let outcome = store
        .update(Uuid::new_v4(), ResourcePatch::status_flag(true))
        .unwrap();
    assert!(outcome.is_none());
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn delete_is_idempotent() {
    let store = MemoryResourceStore::new();
    let created = store.create(draft("short lived"), false).unwrap();

    assert!(store.delete(created.id).unwrap());
    assert!(!store.delete(created.id).unwrap());
    assert!(!store.delete(created.id).unwrap());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn timestamps_survive_repeated_updates() {
    let store = MemoryResourceStore::new();
    let created = store.create(draft("long lived"), false).unwrap();

    let mut last_seen = created.updated_at;
    for round in 0..3 {
        sleep(Duration::from_millis(2));
        let patch = ResourcePatch {
            completed: Some(round % 2 == 0),
            ..ResourcePatch::default()
        };
        let updated = store.update(created.id, patch).unwrap().unwrap();
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= last_seen);
        last_seen = updated.updated_at;
    }
}

#[test]
fn count_and_get_all_track_the_collection() {
    let store = MemoryResourceStore::new();
    assert_eq!(store.count().unwrap(), 0);
    assert!(store.get_all().unwrap().is_empty());

    let a = store.create(draft("a"), false).unwrap();
    let b = store.create(draft("b"), true).unwrap();
    assert_eq!(store.count().unwrap(), 2);

    let mut ids: Vec<_> = store
        .get_all()
        .unwrap()
        .into_iter()
        .map(|item| item.id)
        .collect();
    ids.sort();
    let mut expected = vec![a.id, b.id];
    expected.sort();
    assert_eq!(ids, expected);
}
