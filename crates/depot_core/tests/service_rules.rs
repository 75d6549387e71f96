use depot_core::{
    now_epoch_ms, MemoryResourceStore, NewResource, ResourcePatch, ResourceService, ResourceStore,
    ServiceError, ValidationPolicy,
};
use uuid::Uuid;

fn service() -> ResourceService<MemoryResourceStore> {
    ResourceService::new(MemoryResourceStore::new())
}

fn draft(name: &str) -> NewResource {
    NewResource {
        name: name.to_string(),
        ..NewResource::default()
    }
}

#[test]
fn duplicate_name_is_a_conflict_case_insensitively() {
    let service = service();
    service.create(draft("Report")).unwrap();

    let err = service.create(draft("report")).unwrap_err();
    assert!(matches!(err, ServiceError::Conflict { .. }));

    // Leading/trailing whitespace folds into the same identity.
    let err = service.create(draft("  REPORT  ")).unwrap_err();
    assert!(matches!(err, ServiceError::Conflict { .. }));

    assert_eq!(service.store().count().unwrap(), 1);
}

#[test]
fn rename_to_own_name_succeeds_and_to_foreign_name_conflicts() {
    let service = service();
    let mine = service.create(draft("Mine")).unwrap();
    service.create(draft("Theirs")).unwrap();

    // Case-only rename of itself is not a duplicate.
    let patch = ResourcePatch {
        name: Some("MINE".to_string()),
        ..ResourcePatch::default()
    };
    let renamed = service.update(mine.id, patch).unwrap();
    assert_eq!(renamed.name, "MINE");

    let patch = ResourcePatch {
        name: Some("theirs".to_string()),
        ..ResourcePatch::default()
    };
    let err = service.update(mine.id, patch).unwrap_err();
    assert!(matches!(err, ServiceError::Conflict { .. }));
}

#[test]
fn name_bounds_are_enforced() {
    let service = service();

    let err = service.create(draft("   ")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation { field: "name", .. }
    ));

    let long_name = "x".repeat(201);
    let err = service.create(draft(&long_name)).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation { field: "name", .. }
    ));

    // The catalog policy draws the line at 100 characters.
    let catalog = ResourceService::with_policy(
        MemoryResourceStore::new(),
        ValidationPolicy::product_catalog(),
    );
    let err = catalog.create(draft(&"x".repeat(101))).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation { field: "name", .. }
    ));
}

#[test]
fn past_due_date_is_rejected_on_create_and_update() {
    let service = service();

    let mut input = draft("Deadline driven");
    input.due_at = Some(now_epoch_ms() - 60_000);
    let err = service.create(input).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation { field: "due_at", .. }
    ));

    let mut input = draft("Deadline driven");
    input.due_at = Some(now_epoch_ms() + 60_000);
    let created = service.create(input).unwrap();

    let patch = ResourcePatch {
        due_at: depot_core::FieldPatch::Set(now_epoch_ms() - 60_000),
        ..ResourcePatch::default()
    };
    let err = service.update(created.id, patch).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation { field: "due_at", .. }
    ));
}

#[test]
fn policy_decides_the_creation_status_flag() {
    let tasks = service();
    let pending = tasks.create(draft("task-like")).unwrap();
    assert!(!pending.completed);

    let catalog = ResourceService::with_policy(
        MemoryResourceStore::new(),
        ValidationPolicy::product_catalog(),
    );
    let mut input = draft("catalog-like");
    input.category = Some("tools".to_string());
    input.price = Some(9.5);
    let active = catalog.create(input).unwrap();
    assert!(active.completed);
}

#[test]
fn catalog_policy_requires_two_character_categories() {
    let catalog = ResourceService::with_policy(
        MemoryResourceStore::new(),
        ValidationPolicy::product_catalog(),
    );

    let mut input = draft("Widget");
    input.category = Some("x".to_string());
    let err = catalog.create(input).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation {
            field: "category",
            ..
        }
    ));
}

#[test]
fn non_positive_price_is_rejected() {
    let service = service();

    for bad in [0.0, -3.25] {
        let mut input = draft("priced wrong");
        input.price = Some(bad);
        let err = service.create(input).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation { field: "price", .. }
        ));
    }
}

#[test]
fn update_of_unknown_id_is_not_found_and_leaves_state_alone() {
    let service = service();
    service.create(draft("bystander")).unwrap();

    let missing = Uuid::new_v4();
    let err = service
        .update(missing, ResourcePatch::status_flag(true))
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(id) if id == missing));
    assert_eq!(service.store().count().unwrap(), 1);
}

#[test]
fn status_toggle_runs_through_the_update_path() {
    let service = service();
    let created = service.create(draft("toggle me")).unwrap();

    let completed = service.set_completed(created.id, true).unwrap();
    assert!(completed.completed);
    assert_eq!(completed.created_at, created.created_at);

    let reopened = service.set_completed(created.id, false).unwrap();
    assert!(!reopened.completed);

    let err = service.set_completed(Uuid::new_v4(), true).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[test]
fn delete_reports_presence_and_is_idempotent() {
    let service = service();
    let created = service.create(draft("disposable")).unwrap();

    assert!(service.delete(created.id).unwrap());
    assert!(!service.delete(created.id).unwrap());
    assert!(service.get(created.id).unwrap().is_none());
}

#[test]
fn created_name_is_stored_trimmed() {
    let service = service();
    let created = service.create(draft("  Padded Name  ")).unwrap();
    assert_eq!(created.name, "Padded Name");
    assert!(service
        .store()
        .find_by_name("padded name")
        .unwrap()
        .is_some());
}
