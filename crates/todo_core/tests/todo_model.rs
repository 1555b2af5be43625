use chrono::{Days, Local, NaiveDate};
use todo_core::{Todo, TodoValidationError};
use uuid::Uuid;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[test]
fn todo_new_sets_defaults() {
    let todo = Todo::new("Test Todo", "This is a test todo item.", None);

    assert!(!todo.id.is_nil());
    assert_eq!(todo.title, "Test Todo");
    assert_eq!(todo.description, "This is a test todo item.");
    assert_eq!(todo.due_date, None);
    assert!(!todo.is_resolved);
}

#[test]
fn display_string_is_title() {
    let todo = Todo::new("Test Todo", "This is a test todo item.", None);
    assert_eq!(todo.to_string(), "Test Todo");
}

#[test]
fn todo_without_due_date_is_never_overdue() {
    let todo = Todo::new("Test Todo", "", None);
    assert!(!todo.is_overdue());
}

#[test]
fn past_due_date_is_overdue() {
    let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
    let todo = Todo::new("late", "", Some(yesterday));
    assert!(todo.is_overdue());
}

#[test]
fn future_due_date_is_not_overdue() {
    let tomorrow = today().checked_add_days(Days::new(1)).unwrap();
    let todo = Todo::new("upcoming", "", Some(tomorrow));
    assert!(!todo.is_overdue());
}

#[test]
fn toggle_twice_returns_to_unresolved() {
    let mut todo = Todo::new("flip", "", None);

    todo.toggle_resolved();
    assert!(todo.is_resolved);

    todo.toggle_resolved();
    assert!(!todo.is_resolved);
}

#[test]
fn apply_overwrites_fields_but_keeps_resolution() {
    let mut todo = Todo::new("draft", "old", None);
    todo.toggle_resolved();
    let id = todo.id;
    let due = NaiveDate::from_ymd_opt(2026, 12, 24).unwrap();

    todo.apply("final", "new", Some(due));

    assert_eq!(todo.id, id);
    assert_eq!(todo.title, "final");
    assert_eq!(todo.description, "new");
    assert_eq!(todo.due_date, Some(due));
    assert!(todo.is_resolved);
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Todo::with_id(Uuid::nil(), "invalid", "", None).unwrap_err();
    assert_eq!(err, TodoValidationError::NilId);
}

#[test]
fn todo_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut todo = Todo::with_id(
        id,
        "ship release",
        "tag and publish",
        NaiveDate::from_ymd_opt(2026, 2, 13),
    )
    .unwrap();
    todo.toggle_resolved();

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["title"], "ship release");
    assert_eq!(json["description"], "tag and publish");
    assert_eq!(json["due_date"], "2026-02-13");
    assert_eq!(json["is_resolved"], true);

    let decoded: Todo = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, todo);
}

#[test]
fn deserialize_fills_optional_fields_and_rejects_nil_id() {
    let minimal = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "minimal"
    });
    let todo: Todo = serde_json::from_value(minimal).unwrap();
    assert_eq!(todo.description, "");
    assert_eq!(todo.due_date, None);
    assert!(!todo.is_resolved);

    let nil = serde_json::json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "title": "nil"
    });
    let err = serde_json::from_value::<Todo>(nil).unwrap_err();
    assert!(err.to_string().contains("must not be nil"), "unexpected error: {err}");
}
