//! Replace-all-tags-on-save.
//!
//! After every create or update the stored tag set must equal the supplied
//! set, and a save that names an unknown tag must leave nothing behind.

use daybook_db::test_fixtures::{date, TestDatabase};
use daybook_db::{
    CreateTodoRequest, Error, NoteInput, NoteRepository, TodoRepository, UpdateTodoRequest,
};

fn note_input(title: &str, tag_ids: Vec<i64>) -> NoteInput {
    NoteInput {
        title: title.to_string(),
        content: "<p>body</p>".to_string(),
        date: date(2024, 4, 1),
        tag_ids,
    }
}

#[tokio::test]
async fn test_create_note_returns_exactly_supplied_tags() {
    let test_db = TestDatabase::new().await;
    let alice = test_db.user("alice").await;
    let a = test_db.tag("alpha").await;
    let b = test_db.tag("beta").await;
    test_db.tag("gamma").await;

    let created = test_db
        .db
        .notes
        .insert(alice.id, note_input("Tagged", vec![a.id, b.id]))
        .await
        .unwrap();
    assert_eq!(created.tag_ids(), vec![a.id, b.id]);

    let fetched = test_db.db.notes.fetch(alice.id, created.id).await.unwrap();
    let names: Vec<&str> = fetched.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
}

#[tokio::test]
async fn test_update_note_replaces_tag_set() {
    let test_db = TestDatabase::new().await;
    let alice = test_db.user("alice").await;
    let a = test_db.tag("alpha").await;
    let b = test_db.tag("beta").await;
    let c = test_db.tag("gamma").await;

    let note = test_db.note(alice.id, "Swap", date(2024, 4, 1), &[a.id, b.id]).await;

    let updated = test_db
        .db
        .notes
        .update(alice.id, note.id, note_input("Swap", vec![c.id, b.id]))
        .await
        .unwrap();
    assert_eq!(updated.tag_ids(), vec![b.id, c.id]);

    let cleared = test_db
        .db
        .notes
        .update(alice.id, note.id, note_input("Swap", vec![]))
        .await
        .unwrap();
    assert!(cleared.tags.is_empty());
    assert_eq!(test_db.count("note_tags").await, 0);
}

#[tokio::test]
async fn test_duplicate_tag_ids_are_collapsed() {
    let test_db = TestDatabase::new().await;
    let alice = test_db.user("alice").await;
    let a = test_db.tag("alpha").await;

    let note = test_db
        .db
        .notes
        .insert(alice.id, note_input("Dup", vec![a.id, a.id, a.id]))
        .await
        .unwrap();

    assert_eq!(note.tag_ids(), vec![a.id]);
    assert_eq!(test_db.count("note_tags").await, 1);
}

#[tokio::test]
async fn test_unknown_tag_on_create_inserts_nothing() {
    let test_db = TestDatabase::new().await;
    let alice = test_db.user("alice").await;
    let a = test_db.tag("alpha").await;

    let err = test_db
        .db
        .notes
        .insert(alice.id, note_input("Broken", vec![a.id, 4242]))
        .await
        .unwrap_err();

    match err {
        Error::InvalidInput(msg) => assert!(msg.contains("4242"), "message was {msg}"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
    assert_eq!(test_db.count("notes").await, 0);
    assert_eq!(test_db.count("note_tags").await, 0);
}

#[tokio::test]
async fn test_unknown_tag_on_update_changes_nothing() {
    let test_db = TestDatabase::new().await;
    let alice = test_db.user("alice").await;
    let a = test_db.tag("alpha").await;

    let note = test_db.note(alice.id, "Keep", date(2024, 4, 1), &[a.id]).await;

    let err = test_db
        .db
        .notes
        .update(alice.id, note.id, note_input("Renamed", vec![777]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let after = test_db.db.notes.fetch(alice.id, note.id).await.unwrap();
    assert_eq!(after.title, "Keep");
    assert_eq!(after.tag_ids(), vec![a.id]);
    assert_eq!(after.updated_at, note.updated_at);
}

#[tokio::test]
async fn test_todo_tags_replaced_on_update() {
    let test_db = TestDatabase::new().await;
    let alice = test_db.user("alice").await;
    let a = test_db.tag("alpha").await;
    let b = test_db.tag("beta").await;
    let note = test_db.note(alice.id, "Host", date(2024, 4, 1), &[]).await;

    let todo = test_db
        .db
        .todos
        .insert(
            alice.id,
            CreateTodoRequest {
                note_id: note.id,
                text: "ship".to_string(),
                due_date: None,
                tag_ids: vec![a.id],
            },
        )
        .await
        .unwrap();
    assert_eq!(todo.tag_ids(), vec![a.id]);

    let updated = test_db
        .db
        .todos
        .update(
            alice.id,
            todo.id,
            UpdateTodoRequest {
                text: "ship it".to_string(),
                completed: true,
                in_calendar: true,
                due_date: Some(date(2024, 5, 1)),
                tag_ids: vec![b.id],
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.text, "ship it");
    assert!(updated.completed);
    assert!(updated.in_calendar);
    assert_eq!(updated.due_date, Some(date(2024, 5, 1)));
    assert_eq!(updated.tag_ids(), vec![b.id]);
    assert_eq!(test_db.count("todo_tags").await, 1);
}

#[tokio::test]
async fn test_unknown_tag_on_todo_create_inserts_nothing() {
    let test_db = TestDatabase::new().await;
    let alice = test_db.user("alice").await;
    let note = test_db.note(alice.id, "Host", date(2024, 4, 1), &[]).await;

    let err = test_db
        .db
        .todos
        .insert(
            alice.id,
            CreateTodoRequest {
                note_id: note.id,
                text: "ghost".to_string(),
                due_date: None,
                tag_ids: vec![31337],
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert_eq!(test_db.count("todos").await, 0);
}
