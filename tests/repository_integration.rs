//! Integration tests for repository layer
//!
//! These tests verify that repository implementations correctly interact
//! with the SQLite store, including CRUD operations, soft-delete
//! lifecycle rules and the availability checks.

use chrono::{Local, NaiveDate};
use notes_api::domain::errors::DomainError;
use notes_api::domain::lifecycle::RecordState;
use notes_api::domain::note::{NoteFields, Title};
use notes_api::domain::repositories::{NoteRepository, UserRepository};
use notes_api::domain::user::{FirstName, Login, Password, UserFields};
use notes_api::infrastructure::database;
use notes_api::infrastructure::repositories::{SqliteNoteRepository, SqliteUserRepository};
use sqlx::SqlitePool;

/// Set up a fresh, migrated in-memory store
async fn setup_test_db() -> SqlitePool {
    database::connect_in_memory()
        .await
        .expect("Failed to open in-memory database")
}

fn user_fields(login: &str, first_name: &str, last_name: Option<&str>) -> UserFields {
    UserFields {
        login: Login::new(login).expect("valid login"),
        password: Password::new("p").expect("valid password"),
        first_name: FirstName::new(first_name).expect("valid first name"),
        last_name: last_name.map(str::to_string),
    }
}

fn note_fields(title: &str, description: Option<&str>) -> NoteFields {
    NoteFields {
        title: Title::new(title).expect("valid title"),
        description: description.map(str::to_string),
    }
}

/// Insert a note row with fixed dates, bypassing the repository
async fn insert_dated_note(
    pool: &SqlitePool,
    user_id: i64,
    title: &str,
    created: NaiveDate,
    modified: Option<NaiveDate>,
    deleted: bool,
) -> i64 {
    sqlx::query(
        "INSERT INTO Notes (UserId, Title, Description, DateCreated, DateModified, IsDeleted)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(title)
    .bind(format!("{} description", title))
    .bind(created)
    .bind(modified)
    .bind(deleted)
    .execute(pool)
    .await
    .expect("Failed to insert note")
    .last_insert_rowid()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

// ===== Users =====

#[tokio::test]
async fn test_user_create_and_get_detail_round_trip() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool);

    let id = user_repo
        .create(user_fields("abc", "A", None))
        .await
        .expect("Failed to create user");

    let user = user_repo
        .get_detail(id)
        .await
        .expect("Failed to load user")
        .expect("User should be found");

    assert_eq!(user.user_id, id);
    assert_eq!(user.first_name, "A");
    assert_eq!(user.last_name, None);
    assert_eq!(user.login, "abc");
    assert_eq!(user.password, "p");
}

#[tokio::test]
async fn test_user_get_detail_unknown_id_is_none() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool);

    let user = user_repo.get_detail(123).await.expect("query should succeed");
    assert!(user.is_none());
}

#[tokio::test]
async fn test_user_list_excludes_deleted_and_formats_display_name() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool);

    let john = user_repo
        .create(user_fields("jdoe", "John", Some("Doe")))
        .await
        .unwrap();
    let ben = user_repo.create(user_fields("ben", "Ben", None)).await.unwrap();
    user_repo.delete(ben).await.unwrap();

    let users = user_repo.list().await.expect("Failed to list users");

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].user_id, john);
    assert_eq!(users[0].display_name, "John Doe aka jdoe");
}

#[tokio::test]
async fn test_user_update_overwrites_all_fields() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool);

    let id = user_repo
        .create(user_fields("old", "Old", Some("Name")))
        .await
        .unwrap();

    let mut fields = user_fields("new", "New", None);
    fields.password = Password::new("changed").unwrap();
    user_repo.update(id, fields).await.expect("Failed to update user");

    let user = user_repo.get_detail(id).await.unwrap().unwrap();
    assert_eq!(user.login, "new");
    assert_eq!(user.first_name, "New");
    assert_eq!(user.last_name, None);
    assert_eq!(user.password, "changed");
}

#[tokio::test]
async fn test_user_update_unknown_id_is_not_found() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool);

    let err = user_repo
        .update(123, user_fields("x", "X", None))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound(_)));
    assert_eq!(err.to_string(), "Unable to find the user");
}

#[tokio::test]
async fn test_user_update_deleted_is_already_deleted() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool);

    let id = user_repo.create(user_fields("gone", "G", None)).await.unwrap();
    user_repo.delete(id).await.unwrap();

    let err = user_repo
        .update(id, user_fields("gone", "G", None))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::AlreadyDeleted(_)));
    assert_eq!(err.to_string(), "User deleted");
}

#[tokio::test]
async fn test_user_delete_is_idempotent() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool);

    let id = user_repo.create(user_fields("twice", "T", None)).await.unwrap();

    user_repo.delete(id).await.expect("first delete");
    user_repo.delete(id).await.expect("second delete");
    user_repo.delete(999).await.expect("delete of unknown id");

    assert_eq!(user_repo.state(id).await.unwrap(), RecordState::Deleted);
    assert!(user_repo.get_detail(id).await.unwrap().is_none());
    assert_eq!(user_repo.state(999).await.unwrap(), RecordState::NonExistent);
}

#[tokio::test]
async fn test_user_availability_checks() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool);

    let login = Login::new("taken").unwrap();
    assert!(user_repo.is_available_for_create(&login).await.unwrap());

    let id = user_repo.create(user_fields("taken", "T", None)).await.unwrap();
    assert!(!user_repo.is_available_for_create(&login).await.unwrap());
    assert!(user_repo.is_available_for_update(id).await.unwrap());

    user_repo.delete(id).await.unwrap();
    assert!(user_repo.is_available_for_create(&login).await.unwrap());
    assert!(!user_repo.is_available_for_update(id).await.unwrap());
    assert!(!user_repo.is_available_for_update(123).await.unwrap());
}

#[tokio::test]
async fn test_deleted_user_login_can_be_reused() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool);

    let first = user_repo.create(user_fields("reuse", "A", None)).await.unwrap();
    user_repo.delete(first).await.unwrap();

    let second = user_repo
        .create(user_fields("reuse", "B", None))
        .await
        .expect("login of a deleted user is free");

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_store_rejects_duplicate_live_login() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool);

    user_repo.create(user_fields("dup", "A", None)).await.unwrap();
    let err = user_repo
        .create(user_fields("dup", "B", None))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::LoginTaken(ref login) if login == "dup"));
}

// ===== Notes =====

#[tokio::test]
async fn test_note_create_stamps_today_without_modified_date() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool.clone());
    let note_repo = SqliteNoteRepository::new(pool);

    let user_id = user_repo.create(user_fields("owner", "O", None)).await.unwrap();
    let note_id = note_repo
        .create(user_id, note_fields("t1", None))
        .await
        .expect("Failed to create note");

    let note = note_repo
        .get_detail(note_id)
        .await
        .unwrap()
        .expect("Note should be found");

    assert_eq!(note.note_id, note_id);
    assert_eq!(note.user_id, user_id);
    assert_eq!(note.title, "t1");
    assert_eq!(note.description, None);
    assert_eq!(note.date_created, today());
    assert_eq!(note.date_modified, None);
}

#[tokio::test]
async fn test_note_update_stamps_modified_date() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool.clone());
    let note_repo = SqliteNoteRepository::new(pool.clone());

    let user_id = user_repo.create(user_fields("owner", "O", None)).await.unwrap();
    let created = date(2024, 4, 1);
    let note_id =
        insert_dated_note(&pool, user_id, "note1", created, Some(date(2024, 4, 5)), false).await;

    note_repo
        .update(note_id, note_fields("t2", Some("new description")))
        .await
        .expect("Failed to update note");

    let note = note_repo.get_detail(note_id).await.unwrap().unwrap();
    assert_eq!(note.title, "t2");
    assert_eq!(note.description.as_deref(), Some("new description"));
    assert_eq!(note.date_created, created);
    assert_eq!(note.date_modified, Some(today()));
}

#[tokio::test]
async fn test_note_update_unknown_id_is_not_found() {
    let pool = setup_test_db().await;
    let note_repo = SqliteNoteRepository::new(pool);

    let err = note_repo
        .update(123, note_fields("note1", None))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound(_)));
    assert_eq!(err.to_string(), "Unable to find the note");
}

#[tokio::test]
async fn test_note_update_deleted_is_already_deleted() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool.clone());
    let note_repo = SqliteNoteRepository::new(pool.clone());

    let user_id = user_repo.create(user_fields("owner", "O", None)).await.unwrap();
    let note_id = insert_dated_note(&pool, user_id, "note3", date(2024, 4, 1), None, true).await;

    let err = note_repo
        .update(note_id, note_fields("note3", None))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::AlreadyDeleted(_)));
    assert_eq!(err.to_string(), "Note deleted");
}

#[tokio::test]
async fn test_note_list_uses_effective_modified_date_and_skips_deleted() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool.clone());
    let note_repo = SqliteNoteRepository::new(pool.clone());

    let user_id = user_repo.create(user_fields("owner", "O", None)).await.unwrap();
    let modified = insert_dated_note(
        &pool,
        user_id,
        "note1",
        date(2024, 4, 1),
        Some(date(2024, 4, 5)),
        false,
    )
    .await;
    let untouched = insert_dated_note(&pool, user_id, "note2", date(2024, 4, 2), None, false).await;
    insert_dated_note(&pool, user_id, "note3", date(2024, 4, 3), None, true).await;

    let notes = note_repo.list().await.expect("Failed to list notes");

    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].note_id, modified);
    assert_eq!(notes[0].date_modified, date(2024, 4, 5));
    assert_eq!(notes[1].note_id, untouched);
    assert_eq!(notes[1].date_modified, date(2024, 4, 2));
}

#[tokio::test]
async fn test_note_delete_hides_note_and_is_idempotent() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool.clone());
    let note_repo = SqliteNoteRepository::new(pool);

    let user_id = user_repo.create(user_fields("owner", "O", None)).await.unwrap();
    let note_id = note_repo.create(user_id, note_fields("t", None)).await.unwrap();

    note_repo.delete(note_id).await.expect("first delete");
    note_repo.delete(note_id).await.expect("second delete");
    note_repo.delete(999).await.expect("delete of unknown id");

    assert!(note_repo.get_detail(note_id).await.unwrap().is_none());
    assert!(note_repo
        .list()
        .await
        .unwrap()
        .iter()
        .all(|n| n.note_id != note_id));
    assert_eq!(note_repo.state(note_id).await.unwrap(), RecordState::Deleted);
}

#[tokio::test]
async fn test_note_availability_checks() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool.clone());
    let note_repo = SqliteNoteRepository::new(pool);

    let user_id = user_repo.create(user_fields("owner", "O", None)).await.unwrap();
    assert!(note_repo.is_available_for_create(user_id).await.unwrap());
    assert!(!note_repo.is_available_for_create(123).await.unwrap());

    let note_id = note_repo.create(user_id, note_fields("t", None)).await.unwrap();
    assert!(note_repo.is_available_for_update(note_id).await.unwrap());
    assert!(!note_repo.is_available_for_update(123).await.unwrap());

    note_repo.delete(note_id).await.unwrap();
    assert!(!note_repo.is_available_for_update(note_id).await.unwrap());

    user_repo.delete(user_id).await.unwrap();
    assert!(!note_repo.is_available_for_create(user_id).await.unwrap());
}

#[tokio::test]
async fn test_deleting_user_keeps_their_notes() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool.clone());
    let note_repo = SqliteNoteRepository::new(pool);

    let user_id = user_repo.create(user_fields("owner", "O", None)).await.unwrap();
    let note_id = note_repo.create(user_id, note_fields("kept", None)).await.unwrap();

    user_repo.delete(user_id).await.unwrap();

    let note = note_repo.get_detail(note_id).await.unwrap();
    assert!(note.is_some(), "Note should survive its owner's deletion");
    assert_eq!(note_repo.list_by_user(user_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_note_list_by_user() {
    let pool = setup_test_db().await;
    let user_repo = SqliteUserRepository::new(pool.clone());
    let note_repo = SqliteNoteRepository::new(pool);

    let john = user_repo.create(user_fields("john", "John", None)).await.unwrap();
    let ben = user_repo.create(user_fields("ben", "Ben", None)).await.unwrap();

    note_repo.create(john, note_fields("j1", None)).await.unwrap();
    note_repo.create(john, note_fields("j2", None)).await.unwrap();
    let gone = note_repo.create(john, note_fields("j3", None)).await.unwrap();
    note_repo.delete(gone).await.unwrap();
    note_repo.create(ben, note_fields("b1", None)).await.unwrap();

    let titles: Vec<String> = note_repo
        .list_by_user(john)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, vec!["j1".to_string(), "j2".to_string()]);

    assert!(note_repo.list_by_user(123).await.unwrap().is_empty());
}

/// Open a migrated store backed by a file, shared by several connections
async fn setup_file_db(dir: &tempfile::TempDir) -> SqlitePool {
    let url = format!("sqlite://{}", dir.path().join("notes.db").display());
    let pool = database::connect(&url, 5)
        .await
        .expect("Failed to open file database");
    database::migrate(&pool).await.expect("Failed to migrate");
    pool
}

const CONCURRENT_UPDATES: usize = 100;

#[tokio::test]
async fn test_concurrent_note_updates_all_succeed() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let pool = setup_file_db(&dir).await;

    let user_id = SqliteUserRepository::new(pool.clone())
        .create(user_fields("writer", "W", None))
        .await
        .unwrap();
    let note_id = SqliteNoteRepository::new(pool.clone())
        .create(user_id, note_fields("v0", None))
        .await
        .unwrap();

    let handles: Vec<_> = (0..CONCURRENT_UPDATES)
        .map(|i| {
            let repo = SqliteNoteRepository::new(pool.clone());
            tokio::spawn(async move {
                repo.update(note_id, note_fields(&format!("v{}", i + 1), None))
                    .await
            })
        })
        .collect();

    for handle in handles {
        let result = handle.await.expect("update task panicked");
        assert!(result.is_ok(), "Concurrent update failed: {:?}", result);
    }

    let note = SqliteNoteRepository::new(pool)
        .get_detail(note_id)
        .await
        .unwrap()
        .unwrap();
    assert!(note.title.starts_with('v') && note.title != "v0");
}

#[tokio::test]
async fn test_concurrent_user_updates_all_succeed() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let pool = setup_file_db(&dir).await;

    let user_id = SqliteUserRepository::new(pool.clone())
        .create(user_fields("racer", "R", None))
        .await
        .unwrap();

    let handles: Vec<_> = (0..CONCURRENT_UPDATES)
        .map(|i| {
            let repo = SqliteUserRepository::new(pool.clone());
            tokio::spawn(async move {
                repo.update(user_id, user_fields("racer", &format!("R{}", i), None))
                    .await
            })
        })
        .collect();

    for handle in handles {
        let result = handle.await.expect("update task panicked");
        assert!(result.is_ok(), "Concurrent update failed: {:?}", result);
    }
}

#[tokio::test]
async fn test_update_on_file_store_still_reports_missing_and_deleted() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let pool = setup_file_db(&dir).await;
    let user_repo = SqliteUserRepository::new(pool.clone());
    let note_repo = SqliteNoteRepository::new(pool);

    let user_id = user_repo.create(user_fields("owner", "O", None)).await.unwrap();
    let note_id = note_repo.create(user_id, note_fields("t", None)).await.unwrap();
    note_repo.delete(note_id).await.unwrap();

    let deleted = note_repo.update(note_id, note_fields("x", None)).await.unwrap_err();
    assert!(matches!(deleted, DomainError::AlreadyDeleted(_)));

    let missing = note_repo.update(9999, note_fields("x", None)).await.unwrap_err();
    assert!(matches!(missing, DomainError::NotFound(_)));
}
