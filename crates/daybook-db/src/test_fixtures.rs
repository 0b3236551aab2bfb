//! Test fixtures for database integration tests.
//!
//! Every [`TestDatabase`] is a private in-memory SQLite database with the
//! schema applied, so tests never share state and need no external service.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use daybook_db::test_fixtures::{date, TestDatabase};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let test_db = TestDatabase::new().await;
//!     let user = test_db.user("alice").await;
//!     let work = test_db.tag("work").await;
//!     let note = test_db.note(user.id, "Standup", date(2024, 3, 9), &[work.id]).await;
//!
//!     // Run your tests...
//! }
//! ```

use chrono::NaiveDate;

use crate::{
    CreateTodoRequest, Database, Note, NoteInput, NoteRepository, Tag, TagRepository, Todo,
    TodoRepository, User, UserRepository,
};

/// Placeholder stored as the password hash of fixture users.
pub const FIXTURE_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$fixture$fixture";

/// Build a calendar date, panicking on an impossible one.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// In-memory test database with seed helpers.
pub struct TestDatabase {
    pub db: Database,
}

impl TestDatabase {
    /// Create a fresh, migrated in-memory database.
    pub async fn new() -> Self {
        let db = Database::connect_in_memory()
            .await
            .expect("Failed to create in-memory test database");
        Self { db }
    }

    /// Insert a user with a placeholder password hash.
    pub async fn user(&self, username: &str) -> User {
        self.db
            .users
            .create(username, FIXTURE_PASSWORD_HASH)
            .await
            .expect("Failed to create fixture user")
    }

    /// Insert a tag.
    pub async fn tag(&self, name: &str) -> Tag {
        self.db
            .tags
            .create(name)
            .await
            .expect("Failed to create fixture tag")
    }

    /// Insert a note with generated content.
    pub async fn note(&self, user_id: i64, title: &str, day: NaiveDate, tag_ids: &[i64]) -> Note {
        self.db
            .notes
            .insert(
                user_id,
                NoteInput {
                    title: title.to_string(),
                    content: format!("<p>{}</p>", title),
                    date: day,
                    tag_ids: tag_ids.to_vec(),
                },
            )
            .await
            .expect("Failed to create fixture note")
    }

    /// Insert a todo under a note.
    pub async fn todo(
        &self,
        user_id: i64,
        note_id: i64,
        text: &str,
        due_date: Option<NaiveDate>,
        tag_ids: &[i64],
    ) -> Todo {
        self.db
            .todos
            .insert(
                user_id,
                CreateTodoRequest {
                    note_id,
                    text: text.to_string(),
                    due_date,
                    tag_ids: tag_ids.to_vec(),
                },
            )
            .await
            .expect("Failed to create fixture todo")
    }

    /// Number of rows in `table`.
    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.db.pool)
            .await
            .expect("Failed to count rows")
    }
}
