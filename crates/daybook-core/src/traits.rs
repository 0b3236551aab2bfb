//! Core traits for daybook abstractions.
//!
//! These traits define the interfaces that the storage layer must satisfy.
//! Every note and todo operation is scoped to an owning user id; tags are
//! global and unscoped.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// USER REPOSITORY
// =============================================================================

/// Repository for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with `Error::Conflict` on a duplicate username.
    async fn create(&self, username: &str, password_hash: &str) -> Result<User>;

    /// Look a user up by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Fetch a user by id.
    async fn fetch(&self, id: i64) -> Result<User>;

    /// Check if a user exists.
    async fn exists(&self, id: i64) -> Result<bool>;

    /// Delete a user together with all of their notes and todos.
    async fn delete(&self, id: i64) -> Result<()>;

    /// Number of registered users.
    async fn count(&self) -> Result<i64>;
}

// =============================================================================
// TAG REPOSITORY
// =============================================================================

/// Repository for the global tag list.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Create a tag. Fails with `Error::Conflict` if the name is taken.
    async fn create(&self, name: &str) -> Result<Tag>;

    /// List all tags ordered by name.
    async fn list(&self) -> Result<Vec<Tag>>;

    /// Fetch a tag by id.
    async fn fetch(&self, id: i64) -> Result<Tag>;

    /// Delete a tag and every note/todo association referencing it.
    async fn delete(&self, id: i64) -> Result<()>;

    /// Notes and todos of `user_id` carrying the tag.
    async fn items(&self, user_id: i64, tag_id: i64) -> Result<TaggedItems>;
}

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Request for listing notes.
#[derive(Debug, Clone, Default)]
pub struct ListNotesRequest {
    /// Only notes belonging to this day.
    pub date: Option<NaiveDate>,
}

/// Full note contents used for both create and replace-on-save.
#[derive(Debug, Clone)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    /// Complete tag set; replaces whatever was attached before.
    pub tag_ids: Vec<i64>,
}

/// Repository for note CRUD operations.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note with its tags.
    async fn insert(&self, user_id: i64, req: NoteInput) -> Result<Note>;

    /// Fetch one of the user's notes.
    async fn fetch(&self, user_id: i64, id: i64) -> Result<Note>;

    /// List the user's notes, newest day first.
    async fn list(&self, user_id: i64, req: ListNotesRequest) -> Result<Vec<Note>>;

    /// Replace a note's fields and tag set.
    async fn update(&self, user_id: i64, id: i64, req: NoteInput) -> Result<Note>;

    /// Delete a note together with its todos.
    async fn delete(&self, user_id: i64, id: i64) -> Result<()>;
}

// =============================================================================
// TODO REPOSITORY
// =============================================================================

/// Request for listing todos.
#[derive(Debug, Clone)]
pub struct ListTodosRequest {
    /// Include todos already marked completed.
    pub include_completed: bool,
    /// Only todos that have not been mirrored to the calendar.
    pub not_in_calendar: bool,
}

impl Default for ListTodosRequest {
    fn default() -> Self {
        Self {
            include_completed: true,
            not_in_calendar: false,
        }
    }
}

/// Request for creating a todo under a note.
#[derive(Debug, Clone)]
pub struct CreateTodoRequest {
    pub note_id: i64,
    pub text: String,
    pub due_date: Option<NaiveDate>,
    pub tag_ids: Vec<i64>,
}

/// Full todo contents for replace-on-save.
#[derive(Debug, Clone)]
pub struct UpdateTodoRequest {
    pub text: String,
    pub completed: bool,
    pub in_calendar: bool,
    pub due_date: Option<NaiveDate>,
    pub tag_ids: Vec<i64>,
}

/// Repository for todo CRUD operations.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Insert a todo under one of the user's notes.
    async fn insert(&self, user_id: i64, req: CreateTodoRequest) -> Result<Todo>;

    /// Fetch one of the user's todos.
    async fn fetch(&self, user_id: i64, id: i64) -> Result<Todo>;

    /// List the user's todos, undated first, then by due date.
    async fn list(&self, user_id: i64, req: ListTodosRequest) -> Result<Vec<Todo>>;

    /// Todos under one of the user's notes, in creation order.
    async fn list_for_note(&self, user_id: i64, note_id: i64) -> Result<Vec<Todo>>;

    /// Replace a todo's fields and tag set.
    async fn update(&self, user_id: i64, id: i64, req: UpdateTodoRequest) -> Result<Todo>;

    /// Delete a todo.
    async fn delete(&self, user_id: i64, id: i64) -> Result<()>;
}
