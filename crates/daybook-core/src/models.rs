//! Core data models for daybook.
//!
//! These types are shared across all daybook crates and represent the
//! domain entities as returned to API clients.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// USER TYPES
// =============================================================================

/// An account that owns notes and todos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string. Never serialized to clients.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// TAG TYPES
// =============================================================================

/// A tag definition. Tags are global and shared by every user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Tag identity embedded in a note or todo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TagRef {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A dated note with its tags attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    /// Rich-text body as produced by the client editor.
    pub content: String,
    /// The day this note belongs to (not a timestamp).
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
}

impl Note {
    /// Ids of the attached tags, in name order.
    pub fn tag_ids(&self) -> Vec<i64> {
        self.tags.iter().map(|t| t.id).collect()
    }
}

// =============================================================================
// TODO TYPES
// =============================================================================

/// A todo item extracted from a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub note_id: i64,
    pub user_id: i64,
    pub text: String,
    pub completed: bool,
    /// Whether the todo has been mirrored to an external calendar.
    pub in_calendar: bool,
    pub due_date: Option<NaiveDate>,
    /// Title of the parent note, joined in for list views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
}

impl Todo {
    /// Ids of the attached tags, in name order.
    pub fn tag_ids(&self) -> Vec<i64> {
        self.tags.iter().map(|t| t.id).collect()
    }
}

// =============================================================================
// TAG DETAIL
// =============================================================================

/// Everything one user has labelled with a given tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaggedItems {
    pub notes: Vec<Note>,
    pub todos: Vec<Todo>,
}
