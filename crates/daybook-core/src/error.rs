//! Error types for daybook.

use thiserror::Error;

/// Result type alias using daybook's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for daybook operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Note not found (or owned by another user)
    #[error("Note not found: {0}")]
    NoteNotFound(i64),

    /// Todo not found (or owned by another user)
    #[error("Todo not found: {0}")]
    TodoNotFound(i64),

    /// Tag not found
    #[error("Tag not found: {0}")]
    TagNotFound(i64),

    /// Uniqueness constraint violated (duplicate username or tag name)
    #[error("{0}")]
    Conflict(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Authentication failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error means the addressed resource does not exist
    /// (or is not visible to the caller).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::NoteNotFound(_) | Error::TodoNotFound(_) | Error::TagNotFound(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
