//! # daybook-db
//!
//! SQLite database layer for daybook.
//!
//! This crate provides:
//! - Connection pool management
//! - Embedded schema migrations
//! - Repository implementations for users, tags, notes and todos
//! - Batched tag aggregation and transactional tag replacement
//!
//! ## Example
//!
//! ```rust,ignore
//! use daybook_db::{Database, NoteInput, NoteRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite://daybook.db").await?;
//!     db.migrate().await?;
//!
//!     let note = db.notes.insert(user_id, NoteInput {
//!         title: "Standup".to_string(),
//!         content: "<p>ship it</p>".to_string(),
//!         date: chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
//!         tag_ids: vec![work_tag_id],
//!     }).await?;
//!
//!     println!("Created note: {}", note.id);
//!     db.close().await;
//!     Ok(())
//! }
//! ```
pub mod aggregation;
pub mod notes;
pub mod pool;
pub mod tagging;
pub mod tags;
pub mod todos;
pub mod users;

// Test fixtures for integration tests
// Note: Compiled with the default feature so integration tests (in tests/) can use it
#[cfg(feature = "migrations")]
pub mod test_fixtures;

// Re-export core types
pub use daybook_core::*;

pub use aggregation::{attach_note_tags, attach_todo_tags, load_tags};
pub use notes::SqliteNoteRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use tagging::TagTarget;
pub use tags::SqliteTagRepository;
pub use todos::SqliteTodoRepository;
pub use users::SqliteUserRepository;

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::info;

/// Map a unique-constraint violation to `Error::Conflict(message)`.
pub(crate) fn map_unique_violation(e: sqlx::Error, message: &str) -> Error {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Error::Conflict(message.to_string())
        }
        _ => Error::Database(e),
    }
}

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: SqlitePool,
    /// User account repository.
    pub users: Arc<SqliteUserRepository>,
    /// Global tag repository.
    pub tags: Arc<SqliteTagRepository>,
    /// Note repository for CRUD operations.
    pub notes: Arc<SqliteNoteRepository>,
    /// Todo repository for CRUD operations.
    pub todos: Arc<SqliteTodoRepository>,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: Arc::new(SqliteUserRepository::new(pool.clone())),
            tags: Arc::new(SqliteTagRepository::new(pool.clone())),
            notes: Arc::new(SqliteNoteRepository::new(pool.clone())),
            todos: Arc::new(SqliteTodoRepository::new(pool.clone())),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Open a private in-memory database and apply the schema.
    #[cfg(feature = "migrations")]
    pub async fn connect_in_memory() -> Result<Self> {
        let db = Self::connect_with_config(pool::IN_MEMORY_URL, PoolConfig::in_memory()).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        info!(
            subsystem = logging::SUBSYSTEM_DATABASE,
            component = logging::COMPONENT_MIGRATIONS,
            op = "run",
            "Database schema up to date"
        );
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection. Pending queries finish first.
    pub async fn close(&self) {
        self.pool.close().await;
        info!(
            subsystem = logging::SUBSYSTEM_DATABASE,
            component = logging::COMPONENT_POOL,
            op = "close",
            "Database connection pool closed"
        );
    }
}
