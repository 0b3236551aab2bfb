//! Note repository implementation.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite, SqlitePool};
use tracing::{debug, info};

use daybook_core::{
    logging, Error, ListNotesRequest, Note, NoteInput, NoteRepository, Result,
};

use crate::aggregation::attach_note_tags;
use crate::tagging::{replace_tags, TagTarget};

const NOTE_COLUMNS: &str = "n.id, n.user_id, n.title, n.content, n.date, n.created_at, n.updated_at";

const NOTE_ORDER: &str = "ORDER BY n.date DESC, n.updated_at DESC, n.id DESC";

/// SQLite implementation of NoteRepository.
pub struct SqliteNoteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteNoteRepository {
    /// Create a new SqliteNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

fn note_from_row(row: &SqliteRow) -> Note {
    Note {
        id: row.get("id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        content: row.get("content"),
        date: row.get("date"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        tags: Vec::new(),
    }
}

/// The user's notes carrying `tag_id`, tags attached.
pub(crate) async fn tagged_notes(pool: &SqlitePool, user_id: i64, tag_id: i64) -> Result<Vec<Note>> {
    let rows = sqlx::query(&format!(
        "SELECT {NOTE_COLUMNS} FROM notes n \
         JOIN note_tags nt ON nt.note_id = n.id \
         WHERE n.user_id = ? AND nt.tag_id = ? {NOTE_ORDER}"
    ))
    .bind(user_id)
    .bind(tag_id)
    .fetch_all(pool)
    .await
    .map_err(Error::Database)?;

    let mut notes: Vec<Note> = rows.iter().map(note_from_row).collect();
    attach_note_tags(pool, &mut notes).await?;
    Ok(notes)
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    async fn insert(&self, user_id: i64, req: NoteInput) -> Result<Note> {
        req.validate()?;
        let now = Utc::now();

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let result = sqlx::query(
            "INSERT INTO notes (user_id, title, content, date, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&req.title)
        .bind(&req.content)
        .bind(req.date)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;
        let id = result.last_insert_rowid();

        replace_tags(&mut *tx, TagTarget::Note, id, &req.tag_ids).await?;

        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = logging::SUBSYSTEM_DATABASE,
            component = logging::COMPONENT_NOTES,
            op = "insert",
            user_id,
            note_id = id,
            tag_count = req.tag_ids.len(),
            "Note created"
        );
        self.fetch(user_id, id).await
    }

    async fn fetch(&self, user_id: i64, id: i64) -> Result<Note> {
        let row = sqlx::query(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes n WHERE n.id = ? AND n.user_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::NoteNotFound(id))?;

        let mut notes = vec![note_from_row(&row)];
        attach_note_tags(&self.pool, &mut notes).await?;
        notes.pop().ok_or(Error::NoteNotFound(id))
    }

    async fn list(&self, user_id: i64, req: ListNotesRequest) -> Result<Vec<Note>> {
        let start = Instant::now();

        let rows = match req.date {
            Some(date) => {
                sqlx::query(&format!(
                    "SELECT {NOTE_COLUMNS} FROM notes n \
                     WHERE n.user_id = ? AND n.date = ? {NOTE_ORDER}"
                ))
                .bind(user_id)
                .bind(date)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {NOTE_COLUMNS} FROM notes n WHERE n.user_id = ? {NOTE_ORDER}"
                ))
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(Error::Database)?;

        let mut notes: Vec<Note> = rows.iter().map(note_from_row).collect();
        attach_note_tags(&self.pool, &mut notes).await?;

        debug!(
            subsystem = logging::SUBSYSTEM_DATABASE,
            component = logging::COMPONENT_NOTES,
            op = "list",
            user_id,
            result_count = notes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed notes"
        );
        Ok(notes)
    }

    async fn update(&self, user_id: i64, id: i64, req: NoteInput) -> Result<Note> {
        req.validate()?;
        let now = Utc::now();

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let result = sqlx::query(
            "UPDATE notes SET title = ?, content = ?, date = ?, updated_at = ? \
             WHERE id = ? AND user_id = ?",
        )
        .bind(&req.title)
        .bind(&req.content)
        .bind(req.date)
        .bind(now)
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }

        replace_tags(&mut *tx, TagTarget::Note, id, &req.tag_ids).await?;

        tx.commit().await.map_err(Error::Database)?;

        debug!(
            subsystem = logging::SUBSYSTEM_DATABASE,
            component = logging::COMPONENT_NOTES,
            op = "update",
            user_id,
            note_id = id,
            "Note updated"
        );
        self.fetch(user_id, id).await
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }

        info!(
            subsystem = logging::SUBSYSTEM_DATABASE,
            component = logging::COMPONENT_NOTES,
            op = "delete",
            user_id,
            note_id = id,
            "Note deleted"
        );
        Ok(())
    }
}
