//! Tag repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Row, Sqlite};
use tracing::info;

use daybook_core::{
    logging, validate_tag_name, Error, Result, Tag, TagRepository, TaggedItems,
};

use crate::map_unique_violation;
use crate::notes::tagged_notes;
use crate::todos::tagged_todos;

/// SQLite implementation of TagRepository.
pub struct SqliteTagRepository {
    pool: Pool<Sqlite>,
}

impl SqliteTagRepository {
    /// Create a new SqliteTagRepository with the given connection pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for SqliteTagRepository {
    async fn create(&self, name: &str) -> Result<Tag> {
        let name = validate_tag_name(name)?;

        let now = Utc::now();
        let result = sqlx::query("INSERT INTO tags (name, created_at) VALUES (?, ?)")
            .bind(&name)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "Tag already exists"))?;

        let tag = Tag {
            id: result.last_insert_rowid(),
            name,
            created_at: now,
        };
        info!(
            subsystem = logging::SUBSYSTEM_DATABASE,
            component = logging::COMPONENT_TAGS,
            op = "create",
            tag_id = tag.id,
            "Tag created"
        );
        Ok(tag)
    }

    async fn list(&self) -> Result<Vec<Tag>> {
        let rows = sqlx::query("SELECT id, name, created_at FROM tags ORDER BY name, id")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let tags = rows
            .into_iter()
            .map(|row| Tag {
                id: row.get("id"),
                name: row.get("name"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(tags)
    }

    async fn fetch(&self, id: i64) -> Result<Tag> {
        let row = sqlx::query("SELECT id, name, created_at FROM tags WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::TagNotFound(id))?;

        Ok(Tag {
            id: row.get("id"),
            name: row.get("name"),
            created_at: row.get("created_at"),
        })
    }

    async fn delete(&self, id: i64) -> Result<()> {
        // Join rows go with it via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::TagNotFound(id));
        }

        info!(
            subsystem = logging::SUBSYSTEM_DATABASE,
            component = logging::COMPONENT_TAGS,
            op = "delete",
            tag_id = id,
            "Tag deleted"
        );
        Ok(())
    }

    async fn items(&self, user_id: i64, tag_id: i64) -> Result<TaggedItems> {
        self.fetch(tag_id).await?;

        let notes = tagged_notes(&self.pool, user_id, tag_id).await?;
        let todos = tagged_todos(&self.pool, user_id, tag_id).await?;

        Ok(TaggedItems { notes, todos })
    }
}
