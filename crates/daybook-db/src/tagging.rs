//! Replace-all-tags-on-save for notes and todos.

use std::collections::HashSet;

use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection};
use tracing::debug;

use daybook_core::{dedup_tag_ids, defaults::SQL_IN_CHUNK, logging, Error, Result};

/// Which join table a tag set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagTarget {
    Note,
    Todo,
}

impl TagTarget {
    /// Join table name.
    pub fn table(self) -> &'static str {
        match self {
            TagTarget::Note => "note_tags",
            TagTarget::Todo => "todo_tags",
        }
    }

    /// Column holding the tagged entity's id.
    pub fn owner_column(self) -> &'static str {
        match self {
            TagTarget::Note => "note_id",
            TagTarget::Todo => "todo_id",
        }
    }
}

/// Make the stored tag set of an entity equal `tag_ids`.
///
/// Must run on the transaction that writes the entity. Unknown ids fail with
/// `Error::InvalidInput` before any join row is touched.
pub(crate) async fn replace_tags(
    conn: &mut SqliteConnection,
    target: TagTarget,
    entity_id: i64,
    tag_ids: &[i64],
) -> Result<()> {
    let ids = dedup_tag_ids(tag_ids);

    ensure_tags_exist(conn, &ids).await?;

    sqlx::query(&format!(
        "DELETE FROM {} WHERE {} = ?",
        target.table(),
        target.owner_column()
    ))
    .bind(entity_id)
    .execute(&mut *conn)
    .await
    .map_err(Error::Database)?;

    let insert = format!(
        "INSERT INTO {} ({}, tag_id) VALUES (?, ?)",
        target.table(),
        target.owner_column()
    );
    for tag_id in &ids {
        sqlx::query(&insert)
            .bind(entity_id)
            .bind(tag_id)
            .execute(&mut *conn)
            .await
            .map_err(Error::Database)?;
    }

    debug!(
        subsystem = logging::SUBSYSTEM_DATABASE,
        component = logging::COMPONENT_TAGGING,
        op = "replace",
        join_table = target.table(),
        entity_id,
        tag_count = ids.len(),
        "Replaced tag set"
    );
    Ok(())
}

async fn ensure_tags_exist(conn: &mut SqliteConnection, ids: &[i64]) -> Result<()> {
    if ids.is_empty() {
        return Ok(());
    }

    let mut found = HashSet::with_capacity(ids.len());
    for chunk in ids.chunks(SQL_IN_CHUNK) {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT id FROM tags WHERE id IN (");
        let mut separated = qb.separated(", ");
        for id in chunk {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let rows = qb
            .build()
            .fetch_all(&mut *conn)
            .await
            .map_err(Error::Database)?;
        found.extend(rows.iter().map(|row| row.get::<i64, _>("id")));
    }

    let missing: Vec<String> = ids
        .iter()
        .filter(|id| !found.contains(*id))
        .map(|id| id.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::InvalidInput(format!(
            "Unknown tag id(s): {}",
            missing.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_tables() {
        assert_eq!(TagTarget::Note.table(), "note_tags");
        assert_eq!(TagTarget::Note.owner_column(), "note_id");
        assert_eq!(TagTarget::Todo.table(), "todo_tags");
        assert_eq!(TagTarget::Todo.owner_column(), "todo_id");
    }
}
