//! Batched tag loading for note and todo collections.
//!
//! Entity rows are fetched with one query; their tags are fetched with a
//! second query over all entity ids at once and reattached in memory.

use std::collections::HashMap;

use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use daybook_core::{defaults::SQL_IN_CHUNK, Error, Note, Result, TagRef, Todo};

use crate::tagging::TagTarget;

/// Load the tags of every entity in `ids`, keyed by entity id.
///
/// Each list is ordered by tag name, then tag id. Entities without tags are
/// absent from the map.
pub async fn load_tags(
    pool: &SqlitePool,
    target: TagTarget,
    ids: &[i64],
) -> Result<HashMap<i64, Vec<TagRef>>> {
    let mut tags: HashMap<i64, Vec<TagRef>> = HashMap::new();
    if ids.is_empty() {
        return Ok(tags);
    }

    for chunk in ids.chunks(SQL_IN_CHUNK) {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT j.{owner} AS owner_id, t.id, t.name FROM {table} j \
             JOIN tags t ON t.id = j.tag_id WHERE j.{owner} IN (",
            owner = target.owner_column(),
            table = target.table(),
        ));
        let mut separated = qb.separated(", ");
        for id in chunk {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY t.name, t.id");

        let rows = qb
            .build()
            .fetch_all(pool)
            .await
            .map_err(Error::Database)?;

        for row in rows {
            tags.entry(row.get("owner_id")).or_default().push(TagRef {
                id: row.get("id"),
                name: row.get("name"),
            });
        }
    }

    Ok(tags)
}

/// Fill in the `tags` field of each note.
pub async fn attach_note_tags(pool: &SqlitePool, notes: &mut [Note]) -> Result<()> {
    let ids: Vec<i64> = notes.iter().map(|n| n.id).collect();
    let mut tags = load_tags(pool, TagTarget::Note, &ids).await?;
    for note in notes.iter_mut() {
        note.tags = tags.remove(&note.id).unwrap_or_default();
    }
    Ok(())
}

/// Fill in the `tags` field of each todo.
pub async fn attach_todo_tags(pool: &SqlitePool, todos: &mut [Todo]) -> Result<()> {
    let ids: Vec<i64> = todos.iter().map(|t| t.id).collect();
    let mut tags = load_tags(pool, TagTarget::Todo, &ids).await?;
    for todo in todos.iter_mut() {
        todo.tags = tags.remove(&todo.id).unwrap_or_default();
    }
    Ok(())
}
