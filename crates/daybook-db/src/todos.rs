//! Todo repository implementation.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info};

use daybook_core::{
    logging, CreateTodoRequest, Error, ListTodosRequest, Result, Todo, TodoRepository,
    UpdateTodoRequest,
};

use crate::aggregation::attach_todo_tags;
use crate::tagging::{replace_tags, TagTarget};

/// Todo columns plus the parent note's title.
const TODO_SELECT: &str = "SELECT t.id, t.note_id, t.user_id, t.text, t.completed, \
     t.in_calendar, t.due_date, t.created_at, t.updated_at, n.title AS note_title \
     FROM todos t LEFT JOIN notes n ON n.id = t.note_id";

/// Undated todos first, then by due date.
const TODO_ORDER: &str =
    "ORDER BY CASE WHEN t.due_date IS NULL THEN 0 ELSE 1 END, t.due_date ASC, t.id ASC";

/// SQLite implementation of TodoRepository.
pub struct SqliteTodoRepository {
    pool: Pool<Sqlite>,
}

impl SqliteTodoRepository {
    /// Create a new SqliteTodoRepository with the given connection pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

fn todo_from_row(row: &SqliteRow) -> Todo {
    Todo {
        id: row.get("id"),
        note_id: row.get("note_id"),
        user_id: row.get("user_id"),
        text: row.get("text"),
        completed: row.get("completed"),
        in_calendar: row.get("in_calendar"),
        due_date: row.get("due_date"),
        note_title: row.get("note_title"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        tags: Vec::new(),
    }
}

/// Fail with `NoteNotFound` unless `note_id` is one of the user's notes.
async fn ensure_note_owned(conn: &mut SqliteConnection, user_id: i64, note_id: i64) -> Result<()> {
    let owned: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM notes WHERE id = ? AND user_id = ?)")
            .bind(note_id)
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(Error::Database)?;
    if !owned {
        return Err(Error::NoteNotFound(note_id));
    }
    Ok(())
}

/// The user's todos carrying `tag_id`, tags attached.
pub(crate) async fn tagged_todos(pool: &SqlitePool, user_id: i64, tag_id: i64) -> Result<Vec<Todo>> {
    let rows = sqlx::query(&format!(
        "{TODO_SELECT} JOIN todo_tags tt ON tt.todo_id = t.id \
         WHERE t.user_id = ? AND tt.tag_id = ? {TODO_ORDER}"
    ))
    .bind(user_id)
    .bind(tag_id)
    .fetch_all(pool)
    .await
    .map_err(Error::Database)?;

    let mut todos: Vec<Todo> = rows.iter().map(todo_from_row).collect();
    attach_todo_tags(pool, &mut todos).await?;
    Ok(todos)
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn insert(&self, user_id: i64, req: CreateTodoRequest) -> Result<Todo> {
        req.validate()?;
        let now = Utc::now();

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        // Write first: a deferred transaction that reads before writing
        // gets SQLITE_BUSY without waiting on the busy timeout.
        let result = sqlx::query(
            "INSERT INTO todos \
             (note_id, user_id, text, completed, in_calendar, due_date, created_at, updated_at) \
             SELECT ?, ?, ?, 0, 0, ?, ?, ? \
             WHERE EXISTS(SELECT 1 FROM notes WHERE id = ? AND user_id = ?)",
        )
        .bind(req.note_id)
        .bind(user_id)
        .bind(&req.text)
        .bind(req.due_date)
        .bind(now)
        .bind(now)
        .bind(req.note_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(req.note_id));
        }
        let id = result.last_insert_rowid();

        replace_tags(&mut *tx, TagTarget::Todo, id, &req.tag_ids).await?;

        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = logging::SUBSYSTEM_DATABASE,
            component = logging::COMPONENT_TODOS,
            op = "insert",
            user_id,
            note_id = req.note_id,
            todo_id = id,
            tag_count = req.tag_ids.len(),
            "Todo created"
        );
        self.fetch(user_id, id).await
    }

    async fn fetch(&self, user_id: i64, id: i64) -> Result<Todo> {
        let row = sqlx::query(&format!("{TODO_SELECT} WHERE t.id = ? AND t.user_id = ?"))
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::TodoNotFound(id))?;

        let mut todos = vec![todo_from_row(&row)];
        attach_todo_tags(&self.pool, &mut todos).await?;
        todos.pop().ok_or(Error::TodoNotFound(id))
    }

    async fn list(&self, user_id: i64, req: ListTodosRequest) -> Result<Vec<Todo>> {
        let start = Instant::now();

        let mut qb = QueryBuilder::<Sqlite>::new(TODO_SELECT);
        qb.push(" WHERE t.user_id = ").push_bind(user_id);
        if !req.include_completed {
            qb.push(" AND t.completed = 0");
        }
        if req.not_in_calendar {
            qb.push(" AND t.in_calendar = 0");
        }
        qb.push(" ").push(TODO_ORDER);

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let mut todos: Vec<Todo> = rows.iter().map(todo_from_row).collect();
        attach_todo_tags(&self.pool, &mut todos).await?;

        debug!(
            subsystem = logging::SUBSYSTEM_DATABASE,
            component = logging::COMPONENT_TODOS,
            op = "list",
            user_id,
            include_completed = req.include_completed,
            not_in_calendar = req.not_in_calendar,
            result_count = todos.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed todos"
        );
        Ok(todos)
    }

    async fn list_for_note(&self, user_id: i64, note_id: i64) -> Result<Vec<Todo>> {
        let mut conn = self.pool.acquire().await.map_err(Error::Database)?;
        ensure_note_owned(&mut *conn, user_id, note_id).await?;
        drop(conn);

        let rows = sqlx::query(&format!(
            "{TODO_SELECT} WHERE t.note_id = ? AND t.user_id = ? \
             ORDER BY t.created_at ASC, t.id ASC"
        ))
        .bind(note_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut todos: Vec<Todo> = rows.iter().map(todo_from_row).collect();
        attach_todo_tags(&self.pool, &mut todos).await?;
        Ok(todos)
    }

    async fn update(&self, user_id: i64, id: i64, req: UpdateTodoRequest) -> Result<Todo> {
        req.validate()?;
        let now = Utc::now();

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let result = sqlx::query(
            "UPDATE todos SET text = ?, completed = ?, in_calendar = ?, due_date = ?, \
             updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(&req.text)
        .bind(req.completed)
        .bind(req.in_calendar)
        .bind(req.due_date)
        .bind(now)
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::TodoNotFound(id));
        }

        replace_tags(&mut *tx, TagTarget::Todo, id, &req.tag_ids).await?;

        tx.commit().await.map_err(Error::Database)?;

        debug!(
            subsystem = logging::SUBSYSTEM_DATABASE,
            component = logging::COMPONENT_TODOS,
            op = "update",
            user_id,
            todo_id = id,
            completed = req.completed,
            "Todo updated"
        );
        self.fetch(user_id, id).await
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::TodoNotFound(id));
        }

        info!(
            subsystem = logging::SUBSYSTEM_DATABASE,
            component = logging::COMPONENT_TODOS,
            op = "delete",
            user_id,
            todo_id = id,
            "Todo deleted"
        );
        Ok(())
    }
}
