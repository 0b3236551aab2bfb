//! Todo HTTP handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use daybook_core::{
    non_blank, CreateTodoRequest, ListTodosRequest, Todo, TodoRepository, UpdateTodoRequest,
};

use super::parse_optional_date;
use crate::{auth::AuthUser, error::ApiError, state::AppState};
use crate::extract::{ApiJson, ApiPath, ApiQuery};

const INVALID_DUE_DATE: &str = "Invalid due date, expected YYYY-MM-DD";

/// Query parameters for listing todos.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTodosQuery {
    /// `false` hides completed todos.
    pub include_completed: Option<String>,
    /// `true` shows only todos not yet in the calendar.
    pub not_in_calendar: Option<String>,
}

impl From<ListTodosQuery> for ListTodosRequest {
    fn from(query: ListTodosQuery) -> Self {
        Self {
            include_completed: query.include_completed.as_deref() != Some("false"),
            not_in_calendar: query.not_in_calendar.as_deref() == Some("true"),
        }
    }
}

/// Request body for creating a todo.
#[derive(Debug, Deserialize)]
pub struct CreateTodoBody {
    pub note_id: Option<i64>,
    pub text: Option<String>,
    pub due_date: Option<String>,
    pub tags: Option<Vec<i64>>,
}

impl TryFrom<CreateTodoBody> for CreateTodoRequest {
    type Error = ApiError;

    fn try_from(body: CreateTodoBody) -> Result<Self, Self::Error> {
        let required = || ApiError::BadRequest("Note ID and text required".to_string());

        let note_id = body.note_id.ok_or_else(required)?;
        let text = non_blank(body.text).ok_or_else(required)?;

        Ok(CreateTodoRequest {
            note_id,
            text,
            due_date: parse_optional_date(body.due_date.as_deref(), INVALID_DUE_DATE)?,
            tag_ids: body.tags.unwrap_or_default(),
        })
    }
}

/// Request body for replacing a todo.
#[derive(Debug, Deserialize)]
pub struct UpdateTodoBody {
    pub text: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub in_calendar: bool,
    pub due_date: Option<String>,
    pub tags: Option<Vec<i64>>,
}

impl TryFrom<UpdateTodoBody> for UpdateTodoRequest {
    type Error = ApiError;

    fn try_from(body: UpdateTodoBody) -> Result<Self, Self::Error> {
        let text = non_blank(body.text)
            .ok_or_else(|| ApiError::BadRequest("Todo text required".to_string()))?;

        Ok(UpdateTodoRequest {
            text,
            completed: body.completed,
            in_calendar: body.in_calendar,
            due_date: parse_optional_date(body.due_date.as_deref(), INVALID_DUE_DATE)?,
            tag_ids: body.tags.unwrap_or_default(),
        })
    }
}

/// List the caller's todos, undated first, then by due date.
///
/// # Query Parameters
/// - `includeCompleted`: `false` hides completed todos
/// - `notInCalendar`: `true` keeps only todos not yet in the calendar
pub async fn list_todos(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListTodosQuery>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.db.todos.list(auth.user_id, query.into()).await?;
    Ok(Json(todos))
}

/// Create a todo under one of the caller's notes.
///
/// # Returns
/// - 201 Created with the stored todo
/// - 400 Bad Request on missing fields, a bad date or an unknown tag id
/// - 404 Not Found if the note is missing or belongs to someone else
pub async fn create_todo(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateTodoBody>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let req = CreateTodoRequest::try_from(body)?;
    let todo = state.db.todos.insert(auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Replace a todo's text, flags, due date and tag set.
pub async fn update_todo(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<UpdateTodoBody>,
) -> Result<Json<Todo>, ApiError> {
    let req = UpdateTodoRequest::try_from(body)?;
    Ok(Json(state.db.todos.update(auth.user_id, id, req).await?))
}

/// Delete a todo.
pub async fn delete_todo(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.db.todos.delete(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
