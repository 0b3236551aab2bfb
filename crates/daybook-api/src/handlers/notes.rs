//! Note HTTP handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use daybook_core::{
    non_blank, ListNotesRequest, Note, NoteInput, NoteRepository, Todo, TodoRepository,
};

use super::{parse_date, parse_optional_date};
use crate::{auth::AuthUser, error::ApiError, state::AppState};
use crate::extract::{ApiJson, ApiPath, ApiQuery};

const NOTE_FIELDS_REQUIRED: &str = "Title, content, and date required";
const INVALID_DATE: &str = "Invalid date, expected YYYY-MM-DD";

/// Query parameters for listing notes.
#[derive(Debug, Deserialize)]
pub struct ListNotesQuery {
    /// Only notes for this day (`YYYY-MM-DD`).
    pub date: Option<String>,
}

/// Request body for creating or replacing a note.
#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub date: Option<String>,
    /// Complete tag id set.
    pub tags: Option<Vec<i64>>,
}

impl TryFrom<NoteRequest> for NoteInput {
    type Error = ApiError;

    fn try_from(req: NoteRequest) -> Result<Self, Self::Error> {
        let required = || ApiError::BadRequest(NOTE_FIELDS_REQUIRED.to_string());

        let title = non_blank(req.title).ok_or_else(required)?;
        let content = non_blank(req.content).ok_or_else(required)?;
        let date = non_blank(req.date).ok_or_else(required)?;

        Ok(NoteInput {
            title,
            content,
            date: parse_date(&date, INVALID_DATE)?,
            tag_ids: req.tags.unwrap_or_default(),
        })
    }
}

/// List the caller's notes, newest day first.
///
/// # Query Parameters
/// - `date`: only notes for this day (optional)
pub async fn list_notes(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListNotesQuery>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let date = parse_optional_date(query.date.as_deref(), INVALID_DATE)?;
    let notes = state
        .db
        .notes
        .list(auth.user_id, ListNotesRequest { date })
        .await?;
    Ok(Json(notes))
}

/// Fetch one of the caller's notes.
pub async fn get_note(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Note>, ApiError> {
    Ok(Json(state.db.notes.fetch(auth.user_id, id).await?))
}

/// Create a note.
///
/// # Returns
/// - 201 Created with the stored note, tags included
/// - 400 Bad Request on missing fields, a bad date or an unknown tag id
pub async fn create_note(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NoteRequest>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let input = NoteInput::try_from(req)?;
    let note = state.db.notes.insert(auth.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// Replace a note's fields and tag set.
pub async fn update_note(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<NoteRequest>,
) -> Result<Json<Note>, ApiError> {
    let input = NoteInput::try_from(req)?;
    Ok(Json(state.db.notes.update(auth.user_id, id, input).await?))
}

/// Delete a note together with its todos.
pub async fn delete_note(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.db.notes.delete(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Todos extracted from one of the caller's notes, in creation order.
pub async fn list_note_todos(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.db.todos.list_for_note(auth.user_id, id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(date: Option<&str>) -> NoteRequest {
        NoteRequest {
            title: Some("Standup".into()),
            content: Some("<p>notes</p>".into()),
            date: date.map(String::from),
            tags: Some(vec![2, 1]),
        }
    }

    #[test]
    fn test_note_request_converts() {
        let input = NoteInput::try_from(request(Some("2024-03-09"))).unwrap();
        assert_eq!(input.title, "Standup");
        assert_eq!(input.tag_ids, vec![2, 1]);
        assert_eq!(input.date.to_string(), "2024-03-09");
    }

    #[test]
    fn test_note_request_missing_date() {
        match NoteInput::try_from(request(None)) {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, NOTE_FIELDS_REQUIRED),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_note_request_bad_date() {
        match NoteInput::try_from(request(Some("yesterday"))) {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, INVALID_DATE),
            other => panic!("unexpected {other:?}"),
        }
    }
}
