//! Tag HTTP handlers.
//!
//! Tags are global: every authenticated user sees and edits the same list.
//! The items view is still scoped to the caller's own notes and todos.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use daybook_core::{Tag, TagRepository, TaggedItems};

use crate::{auth::AuthUser, error::ApiError, state::AppState};
use crate::extract::{ApiJson, ApiPath};

/// Request body for creating a tag.
#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub name: Option<String>,
}

/// List all tags ordered by name.
pub async fn list_tags(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Tag>>, ApiError> {
    Ok(Json(state.db.tags.list().await?))
}

/// Create a tag.
///
/// # Returns
/// - 201 Created with the tag
/// - 400 Bad Request if the name is blank, too long or already taken
pub async fn create_tag(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateTagRequest>,
) -> Result<(StatusCode, Json<Tag>), ApiError> {
    let name = req.name.unwrap_or_default();
    let tag = state.db.tags.create(&name).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// Delete a tag; notes and todos lose it but are otherwise untouched.
pub async fn delete_tag(
    _auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.db.tags.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The caller's notes and todos carrying a tag.
pub async fn tag_items(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<TaggedItems>, ApiError> {
    Ok(Json(state.db.tags.items(auth.user_id, id).await?))
}
