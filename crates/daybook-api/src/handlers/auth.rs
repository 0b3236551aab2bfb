//! Registration and login.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use daybook_core::{logging, non_blank, Error, UserRepository};

use crate::{
    auth::{hash_password, verify_password},
    error::ApiError,
    extract::ApiJson,
    state::AppState,
};

/// Request body for register and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Issued session.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
}

fn credentials(req: CredentialsRequest) -> Result<(String, String), ApiError> {
    let username = non_blank(req.username).map(|u| u.trim().to_string());
    let password = req.password.filter(|p| !p.is_empty());
    match (username, password) {
        (Some(username), Some(password)) => Ok((username, password)),
        _ => Err(ApiError::BadRequest(
            "Username and password required".to_string(),
        )),
    }
}

/// Run CPU-heavy password work off the async executor.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> daybook_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(Error::Internal(format!("Blocking task failed: {}", e))))?
        .map_err(ApiError::from)
}

/// Create an account and return a session token.
///
/// # Returns
/// - 200 OK with `{token, userId, username}`
/// - 400 Bad Request if a field is missing or the username is taken
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (username, password) = credentials(req)?;

    let password_hash = blocking(move || hash_password(&password)).await?;
    let user = state.db.users.create(&username, &password_hash).await?;
    let token = state.tokens.issue(user.id)?;

    info!(
        subsystem = logging::SUBSYSTEM_API,
        component = logging::COMPONENT_AUTH,
        op = "register",
        user_id = user.id,
        "User registered"
    );
    Ok(Json(AuthResponse {
        token,
        user_id: user.id,
        username: user.username,
    }))
}

/// Check credentials and return a session token.
///
/// # Returns
/// - 200 OK with `{token, userId, username}`
/// - 400 Bad Request if a field is missing
/// - 401 Unauthorized on unknown user or wrong password
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (username, password) = credentials(req)?;
    let invalid = || ApiError::Unauthorized("Invalid credentials".to_string());

    let user = state
        .db
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(invalid)?;

    let hash = user.password_hash.clone();
    if !blocking(move || verify_password(&password, &hash)).await? {
        info!(
            subsystem = logging::SUBSYSTEM_API,
            component = logging::COMPONENT_AUTH,
            op = "login",
            user_id = user.id,
            "Rejected login with wrong password"
        );
        return Err(invalid());
    }

    let token = state.tokens.issue(user.id)?;
    Ok(Json(AuthResponse {
        token,
        user_id: user.id,
        username: user.username,
    }))
}
