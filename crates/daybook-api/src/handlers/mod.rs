//! HTTP handler modules.

pub mod auth;
pub mod notes;
pub mod tags;
pub mod todos;

use axum::{response::IntoResponse, Json};
use chrono::NaiveDate;

use crate::error::ApiError;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Parse a `YYYY-MM-DD` date supplied by a client.
pub(crate) fn parse_date(value: &str, message: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(message.to_string()))
}

/// Parse an optional date; blank strings count as absent.
pub(crate) fn parse_optional_date(
    value: Option<&str>,
    message: &str,
) -> Result<Option<NaiveDate>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_date(v, message).map(Some),
        None => Ok(None),
    }
}
