//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

/// Error returned by every handler; rendered as `{"error": message}`.
#[derive(Debug)]
pub enum ApiError {
    /// Unexpected failure. The cause is logged, never sent to the client.
    Internal(daybook_core::Error),
    Unauthorized(String),
    NotFound(String),
    BadRequest(String),
}

impl From<daybook_core::Error> for ApiError {
    fn from(err: daybook_core::Error) -> Self {
        use daybook_core::Error;

        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::NoteNotFound(_) => ApiError::NotFound("Note not found".to_string()),
            Error::TodoNotFound(_) => ApiError::NotFound("Todo not found".to_string()),
            Error::TagNotFound(_) => ApiError::NotFound("Tag not found".to_string()),
            Error::InvalidInput(msg) | Error::Conflict(msg) => ApiError::BadRequest(msg),
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Internal(err) => {
                error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                )
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybook_core::Error;

    fn status_of(err: Error) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(Error::InvalidInput("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(Error::Conflict("Tag already exists".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(Error::NoteNotFound(1)), StatusCode::NOT_FOUND);
        assert_eq!(status_of(Error::TagNotFound(1)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(Error::Unauthorized("no".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(Error::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message_is_bare() {
        match ApiError::from(Error::InvalidInput("Tag name required".into())) {
            ApiError::BadRequest(msg) => assert_eq!(msg, "Tag name required"),
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }
}
