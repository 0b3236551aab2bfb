//! Request extractors whose rejections render as `{"error": message}`.
//!
//! axum's own `Json`, `Path` and `Query` reject with plain-text bodies and a
//! mix of 400/415/422 statuses. These wrappers turn every rejection into an
//! [`ApiError::BadRequest`].

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::request::Parts,
    Json,
};
use tracing::debug;

use crate::error::ApiError;

/// JSON request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

/// Path parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

/// Query string parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        debug!(status = %rejection.status(), error = %message, "Rejected JSON body");
        ApiError::BadRequest(message)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        let message = rejection.body_text();
        debug!(status = %rejection.status(), error = %message, "Rejected path");
        ApiError::BadRequest(message)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        let message = rejection.body_text();
        debug!(status = %rejection.status(), error = %message, "Rejected query");
        ApiError::BadRequest(message)
    }
}

#[axum::async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{self, StatusCode},
        response::IntoResponse,
    };
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        tags: Vec<i64>,
    }

    async fn extract_body(
        body: &str,
        content_type: Option<&str>,
    ) -> Result<ApiJson<Payload>, ApiError> {
        let mut builder = http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        let req = builder.body(Body::from(body.to_string())).unwrap();
        ApiJson::<Payload>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_json_rejections_are_bad_request() {
        for (body, ct) in [
            (r#"{"tags":["1"]}"#, Some("application/json")),
            (r#"{"tags":[1"#, Some("application/json")),
            (r#"{"tags":[1]}"#, None),
        ] {
            let err = extract_body(body, ct).await.unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(_)), "{body}");
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_json_accepts_valid_body() {
        let ApiJson(payload) = extract_body(r#"{"tags":[1,2]}"#, Some("application/json"))
            .await
            .unwrap();
        assert_eq!(payload.tags, vec![1, 2]);
    }
}
