//! Registration, login and token enforcement over HTTP.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;
use tower::ServiceExt;

use common::TestApp;
use daybook_api::TokenSigner;
use daybook_db::UserRepository;

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_register_returns_usable_token() {
    let app = TestApp::new().await;
    let (user_id, token) = app.register("alice", "correct horse").await;

    let claims = app.tokens.verify(&token).unwrap();
    assert_eq!(claims.sub, user_id);

    let (status, body) = app.get("/api/notes", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new().await;
    app.register("alice", "first").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "username": "alice", "password": "second" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Username already exists");
    assert_eq!(app.db.users.count().await.unwrap(), 1);

    // The original password still works.
    let (status, _) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "alice", "password": "first" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_requires_fields() {
    let app = TestApp::new().await;
    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "username": "alice" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Username and password required");
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::new().await;
    let (user_id, _) = app.register("alice", "pw-123").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "alice", "password": "pw-123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], user_id);
    assert_eq!(body["username"], "alice");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_login_wrong_password_or_unknown_user() {
    let app = TestApp::new().await;
    app.register("alice", "pw-123").await;

    for (username, password) in [("alice", "nope"), ("nobody", "pw-123")] {
        let (status, body) = app
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");
    }
}

#[tokio::test]
async fn test_missing_token_rejected() {
    let app = TestApp::new().await;
    for uri in ["/api/notes", "/api/todos", "/api/tags"] {
        let (status, body) = app.send(Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"], "Access token required");
    }
}

#[tokio::test]
async fn test_bad_signature_rejected() {
    let app = TestApp::new().await;
    let (user_id, _) = app.register("alice", "pw").await;

    let forged = TokenSigner::new("some-other-secret").issue(user_id).unwrap();
    let (status, _) = app.get("/api/notes", &forged).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/notes", "not-a-token").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::new().await;
    let (user_id, _) = app.register("alice", "pw").await;

    let stale = app
        .tokens
        .issue_at(user_id, Utc::now() - Duration::days(8))
        .unwrap();
    let (status, body) = app.get("/api/notes", &stale).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_token_of_deleted_user_rejected() {
    let app = TestApp::new().await;
    let (user_id, token) = app.register("alice", "pw").await;

    app.db.users.delete(user_id).await.unwrap();

    let (status, _) = app.get("/api/notes", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_request_id_header_is_set() {
    let app = TestApp::new().await;

    let response = app
        .app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header");
    assert_eq!(uuid::Uuid::parse_str(id).unwrap().get_version_num(), 7);
}
