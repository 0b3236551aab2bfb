//! Shared harness: the real router over a private in-memory database.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use daybook_api::{build_router, config::parse_allowed_origins, AppState, TokenSigner};
use daybook_db::Database;

pub const SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub app: Router,
    pub db: Database,
    pub tokens: TokenSigner,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = Database::connect_in_memory()
            .await
            .expect("Failed to create in-memory database");
        let tokens = TokenSigner::new(SECRET);
        let state = AppState::new(db.clone(), tokens.clone());
        let app = build_router(state, parse_allowed_origins("http://localhost:5173"), None);
        Self { app, db, tokens }
    }

    /// Send a request and return the status with the decoded JSON body
    /// (`Value::Null` for an empty body).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        self.dispatch(request).await
    }

    /// Send a JSON-typed request whose body is taken verbatim.
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        token: &str,
        body: &str,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    /// Register a user and return `(user_id, token)`.
    pub async fn register(&self, username: &str, password: &str) -> (i64, String) {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
        let user_id = body["userId"].as_i64().expect("userId");
        let token = body["token"].as_str().expect("token").to_string();
        (user_id, token)
    }

    /// Create a tag and return its id.
    pub async fn tag(&self, token: &str, name: &str) -> i64 {
        let (status, body) = self.post("/api/tags", token, json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED, "tag create failed: {body}");
        body["id"].as_i64().expect("tag id")
    }

    /// Create a note and return its id.
    pub async fn note(&self, token: &str, title: &str, date: &str, tags: &[i64]) -> i64 {
        let (status, body) = self
            .post(
                "/api/notes",
                token,
                json!({ "title": title, "content": "<p>body</p>", "date": date, "tags": tags }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "note create failed: {body}");
        body["id"].as_i64().expect("note id")
    }
}

/// Ids of a JSON array of entities, in order.
pub fn ids(value: &Value) -> Vec<i64> {
    value
        .as_array()
        .expect("array")
        .iter()
        .map(|v| v["id"].as_i64().expect("id"))
        .collect()
}

/// Tag ids embedded in one entity, in order.
pub fn tag_ids(entity: &Value) -> Vec<i64> {
    ids(&entity["tags"])
}
