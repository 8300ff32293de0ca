#![allow(dead_code)]

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use todo_api_rust::api::{app, AppState};
use todo_api_rust::cli::commands::serve::seed_users;
use todo_api_rust::database::MemoryStore;

pub const ALICE: &str = "alice:password";
pub const BOB: &str = "bob:hunter2";

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Router over a fresh in-memory store with `alice` and `bob` registered
pub async fn memory_app() -> Result<Router> {
    let store = MemoryStore::new();
    seed_users(
        &store,
        &[
            ("alice".to_string(), "password".to_string()),
            ("bob".to_string(), "hunter2".to_string()),
        ],
    )
    .await?;
    Ok(app(AppState::new(store), false))
}

/// Drive one request through the router in-process
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> Result<TestResponse> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok(TestResponse { status, body })
}

/// POST /todos and return the created todo, failing unless it was a 201
pub async fn create_todo(app: &Router, auth: &str, body: Value) -> Result<Value> {
    let res = send(app, Method::POST, "/todos", Some(auth), Some(body)).await?;
    anyhow::ensure!(
        res.status == StatusCode::CREATED,
        "create failed with {}: {}",
        res.status,
        res.body
    );
    Ok(res.body)
}

pub fn ids(list: &Value) -> Vec<String> {
    list["entries"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| e["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
