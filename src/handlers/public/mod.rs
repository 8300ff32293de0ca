// handlers/public/mod.rs - Public handlers (no authentication required)

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::api::AppState;
use crate::database::repository::Store;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Todo API (Rust)",
        "version": version,
        "description": "Personal todo management API",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "todos": "/todos, /todos/:id (Authorization: <user id>:<password>)"
        }
    }))
}

/// GET /health - 200 when the store answers, 503 otherwise
pub async fn health<S: Store>(State(state): State<AppState<S>>) -> (StatusCode, Json<Value>) {
    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "store": state.store.name() })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed for {} store: {}", state.store.name(), e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "store": state.store.name(),
                    "detail": e.to_string()
                })),
            )
        }
    }
}
