// handlers/todos/todo_patch.rs - PATCH /todos/:id handler

use axum::extract::{Extension, State};
use serde::Deserialize;

use super::TodoResponse;
use crate::api::AppState;
use crate::auth::AuthUser;
use crate::database::repository::{finish, Store};
use crate::middleware::{ApiResponse, ApiResult, JsonBody, PathParam};
use crate::services::TodoPatch;

#[derive(Debug, Default, Deserialize)]
pub struct PatchTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<i64>,
    pub priority: Option<i64>,
}

impl From<PatchTodoRequest> for TodoPatch {
    fn from(req: PatchTodoRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
        }
    }
}

/// PATCH /todos/:id - replace only the fields present in the body
pub async fn todo_patch<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    PathParam(id): PathParam<String>,
    JsonBody(body): JsonBody<PatchTodoRequest>,
) -> ApiResult<TodoResponse> {
    let mut cx = state.store.begin().await?;
    let result = state.todos.update(&mut cx, &user.user_id, &id, body.into()).await;
    let todo = finish(cx, result).await?;

    Ok(ApiResponse::success(todo.into()))
}
