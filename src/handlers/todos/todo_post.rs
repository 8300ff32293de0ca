// handlers/todos/todo_post.rs - POST /todos handler

use axum::extract::{Extension, State};
use serde::Deserialize;

use super::TodoResponse;
use crate::api::AppState;
use crate::auth::AuthUser;
use crate::database::repository::{finish, Store};
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::services::CreateTodo;
use crate::types::{Priority, Status};

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<i64>,
    pub priority: Option<i64>,
}

impl From<CreateTodoRequest> for CreateTodo {
    fn from(req: CreateTodoRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            status: req.status.unwrap_or_else(|| Status::default().code().into()),
            priority: req.priority.unwrap_or_else(|| Priority::default().code().into()),
        }
    }
}

/// POST /todos - create a todo owned by the caller
pub async fn todo_post<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    JsonBody(body): JsonBody<CreateTodoRequest>,
) -> ApiResult<TodoResponse> {
    let mut cx = state.store.begin().await?;
    let result = state.todos.create(&mut cx, &user.user_id, body.into()).await;
    let todo = finish(cx, result).await?;

    Ok(ApiResponse::created(todo.into()))
}
