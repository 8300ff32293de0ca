// handlers/todos/todo_get.rs - GET /todos/:id handler

use axum::extract::{Extension, State};

use super::TodoResponse;
use crate::api::AppState;
use crate::auth::AuthUser;
use crate::database::repository::{finish, Store};
use crate::middleware::{ApiResponse, ApiResult, PathParam};

pub async fn todo_get<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    PathParam(id): PathParam<String>,
) -> ApiResult<TodoResponse> {
    let mut cx = state.store.read().await?;
    let result = state.todos.get(&mut cx, &user.user_id, &id).await;
    let todo = finish(cx, result).await?;

    Ok(ApiResponse::success(todo.into()))
}
