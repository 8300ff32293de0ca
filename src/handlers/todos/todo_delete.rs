// handlers/todos/todo_delete.rs - DELETE /todos/:id handler

use axum::extract::{Extension, State};

use super::MessageResponse;
use crate::api::AppState;
use crate::auth::AuthUser;
use crate::database::repository::{finish, Store};
use crate::middleware::{ApiResponse, ApiResult, PathParam};

pub async fn todo_delete<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    PathParam(id): PathParam<String>,
) -> ApiResult<MessageResponse> {
    let mut cx = state.store.begin().await?;
    let result = state.todos.delete(&mut cx, &user.user_id, &id).await;
    let id = finish(cx, result).await?;

    Ok(ApiResponse::success(MessageResponse {
        message: format!("todo {} is deleted", id),
    }))
}
