// handlers/todos/todo_list.rs - GET /todos handler

use axum::extract::{Extension, State};
use serde::{de, Deserialize, Deserializer};

use super::{TodoListResponse, TodoResponse};
use crate::api::AppState;
use crate::auth::AuthUser;
use crate::database::repository::{finish, Store};
use crate::middleware::{ApiResponse, ApiResult, QueryParams};
use crate::services::ListTodos;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub sortby: Option<String>,
    pub orderby: Option<String>,
    #[serde(rename = "includeDone", default, deserialize_with = "deserialize_flag")]
    pub include_done: Option<bool>,
}

/// Boolean query flag. Accepts `1 t T TRUE true True` and `0 f F FALSE false
/// False`; an empty value reads as false.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "" | "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        _ => None,
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    raw.map(|value| {
        parse_flag(&value)
            .ok_or_else(|| de::Error::custom(format!("includeDone must be a boolean, but {}", value)))
    })
    .transpose()
}

impl From<ListQuery> for ListTodos {
    fn from(query: ListQuery) -> Self {
        Self {
            sort_by: query.sortby.unwrap_or_else(|| "id".to_string()),
            order_by: query.orderby.unwrap_or_else(|| "asc".to_string()),
            include_done: query.include_done.unwrap_or(false),
        }
    }
}

/// GET /todos?sortby=id|priority&orderby=asc|desc&includeDone=bool
pub async fn todo_list<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    QueryParams(query): QueryParams<ListQuery>,
) -> ApiResult<TodoListResponse> {
    let mut cx = state.store.read().await?;
    let result = state.todos.list(&mut cx, &user.user_id, query.into()).await;
    let todos = finish(cx, result).await?;

    Ok(ApiResponse::success(TodoListResponse {
        entries: todos.into_iter().map(TodoResponse::from).collect(),
    }))
}
