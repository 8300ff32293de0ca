// handlers/todos/mod.rs - Todo CRUD handlers (credential authentication required)
//
// Mutating handlers run inside `store.begin()`, reads inside `store.read()`;
// both close their context through `finish`.

pub mod todo_delete;
pub mod todo_get;
pub mod todo_list;
pub mod todo_patch;
pub mod todo_post;

pub use todo_delete::todo_delete;
pub use todo_get::todo_get;
pub use todo_list::todo_list;
pub use todo_patch::todo_patch;
pub use todo_post::todo_post;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::database::models::Todo;

/// Wire representation of a todo. The id travels as a string and the enums
/// as their ordinals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: i32,
    pub priority: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            title: todo.title,
            description: todo.description,
            status: todo.status.code(),
            priority: todo.priority.code(),
            created_at: timestamp(&todo.created_at),
            updated_at: timestamp(&todo.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TodoListResponse {
    pub entries: Vec<TodoResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}
