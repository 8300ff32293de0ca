pub mod error;
pub mod todo_service;
pub mod validator;

pub use error::{ErrorKind, ServiceError};
pub use todo_service::{CreateTodo, ListTodos, TodoPatch, TodoService};
