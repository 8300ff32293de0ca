use tracing::{debug, info};

use super::error::ServiceError;
use super::validator::{parse_id, validate_description, validate_title};
use crate::database::models::{NewTodo, Todo};
use crate::database::repository::TodoRepository;
use crate::types::{Order, Priority, Sorter, Status};

/// Raw fields for a new todo, as received from the client.
/// The transport fills in defaults for omitted status and priority.
#[derive(Debug, Clone)]
pub struct CreateTodo {
    pub title: String,
    pub description: String,
    pub status: i64,
    pub priority: i64,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<i64>,
    pub priority: Option<i64>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none() && self.priority.is_none()
    }
}

/// Raw listing parameters
#[derive(Debug, Clone)]
pub struct ListTodos {
    pub sort_by: String,
    pub order_by: String,
    pub include_done: bool,
}

/// Validates client input and drives the todo repository.
/// Nothing reaches the store before every field has been checked.
#[derive(Debug, Clone)]
pub struct TodoService<R> {
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn create(&self, cx: &mut R::Context, owner: &str, input: CreateTodo) -> Result<Todo, ServiceError> {
        validate_title(&input.title)?;
        validate_description(&input.description)?;
        let status = Status::from_code(input.status)?;
        let priority = Priority::from_code(input.priority)?;

        let new = NewTodo {
            title: input.title,
            description: input.description,
            status,
            priority,
        };
        let id = self.repo.create(cx, owner, new).await?;
        info!("Created todo {} for {}", id, owner);

        Ok(self.repo.get(cx, owner, id).await?)
    }

    pub async fn get(&self, cx: &mut R::Context, owner: &str, id: &str) -> Result<Todo, ServiceError> {
        let id = parse_id(id)?;
        debug!("Fetching todo {} for {}", id, owner);
        Ok(self.repo.get(cx, owner, id).await?)
    }

    pub async fn list(&self, cx: &mut R::Context, owner: &str, query: ListTodos) -> Result<Vec<Todo>, ServiceError> {
        let sorter: Sorter = query.sort_by.parse()?;
        let order: Order = query.order_by.parse()?;

        let todos = self.repo.list(cx, owner, sorter, order, query.include_done).await?;
        debug!("Listed {} todos for {}", todos.len(), owner);
        Ok(todos)
    }

    pub async fn update(&self, cx: &mut R::Context, owner: &str, id: &str, patch: TodoPatch) -> Result<Todo, ServiceError> {
        let id = parse_id(id)?;
        let mut todo = self.repo.get(cx, owner, id).await?;

        if patch.is_empty() {
            return Err(ServiceError::bad_request("no fields to be updated"));
        }

        if let Some(title) = patch.title {
            validate_title(&title)?;
            todo.title = title;
        }
        if let Some(description) = patch.description {
            validate_description(&description)?;
            todo.description = description;
        }
        if let Some(status) = patch.status {
            todo.status = Status::from_code(status)?;
        }
        if let Some(priority) = patch.priority {
            todo.priority = Priority::from_code(priority)?;
        }

        self.repo.update(cx, &todo).await?;
        info!("Updated todo {} for {}", id, owner);

        Ok(self.repo.get(cx, owner, id).await?)
    }

    /// Returns the id that was removed
    pub async fn delete(&self, cx: &mut R::Context, owner: &str, id: &str) -> Result<i64, ServiceError> {
        let id = parse_id(id)?;
        // Confirms ownership; the store deletes by id alone
        self.repo.get(cx, owner, id).await?;
        self.repo.delete(cx, id).await?;
        info!("Deleted todo {} for {}", id, owner);
        Ok(id)
    }
}
