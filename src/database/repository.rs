//! Storage contracts shared by the in-memory and PostgreSQL backends.
//!
//! Every operation receives its request-scoped context explicitly. The
//! context is opaque to callers: for PostgreSQL it holds a pooled connection
//! or an open transaction, for the in-memory store it holds nothing.

use async_trait::async_trait;
use tracing::warn;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewTodo, Todo};
use crate::types::{Order, Sorter};

/// Request-scoped execution context. Dropping it without committing discards
/// any pending writes.
#[async_trait]
pub trait UnitOfWork: Send + Sized {
    async fn commit(self) -> Result<(), DatabaseError>;
    async fn rollback(self) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait TodoRepository: Clone + Send + Sync + 'static {
    type Context: UnitOfWork;

    /// Persist a new todo for `owner`. Assigns id and timestamps.
    async fn create(&self, cx: &mut Self::Context, owner: &str, todo: NewTodo) -> Result<i64, DatabaseError>;

    /// `NotFound` when absent or owned by somebody else.
    async fn get(&self, cx: &mut Self::Context, owner: &str, id: i64) -> Result<Todo, DatabaseError>;

    /// All todos of `owner`, Done ones only with `include_done`.
    /// Ties on the sort key fall back to ascending id.
    async fn list(
        &self,
        cx: &mut Self::Context,
        owner: &str,
        sorter: Sorter,
        order: Order,
        include_done: bool,
    ) -> Result<Vec<Todo>, DatabaseError>;

    /// Replace the stored record with the same id and refresh `updated_at`.
    async fn update(&self, cx: &mut Self::Context, todo: &Todo) -> Result<(), DatabaseError>;

    /// Hard delete. `NotFound` when absent.
    async fn delete(&self, cx: &mut Self::Context, id: i64) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait UserRepository: Clone + Send + Sync + 'static {
    type Context: UnitOfWork;

    /// True iff the user exists and the secret matches exactly.
    /// An unknown user is not an error.
    async fn authenticate(&self, cx: &mut Self::Context, id: &str, secret: &str) -> Result<bool, DatabaseError>;

    /// `Conflict` when the id is taken.
    async fn create(&self, cx: &mut Self::Context, id: &str, secret: &str) -> Result<(), DatabaseError>;
}

/// A storage backend, selected once at startup and shared by all requests
#[async_trait]
pub trait Store: Clone + Send + Sync + 'static {
    type Context: UnitOfWork;
    type Todos: TodoRepository<Context = Self::Context>;
    type Users: UserRepository<Context = Self::Context>;

    fn name(&self) -> &'static str;

    fn todos(&self) -> Self::Todos;

    fn users(&self) -> Self::Users;

    /// Context for read-only work, outside of any transaction
    async fn read(&self) -> Result<Self::Context, DatabaseError>;

    /// Context wrapping a fresh transaction
    async fn begin(&self) -> Result<Self::Context, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// Close a unit of work according to the outcome of the work done in it:
/// commit on success, roll back on failure.
pub async fn finish<C, T, E>(cx: C, result: Result<T, E>) -> Result<T, E>
where
    C: UnitOfWork,
    E: From<DatabaseError>,
{
    match result {
        Ok(value) => {
            cx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = cx.rollback().await {
                warn!("failed to roll back: {}", rollback_err);
            }
            Err(err)
        }
    }
}
