//! Volatile store: everything lives in process memory and is lost on exit.
//!
//! Mutations run under a write lock as a single critical section, so there
//! is never a partially applied write to roll back. Reads take the read lock
//! and therefore observe a consistent snapshot.

pub mod todo;
pub mod user;

use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::repository::{Store, UnitOfWork};

pub use todo::MemoryTodoRepository;
pub use user::MemoryUserRepository;

/// The in-memory backend has no connection or transaction to carry
#[derive(Debug, Default)]
pub struct MemoryContext;

#[async_trait]
impl UnitOfWork for MemoryContext {
    async fn commit(self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn rollback(self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    todos: MemoryTodoRepository,
    users: MemoryUserRepository,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    type Context = MemoryContext;
    type Todos = MemoryTodoRepository;
    type Users = MemoryUserRepository;

    fn name(&self) -> &'static str {
        "memory"
    }

    fn todos(&self) -> Self::Todos {
        self.todos.clone()
    }

    fn users(&self) -> Self::Users {
        self.users.clone()
    }

    async fn read(&self) -> Result<MemoryContext, DatabaseError> {
        Ok(MemoryContext)
    }

    async fn begin(&self) -> Result<MemoryContext, DatabaseError> {
        Ok(MemoryContext)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
