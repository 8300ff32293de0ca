//! Durable store backed by PostgreSQL through sqlx.
//!
//! Mutating requests run inside a transaction that the caller commits or
//! rolls back. A transaction that is dropped unfinished (for example when
//! the request is cancelled) is rolled back by sqlx.

pub mod todo;
pub mod user;

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::repository::{Store, UnitOfWork};

pub use todo::PgTodoRepository;
pub use user::PgUserRepository;

/// Connection handle threaded through every PostgreSQL repository call
pub enum PgContext {
    Pooled(PoolConnection<Postgres>),
    Transaction(Transaction<'static, Postgres>),
}

impl PgContext {
    pub(crate) fn conn(&mut self) -> &mut PgConnection {
        match self {
            PgContext::Pooled(conn) => &mut **conn,
            PgContext::Transaction(tx) => &mut **tx,
        }
    }
}

#[async_trait]
impl UnitOfWork for PgContext {
    async fn commit(self) -> Result<(), DatabaseError> {
        match self {
            PgContext::Pooled(_) => Ok(()),
            PgContext::Transaction(tx) => Ok(tx.commit().await?),
        }
    }

    async fn rollback(self) -> Result<(), DatabaseError> {
        match self {
            PgContext::Pooled(_) => Ok(()),
            PgContext::Transaction(tx) => Ok(tx.rollback().await?),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    type Context = PgContext;
    type Todos = PgTodoRepository;
    type Users = PgUserRepository;

    fn name(&self) -> &'static str {
        "postgres"
    }

    fn todos(&self) -> Self::Todos {
        PgTodoRepository
    }

    fn users(&self) -> Self::Users {
        PgUserRepository
    }

    async fn read(&self) -> Result<PgContext, DatabaseError> {
        Ok(PgContext::Pooled(self.pool.acquire().await?))
    }

    async fn begin(&self) -> Result<PgContext, DatabaseError> {
        Ok(PgContext::Transaction(self.pool.begin().await?))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
