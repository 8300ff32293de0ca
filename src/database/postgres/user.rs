use async_trait::async_trait;

use super::PgContext;
use crate::database::manager::DatabaseError;
use crate::database::models::User;
use crate::database::repository::UserRepository;

/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone, Copy, Default)]
pub struct PgUserRepository;

#[async_trait]
impl UserRepository for PgUserRepository {
    type Context = PgContext;

    async fn authenticate(&self, cx: &mut PgContext, id: &str, secret: &str) -> Result<bool, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT user_id, password FROM users WHERE user_id = $1")
            .bind(id)
            .fetch_optional(cx.conn())
            .await?;

        Ok(user.map(|u| u.matches(secret)).unwrap_or(false))
    }

    async fn create(&self, cx: &mut PgContext, id: &str, secret: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("INSERT INTO users (user_id, password) VALUES ($1, $2)")
            .bind(id)
            .bind(secret)
            .execute(cx.conn())
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(DatabaseError::Conflict(format!("user {} already exists", id)))
            }
            Err(e) => Err(e.into()),
        }
    }
}
