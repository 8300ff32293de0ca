use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::PgContext;
use crate::database::manager::DatabaseError;
use crate::database::models::{NewTodo, Todo};
use crate::database::repository::TodoRepository;
use crate::types::{Order, Priority, Sorter, Status};

const COLUMNS: &str = "id, user_id, title, description, status, priority, created_at, updated_at";

/// Stateless: the connection comes in with every call
#[derive(Debug, Clone, Copy, Default)]
pub struct PgTodoRepository;

#[derive(Debug, FromRow)]
struct TodoRow {
    id: i64,
    user_id: String,
    title: String,
    description: String,
    status: i32,
    priority: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TodoRow> for Todo {
    type Error = DatabaseError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        let status = Status::from_code(row.status.into())
            .map_err(|e| DatabaseError::InvalidRow(format!("todo {}: {}", row.id, e)))?;
        let priority = Priority::from_code(row.priority.into())
            .map_err(|e| DatabaseError::InvalidRow(format!("todo {}: {}", row.id, e)))?;
        Ok(Todo {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            status,
            priority,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn not_found(id: i64) -> DatabaseError {
    DatabaseError::NotFound(format!("todo with id {} is not found", id))
}

/// Listing query. Both fragments come from closed enums, never from input.
fn list_sql(sorter: Sorter, order: Order) -> String {
    format!(
        "SELECT {} FROM todos WHERE user_id = $1 AND ($2 OR status <> $3) ORDER BY {} {}, id ASC",
        COLUMNS,
        sorter.column(),
        order.to_sql()
    )
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    type Context = PgContext;

    async fn create(&self, cx: &mut PgContext, owner: &str, todo: NewTodo) -> Result<i64, DatabaseError> {
        let now = Utc::now();
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO todos (user_id, title, description, status, priority, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING id",
        )
        .bind(owner)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.status.code())
        .bind(todo.priority.code())
        .bind(now)
        .fetch_one(cx.conn())
        .await?;

        Ok(id)
    }

    async fn get(&self, cx: &mut PgContext, owner: &str, id: i64) -> Result<Todo, DatabaseError> {
        let sql = format!("SELECT {} FROM todos WHERE id = $1 AND user_id = $2", COLUMNS);
        let row = sqlx::query_as::<_, TodoRow>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(cx.conn())
            .await?
            .ok_or_else(|| not_found(id))?;

        Todo::try_from(row)
    }

    async fn list(
        &self,
        cx: &mut PgContext,
        owner: &str,
        sorter: Sorter,
        order: Order,
        include_done: bool,
    ) -> Result<Vec<Todo>, DatabaseError> {
        let rows = sqlx::query_as::<_, TodoRow>(&list_sql(sorter, order))
            .bind(owner)
            .bind(include_done)
            .bind(Status::Done.code())
            .fetch_all(cx.conn())
            .await?;

        rows.into_iter().map(Todo::try_from).collect()
    }

    async fn update(&self, cx: &mut PgContext, todo: &Todo) -> Result<(), DatabaseError> {
        // Timestamps are stored with microsecond precision
        let result = sqlx::query(
            "UPDATE todos
             SET title = $3, description = $4, status = $5, priority = $6,
                 updated_at = GREATEST($7, updated_at + INTERVAL '1 microsecond')
             WHERE id = $1 AND user_id = $2",
        )
        .bind(todo.id)
        .bind(&todo.user_id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.status.code())
        .bind(todo.priority.code())
        .bind(Utc::now())
        .execute(cx.conn())
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(todo.id));
        }
        Ok(())
    }

    async fn delete(&self, cx: &mut PgContext, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(cx.conn())
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
