use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use super::MemoryContext;
use crate::database::manager::DatabaseError;
use crate::database::models::{NewTodo, Todo};
use crate::database::repository::TodoRepository;
use crate::types::{Order, Sorter, Status};

#[derive(Debug, Default)]
struct TodoTable {
    /// Last id handed out. Never decremented, so ids are not reused.
    last_id: i64,
    /// Kept in ascending id order
    rows: Vec<Todo>,
}

impl TodoTable {
    fn position(&self, id: i64) -> Option<usize> {
        self.rows.binary_search_by_key(&id, |t| t.id).ok()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTodoRepository {
    table: Arc<RwLock<TodoTable>>,
}

impl MemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: i64) -> DatabaseError {
    DatabaseError::NotFound(format!("todo with id {} is not found", id))
}

/// Sort by the requested key and direction, then by ascending id
pub(crate) fn sort_todos(todos: &mut [Todo], sorter: Sorter, order: Order) {
    todos.sort_by(|a, b| {
        let primary = match sorter {
            Sorter::Id => a.id.cmp(&b.id),
            Sorter::Priority => a.priority.cmp(&b.priority),
        };
        let primary = match order {
            Order::Asc => primary,
            Order::Desc => primary.reverse(),
        };
        match primary {
            Ordering::Equal => a.id.cmp(&b.id),
            decided => decided,
        }
    });
}

#[async_trait]
impl TodoRepository for MemoryTodoRepository {
    type Context = MemoryContext;

    async fn create(&self, _cx: &mut MemoryContext, owner: &str, todo: NewTodo) -> Result<i64, DatabaseError> {
        let mut table = self.table.write();
        table.last_id += 1;
        let id = table.last_id;
        table.rows.push(Todo::from_new(id, owner, todo, Utc::now()));
        Ok(id)
    }

    async fn get(&self, _cx: &mut MemoryContext, owner: &str, id: i64) -> Result<Todo, DatabaseError> {
        let table = self.table.read();
        table
            .position(id)
            .map(|i| &table.rows[i])
            .filter(|t| t.user_id == owner)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn list(
        &self,
        _cx: &mut MemoryContext,
        owner: &str,
        sorter: Sorter,
        order: Order,
        include_done: bool,
    ) -> Result<Vec<Todo>, DatabaseError> {
        let mut todos: Vec<Todo> = {
            let table = self.table.read();
            table
                .rows
                .iter()
                .filter(|t| t.user_id == owner)
                .filter(|t| include_done || t.status != Status::Done)
                .cloned()
                .collect()
        };
        sort_todos(&mut todos, sorter, order);
        Ok(todos)
    }

    async fn update(&self, _cx: &mut MemoryContext, todo: &Todo) -> Result<(), DatabaseError> {
        let mut table = self.table.write();
        let index = table
            .position(todo.id)
            .filter(|&i| table.rows[i].user_id == todo.user_id)
            .ok_or_else(|| not_found(todo.id))?;

        let stored = &mut table.rows[index];
        let updated_at = stored.touch(Utc::now());
        *stored = Todo {
            id: stored.id,
            user_id: stored.user_id.clone(),
            created_at: stored.created_at,
            updated_at,
            ..todo.clone()
        };
        Ok(())
    }

    async fn delete(&self, _cx: &mut MemoryContext, id: i64) -> Result<(), DatabaseError> {
        let mut table = self.table.write();
        let index = table.position(id).ok_or_else(|| not_found(id))?;
        table.rows.remove(index);
        Ok(())
    }
}
