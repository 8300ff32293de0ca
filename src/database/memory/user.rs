use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::MemoryContext;
use crate::database::manager::DatabaseError;
use crate::database::models::User;
use crate::database::repository::UserRepository;

#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    type Context = MemoryContext;

    async fn authenticate(&self, _cx: &mut MemoryContext, id: &str, secret: &str) -> Result<bool, DatabaseError> {
        Ok(self
            .users
            .read()
            .get(id)
            .map(|user| user.matches(secret))
            .unwrap_or(false))
    }

    async fn create(&self, _cx: &mut MemoryContext, id: &str, secret: &str) -> Result<(), DatabaseError> {
        let mut users = self.users.write();
        if users.contains_key(id) {
            return Err(DatabaseError::Conflict(format!("user {} already exists", id)));
        }
        users.insert(id.to_string(), User::new(id, secret));
        Ok(())
    }
}
