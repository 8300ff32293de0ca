use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Registered user. The secret is compared verbatim; it is not hashed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: String,
    pub password: String,
}

impl User {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
        }
    }

    pub fn matches(&self, secret: &str) -> bool {
        self.password.as_bytes() == secret.as_bytes()
    }
}
