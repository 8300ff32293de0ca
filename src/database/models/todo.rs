use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Priority, Status};

/// A stored todo, always owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a todo that has not been stored yet.
/// The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
}

impl Todo {
    /// Build the record a store persists on create
    pub fn from_new(id: i64, user_id: &str, new: NewTodo, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: user_id.to_string(),
            title: new.title,
            description: new.description,
            status: new.status,
            priority: new.priority,
            created_at: now,
            updated_at: now,
        }
    }

    /// Next `updated_at` for a mutation happening at `now`.
    /// Strictly later than the current value even when the clock has not moved.
    pub fn touch(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::nanoseconds(1)
        }
    }
}
