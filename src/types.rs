//! Shared domain types used across the codebase

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to turn raw request input into one of the domain enumerations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("status must be 1 to 4, but {0}")]
    Status(i64),

    #[error("priority must be 1 to 3, but {0}")]
    Priority(i64),

    #[error("sorter must be id or priority, but {0}")]
    Sorter(String),

    #[error("order must be asc or desc, but {0}")]
    Order(String),
}

/// Progress of a todo. Persisted and serialized as its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    NotReady = 1,
    Ready = 2,
    Doing = 3,
    Done = 4,
}

impl Status {
    pub fn from_code(code: i64) -> Result<Self, ParseError> {
        match code {
            1 => Ok(Status::NotReady),
            2 => Ok(Status::Ready),
            3 => Ok(Status::Doing),
            4 => Ok(Status::Done),
            other => Err(ParseError::Status(other)),
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::NotReady => "Not Ready",
            Status::Ready => "Ready",
            Status::Doing => "Doing",
            Status::Done => "Done",
        };
        f.write_str(label)
    }
}

/// Urgency of a todo. Lower ordinal means more urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Priority {
    High = 1,
    #[default]
    Middle = 2,
    Low = 3,
}

impl Priority {
    pub fn from_code(code: i64) -> Result<Self, ParseError> {
        match code {
            1 => Ok(Priority::High),
            2 => Ok(Priority::Middle),
            3 => Ok(Priority::Low),
            other => Err(ParseError::Priority(other)),
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "High",
            Priority::Middle => "Middle",
            Priority::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Field a todo listing is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sorter {
    #[default]
    Id,
    Priority,
}

impl Sorter {
    /// Column name in the `todos` table
    pub fn column(&self) -> &'static str {
        match self {
            Sorter::Id => "id",
            Sorter::Priority => "priority",
        }
    }
}

impl FromStr for Sorter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(Sorter::Id),
            "priority" => Ok(Sorter::Priority),
            _ => Err(ParseError::Sorter(s.to_string())),
        }
    }
}

/// Direction of a todo listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

impl FromStr for Order {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Order::Asc),
            "desc" => Ok(Order::Desc),
            _ => Err(ParseError::Order(s.to_string())),
        }
    }
}
