//! Error taxonomy for todo operations.
//!
//! Three kinds of failure reach callers:
//!
//! - **Validation**: the input was rejected (missing title, unknown priority,
//!   malformed or past due date, empty update). Never retried.
//! - **NotFound**: an update or delete referenced an id that does not exist.
//! - **Store**: the underlying SQLite call failed. Reported with the raw
//!   driver message.
//!
//! The HTTP layer maps these to 400, 404 and 500 respectively.

use crate::libs::messages::Message;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("{0}")]
    Validation(String),

    #[error("{}", Message::TodoNotFound)]
    NotFound(i64),

    #[error(transparent)]
    Store(#[from] rusqlite::Error),
}

impl TodoError {
    pub fn validation(msg: Message) -> Self {
        TodoError::Validation(msg.to_string())
    }
}

pub type TodoResult<T> = std::result::Result<T, TodoError>;
