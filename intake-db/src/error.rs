//! Intake database error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Connection lock poisoned")]
    LockPoisoned,

    #[error("Entity not found: {0}")]
    NotFound(String),
}

pub type DbResult<T> = Result<T, DbError>;
