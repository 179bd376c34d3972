//! Repository Module
//!
//! Persistence access as free async functions over `&SqlitePool`.
//! Multi-table mutations take a `&mut sqlx::Transaction` so the caller
//! controls the commit boundary; everything else takes the pool.

pub mod cart;
pub mod combo;
pub mod dish;
pub mod order;
pub mod user;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Build a `?,?,?` placeholder list for dynamic IN clauses
pub(crate) fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}
