//! Repository Module
//!
//! CRUD and conditional-update operations over the SQLite tables, as free
//! async functions taking `&SqlitePool`. Status preconditions are enforced
//! with compare-and-swap style UPDATEs (`... WHERE id = ? AND status = ?`)
//! so concurrent callers never both win a transition.

// Auth + directories
pub mod book;
pub mod profile;
pub mod shop;
pub mod user;

// Ledgers
pub mod demand;
pub mod order;
pub mod shop_order;
pub mod unlock_payment;

// Notifications
pub mod notification;

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
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
