//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Record not found
    #[error("record not found")]
    NotFound,

    /// The requested time slot overlaps an existing booking
    ///
    /// Raised by the booking insert when the in-transaction overlap
    /// re-check finds a conflicting row.
    #[error("time slot overlaps an existing booking")]
    SlotTaken,
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;
