// ==========================================
// Container Scan Reconciliation - Repository Errors
// ==========================================
// Tooling: thiserror derive macro
// ==========================================

use thiserror::Error;

/// Repository layer error type
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Business rule errors =====
    /// A decrement would drive `scanned` below zero on a key whose
    /// pre-delta value was already 0. The ledger is unchanged; callers
    /// must be told the undo was not applied.
    #[error("invalid undo: nothing scanned yet for client={client} on {date}")]
    InvalidUndo { date: String, client: String },

    // ===== Database errors =====
    #[error("record not found: {entity} with key={key}")]
    NotFound { entity: String, key: String },

    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database lock acquisition failed: {0}")]
    LockError(String),

    #[error("database transaction failed: {0}")]
    DatabaseTransactionError(String),

    #[error("database query failed: {0}")]
    DatabaseQueryError(String),

    #[error("unique constraint violation: {0}")]
    UniqueConstraintViolation(String),

    // ===== Data quality errors =====
    #[error("field value error (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== Generic =====
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                key: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result type alias
pub type RepositoryResult<T> = Result<T, RepositoryError>;
