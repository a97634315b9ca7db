// ==========================================
// Container Scan Reconciliation - API Layer Errors
// ==========================================
// Responsibility: convert repository/engine errors into messages an
// operator can act on. Every outcome at the boundary is a short
// human-readable string plus the machine-readable counters.
// ==========================================

use crate::engine::EngineError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// API layer error type
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed date, empty client, zero delta. Rejected before any
    /// state mutation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The undo was not applied; the ledger is unchanged.
    #[error("undo not applied: {0}")]
    InvalidUndo(String),

    /// Storage failed for this single request; no partial counter
    /// update was persisted. Retrying is NOT idempotent-safe for
    /// increments and can double-count.
    #[error("storage failure: {0}")]
    DatabaseError(String),

    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidUndo { date, client } => ApiError::InvalidUndo(format!(
                "nothing scanned yet for {} on {}",
                client, date
            )),
            RepositoryError::NotFound { entity, key } => {
                ApiError::DatabaseError(format!("{} (key={}) not found", entity, key))
            }
            RepositoryError::DatabaseConnectionError(msg)
            | RepositoryError::LockError(msg)
            | RepositoryError::DatabaseTransactionError(msg)
            | RepositoryError::DatabaseQueryError(msg)
            | RepositoryError::UniqueConstraintViolation(msg) => ApiError::DatabaseError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("field {}: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(msg) => ApiError::InvalidInput(msg),
            EngineError::Repository(repo_err) => repo_err.into(),
        }
    }
}

/// Result type alias
pub type ApiResult<T> = Result<T, ApiError>;
