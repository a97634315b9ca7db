// ==========================================
// Container Scan Reconciliation - Importer Errors
// ==========================================
// Tooling: thiserror derive macro
// ==========================================

use thiserror::Error;

/// Importer layer error type
#[derive(Error, Debug)]
pub enum ImporterError {
    // ===== Staging errors =====
    #[error("upload file not found: {0}")]
    FileNotFound(String),

    #[error("failed to stage upload files: {0}")]
    StagingError(String),

    // ===== Conversion job errors =====
    #[error("failed to spawn conversion command: {0}")]
    SpawnError(String),

    #[error("conversion command failed (status={status}): {stderr}")]
    CommandFailed { status: String, stderr: String },

    /// The command exited successfully but never printed the
    /// @@@DONE:<date> completion marker, so the output date is unknown.
    #[error("conversion produced no completion marker")]
    MissingCompletionMarker,

    // ===== Generic =====
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias
pub type ImporterResult<T> = Result<T, ImporterError>;
