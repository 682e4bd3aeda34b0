//! Error types for the score ledger.

use thiserror::Error;

/// Errors that can occur in the score history store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Score is outside the 0–100 range the jury produces.
    #[error("score {score} is out of range (expected 0-100)")]
    InvalidScore { score: u32 },

    /// IO error reading or writing the scores file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scores file contains invalid JSON.
    #[error("scores file is corrupt: {0}")]
    Json(#[from] serde_json::Error),

    /// Atomic persist of the scores file failed.
    #[error("failed to persist scores file: {0}")]
    Persist(String),
}

/// Result type for ledger operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
