//! Error types for request validation.

use thiserror::Error;

/// Errors raised before any backend call is made.
#[derive(Debug, Error)]
pub enum RequestError {
    /// A required request field is missing or blank.
    #[error("invalid request: field '{field}' is required and must be non-empty")]
    InvalidRequest { field: String },
}
