//! Error types for backend calls and verdict parsing.
//!
//! Transport-level failures (`MissingApiKey`, `Http`, `Api`) and
//! parse-level failures (`NoJsonPayload`, `MalformedVerdict`) are kept
//! distinct: both abort the whole evaluation, but callers can tell an
//! unreachable backend from one that answered garbage.

use thiserror::Error;

/// Errors that can occur talking to the text-generation backend.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key configured; surfaced before any call is made.
    #[error("ANTHROPIC_API_KEY is not configured")]
    MissingApiKey,

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}: {detail}")]
    Api { status: u16, detail: String },

    /// The backend response carried no text content.
    #[error("no text content in backend response")]
    EmptyResponse,

    /// No JSON object could be found in the backend's text output.
    #[error("no JSON payload found in backend response")]
    NoJsonPayload,

    /// A JSON object was found but does not satisfy the verdict contract.
    #[error("malformed verdict payload from {panelist}: {detail}")]
    MalformedVerdict { panelist: String, detail: String },

    /// A spawned evaluation task failed to join.
    #[error("evaluation task failed: {0}")]
    Join(String),

    /// The evaluation request itself is invalid; no backend call was made.
    #[error(transparent)]
    InvalidRequest(#[from] mockpanel_core::RequestError),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Http(err.to_string())
    }
}

/// Result type for backend operations.
pub type LlmResult<T> = std::result::Result<T, LlmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_verdict_names_the_panelist() {
        let err = LlmError::MalformedVerdict {
            panelist: "Jamie Park".to_string(),
            detail: "confidence out of range".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Jamie Park"));
        assert!(msg.contains("confidence"));
    }
}
