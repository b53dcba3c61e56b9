//! Error types for tool dispatch.
//!
//! Every caller-facing failure is one of these kinds; the HTTP adapter
//! maps them to status codes via [`ToolError::http_status`].

use axum::http::StatusCode;
use thiserror::Error;

/// Errors surfaced by tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A required argument is missing or has the wrong type. The operation
    /// was not attempted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The operation name is not in the catalog.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// The GitHub API call failed or returned an error status. Not retried.
    #[error("upstream request failed: {0}")]
    Upstream(String),
    /// Writing the data files failed. The triggering operation fails.
    #[error("persistence failed: {0}")]
    Persistence(String),
}

impl ToolError {
    /// Status code used by the HTTP adapter for this error kind.
    pub fn http_status(&self) -> StatusCode {
        match self {
            ToolError::InvalidRequest(_) | ToolError::UnknownTool(_) => StatusCode::BAD_REQUEST,
            ToolError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ToolError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Shorthand for a missing/mistyped argument error.
    pub fn invalid(message: impl Into<String>) -> Self {
        ToolError::InvalidRequest(message.into())
    }
}
