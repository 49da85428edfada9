//! Centralized error types for orgnet.

use thiserror::Error;

/// Main error type for domain-level operations.
#[derive(Error, Debug)]
pub enum OrgnetError {
    #[error("Unknown entity kind: {0}")]
    UnknownEntityKind(String),

    #[error("Unknown relation type: {0}")]
    UnknownRelationType(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for domain-level operations.
pub type OrgnetResult<T> = Result<T, OrgnetError>;

impl OrgnetError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}
