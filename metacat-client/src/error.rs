//! Client error types.

use metacat_model::ModelError;
use metacat_types::Guid;
use std::time::Duration;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur talking to the catalog service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no entity with GUID {0}")]
    NotFoundByGuid(Guid),

    #[error("no {type_name} with qualified name {qualified_name:?}")]
    NotFoundByQualifiedName {
        type_name: String,
        qualified_name: String,
    },

    #[error("expected entity of type {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("authentication required")]
    AuthRequired,

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::NotFoundByGuid(_) | ClientError::NotFoundByQualifiedName { .. }
        )
    }

    /// Returns true if this error represents a 429 rate-limit response.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            ClientError::RateLimited { .. } => true,
            ClientError::Api { status, .. } => *status == 429,
            ClientError::Http(e) => e.status().is_some_and(|s| s.as_u16() == 429),
            _ => false,
        }
    }

    /// Returns the retry-after duration if this is a rate-limit error.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ClientError::RateLimited { retry_after_secs } => {
                Some(Duration::from_secs(*retry_after_secs))
            }
            _ => None,
        }
    }
}

impl From<ModelError> for ClientError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::TypeMismatch { expected, actual } => {
                ClientError::TypeMismatch { expected, actual }
            }
            ModelError::Serialization(e) => ClientError::Serialization(e),
            other => ClientError::InvalidRequest(other.to_string()),
        }
    }
}
