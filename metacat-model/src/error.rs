//! Error types for the asset model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while building, validating or converting assets.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A field needed for a valid create/update request is absent.
    #[error("{type_name} is missing required field {field}")]
    MissingField { type_name: String, field: String },

    /// A reference carries neither a GUID nor a qualified name.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("invalid qualified name: {0}")]
    InvalidQualifiedName(String),

    /// The entity resolved to a different type than the one requested.
    #[error("expected entity of type {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Types(metacat_types::Error),
}

impl ModelError {
    pub(crate) fn missing(type_name: &str, field: &str) -> Self {
        Self::MissingField {
            type_name: type_name.to_string(),
            field: field.to_string(),
        }
    }
}

impl From<metacat_types::Error> for ModelError {
    fn from(err: metacat_types::Error) -> Self {
        match err {
            metacat_types::Error::InvalidQualifiedName(msg) => Self::InvalidQualifiedName(msg),
            metacat_types::Error::Serialization(e) => Self::Serialization(e),
            other => Self::Types(other),
        }
    }
}
