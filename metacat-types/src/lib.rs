//! Core type definitions for metacat.
//!
//! This crate defines the identifiers and enumerations every other crate in
//! the workspace speaks:
//! - [`Guid`]: server-assigned entity identifiers and negative placeholders
//! - [`SaveSemantic`]: how a relationship reference is merged server-side
//! - status, delete, certificate and announcement enumerations
//! - [`ConnectorType`]: known source systems and their categories
//! - [`qualified_name`]: helpers for hierarchical qualified-name paths

mod connector;
mod enums;
mod ids;
pub mod qualified_name;

pub use connector::{ConnectorCategory, ConnectorType};
pub use enums::{AnnouncementType, CertificateStatus, DeleteType, EntityStatus, SaveSemantic};
pub use ids::Guid;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid GUID: {0:?}")]
    InvalidGuid(String),

    #[error("invalid qualified name: {0}")]
    InvalidQualifiedName(String),

    #[error("unknown connector type: {0}")]
    UnknownConnector(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
