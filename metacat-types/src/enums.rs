use serde::{Deserialize, Serialize};
use std::fmt;

/// How a relationship reference is merged into the existing relationship
/// on the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaveSemantic {
    /// Replace the whole relationship with the references sent.
    #[default]
    Replace,
    /// Add the references to whatever is already related.
    Append,
    /// Remove the references from the relationship.
    Remove,
}

/// Lifecycle state of an entity on the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityStatus {
    #[default]
    Active,
    /// Soft-deleted (archived); can be restored.
    Deleted,
    Purged,
}

impl EntityStatus {
    /// Wire representation, as used in search filters.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Deleted => "DELETED",
            Self::Purged => "PURGED",
        }
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of deletion requested from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeleteType {
    /// Archive the entity; it stays searchable with `__state = DELETED`.
    Soft,
    Hard,
    /// Remove the entity and its audit history permanently.
    Purge,
}

impl DeleteType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Soft => "SOFT",
            Self::Hard => "HARD",
            Self::Purge => "PURGE",
        }
    }
}

/// Certification level of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateStatus {
    Verified,
    Draft,
    Deprecated,
}

impl CertificateStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "VERIFIED",
            Self::Draft => "DRAFT",
            Self::Deprecated => "DEPRECATED",
        }
    }
}

/// Severity of an announcement banner on an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementType {
    Information,
    Warning,
    Issue,
}
