//! Entity identifiers.
//!
//! The catalog assigns every entity a UUID-formatted GUID. Before an entity
//! has been saved the client refers to it by a placeholder: a negative random
//! number that the server maps to a real GUID in its `guidAssignments`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::{Error, Result};

/// Identifier of an entity, either server-assigned or a pending placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(String);

impl Guid {
    /// Creates a new placeholder GUID (`-` followed by a random positive integer).
    #[must_use]
    pub fn placeholder() -> Self {
        let n: u64 = rand::thread_rng().gen_range(1..=i64::MAX as u64);
        Self(format!("-{n}"))
    }

    /// Wraps a freshly generated v4 UUID. Useful for fixtures and for
    /// services that let clients pre-assign identifiers.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates a GUID from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Parses a GUID from either UUID text or a `-<digits>` placeholder.
    pub fn parse(s: &str) -> Result<Self> {
        if let Some(digits) = s.strip_prefix('-') {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return Ok(Self(s.to_string()));
            }
            return Err(Error::InvalidGuid(s.to_string()));
        }
        Uuid::parse_str(s).map_err(|_| Error::InvalidGuid(s.to_string()))?;
        Ok(Self(s.to_string()))
    }

    /// Returns true if this GUID has not been assigned by the server yet.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.0.starts_with('-')
    }

    /// Returns the GUID text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Guid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for Guid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
