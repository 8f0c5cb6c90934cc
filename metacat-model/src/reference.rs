use metacat_types::{EntityStatus, Guid, SaveSemantic};
use serde::{Deserialize, Serialize};

use crate::{ModelError, ModelResult};

/// Unique attributes identifying an entity without its GUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueAttributes {
    pub qualified_name: String,
}

/// Attributes the server includes on references it returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A stub pointing at another entity through a relationship.
///
/// The `semantic` is client-side only: it decides which relationship map
/// the reference is written into when the owning asset is serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<Guid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_attributes: Option<UniqueAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<ReferenceAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_status: Option<EntityStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_guid: Option<Guid>,
    #[serde(skip)]
    pub semantic: SaveSemantic,
}

impl Reference {
    fn empty(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            guid: None,
            unique_attributes: None,
            attributes: None,
            display_text: None,
            entity_status: None,
            relationship_guid: None,
            semantic: SaveSemantic::Replace,
        }
    }

    pub fn by_guid(type_name: impl Into<String>, guid: Guid) -> Self {
        Self {
            guid: Some(guid),
            ..Self::empty(type_name)
        }
    }

    pub fn by_qualified_name(type_name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            unique_attributes: Some(UniqueAttributes {
                qualified_name: qualified_name.into(),
            }),
            ..Self::empty(type_name)
        }
    }

    #[must_use]
    pub fn with_semantic(mut self, semantic: SaveSemantic) -> Self {
        self.semantic = semantic;
        self
    }

    /// The referenced entity's qualified name, if known.
    pub fn qualified_name(&self) -> Option<&str> {
        self.unique_attributes
            .as_ref()
            .map(|u| u.qualified_name.as_str())
            .or_else(|| self.attributes.as_ref().and_then(|a| a.qualified_name.as_deref()))
            .filter(|qn| !qn.is_empty())
    }

    /// Checks the reference can be resolved by the server.
    pub fn validate(&self) -> ModelResult<()> {
        if self.type_name.is_empty() {
            return Err(ModelError::InvalidReference(
                "reference has no type name".to_string(),
            ));
        }
        if self.guid.is_some() || self.qualified_name().is_some() {
            return Ok(());
        }
        Err(ModelError::InvalidReference(format!(
            "{} reference needs a GUID or a qualified name",
            self.type_name
        )))
    }

    /// Returns true if both references point at the same entity.
    pub fn same_target(&self, other: &Reference) -> bool {
        match (&self.guid, &other.guid) {
            (Some(a), Some(b)) => a == b,
            _ => {
                self.type_name == other.type_name
                    && self.qualified_name().is_some()
                    && self.qualified_name() == other.qualified_name()
            }
        }
    }
}
