use metacat_types::{EntityStatus, Guid};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// A tag (classification) attached to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_guid: Option<Guid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_status: Option<EntityStatus>,
    /// Propagate the tag to downstream and child assets.
    #[serde(default = "default_true")]
    pub propagate: bool,
    #[serde(default = "default_true")]
    pub remove_propagations_on_entity_delete: bool,
    #[serde(default)]
    pub restrict_propagation_through_lineage: bool,
}

impl Tag {
    /// A tag with default propagation settings.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            entity_guid: None,
            entity_status: None,
            propagate: true,
            remove_propagations_on_entity_delete: true,
            restrict_propagation_through_lineage: false,
        }
    }

    /// A tag that stays on the asset it is attached to.
    pub fn without_propagation(type_name: impl Into<String>) -> Self {
        Self {
            propagate: false,
            ..Self::new(type_name)
        }
    }

    /// Returns true if the tag was propagated onto this entity from another.
    pub fn is_propagated_to(&self, guid: &Guid) -> bool {
        self.entity_guid.as_ref().is_some_and(|g| g != guid)
    }
}
