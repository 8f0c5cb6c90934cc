use metacat_types::{EntityStatus, Guid};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::Tag;

/// A generic entity as exchanged with the catalog service.
///
/// Typed assets convert to and from this shape. Relationship references are
/// split across three maps according to their save-semantic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<Guid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub relationship_attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub append_relationship_attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub remove_relationship_attributes: Map<String, Value>,
    /// Tags on the entity. `None` leaves tags untouched on save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifications: Option<Vec<Tag>>,
    #[serde(default, skip_serializing)]
    pub classification_names: Vec<String>,
    #[serde(default, skip_serializing)]
    pub meaning_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl Entity {
    /// Creates an empty entity of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// Extract a string attribute.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(|v| v.as_str())
    }

    /// Extract a boolean attribute.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.attributes.get(name).and_then(|v| v.as_bool())
    }

    /// Extract a numeric attribute.
    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.attributes.get(name).and_then(|v| v.as_f64())
    }

    pub fn qualified_name(&self) -> Option<&str> {
        self.get_str("qualifiedName")
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// Returns true if any of the three relationship maps holds `name`.
    pub fn has_relationship(&self, name: &str) -> bool {
        self.relationship_attributes.contains_key(name)
            || self.append_relationship_attributes.contains_key(name)
            || self.remove_relationship_attributes.contains_key(name)
    }
}

/// Response of a single-entity retrieval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityWithExtInfo {
    pub entity: Entity,
    #[serde(default)]
    pub referred_entities: BTreeMap<String, Entity>,
}

/// Entities touched by a mutation, grouped by what happened to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutatedEntities {
    #[serde(rename = "CREATE", default, skip_serializing_if = "Vec::is_empty")]
    pub create: Vec<Entity>,
    #[serde(rename = "UPDATE", default, skip_serializing_if = "Vec::is_empty")]
    pub update: Vec<Entity>,
    #[serde(rename = "PARTIAL_UPDATE", default, skip_serializing_if = "Vec::is_empty")]
    pub partial_update: Vec<Entity>,
    #[serde(rename = "DELETE", default, skip_serializing_if = "Vec::is_empty")]
    pub delete: Vec<Entity>,
}

/// Response of a save or delete call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMutationResponse {
    #[serde(default)]
    pub mutated_entities: MutatedEntities,
    /// Placeholder GUID sent by the client → GUID assigned by the server.
    #[serde(default)]
    pub guid_assignments: BTreeMap<String, String>,
}

impl EntityMutationResponse {
    pub fn created(&self) -> &[Entity] {
        &self.mutated_entities.create
    }

    /// Fully and partially updated entities.
    pub fn updated(&self) -> impl Iterator<Item = &Entity> {
        self.mutated_entities
            .update
            .iter()
            .chain(self.mutated_entities.partial_update.iter())
    }

    pub fn deleted(&self) -> &[Entity] {
        &self.mutated_entities.delete
    }

    /// The server GUID assigned to a placeholder sent in the request.
    pub fn assigned_guid(&self, placeholder: &Guid) -> Option<Guid> {
        self.guid_assignments
            .get(placeholder.as_str())
            .and_then(|g| Guid::parse(g).ok())
    }

    /// Returns true if the server reported no changes at all.
    pub fn is_empty(&self) -> bool {
        let m = &self.mutated_entities;
        m.create.is_empty() && m.update.is_empty() && m.partial_update.is_empty() && m.delete.is_empty()
    }
}
