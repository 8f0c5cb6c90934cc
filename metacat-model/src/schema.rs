use serde::Serialize;

use crate::kinds;

/// Whether a relationship holds one reference or many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    Single,
    Set,
}

/// A relationship attribute declared on an asset kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelationshipDef {
    /// Attribute name on the wire, also usable in search predicates.
    pub name: &'static str,
    /// Type name of the entity on the other end.
    pub target_type: &'static str,
    pub cardinality: Cardinality,
}

impl RelationshipDef {
    /// Shorthand for a single-valued relationship.
    pub const fn single(name: &'static str, target_type: &'static str) -> Self {
        Self {
            name,
            target_type,
            cardinality: Cardinality::Single,
        }
    }

    /// Shorthand for a set-valued relationship.
    pub const fn set(name: &'static str, target_type: &'static str) -> Self {
        Self {
            name,
            target_type,
            cardinality: Cardinality::Set,
        }
    }
}

/// Relationships every asset kind carries.
pub const COMMON_RELATIONSHIPS: &[RelationshipDef] = &[RelationshipDef::set("meanings", "GlossaryTerm")];

/// Describes an asset kind's contract with the service.
#[derive(Debug, Serialize)]
pub struct AssetSchema {
    pub type_name: &'static str,
    /// Ancestor types, nearest first.
    pub super_types: &'static [&'static str],
    /// Attributes, beyond `qualifiedName` and `name`, that every
    /// create/update request for this kind must carry.
    pub required: &'static [&'static str],
    /// Relationships specific to this kind (see also [`COMMON_RELATIONSHIPS`]).
    pub relationships: &'static [RelationshipDef],
}

impl AssetSchema {
    /// Looks up a relationship by attribute name, including common ones.
    pub fn relationship(&self, name: &str) -> Option<&'static RelationshipDef> {
        self.all_relationships().find(|r| r.name == name)
    }

    /// Kind-specific relationships followed by the common ones.
    pub fn all_relationships(&self) -> impl Iterator<Item = &'static RelationshipDef> {
        self.relationships.iter().chain(COMMON_RELATIONSHIPS.iter())
    }

    /// Returns true if this kind is `type_name` or inherits from it.
    pub fn is_a(&self, type_name: &str) -> bool {
        self.type_name == type_name || self.super_types.contains(&type_name)
    }
}

static ALL_SCHEMAS: [&AssetSchema; 10] = [
    &kinds::connection::SCHEMA,
    &kinds::database::SCHEMA,
    &kinds::schema::SCHEMA,
    &kinds::table::SCHEMA,
    &kinds::view::SCHEMA,
    &kinds::column::SCHEMA,
    &kinds::glossary::SCHEMA,
    &kinds::glossary_term::SCHEMA,
    &kinds::collection::SCHEMA,
    &kinds::folder::SCHEMA,
];

/// Every asset kind known to this crate.
pub fn all_schemas() -> &'static [&'static AssetSchema] {
    &ALL_SCHEMAS
}

/// Finds the schema registered for a type name.
pub fn schema_for(type_name: &str) -> Option<&'static AssetSchema> {
    ALL_SCHEMAS.iter().copied().find(|s| s.type_name == type_name)
}
