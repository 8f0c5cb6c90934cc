//! Typed asset model for metacat.
//!
//! Defines the shapes exchanged with the catalog service and the typed layer
//! built on top of them:
//! - [`Entity`]: the generic wire container (type name, GUID, attribute maps)
//! - [`Reference`]: a relationship stub carrying a [`SaveSemantic`]
//! - [`AssetSchema`]: per-kind required fields and relationship metadata
//! - [`Asset`] / [`AssetKind`]: the generic typed base every kind builds on
//! - [`kinds`]: the concrete asset kinds with their creators and updaters
//! - [`AnyAsset`]: dispatch from a wire entity to its typed kind
//!
//! [`SaveSemantic`]: metacat_types::SaveSemantic

mod any;
mod asset;
mod entity;
mod error;
pub mod kinds;
mod reference;
mod schema;
mod tag;

pub use any::AnyAsset;
pub use asset::{Asset, AssetKind, CommonAttributes, RelationshipValue, Relationships};
pub use entity::{Entity, EntityMutationResponse, EntityWithExtInfo, MutatedEntities};
pub use error::{ModelError, ModelResult};
pub use kinds::{
    Collection, Column, ColumnParent, Connection, Database, Folder, Glossary, GlossaryTerm,
    Schema, Table, View,
};
pub use reference::{Reference, ReferenceAttributes, UniqueAttributes};
pub use schema::{AssetSchema, COMMON_RELATIONSHIPS, Cardinality, RelationshipDef, all_schemas, schema_for};
pub use tag::Tag;
