//! Concrete asset kinds.
//!
//! Each module declares the kind's attribute struct, its [`AssetSchema`]
//! and the `creator` / `updater` builders. The kinds follow one template:
//! creators derive the hierarchical qualified name and the denormalized
//! parent fields, updaters produce the minimal payload for an update.
//!
//! [`AssetSchema`]: crate::AssetSchema

pub mod collection;
pub mod column;
pub mod connection;
pub mod database;
pub mod folder;
pub mod glossary;
pub mod glossary_term;
pub mod schema;
pub mod table;
pub mod view;

pub use collection::{Collection, CollectionAttributes};
pub use column::{Column, ColumnAttributes, ColumnParent};
pub use connection::{Connection, ConnectionAttributes};
pub use database::{Database, DatabaseAttributes};
pub use folder::{Folder, FolderAttributes};
pub use glossary::{Glossary, GlossaryAttributes};
pub use glossary_term::{GlossaryTerm, GlossaryTermAttributes};
pub use schema::{Schema, SchemaAttributes};
pub use table::{Table, TableAttributes};
pub use view::{View, ViewAttributes};

/// Ancestors shared by every kind in this module.
pub(crate) const ASSET: &[&str] = &["Asset", "Referenceable"];
/// Ancestors of the relational kinds.
pub(crate) const SQL: &[&str] = &["SQL", "Catalog", "Asset", "Referenceable"];
