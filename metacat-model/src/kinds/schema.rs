use metacat_types::{SaveSemantic, qualified_name};
use serde::{Deserialize, Serialize};

use crate::schema::{AssetSchema, RelationshipDef};
use crate::{Asset, AssetKind, ModelResult, Reference, Relationships};

pub static SCHEMA: AssetSchema = AssetSchema {
    type_name: "Schema",
    super_types: super::SQL,
    required: &[],
    relationships: &[
        RelationshipDef::single("database", "Database"),
        RelationshipDef::set("tables", "Table"),
        RelationshipDef::set("views", "View"),
    ],
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaAttributes {
    pub database_name: Option<String>,
    pub database_qualified_name: Option<String>,
    pub table_count: Option<i64>,
    pub views_count: Option<i64>,
    pub database: Option<Reference>,
    pub tables: Option<Vec<Reference>>,
    pub views: Option<Vec<Reference>>,
}

impl AssetKind for SchemaAttributes {
    const TYPE_NAME: &'static str = "Schema";

    fn schema() -> &'static AssetSchema {
        &SCHEMA
    }

    fn relationships(&self) -> Relationships<'_> {
        Relationships::new()
            .single("database", self.database.as_ref())
            .set("tables", self.tables.as_deref())
            .set("views", self.views.as_deref())
    }
}

pub type Schema = Asset<SchemaAttributes>;

impl Schema {
    /// Builds a new schema inside the given database.
    pub fn creator(name: &str, database_qualified_name: &str) -> ModelResult<Self> {
        qualified_name::require_depth(database_qualified_name, 4, "database")?;
        let qn = qualified_name::join(database_qualified_name, name)?;
        let connection_qn = qualified_name::connection_qualified_name(database_qualified_name);

        let mut schema = Self::minimal(qn, name);
        schema.common.connection_qualified_name = connection_qn.map(str::to_string);
        schema.common.connector_name =
            qualified_name::connector_name(database_qualified_name).map(str::to_string);
        schema.attributes = SchemaAttributes {
            database_name: Some(qualified_name::last_segment(database_qualified_name).to_string()),
            database_qualified_name: Some(database_qualified_name.to_string()),
            database: Some(Reference::by_qualified_name("Database", database_qualified_name)),
            ..Default::default()
        };
        Ok(schema)
    }

    pub fn updater(qualified_name: &str, name: &str) -> Self {
        Self::minimal(qualified_name, name)
    }

    /// Tables to add to this schema without touching the existing ones.
    pub fn append_tables(&mut self, tables: impl IntoIterator<Item = Reference>) {
        self.attributes
            .tables
            .get_or_insert_with(Vec::new)
            .extend(tables.into_iter().map(|t| t.with_semantic(SaveSemantic::Append)));
    }
}
