use metacat_types::{SaveSemantic, qualified_name};
use serde::{Deserialize, Serialize};

use crate::schema::{AssetSchema, RelationshipDef};
use crate::{Asset, AssetKind, ModelResult, Reference, Relationships};

pub static SCHEMA: AssetSchema = AssetSchema {
    type_name: "Table",
    super_types: super::SQL,
    required: &[],
    relationships: &[
        RelationshipDef::single("atlanSchema", "Schema"),
        RelationshipDef::set("columns", "Column"),
    ],
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableAttributes {
    pub schema_name: Option<String>,
    pub schema_qualified_name: Option<String>,
    pub database_name: Option<String>,
    pub database_qualified_name: Option<String>,
    pub column_count: Option<i64>,
    pub row_count: Option<i64>,
    pub size_bytes: Option<i64>,
    pub is_partitioned: Option<bool>,
    pub partition_count: Option<i64>,
    pub is_temporary: Option<bool>,
    pub atlan_schema: Option<Reference>,
    pub columns: Option<Vec<Reference>>,
}

impl AssetKind for TableAttributes {
    const TYPE_NAME: &'static str = "Table";

    fn schema() -> &'static AssetSchema {
        &SCHEMA
    }

    fn relationships(&self) -> Relationships<'_> {
        Relationships::new()
            .single("atlanSchema", self.atlan_schema.as_ref())
            .set("columns", self.columns.as_deref())
    }
}

pub type Table = Asset<TableAttributes>;

impl Table {
    /// Builds a new table inside the given schema.
    pub fn creator(name: &str, schema_qualified_name: &str) -> ModelResult<Self> {
        qualified_name::require_depth(schema_qualified_name, 5, "schema")?;
        let qn = qualified_name::join(schema_qualified_name, name)?;
        let database_qn = qualified_name::parent(schema_qualified_name).unwrap_or_default();

        let mut table = Self::minimal(qn, name);
        table.common.connection_qualified_name =
            qualified_name::connection_qualified_name(schema_qualified_name).map(str::to_string);
        table.common.connector_name =
            qualified_name::connector_name(schema_qualified_name).map(str::to_string);
        table.attributes = TableAttributes {
            schema_name: Some(qualified_name::last_segment(schema_qualified_name).to_string()),
            schema_qualified_name: Some(schema_qualified_name.to_string()),
            database_name: Some(qualified_name::last_segment(database_qn).to_string()),
            database_qualified_name: Some(database_qn.to_string()),
            atlan_schema: Some(Reference::by_qualified_name("Schema", schema_qualified_name)),
            ..Default::default()
        };
        Ok(table)
    }

    pub fn updater(qualified_name: &str, name: &str) -> Self {
        Self::minimal(qualified_name, name)
    }

    /// Columns to add to this table without touching the existing ones.
    pub fn append_columns(&mut self, columns: impl IntoIterator<Item = Reference>) {
        self.attributes
            .columns
            .get_or_insert_with(Vec::new)
            .extend(columns.into_iter().map(|c| c.with_semantic(SaveSemantic::Append)));
    }

    /// Columns to detach from this table.
    pub fn remove_columns(&mut self, columns: impl IntoIterator<Item = Reference>) {
        self.attributes
            .columns
            .get_or_insert_with(Vec::new)
            .extend(columns.into_iter().map(|c| c.with_semantic(SaveSemantic::Remove)));
    }
}
