use metacat_types::qualified_name;
use serde::{Deserialize, Serialize};

use crate::schema::{AssetSchema, RelationshipDef};
use crate::{Asset, AssetKind, ModelError, ModelResult, Reference, Relationships};

pub static SCHEMA: AssetSchema = AssetSchema {
    type_name: "Column",
    super_types: super::SQL,
    required: &[],
    relationships: &[
        RelationshipDef::single("table", "Table"),
        RelationshipDef::single("view", "View"),
    ],
};

/// The kind of container a column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnParent {
    Table,
    View,
}

impl ColumnParent {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Table => "Table",
            Self::View => "View",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnAttributes {
    pub data_type: Option<String>,
    /// 1-based position within the parent.
    pub order: Option<i32>,
    pub is_nullable: Option<bool>,
    pub is_primary: Option<bool>,
    pub is_foreign: Option<bool>,
    pub max_length: Option<i64>,
    pub precision: Option<i32>,
    pub numeric_scale: Option<f64>,
    pub table_name: Option<String>,
    pub table_qualified_name: Option<String>,
    pub view_name: Option<String>,
    pub view_qualified_name: Option<String>,
    pub schema_name: Option<String>,
    pub schema_qualified_name: Option<String>,
    pub database_name: Option<String>,
    pub database_qualified_name: Option<String>,
    pub table: Option<Reference>,
    pub view: Option<Reference>,
}

impl AssetKind for ColumnAttributes {
    const TYPE_NAME: &'static str = "Column";

    fn schema() -> &'static AssetSchema {
        &SCHEMA
    }

    fn relationships(&self) -> Relationships<'_> {
        Relationships::new()
            .single("table", self.table.as_ref())
            .single("view", self.view.as_ref())
    }
}

pub type Column = Asset<ColumnAttributes>;

impl Column {
    /// Builds a new column at position `order` (1-based) of a table or view.
    pub fn creator(name: &str, parent: ColumnParent, parent_qualified_name: &str, order: i32) -> ModelResult<Self> {
        qualified_name::require_depth(parent_qualified_name, 6, parent.type_name())?;
        if order < 1 {
            return Err(ModelError::missing("Column", "order"));
        }
        let qn = qualified_name::join(parent_qualified_name, name)?;
        let schema_qn = qualified_name::parent(parent_qualified_name).unwrap_or_default();
        let database_qn = qualified_name::parent(schema_qn).unwrap_or_default();
        let parent_name = qualified_name::last_segment(parent_qualified_name).to_string();
        let parent_ref = Reference::by_qualified_name(parent.type_name(), parent_qualified_name);

        let mut column = Self::minimal(qn, name);
        column.common.connection_qualified_name =
            qualified_name::connection_qualified_name(parent_qualified_name).map(str::to_string);
        column.common.connector_name =
            qualified_name::connector_name(parent_qualified_name).map(str::to_string);
        column.attributes = ColumnAttributes {
            order: Some(order),
            schema_name: Some(qualified_name::last_segment(schema_qn).to_string()),
            schema_qualified_name: Some(schema_qn.to_string()),
            database_name: Some(qualified_name::last_segment(database_qn).to_string()),
            database_qualified_name: Some(database_qn.to_string()),
            ..Default::default()
        };
        match parent {
            ColumnParent::Table => {
                column.attributes.table_name = Some(parent_name);
                column.attributes.table_qualified_name = Some(parent_qualified_name.to_string());
                column.attributes.table = Some(parent_ref);
            }
            ColumnParent::View => {
                column.attributes.view_name = Some(parent_name);
                column.attributes.view_qualified_name = Some(parent_qualified_name.to_string());
                column.attributes.view = Some(parent_ref);
            }
        }
        Ok(column)
    }

    pub fn updater(qualified_name: &str, name: &str) -> Self {
        Self::minimal(qualified_name, name)
    }

    /// The container this column belongs to, if known.
    pub fn parent(&self) -> Option<(ColumnParent, &Reference)> {
        self.attributes
            .table
            .as_ref()
            .map(|t| (ColumnParent::Table, t))
            .or_else(|| self.attributes.view.as_ref().map(|v| (ColumnParent::View, v)))
    }
}
