use metacat_types::qualified_name;
use serde::{Deserialize, Serialize};

use crate::schema::{AssetSchema, RelationshipDef};
use crate::{Asset, AssetKind, ModelResult, Reference, Relationships};

pub static SCHEMA: AssetSchema = AssetSchema {
    type_name: "View",
    super_types: super::SQL,
    required: &[],
    relationships: &[
        RelationshipDef::single("atlanSchema", "Schema"),
        RelationshipDef::set("columns", "Column"),
    ],
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewAttributes {
    pub schema_name: Option<String>,
    pub schema_qualified_name: Option<String>,
    pub database_name: Option<String>,
    pub database_qualified_name: Option<String>,
    pub column_count: Option<i64>,
    /// SQL text of the view.
    pub definition: Option<String>,
    pub atlan_schema: Option<Reference>,
    pub columns: Option<Vec<Reference>>,
}

impl AssetKind for ViewAttributes {
    const TYPE_NAME: &'static str = "View";

    fn schema() -> &'static AssetSchema {
        &SCHEMA
    }

    fn relationships(&self) -> Relationships<'_> {
        Relationships::new()
            .single("atlanSchema", self.atlan_schema.as_ref())
            .set("columns", self.columns.as_deref())
    }
}

pub type View = Asset<ViewAttributes>;

impl View {
    pub fn creator(name: &str, schema_qualified_name: &str) -> ModelResult<Self> {
        qualified_name::require_depth(schema_qualified_name, 5, "schema")?;
        let qn = qualified_name::join(schema_qualified_name, name)?;
        let database_qn = qualified_name::parent(schema_qualified_name).unwrap_or_default();

        let mut view = Self::minimal(qn, name);
        view.common.connection_qualified_name =
            qualified_name::connection_qualified_name(schema_qualified_name).map(str::to_string);
        view.common.connector_name =
            qualified_name::connector_name(schema_qualified_name).map(str::to_string);
        view.attributes = ViewAttributes {
            schema_name: Some(qualified_name::last_segment(schema_qualified_name).to_string()),
            schema_qualified_name: Some(schema_qualified_name.to_string()),
            database_name: Some(qualified_name::last_segment(database_qn).to_string()),
            database_qualified_name: Some(database_qn.to_string()),
            atlan_schema: Some(Reference::by_qualified_name("Schema", schema_qualified_name)),
            ..Default::default()
        };
        Ok(view)
    }

    pub fn updater(qualified_name: &str, name: &str) -> Self {
        Self::minimal(qualified_name, name)
    }
}
