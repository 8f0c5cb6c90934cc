use metacat_types::qualified_name;
use serde::{Deserialize, Serialize};

use crate::schema::{AssetSchema, RelationshipDef};
use crate::{Asset, AssetKind, ModelResult, Reference, Relationships};

pub static SCHEMA: AssetSchema = AssetSchema {
    type_name: "Database",
    super_types: super::SQL,
    required: &[],
    relationships: &[RelationshipDef::set("schemas", "Schema")],
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatabaseAttributes {
    pub schema_count: Option<i64>,
    pub schemas: Option<Vec<Reference>>,
}

impl AssetKind for DatabaseAttributes {
    const TYPE_NAME: &'static str = "Database";

    fn schema() -> &'static AssetSchema {
        &SCHEMA
    }

    fn relationships(&self) -> Relationships<'_> {
        Relationships::new().set("schemas", self.schemas.as_deref())
    }
}

pub type Database = Asset<DatabaseAttributes>;

impl Database {
    /// Builds a new database inside the given connection.
    pub fn creator(name: &str, connection_qualified_name: &str) -> ModelResult<Self> {
        qualified_name::require_depth(connection_qualified_name, qualified_name::CONNECTION_SEGMENTS, "connection")?;
        let qn = qualified_name::join(connection_qualified_name, name)?;
        let mut database = Self::minimal(qn, name);
        database.common.connection_qualified_name = Some(connection_qualified_name.to_string());
        database.common.connector_name =
            qualified_name::connector_name(connection_qualified_name).map(str::to_string);
        Ok(database)
    }

    pub fn updater(qualified_name: &str, name: &str) -> Self {
        Self::minimal(qualified_name, name)
    }
}
