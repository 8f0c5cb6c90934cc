use metacat_types::qualified_name;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{AssetSchema, RelationshipDef};
use crate::{Asset, AssetKind, ModelError, ModelResult, Reference, Relationships};

pub static SCHEMA: AssetSchema = AssetSchema {
    type_name: "Collection",
    super_types: &["Namespace", "Asset", "Referenceable"],
    required: &[],
    relationships: &[RelationshipDef::set("childrenFolders", "Folder")],
};

/// Segments in a collection qualified name: `default/collection/<user>/<id>`.
pub const COLLECTION_SEGMENTS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectionAttributes {
    pub icon: Option<String>,
    pub icon_type: Option<String>,
    pub children_folders: Option<Vec<Reference>>,
}

impl AssetKind for CollectionAttributes {
    const TYPE_NAME: &'static str = "Collection";

    fn schema() -> &'static AssetSchema {
        &SCHEMA
    }

    fn relationships(&self) -> Relationships<'_> {
        Relationships::new().set("childrenFolders", self.children_folders.as_deref())
    }
}

pub type Collection = Asset<CollectionAttributes>;

impl Collection {
    /// Builds a new collection owned by `username`.
    pub fn creator(name: &str, username: &str) -> ModelResult<Self> {
        if username.is_empty() || username.contains(qualified_name::SEPARATOR) {
            return Err(ModelError::InvalidQualifiedName(format!(
                "collection owner {username:?} is not a valid username"
            )));
        }
        let qn = format!(
            "{}/collection/{username}/{}",
            qualified_name::DEFAULT_TENANT,
            Uuid::new_v4()
        );
        let mut collection = Self::minimal(qn, name);
        collection.common.owner_users = Some(vec![username.to_string()]);
        Ok(collection)
    }

    pub fn updater(qualified_name: &str, name: &str) -> Self {
        Self::minimal(qualified_name, name)
    }
}
