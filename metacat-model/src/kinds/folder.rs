use metacat_types::qualified_name;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::collection::COLLECTION_SEGMENTS;
use crate::schema::{AssetSchema, RelationshipDef};
use crate::{Asset, AssetKind, ModelError, ModelResult, Reference, Relationships};

pub static SCHEMA: AssetSchema = AssetSchema {
    type_name: "Folder",
    super_types: &["Namespace", "Asset", "Referenceable"],
    required: &["parentQualifiedName", "collectionQualifiedName"],
    relationships: &[
        RelationshipDef::single("parent", "Namespace"),
        RelationshipDef::set("childrenFolders", "Folder"),
    ],
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FolderAttributes {
    pub parent_qualified_name: Option<String>,
    pub collection_qualified_name: Option<String>,
    /// The collection or folder this folder sits in.
    pub parent: Option<Reference>,
    pub children_folders: Option<Vec<Reference>>,
}

impl AssetKind for FolderAttributes {
    const TYPE_NAME: &'static str = "Folder";

    fn schema() -> &'static AssetSchema {
        &SCHEMA
    }

    fn relationships(&self) -> Relationships<'_> {
        Relationships::new()
            .single("parent", self.parent.as_ref())
            .set("childrenFolders", self.children_folders.as_deref())
    }
}

pub type Folder = Asset<FolderAttributes>;

fn collection_of(qn: &str) -> ModelResult<&str> {
    let is_collection_scoped = qualified_name::segment(qn, 0) == Some(qualified_name::DEFAULT_TENANT)
        && qualified_name::segment(qn, 1) == Some("collection");
    qualified_name::prefix(qn, COLLECTION_SEGMENTS)
        .filter(|_| is_collection_scoped)
        .ok_or_else(|| ModelError::InvalidQualifiedName(format!("{qn:?} is not inside a collection")))
}

impl Folder {
    /// Builds a new folder directly in a collection or inside another folder.
    pub fn creator(name: &str, parent_qualified_name: &str) -> ModelResult<Self> {
        qualified_name::require_depth(parent_qualified_name, COLLECTION_SEGMENTS, "parent")?;
        let collection_qn = collection_of(parent_qualified_name)?.to_string();
        let parent_type = if qualified_name::depth(parent_qualified_name) == COLLECTION_SEGMENTS {
            "Collection"
        } else {
            "Folder"
        };
        let qn = qualified_name::join(parent_qualified_name, &Uuid::new_v4().to_string())?;

        let mut folder = Self::minimal(qn, name);
        folder.attributes = FolderAttributes {
            parent_qualified_name: Some(parent_qualified_name.to_string()),
            collection_qualified_name: Some(collection_qn),
            parent: Some(Reference::by_qualified_name(parent_type, parent_qualified_name)),
            ..Default::default()
        };
        Ok(folder)
    }

    /// The parent and collection are derived from the folder's own
    /// qualified name.
    pub fn updater(qualified_name: &str, name: &str) -> ModelResult<Self> {
        qualified_name::require_depth(qualified_name, COLLECTION_SEGMENTS + 1, "folder")?;
        let collection_qn = collection_of(qualified_name)?.to_string();
        let parent_qn = qualified_name::parent(qualified_name)
            .ok_or_else(|| ModelError::InvalidQualifiedName(qualified_name.to_string()))?;

        let mut folder = Self::minimal(qualified_name, name);
        folder.attributes.parent_qualified_name = Some(parent_qn.to_string());
        folder.attributes.collection_qualified_name = Some(collection_qn);
        Ok(folder)
    }
}
