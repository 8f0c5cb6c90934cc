use serde::{Deserialize, Serialize};

use crate::schema::{AssetSchema, RelationshipDef};
use crate::{Asset, AssetKind, Reference, Relationships};

pub static SCHEMA: AssetSchema = AssetSchema {
    type_name: "Glossary",
    super_types: super::ASSET,
    required: &[],
    relationships: &[RelationshipDef::set("terms", "GlossaryTerm")],
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlossaryAttributes {
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub language: Option<String>,
    pub usage: Option<String>,
    pub terms: Option<Vec<Reference>>,
}

impl AssetKind for GlossaryAttributes {
    const TYPE_NAME: &'static str = "Glossary";

    fn schema() -> &'static AssetSchema {
        &SCHEMA
    }

    fn relationships(&self) -> Relationships<'_> {
        Relationships::new().set("terms", self.terms.as_deref())
    }
}

pub type Glossary = Asset<GlossaryAttributes>;

impl Glossary {
    /// Builds a new glossary. The server assigns the final qualified name;
    /// the name stands in until then.
    pub fn creator(name: &str) -> Self {
        Self::minimal(name, name)
    }

    pub fn updater(qualified_name: &str, name: &str) -> Self {
        Self::minimal(qualified_name, name)
    }
}
