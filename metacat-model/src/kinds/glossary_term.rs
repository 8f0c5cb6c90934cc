use metacat_types::{Guid, SaveSemantic};
use serde::{Deserialize, Serialize};

use crate::schema::{AssetSchema, RelationshipDef};
use crate::{Asset, AssetKind, ModelError, ModelResult, Reference, Relationships};

pub static SCHEMA: AssetSchema = AssetSchema {
    type_name: "GlossaryTerm",
    super_types: super::ASSET,
    required: &["anchor"],
    relationships: &[
        RelationshipDef::single("anchor", "Glossary"),
        RelationshipDef::set("assignedEntities", "Referenceable"),
        RelationshipDef::set("seeAlso", "GlossaryTerm"),
        RelationshipDef::set("synonyms", "GlossaryTerm"),
    ],
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlossaryTermAttributes {
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub examples: Option<Vec<String>>,
    pub abbreviation: Option<String>,
    pub usage: Option<String>,
    /// The glossary this term lives in.
    pub anchor: Option<Reference>,
    /// Assets this term is assigned to.
    pub assigned_entities: Option<Vec<Reference>>,
    pub see_also: Option<Vec<Reference>>,
    pub synonyms: Option<Vec<Reference>>,
}

impl AssetKind for GlossaryTermAttributes {
    const TYPE_NAME: &'static str = "GlossaryTerm";

    fn schema() -> &'static AssetSchema {
        &SCHEMA
    }

    fn relationships(&self) -> Relationships<'_> {
        Relationships::new()
            .single("anchor", self.anchor.as_ref())
            .set("assignedEntities", self.assigned_entities.as_deref())
            .set("seeAlso", self.see_also.as_deref())
            .set("synonyms", self.synonyms.as_deref())
    }
}

pub type GlossaryTerm = Asset<GlossaryTermAttributes>;

impl GlossaryTerm {
    /// Builds a new term anchored in `glossary`. The server assigns the
    /// final qualified name; the name stands in until then.
    pub fn creator(name: &str, glossary: Reference) -> ModelResult<Self> {
        glossary.validate()?;
        if glossary.type_name != "Glossary" {
            return Err(ModelError::TypeMismatch {
                expected: "Glossary".to_string(),
                actual: glossary.type_name,
            });
        }
        let mut term = Self::minimal(name, name);
        term.attributes.anchor = Some(glossary.with_semantic(SaveSemantic::Replace));
        Ok(term)
    }

    /// Terms can only be updated together with their glossary.
    pub fn updater(qualified_name: &str, name: &str, glossary_guid: Guid) -> Self {
        let mut term = Self::minimal(qualified_name, name);
        term.attributes.anchor = Some(Reference::by_guid("Glossary", glossary_guid));
        term
    }
}
