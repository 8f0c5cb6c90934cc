use chrono::{DateTime, Utc};
use metacat_types::{AnnouncementType, CertificateStatus, EntityStatus, Guid, SaveSemantic};
use serde::de::{DeserializeOwned, Deserializer};
use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

use crate::schema::{AssetSchema, Cardinality};
use crate::{Entity, ModelError, ModelResult, Reference, Tag};

/// Implemented by each kind's attribute struct.
///
/// Attribute structs serialize to camelCase maps with `None` fields written
/// as `null`; the base strips those before anything reaches the wire.
pub trait AssetKind:
    Serialize + DeserializeOwned + Default + Clone + fmt::Debug + PartialEq + Send + Sync + 'static
{
    /// Type name of the entity on the server.
    const TYPE_NAME: &'static str;

    fn schema() -> &'static AssetSchema;

    /// The relationship attributes this kind holds, with their current values.
    fn relationships(&self) -> Relationships<'_> {
        Relationships::new()
    }
}

/// Value currently held in one relationship attribute.
#[derive(Debug, Clone, Copy)]
pub enum RelationshipValue<'a> {
    Single(&'a Reference),
    Set(&'a [Reference]),
}

/// Relationship attributes of an asset, by wire name.
#[derive(Debug, Default)]
pub struct Relationships<'a> {
    entries: Vec<(&'static str, Option<RelationshipValue<'a>>)>,
}

impl<'a> Relationships<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn single(mut self, name: &'static str, value: Option<&'a Reference>) -> Self {
        self.entries.push((name, value.map(RelationshipValue::Single)));
        self
    }

    #[must_use]
    pub fn set(mut self, name: &'static str, value: Option<&'a [Reference]>) -> Self {
        self.entries.push((name, value.map(RelationshipValue::Set)));
        self
    }

    /// Declared attribute names, populated or not.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Populated attributes only.
    pub fn populated(&self) -> impl Iterator<Item = (&'static str, RelationshipValue<'a>)> + '_ {
        self.entries
            .iter()
            .filter_map(|(name, value)| value.map(|v| (*name, v)))
    }
}

/// Attributes shared by every asset kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommonAttributes {
    pub qualified_name: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub user_description: Option<String>,
    pub certificate_status: Option<CertificateStatus>,
    pub certificate_status_message: Option<String>,
    pub certificate_updated_by: Option<String>,
    pub announcement_title: Option<String>,
    pub announcement_message: Option<String>,
    pub announcement_type: Option<AnnouncementType>,
    pub owner_users: Option<Vec<String>>,
    pub owner_groups: Option<Vec<String>>,
    pub connector_name: Option<String>,
    pub connection_qualified_name: Option<String>,
    /// Assigned glossary terms.
    pub meanings: Option<Vec<Reference>>,
}

impl CommonAttributes {
    fn relationships(&self) -> Relationships<'_> {
        Relationships::new().set("meanings", self.meanings.as_deref())
    }
}

/// A typed catalog asset.
///
/// `A` carries the kind-specific attributes; everything the service tracks
/// for all kinds lives on the asset itself or in [`CommonAttributes`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Asset<A> {
    pub guid: Option<Guid>,
    pub status: Option<EntityStatus>,
    pub common: CommonAttributes,
    pub attributes: A,
    /// `None` leaves tags untouched on save; `Some` replaces or appends
    /// depending on the save options.
    pub tags: Option<Vec<Tag>>,
    pub create_time: Option<i64>,
    pub update_time: Option<i64>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    null_fields: BTreeSet<String>,
}

impl<A: AssetKind> Asset<A> {
    /// An asset with only its identifying fields and a placeholder GUID.
    pub fn minimal(qualified_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: Some(Guid::placeholder()),
            common: CommonAttributes {
                qualified_name: Some(qualified_name.into()),
                name: Some(name.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn type_name(&self) -> &'static str {
        A::TYPE_NAME
    }

    pub fn qualified_name(&self) -> Option<&str> {
        self.common.qualified_name.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.common.name.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.create_time.and_then(DateTime::from_timestamp_millis)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.update_time.and_then(DateTime::from_timestamp_millis)
    }

    /// Names of the tags directly or indirectly on this asset.
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags
            .iter()
            .flatten()
            .map(|t| t.type_name.as_str())
            .collect()
    }

    pub fn has_tag(&self, type_name: &str) -> bool {
        self.tag_names().contains(&type_name)
    }

    /// A stub referencing an asset of this kind by GUID.
    pub fn ref_by_guid(guid: Guid, semantic: SaveSemantic) -> Reference {
        Reference::by_guid(A::TYPE_NAME, guid).with_semantic(semantic)
    }

    /// A stub referencing an asset of this kind by qualified name.
    pub fn ref_by_qualified_name(qualified_name: impl Into<String>, semantic: SaveSemantic) -> Reference {
        Reference::by_qualified_name(A::TYPE_NAME, qualified_name).with_semantic(semantic)
    }

    /// Reduces the asset to a reference.
    ///
    /// A server GUID is preferred, then the qualified name. A placeholder
    /// GUID is only meaningful inside the bulk request that creates the
    /// asset, so it is used as a last resort.
    pub fn to_reference(&self, semantic: SaveSemantic) -> ModelResult<Reference> {
        if let Some(guid) = self.guid.as_ref().filter(|g| !g.is_placeholder()) {
            return Ok(Self::ref_by_guid(guid.clone(), semantic));
        }
        if let Some(qn) = self.qualified_name().filter(|qn| !qn.is_empty()) {
            return Ok(Self::ref_by_qualified_name(qn, semantic));
        }
        if let Some(guid) = &self.guid {
            return Ok(Self::ref_by_guid(guid.clone(), semantic));
        }
        Err(ModelError::InvalidReference(format!(
            "{} has neither a GUID nor a qualified name",
            A::TYPE_NAME
        )))
    }

    /// Checks the identifying and required fields are present.
    pub fn validate_required(&self) -> ModelResult<()> {
        if self.qualified_name().is_none_or(str::is_empty) {
            return Err(ModelError::missing(A::TYPE_NAME, "qualifiedName"));
        }
        if self.name().is_none_or(str::is_empty) {
            return Err(ModelError::missing(A::TYPE_NAME, "name"));
        }
        let required = A::schema().required;
        if required.is_empty() {
            return Ok(());
        }
        let attributes = to_object(&self.attributes)?;
        for field in required {
            if attributes.get(*field).is_none_or(Value::is_null) {
                return Err(ModelError::missing(A::TYPE_NAME, field));
            }
        }
        Ok(())
    }

    /// A copy holding only the fields needed for a valid update request.
    pub fn trim_to_required(&self) -> ModelResult<Self> {
        self.validate_required()?;

        let mut attributes = to_object(&self.attributes)?;
        attributes.retain(|key, _| A::schema().required.contains(&key.as_str()));
        // Required relationships are identifying anchors, so they come back
        // with the default REPLACE semantic.
        let trimmed: A = serde_json::from_value(Value::Object(attributes))?;

        Ok(Self {
            guid: Some(self.guid.clone().unwrap_or_else(Guid::placeholder)),
            common: CommonAttributes {
                qualified_name: self.common.qualified_name.clone(),
                name: self.common.name.clone(),
                ..Default::default()
            },
            attributes: trimmed,
            ..Default::default()
        })
    }

    #[must_use]
    pub fn with_status(mut self, status: EntityStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sends `field` as an explicit null on the next save.
    pub fn set_null(&mut self, field: impl Into<String>) {
        self.null_fields.insert(field.into());
    }

    /// Stops sending `field` as null; a value set on it is sent instead.
    pub fn clear_null(&mut self, field: &str) {
        self.null_fields.remove(field);
    }

    pub fn null_fields(&self) -> impl Iterator<Item = &str> {
        self.null_fields.iter().map(String::as_str)
    }

    pub fn set_certificate(&mut self, status: CertificateStatus, message: Option<String>) {
        self.common.certificate_status = Some(status);
        self.common.certificate_status_message = message;
        self.clear_null("certificateStatus");
    }

    pub fn remove_certificate(&mut self) {
        self.common.certificate_status = None;
        self.common.certificate_status_message = None;
        self.set_null("certificateStatus");
        self.set_null("certificateStatusMessage");
    }

    pub fn set_announcement(&mut self, kind: AnnouncementType, title: String, message: Option<String>) {
        self.common.announcement_type = Some(kind);
        self.common.announcement_title = Some(title);
        self.common.announcement_message = message;
        self.clear_null("announcementType");
        self.clear_null("announcementTitle");
    }

    pub fn remove_announcement(&mut self) {
        self.common.announcement_type = None;
        self.common.announcement_title = None;
        self.common.announcement_message = None;
        self.set_null("announcementType");
        self.set_null("announcementTitle");
        self.set_null("announcementMessage");
    }

    pub fn remove_description(&mut self) {
        self.common.description = None;
        self.set_null("description");
    }

    pub fn remove_user_description(&mut self) {
        self.common.user_description = None;
        self.set_null("userDescription");
    }

    pub fn remove_owners(&mut self) {
        self.common.owner_users = None;
        self.common.owner_groups = None;
        self.set_null("ownerUsers");
        self.set_null("ownerGroups");
    }

    /// Assigns glossary terms with the given semantic.
    ///
    /// Replacing with an empty list clears every assigned term.
    pub fn assign_terms(&mut self, semantic: SaveSemantic, terms: Vec<Reference>) {
        if terms.is_empty() {
            self.common.meanings = None;
            if semantic == SaveSemantic::Replace {
                self.set_null("meanings");
            }
            return;
        }
        self.clear_null("meanings");
        self.common.meanings = Some(
            terms
                .into_iter()
                .map(|t| t.with_semantic(semantic))
                .collect(),
        );
    }

    /// Converts to the wire shape, splitting relationships by semantic.
    pub fn to_entity(&self) -> ModelResult<Entity> {
        let mut attributes = to_object(&self.common)?;
        attributes.extend(to_object(&self.attributes)?);
        attributes.retain(|_, v| !v.is_null());

        let mut entity = Entity {
            type_name: A::TYPE_NAME.to_string(),
            guid: self.guid.clone(),
            status: self.status,
            classifications: self.tags.clone(),
            ..Default::default()
        };

        let common = self.common.relationships();
        let specific = self.attributes.relationships();
        for (name, value) in common.populated().chain(specific.populated()) {
            attributes.remove(name);
            write_relationship(&mut entity, name, value)?;
        }

        let schema = A::schema();
        for field in &self.null_fields {
            // A value assigned after the field was cleared wins.
            if attributes.contains_key(field) || entity.has_relationship(field) {
                continue;
            }
            match schema.relationship(field) {
                Some(def) if def.cardinality == Cardinality::Set => {
                    attributes.remove(field);
                    entity
                        .relationship_attributes
                        .insert(field.clone(), Value::Array(Vec::new()));
                }
                Some(_) => {
                    attributes.remove(field);
                    entity.relationship_attributes.insert(field.clone(), Value::Null);
                }
                None => {
                    attributes.insert(field.clone(), Value::Null);
                }
            }
        }

        entity.attributes = attributes;
        Ok(entity)
    }

    /// Converts from the wire shape, checking the type name.
    pub fn from_entity(entity: Entity) -> ModelResult<Self> {
        if entity.type_name != A::TYPE_NAME {
            return Err(ModelError::TypeMismatch {
                expected: A::TYPE_NAME.to_string(),
                actual: entity.type_name,
            });
        }

        let mut attributes = entity.attributes;
        for (key, value) in entity.relationship_attributes {
            if !value.is_null() {
                attributes.insert(key, value);
            }
        }
        attributes.retain(|_, v| !v.is_null());
        let attributes = Value::Object(attributes);

        Ok(Self {
            guid: entity.guid,
            status: entity.status,
            common: serde_json::from_value(attributes.clone())?,
            attributes: serde_json::from_value(attributes)?,
            tags: entity.classifications,
            create_time: entity.create_time,
            update_time: entity.update_time,
            created_by: entity.created_by,
            updated_by: entity.updated_by,
            null_fields: BTreeSet::new(),
        })
    }
}

impl<A: AssetKind> Serialize for Asset<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_entity()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de, A: AssetKind> Deserialize<'de> for Asset<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entity = Entity::deserialize(deserializer)?;
        Self::from_entity(entity).map_err(serde::de::Error::custom)
    }
}

fn to_object<T: Serialize>(value: &T) -> ModelResult<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(ModelError::Serialization(serde::ser::Error::custom(format!(
            "expected an attribute object, got {other}"
        )))),
    }
}

fn write_relationship(entity: &mut Entity, name: &str, value: RelationshipValue<'_>) -> ModelResult<()> {
    match value {
        RelationshipValue::Single(reference) => {
            reference.validate()?;
            let target = relationship_map(entity, reference.semantic);
            target.insert(name.to_string(), serde_json::to_value(reference)?);
        }
        RelationshipValue::Set(references) => {
            if references.is_empty() {
                entity
                    .relationship_attributes
                    .insert(name.to_string(), Value::Array(Vec::new()));
                return Ok(());
            }
            for semantic in [SaveSemantic::Replace, SaveSemantic::Append, SaveSemantic::Remove] {
                let group = references
                    .iter()
                    .filter(|r| r.semantic == semantic)
                    .map(|r| -> ModelResult<Value> {
                        r.validate()?;
                        Ok(serde_json::to_value(r)?)
                    })
                    .collect::<ModelResult<Vec<_>>>()?;
                if !group.is_empty() {
                    relationship_map(entity, semantic).insert(name.to_string(), Value::Array(group));
                }
            }
        }
    }
    Ok(())
}

fn relationship_map(entity: &mut Entity, semantic: SaveSemantic) -> &mut Map<String, Value> {
    match semantic {
        SaveSemantic::Replace => &mut entity.relationship_attributes,
        SaveSemantic::Append => &mut entity.append_relationship_attributes,
        SaveSemantic::Remove => &mut entity.remove_relationship_attributes,
    }
}
