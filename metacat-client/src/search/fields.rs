//! Typed search fields.
//!
//! Each field knows the index name it is searched under and only offers the
//! predicates its index type supports.

use metacat_model::RelationshipDef;
use serde_json::Value;

use super::query::{Query, RangeQuery};

/// An exact-match (keyword) field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordField {
    name: &'static str,
}

impl KeywordField {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn eq(&self, value: impl Into<String>) -> Query {
        Query::term(self.name, value.into())
    }

    pub fn within<S: Into<String>>(&self, values: impl IntoIterator<Item = S>) -> Query {
        Query::terms(self.name, values.into_iter().map(Into::into).map(Value::String))
    }

    pub fn starts_with(&self, prefix: impl Into<String>) -> Query {
        Query::prefix(self.name, prefix)
    }

    pub fn has_any_value(&self) -> Query {
        Query::exists(self.name)
    }

    /// `*` and `?` wildcards.
    pub fn wildcard(&self, pattern: impl Into<String>) -> Query {
        Query::wildcard(self.name, pattern)
    }
}

/// An analyzed full-text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextField {
    name: &'static str,
}

impl TextField {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn matches(&self, text: impl Into<String>) -> Query {
        Query::matches(self.name, text)
    }
}

/// A numeric or timestamp field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericField {
    name: &'static str,
}

impl NumericField {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn eq(&self, value: impl Into<Value>) -> Query {
        Query::term(self.name, value)
    }

    pub fn gt(&self, value: impl Into<Value>) -> Query {
        self.range(|r| r.gt = Some(value.into()))
    }

    pub fn gte(&self, value: impl Into<Value>) -> Query {
        self.range(|r| r.gte = Some(value.into()))
    }

    pub fn lt(&self, value: impl Into<Value>) -> Query {
        self.range(|r| r.lt = Some(value.into()))
    }

    pub fn lte(&self, value: impl Into<Value>) -> Query {
        self.range(|r| r.lte = Some(value.into()))
    }

    /// Inclusive on both ends.
    pub fn between(&self, low: impl Into<Value>, high: impl Into<Value>) -> Query {
        self.range(|r| {
            r.gte = Some(low.into());
            r.lte = Some(high.into());
        })
    }

    fn range(&self, set: impl FnOnce(&mut RangeQuery)) -> Query {
        let mut range = RangeQuery {
            field: self.name.to_string(),
            ..Default::default()
        };
        set(&mut range);
        Query::Range(range)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanField {
    name: &'static str,
}

impl BooleanField {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn eq(&self, value: bool) -> Query {
        Query::term(self.name, value)
    }
}

/// A relationship attribute. Relationships are only indexed for presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationField {
    name: &'static str,
}

impl RelationField {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub const fn from_def(def: &RelationshipDef) -> Self {
        Self { name: def.name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn has_any(&self) -> Query {
        Query::exists(self.name)
    }
}

// ── Fields every asset carries ──────────────────────────────────

pub const TYPE_NAME: KeywordField = KeywordField::new("__typeName.keyword");
pub const SUPER_TYPE_NAMES: KeywordField = KeywordField::new("__superTypeNames.keyword");
pub const GUID: KeywordField = KeywordField::new("__guid");
/// Entity status (`ACTIVE` / `DELETED`).
pub const STATE: KeywordField = KeywordField::new("__state");
pub const QUALIFIED_NAME: KeywordField = KeywordField::new("qualifiedName");
pub const NAME: KeywordField = KeywordField::new("name.keyword");
pub const NAME_TEXT: TextField = TextField::new("name");
pub const DESCRIPTION: TextField = TextField::new("description");
/// Tags attached directly.
pub const TAGS: KeywordField = KeywordField::new("__traitNames");
pub const PROPAGATED_TAGS: KeywordField = KeywordField::new("__propagatedTraitNames");
/// GUIDs of assigned glossary terms.
pub const ASSIGNED_TERMS: KeywordField = KeywordField::new("__meanings");
pub const CERTIFICATE_STATUS: KeywordField = KeywordField::new("certificateStatus");
pub const OWNER_USERS: KeywordField = KeywordField::new("ownerUsers");
pub const OWNER_GROUPS: KeywordField = KeywordField::new("ownerGroups");
pub const CONNECTOR_NAME: KeywordField = KeywordField::new("connectorName");
pub const CONNECTION_QUALIFIED_NAME: KeywordField = KeywordField::new("connectionQualifiedName");
/// Creation time, epoch milliseconds.
pub const CREATE_TIME: NumericField = NumericField::new("__timestamp");
/// Last update time, epoch milliseconds.
pub const UPDATE_TIME: NumericField = NumericField::new("__modificationTimestamp");

// ── Kind-specific fields ────────────────────────────────────────

pub mod connection {
    use super::{BooleanField, KeywordField};

    pub const CATEGORY: KeywordField = KeywordField::new("category");
    pub const ALLOW_QUERY: BooleanField = BooleanField::new("allowQuery");
}

pub mod table {
    use super::{KeywordField, NumericField, RelationField};

    pub const SCHEMA_QUALIFIED_NAME: KeywordField = KeywordField::new("schemaQualifiedName");
    pub const DATABASE_QUALIFIED_NAME: KeywordField = KeywordField::new("databaseQualifiedName");
    pub const ROW_COUNT: NumericField = NumericField::new("rowCount");
    pub const COLUMN_COUNT: NumericField = NumericField::new("columnCount");
    pub const COLUMNS: RelationField = RelationField::new("columns");
}

pub mod column {
    use super::{BooleanField, KeywordField, NumericField};

    pub const DATA_TYPE: KeywordField = KeywordField::new("dataType");
    pub const ORDER: NumericField = NumericField::new("order");
    pub const IS_NULLABLE: BooleanField = BooleanField::new("isNullable");
    pub const TABLE_QUALIFIED_NAME: KeywordField = KeywordField::new("tableQualifiedName");
    pub const VIEW_QUALIFIED_NAME: KeywordField = KeywordField::new("viewQualifiedName");
}

pub mod glossary_term {
    use super::RelationField;

    pub const ANCHOR: RelationField = RelationField::new("anchor");
    pub const ASSIGNED_ENTITIES: RelationField = RelationField::new("assignedEntities");
}
