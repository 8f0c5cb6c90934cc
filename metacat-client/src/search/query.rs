//! The subset of the Elasticsearch query DSL the index search accepts.

use serde::ser::Serializer;
use serde::Serialize;
use serde_json::{Map, Value, json};

/// A search predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Exact match on a keyword field.
    Term { field: String, value: Value },
    /// Exact match against any of several values.
    Terms { field: String, values: Vec<Value> },
    Prefix { field: String, value: String },
    /// The field holds some value.
    Exists { field: String },
    /// Full-text match on an analyzed field.
    Match { field: String, query: String },
    Range(RangeQuery),
    Wildcard { field: String, value: String },
    Bool(BoolQuery),
}

/// Bounds for a range query; unset bounds are open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeQuery {
    pub field: String,
    pub gt: Option<Value>,
    pub gte: Option<Value>,
    pub lt: Option<Value>,
    pub lte: Option<Value>,
}

/// A compound query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    pub must: Vec<Query>,
    /// Like `must`, without affecting scoring.
    pub filter: Vec<Query>,
    pub should: Vec<Query>,
    pub must_not: Vec<Query>,
    pub minimum_should_match: Option<u32>,
}

impl Query {
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Query::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn terms<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Query::Terms {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefix(field: impl Into<String>, value: impl Into<String>) -> Self {
        Query::Prefix {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Query::Exists { field: field.into() }
    }

    pub fn matches(field: impl Into<String>, query: impl Into<String>) -> Self {
        Query::Match {
            field: field.into(),
            query: query.into(),
        }
    }

    pub fn wildcard(field: impl Into<String>, value: impl Into<String>) -> Self {
        Query::Wildcard {
            field: field.into(),
            value: value.into(),
        }
    }

    /// All of `queries` must hold.
    pub fn and(queries: impl IntoIterator<Item = Query>) -> Self {
        Query::Bool(BoolQuery {
            must: queries.into_iter().collect(),
            ..Default::default()
        })
    }

    /// At least one of `queries` must hold.
    pub fn or(queries: impl IntoIterator<Item = Query>) -> Self {
        Query::Bool(BoolQuery {
            should: queries.into_iter().collect(),
            minimum_should_match: Some(1),
            ..Default::default()
        })
    }

    pub fn not(query: Query) -> Self {
        Query::Bool(BoolQuery {
            must_not: vec![query],
            ..Default::default()
        })
    }

    /// The JSON DSL form of this query.
    pub fn to_json(&self) -> Value {
        match self {
            Query::Term { field, value } => json!({ "term": { field.as_str(): value } }),
            Query::Terms { field, values } => json!({ "terms": { field.as_str(): values } }),
            Query::Prefix { field, value } => json!({ "prefix": { field.as_str(): value } }),
            Query::Exists { field } => json!({ "exists": { "field": field } }),
            Query::Match { field, query } => {
                json!({ "match": { field.as_str(): { "query": query } } })
            }
            Query::Wildcard { field, value } => json!({ "wildcard": { field.as_str(): value } }),
            Query::Range(range) => {
                let mut bounds = Map::new();
                for (name, bound) in [
                    ("gt", &range.gt),
                    ("gte", &range.gte),
                    ("lt", &range.lt),
                    ("lte", &range.lte),
                ] {
                    if let Some(value) = bound {
                        bounds.insert(name.to_string(), value.clone());
                    }
                }
                json!({ "range": { range.field.as_str(): bounds } })
            }
            Query::Bool(b) => {
                let mut clauses = Map::new();
                for (name, queries) in [
                    ("must", &b.must),
                    ("filter", &b.filter),
                    ("should", &b.should),
                    ("must_not", &b.must_not),
                ] {
                    if !queries.is_empty() {
                        clauses.insert(
                            name.to_string(),
                            Value::Array(queries.iter().map(Query::to_json).collect()),
                        );
                    }
                }
                if let Some(n) = b.minimum_should_match {
                    clauses.insert("minimum_should_match".to_string(), n.into());
                }
                json!({ "bool": clauses })
            }
        }
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// One sort criterion; serializes as `{ "<field>": { "order": "asc" } }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortItem {
    pub field: String,
    pub order: SortOrder,
}

impl SortItem {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

impl Serialize for SortItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        json!({ self.field.as_str(): { "order": self.order } }).serialize(serializer)
    }
}
