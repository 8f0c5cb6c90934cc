//! Index search: query DSL, typed fields and the fluent builder.

pub mod fields;
mod fluent;
mod query;
mod request;

pub use fluent::FluentSearch;
pub use query::{BoolQuery, Query, RangeQuery, SortItem, SortOrder};
pub use request::{Dsl, IndexSearchRequest, IndexSearchResponse};
