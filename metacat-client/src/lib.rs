//! Client for the metacat catalog service.
//!
//! - [`CatalogApi`]: the raw entity and search endpoints
//! - [`CatalogClient`]: the reqwest-backed implementation, with retries
//! - [`AssetOperations`]: typed reads, saves and targeted mutations on top
//!   of any [`CatalogApi`]
//! - [`search`]: query DSL, typed fields and [`FluentSearch`]

mod api;
mod config;
mod error;
mod http;
mod ops;
pub mod search;

pub use api::{CatalogApi, RetrieveOptions, SaveOptions};
pub use config::{ClientConfig, ClientConfigBuilder, MAX_PAGE_SIZE};
pub use error::{ClientError, ClientResult};
pub use http::CatalogClient;
pub use ops::AssetOperations;
pub use search::{FluentSearch, IndexSearchRequest, IndexSearchResponse, Query, SortItem};
