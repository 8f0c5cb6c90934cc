use metacat_model::{AnyAsset, Asset, AssetKind, Entity, ModelResult};
use serde::{Deserialize, Serialize};

use super::query::{Query, SortItem};

/// Body of an index search call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSearchRequest {
    pub dsl: Dsl,
    /// Extra attributes to return on each result.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
    /// Attributes to return on related entities.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relation_attributes: Vec<String>,
    pub suppress_logs: bool,
    pub show_search_score: bool,
}

impl IndexSearchRequest {
    pub fn new(dsl: Dsl) -> Self {
        Self {
            dsl,
            attributes: Vec::new(),
            relation_attributes: Vec::new(),
            suppress_logs: true,
            show_search_score: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dsl {
    pub from: usize,
    pub size: usize,
    pub query: Query,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortItem>,
    pub track_total_hits: bool,
}

/// One page of index search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSearchResponse {
    /// Total matches across all pages, as estimated by the index.
    #[serde(default)]
    pub approximate_count: u64,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl IndexSearchResponse {
    pub fn assets(&self) -> ModelResult<Vec<AnyAsset>> {
        self.entities.iter().cloned().map(AnyAsset::from_entity).collect()
    }

    /// Converts every result to `A`, failing on the first other type.
    pub fn assets_of<A: AssetKind>(&self) -> ModelResult<Vec<Asset<A>>> {
        self.entities.iter().cloned().map(Asset::from_entity).collect()
    }
}
