//! The service seam.
//!
//! [`CatalogApi`] covers the raw entity and search endpoints. The typed
//! layer in [`AssetOperations`](crate::AssetOperations) and the fluent
//! search only ever go through this trait, so any transport (or a test
//! double) can stand in for [`CatalogClient`](crate::CatalogClient).

use async_trait::async_trait;
use metacat_model::{Entity, EntityMutationResponse, EntityWithExtInfo};
use metacat_types::{DeleteType, Guid};

use crate::error::ClientResult;
use crate::search::{IndexSearchRequest, IndexSearchResponse};

/// How much of an entity's surroundings to return on retrieval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetrieveOptions {
    /// Return only minimal details of referred entities.
    pub min_ext_info: bool,
    /// Skip relationship attributes entirely.
    pub ignore_relationships: bool,
}

/// How tags on the saved entities are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Replace the tags on each entity with the ones sent.
    pub replace_tags: bool,
    /// Add the tags sent to those already on each entity.
    pub append_tags: bool,
}

#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn get_entity_by_guid(&self, guid: &Guid, options: RetrieveOptions) -> ClientResult<EntityWithExtInfo>;

    async fn get_entity_by_qualified_name(
        &self,
        type_name: &str,
        qualified_name: &str,
        options: RetrieveOptions,
    ) -> ClientResult<EntityWithExtInfo>;

    /// Creates or updates entities in one request. Entities with a
    /// placeholder GUID are created; the response maps placeholders to the
    /// assigned GUIDs.
    async fn save_entities(&self, entities: Vec<Entity>, options: SaveOptions) -> ClientResult<EntityMutationResponse>;

    async fn delete_entities(&self, guids: &[Guid], delete_type: DeleteType) -> ClientResult<EntityMutationResponse>;

    async fn index_search(&self, request: &IndexSearchRequest) -> ClientResult<IndexSearchResponse>;
}
