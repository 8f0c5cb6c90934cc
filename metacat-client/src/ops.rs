//! Typed operations on assets.
//!
//! Most mutations read the current asset first and then save a trimmed copy
//! carrying only the change. The read and the write are separate requests:
//! a concurrent writer between the two wins or loses by arrival order.

use async_trait::async_trait;
use metacat_model::{AnyAsset, Asset, AssetKind, EntityMutationResponse, Reference, Tag};
use metacat_types::{AnnouncementType, CertificateStatus, DeleteType, EntityStatus, Guid, SaveSemantic};
use tracing::{debug, info};

use crate::api::{CatalogApi, RetrieveOptions, SaveOptions};
use crate::error::ClientResult;
use crate::search::{FluentSearch, fields};

/// Typed asset operations, available on every [`CatalogApi`].
#[async_trait]
pub trait AssetOperations: CatalogApi {
    async fn get_by_guid<A: AssetKind>(&self, guid: &Guid) -> ClientResult<Asset<A>> {
        let found = self.get_entity_by_guid(guid, RetrieveOptions::default()).await?;
        Ok(Asset::from_entity(found.entity)?)
    }

    async fn get_by_qualified_name<A: AssetKind>(&self, qualified_name: &str) -> ClientResult<Asset<A>> {
        let found = self
            .get_entity_by_qualified_name(A::TYPE_NAME, qualified_name, RetrieveOptions::default())
            .await?;
        Ok(Asset::from_entity(found.entity)?)
    }

    /// Creates or updates one asset. Tags are left as they are on the
    /// server; use the tag operations to change them.
    async fn save_asset<A: AssetKind>(&self, asset: &Asset<A>) -> ClientResult<EntityMutationResponse> {
        asset.validate_required()?;
        let mut entity = asset.to_entity()?;
        entity.classifications = None;
        self.save_entities(vec![entity], SaveOptions::default()).await
    }

    /// Saves assets of mixed kinds in one request.
    async fn save_all(&self, assets: &[AnyAsset]) -> ClientResult<EntityMutationResponse> {
        let mut entities = Vec::with_capacity(assets.len());
        for asset in assets {
            validate_any(asset)?;
            let mut entity = asset.to_entity()?;
            entity.classifications = None;
            entities.push(entity);
        }
        self.save_entities(entities, SaveOptions::default()).await
    }

    /// Archives the asset. It stays retrievable and can be restored.
    async fn soft_delete(&self, guid: &Guid) -> ClientResult<EntityMutationResponse> {
        self.delete_entities(std::slice::from_ref(guid), DeleteType::Soft).await
    }

    /// Deletes the asset permanently.
    async fn purge(&self, guid: &Guid) -> ClientResult<EntityMutationResponse> {
        self.delete_entities(std::slice::from_ref(guid), DeleteType::Purge).await
    }

    /// Reactivates an archived asset. Returns false, without writing, when
    /// the asset is already active.
    async fn restore<A: AssetKind>(&self, qualified_name: &str) -> ClientResult<bool> {
        let existing = self.get_by_qualified_name::<A>(qualified_name).await?;
        if existing.status != Some(EntityStatus::Deleted) {
            debug!(type_name = A::TYPE_NAME, qualified_name, "asset already active");
            return Ok(false);
        }
        let restored = existing.trim_to_required()?.with_status(EntityStatus::Active);
        self.save_entities(vec![restored.to_entity()?], SaveOptions::default())
            .await?;
        info!(type_name = A::TYPE_NAME, qualified_name, "restored asset");
        Ok(true)
    }

    /// Adds tags, keeping those already on the asset.
    async fn add_tags<A: AssetKind>(
        &self,
        qualified_name: &str,
        tag_names: &[&str],
        propagate: bool,
    ) -> ClientResult<EntityMutationResponse> {
        let existing = self.get_by_qualified_name::<A>(qualified_name).await?;
        let mut update = existing.trim_to_required()?;
        update.tags = Some(
            tag_names
                .iter()
                .map(|name| if propagate { Tag::new(*name) } else { Tag::without_propagation(*name) })
                .collect(),
        );
        let options = SaveOptions {
            append_tags: true,
            ..Default::default()
        };
        self.save_entities(vec![update.to_entity()?], options).await
    }

    /// Removes one directly attached tag. Returns `None`, without writing,
    /// when the asset does not carry it.
    async fn remove_tag<A: AssetKind>(
        &self,
        qualified_name: &str,
        tag_name: &str,
    ) -> ClientResult<Option<EntityMutationResponse>> {
        let existing = self.get_by_qualified_name::<A>(qualified_name).await?;
        let mut direct = direct_tags(&existing);
        let before = direct.len();
        direct.retain(|t| t.type_name != tag_name);
        if direct.len() == before {
            debug!(type_name = A::TYPE_NAME, qualified_name, tag_name, "tag not assigned");
            return Ok(None);
        }

        let mut update = existing.trim_to_required()?;
        update.tags = Some(direct);
        let options = SaveOptions {
            replace_tags: true,
            ..Default::default()
        };
        Ok(Some(self.save_entities(vec![update.to_entity()?], options).await?))
    }

    /// Replaces every directly attached tag. An empty list removes them all.
    async fn replace_tags<A: AssetKind>(
        &self,
        qualified_name: &str,
        tag_names: &[&str],
    ) -> ClientResult<EntityMutationResponse> {
        let existing = self.get_by_qualified_name::<A>(qualified_name).await?;
        let mut update = existing.trim_to_required()?;
        update.tags = Some(tag_names.iter().map(|name| Tag::new(*name)).collect());
        let options = SaveOptions {
            replace_tags: true,
            ..Default::default()
        };
        self.save_entities(vec![update.to_entity()?], options).await
    }

    /// Links terms to the asset, keeping existing ones.
    async fn append_terms<A: AssetKind>(
        &self,
        qualified_name: &str,
        terms: Vec<Reference>,
    ) -> ClientResult<EntityMutationResponse> {
        let existing = self.get_by_qualified_name::<A>(qualified_name).await?;
        let mut update = existing.trim_to_required()?;
        update.assign_terms(SaveSemantic::Append, terms);
        self.save_asset(&update).await
    }

    /// Replaces the asset's terms. An empty list removes them all.
    async fn replace_terms<A: AssetKind>(
        &self,
        asset: &Asset<A>,
        terms: Vec<Reference>,
    ) -> ClientResult<EntityMutationResponse> {
        let mut update = asset.trim_to_required()?;
        update.assign_terms(SaveSemantic::Replace, terms);
        self.save_asset(&update).await
    }

    /// Unlinks the given terms, leaving the rest.
    async fn remove_terms<A: AssetKind>(
        &self,
        qualified_name: &str,
        terms: Vec<Reference>,
    ) -> ClientResult<EntityMutationResponse> {
        let existing = self.get_by_qualified_name::<A>(qualified_name).await?;
        let mut update = existing.trim_to_required()?;
        update.assign_terms(SaveSemantic::Remove, terms);
        self.save_asset(&update).await
    }

    async fn update_certificate<A: AssetKind>(
        &self,
        asset: &Asset<A>,
        status: CertificateStatus,
        message: Option<String>,
    ) -> ClientResult<EntityMutationResponse> {
        let mut update = asset.trim_to_required()?;
        update.set_certificate(status, message);
        self.save_asset(&update).await
    }

    async fn remove_certificate<A: AssetKind>(&self, asset: &Asset<A>) -> ClientResult<EntityMutationResponse> {
        let mut update = asset.trim_to_required()?;
        update.remove_certificate();
        self.save_asset(&update).await
    }

    async fn update_announcement<A: AssetKind>(
        &self,
        asset: &Asset<A>,
        kind: AnnouncementType,
        title: String,
        message: Option<String>,
    ) -> ClientResult<EntityMutationResponse> {
        let mut update = asset.trim_to_required()?;
        update.set_announcement(kind, title, message);
        self.save_asset(&update).await
    }

    async fn remove_announcement<A: AssetKind>(&self, asset: &Asset<A>) -> ClientResult<EntityMutationResponse> {
        let mut update = asset.trim_to_required()?;
        update.remove_announcement();
        self.save_asset(&update).await
    }

    async fn remove_description<A: AssetKind>(&self, asset: &Asset<A>) -> ClientResult<EntityMutationResponse> {
        let mut update = asset.trim_to_required()?;
        update.remove_description();
        self.save_asset(&update).await
    }

    async fn remove_user_description<A: AssetKind>(&self, asset: &Asset<A>) -> ClientResult<EntityMutationResponse> {
        let mut update = asset.trim_to_required()?;
        update.remove_user_description();
        self.save_asset(&update).await
    }

    async fn remove_owners<A: AssetKind>(&self, asset: &Asset<A>) -> ClientResult<EntityMutationResponse> {
        let mut update = asset.trim_to_required()?;
        update.remove_owners();
        self.save_asset(&update).await
    }

    /// Active assets of kind `A` named exactly `name`.
    async fn find_by_name<A: AssetKind>(&self, name: &str) -> ClientResult<Vec<Asset<A>>> {
        let entities = FluentSearch::for_kind::<A>()
            .where_(fields::NAME.eq(name))
            .all(self)
            .await?;
        let mut assets = Vec::with_capacity(entities.len());
        for entity in entities {
            assets.push(Asset::from_entity(entity)?);
        }
        Ok(assets)
    }

    fn search_kind<A: AssetKind>(&self) -> FluentSearch {
        FluentSearch::for_kind::<A>()
    }
}

impl<T: CatalogApi + ?Sized> AssetOperations for T {}

/// Tags attached to the asset itself, not propagated from elsewhere.
fn direct_tags<A: AssetKind>(asset: &Asset<A>) -> Vec<Tag> {
    let tags = asset.tags.iter().flatten();
    match &asset.guid {
        Some(guid) => tags.filter(|t| !t.is_propagated_to(guid)).cloned().collect(),
        None => tags.cloned().collect(),
    }
}

fn validate_any(asset: &AnyAsset) -> ClientResult<()> {
    macro_rules! check {
        ($($variant:ident),+) => {
            match asset {
                $(AnyAsset::$variant(a) => a.validate_required()?,)+
                AnyAsset::Unknown(_) => {}
            }
        };
    }
    check!(Connection, Database, Schema, Table, View, Column, Glossary, GlossaryTerm, Collection, Folder);
    Ok(())
}
