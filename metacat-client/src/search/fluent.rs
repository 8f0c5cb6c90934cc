use futures::stream::{self, Stream, TryStreamExt};
use metacat_model::{AssetKind, Entity};
use metacat_types::EntityStatus;

use super::fields;
use super::query::{BoolQuery, Query, SortItem};
use super::request::{Dsl, IndexSearchRequest, IndexSearchResponse};
use crate::api::CatalogApi;
use crate::config::MAX_PAGE_SIZE;
use crate::error::{ClientError, ClientResult};

const DEFAULT_PAGE_SIZE: usize = 100;

/// Builder for index searches.
///
/// Results are limited to active assets unless [`include_archived`] is set.
/// Every request is sorted by GUID last so that paging by offset sees each
/// match exactly once.
///
/// [`include_archived`]: FluentSearch::include_archived
#[derive(Debug, Clone)]
pub struct FluentSearch {
    must: Vec<Query>,
    must_not: Vec<Query>,
    should: Vec<Query>,
    min_somes: u32,
    attributes: Vec<String>,
    relation_attributes: Vec<String>,
    sort: Vec<SortItem>,
    page_size: usize,
    include_archived: bool,
}

impl Default for FluentSearch {
    fn default() -> Self {
        Self {
            must: Vec::new(),
            must_not: Vec::new(),
            should: Vec::new(),
            min_somes: 1,
            attributes: Vec::new(),
            relation_attributes: Vec::new(),
            sort: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            include_archived: false,
        }
    }
}

impl FluentSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assets of kind `A` only.
    pub fn for_kind<A: AssetKind>() -> Self {
        Self::new().where_(fields::TYPE_NAME.eq(A::TYPE_NAME))
    }

    pub fn where_(mut self, query: Query) -> Self {
        self.must.push(query);
        self
    }

    pub fn where_not(mut self, query: Query) -> Self {
        self.must_not.push(query);
        self
    }

    /// Optional condition; see [`FluentSearch::min_somes`].
    pub fn where_some(mut self, query: Query) -> Self {
        self.should.push(query);
        self
    }

    /// How many `where_some` conditions a result has to meet. Defaults to 1.
    pub fn min_somes(mut self, n: u32) -> Self {
        self.min_somes = n;
        self
    }

    pub fn include_on_results(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    pub fn include_on_relations(mut self, attribute: impl Into<String>) -> Self {
        self.relation_attributes.push(attribute.into());
        self
    }

    /// Returns every relationship attribute of kind `A` on each result.
    pub fn include_relationships_of<A: AssetKind>(mut self) -> Self {
        for def in A::schema().all_relationships() {
            if !self.attributes.iter().any(|a| a == def.name) {
                self.attributes.push(def.name.to_string());
            }
        }
        self
    }

    pub fn sort(mut self, item: SortItem) -> Self {
        self.sort.push(item);
        self
    }

    /// Clamped to `1..=1000`.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn include_archived(mut self, include: bool) -> Self {
        self.include_archived = include;
        self
    }

    pub fn query(&self) -> Query {
        let mut filter = self.must.clone();
        if !self.include_archived {
            filter.push(fields::STATE.eq(EntityStatus::Active.as_str()));
        }
        let minimum_should_match = (!self.should.is_empty()).then_some(self.min_somes.max(1));
        Query::Bool(BoolQuery {
            filter,
            should: self.should.clone(),
            must_not: self.must_not.clone(),
            minimum_should_match,
            ..Default::default()
        })
    }

    /// The request for the page starting at offset `from`.
    pub fn to_request(&self, from: usize) -> IndexSearchRequest {
        let mut sort = self.sort.clone();
        if !sort.iter().any(|s| s.field == fields::GUID.name()) {
            sort.push(SortItem::asc(fields::GUID.name()));
        }
        IndexSearchRequest {
            attributes: self.attributes.clone(),
            relation_attributes: self.relation_attributes.clone(),
            ..IndexSearchRequest::new(Dsl {
                from,
                size: self.page_size,
                query: self.query(),
                sort,
                track_total_hits: true,
            })
        }
    }

    /// Number of matching assets.
    pub async fn count<C: CatalogApi + ?Sized>(&self, client: &C) -> ClientResult<u64> {
        let mut request = self.to_request(0);
        request.dsl.size = 1;
        Ok(client.index_search(&request).await?.approximate_count)
    }

    pub async fn page<C: CatalogApi + ?Sized>(&self, client: &C, from: usize) -> ClientResult<IndexSearchResponse> {
        client.index_search(&self.to_request(from)).await
    }

    /// Every match, fetched page by page.
    pub async fn all<C: CatalogApi + ?Sized>(&self, client: &C) -> ClientResult<Vec<Entity>> {
        self.stream(client).try_collect().await
    }

    /// Streams every match, requesting the next page once the current one
    /// is consumed. Stops on a short page or once the reported count is
    /// reached.
    pub fn stream<'a, C: CatalogApi + ?Sized>(
        &'a self,
        client: &'a C,
    ) -> impl Stream<Item = ClientResult<Entity>> + Send + 'a {
        stream::try_unfold(Some(0usize), move |from| async move {
            let Some(from) = from else {
                return Ok::<_, ClientError>(None);
            };
            let response = self.page(client, from).await?;
            let fetched = response.entities.len();
            let next = from + fetched;
            let more = fetched == self.page_size && (next as u64) < response.approximate_count;
            let page = stream::iter(response.entities.into_iter().map(Ok::<Entity, ClientError>));
            Ok(Some((page, more.then_some(next))))
        })
        .try_flatten()
    }
}
