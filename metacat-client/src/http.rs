//! REST implementation of [`CatalogApi`].

use async_trait::async_trait;
use metacat_model::{Entity, EntityMutationResponse, EntityWithExtInfo};
use metacat_types::{DeleteType, Guid};
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::api::{CatalogApi, RetrieveOptions, SaveOptions};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::search::{FluentSearch, IndexSearchRequest, IndexSearchResponse};

const ENTITY_GUID_PATH: &str = "/api/meta/entity/guid";
const ENTITY_UNIQUE_PATH: &str = "/api/meta/entity/uniqueAttribute/type";
const ENTITY_BULK_PATH: &str = "/api/meta/entity/bulk";
const INDEX_SEARCH_PATH: &str = "/api/meta/search/indexsearch";

/// Upper bound on a single backoff delay.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// What a 404 on a request means.
enum Lookup<'a> {
    Guid(&'a Guid),
    QualifiedName {
        type_name: &'a str,
        qualified_name: &'a str,
    },
    Other,
}

/// Error body returned by the service.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error_code: Option<String>,
    error_message: Option<String>,
}

/// HTTP client for the catalog service.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    config: Arc<ClientConfig>,
    http: Client,
}

impl CatalogClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Builds a client from `METACAT_*` environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// A search using the configured page size.
    pub fn search(&self) -> FluentSearch {
        FluentSearch::new().page_size(self.config.page_size)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_root())
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.min(16);
        Duration::from_millis(self.config.retry_base_delay_ms.saturating_mul(factor)).min(MAX_BACKOFF)
    }

    /// Sends the request, retrying rate-limited and unavailable responses.
    async fn execute(&self, request: RequestBuilder, lookup: Lookup<'_>) -> ClientResult<Response> {
        let mut attempt = 0;
        loop {
            let mut pending = request
                .try_clone()
                .ok_or_else(|| ClientError::InvalidRequest("request body cannot be replayed".to_string()))?;
            if let Some(token) = &self.config.api_token {
                pending = pending.bearer_auth(token);
            }

            let response = pending.send().await?;
            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            let retry_after = retry_after_secs(&response);
            let retryable = status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE;
            if retryable && attempt < self.config.max_retries {
                let delay = retry_delay(retry_after, self.backoff(attempt));
                attempt += 1;
                warn!(%status, attempt, ?delay, "catalog request throttled, retrying");
                tokio::time::sleep(delay).await;
                continue;
            }

            return Err(self.error_for(response, lookup, retry_after).await);
        }
    }

    async fn error_for(&self, response: Response, lookup: Lookup<'_>, retry_after: Option<u64>) -> ClientError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let message = body.error_message.unwrap_or(text);
        debug!(%status, code = ?body.error_code, "catalog request failed");

        match status {
            StatusCode::NOT_FOUND => match lookup {
                Lookup::Guid(guid) => ClientError::NotFoundByGuid(guid.clone()),
                Lookup::QualifiedName {
                    type_name,
                    qualified_name,
                } => ClientError::NotFoundByQualifiedName {
                    type_name: type_name.to_string(),
                    qualified_name: qualified_name.to_string(),
                },
                Lookup::Other => ClientError::Api {
                    status: status.as_u16(),
                    message,
                },
            },
            StatusCode::BAD_REQUEST => ClientError::InvalidRequest(message),
            StatusCode::UNAUTHORIZED if self.config.api_token.is_none() => ClientError::AuthRequired,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::AuthFailed(message),
            StatusCode::TOO_MANY_REQUESTS => ClientError::RateLimited {
                retry_after_secs: retry_after.unwrap_or(0),
            },
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, lookup: Lookup<'_>) -> ClientResult<T> {
        let response = self.execute(request, lookup).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// `Retry-After` wins over the computed backoff; both are capped.
fn retry_delay(retry_after_secs: Option<u64>, backoff: Duration) -> Duration {
    retry_after_secs
        .map_or(backoff, Duration::from_secs)
        .min(MAX_BACKOFF)
}

fn retry_after_secs(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

fn retrieve_query(options: RetrieveOptions) -> [(&'static str, String); 2] {
    [
        ("minExtInfo", options.min_ext_info.to_string()),
        ("ignoreRelationships", options.ignore_relationships.to_string()),
    ]
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn get_entity_by_guid(&self, guid: &Guid, options: RetrieveOptions) -> ClientResult<EntityWithExtInfo> {
        debug!(%guid, "fetching entity by GUID");
        let url = self.url(&format!("{ENTITY_GUID_PATH}/{}", urlencoding::encode(guid.as_str())));
        let request = self.http.get(url).query(&retrieve_query(options));
        self.fetch(request, Lookup::Guid(guid)).await
    }

    async fn get_entity_by_qualified_name(
        &self,
        type_name: &str,
        qualified_name: &str,
        options: RetrieveOptions,
    ) -> ClientResult<EntityWithExtInfo> {
        debug!(type_name, qualified_name, "fetching entity by qualified name");
        let url = self.url(&format!("{ENTITY_UNIQUE_PATH}/{}", urlencoding::encode(type_name)));
        let request = self
            .http
            .get(url)
            .query(&[("attr:qualifiedName", qualified_name)])
            .query(&retrieve_query(options));
        self.fetch(
            request,
            Lookup::QualifiedName {
                type_name,
                qualified_name,
            },
        )
        .await
    }

    async fn save_entities(&self, entities: Vec<Entity>, options: SaveOptions) -> ClientResult<EntityMutationResponse> {
        if entities.is_empty() {
            return Ok(EntityMutationResponse::default());
        }
        let count = entities.len();
        let request = self
            .http
            .post(self.url(ENTITY_BULK_PATH))
            .query(&[
                ("replaceClassifications", options.replace_tags.to_string()),
                ("appendTags", options.append_tags.to_string()),
            ])
            .json(&serde_json::json!({ "entities": entities }));
        let response: EntityMutationResponse = self.fetch(request, Lookup::Other).await?;
        info!(
            sent = count,
            created = response.created().len(),
            updated = response.updated().count(),
            "saved entities"
        );
        Ok(response)
    }

    async fn delete_entities(&self, guids: &[Guid], delete_type: DeleteType) -> ClientResult<EntityMutationResponse> {
        if guids.is_empty() {
            return Ok(EntityMutationResponse::default());
        }
        let mut query: Vec<(&str, &str)> = guids.iter().map(|g| ("guid", g.as_str())).collect();
        query.push(("deleteType", delete_type.as_str()));
        let request = self.http.delete(self.url(ENTITY_BULK_PATH)).query(&query);
        let response: EntityMutationResponse = self.fetch(request, Lookup::Other).await?;
        info!(
            requested = guids.len(),
            deleted = response.deleted().len(),
            delete_type = delete_type.as_str(),
            "deleted entities"
        );
        Ok(response)
    }

    async fn index_search(&self, request: &IndexSearchRequest) -> ClientResult<IndexSearchResponse> {
        debug!(from = request.dsl.from, size = request.dsl.size, "index search");
        let builder = self.http.post(self.url(INDEX_SEARCH_PATH)).json(request);
        self.fetch(builder, Lookup::Other).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_after_overrides_backoff() {
        let backoff = Duration::from_millis(250);
        assert_eq!(retry_delay(Some(5), backoff), Duration::from_secs(5));
        assert_eq!(retry_delay(Some(0), backoff), Duration::ZERO);
        assert_eq!(retry_delay(None, backoff), backoff);
    }

    #[test]
    fn retry_after_is_capped() {
        assert_eq!(retry_delay(Some(86_400), Duration::from_millis(1)), MAX_BACKOFF);
        assert_eq!(retry_delay(None, Duration::from_secs(120)), MAX_BACKOFF);
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let config = ClientConfig::builder("http://localhost:21000")
            .retry_base_delay(Duration::from_millis(100))
            .build()
            .unwrap();
        let client = CatalogClient::new(config).unwrap();
        assert_eq!(client.backoff(0), Duration::from_millis(100));
        assert_eq!(client.backoff(2), Duration::from_millis(400));
        assert_eq!(client.backoff(20), MAX_BACKOFF);
    }
}
