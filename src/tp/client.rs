//! Concrete `EntityApi` implementation over the Targetprocess REST v1 API.

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::config::Config;

use super::{EntityApi, EntityTypeInfo, SearchQuery, SearchResult, TpError, TpResult};

/// Upper bound when fetching the entity-type list.
const ENTITY_TYPES_PAGE: usize = 1000;

/// HTTP client for a single Targetprocess instance.
///
/// Holds the entity-type cache and per-type schema cache. Both are populated
/// lazily; `warm_cache` front-loads the entity-type list at startup, and
/// every read falls back to a live fetch while the cache is cold.
pub struct TpClient {
    base_url: String,
    token: String,
    http: Client,
    types: RwLock<Option<Vec<EntityTypeInfo>>>,
    schemas: DashMap<String, Value>,
}

/// The `Items`/`Next` envelope Targetprocess wraps collection responses in.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(rename = "Items", default)]
    pub items: Vec<T>,
    #[serde(rename = "Next")]
    pub next: Option<String>,
}

/// Build the REST v1 base URL for a configured domain.
///
/// A bare domain gets the `https://` scheme; an explicit scheme is kept so
/// local instances can use plain http.
pub(crate) fn base_url_for(domain: &str) -> String {
    if domain.starts_with("http://") || domain.starts_with("https://") {
        format!("{}/api/v1", domain.trim_end_matches('/'))
    } else {
        format!("https://{domain}/api/v1")
    }
}

/// Collection path for an entity type: `UserStory` -> `UserStories`.
pub(crate) fn collection(kind: &str) -> String {
    if let Some(stem) = kind.strip_suffix('y') {
        format!("{stem}ies")
    } else if kind.ends_with('s') {
        format!("{kind}es")
    } else {
        format!("{kind}s")
    }
}

impl TpClient {
    /// Create a client for the configured instance. No I/O happens here.
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: base_url_for(&config.domain),
            token: config.credentials.token.clone(),
            http: Client::new(),
            types: RwLock::new(None),
            schemas: DashMap::new(),
        }
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_request(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(format!("{}/{}", self.base_url, path))
            .query(&[("access_token", self.token.as_str()), ("format", "json")])
    }

    fn post_request(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}/{}", self.base_url, path))
            .query(&[("access_token", self.token.as_str()), ("format", "json")])
    }

    /// Deserialize a response body, or classify the failure.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> TpResult<T> {
        if response.status().is_success() {
            response.json().await.map_err(|e| TpError::InvalidResponse {
                message: e.to_string(),
            })
        } else {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(TpError::Api { status, message })
        }
    }

    async fn fetch_entity_types(&self) -> TpResult<Vec<EntityTypeInfo>> {
        let response = self
            .get_request("EntityTypes")
            .query(&[("take", ENTITY_TYPES_PAGE)])
            .send()
            .await?;
        let envelope: Envelope<EntityTypeInfo> = Self::handle_response(response).await?;
        Ok(envelope.items)
    }
}

#[async_trait]
impl EntityApi for TpClient {
    async fn search(&self, query: &SearchQuery) -> TpResult<SearchResult> {
        let mut request = self
            .get_request(&collection(&query.kind))
            .query(&[("take", query.take)]);
        if let Some(filter) = &query.filter {
            request = request.query(&[("where", filter.as_str())]);
        }
        if !query.include.is_empty() {
            request = request.query(&[("include", format!("[{}]", query.include.join(",")))]);
        }
        if let Some(skip) = query.skip {
            request = request.query(&[("skip", skip)]);
        }

        let envelope: Envelope<Value> = Self::handle_response(request.send().await?).await?;
        Ok(SearchResult {
            items: envelope.items,
            next: envelope.next,
        })
    }

    async fn get(&self, kind: &str, id: u64, include: &[String]) -> TpResult<Value> {
        let mut request = self.get_request(&format!("{}/{}", collection(kind), id));
        if !include.is_empty() {
            request = request.query(&[("include", format!("[{}]", include.join(",")))]);
        }
        Self::handle_response(request.send().await?).await
    }

    async fn create(&self, kind: &str, body: &Value) -> TpResult<Value> {
        let response = self
            .post_request(&collection(kind))
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn update(&self, kind: &str, id: u64, body: &Value) -> TpResult<Value> {
        let response = self
            .post_request(&format!("{}/{}", collection(kind), id))
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn entity_types(&self) -> TpResult<Vec<EntityTypeInfo>> {
        if let Some(types) = self.types.read().await.as_ref() {
            return Ok(types.clone());
        }

        // Cold cache: fetch on demand so requests work before (or without)
        // a successful warm-up.
        let fetched = self.fetch_entity_types().await?;
        *self.types.write().await = Some(fetched.clone());
        Ok(fetched)
    }

    async fn describe(&self, kind: &str) -> TpResult<Value> {
        if let Some(schema) = self.schemas.get(kind) {
            return Ok(schema.clone());
        }

        let response = self
            .get_request(&format!("{}/meta", collection(kind)))
            .send()
            .await?;
        let schema: Value = Self::handle_response(response).await?;
        self.schemas.insert(kind.to_string(), schema.clone());
        Ok(schema)
    }

    async fn warm_cache(&self) -> TpResult<usize> {
        let fetched = self.fetch_entity_types().await?;
        let count = fetched.len();
        *self.types.write().await = Some(fetched);
        Ok(count)
    }
}
