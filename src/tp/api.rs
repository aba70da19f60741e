//! The trait seam between the MCP tools and the Targetprocess backend.

use async_trait::async_trait;
use serde_json::Value;

use super::{EntityTypeInfo, SearchQuery, SearchResult, TpResult};

/// Entity operations offered by the backend service handle.
///
/// The MCP server and its tools depend only on this trait, so tests can
/// drive the whole dispatch layer with a mock backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityApi: Send + Sync {
    /// Search entities of one type.
    async fn search(&self, query: &SearchQuery) -> TpResult<SearchResult>;

    /// Fetch a single entity by id.
    async fn get(&self, kind: &str, id: u64, include: &[String]) -> TpResult<Value>;

    /// Create an entity from a field object.
    async fn create(&self, kind: &str, body: &Value) -> TpResult<Value>;

    /// Update fields of an existing entity.
    async fn update(&self, kind: &str, id: u64, body: &Value) -> TpResult<Value>;

    /// List all entity types, served from cache when warm.
    async fn entity_types(&self) -> TpResult<Vec<EntityTypeInfo>>;

    /// Describe one entity type's schema.
    async fn describe(&self, kind: &str) -> TpResult<Value>;

    /// Populate the entity-type cache; returns the number of types cached.
    async fn warm_cache(&self) -> TpResult<usize>;
}
