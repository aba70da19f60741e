//! Domain types exchanged with the Targetprocess REST API.
//!
//! Entity payloads stay as `serde_json::Value`: the set of fields depends on
//! the entity type and on the caller's `include` list, so a fixed struct
//! would only get in the way.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A search request against one entity collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Entity type name, e.g. `UserStory` or `Bug`.
    pub kind: String,
    /// Targetprocess `where` expression, e.g. `EntityState.Name eq 'Open'`.
    pub filter: Option<String>,
    /// Related entities to include in each result item.
    pub include: Vec<String>,
    /// Page size, already clamped by the caller.
    pub take: usize,
    /// Items to skip for paging.
    pub skip: Option<usize>,
}

/// One page of search results.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub items: Vec<Value>,
    /// URL of the next page as reported by the API, if any.
    pub next: Option<String>,
}

/// Entity type metadata from the `/EntityTypes` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTypeInfo {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
