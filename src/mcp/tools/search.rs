//! Entity search tool.

use rmcp::{ErrorData as McpError, model::CallToolResult, schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::tp::{EntityApi, SearchQuery};

use super::{apply_take, json_content, require_kind, tool_failure};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchEntitiesParams {
    #[serde(rename = "type")]
    #[schemars(description = "Entity type to search, e.g. UserStory, Bug, Task, Feature")]
    pub entity_type: String,
    #[serde(rename = "where")]
    #[schemars(
        description = "Targetprocess query expression, e.g. \"EntityState.Name eq 'Open'\". Omit to list all entities of the type."
    )]
    pub filter: Option<String>,
    #[schemars(description = "Related entities to include, e.g. ['Project', 'Team']")]
    pub include: Option<Vec<String>>,
    #[schemars(description = "Maximum number of entities to return (default: 25, max: 250)")]
    pub take: Option<usize>,
    #[schemars(description = "Number of entities to skip (for paging)")]
    pub skip: Option<usize>,
}

pub async fn search<A: EntityApi>(
    api: &A,
    params: SearchEntitiesParams,
) -> Result<CallToolResult, McpError> {
    let kind = require_kind(&params.entity_type)?;

    let query = SearchQuery {
        kind: kind.to_string(),
        filter: params.filter,
        include: params.include.unwrap_or_default(),
        take: apply_take(params.take),
        skip: params.skip,
    };

    match api.search(&query).await {
        Ok(result) => Ok(json_content(&json!({
            "items": result.items,
            "next": result.next,
        }))),
        Err(e) => Ok(tool_failure(&e)),
    }
}
