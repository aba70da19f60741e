//! Schema inspection tool.

use rmcp::{ErrorData as McpError, model::CallToolResult, schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::tp::EntityApi;

use super::{json_content, require_kind, tool_failure};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct InspectObjectParams {
    #[schemars(
        description = "What to inspect: 'list_types' for all entity types, 'describe' for one type's schema"
    )]
    pub action: String,
    #[serde(rename = "type")]
    #[schemars(description = "Entity type to describe (required for 'describe')")]
    pub entity_type: Option<String>,
}

pub async fn inspect<A: EntityApi>(
    api: &A,
    params: InspectObjectParams,
) -> Result<CallToolResult, McpError> {
    match params.action.as_str() {
        "list_types" => match api.entity_types().await {
            Ok(types) => Ok(json_content(&json!({"entityTypes": types}))),
            Err(e) => Ok(tool_failure(&e)),
        },
        "describe" => {
            let kind = params.entity_type.ok_or_else(|| {
                McpError::invalid_params(
                    "missing_entity_type",
                    Some(json!({"error": "'describe' requires a type"})),
                )
            })?;
            let kind = require_kind(&kind)?;

            match api.describe(kind).await {
                Ok(schema) => Ok(json_content(&schema)),
                Err(e) => Ok(tool_failure(&e)),
            }
        }
        other => Err(McpError::invalid_params(
            "invalid_action",
            Some(json!({"error": format!("unknown action '{other}'"), "expected": ["list_types", "describe"]})),
        )),
    }
}
