//! Single-entity tools: get, create, update.

use rmcp::{ErrorData as McpError, model::CallToolResult, schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::tp::EntityApi;

use super::{json_content, require_kind, tool_failure};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetEntityParams {
    #[serde(rename = "type")]
    #[schemars(description = "Entity type, e.g. UserStory, Bug, Task")]
    pub entity_type: String,
    #[schemars(description = "Numeric entity id")]
    pub id: u64,
    #[schemars(description = "Related entities to include, e.g. ['Project', 'AssignedUser']")]
    pub include: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateEntityParams {
    #[serde(rename = "type")]
    #[schemars(description = "Entity type to create, e.g. UserStory, Bug, Task")]
    pub entity_type: String,
    #[schemars(description = "Name of the new entity")]
    pub name: String,
    #[schemars(description = "Description text")]
    pub description: Option<String>,
    #[schemars(description = "Id of the project to create the entity in")]
    pub project_id: Option<u64>,
    #[schemars(description = "Id of the team to assign")]
    pub team_id: Option<u64>,
    #[schemars(
        description = "Additional Targetprocess fields as an object, merged into the request body, e.g. {\"EntityState\": {\"Id\": 12}}"
    )]
    pub fields: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateEntityParams {
    #[serde(rename = "type")]
    #[schemars(description = "Entity type, e.g. UserStory, Bug, Task")]
    pub entity_type: String,
    #[schemars(description = "Numeric entity id to update")]
    pub id: u64,
    #[schemars(
        description = "Fields to set, as an object of Targetprocess field names to values, e.g. {\"Name\": \"New title\"}"
    )]
    pub fields: Value,
}

/// Require a JSON object argument; anything else is a malformed request.
fn require_object(fields: &Value) -> Result<&Map<String, Value>, McpError> {
    fields.as_object().ok_or_else(|| {
        McpError::invalid_params(
            "invalid_fields",
            Some(json!({"error": "fields must be a JSON object"})),
        )
    })
}

pub async fn get<A: EntityApi>(
    api: &A,
    params: GetEntityParams,
) -> Result<CallToolResult, McpError> {
    let kind = require_kind(&params.entity_type)?;
    let include = params.include.unwrap_or_default();

    match api.get(kind, params.id, &include).await {
        Ok(entity) => Ok(json_content(&entity)),
        Err(e) => Ok(tool_failure(&e)),
    }
}

pub async fn create<A: EntityApi>(
    api: &A,
    params: CreateEntityParams,
) -> Result<CallToolResult, McpError> {
    let kind = require_kind(&params.entity_type)?;

    let mut body = Map::new();
    body.insert("Name".to_string(), Value::String(params.name));
    if let Some(description) = params.description {
        body.insert("Description".to_string(), Value::String(description));
    }
    if let Some(project_id) = params.project_id {
        body.insert("Project".to_string(), json!({"Id": project_id}));
    }
    if let Some(team_id) = params.team_id {
        body.insert("Team".to_string(), json!({"Id": team_id}));
    }
    if let Some(fields) = &params.fields {
        for (key, value) in require_object(fields)? {
            body.insert(key.clone(), value.clone());
        }
    }

    match api.create(kind, &Value::Object(body)).await {
        Ok(created) => Ok(json_content(&created)),
        Err(e) => Ok(tool_failure(&e)),
    }
}

pub async fn update<A: EntityApi>(
    api: &A,
    params: UpdateEntityParams,
) -> Result<CallToolResult, McpError> {
    let kind = require_kind(&params.entity_type)?;

    let fields = require_object(&params.fields)?;
    if fields.is_empty() {
        return Err(McpError::invalid_params(
            "invalid_fields",
            Some(json!({"error": "fields must contain at least one entry"})),
        ));
    }

    match api.update(kind, params.id, &params.fields).await {
        Ok(updated) => Ok(json_content(&updated)),
        Err(e) => Ok(tool_failure(&e)),
    }
}
