//! Tool implementations.
//!
//! Each module holds the parameter struct and body of one tool group; the
//! server in `crate::mcp::server` owns registration and routing. Shared here
//! is the error normalization: backend failures become error-flagged tool
//! results, while contract violations raise protocol-level errors.

use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::json;

use crate::tp::TpError;

pub mod entity;
pub mod inspect;
pub mod search;

#[cfg(test)]
mod entity_test;

/// Page size used when the caller does not pass `take`.
pub(crate) const DEFAULT_TAKE: usize = 25;

/// Hard cap on page size to keep responses within a usable context size.
pub(crate) const MAX_TAKE: usize = 250;

/// Clamp the requested page size into `1..=MAX_TAKE`.
pub(crate) fn apply_take(take: Option<usize>) -> usize {
    take.unwrap_or(DEFAULT_TAKE).clamp(1, MAX_TAKE)
}

/// Validate an entity type argument. An empty type is a malformed request,
/// not a backend failure, so it raises a protocol error.
pub(crate) fn require_kind(kind: &str) -> Result<&str, McpError> {
    let kind = kind.trim();
    if kind.is_empty() {
        return Err(McpError::invalid_params(
            "invalid_entity_type",
            Some(json!({"error": "entity type must not be empty"})),
        ));
    }
    Ok(kind)
}

/// Successful tool result carrying a pretty-printed JSON payload.
pub(crate) fn json_content(value: &impl Serialize) -> CallToolResult {
    CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).unwrap(),
    )])
}

/// Backend failure as an error-flagged tool result. The request/response
/// cycle itself still succeeds on this path.
pub(crate) fn tool_failure(err: &TpError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(err.to_string())])
}
