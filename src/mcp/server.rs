//! The MCP server: tool registry, dispatch, and cache warm-up.
//!
//! `TpServer` owns the shared backend handle and registers the five tools.
//! Routing is handled by the generated tool router, so an unknown tool name
//! is rejected at the protocol level (method not found) and never reaches a
//! tool body.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::tp::EntityApi;

use super::tools;
use super::tools::entity::{CreateEntityParams, GetEntityParams, UpdateEntityParams};
use super::tools::inspect::InspectObjectParams;
use super::tools::search::SearchEntitiesParams;

/// Outcome of the background entity-type cache warm-up.
///
/// Warm-up is fire-and-forget; this state exists so its result is observable
/// (and awaitable in tests) instead of disappearing into a detached task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarmupState {
    Pending,
    Ready { entity_types: usize },
    Failed,
}

/// MCP server over a shared `EntityApi` handle.
///
/// Generic over `A: EntityApi`, so the dispatch layer can be driven by a
/// mock backend in tests. The router is built once at construction and is
/// read-only afterwards; no mutable cross-request state lives here.
pub struct TpServer<A: EntityApi> {
    api: Arc<A>,
    warmup: watch::Receiver<WarmupState>,
    tool_router: ToolRouter<Self>,
}

/// Launch the cache warm-up without blocking the caller. A failure leaves
/// the server fully usable with a cold cache.
fn spawn_warmup<A: EntityApi + 'static>(api: Arc<A>) -> watch::Receiver<WarmupState> {
    let (tx, rx) = watch::channel(WarmupState::Pending);
    tokio::spawn(async move {
        match api.warm_cache().await {
            Ok(count) => {
                debug!(entity_types = count, "entity type cache warmed");
                let _ = tx.send(WarmupState::Ready {
                    entity_types: count,
                });
            }
            Err(e) => {
                warn!(error = %e, "entity type cache warm-up failed, continuing with cold cache");
                let _ = tx.send(WarmupState::Failed);
            }
        }
    });
    rx
}

#[tool_router]
impl<A: EntityApi + 'static> TpServer<A> {
    /// Create the server and start the background cache warm-up.
    ///
    /// Must run inside a tokio runtime; the warm-up task is spawned here and
    /// never awaited by request handling.
    pub fn new(api: Arc<A>) -> Self {
        let warmup = spawn_warmup(Arc::clone(&api));
        Self {
            api,
            warmup,
            tool_router: Self::tool_router(),
        }
    }

    /// Observe the warm-up outcome.
    pub fn warmup_state(&self) -> watch::Receiver<WarmupState> {
        self.warmup.clone()
    }

    /// Get the tool router for this server.
    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    #[tool(
        description = "Search Targetprocess entities of one type with an optional 'where' filter expression. Returns a page of matching entities and the URL of the next page, if any."
    )]
    pub async fn search_entities(
        &self,
        params: Parameters<SearchEntitiesParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::search::search(self.api.as_ref(), params.0).await
    }

    #[tool(
        description = "Get a single Targetprocess entity by type and id, optionally including related entities."
    )]
    pub async fn get_entity(
        &self,
        params: Parameters<GetEntityParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::entity::get(self.api.as_ref(), params.0).await
    }

    #[tool(
        description = "Create a new Targetprocess entity. Requires a name; project, team, and any further fields are optional."
    )]
    pub async fn create_entity(
        &self,
        params: Parameters<CreateEntityParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::entity::create(self.api.as_ref(), params.0).await
    }

    #[tool(
        description = "Update fields of an existing Targetprocess entity. 'fields' maps Targetprocess field names to new values."
    )]
    pub async fn update_entity(
        &self,
        params: Parameters<UpdateEntityParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::entity::update(self.api.as_ref(), params.0).await
    }

    #[tool(
        description = "Inspect the Targetprocess schema: list all entity types, or describe the fields of one type."
    )]
    pub async fn inspect_object(
        &self,
        params: Parameters<InspectObjectParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::inspect::inspect(self.api.as_ref(), params.0).await
    }
}

#[tool_handler]
impl<A: EntityApi + 'static> ServerHandler for TpServer<A> {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.instructions = Some(
            "Targetprocess MCP server - search, read, create and update work items, and inspect the entity schema"
                .to_string(),
        );
        info
    }
}
