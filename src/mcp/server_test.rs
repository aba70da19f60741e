//! Tests for the MCP server: registry, dispatch, and warm-up lifecycle.

use std::sync::Arc;

use rmcp::ServerHandler;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{Value, json};

use crate::mcp::server::{TpServer, WarmupState};
use crate::mcp::tools::entity::GetEntityParams;
use crate::tp::TpError;
use crate::tp::api::MockEntityApi;

/// Mock backend whose warm-up succeeds with an empty cache.
fn stub_api() -> MockEntityApi {
    let mut api = MockEntityApi::new();
    api.expect_warm_cache().returning(|| Ok(0));
    api
}

fn content_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    }
}

fn tool_names(server: &TpServer<MockEntityApi>) -> Vec<String> {
    server
        .router()
        .list_all()
        .iter()
        .map(|tool| tool.name.to_string())
        .collect()
}

#[tokio::test]
async fn discovery_lists_exactly_five_tools() {
    let server = TpServer::new(Arc::new(stub_api()));

    let mut names = tool_names(&server);
    names.sort();
    assert_eq!(
        names,
        vec![
            "create_entity",
            "get_entity",
            "inspect_object",
            "search_entities",
            "update_entity",
        ]
    );
}

#[tokio::test]
async fn discovery_order_is_stable_across_calls() {
    let server = TpServer::new(Arc::new(stub_api()));

    let first = tool_names(&server);
    let second = tool_names(&server);
    assert_eq!(first, second);
}

#[tokio::test]
async fn unknown_tool_is_not_in_the_registry() {
    let server = TpServer::new(Arc::new(stub_api()));

    // The generated dispatch rejects any name outside the router with a
    // method-not-found protocol error, never a tool-level error payload.
    assert!(!tool_names(&server).contains(&"delete_entity".to_string()));
}

#[tokio::test]
async fn server_info_advertises_tools() {
    let server = TpServer::new(Arc::new(stub_api()));

    let info = server.get_info();
    assert!(
        info.capabilities.tools.is_some(),
        "Server should support tools"
    );
    assert!(
        info.instructions.is_some(),
        "Server should provide instructions"
    );
}

#[tokio::test]
async fn get_entity_returns_stub_record_unwrapped_once() {
    let record = json!({"Id": 42, "Name": "Fix login", "EntityType": {"Name": "Bug"}});
    let expected = record.clone();

    let mut api = stub_api();
    api.expect_get().returning(move |_, id, _| {
        assert_eq!(id, 42);
        Ok(expected.clone())
    });
    let server = TpServer::new(Arc::new(api));

    let result = server
        .get_entity(Parameters(GetEntityParams {
            entity_type: "Bug".to_string(),
            id: 42,
            include: None,
        }))
        .await
        .expect("dispatch should resolve");

    assert_ne!(result.is_error, Some(true));
    let parsed: Value = serde_json::from_str(content_text(&result)).unwrap();
    assert_eq!(parsed, record);
}

#[tokio::test]
async fn warmup_success_reports_cached_count() {
    let mut api = MockEntityApi::new();
    api.expect_warm_cache().returning(|| Ok(17));
    let server = TpServer::new(Arc::new(api));

    let mut rx = server.warmup_state();
    let state = rx
        .wait_for(|s| *s != WarmupState::Pending)
        .await
        .expect("warm-up task must publish an outcome")
        .clone();
    assert_eq!(state, WarmupState::Ready { entity_types: 17 });
}

#[tokio::test]
async fn warmup_failure_leaves_server_usable() {
    let mut api = MockEntityApi::new();
    api.expect_warm_cache().returning(|| {
        Err(TpError::Api {
            status: 503,
            message: "maintenance".to_string(),
        })
    });
    api.expect_get().returning(|_, _, _| Ok(json!({"Id": 1})));
    let server = TpServer::new(Arc::new(api));

    let mut rx = server.warmup_state();
    let state = rx
        .wait_for(|s| *s != WarmupState::Pending)
        .await
        .expect("warm-up task must publish an outcome")
        .clone();
    assert_eq!(state, WarmupState::Failed);

    // Discovery and dispatch still work with a cold cache.
    assert_eq!(tool_names(&server).len(), 5);
    let result = server
        .get_entity(Parameters(GetEntityParams {
            entity_type: "Bug".to_string(),
            id: 1,
            include: None,
        }))
        .await
        .expect("dispatch should resolve after failed warm-up");
    assert_ne!(result.is_error, Some(true));
}
