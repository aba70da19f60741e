//! Tests for the get/create/update entity tools.

use rmcp::model::{CallToolResult, ErrorCode, RawContent};
use serde_json::{Value, json};

use crate::mcp::tools::entity::{
    CreateEntityParams, GetEntityParams, UpdateEntityParams, create, get, update,
};
use crate::tp::TpError;
use crate::tp::api::MockEntityApi;

fn content_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    }
}

#[tokio::test]
async fn get_returns_record_unwrapped_once() {
    let record = json!({"Id": 42, "Name": "Fix login", "EntityType": {"Name": "Bug"}});
    let expected = record.clone();

    let mut api = MockEntityApi::new();
    api.expect_get().returning(move |kind, id, include| {
        assert_eq!(kind, "Bug");
        assert_eq!(id, 42);
        assert!(include.is_empty());
        Ok(expected.clone())
    });

    let result = get(
        &api,
        GetEntityParams {
            entity_type: "Bug".to_string(),
            id: 42,
            include: None,
        },
    )
    .await
    .expect("get should resolve");

    let parsed: Value = serde_json::from_str(content_text(&result)).unwrap();
    assert_eq!(parsed, record);
}

#[tokio::test]
async fn get_backend_not_found_becomes_error_content() {
    let mut api = MockEntityApi::new();
    api.expect_get().returning(|_, _, _| {
        Err(TpError::Api {
            status: 404,
            message: "Bug 999 not found".to_string(),
        })
    });

    let result = get(
        &api,
        GetEntityParams {
            entity_type: "Bug".to_string(),
            id: 999,
            include: None,
        },
    )
    .await
    .expect("backend failure must not reject the call");

    assert_eq!(result.is_error, Some(true));
    assert!(content_text(&result).contains("Bug 999 not found"));
}

#[tokio::test]
async fn create_builds_targetprocess_body() {
    let mut api = MockEntityApi::new();
    api.expect_create().returning(|kind, body| {
        assert_eq!(kind, "UserStory");
        assert_eq!(body["Name"], "Checkout flow");
        assert_eq!(body["Description"], "As a shopper...");
        assert_eq!(body["Project"]["Id"], 7);
        assert_eq!(body["Priority"]["Id"], 1);
        Ok(json!({"Id": 1001, "Name": "Checkout flow"}))
    });

    let result = create(
        &api,
        CreateEntityParams {
            entity_type: "UserStory".to_string(),
            name: "Checkout flow".to_string(),
            description: Some("As a shopper...".to_string()),
            project_id: Some(7),
            team_id: None,
            fields: Some(json!({"Priority": {"Id": 1}})),
        },
    )
    .await
    .expect("create should resolve");

    let parsed: Value = serde_json::from_str(content_text(&result)).unwrap();
    assert_eq!(parsed["Id"], 1001);
}

#[tokio::test]
async fn create_rejects_non_object_fields() {
    let api = MockEntityApi::new();

    let err = create(
        &api,
        CreateEntityParams {
            entity_type: "Bug".to_string(),
            name: "Broken".to_string(),
            description: None,
            project_id: None,
            team_id: None,
            fields: Some(json!("high")),
        },
    )
    .await
    .expect_err("non-object fields are a contract violation");
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
}

#[tokio::test]
async fn update_passes_fields_verbatim() {
    let mut api = MockEntityApi::new();
    api.expect_update().returning(|kind, id, body| {
        assert_eq!(kind, "Task");
        assert_eq!(id, 314);
        assert_eq!(*body, json!({"Name": "Retitled"}));
        Ok(json!({"Id": 314, "Name": "Retitled"}))
    });

    let result = update(
        &api,
        UpdateEntityParams {
            entity_type: "Task".to_string(),
            id: 314,
            fields: json!({"Name": "Retitled"}),
        },
    )
    .await
    .expect("update should resolve");
    assert_ne!(result.is_error, Some(true));
}

#[tokio::test]
async fn update_rejects_empty_fields() {
    let api = MockEntityApi::new();

    let err = update(
        &api,
        UpdateEntityParams {
            entity_type: "Task".to_string(),
            id: 314,
            fields: json!({}),
        },
    )
    .await
    .expect_err("empty fields are a contract violation");
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
}

#[tokio::test]
async fn update_rejects_non_object_fields() {
    let api = MockEntityApi::new();

    let err = update(
        &api,
        UpdateEntityParams {
            entity_type: "Task".to_string(),
            id: 314,
            fields: json!([1, 2, 3]),
        },
    )
    .await
    .expect_err("non-object fields are a contract violation");
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
}
