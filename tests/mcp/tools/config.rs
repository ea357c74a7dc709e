use cropsense::mcp::{
    CropSenseMcpServer,
    types::{GetConfigParams, GetLocalesParams},
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

// ============================================================================
// get_config tests
// ============================================================================

#[tokio::test]
async fn test_get_config_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    let server = CropSenseMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], false);
    assert_eq!(json_result["config"]["messagesRoot"], "./messages");
    assert_eq!(json_result["config"]["defaultLocale"], "en");
    assert_eq!(json_result["config"]["missingTranslation"], "keepOriginal");
    assert_eq!(
        json_result["config"]["suggestEndpoint"],
        "http://127.0.0.1:5000/get_suggestions"
    );
    assert!(json_result["config"]["marketData"].is_null());
}

#[tokio::test]
async fn test_get_config_from_file() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "messagesRoot": "i18n",
            "missingTranslation": "placeholder",
            "marketData": "data/mandi.json"
        }))
        .unwrap();

    let server = CropSenseMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["config"]["messagesRoot"], "i18n");
    assert_eq!(json_result["config"]["missingTranslation"], "placeholder");
    assert_eq!(json_result["config"]["marketData"], "data/mandi.json");
}

#[tokio::test]
async fn test_get_config_invalid_file_is_error() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({ "suggestEndpoint": "ftp://nope" }))
        .unwrap();

    let server = CropSenseMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    assert!(server.get_config(params).await.is_err());
}

// ============================================================================
// get_locales tests
// ============================================================================

#[tokio::test]
async fn test_get_locales_embedded_catalog() {
    let fixture = McpTestFixture::new().unwrap();
    let server = CropSenseMcpServer::new();

    let params = Parameters(GetLocalesParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_locales(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromDir"], false);
    assert_eq!(json_result["defaultLocale"], "en");

    let locales = json_result["locales"].as_array().unwrap();
    assert_eq!(locales.len(), 14);

    let hi = locales.iter().find(|l| l["locale"] == "hi").unwrap();
    assert_eq!(hi["translated"], hi["total"]);
    assert!(hi["missingKeys"].as_array().unwrap().is_empty());

    let ta = locales.iter().find(|l| l["locale"] == "ta").unwrap();
    assert_eq!(ta["keyCount"], 0);
    assert_eq!(ta["translated"], 0);
}

#[tokio::test]
async fn test_get_locales_from_messages_dir() {
    let fixture = McpTestFixture::with_messages(vec![
        ("en", json!({"common": {"submit": "Submit", "cancel": "Cancel"}})),
        ("hi", json!({"common": {"submit": "जमा करें"}})),
    ])
    .unwrap();
    let server = CropSenseMcpServer::new();

    let params = Parameters(GetLocalesParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_locales(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromDir"], true);
    assert_eq!(
        json_result["locales"],
        json!([
            {"locale": "en", "keyCount": 2, "translated": 2, "total": 2, "missingKeys": []},
            {"locale": "hi", "keyCount": 1, "translated": 1, "total": 2, "missingKeys": ["common.cancel"]}
        ])
    );
}
