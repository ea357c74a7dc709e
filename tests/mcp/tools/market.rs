use cropsense::mcp::{
    CropSenseMcpServer,
    types::{ListMarketOptionsParams, PriceSeriesParams, RenderPriceChartParams},
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{McpTestFixture, extract_tool_result_json};

fn options_params(fixture: &McpTestFixture, path: &[&str]) -> Parameters<ListMarketOptionsParams> {
    Parameters(ListMarketOptionsParams {
        project_root_path: fixture.root(),
        path: path.iter().map(|p| p.to_string()).collect(),
    })
}

fn series_params(fixture: &McpTestFixture, keys: [&str; 4]) -> PriceSeriesParams {
    PriceSeriesParams {
        project_root_path: fixture.root(),
        state: keys[0].to_string(),
        district: keys[1].to_string(),
        market: keys[2].to_string(),
        crop: keys[3].to_string(),
    }
}

// ============================================================================
// list_market_options tests
// ============================================================================

#[tokio::test]
async fn test_list_states() {
    let fixture = McpTestFixture::new().unwrap();
    let server = CropSenseMcpServer::new();

    let result = server
        .list_market_options(options_params(&fixture, &[]))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["level"], "state");
    assert_eq!(
        json_result["options"],
        json!(["Uttar Pradesh", "Punjab", "Bihar", "West Bengal"])
    );
}

#[tokio::test]
async fn test_list_crops() {
    let fixture = McpTestFixture::new().unwrap();
    let server = CropSenseMcpServer::new();

    let result = server
        .list_market_options(options_params(
            &fixture,
            &["Uttar Pradesh", "Lucknow", "Hazratganj"],
        ))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["level"], "crop");
    assert_eq!(json_result["options"], json!(["Wheat", "Rice", "Pulses"]));
}

#[tokio::test]
async fn test_list_rejects_unknown_key() {
    let fixture = McpTestFixture::new().unwrap();
    let server = CropSenseMcpServer::new();

    let err = server
        .list_market_options(options_params(&fixture, &["Punjab", "Lucknow"]))
        .await
        .unwrap_err();
    assert!(err.message.contains("'Lucknow' is not a valid district"));
}

#[tokio::test]
async fn test_list_rejects_full_path() {
    let fixture = McpTestFixture::new().unwrap();
    let server = CropSenseMcpServer::new();

    let result = server
        .list_market_options(options_params(
            &fixture,
            &["Punjab", "Amritsar", "Amritsar", "Wheat"],
        ))
        .await;
    assert!(result.is_err());
}

// ============================================================================
// get_price_series tests
// ============================================================================

#[tokio::test]
async fn test_get_price_series() {
    let fixture = McpTestFixture::new().unwrap();
    let server = CropSenseMcpServer::new();

    let result = server
        .get_price_series(Parameters(series_params(
            &fixture,
            ["Uttar Pradesh", "Lucknow", "Hazratganj", "Wheat"],
        )))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    let prices: Vec<u64> = json_result["points"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price"].as_u64().unwrap())
        .collect();
    assert_eq!(prices, vec![2100, 2150, 2170, 2200, 2180, 2220, 2250]);
    assert_eq!(json_result["points"][6]["label"], "Today");
    assert_eq!(json_result["latest"], 2250);
    assert_eq!(json_result["min"], 2100);
    assert_eq!(json_result["max"], 2250);
    assert_eq!(
        json_result["summary"],
        "Latest price for Wheat at Hazratganj, Lucknow, Uttar Pradesh: ₹2,250/qtl"
    );
}

#[tokio::test]
async fn test_get_price_series_not_found() {
    let fixture = McpTestFixture::new().unwrap();
    let server = CropSenseMcpServer::new();

    let result = server
        .get_price_series(Parameters(series_params(
            &fixture,
            ["Nowhere", "X", "Y", "Wheat"],
        )))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_get_price_series_custom_dataset() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_file(
            "data/mandi.json",
            r#"{"Assam": {"Kamrup": {"Guwahati": {
                "crops": ["Tea"],
                "prices": {"Tea": [10, 20, 30, 40, 50, 60, 70]}
            }}}}"#,
        )
        .unwrap();
    fixture
        .write_config(&json!({"marketData": "data/mandi.json"}))
        .unwrap();
    let server = CropSenseMcpServer::new();

    let result = server
        .get_price_series(Parameters(series_params(
            &fixture,
            ["Assam", "Kamrup", "Guwahati", "Tea"],
        )))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["latest"], 70);
}

// ============================================================================
// render_price_chart tests
// ============================================================================

#[tokio::test]
async fn test_render_price_chart_replaces_previous() {
    let fixture = McpTestFixture::new().unwrap();
    let server = CropSenseMcpServer::new();

    let first = server
        .render_price_chart(Parameters(RenderPriceChartParams {
            series: series_params(&fixture, ["Punjab", "Amritsar", "Amritsar", "Maize"]),
            width: Some(4),
        }))
        .await
        .unwrap();
    let first = extract_tool_result_json(&first);
    assert_eq!(first["canvas"], "price-chart");
    assert_eq!(first["title"], "Amritsar - Maize");
    assert_eq!(first["chartsCreated"], 1);

    let second = server
        .render_price_chart(Parameters(RenderPriceChartParams {
            series: series_params(&fixture, ["Uttar Pradesh", "Lucknow", "Hazratganj", "Wheat"]),
            width: Some(4),
        }))
        .await
        .unwrap();
    let second = extract_tool_result_json(&second);
    assert_eq!(second["chartsCreated"], 2);
    assert_eq!(
        second["chart"],
        "Hazratganj - Wheat\n\
         \x20 -6d │█    2,100\n\
         \x20 -5d │██   2,150\n\
         \x20 -4d │██   2,170\n\
         \x20 -3d │███  2,200\n\
         \x20 -2d │██   2,180\n\
         \x20 -1d │███  2,220\n\
         Today │████ 2,250\n\
         Latest price for Wheat at Hazratganj, Lucknow, Uttar Pradesh: ₹2,250/qtl\n"
    );
}

#[tokio::test]
async fn test_render_price_chart_rejects_oversized_width() {
    let fixture = McpTestFixture::new().unwrap();
    let server = CropSenseMcpServer::new();

    for width in [0, 201, u32::MAX] {
        let err = server
            .render_price_chart(Parameters(RenderPriceChartParams {
                series: series_params(&fixture, ["Punjab", "Amritsar", "Amritsar", "Maize"]),
                width: Some(width),
            }))
            .await
            .unwrap_err();
        assert!(err.message.contains("width must be between 1 and 200"));
    }

    // rejected calls never touch the canvas
    let ok = server
        .render_price_chart(Parameters(RenderPriceChartParams {
            series: series_params(&fixture, ["Punjab", "Amritsar", "Amritsar", "Maize"]),
            width: Some(200),
        }))
        .await
        .unwrap();
    assert_eq!(extract_tool_result_json(&ok)["chartsCreated"], 1);
}
