use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::{
    config::load_config,
    core::{
        chart::{Chart, ChartSlot, DEFAULT_BAR_WIDTH, MAX_BAR_WIDTH},
        format::market_summary,
        market::{MarketIndex, PriceSeries},
        resolver::Source,
        selection::{Level, Selection},
    },
};

use super::helpers::{Project, json_result};
use super::types::{
    ConfigDto, ConfigValues, GetConfigParams, GetLocalesParams, ListMarketOptionsParams,
    LocaleInfo, LocalesResult, MarketOptionsResult, PriceChartResult, PricePoint,
    PriceSeriesParams, PriceSeriesResult, RenderPriceChartParams, ResolveKeysParams,
    ResolveKeysResult, ResolvedItem,
};

const CHART_CANVAS: &str = "price-chart";

fn select_path(index: &MarketIndex, keys: &[&str]) -> Result<Selection, McpError> {
    let mut selection = Selection::new();
    for (level, key) in Level::ALL.iter().zip(keys) {
        selection
            .select(index, *level, key)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
    }
    Ok(selection)
}

fn load_series(params: &PriceSeriesParams) -> Result<(PriceSeriesResult, PriceSeries), McpError> {
    let project = Project::load(Path::new(&params.project_root_path))?;
    let index = project.market_index()?;
    let keys = [
        params.state.as_str(),
        params.district.as_str(),
        params.market.as_str(),
        params.crop.as_str(),
    ];
    let series = *select_path(&index, &keys)?
        .series(&index)
        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

    let result = PriceSeriesResult {
        state: params.state.clone(),
        district: params.district.clone(),
        market: params.market.clone(),
        crop: params.crop.clone(),
        points: series
            .points()
            .map(|(label, price)| PricePoint {
                label: label.to_string(),
                price,
            })
            .collect(),
        latest: series.latest(),
        min: series.min(),
        max: series.max(),
        summary: market_summary([keys[0], keys[1], keys[2]], &params.crop, series.latest()),
    };
    Ok((result, series))
}

#[derive(Clone)]
pub struct CropSenseMcpServer {
    tool_router: ToolRouter<Self>,
    chart: Arc<Mutex<ChartSlot>>,
}

impl Default for CropSenseMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl CropSenseMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
            chart: Arc::new(Mutex::new(ChartSlot::new(CHART_CANVAS))),
        }
    }

    /// Get the current cropsense configuration
    #[tool(description = "Get the current cropsense configuration.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        json_result(&ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        })
    }

    /// Get available languages and their translation coverage
    #[tool(
        description = "Get available languages, their key counts, and which default-language keys each one is missing."
    )]
    pub async fn get_locales(
        &self,
        params: Parameters<GetLocalesParams>,
    ) -> Result<CallToolResult, McpError> {
        let project = Project::load(Path::new(&params.0.project_root_path))?;
        let catalog = project.resolver.catalog();

        let locales = catalog
            .locales()
            .map(|locale| {
                let coverage = project.resolver.coverage(locale);
                LocaleInfo {
                    locale: locale.to_string(),
                    key_count: catalog.dictionary(locale).map(|d| d.len()).unwrap_or(0),
                    translated: coverage.translated,
                    total: coverage.total,
                    missing_keys: coverage.missing,
                }
            })
            .collect();

        json_result(&LocalesResult {
            messages_root: project.messages_root.to_string_lossy().to_string(),
            from_dir: project.from_dir,
            default_locale: catalog.default_locale().to_string(),
            locales,
        })
    }

    /// Resolve message keys in a language with fallback to the default language
    #[tool(
        description = "Resolve dot-separated message keys in a language. Keys missing in that language fall back to the default language."
    )]
    pub async fn resolve_keys(
        &self,
        params: Parameters<ResolveKeysParams>,
    ) -> Result<CallToolResult, McpError> {
        let ResolveKeysParams {
            project_root_path,
            locale,
            keys,
        } = params.0;
        let project = Project::load(Path::new(&project_root_path))?;
        let resolver = &project.resolver;

        let items = keys
            .into_iter()
            .map(|key| {
                let (text, source) = match resolver.lookup(&locale, &key) {
                    Some(found) => (
                        found.text.to_string(),
                        match found.source {
                            Source::Requested => "requested",
                            Source::Fallback => "fallback",
                        },
                    ),
                    None => (resolver.missing_text(&key), "missing"),
                };
                ResolvedItem {
                    key,
                    text,
                    source: source.to_string(),
                }
            })
            .collect();

        json_result(&ResolveKeysResult {
            supported: resolver.catalog().is_supported(&locale),
            locale,
            items,
        })
    }

    /// List options at the next level of the state/district/market/crop cascade
    #[tool(
        description = "List the options for the next selector in the market cascade. Pass the keys chosen so far as `path` (empty for states)."
    )]
    pub async fn list_market_options(
        &self,
        params: Parameters<ListMarketOptionsParams>,
    ) -> Result<CallToolResult, McpError> {
        let ListMarketOptionsParams {
            project_root_path,
            path,
        } = params.0;
        if path.len() >= Level::ALL.len() {
            return Err(McpError::invalid_params(
                "path can hold at most state, district and market",
                None,
            ));
        }

        let project = Project::load(Path::new(&project_root_path))?;
        let index = project.market_index()?;
        let keys: Vec<&str> = path.iter().map(String::as_str).collect();
        let selection = select_path(&index, &keys)?;

        let level = Level::ALL[keys.len()];
        let options = selection
            .options(&index, level)
            .into_iter()
            .map(str::to_string)
            .collect();

        json_result(&MarketOptionsResult {
            level: level.to_string(),
            path,
            options,
        })
    }

    /// Get the 7-day price series for a crop at a market
    #[tool(description = "Get the 7-day price series (INR per quintal) for a crop at a market.")]
    pub async fn get_price_series(
        &self,
        params: Parameters<PriceSeriesParams>,
    ) -> Result<CallToolResult, McpError> {
        let (result, _) = load_series(&params.0)?;
        json_result(&result)
    }

    /// Render the price trend as a text bar chart
    #[tool(
        description = "Render the 7-day price trend for a crop at a market as a text bar chart. Replaces the previously rendered chart."
    )]
    pub async fn render_price_chart(
        &self,
        params: Parameters<RenderPriceChartParams>,
    ) -> Result<CallToolResult, McpError> {
        let RenderPriceChartParams { series, width } = params.0;
        let width = match width.map(|w| w as usize) {
            None => DEFAULT_BAR_WIDTH,
            Some(w) if (1..=MAX_BAR_WIDTH).contains(&w) => w,
            Some(w) => {
                return Err(McpError::invalid_params(
                    format!("width must be between 1 and {}, got {}", MAX_BAR_WIDTH, w),
                    None,
                ));
            }
        };
        let (result, price_series) = load_series(&series)?;

        let mut slot = self
            .chart
            .lock()
            .map_err(|_| McpError::internal_error("chart state is unavailable", None))?;
        let chart = slot.replace(Chart::price_trend(&result.market, &result.crop, &price_series));
        let rendered = format!("{}{}\n", chart.render_with_width(width), result.summary);
        let title = chart.title().to_string();

        json_result(&PriceChartResult {
            canvas: slot.canvas().to_string(),
            title,
            chart: rendered,
            charts_created: slot.created(),
        })
    }
}

#[tool_handler]
impl ServerHandler for CropSenseMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "CropSense MCP exposes the multilingual message catalog and mandi price data.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. get_locales - Get available languages and translation coverage\n\
                 3. resolve_keys - Resolve message keys in a language (falls back to the default language)\n\
                 4. list_market_options - Walk the state -> district -> market -> crop cascade\n\
                 5. get_price_series - Get the 7-day price series for a crop\n\
                 6. render_price_chart - Render that series as a text chart\n\n\
                 Choose options level by level with list_market_options before asking for prices;\n\
                 unknown keys at any level are rejected."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = CropSenseMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
