use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::resolver::MissingPolicy;

// ============================================================
// Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path to the project root (where .cropsenserc.json lives)
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetLocalesParams {
    /// Absolute path to the project root
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveKeysParams {
    /// Absolute path to the project root
    pub project_root_path: String,
    /// Language code, e.g. "hi". Unsupported codes resolve through the default locale.
    pub locale: String,
    /// Dot-separated key paths, e.g. "market.title"
    pub keys: Vec<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListMarketOptionsParams {
    /// Absolute path to the project root
    pub project_root_path: String,
    /// Keys chosen so far, shallowest first: [state, district, market]. Empty lists states.
    #[serde(default)]
    pub path: Vec<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceSeriesParams {
    /// Absolute path to the project root
    pub project_root_path: String,
    pub state: String,
    pub district: String,
    pub market: String,
    pub crop: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenderPriceChartParams {
    #[serde(flatten)]
    pub series: PriceSeriesParams,
    /// Width of the longest bar in cells, 1 to 200 (default 24)
    pub width: Option<u32>,
}

// ============================================================
// Config Types (get_config)
// ============================================================

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub messages_root: String,
    pub default_locale: String,
    pub market_data: Option<String>,
    pub missing_translation: String,
    pub preferences_file: String,
    pub suggest_endpoint: String,
    pub suggest_timeout_secs: u64,
    pub ignores: Vec<String>,
}

impl From<Config> for ConfigValues {
    fn from(c: Config) -> Self {
        Self {
            messages_root: c.messages_root,
            default_locale: c.default_locale,
            market_data: c.market_data,
            missing_translation: match c.missing_translation {
                MissingPolicy::KeepOriginal => "keepOriginal".to_string(),
                MissingPolicy::Placeholder => "placeholder".to_string(),
            },
            preferences_file: c.preferences_file,
            suggest_endpoint: c.suggest_endpoint,
            suggest_timeout_secs: c.suggest_timeout_secs,
            ignores: c.ignores,
        }
    }
}

// ============================================================
// Locales Types (get_locales)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalesResult {
    pub messages_root: String,
    /// False when the embedded catalog was used
    pub from_dir: bool,
    pub default_locale: String,
    pub locales: Vec<LocaleInfo>,
}

/// Translation coverage of one locale against the default locale
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocaleInfo {
    pub locale: String,
    pub key_count: usize,
    pub translated: usize,
    pub total: usize,
    pub missing_keys: Vec<String>,
}

// ============================================================
// Resolve Types (resolve_keys)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveKeysResult {
    pub locale: String,
    /// False when the locale has no messages of its own
    pub supported: bool,
    pub items: Vec<ResolvedItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedItem {
    pub key: String,
    pub text: String,
    /// "requested", "fallback" or "missing"
    pub source: String,
}

// ============================================================
// Market Types
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketOptionsResult {
    pub path: Vec<String>,
    /// "state", "district", "market" or "crop"
    pub level: String,
    pub options: Vec<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub label: String,
    pub price: u32,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceSeriesResult {
    pub state: String,
    pub district: String,
    pub market: String,
    pub crop: String,
    pub points: Vec<PricePoint>,
    pub latest: u32,
    pub min: u32,
    pub max: u32,
    pub summary: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceChartResult {
    pub canvas: String,
    pub title: String,
    pub chart: String,
    /// Charts created on this canvas since the server started
    pub charts_created: usize,
}
