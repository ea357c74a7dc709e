use std::path::{Path, PathBuf};

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use crate::{
    config::{ConfigLoadResult, load_config},
    core::{
        market::MarketIndex,
        resolver::{Catalog, CatalogLoadResult, Resolver},
    },
};

/// Config-derived state for one project root.
pub struct Project {
    pub messages_root: PathBuf,
    pub from_dir: bool,
    pub resolver: Resolver,
    market_data: Option<PathBuf>,
}

impl Project {
    pub fn load(root: &Path) -> Result<Self, McpError> {
        let ConfigLoadResult {
            config, base_dir, ..
        } = load_config(root)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        let messages_root = config.resolve_path(&base_dir, &config.messages_root);
        let CatalogLoadResult {
            catalog, from_dir, ..
        } = Catalog::load(&messages_root, &config.default_locale).map_err(|e| {
            McpError::internal_error(format!("Failed to load messages: {:#}", e), None)
        })?;

        let market_data = config
            .market_data
            .as_deref()
            .map(|path| config.resolve_path(&base_dir, path));

        Ok(Self {
            messages_root,
            from_dir,
            resolver: Resolver::new(catalog, config.missing_translation),
            market_data,
        })
    }

    pub fn market_index(&self) -> Result<MarketIndex, McpError> {
        let index = match &self.market_data {
            Some(path) => MarketIndex::load(path),
            None => MarketIndex::builtin().map_err(anyhow::Error::from),
        };
        index.map_err(|e| McpError::internal_error(format!("Failed to load market data: {:#}", e), None))
    }
}

/// Serialize `value` as the single text content of a successful tool result.
pub fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}
