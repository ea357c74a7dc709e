use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::super::args::CommonArgs;
use super::super::report::print_warning;
use crate::{
    config::{Config, ConfigLoadResult, load_config},
    core::{
        market::MarketIndex,
        preferences::{FilePreferenceStore, preferred_language},
        resolver::{Catalog, Resolver},
    },
};

/// Everything a command needs: config, resolver, and the active language.
pub struct CliContext {
    pub config: Config,
    pub resolver: Resolver,
    pub store: FilePreferenceStore,
    /// Language chosen by `--lang`, else the saved preference.
    pub lang: String,
    market_data: Option<PathBuf>,
}

impl CliContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read current directory")?;
        Self::from_dir(&cwd, common)
    }

    pub fn from_dir(dir: &Path, common: &CommonArgs) -> Result<Self> {
        let ConfigLoadResult {
            config,
            from_file,
            base_dir,
        } = load_config(dir)?;
        if !from_file {
            tracing::debug!("no config file found, using defaults");
        }

        let messages_root = common
            .messages_root
            .clone()
            .unwrap_or_else(|| config.resolve_path(&base_dir, &config.messages_root));
        let loaded = Catalog::load(&messages_root, &config.default_locale)?;
        for warning in &loaded.warnings {
            print_warning(&format!("{}: {}", warning.file_path, warning.error));
        }
        let resolver = Resolver::new(loaded.catalog, config.missing_translation);

        let store =
            FilePreferenceStore::new(config.resolve_path(&base_dir, &config.preferences_file));
        let lang = common
            .lang
            .clone()
            .unwrap_or_else(|| preferred_language(&store));
        if !resolver.catalog().is_supported(&lang) {
            tracing::warn!(
                lang,
                "language has no messages, showing {}",
                resolver.catalog().default_locale()
            );
        }

        let market_data = common.market_data.clone().or_else(|| {
            config
                .market_data
                .as_deref()
                .map(|path| config.resolve_path(&base_dir, path))
        });

        Ok(Self {
            config,
            resolver,
            store,
            lang,
            market_data,
        })
    }

    /// Resolve a message key in the active language.
    pub fn t(&self, key: &str) -> String {
        self.resolver.resolve(&self.lang, key)
    }

    /// The configured market dataset, or the embedded one.
    pub fn market_index(&self) -> Result<MarketIndex> {
        match &self.market_data {
            Some(path) => MarketIndex::load(path),
            None => Ok(MarketIndex::builtin()?),
        }
    }
}
