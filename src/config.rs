use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::resolver::{DEFAULT_LOCALE, MissingPolicy};

pub const CONFIG_FILE_NAME: &str = ".cropsenserc.json";

pub const DEFAULT_SUGGEST_ENDPOINT: &str = "http://127.0.0.1:5000/get_suggestions";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_messages_root")]
    pub messages_root: String,
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Market dataset to use instead of the embedded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_data: Option<String>,
    #[serde(default)]
    pub missing_translation: MissingPolicy,
    #[serde(default = "default_preferences_file")]
    pub preferences_file: String,
    #[serde(default = "default_suggest_endpoint")]
    pub suggest_endpoint: String,
    #[serde(default = "default_suggest_timeout_secs")]
    pub suggest_timeout_secs: u64,
    /// Paths or globs skipped when walking a directory of pages.
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_messages_root() -> String {
    "./messages".to_string()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_preferences_file() -> String {
    ".cropsense/preferences.json".to_string()
}

fn default_suggest_endpoint() -> String {
    DEFAULT_SUGGEST_ENDPOINT.to_string()
}

fn default_suggest_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            messages_root: default_messages_root(),
            default_locale: default_locale(),
            market_data: None,
            missing_translation: MissingPolicy::default(),
            preferences_file: default_preferences_file(),
            suggest_endpoint: default_suggest_endpoint(),
            suggest_timeout_secs: default_suggest_timeout_secs(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        if self.default_locale.trim().is_empty() {
            bail!("'defaultLocale' cannot be empty");
        }

        if !self.suggest_endpoint.starts_with("http://")
            && !self.suggest_endpoint.starts_with("https://")
        {
            bail!(
                "Invalid 'suggestEndpoint': \"{}\" (expected an http:// or https:// URL)",
                self.suggest_endpoint
            );
        }

        if self.suggest_timeout_secs == 0 {
            bail!("'suggestTimeoutSecs' must be greater than 0");
        }

        Ok(())
    }

    /// Resolve a configured path against the directory the config was found in.
    pub fn resolve_path(&self, base_dir: &Path, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory relative paths in the config are resolved against.
    pub base_dir: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                base_dir,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            base_dir: start_dir.to_path_buf(),
        }),
    }
}
