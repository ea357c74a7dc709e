//! Persisted user preferences.
//!
//! Only one value is stored: the preferred language, under
//! [`PREFERRED_LANGUAGE_KEY`]. It is read once at startup and written on
//! every user-initiated change.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::resolver::DEFAULT_LOCALE;

pub const PREFERRED_LANGUAGE_KEY: &str = "preferredLanguage";

/// A string key/value store.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept in a small JSON object on disk.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        match serde_json::from_str(&content) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable preferences: {}", e);
                BTreeMap::new()
            }
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&values)?;
        fs::write(&self.path, format!("{}\n", json))
            .with_context(|| format!("Failed to write preferences: {}", self.path.display()))?;
        tracing::info!(path = %self.path.display(), key, value, "saved preference");
        Ok(())
    }
}

/// In-memory store, used by the MCP server and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The stored language, or `"en"` when nothing usable is stored.
pub fn preferred_language(store: &impl PreferenceStore) -> String {
    store
        .get(PREFERRED_LANGUAGE_KEY)
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

pub fn set_preferred_language(store: &mut impl PreferenceStore, code: &str) -> Result<()> {
    store.set(PREFERRED_LANGUAGE_KEY, code)
}
