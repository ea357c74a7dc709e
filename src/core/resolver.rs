//! Key-path resolution with default-locale fallback.
//!
//! Resolution order for `resolve(locale, key)`:
//!
//! 1. the requested locale's dictionary
//! 2. the default locale's dictionary
//! 3. the configured [`MissingPolicy`]
//!
//! Unknown locales behave like empty dictionaries, so every key goes
//! through the default-locale path. Nothing here can fail.

use std::{
    collections::{BTreeMap, HashSet},
    path::Path,
};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use super::messages::{Dictionary, KeyPath, MessageScanWarning, scan_message_files};

pub const DEFAULT_LOCALE: &str = "en";

/// Locales shipped with the binary. Only `en` and `hi` carry messages; the
/// rest resolve entirely through the default locale.
pub const BUILTIN_LOCALES: &[&str] = &[
    "en", "hi", "kn", "te", "ta", "mr", "bn", "pa", "gu", "ml", "or", "as", "bh", "nj",
];

const BUILTIN_EN: &str = include_str!("../../assets/messages/en.json");
const BUILTIN_HI: &str = include_str!("../../assets/messages/hi.json");

/// What to return when neither the requested nor the default locale has a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MissingPolicy {
    /// Return the key path itself; page translation leaves the element's
    /// existing text untouched.
    #[default]
    KeepOriginal,
    /// Return a visible `[missing: <key>]` marker.
    Placeholder,
}

/// A set of dictionaries plus the locale every lookup falls back to.
#[derive(Debug, Clone)]
pub struct Catalog {
    default_locale: String,
    dictionaries: BTreeMap<String, Dictionary>,
}

/// Result of loading a catalog from disk.
pub struct CatalogLoadResult {
    pub catalog: Catalog,
    /// True if dictionaries came from the messages directory, false if the
    /// embedded catalog was used.
    pub from_dir: bool,
    pub warnings: Vec<MessageScanWarning>,
}

impl Catalog {
    pub fn new(
        default_locale: impl Into<String>,
        dictionaries: BTreeMap<String, Dictionary>,
    ) -> Result<Self> {
        let default_locale = default_locale.into();
        if !dictionaries.contains_key(&default_locale) {
            bail!(
                "Default locale '{}' has no messages. Available: {}",
                default_locale,
                dictionaries.keys().cloned().collect::<Vec<_>>().join(", ")
            );
        }
        Ok(Self {
            default_locale,
            dictionaries,
        })
    }

    /// The catalog embedded in the binary.
    pub fn builtin() -> Result<Self> {
        let mut dictionaries = BTreeMap::new();
        for locale in BUILTIN_LOCALES {
            let dictionary = match *locale {
                "en" => Dictionary::from_json("en", &serde_json::from_str(BUILTIN_EN)?)?,
                "hi" => Dictionary::from_json("hi", &serde_json::from_str(BUILTIN_HI)?)?,
                _ => Dictionary::default(),
            };
            dictionaries.insert(locale.to_string(), dictionary);
        }
        Self::new(DEFAULT_LOCALE, dictionaries)
    }

    /// Load `<locale>.json` files from `messages_root` when it exists,
    /// otherwise fall back to the embedded catalog.
    pub fn load(messages_root: &Path, default_locale: &str) -> Result<CatalogLoadResult> {
        if !messages_root.is_dir() {
            tracing::debug!(
                path = %messages_root.display(),
                "messages directory not found, using embedded catalog"
            );
            let builtin = Self::builtin()?;
            let catalog = Self::new(default_locale, builtin.dictionaries)?;
            return Ok(CatalogLoadResult {
                catalog,
                from_dir: false,
                warnings: Vec::new(),
            });
        }

        let scanned = scan_message_files(messages_root)?;
        for warning in &scanned.warnings {
            tracing::debug!(file = %warning.file_path, "skipped message file: {}", warning.error);
        }
        let catalog = Self::new(default_locale, scanned.dictionaries)?;
        Ok(CatalogLoadResult {
            catalog,
            from_dir: true,
            warnings: scanned.warnings,
        })
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.dictionaries.keys().map(String::as_str)
    }

    pub fn dictionary(&self, locale: &str) -> Option<&Dictionary> {
        self.dictionaries.get(locale)
    }

    pub fn is_supported(&self, locale: &str) -> bool {
        self.dictionaries.contains_key(locale)
    }
}

/// Where a resolved string came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Requested,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub text: &'a str,
    pub source: Source,
}

/// Translation coverage of one locale against the default locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    pub locale: String,
    pub translated: usize,
    pub total: usize,
    pub missing: Vec<String>,
}

impl Coverage {
    pub fn is_complete(&self) -> bool {
        self.translated == self.total
    }
}

#[derive(Debug, Clone)]
pub struct Resolver {
    catalog: Catalog,
    policy: MissingPolicy,
}

impl Resolver {
    pub fn new(catalog: Catalog, policy: MissingPolicy) -> Self {
        Self { catalog, policy }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn policy(&self) -> MissingPolicy {
        self.policy
    }

    /// Find `key` in `locale`, then in the default locale.
    pub fn lookup(&self, locale: &str, key: &str) -> Option<Resolved<'_>> {
        let path = KeyPath::parse(key)?;

        if let Some(text) = self
            .catalog
            .dictionary(locale)
            .and_then(|dict| dict.get(&path))
        {
            return Some(Resolved {
                text,
                source: Source::Requested,
            });
        }

        let default_locale = self.catalog.default_locale();
        let text = self.catalog.dictionary(default_locale)?.get(&path)?;
        if locale != default_locale {
            tracing::debug!(locale, key, "falling back to {}", default_locale);
        }
        Some(Resolved {
            text,
            source: Source::Fallback,
        })
    }

    /// Resolve one key. Always returns a string.
    pub fn resolve(&self, locale: &str, key: &str) -> String {
        match self.lookup(locale, key) {
            Some(resolved) => resolved.text.to_string(),
            None => self.missing_text(key),
        }
    }

    /// Resolve a batch of keys in one pass. Duplicate keys collapse.
    pub fn resolve_all<'k>(
        &self,
        locale: &str,
        keys: impl IntoIterator<Item = &'k str>,
    ) -> BTreeMap<String, String> {
        keys.into_iter()
            .map(|key| (key.to_string(), self.resolve(locale, key)))
            .collect()
    }

    /// The string used when a key resolves nowhere.
    pub fn missing_text(&self, key: &str) -> String {
        tracing::debug!(key, "no translation in any locale");
        match self.policy {
            MissingPolicy::KeepOriginal => key.to_string(),
            MissingPolicy::Placeholder => format!("[missing: {}]", key),
        }
    }

    /// Which default-locale keys `locale` translates itself.
    pub fn coverage(&self, locale: &str) -> Coverage {
        let reference = self
            .catalog
            .dictionary(self.catalog.default_locale())
            .map(Dictionary::keys)
            .unwrap_or_default();
        let own: HashSet<String> = self
            .catalog
            .dictionary(locale)
            .map(|dict| dict.keys().into_iter().collect())
            .unwrap_or_default();

        let missing: Vec<String> = reference
            .iter()
            .filter(|key| !own.contains(*key))
            .cloned()
            .collect();

        Coverage {
            locale: locale.to_string(),
            translated: reference.len() - missing.len(),
            total: reference.len(),
            missing,
        }
    }
}
