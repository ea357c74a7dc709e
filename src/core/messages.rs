//! Typed message dictionaries.
//!
//! A locale's messages form a tree of groups and text leaves. Leaves are
//! addressed by dot-separated key paths such as `market.trend`.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// A node in a message tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageNode {
    /// A translated string: `"trend": "7-day price trend"`
    Text(String),
    /// A nested namespace: `"market": { ... }`
    Group(BTreeMap<String, MessageNode>),
}

/// A validated dot-separated key path.
///
/// Segments must be non-empty and contain only ASCII letters, digits,
/// underscores or hyphens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> KeyPath<'a> {
    /// Parse a key path, returning `None` for empty or malformed input.
    pub fn parse(raw: &'a str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let segments: Vec<&str> = raw.split('.').collect();
        let valid = segments.iter().all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        });
        valid.then_some(Self { segments })
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }
}

/// All messages for a single locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    root: BTreeMap<String, MessageNode>,
}

impl Dictionary {
    pub fn new(root: BTreeMap<String, MessageNode>) -> Self {
        Self { root }
    }

    /// Build a dictionary from parsed JSON.
    ///
    /// The top level must be an object. Values that are neither strings nor
    /// objects are skipped with a warning since nothing can render them.
    pub fn from_json(locale: &str, json: &Value) -> Result<Self> {
        let Value::Object(map) = json else {
            bail!("Messages for locale '{}' must be a JSON object", locale);
        };
        let mut root = BTreeMap::new();
        for (key, value) in map {
            if let Some(node) = convert_node(locale, key, value) {
                root.insert(key.clone(), node);
            }
        }
        Ok(Self { root })
    }

    /// Walk the tree along `path`. Returns the leaf text, or `None` when
    /// any segment is missing or the path ends on a group or passes
    /// through a leaf.
    pub fn get(&self, path: &KeyPath<'_>) -> Option<&str> {
        let (last, parents) = path.segments().split_last()?;
        let mut current = &self.root;
        for segment in parents {
            match current.get(*segment)? {
                MessageNode::Group(children) => current = children,
                MessageNode::Text(_) => return None,
            }
        }
        match current.get(*last)? {
            MessageNode::Text(text) => Some(text),
            MessageNode::Group(_) => None,
        }
    }

    /// All leaf key paths in sorted order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(&self.root, "", &mut keys);
        keys
    }

    /// Number of text leaves.
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

fn convert_node(locale: &str, key_path: &str, value: &Value) -> Option<MessageNode> {
    match value {
        Value::String(text) => Some(MessageNode::Text(text.clone())),
        Value::Object(map) => {
            let mut children = BTreeMap::new();
            for (key, child) in map {
                let child_path = format!("{}.{}", key_path, key);
                if let Some(node) = convert_node(locale, &child_path, child) {
                    children.insert(key.clone(), node);
                }
            }
            Some(MessageNode::Group(children))
        }
        other => {
            tracing::warn!(
                locale,
                key = key_path,
                "skipping non-string message value: {}",
                other
            );
            None
        }
    }
}

fn collect_keys(nodes: &BTreeMap<String, MessageNode>, prefix: &str, out: &mut Vec<String>) {
    for (key, node) in nodes {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match node {
            MessageNode::Text(_) => out.push(path),
            MessageNode::Group(children) => collect_keys(children, &path, out),
        }
    }
}

/// A warning from scanning message files.
#[derive(Debug, Clone)]
pub struct MessageScanWarning {
    pub file_path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct ScanMessagesResult {
    pub dictionaries: BTreeMap<String, Dictionary>,
    pub warnings: Vec<MessageScanWarning>,
}

pub fn parse_json_file(path: &Path, locale: &str) -> Result<Dictionary> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;

    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {:?}", path))?;

    Dictionary::from_json(locale, &json)
}

/// Extracts locale from filename.
///
/// Examples:
/// - "en.json" -> Some("en")
/// - "/path/to/messages/hi.json" -> Some("hi")
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Load every `<locale>.json` in `message_dir`.
///
/// Files that fail to parse are reported as warnings instead of aborting
/// the whole scan.
pub fn scan_message_files(message_dir: impl AsRef<Path>) -> Result<ScanMessagesResult> {
    let message_dir = message_dir.as_ref();
    let mut result = ScanMessagesResult::default();

    if !message_dir.is_dir() {
        bail!("'{}' is not a directory.", message_dir.display());
    }

    for entry in fs::read_dir(message_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) == Some("json")
            && let Some(locale) = extract_locale(&path)
        {
            match parse_json_file(&path, &locale) {
                Ok(dictionary) => {
                    result.dictionaries.insert(locale, dictionary);
                }
                Err(e) => {
                    result.warnings.push(MessageScanWarning {
                        file_path: path.to_string_lossy().to_string(),
                        error: format!("{:#}", e),
                    });
                }
            }
        }
    }

    Ok(result)
}
