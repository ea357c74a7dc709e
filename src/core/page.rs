//! Translation pass over HTML pages.
//!
//! Any element carrying `data-i18n="<key>"` declares the key path for its
//! text content. A page is translated by resolving every declared key in one
//! batch and writing each result back as the element's text. Elements whose
//! content contains nested markup are left alone and reported as skipped.

use std::{
    collections::{BTreeSet, HashSet},
    ops::Range,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use glob::Pattern;
use regex::Regex;
use walkdir::WalkDir;

use super::resolver::{MissingPolicy, Resolver, Source};

static TAGGED_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<(?P<tag>[a-zA-Z][a-zA-Z0-9-]*)\s[^>]*?\bdata-i18n\s*=\s*["'](?P<key>[^"']*)["'][^>]*>(?P<text>[^<]*)</(?P<close>[a-zA-Z][a-zA-Z0-9-]*)\s*>"#,
    )
    .unwrap()
});

static DECLARED_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<[a-zA-Z][a-zA-Z0-9-]*\s[^>]*?\bdata-i18n\s*=\s*["'](?P<key>[^"']*)["'][^>]*>"#)
        .unwrap()
});

/// One element that declared a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedElement {
    pub tag: String,
    pub key: String,
    pub text: String,
    /// Byte offset of the opening tag.
    pub start: usize,
    /// Byte range of the text content within the page.
    pub span: Range<usize>,
}

/// Collect tagged elements in document order.
pub fn tagged_elements(html: &str) -> Vec<TaggedElement> {
    TAGGED_ELEMENT
        .captures_iter(html)
        .filter_map(|caps| {
            let tag = caps.name("tag")?;
            let close = caps.name("close")?;
            if !tag.as_str().eq_ignore_ascii_case(close.as_str()) {
                return None;
            }
            let text = caps.name("text")?;
            Some(TaggedElement {
                start: caps.get(0)?.start(),
                tag: tag.as_str().to_string(),
                key: caps.name("key")?.as_str().to_string(),
                text: text.as_str().to_string(),
                span: text.range(),
            })
        })
        .collect()
}

/// Outcome of translating one page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageTranslation {
    pub html: String,
    /// Elements translated from the requested locale.
    pub translated: usize,
    /// Elements that fell back to the default locale.
    pub fallback: usize,
    /// Keys that resolved nowhere, sorted and deduplicated.
    pub unresolved: Vec<String>,
    /// Keys of elements left untouched because their content is not plain
    /// text (nested markup or a mismatched close tag), in document order.
    pub skipped: Vec<String>,
}

/// Keys declared on elements that [`tagged_elements`] could not take.
fn skipped_keys(html: &str, elements: &[TaggedElement]) -> Vec<String> {
    let taken: HashSet<usize> = elements.iter().map(|e| e.start).collect();
    DECLARED_KEY
        .captures_iter(html)
        .filter_map(|caps| {
            let start = caps.get(0)?.start();
            if taken.contains(&start) {
                return None;
            }
            Some(caps.name("key")?.as_str().to_string())
        })
        .collect()
}

/// Translate every tagged element in `html` into `locale`.
pub fn translate_page(resolver: &Resolver, locale: &str, html: &str) -> PageTranslation {
    let elements = tagged_elements(html);
    let resolved = resolver.resolve_all(locale, elements.iter().map(|e| e.key.as_str()));

    let mut result = PageTranslation {
        skipped: skipped_keys(html, &elements),
        ..PageTranslation::default()
    };
    if !result.skipped.is_empty() {
        tracing::debug!(count = result.skipped.len(), "tagged elements with nested markup skipped");
    }
    let mut unresolved = BTreeSet::new();
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;

    for element in &elements {
        let replacement = match resolver.lookup(locale, &element.key) {
            Some(found) => {
                match found.source {
                    Source::Requested => result.translated += 1,
                    Source::Fallback => result.fallback += 1,
                }
                resolved.get(&element.key).map(|text| escape_text(text))
            }
            None => {
                unresolved.insert(element.key.clone());
                match resolver.policy() {
                    MissingPolicy::KeepOriginal => None,
                    MissingPolicy::Placeholder => {
                        resolved.get(&element.key).map(|text| escape_text(text))
                    }
                }
            }
        };

        if let Some(text) = replacement {
            out.push_str(&html[cursor..element.span.start]);
            out.push_str(&text);
            cursor = element.span.end;
        }
    }
    out.push_str(&html[cursor..]);

    result.html = out;
    result.unresolved = unresolved.into_iter().collect();
    result
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

fn is_html(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("html") | Some("htm")
    )
}

/// Result of scanning for pages.
#[derive(Debug, Default)]
pub struct PageScan {
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Find HTML pages under `root`. A file path is returned as-is.
///
/// `ignores` entries with wildcards are matched as globs against the full
/// path; others are treated as path prefixes relative to `root`.
pub fn scan_pages(root: &Path, ignores: &[String]) -> PageScan {
    if root.is_file() {
        return PageScan {
            files: vec![root.to_path_buf()],
            skipped_count: 0,
        };
    }

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => tracing::warn!("Invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignore_paths.push(root.join(p));
        }
    }

    let mut scan = PageScan::default();
    let mut seen = HashSet::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                scan.skipped_count += 1;
                tracing::warn!("Cannot access path: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }
        let path_str = path.to_string_lossy();
        if glob_patterns.iter().any(|p| p.matches(&path_str)) {
            continue;
        }
        if entry.file_type().is_file() && is_html(path) && seen.insert(path.to_path_buf()) {
            scan.files.push(path.to_path_buf());
        }
    }
    scan
}
