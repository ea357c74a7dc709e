//! Terminal output for CLI commands.
//!
//! Each printer has a `_to` variant taking a writer so output can be tested
//! without a terminal.

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::format::crop_emoji;
use crate::core::resolver::{Coverage, Source};
use crate::suggest::Recommendation;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// One resolved key as shown by `translate`.
pub struct TranslationLine<'a> {
    pub key: &'a str,
    pub text: &'a str,
    /// `None` when the key resolved nowhere.
    pub source: Option<Source>,
}

pub fn print_success(message: &str) {
    let _ = writeln!(io::stdout().lock(), "{} {}", SUCCESS_MARK.green(), message.green());
}

pub fn print_failure(message: &str) {
    print_failure_to(message, &mut io::stderr().lock());
}

pub fn print_failure_to<W: Write>(message: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), message.red());
}

pub fn print_warning(message: &str) {
    let _ = writeln!(io::stderr().lock(), "{} {}", "warning:".bold().yellow(), message);
}

/// Pad `text` to `width` terminal cells.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(fill))
}

pub fn print_translations(lines: &[TranslationLine<'_>]) {
    print_translations_to(lines, &mut io::stdout().lock());
}

pub fn print_translations_to<W: Write>(lines: &[TranslationLine<'_>], writer: &mut W) {
    let key_width = lines
        .iter()
        .map(|line| UnicodeWidthStr::width(line.key))
        .max()
        .unwrap_or(0);
    for line in lines {
        let note = match line.source {
            Some(Source::Requested) => String::new(),
            Some(Source::Fallback) => format!("  {}", "(fallback)".dimmed()),
            None => format!("  {}", "(missing)".yellow()),
        };
        let _ = writeln!(
            writer,
            "{} = {}{}",
            pad(line.key, key_width).cyan(),
            line.text,
            note
        );
    }
}

pub fn print_locales(rows: &[Coverage], current: &str, default: &str) {
    print_locales_to(rows, current, default, &mut io::stdout().lock());
}

pub fn print_locales_to<W: Write>(rows: &[Coverage], current: &str, default: &str, writer: &mut W) {
    let count_width = rows
        .iter()
        .map(|row| format!("{}/{}", row.translated, row.total).len())
        .max()
        .unwrap_or(0);
    for row in rows {
        let mark = if row.is_complete() {
            SUCCESS_MARK.green()
        } else if row.translated == 0 {
            " ".normal()
        } else {
            "~".yellow()
        };
        let mut tags = Vec::new();
        if row.locale == current {
            tags.push("current");
        }
        if row.locale == default {
            tags.push("default");
        }
        let tags = if tags.is_empty() {
            String::new()
        } else {
            format!("  ({})", tags.join(", "))
        };
        let _ = writeln!(
            writer,
            "{} {} {:>cw$}{}",
            mark,
            pad(&row.locale, 3).bold(),
            format!("{}/{}", row.translated, row.total),
            tags,
            cw = count_width
        );
    }
}

pub fn print_options(label: &str, options: &[&str]) {
    print_options_to(label, options, &mut io::stdout().lock());
}

pub fn print_options_to<W: Write>(label: &str, options: &[&str], writer: &mut W) {
    let _ = writeln!(writer, "{}", format!("{}:", label).bold());
    for option in options {
        let _ = writeln!(writer, "  {}", option);
    }
}

pub fn print_recommendations(title: &str, recommendations: &[Recommendation]) {
    print_recommendations_to(title, recommendations, &mut io::stdout().lock());
}

pub fn print_recommendations_to<W: Write>(
    title: &str,
    recommendations: &[Recommendation],
    writer: &mut W,
) {
    let _ = writeln!(writer, "{}", title.bold());
    if recommendations.is_empty() {
        let _ = writeln!(writer, "  {}", "(no recommendations)".dimmed());
        return;
    }
    for rec in recommendations {
        let emoji = rec.emoji.as_deref().unwrap_or_else(|| crop_emoji(&rec.name));
        let score = rec
            .score
            .map(|score| format!("  score {:.2}", score))
            .unwrap_or_default();
        let _ = writeln!(writer, "{} {}{}", emoji, rec.name.bold(), score.dimmed());
        let _ = writeln!(writer, "   Yield: {}", rec.expected_yield);
        let _ = writeln!(writer, "   Profit: {}", rec.profit);
        let _ = writeln!(writer, "   Sustainability: {}", rec.sustainability);
    }
}

/// Summary line for one page written back by `page --write`.
pub fn print_page_written(path: &Path, translated: usize, fallback: usize) {
    let _ = writeln!(
        io::stdout().lock(),
        "{} {} ({} translated, {} fallback)",
        SUCCESS_MARK.green(),
        path.display(),
        translated,
        fallback
    );
}
