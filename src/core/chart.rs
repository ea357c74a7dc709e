//! Price charts and their per-canvas lifecycle.
//!
//! A canvas shows at most one chart. [`ChartSlot::replace`] disposes the
//! previous chart before the new one becomes active.

use unicode_width::UnicodeWidthStr;

use super::format::format_indian;
use super::market::PriceSeries;

/// Default width of the longest bar, in cells.
pub const DEFAULT_BAR_WIDTH: usize = 24;

/// Widest bar [`Chart::render_with_width`] will draw.
pub const MAX_BAR_WIDTH: usize = 200;

const BAR: char = '█';

/// A labelled bar chart of integer values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    title: String,
    points: Vec<(String, u32)>,
}

impl Chart {
    pub fn new(title: impl Into<String>, points: Vec<(String, u32)>) -> Self {
        Self {
            title: title.into(),
            points,
        }
    }

    /// The 7-day trend chart for one crop at one market.
    pub fn price_trend(market: &str, crop: &str, series: &PriceSeries) -> Self {
        Self::new(
            format!("{} - {}", market, crop),
            series
                .points()
                .map(|(label, value)| (label.to_string(), value))
                .collect(),
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn points(&self) -> &[(String, u32)] {
        &self.points
    }

    pub fn render(&self) -> String {
        self.render_with_width(DEFAULT_BAR_WIDTH)
    }

    /// Render as text. Bars scale between the minimum (one cell) and the
    /// maximum (`bar_width` cells) of the plotted values. `bar_width` is
    /// clamped to `1..=MAX_BAR_WIDTH`.
    pub fn render_with_width(&self, bar_width: usize) -> String {
        let bar_width = bar_width.clamp(1, MAX_BAR_WIDTH);
        let min = self.points.iter().map(|(_, v)| *v).min().unwrap_or(0);
        let max = self.points.iter().map(|(_, v)| *v).max().unwrap_or(0);
        let label_width = self
            .points
            .iter()
            .map(|(label, _)| UnicodeWidthStr::width(label.as_str()))
            .max()
            .unwrap_or(0);
        let values: Vec<String> = self
            .points
            .iter()
            .map(|(_, v)| format_indian(u64::from(*v)))
            .collect();
        let value_width = values.iter().map(String::len).max().unwrap_or(0);

        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        for ((label, value), formatted) in self.points.iter().zip(&values) {
            let cells = if max == min {
                bar_width
            } else {
                1 + (value - min) as usize * (bar_width - 1) / (max - min) as usize
            };
            let padding = label_width - UnicodeWidthStr::width(label.as_str());
            out.push_str(&format!(
                "{}{} │{}{} {:>vw$}\n",
                " ".repeat(padding),
                label,
                BAR.to_string().repeat(cells),
                " ".repeat(bar_width - cells),
                formatted,
                vw = value_width
            ));
        }
        out
    }
}

/// Owns the chart currently shown on one canvas.
#[derive(Debug)]
pub struct ChartSlot {
    canvas: String,
    active: Option<Chart>,
    created: usize,
}

impl ChartSlot {
    pub fn new(canvas: impl Into<String>) -> Self {
        Self {
            canvas: canvas.into(),
            active: None,
            created: 0,
        }
    }

    pub fn canvas(&self) -> &str {
        &self.canvas
    }

    /// Dispose the active chart, if any, and install `chart`.
    pub fn replace(&mut self, chart: Chart) -> &Chart {
        if let Some(previous) = self.active.take() {
            tracing::debug!(canvas = %self.canvas, title = previous.title(), "disposing chart");
        }
        self.created += 1;
        self.active.insert(chart)
    }

    pub fn active(&self) -> Option<&Chart> {
        self.active.as_ref()
    }

    /// Drop the active chart. Returns whether there was one.
    pub fn dispose(&mut self) -> bool {
        match self.active.take() {
            Some(previous) => {
                tracing::debug!(canvas = %self.canvas, title = previous.title(), "disposing chart");
                true
            }
            None => false,
        }
    }

    /// Number of charts created on this canvas so far.
    pub fn created(&self) -> usize {
        self.created
    }
}
