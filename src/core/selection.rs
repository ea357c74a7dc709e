//! Dependent selector state for the market panel.
//!
//! Stages only move forward one level at a time, and choosing (or clearing)
//! a value at any level discards every deeper choice:
//!
//! ```text
//! NoneSelected -> StateChosen -> DistrictChosen -> MarketChosen -> CropChosen
//! ```

use std::fmt;

use serde::Serialize;

use super::market::{LookupError, MarketIndex, PriceSeries};

/// One selector in the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Level {
    State,
    District,
    Market,
    Crop,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::State, Level::District, Level::Market, Level::Crop];

    /// Zero-based depth in the cascade.
    pub fn depth(self) -> usize {
        match self {
            Level::State => 0,
            Level::District => 1,
            Level::Market => 2,
            Level::Crop => 3,
        }
    }

    /// The level whose options depend on this one.
    pub fn next(self) -> Option<Level> {
        Self::ALL.get(self.depth() + 1).copied()
    }

    /// Dictionary key for the selector label.
    pub fn message_key(self) -> &'static str {
        match self {
            Level::State => "market.state",
            Level::District => "market.district",
            Level::Market => "market.mandi",
            Level::Crop => "market.crop",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::State => write!(f, "state"),
            Level::District => write!(f, "district"),
            Level::Market => write!(f, "market"),
            Level::Crop => write!(f, "crop"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    NoneSelected,
    StateChosen,
    DistrictChosen,
    MarketChosen,
    CropChosen,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("choose a {parent} before choosing a {level}")]
    ParentNotChosen { level: Level, parent: Level },
    #[error("'{key}' is not a valid {level} here (options: {})", .options.join(", "))]
    UnknownOption {
        level: Level,
        key: String,
        options: Vec<String>,
    },
    #[error("a crop must be chosen before loading prices")]
    Incomplete,
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// The keys chosen so far, shallowest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    chosen: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        match self.chosen.len() {
            0 => Stage::NoneSelected,
            1 => Stage::StateChosen,
            2 => Stage::DistrictChosen,
            3 => Stage::MarketChosen,
            _ => Stage::CropChosen,
        }
    }

    pub fn get(&self, level: Level) -> Option<&str> {
        self.chosen.get(level.depth()).map(String::as_str)
    }

    pub fn path(&self) -> Vec<&str> {
        self.chosen.iter().map(String::as_str).collect()
    }

    /// Options currently offered by the selector at `level`.
    ///
    /// Empty when the parent level has not been chosen.
    pub fn options<'a>(&self, index: &'a MarketIndex, level: Level) -> Vec<&'a str> {
        let depth = level.depth();
        if depth > self.chosen.len() {
            return Vec::new();
        }
        let parents: Vec<&str> = self.chosen[..depth].iter().map(String::as_str).collect();
        index.children_at(&parents)
    }

    /// Choose `key` at `level`, discarding every deeper choice.
    pub fn select(
        &mut self,
        index: &MarketIndex,
        level: Level,
        key: &str,
    ) -> Result<Stage, SelectionError> {
        let depth = level.depth();
        if depth > self.chosen.len() {
            return Err(SelectionError::ParentNotChosen {
                level,
                parent: Level::ALL[self.chosen.len()],
            });
        }

        let options = self.options(index, level);
        if !options.iter().any(|option| *option == key) {
            return Err(SelectionError::UnknownOption {
                level,
                key: key.to_string(),
                options: options.iter().map(|o| o.to_string()).collect(),
            });
        }

        self.chosen.truncate(depth);
        self.chosen.push(key.to_string());
        Ok(self.stage())
    }

    /// Reset `level` to nothing, discarding every deeper choice.
    pub fn clear(&mut self, level: Level) -> Stage {
        self.chosen.truncate(level.depth());
        self.stage()
    }

    /// The series for a complete selection.
    pub fn series<'a>(&self, index: &'a MarketIndex) -> Result<&'a PriceSeries, SelectionError> {
        match self.chosen.as_slice() {
            [state, district, market, crop] => Ok(index.series_for(
                [state.as_str(), district.as_str(), market.as_str()],
                crop,
            )?),
            _ => Err(SelectionError::Incomplete),
        }
    }
}
