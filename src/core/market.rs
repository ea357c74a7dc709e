//! Mandi price data as a four-level cascade.
//!
//! ```text
//! state -> district -> market -> { crops, prices: crop -> [7 days] }
//! ```
//!
//! The index is validated when it is built: every listed crop has exactly one
//! series, every series has [`SERIES_LEN`] points, and no series exists for an
//! unlisted crop. Lookups therefore never need to re-check those invariants.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of daily observations per series (a trailing week).
pub const SERIES_LEN: usize = 7;

/// Axis labels for a series, oldest first.
pub const SERIES_LABELS: [&str; SERIES_LEN] = ["-6d", "-5d", "-4d", "-3d", "-2d", "-1d", "Today"];

const BUILTIN_MARKET_DATA: &str = include_str!("../../assets/market.json");

#[derive(Debug, thiserror::Error)]
pub enum MarketDataError {
    #[error("market data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{path}: expected a JSON object")]
    NotAnObject { path: String },
    #[error("{path}: invalid market record: {source}")]
    InvalidMarket {
        path: String,
        source: serde_json::Error,
    },
    #[error("{path}: price series for '{crop}' has {len} points, expected 7")]
    SeriesLength {
        path: String,
        crop: String,
        len: usize,
    },
    #[error("{path}: crop '{crop}' is listed but has no price series")]
    MissingSeries { path: String, crop: String },
    #[error("{path}: price series for '{crop}' has no matching crop entry")]
    UnlistedSeries { path: String, crop: String },
    #[error("{path}: crop '{crop}' is listed more than once")]
    DuplicateCrop { path: String, crop: String },
}

/// A lookup for a series that does not exist.
///
/// Callers are expected to have validated the path via
/// [`MarketIndex::children_at`] / [`MarketIndex::items_at`] first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no price series for '{crop}' at {market}, {district}, {state}")]
    NotFound {
        state: String,
        district: String,
        market: String,
        crop: String,
    },
}

/// Seven daily prices in ₹ per quintal, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceSeries([u32; SERIES_LEN]);

impl PriceSeries {
    pub fn new(values: [u32; SERIES_LEN]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[u32; SERIES_LEN] {
        &self.0
    }

    /// Today's price.
    pub fn latest(&self) -> u32 {
        self.0[SERIES_LEN - 1]
    }

    pub fn min(&self) -> u32 {
        self.0.iter().copied().min().unwrap_or_default()
    }

    pub fn max(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or_default()
    }

    /// Labelled points, oldest first.
    pub fn points(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        SERIES_LABELS.iter().copied().zip(self.0.iter().copied())
    }
}

/// A mandi: the deepest level of the cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    pub name: String,
    crops: Vec<String>,
    prices: BTreeMap<String, PriceSeries>,
}

impl Market {
    /// Crops traded here, in configured order.
    pub fn crops(&self) -> impl Iterator<Item = &str> {
        self.crops.iter().map(String::as_str)
    }

    pub fn series(&self, crop: &str) -> Option<&PriceSeries> {
        self.prices.get(crop)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct District {
    pub name: String,
    pub markets: Vec<Market>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub name: String,
    pub districts: Vec<District>,
}

#[derive(Debug, Deserialize)]
struct RawMarket {
    crops: Vec<String>,
    prices: BTreeMap<String, Vec<u32>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketIndex {
    states: Vec<State>,
}

impl MarketIndex {
    /// The dataset embedded in the binary.
    pub fn builtin() -> Result<Self, MarketDataError> {
        Self::from_json_str(BUILTIN_MARKET_DATA)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read market data: {:?}", path))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Invalid market data in {:?}", path))
    }

    pub fn from_json_str(content: &str) -> Result<Self, MarketDataError> {
        let json: Value = serde_json::from_str(content)?;
        Self::from_json(&json)
    }

    /// Build the index from `{ state: { district: { market: {crops, prices} } } }`.
    ///
    /// Key order in the JSON is kept as option order.
    pub fn from_json(json: &Value) -> Result<Self, MarketDataError> {
        let mut states = Vec::new();
        for (state_name, districts_json) in as_object(json, "")? {
            let mut districts = Vec::new();
            for (district_name, markets_json) in as_object(districts_json, state_name)? {
                let district_path = format!("{}/{}", state_name, district_name);
                let mut markets = Vec::new();
                for (market_name, market_json) in as_object(markets_json, &district_path)? {
                    let market_path = format!("{}/{}", district_path, market_name);
                    markets.push(build_market(market_name, market_json, &market_path)?);
                }
                districts.push(District {
                    name: district_name.clone(),
                    markets,
                });
            }
            states.push(State {
                name: state_name.clone(),
                districts,
            });
        }
        Ok(Self { states })
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Options for the next selector given the keys chosen so far.
    ///
    /// - `[]` -> states
    /// - `[state]` -> districts
    /// - `[state, district]` -> markets
    /// - `[state, district, market]` -> crops
    ///
    /// Any unknown key, or a path longer than three, yields no options.
    pub fn children_at(&self, path: &[&str]) -> Vec<&str> {
        match path {
            [] => self.states.iter().map(|s| s.name.as_str()).collect(),
            [state] => self
                .state(state)
                .map(|s| s.districts.iter().map(|d| d.name.as_str()).collect())
                .unwrap_or_default(),
            [state, district] => self
                .district(state, district)
                .map(|d| d.markets.iter().map(|m| m.name.as_str()).collect())
                .unwrap_or_default(),
            [state, district, market] => self.items_at([*state, *district, *market]),
            _ => Vec::new(),
        }
    }

    /// Crops available at a market; empty when the path does not resolve.
    pub fn items_at(&self, path: [&str; 3]) -> Vec<&str> {
        self.market(path)
            .map(|m| m.crops().collect())
            .unwrap_or_default()
    }

    /// The price series for `crop` at a market.
    pub fn series_for(&self, path: [&str; 3], crop: &str) -> Result<&PriceSeries, LookupError> {
        self.market(path)
            .and_then(|m| m.series(crop))
            .ok_or_else(|| {
                let [state, district, market] = path;
                LookupError::NotFound {
                    state: state.to_string(),
                    district: district.to_string(),
                    market: market.to_string(),
                    crop: crop.to_string(),
                }
            })
    }

    pub fn market(&self, [state, district, market]: [&str; 3]) -> Option<&Market> {
        self.district(state, district)?
            .markets
            .iter()
            .find(|m| m.name == market)
    }

    fn state(&self, state: &str) -> Option<&State> {
        self.states.iter().find(|s| s.name == state)
    }

    fn district(&self, state: &str, district: &str) -> Option<&District> {
        self.state(state)?
            .districts
            .iter()
            .find(|d| d.name == district)
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, MarketDataError> {
    value.as_object().ok_or_else(|| MarketDataError::NotAnObject {
        path: if path.is_empty() {
            "<root>".to_string()
        } else {
            path.to_string()
        },
    })
}

fn build_market(name: &str, json: &Value, path: &str) -> Result<Market, MarketDataError> {
    let raw: RawMarket =
        serde_json::from_value(json.clone()).map_err(|source| MarketDataError::InvalidMarket {
            path: path.to_string(),
            source,
        })?;

    let mut prices = BTreeMap::new();
    for crop in &raw.crops {
        if prices.contains_key(crop) {
            return Err(MarketDataError::DuplicateCrop {
                path: path.to_string(),
                crop: crop.clone(),
            });
        }
        let values = raw
            .prices
            .get(crop)
            .ok_or_else(|| MarketDataError::MissingSeries {
                path: path.to_string(),
                crop: crop.clone(),
            })?;
        let points: [u32; SERIES_LEN] =
            values
                .as_slice()
                .try_into()
                .map_err(|_| MarketDataError::SeriesLength {
                    path: path.to_string(),
                    crop: crop.clone(),
                    len: values.len(),
                })?;
        prices.insert(crop.clone(), PriceSeries::new(points));
    }

    if let Some(extra) = raw.prices.keys().find(|crop| !prices.contains_key(*crop)) {
        return Err(MarketDataError::UnlistedSeries {
            path: path.to_string(),
            crop: extra.clone(),
        });
    }

    Ok(Market {
        name: name.to_string(),
        crops: raw.crops,
        prices,
    })
}
