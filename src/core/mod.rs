//! Core lookups: message resolution and the mandi price cascade.
//!
//! Everything here is synchronous and side-effect free apart from
//! `preferences`, which owns the single persisted value.

pub mod chart;
pub mod format;
pub mod market;
pub mod messages;
pub mod page;
pub mod preferences;
pub mod resolver;
pub mod selection;

pub use chart::{Chart, ChartSlot};
pub use market::{LookupError, MarketDataError, MarketIndex, PriceSeries};
pub use messages::{Dictionary, KeyPath, MessageNode};
pub use resolver::{Catalog, MissingPolicy, Resolver};
pub use selection::{Level, Selection, SelectionError, Stage};
