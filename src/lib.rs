//! CropSense - multilingual farm assistant toolkit
//!
//! A CLI and library around two lookups: a key-path message resolver with
//! fallback to a default language, and a hierarchical mandi price index
//! (state, district, market, crop) with 7-day price series.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Message resolution, market data, selection cascade, charts
//! - `logging`: Diagnostic logging setup
//! - `mcp`: Model Context Protocol server implementation
//! - `suggest`: Client for the external crop-suggestion endpoint

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod mcp;
pub mod suggest;
