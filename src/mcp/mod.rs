//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the message catalog and the mandi price data to AI assistants
//! over stdio.
//!
//! ## Module Structure
//!
//! - `helpers`: Project loading and tool result encoding
//! - `server`: Main MCP server implementation
//! - `types`: Tool parameter and result types

mod helpers;
mod server;
pub mod types;

pub use server::{CropSenseMcpServer, run_server};
