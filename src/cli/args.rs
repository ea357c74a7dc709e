//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `translate`: Resolve message keys in a language
//! - `page`: Translate `data-i18n` tagged HTML pages
//! - `lang`: Show or set the preferred language
//! - `locales`: List languages with translation coverage
//! - `market`: Walk the state/district/market/crop cascade
//! - `prices`: Show the 7-day price chart for one crop
//! - `suggest`: Ask the suggestion endpoint for crop recommendations
//! - `init`: Initialize a cropsense configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        self.common.verbose
    }
}

/// Arguments accepted by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Language to display (overrides the saved preference)
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// Messages directory path (overrides config file)
    #[arg(long, global = true)]
    pub messages_root: Option<PathBuf>,

    /// Market dataset path (overrides config file)
    #[arg(long, global = true)]
    pub market_data: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    /// Dot-separated key paths, e.g. `market.title`
    #[arg(required = true)]
    pub keys: Vec<String>,
}

#[derive(Debug, Args)]
pub struct PageCommand {
    /// HTML file, or a directory to search for .html/.htm files
    pub path: PathBuf,

    /// Write translated pages back in place (default prints to stdout)
    #[arg(long)]
    pub write: bool,
}

#[derive(Debug, Args)]
pub struct LangCommand {
    /// Language code to save as the preferred language
    pub code: Option<String>,
}

#[derive(Debug, Args)]
pub struct MarketCommand {
    pub state: Option<String>,
    pub district: Option<String>,
    pub market: Option<String>,
}

#[derive(Debug, Args)]
pub struct PricesCommand {
    pub state: String,
    pub district: String,
    pub market: String,
    pub crop: String,
}

#[derive(Debug, Args)]
pub struct SuggestCommand {
    #[arg(long, default_value = "")]
    pub soil_type: String,

    #[arg(long, default_value = "")]
    pub location: String,

    /// Water availability
    #[arg(long, default_value = "")]
    pub water: String,

    /// Crops grown in previous seasons
    #[arg(long, default_value = "")]
    pub past_crops: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve message keys and print their text
    Translate(TranslateCommand),
    /// Translate elements tagged with data-i18n in HTML pages
    Page(PageCommand),
    /// Show or set the preferred language
    Lang(LangCommand),
    /// List available languages and their translation coverage
    Locales,
    /// List the options at the next level of the market cascade
    Market(MarketCommand),
    /// Show the 7-day price trend for a crop at a market
    Prices(PricesCommand),
    /// Get crop recommendations from the suggestion service
    Suggest(SuggestCommand),
    /// Initialize a new .cropsenserc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
