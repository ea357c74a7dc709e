//! Diagnostic logging.
//!
//! Logs go to stderr so stdout stays clean for command output and the MCP
//! stdio transport. The filter comes from `CROPSENSE_LOG` when set.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV_VAR: &str = "CROPSENSE_LOG";

/// Build the filter used when `CROPSENSE_LOG` is unset or unparsable.
pub fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::new(if verbose { "cropsense=debug" } else { "warn" })
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| default_filter(verbose));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}
