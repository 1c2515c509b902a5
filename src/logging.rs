//! Tracing subscriber setup.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset, by `-v` count.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "notes_api=info,tower_http=info",
        1 => "notes_api=debug,tower_http=debug",
        _ => "trace",
    }
}

/// Installs the global subscriber, writing to stderr so command output on
/// stdout stays clean.
pub fn init(verbose: u8, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow!("failed to initialise logging: {e}"))
}
