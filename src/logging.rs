//! Tracing subscriber setup for the `pnet` binary.
//!
//! Diagnostics go to stderr so stdout stays parseable for scripts.

use anyhow::{Context, Result};
use tracing::Level;

/// Install the global fmt subscriber at `level` (e.g. `"info"`).
pub fn init(level: &str) -> Result<()> {
    let level: Level = level
        .parse()
        .with_context(|| format!("Unknown log level: '{}'", level))?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
