//! File logging.
//!
//! A full-screen TUI owns stdout and the alternate screen, so log records go
//! to a file instead of stderr. Filtering follows `RUST_LOG`, default `info`.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};

/// Install `env_logger` writing to `path` (truncated).
///
/// Fails when the file cannot be opened or a logger is already installed;
/// the global logger is left untouched in both cases.
pub fn init(path: &Path) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .try_init()
        .context("logger already installed")?;
    Ok(())
}
