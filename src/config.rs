//! Harness configuration from environment variables.
//!
//! - `RUNNER_FPS`: frame rate (default 20, clamped to 1..=120)
//! - `RUNNER_SEED`: lane RNG seed (default: derived from the clock)
//! - `RUNNER_SPLASH_MS`: title splash duration (default 1000)
//! - `RUNNER_LOG_PATH`: log file (default `<tmp>/tui-runner.log`)
//!
//! Unparsable values fall back to the default. The logger is not up yet when
//! configuration is read, so problems are collected in `warnings` for the
//! caller to log once it is.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::TARGET_FPS;

const MAX_FPS: u32 = 120;
const DEFAULT_SPLASH_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub fps: u32,
    pub seed: u32,
    pub splash_ms: u64,
    pub log_path: PathBuf,
    pub warnings: Vec<String>,
}

impl RunnerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut warnings = Vec::new();

        let fps = parse_var(&lookup, "RUNNER_FPS", &mut warnings)
            .unwrap_or(TARGET_FPS)
            .clamp(1, MAX_FPS);

        let seed = parse_var(&lookup, "RUNNER_SEED", &mut warnings).unwrap_or_else(clock_seed);

        let splash_ms =
            parse_var(&lookup, "RUNNER_SPLASH_MS", &mut warnings).unwrap_or(DEFAULT_SPLASH_MS);

        let log_path = lookup("RUNNER_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("tui-runner.log"));

        Self {
            fps,
            seed,
            splash_ms,
            log_path,
            warnings,
        }
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }

    pub fn splash_duration(&self) -> Duration {
        Duration::from_millis(self.splash_ms)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    warnings: &mut Vec<String>,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warnings.push(format!("ignoring {}={:?}: not a valid number", key, raw));
            None
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
