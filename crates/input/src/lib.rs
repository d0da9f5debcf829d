//! Terminal input module.
//!
//! The runner steers itself, so the keyboard only drives the harness: it
//! maps `crossterm` key events into [`crate::types::RunnerAction`].

pub mod map;

pub use tui_runner_types as types;

pub use map::{map_key, should_quit};
