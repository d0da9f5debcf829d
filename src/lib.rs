//! TUI Runner (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_runner::{core,input,term,types}` and
//! owns the harness plumbing: configuration, file logging and signal handling.

pub mod config;
pub mod logging;
pub mod signals;

pub use tui_runner_core as core;
pub use tui_runner_input as input;
pub use tui_runner_term as term;
pub use tui_runner_types as types;
