//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It renders a pseudo-3D view of the track into a byte framebuffer that can be
//! flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep every buffer write bounds-checked so projection math can overshoot
//! - Keep the per-frame path allocation-free once buffers are warm

pub mod fb;
pub mod projection;
pub mod renderer;
pub mod track_view;

pub use tui_runner_core as core;
pub use tui_runner_types as types;

pub use fb::FrameBuffer;
pub use projection::{lane_to_screen_x, Projection, TrackSpan};
pub use renderer::{encode_frame_into, render_frame, TerminalRenderer};
pub use track_view::{Layer, TrackView, LAYER_ORDER};
