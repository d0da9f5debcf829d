//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, rendering, input mapping).
//!
//! # Track Geometry
//!
//! The world is a straight three-lane track seen from behind the runner:
//!
//! - **Lanes**: 3 (left, center, right)
//! - **Depth**: distance along the track, `FAR_DEPTH` at the horizon, 0 at the viewer
//! - **Spawn depth**: new entities appear at `SPAWN_DEPTH`
//! - **Expiry**: entities are removed once their depth drops below `EXPIRE_DEPTH`
//!
//! # Tuning Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_SPEED` | 6.0 | Starting speed (depth units per second) |
//! | `MAX_SPEED` | 16.0 | Speed cap |
//! | `SPEED_RAMP` | 0.05 | Speed gained per elapsed second |
//! | `SCORE_RATE` | 10 | Points per depth unit travelled |
//! | `COIN_BONUS` | 50 | Points per collected coin |
//! | `COIN_SPAWN_INTERVAL` | 0.6 | Seconds between coin trails |
//! | `LOOKAHEAD_DEPTH` | 8.0 | How far ahead the autopilot looks for obstacles |
//!
//! # Examples
//!
//! ```
//! use tui_runner_types::{Lane, LANE_COUNT};
//!
//! assert_eq!(Lane::ALL.len(), LANE_COUNT);
//! assert_eq!(Lane::from_index(2), Some(Lane::Right));
//! assert_eq!(Lane::Center.index(), 1);
//! assert_eq!(Lane::from_index(3), None);
//! ```

/// Number of lanes on the track.
pub const LANE_COUNT: usize = 3;

/// Width of one lane at the nearest row, in terminal columns.
pub const LANE_WIDTH: i32 = 7;

/// Full projected track width at the nearest row (3 lanes plus borders).
pub const TRACK_WIDTH: i32 = LANE_COUNT as i32 * LANE_WIDTH + 4;

/// Narrowest track width ever drawn, in columns.
pub const MIN_TRACK_WIDTH: i32 = 3;

/// Depth that projects onto the horizon row.
pub const FAR_DEPTH: f64 = 20.0;

/// Depth at which obstacles spawn.
pub const SPAWN_DEPTH: f64 = FAR_DEPTH - 1.0;

/// Entities whose depth falls below this value are deactivated.
pub const EXPIRE_DEPTH: f64 = -1.0;

/// Entities nearer than this are not drawn (they are behind the runner sprite).
pub const DRAW_NEAR_DEPTH: f64 = 0.5;

/// How far ahead the autopilot scans for obstacles and coins.
pub const LOOKAHEAD_DEPTH: f64 = 8.0;

/// A coin in the runner's lane with depth in `(0, COLLECT_DEPTH)` is collected.
pub const COLLECT_DEPTH: f64 = 2.0;

/// Starting speed in depth units per second.
pub const BASE_SPEED: f64 = 6.0;

/// Speed cap.
pub const MAX_SPEED: f64 = 16.0;

/// Speed gained per elapsed second.
pub const SPEED_RAMP: f64 = 0.05;

/// Points awarded per depth unit travelled.
pub const SCORE_RATE: f64 = 10.0;

/// Points awarded per collected coin.
pub const COIN_BONUS: u64 = 50;

/// Obstacle spawn interval at zero speed (seconds).
pub const SPAWN_INTERVAL_BASE: f64 = 2.0;

/// Spawn interval reduction per unit of speed.
pub const SPAWN_INTERVAL_SLOPE: f64 = 0.06;

/// Obstacle spawn interval floor (seconds).
pub const SPAWN_INTERVAL_MIN: f64 = 0.7;

/// Seconds between coin trails.
pub const COIN_SPAWN_INTERVAL: f64 = 0.6;

/// Coins per trail.
pub const COIN_TRAIL_LEN: usize = 3;

/// Depth spacing between consecutive coins of a trail.
pub const COIN_TRAIL_SPACING: f64 = 1.5;

/// Visual lane interpolation speed (lanes per second).
pub const LANE_SHIFT_RATE: f64 = 8.0;

/// Below this distance the visual lane snaps onto the target lane.
pub const LANE_SNAP_EPSILON: f64 = 0.05;

/// Fixed depth fraction at which the runner is drawn.
pub const RUNNER_DEPTH_FRACTION: f64 = 0.85;

/// Walk cycle frames per second.
pub const WALK_ANIM_RATE: f64 = 8.0;

/// Number of frames in the walk cycle.
pub const WALK_FRAMES: usize = 4;

/// Obstacle pool capacity.
pub const OBSTACLE_POOL_SIZE: usize = 20;

/// Coin pool capacity.
pub const COIN_POOL_SIZE: usize = 30;

/// Default frame rate of the terminal harness.
pub const TARGET_FPS: u32 = 20;

/// Largest `dt` the harness hands to the simulation (seconds).
pub const MAX_DT: f64 = 0.1;

/// Viewport used when the terminal size cannot be queried.
pub const FALLBACK_VIEWPORT: (u16, u16) = (80, 24);


/// One of the three track lanes.
///
/// Lanes are ordered left to right; [`Lane::index`] gives the slot used by
/// projection math and the autopilot's danger map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

impl Lane {
    /// All lanes in scan order (left to right).
    pub const ALL: [Lane; LANE_COUNT] = [Lane::Left, Lane::Center, Lane::Right];

    /// Lane slot index (0..=2).
    pub fn index(self) -> usize {
        match self {
            Lane::Left => 0,
            Lane::Center => 1,
            Lane::Right => 2,
        }
    }

    /// Lane from a slot index, `None` outside 0..=2.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_runner_types::Lane;
    ///
    /// assert_eq!(Lane::from_index(0), Some(Lane::Left));
    /// assert_eq!(Lane::from_index(7), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Lane position as a continuous value, used for visual interpolation.
    pub fn as_f64(self) -> f64 {
        self.index() as f64
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lane::Left => "left",
            Lane::Center => "center",
            Lane::Right => "right",
        }
    }
}

/// Actions the terminal harness reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerAction {
    /// Stop the loop and restore the terminal
    Quit,
    /// Freeze or resume the simulation (rendering continues)
    TogglePause,
}
