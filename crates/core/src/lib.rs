//! Core simulation module - pure, deterministic, and testable
//!
//! This module contains the endless-runner rules and state. It has **zero
//! dependencies** on terminals or I/O, making it:
//!
//! - **Deterministic**: randomness is injected per tick through [`LaneSource`]
//! - **Testable**: scripted lane sources reproduce exact scenarios
//! - **Allocation-free**: fixed-size entity pools, no per-tick heap churn
//!
//! # Module Structure
//!
//! - [`pool`]: fixed-capacity slot arenas for obstacles and coins
//! - [`autopilot`]: the runner's lane-choice policy
//! - [`game_state`]: the aggregate state and the per-tick update
//! - [`rng`]: lane sources (seeded LCG, closures)
//!
//! # Example
//!
//! ```
//! use tui_runner_core::{GameState, SimpleRng};
//! use tui_runner_types::{Lane, BASE_SPEED};
//!
//! let mut game = GameState::new(80, 24);
//! let mut rng = SimpleRng::new(12345);
//!
//! game.spawn_obstacle(Lane::Center, 10.0);
//! game.advance(0.05, &mut rng);
//!
//! assert!(game.speed() >= BASE_SPEED);
//! assert!(game.score() > 0);
//! ```
//!
//! # Timing
//!
//! The harness calls [`GameState::advance`] once per frame with the elapsed
//! seconds, clamped to [`types::MAX_DT`] so a stalled terminal does not teleport
//! entities through the runner.

pub mod autopilot;
pub mod game_state;
pub mod pool;
pub mod rng;

pub use tui_runner_types as types;

// Re-export commonly used types for convenience
pub use game_state::{spawn_interval, speed_at, CoinPool, GameState, ObstaclePool};
pub use pool::{Entity, EntityPool};
pub use rng::{LaneSource, SimpleRng};
