//! RNG module - lane selection for spawns
//!
//! The simulation never owns its randomness: [`GameState::advance`] borrows a
//! [`LaneSource`] for the duration of one tick. Production code passes a
//! seeded [`SimpleRng`]; tests pass a closure that scripts exact lanes.
//!
//! [`GameState::advance`]: crate::GameState::advance

use crate::types::{Lane, LANE_COUNT};

/// Uniform source of lanes.
pub trait LaneSource {
    fn next_lane(&mut self) -> Lane;
}

impl<F> LaneSource for F
where
    F: FnMut() -> Lane,
{
    fn next_lane(&mut self) -> Lane {
        self()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max.max(1)
    }
}

impl LaneSource for SimpleRng {
    fn next_lane(&mut self) -> Lane {
        let idx = self.next_range(LANE_COUNT as u32) as usize;
        Lane::from_index(idx).unwrap_or_default()
    }
}
