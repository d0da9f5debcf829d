//! Autopilot - the runner's lane-choice policy.
//!
//! A single-step policy, not a pathfinder: look at what is inside the
//! lookahead window this tick and pick a lane. It never moves while the
//! current target is safe, so the runner does not chase coins across lanes.

use crate::pool::EntityPool;
use crate::types::{Lane, LANE_COUNT, LOOKAHEAD_DEPTH};

/// Per-lane flags indexed by [`Lane::index`].
pub type LaneFlags = [bool; LANE_COUNT];

/// True when `depth` lies strictly inside the lookahead window.
#[inline]
fn in_lookahead(depth: f64) -> bool {
    depth > 0.0 && depth < LOOKAHEAD_DEPTH
}

/// Lanes holding at least one obstacle inside the lookahead window.
pub fn danger_map<const N: usize>(obstacles: &EntityPool<N>) -> LaneFlags {
    let mut danger = [false; LANE_COUNT];
    for obs in obstacles.iter().filter(|o| in_lookahead(o.depth)) {
        danger[obs.lane.index()] = true;
    }
    danger
}

/// Lanes holding at least one coin nearer than the lookahead depth.
///
/// Unlike [`danger_map`] there is no lower bound: a coin that has just
/// slipped behind the runner still pulls it toward that lane.
pub fn coin_map<const N: usize>(coins: &EntityPool<N>) -> LaneFlags {
    let mut found = [false; LANE_COUNT];
    for coin in coins.iter().filter(|c| c.depth < LOOKAHEAD_DEPTH) {
        found[coin.lane.index()] = true;
    }
    found
}

/// Pick the lane to steer toward.
///
/// - current target safe: keep it
/// - otherwise: first safe lane left to right, overridden by any safe lane
///   with a coin ahead (the last such lane in scan order wins)
/// - every lane dangerous: keep the current target and take the hit
pub fn choose_lane(danger: LaneFlags, coins: LaneFlags, current: Lane) -> Lane {
    if !danger[current.index()] {
        return current;
    }

    let mut best = None;
    for lane in Lane::ALL {
        if danger[lane.index()] {
            continue;
        }
        if best.is_none() || coins[lane.index()] {
            best = Some(lane);
        }
    }
    best.unwrap_or(current)
}

/// Convenience wrapper over the two pools.
pub fn steer<const N: usize, const M: usize>(
    obstacles: &EntityPool<N>,
    coins: &EntityPool<M>,
    current: Lane,
) -> Lane {
    choose_lane(danger_map(obstacles), coin_map(coins), current)
}
