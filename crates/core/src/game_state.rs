//! Game state module - the simulation engine
//!
//! [`GameState`] is the single mutable aggregate of a run. [`GameState::advance`]
//! is its only gameplay mutator; the renderer reads it through `&self`.
//!
//! One tick runs these steps in order (later steps see earlier results):
//!
//! 1. elapsed time and distance score
//! 2. speed ramp
//! 3. scroll offset (cosmetic)
//! 4. obstacle movement and expiry
//! 5. coin movement, collection and expiry
//! 6. obstacle spawn timer
//! 7. coin trail timer
//! 8. autopilot lane choice
//! 9. visual lane interpolation and lane commit

use arrayvec::ArrayVec;
use log::{debug, trace};

use crate::autopilot;
use crate::pool::EntityPool;
use crate::rng::LaneSource;
use crate::types::*;

pub type ObstaclePool = EntityPool<OBSTACLE_POOL_SIZE>;
pub type CoinPool = EntityPool<COIN_POOL_SIZE>;

/// Speed after `elapsed` seconds of running.
pub fn speed_at(elapsed: f64) -> f64 {
    (BASE_SPEED + elapsed * SPEED_RAMP).clamp(BASE_SPEED, MAX_SPEED)
}

/// Seconds between obstacle spawns at the given speed.
pub fn spawn_interval(speed: f64) -> f64 {
    (SPAWN_INTERVAL_BASE - speed * SPAWN_INTERVAL_SLOPE).max(SPAWN_INTERVAL_MIN)
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    width: u16,
    height: u16,
    speed: f64,
    score: u64,
    coins_collected: u32,
    /// Lane used for collection; only changes when the visual lane snaps.
    runner_lane: Lane,
    /// Lane the autopilot is steering toward.
    target_lane: Lane,
    /// Continuous lane position, rendering only.
    lane_x: f64,
    scroll_offset: f64,
    elapsed: f64,
    spawn_timer: f64,
    coin_spawn_timer: f64,
    obstacles: ObstaclePool,
    coins: CoinPool,
}

impl GameState {
    /// Create a fresh run for a viewport of the given size
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            speed: BASE_SPEED,
            score: 0,
            coins_collected: 0,
            runner_lane: Lane::Center,
            target_lane: Lane::Center,
            lane_x: Lane::Center.as_f64(),
            scroll_offset: 0.0,
            elapsed: 0.0,
            spawn_timer: 0.0,
            coin_spawn_timer: 0.0,
            obstacles: ObstaclePool::new(),
            coins: CoinPool::new(),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn coins_collected(&self) -> u32 {
        self.coins_collected
    }

    pub fn runner_lane(&self) -> Lane {
        self.runner_lane
    }

    pub fn target_lane(&self) -> Lane {
        self.target_lane
    }

    pub fn lane_x(&self) -> f64 {
        self.lane_x
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn obstacles(&self) -> &ObstaclePool {
        &self.obstacles
    }

    pub fn coins(&self) -> &CoinPool {
        &self.coins
    }

    /// Record a new terminal size. Geometry is derived per render, so
    /// nothing else needs invalidating.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// The caller clamps `dt` (see [`MAX_DT`]); it is not validated here.
    pub fn advance(&mut self, dt: f64, lanes: &mut impl LaneSource) {
        self.elapsed += dt;
        self.score += (self.speed * dt * SCORE_RATE).floor() as u64;

        self.speed = speed_at(self.elapsed);
        self.scroll_offset += self.speed * dt;

        let step = self.speed * dt;
        self.obstacles.update(|obs| {
            obs.depth -= step;
            obs.depth >= EXPIRE_DEPTH
        });
        self.move_coins(step);

        self.spawn_timer += dt;
        let interval = spawn_interval(self.speed);
        if self.spawn_timer >= interval {
            self.spawn_timer -= interval;
            self.spawn_obstacle(lanes.next_lane(), SPAWN_DEPTH);
        }

        self.coin_spawn_timer += dt;
        if self.coin_spawn_timer >= COIN_SPAWN_INTERVAL {
            self.coin_spawn_timer -= COIN_SPAWN_INTERVAL;
            self.spawn_coin_trail(lanes.next_lane());
        }

        self.run_autopilot();
        self.shift_lane(dt);
    }

    /// Move coins toward the viewer and collect those the runner reaches.
    fn move_coins(&mut self, step: f64) {
        let lane = self.runner_lane;
        let mut collected = 0u32;
        self.coins.update(|coin| {
            coin.depth -= step;
            if coin.depth > 0.0 && coin.depth < COLLECT_DEPTH && coin.lane == lane {
                collected += 1;
                return false;
            }
            coin.depth >= EXPIRE_DEPTH
        });
        self.coins_collected += collected;
        self.score += u64::from(collected) * COIN_BONUS;
    }

    /// Place an obstacle into the first free slot.
    ///
    /// Returns the slot index, or `None` when the pool is full.
    pub fn spawn_obstacle(&mut self, lane: Lane, depth: f64) -> Option<usize> {
        let slot = self.obstacles.spawn(lane, depth);
        if slot.is_none() {
            trace!("obstacle pool full, dropped spawn in {} lane", lane.as_str());
        }
        slot
    }

    /// Place a coin into the first free slot.
    pub fn spawn_coin(&mut self, lane: Lane, depth: f64) -> Option<usize> {
        let slot = self.coins.spawn(lane, depth);
        if slot.is_none() {
            trace!("coin pool full, dropped spawn in {} lane", lane.as_str());
        }
        slot
    }

    /// Spawn a trail of coins in one lane, ending at spawn depth.
    ///
    /// Each coin claims its own slot; the trail is cut short once the pool
    /// fills. The returned list holds the slots that were actually claimed.
    pub fn spawn_coin_trail(&mut self, lane: Lane) -> ArrayVec<usize, COIN_TRAIL_LEN> {
        let mut claimed = ArrayVec::new();
        for j in 0..COIN_TRAIL_LEN {
            if self.coins.is_full() {
                trace!(
                    "coin pool full, trail in {} lane cut to {}",
                    lane.as_str(),
                    claimed.len()
                );
                break;
            }
            let back = (COIN_TRAIL_LEN - 1 - j) as f64;
            let depth = SPAWN_DEPTH - back * COIN_TRAIL_SPACING;
            if let Some(slot) = self.spawn_coin(lane, depth) {
                claimed.push(slot);
            }
        }
        claimed
    }

    fn run_autopilot(&mut self) {
        let next = autopilot::steer(&self.obstacles, &self.coins, self.target_lane);
        if next != self.target_lane {
            debug!(
                "autopilot: {} -> {} at t={:.2}",
                self.target_lane.as_str(),
                next.as_str(),
                self.elapsed
            );
            self.target_lane = next;
        }
    }

    /// Slide the visual lane toward the target; commit the logical lane on snap.
    fn shift_lane(&mut self, dt: f64) {
        let target = self.target_lane.as_f64();
        let diff = target - self.lane_x;
        if diff > LANE_SNAP_EPSILON {
            self.lane_x = (self.lane_x + dt * LANE_SHIFT_RATE).min(target);
        } else if diff < -LANE_SNAP_EPSILON {
            self.lane_x = (self.lane_x - dt * LANE_SHIFT_RATE).max(target);
        } else {
            self.lane_x = target;
            self.runner_lane = self.target_lane;
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(FALLBACK_VIEWPORT.0, FALLBACK_VIEWPORT.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    fn always(lane: Lane) -> impl FnMut() -> Lane {
        move || lane
    }

    fn place_runner(state: &mut GameState, lane: Lane) {
        state.runner_lane = lane;
        state.target_lane = lane;
        state.lane_x = lane.as_f64();
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(80, 24);
        assert_eq!(state.speed(), BASE_SPEED);
        assert_eq!(state.runner_lane(), Lane::Center);
        assert_eq!(state.target_lane(), Lane::Center);
        assert_eq!(state.lane_x(), 1.0);
        assert_eq!(state.obstacles().active_count(), 0);
        assert_eq!(state.coins().active_count(), 0);
    }

    #[test]
    fn test_obstacle_moves_by_speed_times_dt() {
        let mut state = GameState::new(80, 24);
        let slot = state.spawn_obstacle(Lane::Center, 10.0).unwrap();

        state.advance(1.0, &mut always(Lane::Left));

        // Speed ramps to 6.05 during the tick before entities move.
        let obs = state.obstacles().get(slot).expect("still active");
        assert!((obs.depth - (10.0 - state.speed())).abs() < 1e-9);
        assert!((obs.depth - 4.0).abs() < 0.1);
    }

    #[test]
    fn test_coin_collected_in_runner_lane() {
        let mut state = GameState::new(80, 24);
        place_runner(&mut state, Lane::Left);
        let slot = state.spawn_coin(Lane::Left, 1.0).unwrap();

        state.advance(0.05, &mut always(Lane::Right));

        assert!(state.coins().get(slot).is_none());
        assert_eq!(state.coins_collected(), 1);
        assert!(state.score() >= COIN_BONUS);
    }

    #[test]
    fn test_coin_in_other_lane_is_not_collected() {
        let mut state = GameState::new(80, 24);
        let slot = state.spawn_coin(Lane::Left, 1.0).unwrap();

        state.advance(0.05, &mut always(Lane::Right));

        assert!(state.coins().get(slot).is_some());
        assert_eq!(state.coins_collected(), 0);
    }

    #[test]
    fn test_coin_collected_only_once() {
        let mut state = GameState::new(80, 24);
        state.spawn_coin(Lane::Center, 1.5);

        for _ in 0..10 {
            state.advance(0.05, &mut always(Lane::Right));
        }
        assert_eq!(state.coins_collected(), 1);
    }

    #[test]
    fn test_all_lanes_dangerous_keeps_target() {
        let mut state = GameState::new(80, 24);
        for lane in Lane::ALL {
            state.spawn_obstacle(lane, 5.0);
        }
        assert_eq!(state.target_lane(), Lane::Center);

        state.advance(0.05, &mut always(Lane::Left));
        assert_eq!(state.target_lane(), Lane::Center);
    }

    #[test]
    fn test_safe_target_ignores_coins_elsewhere() {
        let mut state = GameState::new(80, 24);
        state.spawn_obstacle(Lane::Left, 5.0);
        state.spawn_coin(Lane::Right, 5.0);

        state.advance(0.05, &mut always(Lane::Left));
        assert_eq!(state.target_lane(), Lane::Center);
    }

    #[test]
    fn test_dodge_prefers_coin_lane() {
        let mut state = GameState::new(80, 24);
        state.spawn_obstacle(Lane::Center, 5.0);
        state.spawn_coin(Lane::Right, 6.0);

        state.advance(0.05, &mut always(Lane::Left));
        assert_eq!(state.target_lane(), Lane::Right);
        // Visual lane starts moving, logical lane waits for the snap.
        assert!(state.lane_x() > 1.0);
        assert_eq!(state.runner_lane(), Lane::Center);
    }

    #[test]
    fn test_lane_commits_only_on_snap() {
        let mut state = GameState::new(80, 24);
        state.target_lane = Lane::Left;

        let mut ticks = 0;
        while state.runner_lane() != Lane::Left {
            state.advance(0.05, &mut always(Lane::Right));
            ticks += 1;
            assert!(ticks < 20, "lane never committed");
            if state.runner_lane() != Lane::Left {
                assert!(state.lane_x() >= 0.0);
            }
        }
        assert_eq!(state.lane_x(), 0.0);
        assert_eq!(state.target_lane(), Lane::Left);
    }

    #[test]
    fn test_entities_expire_below_threshold() {
        let mut state = GameState::new(80, 24);
        state.spawn_obstacle(Lane::Left, -0.9);
        state.spawn_coin(Lane::Right, -0.9);

        state.advance(0.05, &mut always(Lane::Center));
        assert_eq!(state.obstacles().active_count(), 0);
        assert_eq!(state.coins().active_count(), 0);
    }

    #[test]
    fn test_obstacle_spawns_on_interval() {
        let mut state = GameState::new(80, 24);
        let interval = spawn_interval(BASE_SPEED);
        let ticks = (interval / 0.05).ceil() as usize + 1;
        for _ in 0..ticks {
            state.advance(0.05, &mut always(Lane::Right));
        }
        assert!(state.obstacles().iter().any(|o| o.lane == Lane::Right));
    }

    #[test]
    fn test_coin_trail_spacing() {
        let mut state = GameState::new(80, 24);
        let slots = state.spawn_coin_trail(Lane::Left);
        assert_eq!(slots.len(), COIN_TRAIL_LEN);

        let depths: Vec<f64> = slots
            .iter()
            .map(|&s| state.coins().get(s).unwrap().depth)
            .collect();
        assert_eq!(depths, vec![16.0, 17.5, 19.0]);
        assert!(state.coins().iter().all(|c| c.lane == Lane::Left));
    }

    #[test]
    fn test_full_pool_drops_spawns() {
        let mut state = GameState::new(80, 24);
        for _ in 0..OBSTACLE_POOL_SIZE {
            assert!(state.spawn_obstacle(Lane::Left, SPAWN_DEPTH).is_some());
        }
        assert_eq!(state.spawn_obstacle(Lane::Left, SPAWN_DEPTH), None);

        // A spawn timer trigger with a full pool is a silent no-op.
        state.spawn_timer = 10.0;
        state.advance(0.01, &mut always(Lane::Left));
        assert_eq!(state.obstacles().active_count(), OBSTACLE_POOL_SIZE);
    }

    #[test]
    fn test_partial_trail_when_coin_pool_nearly_full() {
        let mut state = GameState::new(80, 24);
        for _ in 0..COIN_POOL_SIZE - 1 {
            state.spawn_coin(Lane::Center, SPAWN_DEPTH);
        }
        let slots = state.spawn_coin_trail(Lane::Left);
        assert_eq!(slots.len(), 1);
        assert_eq!(state.coins().get(slots[0]).map(|c| c.depth), Some(16.0));
        assert!(state.coins().is_full());
        assert!(state.spawn_coin_trail(Lane::Right).is_empty());
    }

    #[test]
    fn test_speed_ramp_and_cap() {
        assert_eq!(speed_at(0.0), BASE_SPEED);
        assert!((speed_at(20.0) - 7.0).abs() < 1e-9);
        assert_eq!(speed_at(10_000.0), MAX_SPEED);
    }

    #[test]
    fn test_spawn_interval_floor_and_top_speed() {
        assert!((spawn_interval(BASE_SPEED) - 1.64).abs() < 1e-9);
        // Top speed stays above the floor; only faster speeds would clamp.
        assert!((spawn_interval(MAX_SPEED) - 1.04).abs() < 1e-9);
        assert_eq!(spawn_interval(25.0), SPAWN_INTERVAL_MIN);
    }

    #[test]
    fn test_long_run_invariants() {
        let mut state = GameState::new(80, 24);
        let mut rng = SimpleRng::new(42);
        let mut last_speed = state.speed();
        let mut last_score = state.score();
        let mut last_coins = state.coins_collected();

        for i in 0..5_000 {
            let dt = 0.01 + (i % 10) as f64 * 0.01;
            state.advance(dt, &mut rng);

            assert!(state.speed() >= last_speed);
            assert!(state.speed() <= MAX_SPEED);
            assert!(state.score() >= last_score);
            assert!(state.coins_collected() >= last_coins);
            assert!(state.obstacles().iter().all(|o| o.depth >= EXPIRE_DEPTH));
            assert!(state.coins().iter().all(|c| c.depth >= EXPIRE_DEPTH));
            assert!(state.obstacles().iter().all(|o| o.depth <= SPAWN_DEPTH));
            assert!(state.coins().iter().all(|c| c.depth <= SPAWN_DEPTH));
            assert!((0.0..=2.0).contains(&state.lane_x()));

            last_speed = state.speed();
            last_score = state.score();
            last_coins = state.coins_collected();
        }
        assert_eq!(state.speed(), MAX_SPEED);
    }

    #[test]
    fn test_resize_updates_dimensions_only() {
        let mut state = GameState::new(80, 24);
        state.spawn_obstacle(Lane::Left, 12.0);
        state.resize(120, 40);
        assert_eq!((state.width(), state.height()), (120, 40));
        assert_eq!(state.obstacles().active_count(), 1);
    }
}
