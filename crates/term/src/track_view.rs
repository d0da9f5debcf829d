//! TrackView: composites a [`GameState`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Each row is built by running the layers of [`LAYER_ORDER`] in sequence;
//! a later layer overwrites an earlier one at the same cell. Entities are
//! drawn in pool slot order, so when two of them land on the same cell the
//! later slot wins regardless of which is nearer.

use crate::core::{Entity, GameState};
use crate::fb::{decimal_width, FrameBuffer};
use crate::projection::{lane_to_screen_x, Projection, TrackSpan};
use crate::types::{
    DRAW_NEAR_DEPTH, LANE_COUNT, RUNNER_DEPTH_FRACTION, WALK_ANIM_RATE, WALK_FRAMES,
};

const STAR: u8 = b'.';
const HORIZON_RULE: u8 = b'_';
const GROUND_DOT: u8 = b'.';
const RAIL: u8 = b'|';
const DIVIDER: u8 = b':';
const TIE: u8 = b'-';
const OBSTACLE: u8 = b'#';
const COIN: u8 = b'o';
const HEAD: u8 = b'O';
const BODY: &str = "/|\\";
const LEGS: [&str; WALK_FRAMES] = ["/ \\", "| |", "\\ /", "| |"];

/// Obstacle block starts this far into its lane and covers this share of it.
const OBSTACLE_INSET: f64 = 0.15;
const OBSTACLE_FILL: f64 = 0.7;
/// Obstacle block height in rows.
const OBSTACLE_ROWS: i32 = 2;

/// One compositing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Sky with stars and the horizon rule
    Background,
    /// Dotted ground texture
    GroundBase,
    /// Blank track band bounded by rails
    TrackSurface,
    /// Scrolling dashed lane separators
    LaneDividers,
    /// Scrolling tread marks on blank track cells
    CrossTies,
    /// Obstacles, then coins, in pool order
    Entities,
    /// The three-row runner sprite
    Runner,
    /// Score and coin count on the top two rows
    Hud,
}

/// Draw order. Occlusion depends on it.
pub const LAYER_ORDER: [Layer; 8] = [
    Layer::Background,
    Layer::GroundBase,
    Layer::TrackSurface,
    Layer::LaneDividers,
    Layer::CrossTies,
    Layer::Entities,
    Layer::Runner,
    Layer::Hud,
];

/// Per-row geometry shared by all layers.
#[derive(Debug, Clone, Copy)]
struct RowContext {
    row: i32,
    /// Track band for ground rows (rails clamped to the viewport); `None` in the sky.
    track: Option<TrackSpan>,
}

/// Renders the runner's track.
#[derive(Debug, Clone)]
pub struct TrackView {
    runner_depth_fraction: f64,
    walk_rate: f64,
}

impl Default for TrackView {
    fn default() -> Self {
        Self {
            runner_depth_fraction: RUNNER_DEPTH_FRACTION,
            walk_rate: WALK_ANIM_RATE,
        }
    }
}

impl TrackView {
    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames; it is resized to the state's viewport as needed.
    pub fn render_into(&self, state: &GameState, fb: &mut FrameBuffer) {
        fb.resize(state.width(), state.height());
        fb.clear(b' ');
        if fb.width() == 0 || fb.height() == 0 {
            return;
        }

        let proj = Projection::new(state.width(), state.height());
        for row in 0..proj.height() {
            let ctx = row_context(&proj, row);
            for layer in LAYER_ORDER {
                self.draw_layer(layer, state, &proj, &ctx, fb);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, state: &GameState) -> FrameBuffer {
        let mut fb = FrameBuffer::new(state.width(), state.height());
        self.render_into(state, &mut fb);
        fb
    }

    fn draw_layer(
        &self,
        layer: Layer,
        state: &GameState,
        proj: &Projection,
        ctx: &RowContext,
        fb: &mut FrameBuffer,
    ) {
        match layer {
            Layer::Background => draw_background(proj, ctx, fb),
            Layer::GroundBase => draw_ground(ctx, fb),
            Layer::TrackSurface => draw_track_surface(ctx, fb),
            Layer::LaneDividers => draw_lane_dividers(state.scroll_offset(), ctx, fb),
            Layer::CrossTies => draw_cross_ties(state.scroll_offset(), ctx, fb),
            Layer::Entities => draw_entities(state, proj, ctx, fb),
            Layer::Runner => self.draw_runner(state, proj, ctx, fb),
            Layer::Hud => draw_hud(state, ctx, fb),
        }
    }

    fn draw_runner(
        &self,
        state: &GameState,
        proj: &Projection,
        ctx: &RowContext,
        fb: &mut FrameBuffer,
    ) {
        if ctx.track.is_none() {
            return;
        }
        let base = proj.screen_row(self.runner_depth_fraction);
        let span = proj.track_span(self.runner_depth_fraction);
        let x = lane_to_screen_x(state.lane_x(), span.left, span.lane_width(), 0.5);

        let row = ctx.row;
        if row == base - 2 {
            fb.put(x, row, HEAD);
        } else if row == base - 1 {
            fb.put_str(x - 1, row, BODY);
        } else if row == base {
            fb.put_str(x - 1, row, LEGS[self.walk_frame(state.elapsed())]);
        }
    }

    /// Walk cycle frame for the given run time.
    pub fn walk_frame(&self, elapsed: f64) -> usize {
        ((elapsed * self.walk_rate).floor() as i64).rem_euclid(WALK_FRAMES as i64) as usize
    }
}

fn row_context(proj: &Projection, row: i32) -> RowContext {
    if row < proj.horizon() {
        return RowContext { row, track: None };
    }

    let mut span = proj.track_span(proj.row_fraction(row));
    let last_col = proj.width() - 1;
    span.left = span.left.clamp(0, last_col);
    span.right = span.right.clamp(0, last_col);
    RowContext {
        row,
        track: Some(span),
    }
}

fn draw_background(proj: &Projection, ctx: &RowContext, fb: &mut FrameBuffer) {
    if ctx.track.is_some() {
        return;
    }
    let row = ctx.row;
    let width = proj.width();
    if row % 3 == 0 {
        // Cheap positional hash; stars stay put between frames.
        fb.put((row * 17 + 11) % width, row, STAR);
        fb.put((row * 31 + 7) % width, row, STAR);
    }
    if row == proj.horizon() - 1 {
        fb.fill_span(0, width - 1, row, HORIZON_RULE);
    }
}

fn draw_ground(ctx: &RowContext, fb: &mut FrameBuffer) {
    if ctx.track.is_none() {
        return;
    }
    let row = ctx.row;
    for x in 0..fb.width() as i32 {
        if (x + row) % 5 == 0 {
            fb.put(x, row, GROUND_DOT);
        }
    }
}

fn draw_track_surface(ctx: &RowContext, fb: &mut FrameBuffer) {
    let Some(track) = ctx.track else {
        return;
    };
    fb.fill_span(track.left, track.right, ctx.row, b' ');
    fb.put(track.left, ctx.row, RAIL);
    fb.put(track.right, ctx.row, RAIL);
}

fn draw_lane_dividers(scroll: f64, ctx: &RowContext, fb: &mut FrameBuffer) {
    let Some(track) = ctx.track else {
        return;
    };
    let dash_phase = (scroll * 2.0).floor() as i64 + ctx.row as i64;
    if dash_phase.rem_euclid(3) == 0 {
        return;
    }
    let lane_w = track.lane_width();
    for l in 1..LANE_COUNT {
        let dx = track.left + (l as f64 * lane_w).floor() as i32;
        if dx > track.left && dx < track.right {
            fb.put(dx, ctx.row, DIVIDER);
        }
    }
}

fn draw_cross_ties(scroll: f64, ctx: &RowContext, fb: &mut FrameBuffer) {
    let Some(track) = ctx.track else {
        return;
    };
    let phase = (ctx.row as f64 + scroll * 3.0).floor() as i64;
    if phase.rem_euclid(4) == 0 {
        fb.replace_span(track.left + 1, track.right - 1, ctx.row, b' ', TIE);
    }
}

/// Depth fraction of an entity that should be drawn this frame.
fn visible_fraction(entity: &Entity) -> Option<f64> {
    if entity.depth < DRAW_NEAR_DEPTH {
        return None;
    }
    Projection::depth_fraction(entity.depth)
}

fn draw_entities(state: &GameState, proj: &Projection, ctx: &RowContext, fb: &mut FrameBuffer) {
    if ctx.track.is_none() {
        return;
    }
    let row = ctx.row;

    for obs in state.obstacles().iter() {
        let Some(frac) = visible_fraction(obs) else {
            continue;
        };
        let base = proj.screen_row(frac);
        if row <= base - OBSTACLE_ROWS || row > base {
            continue;
        }
        let Some(span) = proj.entity_span(frac) else {
            continue;
        };
        let lane_w = span.lane_width();
        let x = lane_to_screen_x(obs.lane.as_f64(), span.left, lane_w, OBSTACLE_INSET);
        let w = ((lane_w * OBSTACLE_FILL).floor() as i32).max(1);
        fb.fill_span(x, x + w - 1, row, OBSTACLE);
    }

    for coin in state.coins().iter() {
        let Some(frac) = visible_fraction(coin) else {
            continue;
        };
        if proj.screen_row(frac) != row {
            continue;
        }
        let Some(span) = proj.entity_span(frac) else {
            continue;
        };
        let x = lane_to_screen_x(coin.lane.as_f64(), span.left, span.lane_width(), 0.5);
        fb.put(x, row, COIN);
    }
}

fn draw_hud(state: &GameState, ctx: &RowContext, fb: &mut FrameBuffer) {
    match ctx.row {
        0 => draw_hud_counter(fb, 0, " SCORE: ", state.score(), 7),
        1 => draw_hud_counter(fb, 1, " COINS: ", u64::from(state.coins_collected()), 1),
        _ => {}
    }
}

/// Right-aligned `label` + number + trailing space, one column in from the edge.
fn draw_hud_counter(fb: &mut FrameBuffer, row: i32, label: &str, value: u64, min_digits: usize) {
    let len = label.len() as i32 + decimal_width(value, min_digits) + 1;
    let x = fb.width() as i32 - len - 1;
    fb.put_str(x, row, label);
    let digits = fb.put_u64_padded(x + label.len() as i32, row, value, min_digits);
    fb.put(x + label.len() as i32 + digits, row, b' ');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_str(fb: &FrameBuffer, y: u16) -> String {
        String::from_utf8_lossy(fb.row(y)).into_owned()
    }

    #[test]
    fn layer_order_is_fixed() {
        assert_eq!(LAYER_ORDER[0], Layer::Background);
        assert_eq!(LAYER_ORDER[5], Layer::Entities);
        assert_eq!(LAYER_ORDER[6], Layer::Runner);
        assert_eq!(LAYER_ORDER[7], Layer::Hud);
    }

    #[test]
    fn walk_cycle_wraps() {
        let view = TrackView::default();
        assert_eq!(view.walk_frame(0.0), 0);
        assert_eq!(view.walk_frame(0.125), 1);
        assert_eq!(view.walk_frame(0.5), 0);
        assert_eq!(view.walk_frame(0.375), 3);
    }

    #[test]
    fn horizon_rule_spans_the_row() {
        let state = GameState::new(40, 24);
        let fb = TrackView::default().render(&state);
        let horizon = Projection::new(40, 24).horizon();
        let rule = row_str(&fb, (horizon - 1) as u16);
        assert!(rule.bytes().all(|c| c == HORIZON_RULE), "{rule:?}");
    }

    #[test]
    fn bottom_row_has_rails_at_full_width() {
        let state = GameState::new(80, 24);
        let fb = TrackView::default().render(&state);
        let p = Projection::new(80, 24);
        let span = p.track_span(p.row_fraction(23));
        assert_eq!(fb.get(span.left, 23), Some(RAIL));
        assert_eq!(fb.get(span.right, 23), Some(RAIL));
    }

    #[test]
    fn hud_counter_is_right_aligned() {
        let mut fb = FrameBuffer::new(30, 1);
        draw_hud_counter(&mut fb, 0, " SCORE: ", 123, 7);
        let expected = format!("{} SCORE: 0000123  ", " ".repeat(13));
        assert_eq!(row_str(&fb, 0), expected);
    }

    #[test]
    fn hud_counter_clips_on_narrow_viewports() {
        let mut fb = FrameBuffer::new(6, 1);
        draw_hud_counter(&mut fb, 0, " SCORE: ", 5, 7);
        assert_eq!(row_str(&fb, 0).len(), 6);
        // The label falls off the left edge; the number keeps its right alignment.
        assert_eq!(row_str(&fb, 0), "0005  ");
    }

    #[test]
    fn zero_sized_viewport_renders_nothing() {
        let state = GameState::new(0, 0);
        let fb = TrackView::default().render(&state);
        assert!(fb.cells().is_empty());
    }
}
