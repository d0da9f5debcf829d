//! Projection math: world (lane, depth) to screen (row, column).
//!
//! The horizon sits at `height / 3`. A depth fraction of 0 lands on the
//! horizon and 1 on the bottom row; note the fraction is `1 - depth / far`,
//! so a *small* depth (near) gives a fraction close to 1 and a wide track.

use crate::types::{FAR_DEPTH, LANE_COUNT, MIN_TRACK_WIDTH, TRACK_WIDTH};

/// Viewport-dependent projection. Cheap to build; recomputed every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    width: i32,
    height: i32,
    horizon: i32,
}

/// Horizontal extent of the track (or an entity's slice of it) on one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSpan {
    /// Left rail column
    pub left: i32,
    /// Right rail column
    pub right: i32,
    /// Projected track width the lanes are divided from
    pub width: i32,
}

impl TrackSpan {
    pub fn lane_width(&self) -> f64 {
        self.width as f64 / LANE_COUNT as f64
    }
}

impl Projection {
    pub fn new(width: u16, height: u16) -> Self {
        let height = height as i32;
        Self {
            width: width as i32,
            height,
            horizon: height / 3,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn horizon(&self) -> i32 {
        self.horizon
    }

    pub fn center_x(&self) -> i32 {
        self.width / 2
    }

    /// Rows from the horizon to the bottom edge.
    pub fn ground_rows(&self) -> i32 {
        self.height - self.horizon
    }

    /// Depth fraction of a world depth, `None` when the depth is outside
    /// `[0, FAR_DEPTH]` (not visible this frame).
    pub fn depth_fraction(depth: f64) -> Option<f64> {
        if !(0.0..=FAR_DEPTH).contains(&depth) {
            return None;
        }
        Some(1.0 - depth / FAR_DEPTH)
    }

    pub fn screen_row(&self, fraction: f64) -> i32 {
        self.horizon + (fraction * self.ground_rows() as f64).floor() as i32
    }

    /// Inverse of [`screen_row`](Self::screen_row) for ground rows.
    pub fn row_fraction(&self, row: i32) -> f64 {
        let rows = self.ground_rows();
        if rows <= 0 {
            return 0.0;
        }
        (row - self.horizon) as f64 / rows as f64
    }

    /// Unclamped projected track width.
    pub fn projected_width(fraction: f64) -> i32 {
        (TRACK_WIDTH as f64 * fraction).floor() as i32
    }

    pub fn track_width_at(fraction: f64) -> i32 {
        Self::projected_width(fraction).max(MIN_TRACK_WIDTH)
    }

    pub fn track_half_width_at(fraction: f64) -> i32 {
        Self::track_width_at(fraction) / 2
    }

    /// Track band for a ground row, centred on the viewport.
    pub fn track_span(&self, fraction: f64) -> TrackSpan {
        let width = Self::track_width_at(fraction);
        let half = width / 2;
        let center = self.center_x();
        TrackSpan {
            left: center - half,
            right: center + half,
            width,
        }
    }

    /// Track slice used to place an entity, `None` while it is too far away
    /// to resolve (projected width under the minimum).
    pub fn entity_span(&self, fraction: f64) -> Option<TrackSpan> {
        let width = Self::projected_width(fraction);
        if width < MIN_TRACK_WIDTH {
            return None;
        }
        let half = width / 2;
        let center = self.center_x();
        Some(TrackSpan {
            left: center - half,
            right: center + half,
            width,
        })
    }
}

/// Column inside a lane: `offset` 0.0 is the lane's left edge, 0.5 its centre.
///
/// `lane` is continuous so the runner can be drawn mid-transition.
pub fn lane_to_screen_x(lane: f64, track_left: i32, lane_width: f64, offset: f64) -> i32 {
    track_left + (lane * lane_width + lane_width * offset).floor() as i32
}
