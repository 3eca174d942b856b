//! Geometry utilities: the pure math behind pinch, pan, zoom and overlay
//! placement. Points are `kurbo::Point` in viewport (container) pixels.

use kurbo::{Point, Size, Vec2};

/// Straight-line distance between two points.
///
/// The single primitive for pinch-zoom: `scale_factor = current / start`.
pub fn distance(p1: Point, p2: Point) -> f64 {
    p1.distance(p2)
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f64::clamp` this never panics; with inverted bounds `max` wins.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Round a zoom factor to 2 decimal places so repeated wheel/pinch steps
/// don't accumulate float drift.
pub fn round_scale(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Clamp then round. Every zoom path computes its new scale here.
///
/// Bounds off the 0.01 grid are pulled inward to the nearest grid step, so
/// the result is always both in range and 2-decimal. If no grid step fits
/// between the bounds the plain clamp is returned.
pub fn clamp_scale(value: f64, min: f64, max: f64) -> f64 {
    let lo = grid_step_at_or_above(min);
    let hi = grid_step_at_or_below(max);
    if lo > hi {
        return clamp(value, min, max);
    }
    clamp(round_scale(value), lo, hi)
}

fn grid_step_at_or_above(bound: f64) -> f64 {
    let nearest = round_scale(bound);
    if nearest >= bound {
        nearest
    } else {
        (bound * 100.0).ceil() / 100.0
    }
}

fn grid_step_at_or_below(bound: f64) -> f64 {
    let nearest = round_scale(bound);
    if nearest <= bound {
        nearest
    } else {
        (bound * 100.0).floor() / 100.0
    }
}

/// Offset a point by the same pixel margin on both axes (tooltip placement).
pub fn offset_point(p: Point, margin: f64) -> Point {
    p + Vec2::new(margin, margin)
}

/// Keep an overlay of `size` anchored at `anchor` inside `bounds`.
///
/// Used after a context menu has been laid out: if it would spill past the
/// right or bottom edge it is shifted back, never past the top-left corner.
pub fn clamp_to_viewport(anchor: Point, size: Size, bounds: Size) -> Point {
    let x = if anchor.x + size.width > bounds.width {
        (bounds.width - size.width).max(0.0)
    } else {
        anchor.x.max(0.0)
    };
    let y = if anchor.y + size.height > bounds.height {
        (bounds.height - size.height).max(0.0)
    } else {
        anchor.y.max(0.0)
    };
    Point::new(x, y)
}
