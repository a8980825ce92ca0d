//! Geometry functions: wedge, ring and arc paths plus wedge bounds
//!
//! Angles are radians measured clockwise from the positive x axis, which is
//! the natural orientation in SVG's y-down space. Arcs always sweep in the
//! positive direction except for the inner edge of a ring, which runs back.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::{DVec2, dvec2};

use super::path_builder::PathData;
use crate::types::WedgeBounds;

/// Spans this close to a full turn are treated as a full circle for bounds.
const FULL_TURN_EPSILON: f64 = 1e-9;

/// Point on a circle of `radius` around `(cx, cy)` at `angle`.
#[inline]
pub fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> DVec2 {
    dvec2(cx + radius * angle.cos(), cy + radius * angle.sin())
}

/// Large-arc flag for a span. A span of exactly π takes the small arc.
#[inline]
pub fn is_large_arc(start_angle: f64, end_angle: f64) -> bool {
    end_angle - start_angle > PI
}

/// Closed pie-slice path data.
pub fn wedge_path_data(
    cx: f64,
    cy: f64,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> PathData {
    let large = is_large_arc(start_angle, end_angle);
    let from = polar(cx, cy, radius, start_angle);
    let to = polar(cx, cy, radius, end_angle);
    PathData::new()
        .m(cx, cy)
        .l(from.x, from.y)
        .a(radius, large, true, to.x, to.y)
        .z()
}

/// Closed pie-slice path: center, out to the arc start, arc to the end, close.
pub fn build_wedge_path(cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) -> String {
    wedge_path_data(cx, cy, radius, start_angle, end_angle).to_string()
}

/// Annular segment path data: outer arc forward, inner arc backward.
pub fn ring_path_data(
    cx: f64,
    cy: f64,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> PathData {
    let large = is_large_arc(start_angle, end_angle);
    let outer_from = polar(cx, cy, outer_radius, start_angle);
    let outer_to = polar(cx, cy, outer_radius, end_angle);
    let inner_from = polar(cx, cy, inner_radius, end_angle);
    let inner_to = polar(cx, cy, inner_radius, start_angle);

    PathData::new()
        .m(outer_from.x, outer_from.y)
        .a(outer_radius, large, true, outer_to.x, outer_to.y)
        .l(inner_from.x, inner_from.y)
        .a(inner_radius, large, false, inner_to.x, inner_to.y)
        .z()
}

/// Annular segment path with exactly two arc commands.
pub fn build_ring_path(
    cx: f64,
    cy: f64,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> String {
    ring_path_data(cx, cy, inner_radius, outer_radius, start_angle, end_angle).to_string()
}

/// Open arc used as an invisible text baseline.
pub fn describe_arc_path(
    cx: f64,
    cy: f64,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> String {
    let large = is_large_arc(start_angle, end_angle);
    let from = polar(cx, cy, radius, start_angle);
    let to = polar(cx, cy, radius, end_angle);
    PathData::new()
        .m(from.x, from.y)
        .a(radius, large, true, to.x, to.y)
        .to_string()
}

/// Exact extreme point of the circle at cardinal index `k` (multiples of π/2).
fn cardinal_point(cx: f64, cy: f64, radius: f64, k: i64) -> DVec2 {
    match k.rem_euclid(4) {
        0 => dvec2(cx + radius, cy),
        1 => dvec2(cx, cy + radius),
        2 => dvec2(cx - radius, cy),
        _ => dvec2(cx, cy - radius),
    }
}

/// Axis-aligned bounding box of a wedge.
///
/// Extremes can sit at a cardinal angle strictly inside the span, so those
/// are folded in alongside the center and both arc endpoints.
pub fn compute_wedge_bounds(
    cx: f64,
    cy: f64,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> WedgeBounds {
    if !start_angle.is_finite() || !end_angle.is_finite() {
        return WedgeBounds {
            min_x: cx,
            min_y: cy,
            width: 0.0,
            height: 0.0,
        };
    }

    let (lo, hi) = if start_angle <= end_angle {
        (start_angle, end_angle)
    } else {
        (end_angle, start_angle)
    };

    if hi - lo >= TAU - FULL_TURN_EPSILON {
        return WedgeBounds {
            min_x: cx - radius,
            min_y: cy - radius,
            width: 2.0 * radius,
            height: 2.0 * radius,
        };
    }

    let center = dvec2(cx, cy);
    let mut min = center;
    let mut max = center;
    let mut include = |p: DVec2| {
        min = min.min(p);
        max = max.max(p);
    };

    include(polar(cx, cy, radius, lo));
    include(polar(cx, cy, radius, hi));

    // Walk the cardinals of the span shifted into [0, TAU), so k stays below 8.
    let start = lo.rem_euclid(TAU);
    let end = start + (hi - lo);
    let mut k = (start / FRAC_PI_2).floor() as i64 + 1;
    while (k as f64) * FRAC_PI_2 < end {
        include(cardinal_point(cx, cy, radius, k));
        k += 1;
    }

    WedgeBounds {
        min_x: min.x,
        min_y: min.y,
        width: max.x - min.x,
        height: max.y - min.y,
    }
}
