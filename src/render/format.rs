//! Numeric formatting shared by every serialized coordinate.

use glam::DVec2;

/// Decimal places kept in serialized numbers.
pub const PRECISION: i32 = 6;

/// Format a number for SVG output.
///
/// Rounds to six decimals, strips trailing zeros, and collapses `-0`, NaN and
/// the infinities to `"0"`.
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let factor = 10f64.powi(PRECISION);
    let scaled = value * factor;
    let rounded = if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    };
    if rounded == 0.0 {
        return "0".to_string();
    }

    let mut s = format!("{:.*}", PRECISION as usize, rounded);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    s
}

/// Format a point as `"x y"`.
pub fn fmt_point(p: DVec2) -> String {
    format!("{} {}", fmt_num(p.x), fmt_num(p.y))
}

/// Format a percentage such as a gradient stop offset.
pub fn fmt_percent(fraction: f64) -> String {
    format!("{}%", fmt_num(fraction * 100.0))
}
