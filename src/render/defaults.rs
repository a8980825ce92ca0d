//! Default sizes and ratios for wheel rendering (fractions of the scaled radius
//! unless noted)

/// Smallest label font size in pixels
pub const MIN_FONT_SIZE: f64 = 10.0;
/// Lower font bound relative to the radius
pub const MIN_FONT_RADIUS_RATIO: f64 = 0.10;
/// Upper font bound relative to the radius
pub const MAX_FONT_RADIUS_RATIO: f64 = 0.36;
/// Share of the available arc length a label may occupy
pub const TEXT_ARC_FILL: f64 = 0.8;

/// Radius of the curved text baseline
pub const TEXT_RADIUS_RATIO: f64 = 0.78;

/// Distance of the jackpot image center from the pivot
pub const IMAGE_RADIUS_RATIO: f64 = 0.62;
/// Largest image side
pub const IMAGE_SIZE_RATIO: f64 = 0.32;
/// Largest image side relative to the chord at the image radius
pub const IMAGE_CHORD_RATIO: f64 = 0.8;

/// Smallest segment count that still closes a circle with single-arc wedges
pub const MIN_SEGMENTS: usize = 2;

/// Prefix for definition ids when the caller supplies none
pub const ID_PREFIX: &str = "wheel";

/// Filter region margin, in bounding-box percent
pub const FILTER_REGION_MIN: &str = "-50%";
pub const FILTER_REGION_SIZE: &str = "200%";

pub const FONT_FAMILY: &str = "sans-serif";
pub const FONT_WEIGHT: &str = "bold";
/// Label paint when the theme gives the kind no text fill
pub const TEXT_FILL: &str = "#ffffff";
