//! Curved label sizing.

use super::defaults::{
    MAX_FONT_RADIUS_RATIO, MIN_FONT_RADIUS_RATIO, MIN_FONT_SIZE, TEXT_ARC_FILL,
};

/// Proportional glyph advances for printable ASCII, in hundredths of an
/// average character.
#[rustfmt::skip]
const AW_CHAR: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Estimated width of `text` in average-character units.
///
/// Characters outside printable ASCII count as one full character.
pub fn estimate_char_units(text: &str) -> f64 {
    let hundredths: u32 = text
        .chars()
        .map(|c| match c {
            ' '..='~' => AW_CHAR[(c as usize) - 0x20] as u32,
            _ => 100,
        })
        .sum();
    hundredths as f64 / 100.0
}

/// Font size that fits `text` along an arc of `radius` spanning `angle_span`
/// radians.
///
/// The result is clamped to `[max(MIN_FONT_SIZE, 0.10 r), 0.36 r]`. On tiny
/// wheels the lower bound wins. Empty text or degenerate geometry returns
/// [`MIN_FONT_SIZE`].
pub fn compute_arc_font_size(text: &str, radius: f64, angle_span: f64) -> f64 {
    let text = text.trim();
    if text.is_empty()
        || !radius.is_finite()
        || !angle_span.is_finite()
        || radius <= 0.0
        || angle_span <= 0.0
    {
        return MIN_FONT_SIZE;
    }

    let units = estimate_char_units(text);
    if units <= 0.0 {
        return MIN_FONT_SIZE;
    }

    let arc_length = radius * angle_span;
    let target = TEXT_ARC_FILL * arc_length / units;

    let lower = MIN_FONT_SIZE.max(radius * MIN_FONT_RADIUS_RATIO);
    let upper = radius * MAX_FONT_RADIUS_RATIO;
    target.min(upper).max(lower)
}
