//! Color tokens from theme files and the light-bulb palette derived from them.
//!
//! Theme exports carry hex colors with an optional alpha byte (`#rrggbbaa`).
//! SVG paint needs that alpha spelled out, so every color is normalized to
//! [`Color`] and serialized as `#rrggbb` when opaque or `rgba(...)` otherwise.
//! Tokens that cannot be read become fully transparent.

use std::fmt;

use crate::log;
use crate::render::format::fmt_num;

/// An sRGB color with straight alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Color { r, g, b, a }
    }

    /// Parse a color token. Returns `None` for anything unreadable.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") || s.eq_ignore_ascii_case("transparent") {
            return Some(Color::TRANSPARENT);
        }

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }

        let lower = s.to_ascii_lowercase();
        if let Some(inner) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(inner);
        }

        named(&lower)
    }

    /// Parse a color token, degrading to transparent with a warning.
    pub fn parse_or_transparent(s: &str) -> Self {
        match Color::parse(s) {
            Some(color) => color,
            None => {
                log::warn!(token = s, "unreadable color token, using transparent");
                Color::TRANSPARENT
            }
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Color {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Linear blend toward `other`; `t = 0` keeps `self`, `t = 1` yields `other`.
    pub fn mix(self, other: Color, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Serialize as SVG paint.
    pub fn to_paint(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                fmt_num(self.a.max(0.0))
            )
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_paint())
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        // #abc -> #aabbcc, #abcd -> #aabbccdd
        3 | 4 => {
            let r = nibble(0)? * 17;
            let g = nibble(1)? * 17;
            let b = nibble(2)? * 17;
            let a = if hex.len() == 4 { nibble(3)? * 17 } else { 255 };
            Some(Color::rgba(r, g, b, a as f64 / 255.0))
        }
        6 | 8 => {
            let r = byte(0)?;
            let g = byte(2)?;
            let b = byte(4)?;
            let a = if hex.len() == 8 { byte(6)? } else { 255 };
            Some(Color::rgba(r, g, b, a as f64 / 255.0))
        }
        _ => None,
    }
}

fn parse_functional(inner: &str) -> Option<Color> {
    let parts: Vec<&str> = inner
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let channel = |p: &str| -> Option<u8> {
        let v = match p.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().ok()? * 2.55,
            None => p.parse::<f64>().ok()?,
        };
        v.is_finite().then(|| v.clamp(0.0, 255.0).round() as u8)
    };
    let alpha = |p: &str| -> Option<f64> {
        let v = match p.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().ok()? / 100.0,
            None => p.parse::<f64>().ok()?,
        };
        v.is_finite().then(|| v.clamp(0.0, 1.0))
    };

    let a = match parts.get(3) {
        Some(p) => alpha(p)?,
        None => 1.0,
    };
    Some(Color::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        a,
    ))
}

fn named(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::rgb(0, 0, 0),
        "white" => Color::rgb(255, 255, 255),
        "red" => Color::rgb(255, 0, 0),
        "green" => Color::rgb(0, 128, 0),
        "blue" => Color::rgb(0, 0, 255),
        "yellow" => Color::rgb(255, 255, 0),
        "cyan" => Color::rgb(0, 255, 255),
        "magenta" => Color::rgb(255, 0, 255),
        "orange" => Color::rgb(255, 165, 0),
        "purple" => Color::rgb(128, 0, 128),
        "gold" => Color::rgb(255, 215, 0),
        "silver" => Color::rgb(192, 192, 192),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        _ => return None,
    };
    Some(color)
}

// ============================================================================
// Light palette
// ============================================================================

/// Precomputed variants of one bulb color for the animated lights layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightPalette {
    pub base: Color,
    /// Lit bulb body
    pub tint: Color,
    /// Bulb rim and shading
    pub shade: Color,
    /// Halo around a lit bulb
    pub glow: Color,
    /// Hot center of a lit bulb
    pub core: Color,
    /// Unlit bulb
    pub off: Color,
}

impl LightPalette {
    pub fn from_base(base: Color) -> Self {
        if base.a <= 0.0 {
            return LightPalette {
                base,
                tint: Color::TRANSPARENT,
                shade: Color::TRANSPARENT,
                glow: Color::TRANSPARENT,
                core: Color::TRANSPARENT,
                off: Color::TRANSPARENT,
            };
        }
        LightPalette {
            base,
            tint: base.mix(Color::WHITE.with_alpha(base.a), 0.45),
            shade: base.mix(Color::BLACK.with_alpha(base.a), 0.35),
            glow: base.with_alpha(0.55),
            core: base.mix(Color::WHITE.with_alpha(base.a), 0.8),
            off: base.mix(Color::BLACK.with_alpha(base.a), 0.7),
        }
    }

    /// Palette from a theme token; unreadable tokens give a transparent palette.
    pub fn from_token(token: &str) -> Self {
        LightPalette::from_base(Color::parse_or_transparent(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse("#ff8000"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(Color::parse("#abc"), Some(Color::rgb(0xaa, 0xbb, 0xcc)));
        let c = Color::parse("#ff000080").unwrap();
        assert_eq!((c.r, c.g, c.b), (255, 0, 0));
        assert!((c.a - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn eight_digit_hex_becomes_rgba_paint() {
        assert_eq!(
            Color::parse_or_transparent("#ff000080").to_paint(),
            "rgba(255, 0, 0, 0.501961)"
        );
        assert_eq!(
            Color::parse_or_transparent("#00ff00ff").to_paint(),
            "#00ff00"
        );
    }

    #[test]
    fn parses_functional_forms() {
        assert_eq!(Color::parse("rgb(1, 2, 3)"), Some(Color::rgb(1, 2, 3)));
        assert_eq!(
            Color::parse("rgba(10, 20, 30, 0.5)"),
            Some(Color::rgba(10, 20, 30, 0.5))
        );
        assert_eq!(
            Color::parse("rgb(0 0 0 / 50%)"),
            Some(Color::rgba(0, 0, 0, 0.5))
        );
    }

    #[test]
    fn malformed_tokens_are_transparent() {
        assert_eq!(Color::parse("rgba(red, 0, 0, 1)"), None);
        assert_eq!(Color::parse("#ggg"), None);
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("chartreuse-ish"), None);
        assert_eq!(
            Color::parse_or_transparent("rgb(NaN, 1, 2)"),
            Color::TRANSPARENT
        );
        assert_eq!(Color::TRANSPARENT.to_paint(), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn named_colors() {
        assert_eq!(Color::parse("White"), Some(Color::WHITE));
        assert_eq!(Color::parse("none"), Some(Color::TRANSPARENT));
    }

    #[test]
    fn mix_endpoints() {
        let red = Color::rgb(255, 0, 0);
        assert_eq!(red.mix(Color::WHITE, 0.0), red);
        assert_eq!(red.mix(Color::WHITE, 1.0), Color::WHITE);
        assert_eq!(red.mix(Color::BLACK, 0.5), Color::rgb(128, 0, 0));
    }

    #[test]
    fn palette_is_deterministic() {
        let a = LightPalette::from_token("#ffcc00");
        let b = LightPalette::from_token("#ffcc00");
        assert_eq!(a, b);
        assert_eq!(a.base, Color::rgb(255, 204, 0));
        assert_eq!(a.tint, Color::rgb(255, 227, 115));
        assert_eq!(a.glow, Color::rgba(255, 204, 0, 0.55));
        assert!(a.off.r < a.shade.r && a.shade.r <= a.base.r);
    }

    #[test]
    fn palette_from_garbage_is_transparent() {
        let p = LightPalette::from_token("rgb(x, y, z)");
        assert_eq!(p.tint, Color::TRANSPARENT);
        assert_eq!(p.glow, Color::TRANSPARENT);
    }
}
