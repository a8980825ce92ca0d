//! Theme style data model: fills, gradients, strokes and drop shadows per
//! segment kind.
//!
//! These types mirror the parsed theme layout and derive serde so a host can
//! deserialize them straight from the theme JSON. Color fields stay as the raw
//! tokens the theme carries; they are normalized at render time.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

/// Semantic category of a wheel segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelSegmentKind {
    Odd,
    Even,
    Nowin,
    Jackpot,
}

impl WheelSegmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WheelSegmentKind::Odd => "odd",
            WheelSegmentKind::Even => "even",
            WheelSegmentKind::Nowin => "nowin",
            WheelSegmentKind::Jackpot => "jackpot",
        }
    }
}

impl fmt::Display for WheelSegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A paint source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fill {
    Solid { color: String },
    Gradient { gradient: Gradient },
}

impl Fill {
    pub fn solid(color: impl Into<String>) -> Self {
        Fill::Solid {
            color: color.into(),
        }
    }

    pub fn gradient(gradient: Gradient) -> Self {
        Fill::Gradient { gradient }
    }

    pub fn as_gradient(&self) -> Option<&Gradient> {
        match self {
            Fill::Gradient { gradient } => Some(gradient),
            Fill::Solid { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Linear,
    Radial,
    Angular,
    Diamond,
}

impl GradientKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GradientKind::Linear => "linear",
            GradientKind::Radial => "radial",
            GradientKind::Angular => "angular",
            GradientKind::Diamond => "diamond",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: String,
    /// Offset along the gradient in `[0, 1]`
    pub position: f64,
}

impl GradientStop {
    pub fn new(color: impl Into<String>, position: f64) -> Self {
        Self {
            color: color.into(),
            position,
        }
    }
}

/// 2x3 affine matrix stored row-major as `[[a, c, e], [b, d, f]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Affine(pub [[f64; 3]; 2]);

impl Affine {
    pub const IDENTITY: Affine = Affine([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

    /// Components in SVG `matrix()` order: `(a, b, c, d, e, f)`.
    pub fn components(&self) -> [f64; 6] {
        let [[a, c, e], [b, d, f]] = self.0;
        [a, b, c, d, e, f]
    }

    pub fn is_identity(&self) -> bool {
        *self == Affine::IDENTITY
    }
}

impl Default for Affine {
    fn default() -> Self {
        Affine::IDENTITY
    }
}

/// A handle position in gradient space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandlePoint {
    pub x: f64,
    pub y: f64,
}

impl From<HandlePoint> for DVec2 {
    fn from(p: HandlePoint) -> DVec2 {
        dvec2(p.x, p.y)
    }
}

/// Handle-based gradient positioning: origin, x-axis end and y-axis end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientHandles {
    pub origin: HandlePoint,
    pub x_axis: HandlePoint,
    pub y_axis: HandlePoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    #[serde(rename = "type")]
    pub kind: GradientKind,
    pub stops: Vec<GradientStop>,
    #[serde(default)]
    pub rotation_degrees: f64,
    #[serde(default)]
    pub transform: Affine,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handles: Option<GradientHandles>,
}

impl Gradient {
    pub fn linear(stops: Vec<GradientStop>, rotation_degrees: f64) -> Self {
        Self {
            kind: GradientKind::Linear,
            stops,
            rotation_degrees,
            transform: Affine::IDENTITY,
            handles: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropShadow {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur_radius: f64,
    /// Only meaningful for shape shadows; text shadows ignore it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread_radius: Option<f64>,
    pub color: String,
}

impl DropShadow {
    pub fn new(offset_x: f64, offset_y: f64, blur_radius: f64, color: impl Into<String>) -> Self {
        Self {
            offset_x,
            offset_y,
            blur_radius,
            spread_radius: None,
            color: color.into(),
        }
    }

    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread_radius = Some(spread);
        self
    }
}

fn default_stroke_width() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub fill: Fill,
    #[serde(default = "default_stroke_width")]
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OuterStyle {
    #[serde(default)]
    pub fill: Option<Fill>,
    #[serde(default)]
    pub stroke: Option<Stroke>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drop_shadows: Vec<DropShadow>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default)]
    pub fill: Option<Fill>,
    #[serde(default)]
    pub stroke: Option<Stroke>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drop_shadows: Vec<DropShadow>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentStyle {
    #[serde(default)]
    pub outer: OuterStyle,
    #[serde(default)]
    pub text: Option<TextStyle>,
}

impl SegmentStyle {
    /// The style used for kinds the theme does not describe.
    pub fn transparent() -> Self {
        SegmentStyle {
            outer: OuterStyle {
                fill: Some(Fill::solid("transparent")),
                stroke: None,
                drop_shadows: Vec::new(),
            },
            text: None,
        }
    }
}

/// Partial mapping from segment kind to its style.
pub type StyleMap = BTreeMap<WheelSegmentKind, SegmentStyle>;

/// Resolve the style for `kind`, falling back to [`SegmentStyle::transparent`].
pub fn resolve_style(styles: &StyleMap, kind: WheelSegmentKind) -> Cow<'_, SegmentStyle> {
    match styles.get(&kind) {
        Some(style) => Cow::Borrowed(style),
        None => Cow::Owned(SegmentStyle::transparent()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_falls_back_to_transparent() {
        let mut styles = StyleMap::new();
        styles.insert(
            WheelSegmentKind::Odd,
            SegmentStyle {
                outer: OuterStyle {
                    fill: Some(Fill::solid("#ff0000")),
                    ..OuterStyle::default()
                },
                text: None,
            },
        );

        let odd = resolve_style(&styles, WheelSegmentKind::Odd);
        assert!(matches!(odd, Cow::Borrowed(_)));
        assert_eq!(odd.outer.fill, Some(Fill::solid("#ff0000")));

        let jackpot = resolve_style(&styles, WheelSegmentKind::Jackpot);
        assert_eq!(*jackpot, SegmentStyle::transparent());
    }

    #[test]
    fn affine_components_are_column_major() {
        let m = Affine([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(m.components(), [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert!(Affine::default().is_identity());
    }

    #[test]
    fn deserializes_theme_style_map() {
        let json = r##"{
            "jackpot": {
                "outer": {
                    "fill": {
                        "type": "gradient",
                        "gradient": {
                            "type": "linear",
                            "stops": [
                                {"color": "#ffd700", "position": 0},
                                {"color": "#ff8c00cc", "position": 1}
                            ],
                            "rotationDegrees": 45
                        }
                    },
                    "stroke": {"fill": {"type": "solid", "color": "#ffffff"}, "width": 2}
                },
                "text": {
                    "fill": {"type": "solid", "color": "#000000"},
                    "dropShadows": [
                        {"offsetX": 2, "offsetY": 2, "blurRadius": 4, "color": "#00000080"}
                    ]
                }
            },
            "odd": {"outer": {"fill": {"type": "solid", "color": "#1e90ff"}}}
        }"##;

        let styles: StyleMap = serde_json::from_str(json).unwrap();
        assert_eq!(styles.len(), 2);

        let jackpot = &styles[&WheelSegmentKind::Jackpot];
        let fill = jackpot.outer.fill.as_ref();
        let gradient = fill.and_then(Fill::as_gradient).unwrap();
        assert_eq!(gradient.kind, GradientKind::Linear);
        assert_eq!(gradient.rotation_degrees, 45.0);
        assert!(gradient.transform.is_identity());
        assert_eq!(jackpot.outer.stroke.as_ref().map(|s| s.width), Some(2.0));

        let text = jackpot.text.as_ref().unwrap();
        assert_eq!(text.drop_shadows.len(), 1);
        assert_eq!(text.drop_shadows[0].spread_radius, None);

        assert!(styles[&WheelSegmentKind::Odd].text.is_none());
    }
}
