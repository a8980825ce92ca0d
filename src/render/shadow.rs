//! Drop-shadow filter definitions.
//!
//! Each shadow becomes a small chain of filter primitives that ends in a
//! named result; a final merge stacks every result in order and puts the
//! source graphic on top.

use enum_dispatch::enum_dispatch;
use svg::Node;
use svg::node::element;

use super::format::fmt_num;
use crate::color::Color;
use crate::style::DropShadow;

/// Input name for the rendered element itself.
pub const SOURCE_GRAPHIC: &str = "SourceGraphic";
/// Input name for the alpha channel of the rendered element.
pub const SOURCE_ALPHA: &str = "SourceAlpha";

/// Common behavior of filter primitives
#[enum_dispatch]
pub trait FilterNode {
    /// The element name, e.g. `feGaussianBlur`.
    fn tag(&self) -> &'static str;

    /// Name of the result this primitive produces, if any.
    fn result(&self) -> Option<&str>;

    /// Render as an SVG node.
    fn to_node(&self) -> Box<dyn Node>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphologyOperator {
    Dilate,
    Erode,
}

impl MorphologyOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            MorphologyOperator::Dilate => "dilate",
            MorphologyOperator::Erode => "erode",
        }
    }
}

/// Grows or shrinks the shadow silhouette by the spread radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Morphology {
    pub input: String,
    pub operator: MorphologyOperator,
    pub radius: f64,
    pub result: String,
}

impl FilterNode for Morphology {
    fn tag(&self) -> &'static str {
        "feMorphology"
    }

    fn result(&self) -> Option<&str> {
        Some(&self.result)
    }

    fn to_node(&self) -> Box<dyn Node> {
        element::FilterEffectMorphology::new()
            .set("in", self.input.as_str())
            .set("operator", self.operator.as_str())
            .set("radius", fmt_num(self.radius))
            .set("result", self.result.as_str())
            .into()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaussianBlur {
    pub input: String,
    pub std_deviation: f64,
    pub result: String,
}

impl FilterNode for GaussianBlur {
    fn tag(&self) -> &'static str {
        "feGaussianBlur"
    }

    fn result(&self) -> Option<&str> {
        Some(&self.result)
    }

    fn to_node(&self) -> Box<dyn Node> {
        element::FilterEffectGaussianBlur::new()
            .set("in", self.input.as_str())
            .set("stdDeviation", fmt_num(self.std_deviation))
            .set("result", self.result.as_str())
            .into()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Offset {
    pub input: String,
    pub dx: f64,
    pub dy: f64,
    pub result: String,
}

impl FilterNode for Offset {
    fn tag(&self) -> &'static str {
        "feOffset"
    }

    fn result(&self) -> Option<&str> {
        Some(&self.result)
    }

    fn to_node(&self) -> Box<dyn Node> {
        element::FilterEffectOffset::new()
            .set("in", self.input.as_str())
            .set("dx", fmt_num(self.dx))
            .set("dy", fmt_num(self.dy))
            .set("result", self.result.as_str())
            .into()
    }
}

/// Solid shadow color; alpha is carried separately as `flood-opacity`.
#[derive(Debug, Clone, PartialEq)]
pub struct Flood {
    pub color: String,
    pub opacity: f64,
    pub result: String,
}

impl FilterNode for Flood {
    fn tag(&self) -> &'static str {
        "feFlood"
    }

    fn result(&self) -> Option<&str> {
        Some(&self.result)
    }

    fn to_node(&self) -> Box<dyn Node> {
        element::FilterEffectFlood::new()
            .set("flood-color", self.color.as_str())
            .set("flood-opacity", fmt_num(self.opacity))
            .set("result", self.result.as_str())
            .into()
    }
}

/// Clips the flood color to the offset silhouette (`operator="in"`).
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    pub input: String,
    pub input2: String,
    pub result: String,
}

impl FilterNode for Composite {
    fn tag(&self) -> &'static str {
        "feComposite"
    }

    fn result(&self) -> Option<&str> {
        Some(&self.result)
    }

    fn to_node(&self) -> Box<dyn Node> {
        element::FilterEffectComposite::new()
            .set("in", self.input.as_str())
            .set("in2", self.input2.as_str())
            .set("operator", "in")
            .set("result", self.result.as_str())
            .into()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Merge {
    pub inputs: Vec<String>,
}

impl FilterNode for Merge {
    fn tag(&self) -> &'static str {
        "feMerge"
    }

    fn result(&self) -> Option<&str> {
        None
    }

    fn to_node(&self) -> Box<dyn Node> {
        self.inputs
            .iter()
            .fold(element::FilterEffectMerge::new(), |merge, input| {
                merge.add(
                    element::FilterEffectMergeNode::new().set("in", input.as_str()),
                )
            })
            .into()
    }
}

#[enum_dispatch(FilterNode)]
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPrimitive {
    Morphology,
    GaussianBlur,
    Offset,
    Flood,
    Composite,
    Merge,
}

/// A complete `<filter>` definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDef {
    pub id: String,
    pub primitives: Vec<FilterPrimitive>,
}

impl FilterDef {
    /// A filter with no primitives renders the element unchanged.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Paint reference for the `filter` attribute.
    pub fn reference(&self) -> String {
        format!("url(#{})", self.id)
    }

    pub fn count(&self, tag: &str) -> usize {
        self.primitives.iter().filter(|p| p.tag() == tag).count()
    }
}

/// Build a shadow filter. Zero shadows give a valid, empty filter.
///
/// Blur radii follow the CSS convention, so the Gaussian standard deviation is
/// half the radius.
pub fn create_drop_shadow_filter(id: &str, shadows: &[DropShadow]) -> FilterDef {
    let mut primitives = Vec::new();
    let mut merged = Vec::with_capacity(shadows.len() + 1);

    for (i, shadow) in shadows.iter().enumerate() {
        let mut source = SOURCE_ALPHA.to_string();

        if let Some(spread) = shadow.spread_radius.filter(|s| s.is_finite() && *s != 0.0) {
            let result = format!("spread{i}");
            primitives.push(
                Morphology {
                    input: source,
                    operator: if spread > 0.0 {
                        MorphologyOperator::Dilate
                    } else {
                        MorphologyOperator::Erode
                    },
                    radius: spread.abs(),
                    result: result.clone(),
                }
                .into(),
            );
            source = result;
        }

        let blur = format!("blur{i}");
        let offset = format!("offset{i}");
        let flood = format!("flood{i}");
        let shadow_result = format!("shadow{i}");
        let color = Color::parse_or_transparent(&shadow.color);

        primitives.push(
            GaussianBlur {
                input: source,
                std_deviation: (shadow.blur_radius / 2.0).max(0.0),
                result: blur.clone(),
            }
            .into(),
        );
        primitives.push(
            Offset {
                input: blur,
                dx: shadow.offset_x,
                dy: shadow.offset_y,
                result: offset.clone(),
            }
            .into(),
        );
        primitives.push(
            Flood {
                color: color.with_alpha(1.0).to_paint(),
                opacity: color.a,
                result: flood.clone(),
            }
            .into(),
        );
        primitives.push(
            Composite {
                input: flood,
                input2: offset,
                result: shadow_result.clone(),
            }
            .into(),
        );
        merged.push(shadow_result);
    }

    if !merged.is_empty() {
        merged.push(SOURCE_GRAPHIC.to_string());
        primitives.push(Merge { inputs: merged }.into());
    }

    FilterDef {
        id: id.to_string(),
        primitives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn zero_shadows_is_empty_filter() {
        let f = create_drop_shadow_filter("none", &[]);
        assert!(f.is_empty());
        assert_eq!(f.id, "none");
    }

    #[test]
    fn single_shadow_chain() {
        let f = create_drop_shadow_filter("s", &[DropShadow::new(2.0, 2.0, 4.0, "#000000")]);
        assert_eq!(f.count("feGaussianBlur"), 1);
        assert_eq!(f.count("feMorphology"), 0);

        let blur = f
            .primitives
            .iter()
            .find_map(|p| match p {
                FilterPrimitive::GaussianBlur(b) => Some(b),
                _ => None,
            })
            .unwrap();
        assert_eq!(blur.std_deviation, 2.0);
        assert_eq!(blur.input, SOURCE_ALPHA);

        let Some(FilterPrimitive::Merge(merge)) = f.primitives.last() else {
            panic!("last primitive should be a merge");
        };
        assert_eq!(
            merge.inputs,
            vec!["shadow0".to_string(), SOURCE_GRAPHIC.to_string()]
        );
    }

    #[test]
    fn shadows_merge_in_order_with_source_last() {
        let shadows = [
            DropShadow::new(1.0, 1.0, 2.0, "#ff000080"),
            DropShadow::new(-3.0, 0.0, 0.0, "red"),
            DropShadow::new(0.0, 5.0, 10.0, "blue"),
        ];
        let f = create_drop_shadow_filter("multi", &shadows);
        assert_eq!(f.count("feGaussianBlur"), 3);
        assert_eq!(f.count("feComposite"), 3);
        assert_eq!(f.count("feMerge"), 1);
        let Some(FilterPrimitive::Merge(merge)) = f.primitives.last() else {
            panic!("last primitive should be a merge");
        };
        assert_eq!(
            merge.inputs,
            ["shadow0", "shadow1", "shadow2", "SourceGraphic"]
        );
    }

    #[test]
    fn flood_splits_alpha_into_opacity() {
        let f = create_drop_shadow_filter("a", &[DropShadow::new(0.0, 0.0, 0.0, "#ff000080")]);
        let flood = f
            .primitives
            .iter()
            .find_map(|p| match p {
                FilterPrimitive::Flood(fl) => Some(fl),
                _ => None,
            })
            .unwrap();
        assert_eq!(flood.color, "#ff0000");
        assert_eq!(fmt_num(flood.opacity), "0.501961");
    }

    #[test]
    fn spread_adds_morphology_before_blur() {
        let shadows = [
            DropShadow::new(0.0, 0.0, 4.0, "#000").with_spread(3.0),
            DropShadow::new(0.0, 0.0, 4.0, "#000").with_spread(-2.0),
            DropShadow::new(0.0, 0.0, 4.0, "#000").with_spread(0.0),
        ];
        let f = create_drop_shadow_filter("spread", &shadows);
        assert_eq!(f.count("feMorphology"), 2);

        let ops: Vec<_> = f
            .primitives
            .iter()
            .filter_map(|p| match p {
                FilterPrimitive::Morphology(m) => Some((m.operator, m.radius)),
                _ => None,
            })
            .collect();
        assert_eq!(
            ops,
            vec![(MorphologyOperator::Dilate, 3.0), (MorphologyOperator::Erode, 2.0)]
        );

        let FilterPrimitive::GaussianBlur(first_blur) = &f.primitives[1] else {
            panic!("blur should follow morphology");
        };
        assert_eq!(first_blur.input, "spread0");
    }

    #[test]
    fn primitive_nodes_serialize() {
        let f = create_drop_shadow_filter("s", &[DropShadow::new(2.0, 2.0, 4.0, "#000000")]);
        let rendered: Vec<String> = f
            .primitives
            .iter()
            .map(|p| p.to_node().to_string())
            .collect();
        assert_snapshot!(rendered.join("\n"), @r##"
        <feGaussianBlur in="SourceAlpha" result="blur0" stdDeviation="2"/>
        <feOffset dx="2" dy="2" in="blur0" result="offset0"/>
        <feFlood flood-color="#000000" flood-opacity="1" result="flood0"/>
        <feComposite in="flood0" in2="offset0" operator="in" result="shadow0"/>
        <feMerge>
        <feMergeNode in="shadow0"/>
        <feMergeNode in="SourceGraphic"/>
        </feMerge>
        "##);
    }
}
