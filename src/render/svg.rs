//! SVG generation
//!
//! Turns definitions and segment descriptors into `svg` crate nodes. Hosts
//! that draw with their own toolkit can use [`super::segments`] directly; this
//! module is for everything that wants markup.

use svg::Document;
use svg::Node;
use svg::node::element::{self, Element};

use super::defaults;
use super::format::{fmt_num, fmt_percent};
use super::gradient::LinearGradientDef;
use super::segments::{ImageLabel, SegmentGeometry, SegmentLabel, StrokePaint, TextLabel};
use super::shadow::{FilterDef, FilterNode};
use crate::errors::LayoutError;
use crate::types::{Center, Scale};

/// `<linearGradient>` in bounding-box units, horizontal before the transform.
pub fn gradient_element(def: &LinearGradientDef) -> element::LinearGradient {
    def.stops.iter().fold(
        element::LinearGradient::new()
            .set("id", def.id.as_str())
            .set("gradientUnits", "objectBoundingBox")
            .set("x1", "0")
            .set("y1", "0.5")
            .set("x2", "1")
            .set("y2", "0.5")
            .set("gradientTransform", def.transform.as_str()),
        |gradient, stop| {
            gradient.add(
                element::Stop::new()
                    .set("offset", fmt_percent(stop.offset))
                    .set("stop-color", stop.color.as_str()),
            )
        },
    )
}

/// `<filter>` with a generous region so blurred shadows are not clipped.
pub fn filter_element(def: &FilterDef) -> element::Filter {
    def.primitives.iter().fold(
        element::Filter::new()
            .set("id", def.id.as_str())
            .set("x", defaults::FILTER_REGION_MIN)
            .set("y", defaults::FILTER_REGION_MIN)
            .set("width", defaults::FILTER_REGION_SIZE)
            .set("height", defaults::FILTER_REGION_SIZE),
        |filter, primitive| filter.add(primitive.to_node()),
    )
}

/// Definitions one segment needs: gradients, filters and its text baseline.
pub fn segment_defs(segment: &SegmentGeometry) -> Vec<Box<dyn Node>> {
    let mut defs: Vec<Box<dyn Node>> = Vec::new();
    for gradient in segment.gradients() {
        defs.push(Box::new(gradient_element(gradient)));
    }
    for filter in segment.filters() {
        defs.push(Box::new(filter_element(filter)));
    }
    if let SegmentLabel::Text(label) = &segment.label {
        defs.push(Box::new(
            element::Path::new()
                .set("id", label.baseline_id.as_str())
                .set("d", label.baseline_path.as_str())
                .set("fill", "none"),
        ));
    }
    defs
}

fn apply_stroke<T: Node>(node: &mut T, stroke: Option<&StrokePaint>) {
    if let Some(stroke) = stroke {
        node.assign("stroke", stroke.paint.as_str());
        node.assign("stroke-width", fmt_num(stroke.width));
    }
}

fn text_node(label: &TextLabel) -> Element {
    let mut text = Element::new("text");
    text.assign("font-size", fmt_num(label.font_size));
    text.assign("font-family", defaults::FONT_FAMILY);
    text.assign("font-weight", defaults::FONT_WEIGHT);
    text.assign("text-anchor", "middle");
    text.assign("dominant-baseline", "middle");
    text.assign("fill", label.fill.as_str());
    apply_stroke(&mut text, label.stroke.as_ref());
    if let Some(filter) = &label.filter {
        text.assign("filter", filter.reference());
    }
    text.append(
        element::TextPath::new(label.text.as_str())
            .set("href", format!("#{}", label.baseline_id))
            .set("startOffset", "50%"),
    );
    text
}

fn image_node(label: &ImageLabel) -> element::Image {
    let c = label.center();
    element::Image::new()
        .set("href", label.href.as_str())
        .set("x", fmt_num(label.x))
        .set("y", fmt_num(label.y))
        .set("width", fmt_num(label.width))
        .set("height", fmt_num(label.height))
        .set(
            "transform",
            format!(
                "rotate({} {} {})",
                fmt_num(label.rotation_degrees),
                fmt_num(c.x),
                fmt_num(c.y)
            ),
        )
}

/// One `<g>` holding the wedge and its label.
pub fn segment_group(segment: &SegmentGeometry) -> element::Group {
    let mut wedge = element::Path::new()
        .set("d", segment.path.as_str())
        .set("fill", segment.fill.as_str());
    apply_stroke(&mut wedge, segment.stroke.as_ref());
    if let Some(filter) = &segment.filter {
        wedge.assign("filter", filter.reference());
    }

    let group = element::Group::new()
        .set("class", format!("segment segment-{}", segment.kind))
        .set("data-index", segment.index.to_string())
        .add(wedge);

    match &segment.label {
        SegmentLabel::None => group,
        SegmentLabel::Text(label) => group.add(text_node(label)),
        SegmentLabel::Image(label) => group.add(image_node(label)),
    }
}

/// Render a standalone SVG document for a wheel.
///
/// `center` is unscaled, like the value passed to
/// [`super::segments::compute_segments`]; `rotation_degrees` is the spin
/// rotation applied around the pivot.
pub fn render_wheel_svg(
    segments: &[SegmentGeometry],
    center: Center,
    scale: f64,
    rotation_degrees: f64,
) -> Result<String, LayoutError> {
    let scale = Scale::try_from(scale)?;
    let c = center.validate()?.scaled(scale);

    let mut defs = element::Definitions::new();
    for segment in segments {
        for def in segment_defs(segment) {
            defs.append(def);
        }
    }

    let wheel = segments.iter().fold(
        element::Group::new().set("class", "wheel").set(
            "transform",
            format!(
                "rotate({} {} {})",
                fmt_num(rotation_degrees),
                fmt_num(c.x),
                fmt_num(c.y)
            ),
        ),
        |wheel, segment| wheel.add(segment_group(segment)),
    );

    let mut document = Document::new()
        .set(
            "viewBox",
            format!(
                "{} {} {} {}",
                fmt_num(c.x - c.radius),
                fmt_num(c.y - c.radius),
                fmt_num(2.0 * c.radius),
                fmt_num(2.0 * c.radius)
            ),
        )
        .set("xmlns", "http://www.w3.org/2000/svg");
    if defs
        .get_children()
        .is_some_and(|children| !children.is_empty())
    {
        document.append(defs);
    }
    document.append(wheel);

    crate::log::debug!(
        segments = segments.len(),
        rotation = rotation_degrees,
        "rendered wheel svg"
    );
    Ok(document.to_string())
}
