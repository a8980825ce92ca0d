//! Segment composition: turns a segment count and a style map into a list of
//! renderable wedge descriptors.
//!
//! Everything here is a pure function of its inputs. Spin rotation is applied
//! by the caller as a transform on the whole wheel, so nothing in a
//! [`SegmentGeometry`] depends on it and results can be cached across spins
//! (see [`SegmentCache`]).

use std::f64::consts::TAU;
use std::fmt::{self, Write as _};
use std::hash::{DefaultHasher, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use glam::DVec2;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::defaults;
use super::geometry::{build_wedge_path, compute_wedge_bounds, describe_arc_path, polar};
use super::gradient::{LinearGradientDef, create_gradient_definition, fill_to_paint};
use super::shadow::{FilterDef, create_drop_shadow_filter};
use super::text::compute_arc_font_size;
use crate::errors::LayoutError;
use crate::log;
use crate::style::{DropShadow, Fill, Stroke, StyleMap, TextStyle, resolve_style};
use crate::types::{Center, Scale, WedgeBounds};

pub use crate::style::WheelSegmentKind;

/// Kind sequence for one full template cycle.
pub const SEGMENT_TEMPLATE: [WheelSegmentKind; 8] = [
    WheelSegmentKind::Jackpot,
    WheelSegmentKind::Nowin,
    WheelSegmentKind::Odd,
    WheelSegmentKind::Even,
    WheelSegmentKind::Odd,
    WheelSegmentKind::Even,
    WheelSegmentKind::Odd,
    WheelSegmentKind::Even,
];

/// Kind of the segment at `index`, cycling the template.
pub fn segment_kind(index: usize) -> WheelSegmentKind {
    SEGMENT_TEMPLATE[index % SEGMENT_TEMPLATE.len()]
}

/// Kinds for a wheel of `count` segments.
pub fn segment_kinds(count: usize) -> Vec<WheelSegmentKind> {
    (0..count).map(segment_kind).collect()
}

/// What a segment shows besides its fill.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum SegmentContent {
    #[default]
    Empty,
    Text(String),
    /// Artwork placed inside the wedge. Only jackpot segments show it.
    Image { href: String },
}

impl SegmentContent {
    pub fn text(text: impl Into<String>) -> Self {
        SegmentContent::Text(text.into())
    }

    pub fn image(href: impl Into<String>) -> Self {
        SegmentContent::Image { href: href.into() }
    }
}

/// Resolved stroke paint in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePaint {
    pub paint: String,
    pub width: f64,
}

/// A label drawn along the segment's arc baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub font_size: f64,
    /// Id of the baseline path in `<defs>`
    pub baseline_id: String,
    pub baseline_path: String,
    pub fill: String,
    pub fill_gradient: Option<LinearGradientDef>,
    pub stroke: Option<StrokePaint>,
    pub stroke_gradient: Option<LinearGradientDef>,
    pub filter: Option<FilterDef>,
}

/// An image centered on the wedge bisector, top facing outward.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLabel {
    pub href: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation around the image center, in degrees
    pub rotation_degrees: f64,
}

impl ImageLabel {
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SegmentLabel {
    None,
    Text(TextLabel),
    Image(ImageLabel),
}

/// Everything needed to draw one wedge, in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentGeometry {
    pub index: usize,
    pub kind: WheelSegmentKind,
    /// Radians, clockwise from +x
    pub start_angle: f64,
    pub end_angle: f64,
    /// Bisector angle in degrees
    pub rotation_degrees: f64,
    pub path: String,
    pub bounds: WedgeBounds,
    pub fill: String,
    pub fill_gradient: Option<LinearGradientDef>,
    pub stroke: Option<StrokePaint>,
    pub stroke_gradient: Option<LinearGradientDef>,
    pub filter: Option<FilterDef>,
    pub label: SegmentLabel,
}

impl SegmentGeometry {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Bisector angle in radians.
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// All gradient definitions this segment references.
    pub fn gradients(&self) -> impl Iterator<Item = &LinearGradientDef> {
        let (text_fill, text_stroke) = match &self.label {
            SegmentLabel::Text(t) => (t.fill_gradient.as_ref(), t.stroke_gradient.as_ref()),
            _ => (None, None),
        };
        self.fill_gradient
            .iter()
            .chain(self.stroke_gradient.iter())
            .chain(text_fill)
            .chain(text_stroke)
    }

    /// All filter definitions this segment references.
    pub fn filters(&self) -> impl Iterator<Item = &FilterDef> {
        let text = match &self.label {
            SegmentLabel::Text(t) => t.filter.as_ref(),
            _ => None,
        };
        self.filter.iter().chain(text)
    }
}

/// Full input for [`compute_segments_with`].
#[derive(Debug, Clone, Copy)]
pub struct SegmentRequest<'a> {
    pub segment_count: usize,
    pub styles: &'a StyleMap,
    /// Per-index content; missing entries are [`SegmentContent::Empty`]
    pub contents: &'a [SegmentContent],
    /// Unscaled theme-space center
    pub center: Center,
    pub scale: f64,
    /// Prefix for every definition id, unique per wheel on a page
    pub id_prefix: &'a str,
}

impl<'a> SegmentRequest<'a> {
    pub fn new(segment_count: usize, styles: &'a StyleMap, center: Center, scale: f64) -> Self {
        Self {
            segment_count,
            styles,
            contents: &[],
            center,
            scale,
            id_prefix: defaults::ID_PREFIX,
        }
    }

    pub fn with_contents(mut self, contents: &'a [SegmentContent]) -> Self {
        self.contents = contents;
        self
    }

    pub fn with_id_prefix(mut self, id_prefix: &'a str) -> Self {
        self.id_prefix = id_prefix;
        self
    }
}

/// Compute wedge descriptors for `segment_count` segments with no content.
pub fn compute_segments(
    segment_count: usize,
    styles: &StyleMap,
    center: Center,
    scale: f64,
) -> Result<Vec<SegmentGeometry>, LayoutError> {
    compute_segments_with(&SegmentRequest::new(segment_count, styles, center, scale))
}

/// Compute wedge descriptors for a full request.
pub fn compute_segments_with(
    req: &SegmentRequest<'_>,
) -> Result<Vec<SegmentGeometry>, LayoutError> {
    if req.segment_count < defaults::MIN_SEGMENTS {
        return Err(LayoutError::TooFewSegments {
            count: req.segment_count,
            min: defaults::MIN_SEGMENTS,
        });
    }
    let scale = Scale::try_from(req.scale)?;
    let center = req.center.validate()?.scaled(scale);

    let ctx = WheelContext {
        styles: req.styles,
        center,
        scale,
        id_prefix: req.id_prefix,
    };
    let step = TAU / req.segment_count as f64;
    let segments = (0..req.segment_count)
        .map(|index| {
            let start = index as f64 * step;
            let slot = Slot {
                index,
                start,
                end: start + step,
            };
            let content = req.contents.get(index).unwrap_or(&SegmentContent::Empty);
            ctx.compose_segment(slot, content)
        })
        .collect();

    log::debug!(
        count = req.segment_count,
        scale = req.scale,
        prefix = req.id_prefix,
        "computed wheel segments"
    );
    Ok(segments)
}

/// Shadow lengths are theme-space; scale them with everything else.
fn scale_shadows(shadows: &[DropShadow], scale: Scale, keep_spread: bool) -> Vec<DropShadow> {
    shadows
        .iter()
        .map(|s| DropShadow {
            offset_x: scale.px(s.offset_x),
            offset_y: scale.px(s.offset_y),
            blur_radius: scale.px(s.blur_radius),
            spread_radius: if keep_spread {
                s.spread_radius.map(|v| scale.px(v))
            } else {
                None
            },
            color: s.color.clone(),
        })
        .collect()
}

/// Paint plus the gradient definition backing it, if any.
fn resolve_paint(
    fill: Option<&Fill>,
    id: String,
    rotation_degrees: f64,
) -> (String, Option<LinearGradientDef>) {
    let gradient = fill
        .and_then(Fill::as_gradient)
        .and_then(|g| create_gradient_definition(g, &id, rotation_degrees));
    let paint = fill_to_paint(fill, gradient.as_ref().map(|g| g.id.as_str()));
    (paint, gradient)
}

fn resolve_stroke(
    stroke: Option<&Stroke>,
    scale: Scale,
    id: String,
    rotation_degrees: f64,
) -> (Option<StrokePaint>, Option<LinearGradientDef>) {
    let Some(stroke) = stroke.filter(|s| s.width.is_finite() && s.width > 0.0) else {
        return (None, None);
    };
    let (paint, gradient) = resolve_paint(Some(&stroke.fill), id, rotation_degrees);
    (
        Some(StrokePaint {
            paint,
            width: scale.px(stroke.width),
        }),
        gradient,
    )
}

fn shadow_filter(
    shadows: &[DropShadow],
    scale: Scale,
    keep_spread: bool,
    id: String,
) -> Option<FilterDef> {
    if shadows.is_empty() {
        return None;
    }
    let scaled = scale_shadows(shadows, scale, keep_spread);
    Some(create_drop_shadow_filter(&id, &scaled))
}

/// Per-wheel inputs shared by every segment, already validated and scaled.
struct WheelContext<'a> {
    styles: &'a StyleMap,
    center: Center,
    scale: Scale,
    id_prefix: &'a str,
}

/// The angular slot of one segment.
#[derive(Debug, Clone, Copy)]
struct Slot {
    index: usize,
    start: f64,
    end: f64,
}

impl Slot {
    /// Bisector in degrees
    fn rotation_degrees(self) -> f64 {
        ((self.start + self.end) / 2.0).to_degrees()
    }
}

impl WheelContext<'_> {
    fn id(&self, slot: Slot, suffix: &str) -> String {
        format!("{}-seg{}-{suffix}", self.id_prefix, slot.index)
    }

    fn compose_segment(&self, slot: Slot, content: &SegmentContent) -> SegmentGeometry {
        let Slot { index, start, end } = slot;
        let c = self.center;
        let kind = segment_kind(index);
        let style = resolve_style(self.styles, kind);
        let rotation_degrees = slot.rotation_degrees();

        let (fill, fill_gradient) = resolve_paint(
            style.outer.fill.as_ref(),
            self.id(slot, "fill"),
            rotation_degrees,
        );
        let (stroke, stroke_gradient) = resolve_stroke(
            style.outer.stroke.as_ref(),
            self.scale,
            self.id(slot, "stroke"),
            rotation_degrees,
        );
        let filter = shadow_filter(
            &style.outer.drop_shadows,
            self.scale,
            true,
            self.id(slot, "shadow"),
        );

        let label = match content {
            SegmentContent::Empty => SegmentLabel::None,
            SegmentContent::Text(text) if text.trim().is_empty() => SegmentLabel::None,
            SegmentContent::Text(text) => {
                SegmentLabel::Text(self.text_label(slot, text, style.text.as_ref()))
            }
            SegmentContent::Image { href } if kind == WheelSegmentKind::Jackpot => {
                SegmentLabel::Image(self.image_label(slot, href))
            }
            SegmentContent::Image { .. } => {
                log::warn!(
                    index,
                    kind = kind.as_str(),
                    "image content is only shown on jackpot segments"
                );
                SegmentLabel::None
            }
        };

        SegmentGeometry {
            index,
            kind,
            start_angle: start,
            end_angle: end,
            rotation_degrees,
            path: build_wedge_path(c.x, c.y, c.radius, start, end),
            bounds: compute_wedge_bounds(c.x, c.y, c.radius, start, end),
            fill,
            fill_gradient,
            stroke,
            stroke_gradient,
            filter,
            label,
        }
    }

    fn text_label(&self, slot: Slot, text: &str, style: Option<&TextStyle>) -> TextLabel {
        let rotation_degrees = slot.rotation_degrees();
        let default_fill = Fill::solid(defaults::TEXT_FILL);
        let fill = style.and_then(|s| s.fill.as_ref()).unwrap_or(&default_fill);
        let (fill, fill_gradient) =
            resolve_paint(Some(fill), self.id(slot, "text-fill"), rotation_degrees);
        let (stroke, stroke_gradient) = resolve_stroke(
            style.and_then(|s| s.stroke.as_ref()),
            self.scale,
            self.id(slot, "text-stroke"),
            rotation_degrees,
        );
        let filter = style.and_then(|s| {
            shadow_filter(
                &s.drop_shadows,
                self.scale,
                false,
                self.id(slot, "text-shadow"),
            )
        });

        let c = self.center;
        let radius = c.radius * defaults::TEXT_RADIUS_RATIO;
        TextLabel {
            text: text.to_string(),
            font_size: compute_arc_font_size(text, radius, slot.end - slot.start),
            baseline_id: self.id(slot, "baseline"),
            baseline_path: describe_arc_path(c.x, c.y, radius, slot.start, slot.end),
            fill,
            fill_gradient,
            stroke,
            stroke_gradient,
            filter,
        }
    }

    fn image_label(&self, slot: Slot, href: &str) -> ImageLabel {
        let c = self.center;
        let mid = (slot.start + slot.end) / 2.0;
        let radius = c.radius * defaults::IMAGE_RADIUS_RATIO;
        let chord = 2.0 * radius * ((slot.end - slot.start) / 2.0).sin();
        let side = (c.radius * defaults::IMAGE_SIZE_RATIO).min(defaults::IMAGE_CHORD_RATIO * chord);
        let at = polar(c.x, c.y, radius, mid);

        ImageLabel {
            href: href.to_string(),
            x: at.x - side / 2.0,
            y: at.y - side / 2.0,
            width: side,
            height: side,
            rotation_degrees: mid.to_degrees() + 90.0,
        }
    }
}

// ============================================================================
// Memoization
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    segment_count: usize,
    content_hash: u64,
    center: [u64; 3],
    scale: u64,
    id_prefix: String,
}

/// Feeds formatted text straight into a hasher.
struct HashWriter<'a, H: Hasher>(&'a mut H);

impl<H: Hasher> fmt::Write for HashWriter<'_, H> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write(s.as_bytes());
        Ok(())
    }
}

impl CacheKey {
    /// `None` when the inputs cannot be fingerprinted; such requests skip the cache.
    ///
    /// The fingerprint is the `Debug` form of styles and contents, which keeps
    /// NaN and the infinities apart from each other and from real numbers.
    fn from_request(req: &SegmentRequest<'_>) -> Option<Self> {
        let mut hasher = DefaultHasher::new();
        let mut writer = HashWriter(&mut hasher);
        write!(writer, "{:?}|{:?}", req.styles, req.contents).ok()?;
        Some(CacheKey {
            segment_count: req.segment_count,
            content_hash: hasher.finish(),
            center: [
                req.center.x.to_bits(),
                req.center.y.to_bits(),
                req.center.radius.to_bits(),
            ],
            scale: req.scale.to_bits(),
            id_prefix: req.id_prefix.to_string(),
        })
    }
}

/// Keeps the most recent segment layout.
///
/// Recomputes only when the segment count, style content, contents, center,
/// scale or id prefix change. Safe to share between threads.
#[derive(Debug, Default)]
pub struct SegmentCache {
    entry: Mutex<Option<(CacheKey, Arc<[SegmentGeometry]>)>>,
    computations: AtomicUsize,
}

impl SegmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &self,
        req: &SegmentRequest<'_>,
    ) -> Result<Arc<[SegmentGeometry]>, LayoutError> {
        let key = CacheKey::from_request(req);
        if let Some(key) = &key {
            if let Some((cached_key, segments)) = self.entry.lock().as_ref() {
                if cached_key == key {
                    return Ok(Arc::clone(segments));
                }
            }
        }

        let segments: Arc<[SegmentGeometry]> = compute_segments_with(req)?.into();
        self.computations.fetch_add(1, Ordering::Relaxed);
        if let Some(key) = key {
            *self.entry.lock() = Some((key, Arc::clone(&segments)));
        }
        Ok(segments)
    }

    /// How many times the layout was actually computed.
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        *self.entry.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Gradient, GradientKind, GradientStop, OuterStyle, SegmentStyle};
    use std::f64::consts::FRAC_PI_2;

    fn center() -> Center {
        Center::new(200.0, 200.0, 150.0)
    }

    fn request(segment_count: usize, styles: &StyleMap) -> SegmentRequest<'_> {
        SegmentRequest::new(segment_count, styles, center(), 1.0)
    }

    fn themed_styles() -> StyleMap {
        let mut styles = StyleMap::new();
        styles.insert(
            WheelSegmentKind::Jackpot,
            SegmentStyle {
                outer: OuterStyle {
                    fill: Some(Fill::gradient(Gradient::linear(
                        vec![GradientStop::new("#ffd700", 0.0), GradientStop::new("#ff8c00", 1.0)],
                        45.0,
                    ))),
                    stroke: Some(Stroke {
                        fill: Fill::solid("#ffffff"),
                        width: 2.0,
                    }),
                    drop_shadows: vec![
                        DropShadow::new(2.0, 2.0, 4.0, "#00000080").with_spread(1.0),
                    ],
                },
                text: Some(TextStyle {
                    fill: Some(Fill::solid("#000000")),
                    stroke: None,
                    drop_shadows: vec![
                        DropShadow::new(1.0, 1.0, 2.0, "#000000").with_spread(5.0),
                    ],
                }),
            },
        );
        styles.insert(
            WheelSegmentKind::Odd,
            SegmentStyle {
                outer: OuterStyle {
                    fill: Some(Fill::solid("#1e90ff")),
                    ..OuterStyle::default()
                },
                text: None,
            },
        );
        styles
    }

    #[test]
    fn template_cycles_once_for_eight() {
        use WheelSegmentKind::*;
        assert_eq!(
            segment_kinds(8),
            vec![Jackpot, Nowin, Odd, Even, Odd, Even, Odd, Even]
        );
    }

    #[test]
    fn template_truncates_and_repeats() {
        use WheelSegmentKind::*;
        assert_eq!(segment_kinds(3), vec![Jackpot, Nowin, Odd]);
        let twelve = segment_kinds(12);
        assert_eq!(&twelve[8..], &[Jackpot, Nowin, Odd, Even]);
        assert_eq!(twelve.iter().filter(|k| **k == Jackpot).count(), 2);
    }

    #[test]
    fn rejects_unusable_input() {
        let styles = StyleMap::new();
        assert_eq!(
            compute_segments(1, &styles, center(), 1.0).unwrap_err(),
            LayoutError::TooFewSegments { count: 1, min: 2 }
        );
        assert!(matches!(
            compute_segments(8, &styles, center(), 0.0).unwrap_err(),
            LayoutError::InvalidScale { .. }
        ));
        assert!(matches!(
            compute_segments(8, &styles, Center::new(0.0, 0.0, -1.0), 1.0).unwrap_err(),
            LayoutError::InvalidCenter { .. }
        ));
    }

    #[test]
    fn angles_partition_the_circle() {
        let segs = compute_segments(4, &StyleMap::new(), center(), 1.0).unwrap();
        assert_eq!(segs.len(), 4);
        for (i, seg) in segs.iter().enumerate() {
            assert_eq!(seg.index, i);
            assert!((seg.span() - FRAC_PI_2).abs() < 1e-12);
            assert!((seg.start_angle - i as f64 * FRAC_PI_2).abs() < 1e-12);
        }
        assert!((segs[3].end_angle - TAU).abs() < 1e-12);
        assert!((segs[0].rotation_degrees - 45.0).abs() < 1e-9);
    }

    #[test]
    fn missing_styles_fall_back_to_transparent() {
        let segs = compute_segments(8, &StyleMap::new(), center(), 1.0).unwrap();
        for seg in &segs {
            assert_eq!(seg.fill, "rgba(0, 0, 0, 0)");
            assert!(seg.stroke.is_none());
            assert!(seg.filter.is_none());
            assert_eq!(seg.gradients().count(), 0);
        }
    }

    #[test]
    fn geometry_is_scaled() {
        let segs = compute_segments(4, &StyleMap::new(), center(), 0.5).unwrap();
        assert_eq!(
            segs[0].path,
            build_wedge_path(100.0, 100.0, 75.0, 0.0, FRAC_PI_2)
        );
        assert_eq!(segs[0].bounds.max_x(), 175.0);
    }

    #[test]
    fn gradient_and_stroke_definitions_get_unique_ids() {
        let styles = themed_styles();
        let segs = compute_segments_with(
            &SegmentRequest::new(8, &styles, center(), 2.0).with_id_prefix("w1"),
        )
        .unwrap();

        let jackpot = &segs[0];
        assert_eq!(jackpot.kind, WheelSegmentKind::Jackpot);
        assert_eq!(jackpot.fill, "url(#w1-seg0-fill)");
        let gradient = jackpot.fill_gradient.as_ref().unwrap();
        let expected = 45.0 + 22.5 + 180.0;
        assert!((gradient.rotation_degrees - expected).abs() < 1e-9);

        let stroke = jackpot.stroke.as_ref().unwrap();
        assert_eq!(stroke.paint, "#ffffff");
        assert_eq!(stroke.width, 4.0);

        assert_eq!(segs[2].fill, "#1e90ff");
        assert_eq!(segs[1].fill, "rgba(0, 0, 0, 0)");

        let mut ids: Vec<&str> = segs
            .iter()
            .flat_map(|s| {
                s.gradients()
                    .map(|g| g.id.as_str())
                    .chain(s.filters().map(|f| f.id.as_str()))
            })
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn outer_shadows_are_scaled_and_keep_spread() {
        let styles = themed_styles();
        let segs = compute_segments(8, &styles, center(), 2.0).unwrap();
        let filter = segs[0].filter.as_ref().unwrap();
        assert_eq!(filter.id, "wheel-seg0-shadow");
        assert_eq!(filter.count("feMorphology"), 1);
        let blur = filter
            .primitives
            .iter()
            .find_map(|p| match p {
                crate::render::shadow::FilterPrimitive::GaussianBlur(b) => Some(b.std_deviation),
                _ => None,
            })
            .unwrap();
        assert_eq!(blur, 4.0);
    }

    #[test]
    fn text_labels_ignore_spread_and_fit_the_arc() {
        let styles = themed_styles();
        let contents = [SegmentContent::text("JACKPOT"), SegmentContent::text("Try again")];
        let segs = compute_segments_with(
            &SegmentRequest::new(8, &styles, center(), 1.0).with_contents(&contents),
        )
        .unwrap();

        let SegmentLabel::Text(label) = &segs[0].label else {
            panic!("expected a text label");
        };
        assert_eq!(label.fill, "#000000");
        assert_eq!(label.baseline_id, "wheel-seg0-baseline");
        assert!(!label.baseline_path.contains('Z'));
        let radius = 150.0 * defaults::TEXT_RADIUS_RATIO;
        assert_eq!(
            label.font_size,
            compute_arc_font_size("JACKPOT", radius, TAU / 8.0)
        );
        let filter = label.filter.as_ref().unwrap();
        assert_eq!(filter.count("feMorphology"), 0);

        // nowin has no style at all: default text paint, no filter
        let SegmentLabel::Text(nowin) = &segs[1].label else {
            panic!("expected a text label");
        };
        assert_eq!(nowin.fill, "#ffffff");
        assert!(nowin.filter.is_none());

        assert_eq!(segs[2].label, SegmentLabel::None);
    }

    #[test]
    fn images_only_render_on_jackpot() {
        let contents = [SegmentContent::image("star.png"), SegmentContent::image("nope.png")];
        let segs = compute_segments_with(
            &SegmentRequest::new(4, &StyleMap::new(), Center::new(0.0, 0.0, 100.0), 1.0)
                .with_contents(&contents),
        )
        .unwrap();

        let SegmentLabel::Image(image) = &segs[0].label else {
            panic!("expected an image on the jackpot segment");
        };
        assert_eq!(image.href, "star.png");
        assert!((image.width - 32.0).abs() < 1e-9);
        assert_eq!(image.width, image.height);
        assert!((image.rotation_degrees - 135.0).abs() < 1e-9);
        let expected = polar(0.0, 0.0, 62.0, TAU / 8.0);
        assert!((image.center() - expected).length() < 1e-9);

        assert_eq!(segs[1].label, SegmentLabel::None);
    }

    #[test]
    fn narrow_wedges_shrink_images_to_the_chord() {
        let contents = [SegmentContent::image("star.png")];
        let segs = compute_segments_with(
            &SegmentRequest::new(24, &StyleMap::new(), Center::new(0.0, 0.0, 100.0), 1.0)
                .with_contents(&contents),
        )
        .unwrap();
        let SegmentLabel::Image(image) = &segs[0].label else {
            panic!("expected an image");
        };
        let chord = 2.0 * 62.0 * (TAU / 48.0).sin();
        assert!((image.width - 0.8 * chord).abs() < 1e-9);
        assert!(image.width < 32.0);
    }

    #[test]
    fn non_linear_fill_paints_nothing() {
        let mut styles = StyleMap::new();
        let mut gradient = Gradient::linear(vec![GradientStop::new("#fff", 0.0)], 0.0);
        gradient.kind = GradientKind::Radial;
        styles.insert(
            WheelSegmentKind::Jackpot,
            SegmentStyle {
                outer: OuterStyle {
                    fill: Some(Fill::gradient(gradient)),
                    ..OuterStyle::default()
                },
                text: None,
            },
        );
        let segs = compute_segments(2, &styles, center(), 1.0).unwrap();
        assert_eq!(segs[0].fill, "none");
        assert!(segs[0].fill_gradient.is_none());
    }

    #[test]
    fn cache_recomputes_only_on_structural_change() {
        let cache = SegmentCache::new();
        let styles = themed_styles();

        let a = cache.get_or_compute(&request(8, &styles)).unwrap();
        let b = cache.get_or_compute(&request(8, &styles)).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.computations(), 1);

        let c = cache.get_or_compute(&request(6, &styles)).unwrap();
        assert_eq!(c.len(), 6);
        assert_eq!(cache.computations(), 2);

        let mut restyled = styles.clone();
        restyled.remove(&WheelSegmentKind::Odd);
        cache.get_or_compute(&request(6, &restyled)).unwrap();
        assert_eq!(cache.computations(), 3);

        // an equal but distinct map hits
        let copy = restyled.clone();
        cache.get_or_compute(&request(6, &copy)).unwrap();
        assert_eq!(cache.computations(), 3);

        cache.clear();
        cache.get_or_compute(&request(6, &copy)).unwrap();
        assert_eq!(cache.computations(), 4);
    }

    #[test]
    fn cache_tells_non_finite_style_numbers_apart() {
        let with_blur = |blur: f64| {
            let mut styles = StyleMap::new();
            styles.insert(
                WheelSegmentKind::Jackpot,
                SegmentStyle {
                    outer: OuterStyle {
                        drop_shadows: vec![DropShadow::new(0.0, 2.0, blur, "#000000")],
                        ..OuterStyle::default()
                    },
                    text: None,
                },
            );
            styles
        };
        let cache = SegmentCache::new();
        for blur in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 4.0] {
            let styles = with_blur(blur);
            cache.get_or_compute(&request(4, &styles)).unwrap();
        }
        assert_eq!(cache.computations(), 4);

        let styles = with_blur(f64::NAN);
        cache.get_or_compute(&request(4, &styles)).unwrap();
        cache.get_or_compute(&request(4, &styles)).unwrap();
        assert_eq!(cache.computations(), 5);
    }

    #[test]
    fn cache_does_not_store_errors() {
        let cache = SegmentCache::new();
        let styles = StyleMap::new();
        assert!(cache.get_or_compute(&request(1, &styles)).is_err());
        assert_eq!(cache.computations(), 0);
    }
}
