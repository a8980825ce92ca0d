//! Gradient serialization and paint resolution.
//!
//! Only linear gradients render. Radial, angular and diamond gradients are
//! part of the theme model but produce no definition; the caller gets `None`
//! and a warning instead of a silently wrong solid fill.

use glam::DVec2;

use super::format::fmt_num;
use crate::color::Color;
use crate::log;
use crate::style::{Affine, Fill, Gradient, GradientKind};

/// Extra rotation that aligns the gradient axis with the text baseline origin.
pub const BASELINE_ROTATION_CORRECTION: f64 = 180.0;

/// Serialize a 2x3 affine matrix as `matrix(a b c d e f)`.
pub fn gradient_transform_to_string(matrix: &Affine) -> String {
    let parts: Vec<String> = matrix.components().iter().map(|v| fmt_num(*v)).collect();
    format!("matrix({})", parts.join(" "))
}

/// Affine transform spanned by three handles: origin, x-axis end, y-axis end.
pub fn build_gradient_matrix(p0: DVec2, p1: DVec2, p2: DVec2) -> String {
    let x_axis = p1 - p0;
    let y_axis = p2 - p0;
    gradient_transform_to_string(&Affine([
        [x_axis.x, y_axis.x, p0.x],
        [x_axis.y, y_axis.y, p0.y],
    ]))
}

/// Resolve a fill to SVG paint.
///
/// Gradient fills only resolve when the caller already registered a
/// definition and passes its id; otherwise they paint nothing.
pub fn fill_to_paint(fill: Option<&Fill>, gradient_ref: Option<&str>) -> String {
    match fill {
        None => "none".to_string(),
        Some(Fill::Solid { color }) => Color::parse_or_transparent(color).to_paint(),
        Some(Fill::Gradient { .. }) => match gradient_ref {
            Some(id) => format!("url(#{id})"),
            None => "none".to_string(),
        },
    }
}

/// One color stop of a rendered gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct StopDef {
    /// Offset in `[0, 1]`
    pub offset: f64,
    /// Paint string with alpha already applied
    pub color: String,
}

/// A linear gradient definition in bounding-box units.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradientDef {
    pub id: String,
    pub stops: Vec<StopDef>,
    /// Total rotation in `[0, 360)`
    pub rotation_degrees: f64,
    /// `gradientTransform` attribute value
    pub transform: String,
}

impl LinearGradientDef {
    /// Paint reference for this definition.
    pub fn paint(&self) -> String {
        format!("url(#{})", self.id)
    }
}

/// Build a gradient definition, or `None` when nothing can be rendered.
///
/// The applied rotation is `gradient + segment + 180` degrees around the
/// bounding-box center.
pub fn create_gradient_definition(
    gradient: &Gradient,
    id: &str,
    segment_rotation_degrees: f64,
) -> Option<LinearGradientDef> {
    if gradient.kind != GradientKind::Linear {
        log::warn!(
            id,
            kind = gradient.kind.as_str(),
            "unsupported gradient type, skipping definition"
        );
        return None;
    }
    if gradient.stops.is_empty() {
        return None;
    }

    let rotation = (gradient.rotation_degrees
        + segment_rotation_degrees
        + BASELINE_ROTATION_CORRECTION)
        .rem_euclid(360.0);

    let stops = gradient
        .stops
        .iter()
        .map(|stop| StopDef {
            offset: stop.position.clamp(0.0, 1.0),
            color: Color::parse_or_transparent(&stop.color).to_paint(),
        })
        .collect();

    let rotate = format!("rotate({} 0.5 0.5)", fmt_num(rotation));
    let transform = match (&gradient.handles, gradient.transform.is_identity()) {
        (Some(h), _) => format!(
            "{} {rotate}",
            build_gradient_matrix(h.origin.into(), h.x_axis.into(), h.y_axis.into())
        ),
        (None, false) => format!("{} {rotate}", gradient_transform_to_string(&gradient.transform)),
        (None, true) => rotate,
    };

    Some(LinearGradientDef {
        id: id.to_string(),
        stops,
        rotation_degrees: rotation,
        transform,
    })
}
