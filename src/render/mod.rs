//! Wheel geometry and SVG rendering
//!
//! This module is organized into submodules:
//! - `defaults`: Rendering ratios and constants
//! - `format`: Numeric formatting shared by all serialized output
//! - `path_builder`: SVG path data builder
//! - `geometry`: Wedge, ring and arc paths plus wedge bounds
//! - `gradient`: Gradient transforms, paint resolution and definitions
//! - `shadow`: Drop-shadow filter definitions
//! - `text`: Curved label sizing
//! - `segments`: Composition of per-segment descriptors
//! - `svg`: SVG generation

pub mod defaults;
pub mod format;
pub mod geometry;
pub mod gradient;
pub mod path_builder;
pub mod segments;
pub mod shadow;
pub mod svg;
pub mod text;

// Re-export commonly used items
pub use format::fmt_num;
pub use geometry::{build_ring_path, build_wedge_path, compute_wedge_bounds, describe_arc_path};
pub use gradient::{
    LinearGradientDef, build_gradient_matrix, create_gradient_definition, fill_to_paint,
    gradient_transform_to_string,
};
pub use segments::{
    SegmentCache, SegmentContent, SegmentGeometry, SegmentLabel, SegmentRequest, compute_segments,
    compute_segments_with,
};
pub use shadow::{FilterDef, FilterPrimitive, create_drop_shadow_filter};
pub use self::svg::render_wheel_svg;
pub use text::compute_arc_font_size;
