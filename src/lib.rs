//! Prize-wheel core: segment geometry, SVG definitions and the spin lifecycle.
//!
//! The crate has two halves that only meet at the segment count:
//!
//! - [`render`] turns a segment count and a theme's style map into wedge
//!   paths, gradient and shadow definitions, and fitted labels. It is pure and
//!   its output can be cached across spins.
//! - [`spin`] owns the rotation state: which segment wins, how far the wheel
//!   turns, and when the host hears about the result.
//!
//! ```
//! use spinwheel::render::compute_segments;
//! use spinwheel::style::StyleMap;
//! use spinwheel::types::Center;
//!
//! let segments = compute_segments(8, &StyleMap::new(), Center::new(200.0, 200.0, 180.0), 1.0)?;
//! assert_eq!(segments.len(), 8);
//! assert!(segments[0].path.starts_with("M 200 200 L 380 200 A 180 180 0 0 1"));
//! # Ok::<(), spinwheel::errors::LayoutError>(())
//! ```

pub mod color;
pub mod errors;
pub mod log;
pub mod render;
pub mod spin;
pub mod style;
pub mod types;

pub use color::{Color, LightPalette};
pub use errors::{InvalidTransition, LayoutError, SpinError};
pub use render::{SegmentCache, SegmentContent, SegmentGeometry, compute_segments, render_wheel_svg};
pub use spin::{SpinConfig, SpinController, SpinSnapshot, SpinState};
pub use style::{SegmentStyle, StyleMap, WheelSegmentKind, resolve_style};
pub use types::{Center, Scale};
