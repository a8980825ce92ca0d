//! Error types with diagnostics using miette
//!
//! Geometry and style functions never fail: malformed visual input degrades to
//! transparent paint or missing definitions. Errors only surface where a caller
//! hands the crate structurally unusable input (a wheel with no room for
//! segments, a NaN scale) or asks for a controller without a timer runtime.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Layout Errors
// ============================================================================

/// Errors that occur while composing segment geometry
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("segment count must be at least {min}, got {count}")]
    #[diagnostic(
        code(spinwheel::layout::too_few_segments),
        help("a wedge is drawn with a single arc, so a full circle cannot be one segment")
    )]
    TooFewSegments { count: usize, min: usize },

    #[error("invalid scale {value}: {reason}")]
    #[diagnostic(
        code(spinwheel::layout::invalid_scale),
        help("the scale is rendered size over the theme's native size and must be positive")
    )]
    InvalidScale { value: f64, reason: NumericError },

    #[error("invalid wheel center ({x}, {y}) with radius {radius}")]
    #[diagnostic(code(spinwheel::layout::invalid_center))]
    InvalidCenter { x: f64, y: f64, radius: f64 },
}

// ============================================================================
// Spin Errors
// ============================================================================

/// Errors that occur while setting up a spin controller
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum SpinError {
    #[error("no tokio runtime is available for spin timers")]
    #[diagnostic(
        code(spinwheel::spin::no_runtime),
        help("create the controller from inside a tokio runtime")
    )]
    NoRuntime,

    #[error("invalid spin configuration: {field} {reason}")]
    #[diagnostic(code(spinwheel::spin::invalid_config))]
    InvalidConfig { field: &'static str, reason: String },
}

/// An event the spin state machine refused in its current state
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{event} is not valid while {state}")]
#[diagnostic(
    code(spinwheel::spin::invalid_transition),
    help("the wheel runs one spin at a time and must be reset after it lands")
)]
pub struct InvalidTransition {
    pub state: crate::spin::SpinState,
    pub event: &'static str,
}
