//! Strongly-typed numeric primitives for wheel layout.
//!
//! Theme coordinates are unscaled; everything rendered goes through a
//! validated [`Scale`] first.

use std::fmt;

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Render-time pixel scale relative to the theme's native coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale(f64);

impl Scale {
    pub const IDENTITY: Scale = Scale(1.0);

    /// Create a Scale with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(value: f64) -> Result<Self, NumericError> {
        if value.is_nan() {
            Err(NumericError::NaN)
        } else if value.is_infinite() {
            Err(NumericError::Infinite)
        } else if value == 0.0 {
            Err(NumericError::Zero)
        } else if value < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Scale(value))
        }
    }

    /// Get the raw factor
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Scale a theme-space length to pixels.
    #[inline]
    pub fn px(self, value: f64) -> f64 {
        value * self.0
    }

    /// Scale a theme-space point to pixels.
    #[inline]
    pub fn point(self, p: DVec2) -> DVec2 {
        p * self.0
    }
}

impl TryFrom<f64> for Scale {
    type Error = LayoutError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Scale::try_new(value).map_err(|reason| LayoutError::InvalidScale { value, reason })
    }
}

/// The wheel's rotation pivot and outer boundary, in theme space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Center {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Center {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    /// Reject centers that cannot produce geometry.
    pub fn validate(self) -> Result<Self, LayoutError> {
        if self.x.is_finite() && self.y.is_finite() && self.radius.is_finite() && self.radius > 0.0
        {
            Ok(self)
        } else {
            Err(LayoutError::InvalidCenter {
                x: self.x,
                y: self.y,
                radius: self.radius,
            })
        }
    }

    /// Pivot point, unscaled.
    pub fn point(self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    /// Same center in pixel space.
    pub fn scaled(self, scale: Scale) -> Center {
        Center {
            x: scale.px(self.x),
            y: scale.px(self.y),
            radius: scale.px(self.radius),
        }
    }
}

/// Axis-aligned bounding box of a wedge
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct WedgeBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl WedgeBounds {
    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }

    pub fn center(&self) -> DVec2 {
        dvec2(
            self.min_x + self.width / 2.0,
            self.min_y + self.height / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_try_new_valid() {
        let s = Scale::try_new(0.5).unwrap();
        assert_eq!(s.px(100.0), 50.0);
        assert_eq!(s.point(dvec2(2.0, 4.0)), dvec2(1.0, 2.0));
    }

    #[test]
    fn scale_try_new_rejects_zero() {
        assert_eq!(Scale::try_new(0.0), Err(NumericError::Zero));
    }

    #[test]
    fn scale_try_new_rejects_negative() {
        assert_eq!(Scale::try_new(-1.0), Err(NumericError::Negative));
    }

    #[test]
    fn scale_try_new_rejects_nan() {
        assert_eq!(Scale::try_new(f64::NAN), Err(NumericError::NaN));
        assert_eq!(Scale::try_new(f64::INFINITY), Err(NumericError::Infinite));
    }

    #[test]
    fn scale_try_from_maps_to_layout_error() {
        let err = Scale::try_from(-2.0).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidScale {
                reason: NumericError::Negative,
                ..
            }
        ));
    }

    #[test]
    fn center_validate() {
        assert!(Center::new(10.0, 10.0, 5.0).validate().is_ok());
        assert!(Center::new(10.0, 10.0, 0.0).validate().is_err());
        assert!(Center::new(f64::NAN, 10.0, 5.0).validate().is_err());
    }

    #[test]
    fn center_scaled() {
        let c = Center::new(200.0, 100.0, 80.0).scaled(Scale::try_new(0.5).unwrap());
        assert_eq!(c, Center::new(100.0, 50.0, 40.0));
    }

    #[test]
    fn bounds_extents() {
        let b = WedgeBounds {
            min_x: 1.0,
            min_y: 2.0,
            width: 4.0,
            height: 6.0,
        };
        assert_eq!(b.max_x(), 5.0);
        assert_eq!(b.max_y(), 8.0);
        assert_eq!(b.center(), dvec2(3.0, 5.0));
    }
}
