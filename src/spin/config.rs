//! Spin timing and randomness settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::SpinError;

/// How a spin is drawn and how long it takes.
///
/// Every field has a default, so a host can deserialize a partial object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpinConfig {
    /// Inclusive lower bound of full turns per spin
    pub min_revolutions: u32,
    /// Inclusive upper bound of full turns per spin
    pub max_revolutions: u32,
    pub min_overshoot_degrees: f64,
    pub max_overshoot_degrees: f64,
    /// Time from the start of a spin until it lands
    pub spin_duration_ms: u64,
    /// Duration hint for the bounce back after landing
    pub settle_duration_ms: u64,
    /// Fixed pointer position, clockwise from +x (270 is the top)
    pub pointer_angle_degrees: f64,
    pub spin_easing: String,
    pub settle_easing: String,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            min_revolutions: 5,
            max_revolutions: 7,
            min_overshoot_degrees: 15.0,
            max_overshoot_degrees: 25.0,
            spin_duration_ms: 5000,
            settle_duration_ms: 600,
            pointer_angle_degrees: 270.0,
            spin_easing: "cubic-bezier(0.17, 0.67, 0.12, 0.99)".to_string(),
            settle_easing: "cubic-bezier(0.34, 1.56, 0.64, 1)".to_string(),
        }
    }
}

impl SpinConfig {
    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }

    pub fn settle_duration(&self) -> Duration {
        Duration::from_millis(self.settle_duration_ms)
    }

    pub fn validate(&self) -> Result<(), SpinError> {
        let invalid = |field: &'static str, reason: &str| {
            Err(SpinError::InvalidConfig {
                field,
                reason: reason.to_string(),
            })
        };

        if self.min_revolutions == 0 {
            return invalid("minRevolutions", "must be at least 1");
        }
        if self.max_revolutions < self.min_revolutions {
            return invalid("maxRevolutions", "must not be below minRevolutions");
        }
        if !self.min_overshoot_degrees.is_finite() || self.min_overshoot_degrees < 0.0 {
            return invalid("minOvershootDegrees", "must be a finite, non-negative angle");
        }
        if !self.max_overshoot_degrees.is_finite()
            || self.max_overshoot_degrees < self.min_overshoot_degrees
        {
            return invalid(
                "maxOvershootDegrees",
                "must be finite and not below minOvershootDegrees",
            );
        }
        if self.spin_duration_ms == 0 {
            return invalid("spinDurationMs", "must be positive");
        }
        if !self.pointer_angle_degrees.is_finite() {
            return invalid("pointerAngleDegrees", "must be finite");
        }
        Ok(())
    }
}
