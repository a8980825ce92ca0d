//! Spin lifecycle
//!
//! [`SpinMachine`] is a pure reducer: it takes events and returns the effect
//! the caller has to carry out (arm the completion timer, notify the host).
//! It owns no timers and draws no random numbers, so every transition can be
//! tested directly. [`controller::SpinController`] wraps it with tokio timers
//! and a seeded RNG.
//!
//! Angles here are degrees. A positive rotation turns the wheel clockwise on
//! screen.

pub mod config;
pub mod controller;

use std::fmt;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::InvalidTransition;
use crate::log;

pub use config::SpinConfig;
pub use controller::SpinController;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpinState {
    Idle,
    Spinning,
    Complete,
}

impl SpinState {
    pub fn as_str(self) -> &'static str {
        match self {
            SpinState::Idle => "IDLE",
            SpinState::Spinning => "SPINNING",
            SpinState::Complete => "COMPLETE",
        }
    }
}

impl fmt::Display for SpinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The random draw behind one spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub winning_index: usize,
    pub revolutions: u32,
    pub overshoot_degrees: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinEvent {
    StartSpin(SpinPlan),
    /// Fired by the completion timer
    SpinComplete,
    Reset,
}

impl SpinEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SpinEvent::StartSpin(_) => "START_SPIN",
            SpinEvent::SpinComplete => "SPIN_COMPLETE",
            SpinEvent::Reset => "RESET",
        }
    }
}

/// Work the caller must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinEffect {
    /// Dispatch [`SpinEvent::SpinComplete`] once `after` has elapsed.
    ScheduleCompletion { after: Duration },
    /// Hand the result to the host.
    NotifyComplete { winning_index: usize },
}

/// How the presentation layer should animate toward the target rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationTransition {
    pub duration: Duration,
    pub easing: String,
}

/// Observable state of the wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinSnapshot {
    pub state: SpinState,
    pub current_rotation: f64,
    /// Rotation to display; includes the overshoot while spinning
    pub target_rotation: f64,
    pub winning_index: Option<usize>,
    pub is_spinning: bool,
    transition: Option<RotationTransition>,
}

impl SpinSnapshot {
    /// Timing hint for the current phase. Idle wheels do not animate.
    pub fn transition(&self) -> Option<&RotationTransition> {
        self.transition.as_ref()
    }
}

/// Center angle of segment `index`, in degrees clockwise from +x.
pub fn segment_center_degrees(index: usize, segment_count: usize) -> f64 {
    (index as f64 + 0.5) * 360.0 / segment_count as f64
}

/// Extra rotation in `[0, 360)` that brings segment `index` under the pointer,
/// starting from `current_rotation`.
pub fn landing_offset(
    pointer_degrees: f64,
    index: usize,
    segment_count: usize,
    current_rotation: f64,
) -> f64 {
    (pointer_degrees - segment_center_degrees(index, segment_count) - current_rotation)
        .rem_euclid(360.0)
}

/// Index of the segment under the pointer at `rotation`.
pub fn segment_at_pointer(pointer_degrees: f64, segment_count: usize, rotation: f64) -> usize {
    let step = 360.0 / segment_count as f64;
    let angle = (pointer_degrees - rotation).rem_euclid(360.0);
    ((angle / step).floor() as usize).min(segment_count.saturating_sub(1))
}

/// Draw the winner, revolution count and overshoot for one spin.
pub fn draw_plan<R: Rng>(rng: &mut R, segment_count: usize, config: &SpinConfig) -> SpinPlan {
    let roll: f64 = rng.random();
    let last = segment_count.saturating_sub(1);
    let winning_index = ((roll * segment_count as f64).floor() as usize).min(last);
    SpinPlan {
        winning_index,
        revolutions: rng.random_range(config.min_revolutions..=config.max_revolutions),
        overshoot_degrees: rng.random_range(
            config.min_overshoot_degrees..=config.max_overshoot_degrees,
        ),
    }
}

/// The spin reducer.
#[derive(Debug, Clone)]
pub struct SpinMachine {
    config: SpinConfig,
    segment_count: usize,
    state: SpinState,
    current_rotation: f64,
    target_rotation: f64,
    overshoot: f64,
    winning_index: Option<usize>,
}

impl SpinMachine {
    /// The configuration is assumed valid; see [`SpinConfig::validate`].
    pub fn new(segment_count: usize, config: SpinConfig) -> Self {
        Self {
            config,
            segment_count,
            state: SpinState::Idle,
            current_rotation: 0.0,
            target_rotation: 0.0,
            overshoot: 0.0,
            winning_index: None,
        }
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    pub fn current_rotation(&self) -> f64 {
        self.current_rotation
    }

    pub fn target_rotation(&self) -> f64 {
        self.target_rotation
    }

    pub fn winning_index(&self) -> Option<usize> {
        self.winning_index
    }

    pub fn is_spinning(&self) -> bool {
        self.state == SpinState::Spinning
    }

    /// Apply one event. Rejected events leave the machine untouched.
    pub fn dispatch(&mut self, event: SpinEvent) -> Result<Option<SpinEffect>, InvalidTransition> {
        let rejected = InvalidTransition {
            state: self.state,
            event: event.name(),
        };

        match (self.state, event) {
            (SpinState::Idle, SpinEvent::StartSpin(plan)) => {
                if plan.winning_index >= self.segment_count {
                    log::warn!(
                        winning_index = plan.winning_index,
                        segment_count = self.segment_count,
                        "spin plan picks a segment that does not exist"
                    );
                    return Err(rejected);
                }

                let offset = landing_offset(
                    self.config.pointer_angle_degrees,
                    plan.winning_index,
                    self.segment_count,
                    self.current_rotation,
                );
                let base = f64::from(plan.revolutions) * 360.0 + offset;
                self.overshoot = plan.overshoot_degrees;
                self.target_rotation = self.current_rotation + base + plan.overshoot_degrees;
                self.winning_index = Some(plan.winning_index);
                self.state = SpinState::Spinning;

                log::debug!(
                    winning_index = plan.winning_index,
                    revolutions = plan.revolutions,
                    target = self.target_rotation,
                    "spin started"
                );
                Ok(Some(SpinEffect::ScheduleCompletion {
                    after: self.config.spin_duration(),
                }))
            }
            (SpinState::Spinning, SpinEvent::SpinComplete) => {
                self.target_rotation -= self.overshoot;
                self.current_rotation = self.target_rotation;
                self.overshoot = 0.0;
                self.state = SpinState::Complete;

                let winning_index = self.winning_index.unwrap_or_default();
                log::debug!(
                    winning_index,
                    rotation = self.current_rotation,
                    "spin complete"
                );
                Ok(Some(SpinEffect::NotifyComplete { winning_index }))
            }
            (SpinState::Complete, SpinEvent::Reset) => {
                self.state = SpinState::Idle;
                self.winning_index = None;
                log::debug!(rotation = self.current_rotation, "spin reset");
                Ok(None)
            }
            _ => {
                log::warn!(
                    state = self.state.as_str(),
                    event = event.name(),
                    "ignoring spin event"
                );
                Err(rejected)
            }
        }
    }

    /// Back to idle for a new theme. The rotation baseline is kept.
    pub fn reload(&mut self, segment_count: usize) {
        self.segment_count = segment_count;
        self.state = SpinState::Idle;
        self.target_rotation = self.current_rotation;
        self.overshoot = 0.0;
        self.winning_index = None;
    }

    pub fn snapshot(&self) -> SpinSnapshot {
        let transition = match self.state {
            SpinState::Idle => None,
            SpinState::Spinning => Some(RotationTransition {
                duration: self.config.spin_duration(),
                easing: self.config.spin_easing.clone(),
            }),
            SpinState::Complete => Some(RotationTransition {
                duration: self.config.settle_duration(),
                easing: self.config.settle_easing.clone(),
            }),
        };
        SpinSnapshot {
            state: self.state,
            current_rotation: self.current_rotation,
            target_rotation: self.target_rotation,
            winning_index: self.winning_index,
            is_spinning: self.is_spinning(),
            transition,
        }
    }
}
