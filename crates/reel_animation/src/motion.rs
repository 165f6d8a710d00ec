//! Re-targetable motion values
//!
//! A [`MotionValue`] is one animated scalar. Starting a new animation while
//! one is in flight cancels the old trajectory and begins from the current
//! instantaneous value (springs also inherit the current velocity), so
//! gestures arriving in quick succession never make the value jump.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::spring::{Spring, SpringConfig};
use crate::tween::Tween;

/// How a value travels to its target
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MotionProfile {
    /// Fixed duration, shaped by an easing curve
    Tween {
        duration_ms: u32,
        #[serde(default)]
        easing: Easing,
    },
    /// Physics-driven, no fixed duration
    Spring(SpringConfig),
}

impl MotionProfile {
    pub const fn tween(duration_ms: u32, easing: Easing) -> Self {
        MotionProfile::Tween {
            duration_ms,
            easing,
        }
    }

    pub const fn ease_out(duration_ms: u32) -> Self {
        Self::tween(duration_ms, Easing::EaseOut)
    }

    pub const fn spring(config: SpringConfig) -> Self {
        MotionProfile::Spring(config)
    }

    /// Zero-length tween: applies the target on the spot
    pub const fn instant() -> Self {
        Self::tween(0, Easing::Linear)
    }
}

/// An in-flight trajectory
#[derive(Clone, Debug)]
pub enum Motion {
    Tween(Tween),
    Spring(Spring),
}

impl Motion {
    pub fn target(&self) -> f32 {
        match self {
            Motion::Tween(tween) => tween.to_value(),
            Motion::Spring(spring) => spring.target(),
        }
    }
}

/// A single animated scalar
#[derive(Clone, Debug, Default)]
pub struct MotionValue {
    value: f32,
    /// Units per second, measured over the last tick
    velocity: f32,
    motion: Option<Motion>,
}

impl MotionValue {
    pub fn new(initial: f32) -> Self {
        Self {
            value: initial,
            velocity: 0.0,
            motion: None,
        }
    }

    pub fn get(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Where the value will come to rest
    pub fn target(&self) -> f32 {
        self.motion.as_ref().map_or(self.value, Motion::target)
    }

    pub fn motion(&self) -> Option<&Motion> {
        self.motion.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.motion.is_some()
    }

    /// Apply a value immediately, cancelling any animation
    pub fn set(&mut self, value: f32) {
        if !value.is_finite() {
            tracing::warn!(value, "ignoring non-finite motion value");
            return;
        }
        self.motion = None;
        self.value = value;
        self.velocity = 0.0;
    }

    /// Animate toward `target`, superseding any in-flight animation
    pub fn animate_to(&mut self, target: f32, profile: MotionProfile) {
        if !target.is_finite() {
            tracing::warn!(target, "ignoring non-finite animation target");
            return;
        }

        if self.motion.is_none() && self.value == target {
            return;
        }

        let motion = match profile {
            MotionProfile::Tween { duration_ms: 0, .. } => {
                self.set(target);
                return;
            }
            MotionProfile::Tween {
                duration_ms,
                easing,
            } => Motion::Tween(Tween::from_millis(self.value, target, duration_ms, easing)),
            MotionProfile::Spring(config) => {
                let mut spring = Spring::new(config, self.value).with_velocity(self.velocity);
                spring.set_target(target);
                Motion::Spring(spring)
            }
        };
        self.motion = Some(motion);
    }

    /// Move the destination of the current animation, keeping its kind
    ///
    /// A tween keeps its remaining time and restarts from the current value;
    /// a spring just swings toward the new target. At rest this is `set`.
    pub fn retarget(&mut self, target: f32) {
        if !target.is_finite() {
            return;
        }
        match &mut self.motion {
            None => self.set(target),
            Some(Motion::Spring(spring)) => spring.set_target(target),
            Some(Motion::Tween(tween)) => {
                let remaining = tween.remaining();
                if remaining <= 0.0 {
                    self.set(target);
                } else {
                    *tween = Tween::new(self.value, target, remaining, tween.easing());
                }
            }
        }
    }

    /// Advance by `dt` seconds. Returns true while still animating.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !(dt > 0.0) || !dt.is_finite() {
            return self.is_animating();
        }

        let Some(motion) = &mut self.motion else {
            return false;
        };

        let previous = self.value;
        let finished = match motion {
            Motion::Tween(tween) => {
                tween.step(dt);
                self.value = tween.value();
                self.velocity = (self.value - previous) / dt;
                tween.is_finished()
            }
            Motion::Spring(spring) => {
                spring.step(dt);
                if spring.value().is_finite() && spring.velocity().is_finite() {
                    self.value = spring.value();
                    self.velocity = spring.velocity();
                    spring.is_settled()
                } else {
                    tracing::warn!(
                        goal = spring.target(),
                        config = ?spring.config(),
                        "spring diverged; landing on its target"
                    );
                    true
                }
            }
        };

        if finished {
            self.value = motion.target();
            self.velocity = 0.0;
            self.motion = None;
        }
        !finished
    }
}
