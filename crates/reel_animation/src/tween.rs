//! Fixed-duration tweens

use crate::easing::Easing;

/// Interpolates `from → to` over a fixed duration, shaped by an easing curve
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    /// Duration in seconds
    duration: f32,
    easing: Easing,
    elapsed: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: if duration.is_finite() {
                duration.max(0.0)
            } else {
                0.0
            },
            easing,
            elapsed: 0.0,
        }
    }

    pub fn from_millis(from: f32, to: f32, duration_ms: u32, easing: Easing) -> Self {
        Self::new(from, to, duration_ms as f32 / 1000.0, easing)
    }

    pub fn from_value(&self) -> f32 {
        self.from
    }

    pub fn to_value(&self) -> f32 {
        self.to
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Linear time progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Seconds left until the tween lands on `to`
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt > 0.0 && dt.is_finite() {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }
}
