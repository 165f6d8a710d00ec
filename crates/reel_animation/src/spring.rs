//! Spring physics
//!
//! A damped harmonic oscillator integrated with fourth-order Runge-Kutta.
//! Frames are split into substeps sized from the spring's own rates, so
//! stiff or heavily damped springs stay inside the integrator's stable
//! region at any frame rate.

use serde::{Deserialize, Serialize};

/// Largest integration substep in seconds
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

/// Substep times the fastest rate of the spring. RK4 diverges past ~2.78.
const STABLE_STEP: f32 = 1.0;

/// Upper bound on substeps per frame
const MAX_SUBSTEPS: u32 = 4096;

/// Longest frame simulated in one step; longer gaps are cut to this
pub const MAX_FRAME_SECONDS: f32 = 0.1;

/// Distance from target below which a spring may rest
const REST_DELTA: f32 = 0.01;
/// Speed below which a spring may rest
const REST_SPEED: f32 = 0.01;

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Restoring force per unit of displacement
    pub stiffness: f32,
    /// Opposing force per unit of velocity
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Slowest decay rate (1/s) a usable spring may have. Below it a spring
    /// takes minutes to come to rest, and at zero damping it never does.
    pub const MIN_DECAY_RATE: f32 = 0.25;

    /// Fastest rate (1/s) the integrator resolves within its substep budget
    pub const MAX_RATE: f32 = 20_000.0;

    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Quick, barely overshooting
    pub const fn stiff() -> Self {
        Self::new(210.0, 20.0, 1.0)
    }

    /// Slow and soft
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Visible bounce before settling
    pub const fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Fast settle with a hint of overshoot, used for snapping
    pub const fn snappy() -> Self {
        Self::new(300.0, 30.0, 1.0)
    }

    /// Damping coefficient at which the spring stops oscillating
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Ratio of actual to critical damping (< 1 overshoots)
    pub fn damping_ratio(&self) -> f32 {
        let critical = self.critical_damping();
        if critical > 0.0 {
            self.damping / critical
        } else {
            0.0
        }
    }

    /// Rate (1/s) at which the slowest mode of the spring dies out
    pub fn decay_rate(&self) -> f32 {
        let c = self.damping / self.mass;
        let k = self.stiffness / self.mass;
        if self.damping_ratio() <= 1.0 {
            c / 2.0
        } else {
            // Slow root of an overdamped spring, written to avoid cancellation
            2.0 * k / (c + (c * c - 4.0 * k).sqrt())
        }
    }

    /// Upper bound on the fastest rate (1/s) the spring moves at
    pub fn rate_bound(&self) -> f32 {
        self.damping / self.mass + (self.stiffness / self.mass).sqrt()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(170.0, 26.0, 1.0)
    }
}

/// A spring animating a single value toward a target
///
/// The state is kept as displacement from the target, so the value lands
/// on the target exactly instead of hovering one float step away from it.
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    /// `value - target`
    displacement: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            displacement: 0.0,
            velocity: 0.0,
            target: initial,
        }
    }

    /// Start with an initial velocity (units per second)
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = if velocity.is_finite() { velocity } else { 0.0 };
        self
    }

    /// Move the target; the current value and velocity are kept so motion
    /// stays continuous
    pub fn set_target(&mut self, target: f32) {
        self.displacement = self.value() - target;
        self.target = target;
    }

    pub fn value(&self) -> f32 {
        self.target + self.displacement
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn is_settled(&self) -> bool {
        self.velocity.abs() < REST_SPEED && self.displacement.abs() < REST_DELTA
    }

    /// Jump to the target and stop
    pub fn snap_to_target(&mut self) {
        self.displacement = 0.0;
        self.velocity = 0.0;
    }

    /// Advance the simulation by `dt` seconds, at most [`MAX_FRAME_SECONDS`]
    pub fn step(&mut self, dt: f32) {
        if !(dt > 0.0) || !dt.is_finite() || self.is_settled() {
            return;
        }

        let dt = dt.min(MAX_FRAME_SECONDS);
        let max_h = (STABLE_STEP / self.config.rate_bound()).min(MAX_SUBSTEP);
        let substeps = (dt / max_h).ceil().clamp(1.0, MAX_SUBSTEPS as f32) as u32;
        let h = dt / substeps as f32;
        for _ in 0..substeps {
            self.rk4(h);
        }

        if self.is_settled() {
            self.snap_to_target();
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let mass = self.config.mass.max(f32::EPSILON);
        (-self.config.stiffness * x - self.config.damping * v) / mass
    }

    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.displacement, self.velocity);

        let k1x = v;
        let k1v = self.acceleration(x, v);

        let k2x = v + 0.5 * h * k1v;
        let k2v = self.acceleration(x + 0.5 * h * k1x, k2x);

        let k3x = v + 0.5 * h * k2v;
        let k3v = self.acceleration(x + 0.5 * h * k2x, k3x);

        let k4x = v + h * k3v;
        let k4v = self.acceleration(x + h * k3x, k4x);

        self.displacement = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}
