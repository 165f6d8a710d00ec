//! Reel Animation System
//!
//! Spring physics, eased tweens and re-targetable motion values.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Tweens**: Fixed-duration transitions shaped by an easing curve
//! - **Motion Values**: A single animated scalar that can be re-targeted
//!   mid-flight; the new trajectory starts at the instantaneous value
//! - **Frame Scheduler**: Delayed one-shot timers advanced by frame ticks

pub mod easing;
pub mod motion;
pub mod scheduler;
pub mod spring;
pub mod tween;

pub use easing::Easing;
pub use motion::{Motion, MotionProfile, MotionValue};
pub use scheduler::{FrameScheduler, TimerId};
pub use spring::{Spring, SpringConfig};
pub use tween::Tween;
