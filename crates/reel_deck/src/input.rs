//! Input adapters
//!
//! Translate raw device input into offset requests on the
//! [`ScrollController`]. Adapters hold only per-gesture bookkeeping; the
//! offset itself always lives in the controller.

use reel_animation::MotionProfile;

use crate::config::DeckConfig;
use crate::controller::{InteractionMode, ScrollController};

/// Mouse wheel and touchpad scrolling
#[derive(Clone, Debug)]
pub struct WheelAdapter {
    sensitivity: f32,
    profile: MotionProfile,
}

impl WheelAdapter {
    pub fn new(config: &DeckConfig) -> Self {
        Self {
            sensitivity: config.input.wheel_sensitivity,
            profile: config.motion.wheel,
        }
    }

    /// Scroll by a wheel delta (positive = toward later sections)
    ///
    /// Returns the clamped target, or `None` when nothing was requested.
    pub fn on_wheel(&self, controller: &mut ScrollController, delta_y: f32) -> Option<f32> {
        if !controller.has_layout() || !delta_y.is_finite() || delta_y == 0.0 {
            return None;
        }

        let requested = controller.offset() - delta_y * self.sensitivity;
        let target = controller.animate_to(requested, self.profile);
        tracing::trace!(
            "Wheel delta_y={:.1} requested {:.1} -> {:.1}",
            delta_y,
            requested,
            target
        );
        Some(target)
    }
}

/// Single-finger vertical dragging
#[derive(Clone, Debug)]
pub struct TouchAdapter {
    multiplier: f32,
    profile: MotionProfile,
    settle: MotionProfile,
    snap: bool,
    /// Previous touch Y while a finger is down
    last_y: Option<f32>,
}

impl TouchAdapter {
    pub fn new(config: &DeckConfig) -> Self {
        Self {
            multiplier: config.input.touch_multiplier,
            profile: config.motion.touch,
            settle: config.motion.settle,
            snap: config.snap.enabled,
            last_y: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.last_y.is_some()
    }

    pub fn on_start(&mut self, controller: &mut ScrollController, y: f32) {
        if !y.is_finite() {
            return;
        }
        self.last_y = Some(y);
    }

    /// Follow the finger; content moves with it, scaled by the multiplier
    pub fn on_move(&mut self, controller: &mut ScrollController, y: f32) -> Option<f32> {
        let previous = self.last_y?;
        if !y.is_finite() {
            return None;
        }
        self.last_y = Some(y);

        if !controller.has_layout() {
            return None;
        }
        let delta = y - previous;
        let requested = controller.offset() + delta * self.multiplier;
        let target = controller.animate_to(requested, self.profile);
        controller.set_mode(InteractionMode::Dragging);
        tracing::trace!(
            "Touch delta={:.1} requested {:.1} -> {:.1}",
            delta,
            requested,
            target
        );
        Some(target)
    }

    /// Finger lifted: a swipe settles on the nearest section when snapping
    /// is on, a tap leaves the content alone
    pub fn on_end(&mut self, controller: &mut ScrollController) -> Option<f32> {
        self.last_y.take()?;
        controller.release(self.snap.then_some(self.settle))
    }

    /// Forget the touch without settling
    pub fn reset(&mut self) {
        self.last_y = None;
    }
}

/// Pointer press and drag along the progress rail
///
/// A press jumps (animated) to the pointed position. Moves only record the
/// latest target; [`TrackDragAdapter::flush`] applies it once per frame.
#[derive(Clone, Debug)]
pub struct TrackDragAdapter {
    profile: MotionProfile,
    pending: Option<f32>,
}

impl TrackDragAdapter {
    pub fn new(config: &DeckConfig) -> Self {
        Self {
            profile: config.motion.track_jump,
            pending: None,
        }
    }

    /// Offset the rail maps pointer `y` to
    pub fn target_for(controller: &ScrollController, y: f32) -> Option<f32> {
        let ratio = controller.layout()?.track().vertical_ratio(y)?;
        Some(controller.offset_for_progress(ratio))
    }

    pub fn on_press(&mut self, controller: &mut ScrollController, y: f32) -> Option<f32> {
        let target = Self::target_for(controller, y)?;
        self.pending = None;
        Some(controller.animate_to(target, self.profile))
    }

    pub fn on_move(&mut self, controller: &mut ScrollController, y: f32) -> Option<f32> {
        let target = Self::target_for(controller, y)?;
        self.pending = Some(target);
        controller.set_mode(InteractionMode::Dragging);
        Some(target)
    }

    /// Latest unapplied drag target
    pub fn pending(&self) -> Option<f32> {
        self.pending
    }

    pub fn take_pending(&mut self) -> Option<f32> {
        self.pending.take()
    }

    /// Apply the latest drag target 1:1, without animation
    pub fn flush(&mut self, controller: &mut ScrollController) -> Option<f32> {
        let target = controller.clamp(self.pending.take()?);
        controller.set_offset(target);
        Some(target)
    }

    /// Pointer released; a click re-issues the jump to the release point
    pub fn on_release(
        &mut self,
        controller: &mut ScrollController,
        y: f32,
        click: bool,
    ) -> Option<f32> {
        let flushed = self.flush(controller);
        // Rail drags land where the pointer left them
        controller.release(None);
        if click {
            let target = Self::target_for(controller, y)?;
            return Some(controller.animate_to(target, self.profile));
        }
        flushed
    }

    pub fn reset(&mut self) {
        self.pending = None;
    }
}
