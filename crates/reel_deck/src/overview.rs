//! Overview zoom
//!
//! While the rail is used with a mouse the content shrinks so several
//! sections are visible at once, then grows back shortly after release.
//! The zoom is purely visual and never changes the scroll bounds.

use reel_animation::{MotionProfile, MotionValue};

use crate::config::OverviewConfig;

#[derive(Clone, Debug)]
pub struct OverviewZoom {
    enabled: bool,
    zoomed_scale: f32,
    transition: MotionProfile,
    scale: MotionValue,
    zoomed: bool,
}

impl OverviewZoom {
    pub fn new(config: &OverviewConfig) -> Self {
        Self {
            enabled: config.enabled,
            zoomed_scale: config.scale,
            transition: config.transition,
            scale: MotionValue::new(1.0),
            zoomed: false,
        }
    }

    /// Current content scale, 1.0 at full size
    pub fn scale(&self) -> f32 {
        self.scale.get()
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn is_animating(&self) -> bool {
        self.scale.is_animating()
    }

    /// Zoom out. Returns false when the overview is disabled.
    pub fn enter(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        if !self.zoomed {
            tracing::debug!(scale = self.zoomed_scale, "entering overview");
        }
        self.zoomed = true;
        self.scale.animate_to(self.zoomed_scale, self.transition);
        true
    }

    /// Zoom back to full size
    pub fn release(&mut self) {
        if self.zoomed {
            tracing::debug!("leaving overview");
        }
        self.zoomed = false;
        self.scale.animate_to(1.0, self.transition);
    }

    /// Jump straight back to full size
    pub fn reset(&mut self) {
        self.zoomed = false;
        self.scale.set(1.0);
    }

    pub fn tick(&mut self, dt: f32) -> bool {
        self.scale.tick(dt)
    }
}
