//! Scroll state controller
//!
//! Owns the deck's single offset value and the bounds it lives in. Every
//! path that moves the content (wheel, touch, rail, thumb, snap) goes
//! through here, so the offset can never come to rest outside
//! `[-max_scroll, 0]`.
//!
//! Offsets are negative translations: 0 shows the first section, and
//! `-max_scroll` shows the bottom of the last one.

use reel_animation::{MotionProfile, MotionValue};

use crate::layout::DeckLayout;

/// Whether the user is directly positioning the content
///
/// Decides what happens on release: only content that was dragged settles
/// on a section boundary. A press that never moved (a tap or click) leaves
/// the mode at `Settled`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    /// Nothing is held; animations run to their targets
    #[default]
    Settled,
    /// A finger, rail drag or thumb drag has moved the offset
    Dragging,
}

/// The scroll offset and its bounds
#[derive(Clone, Debug, Default)]
pub struct ScrollController {
    offset: MotionValue,
    layout: Option<DeckLayout>,
    mode: InteractionMode,
}

impl ScrollController {
    /// A controller at offset 0 with no layout yet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(&self) -> Option<&DeckLayout> {
        self.layout.as_ref()
    }

    pub fn has_layout(&self) -> bool {
        self.layout.is_some()
    }

    /// Install a new layout (or drop it)
    ///
    /// Bounds follow the layout immediately. If the content shrank, the
    /// resting offset or in-flight target is pulled back into range.
    pub fn set_layout(&mut self, layout: Option<DeckLayout>) {
        self.layout = layout;
        if self.layout.is_none() {
            return;
        }

        let target = self.offset.target();
        let clamped = self.clamp(target);
        if clamped != target {
            tracing::debug!(
                "Relayout moved target {:.1} -> {:.1} (max_scroll={:.0})",
                target,
                clamped,
                self.max_scroll()
            );
            self.offset.retarget(clamped);
        }

        let value = self.offset.get();
        if !self.offset.is_animating() && self.clamp(value) != value {
            self.offset.set(self.clamp(value));
        }
    }

    /// Current instantaneous offset
    pub fn offset(&self) -> f32 {
        self.offset.get()
    }

    /// Offset the current animation will come to rest at
    pub fn target(&self) -> f32 {
        self.offset.target()
    }

    pub fn velocity(&self) -> f32 {
        self.offset.velocity()
    }

    pub fn is_animating(&self) -> bool {
        self.offset.is_animating()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    pub fn max_scroll(&self) -> f32 {
        self.layout.as_ref().map_or(0.0, DeckLayout::max_scroll)
    }

    /// Pin a value into `[-max_scroll, 0]`. NaN maps to 0.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return 0.0;
        }
        value.clamp(-self.max_scroll(), 0.0)
    }

    /// Scroll progress in [0, 1]
    pub fn progress(&self) -> f32 {
        self.progress_of(self.offset())
    }

    /// Progress an arbitrary offset maps to
    pub fn progress_of(&self, offset: f32) -> f32 {
        let max = self.max_scroll();
        if max <= 0.0 || offset.is_nan() {
            return 0.0;
        }
        (-offset / max).clamp(0.0, 1.0)
    }

    /// Offset that shows `progress` of the content
    pub fn offset_for_progress(&self, progress: f32) -> f32 {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        -progress * self.max_scroll()
    }

    /// Apply an offset immediately, cancelling any animation
    ///
    /// The value is taken as-is; callers clamp. Ignored without a layout.
    pub fn set_offset(&mut self, value: f32) {
        if self.layout.is_none() {
            tracing::trace!(value, "set_offset before layout, ignored");
            return;
        }
        self.offset.set(value);
    }

    /// Animate toward `target`, clamped into range
    ///
    /// Supersedes any in-flight animation, starting from the current
    /// instantaneous value. Returns the clamped target, or the current
    /// offset when there is no layout to clamp against.
    pub fn animate_to(&mut self, target: f32, profile: MotionProfile) -> f32 {
        if self.layout.is_none() {
            tracing::trace!(target, "animate_to before layout, ignored");
            return self.offset();
        }

        let clamped = self.clamp(target);
        tracing::trace!(
            "Animate offset {:.1} -> {:.1} (requested {:.1}, max_scroll={:.0})",
            self.offset(),
            clamped,
            target,
            self.max_scroll()
        );
        self.offset.animate_to(clamped, profile);
        clamped
    }

    /// Animate to the section boundary nearest the current target
    /// End direct manipulation
    ///
    /// When the content was being dragged and `settle` is given, it settles
    /// on the nearest section boundary. Returns the settle target.
    pub fn release(&mut self, settle: Option<MotionProfile>) -> Option<f32> {
        let dragged = self.mode == InteractionMode::Dragging;
        self.mode = InteractionMode::Settled;
        if !dragged {
            return None;
        }
        self.snap_to_nearest(settle?)
    }

    pub fn snap_to_nearest(&mut self, profile: MotionProfile) -> Option<f32> {
        let boundary = self.layout.as_ref()?.nearest_boundary(self.target());
        tracing::debug!(boundary, "snapping to section");
        Some(self.animate_to(boundary, profile))
    }

    /// Index of the section in view, 0 without a layout
    pub fn active_section(&self) -> usize {
        self.layout
            .as_ref()
            .map_or(0, |layout| layout.section_at(self.offset()))
    }

    /// Advance the offset animation by `dt` seconds
    ///
    /// Returns true while still animating.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.offset.tick(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackConfig;
    use reel_animation::SpringConfig;
    use reel_core::geometry::Size;

    const FRAME: f32 = 1.0 / 60.0;

    fn layout(sections: usize) -> DeckLayout {
        DeckLayout::measure(
            Size::new(1200.0, 800.0),
            sections,
            &[],
            &TrackConfig::default(),
        )
        .unwrap()
    }

    fn controller(sections: usize) -> ScrollController {
        let mut controller = ScrollController::new();
        controller.set_layout(Some(layout(sections)));
        controller
    }

    fn settle(controller: &mut ScrollController) {
        for _ in 0..600 {
            if !controller.tick(FRAME) {
                break;
            }
        }
    }

    #[test]
    fn test_clamp_range() {
        let c = controller(4);
        for value in [-1e9, -2401.0, -2400.0, -1200.0, 0.0, 0.5, 1e9, f32::NEG_INFINITY] {
            let clamped = c.clamp(value);
            assert!((-2400.0..=0.0).contains(&clamped), "{value} -> {clamped}");
        }
        assert_eq!(c.clamp(f32::NAN), 0.0);
        assert_eq!(c.clamp(-100.0), -100.0);
    }

    #[test]
    fn test_progress_endpoints_and_inverse() {
        let c = controller(4);
        assert_eq!(c.progress_of(0.0), 0.0);
        assert_eq!(c.progress_of(-2400.0), 1.0);
        assert_eq!(c.progress_of(-9999.0), 1.0);
        for p in [0.0, 0.1, 0.25, 0.5, 0.75, 1.0] {
            let back = c.progress_of(c.offset_for_progress(p));
            assert!((back - p).abs() < 1e-6, "{p} -> {back}");
        }
    }

    #[test]
    fn test_no_scrollable_content() {
        let mut c = controller(1);
        assert_eq!(c.max_scroll(), 0.0);
        assert_eq!(c.animate_to(-300.0, MotionProfile::ease_out(100)), 0.0);
        settle(&mut c);
        assert_eq!(c.offset(), 0.0);
        assert_eq!(c.progress(), 0.0);
    }

    #[test]
    fn test_writes_ignored_without_layout() {
        let mut c = ScrollController::new();
        c.set_offset(-50.0);
        assert_eq!(c.animate_to(-50.0, MotionProfile::ease_out(100)), 0.0);
        assert_eq!(c.offset(), 0.0);
        assert!(!c.is_animating());
        assert!(c.snap_to_nearest(MotionProfile::instant()).is_none());
    }

    #[test]
    fn test_animate_rests_on_clamped_target() {
        let mut c = controller(4);
        assert_eq!(
            c.animate_to(-5000.0, MotionProfile::spring(SpringConfig::wobbly())),
            -2400.0
        );
        settle(&mut c);
        assert_eq!(c.offset(), -2400.0);
    }

    #[test]
    fn test_set_offset_is_unclamped() {
        let mut c = controller(4);
        c.set_offset(-3000.0);
        assert_eq!(c.offset(), -3000.0);
        assert_eq!(c.progress(), 1.0);
    }

    #[test]
    fn test_relayout_reclamps() {
        let mut c = controller(4);
        c.set_offset(-2400.0);

        c.set_layout(Some(layout(2)));
        assert_eq!(c.max_scroll(), 800.0);
        assert_eq!(c.offset(), -800.0);

        c.animate_to(-800.0, MotionProfile::ease_out(100));
        c.set_offset(-400.0);
        c.animate_to(-800.0, MotionProfile::ease_out(300));
        c.set_layout(Some(layout(1)));
        assert_eq!(c.target(), 0.0);
        settle(&mut c);
        assert_eq!(c.offset(), 0.0);
    }

    #[test]
    fn test_snap_to_nearest() {
        let mut c = controller(4);
        c.set_offset(-1000.0);
        assert_eq!(c.snap_to_nearest(MotionProfile::spring(SpringConfig::snappy())), Some(-800.0));
        settle(&mut c);
        assert_eq!(c.offset(), -800.0);
        assert_eq!(c.active_section(), 1);
    }

    #[test]
    fn test_release_settles_only_after_drag() {
        let settle_profile = Some(MotionProfile::spring(SpringConfig::snappy()));
        let mut c = controller(4);
        c.set_offset(-1000.0);

        // Nothing was dragged: release leaves the offset alone
        assert_eq!(c.release(settle_profile), None);
        assert!(!c.is_animating());

        c.set_mode(InteractionMode::Dragging);
        assert_eq!(c.release(None), None);
        assert_eq!(c.mode(), InteractionMode::Settled);

        c.set_mode(InteractionMode::Dragging);
        assert_eq!(c.release(settle_profile), Some(-800.0));
        assert_eq!(c.mode(), InteractionMode::Settled);
        settle(&mut c);
        assert_eq!(c.offset(), -800.0);
    }
}
