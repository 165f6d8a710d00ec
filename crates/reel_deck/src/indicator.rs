//! Progress indicator
//!
//! The vertical rail on the right edge. Its fill and thumb are derived from
//! the controller's offset on every query; nothing about progress is stored.
//! Dragging the thumb maps pointer travel back to an offset.

use reel_animation::MotionProfile;
use reel_core::geometry::{Point, Rect};

use crate::config::TrackConfig;
use crate::controller::{InteractionMode, ScrollController};

/// What a point on the rail hits
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RailHit {
    Thumb,
    Track,
}

/// An in-progress thumb drag
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThumbDrag {
    /// Progress when the thumb was grabbed
    pub start_progress: f32,
    /// Pointer Y when the thumb was grabbed
    pub start_y: f32,
}

#[derive(Clone, Debug)]
pub struct ProgressIndicator {
    thumb_size: f32,
    drag: Option<ThumbDrag>,
}

impl ProgressIndicator {
    pub fn new(config: &TrackConfig) -> Self {
        Self {
            thumb_size: config.thumb_size,
            drag: None,
        }
    }

    pub fn progress(&self, controller: &ScrollController) -> f32 {
        controller.progress()
    }

    /// Filled length of the rail
    pub fn fill_extent(&self, controller: &ScrollController) -> f32 {
        controller
            .layout()
            .map_or(0.0, |layout| controller.progress() * layout.track_length())
    }

    pub fn thumb_center(&self, controller: &ScrollController) -> Option<Point> {
        let layout = controller.layout()?;
        Some(Point::new(
            layout.track_center_x(),
            layout.track().top() + self.fill_extent(controller),
        ))
    }

    pub fn thumb_rect(&self, controller: &ScrollController) -> Option<Rect> {
        let center = self.thumb_center(controller)?;
        let half = self.thumb_size / 2.0;
        Some(Rect::new(
            center.x - half,
            center.y - half,
            self.thumb_size,
            self.thumb_size,
        ))
    }

    /// Hit test a point; the thumb wins over the rail it sits on
    pub fn hit_test(&self, controller: &ScrollController, point: Point) -> Option<RailHit> {
        let layout = controller.layout()?;
        let thumb = self.thumb_rect(controller)?.outset(self.thumb_size / 2.0, 0.0);
        if thumb.contains(point) {
            Some(RailHit::Thumb)
        } else if layout.in_hit_area(point) {
            Some(RailHit::Track)
        } else {
            None
        }
    }

    pub fn drag(&self) -> Option<ThumbDrag> {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Grab the thumb at pointer `y`, freezing any running animation
    pub fn begin_drag(&mut self, controller: &mut ScrollController, y: f32) -> bool {
        if !controller.has_layout() || !y.is_finite() {
            return false;
        }
        let offset = controller.offset();
        controller.set_offset(offset);
        self.drag = Some(ThumbDrag {
            start_progress: controller.progress(),
            start_y: y,
        });
        true
    }

    /// Move the grabbed thumb; the offset follows 1:1. Returns the new progress.
    pub fn drag_to(&mut self, controller: &mut ScrollController, y: f32) -> Option<f32> {
        let drag = self.drag?;
        let length = controller.layout()?.track_length();
        if length <= 0.0 || !y.is_finite() {
            return None;
        }

        let progress = (drag.start_progress + (y - drag.start_y) / length).clamp(0.0, 1.0);
        let offset = controller.offset_for_progress(progress);
        controller.set_offset(offset);
        controller.set_mode(InteractionMode::Dragging);
        tracing::trace!(
            "Thumb drag y={:.1} progress={:.3} offset={:.1}",
            y,
            progress,
            offset
        );
        Some(progress)
    }

    /// Let go of the thumb. A thumb that was dragged settles on the nearest
    /// section with `snap`; a click leaves the offset where it is.
    pub fn end_drag(
        &mut self,
        controller: &mut ScrollController,
        snap: Option<MotionProfile>,
    ) -> Option<f32> {
        self.drag.take()?;
        controller.release(snap)
    }

    /// Drop the drag without settling
    pub fn reset(&mut self) {
        self.drag = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::DeckLayout;
    use reel_animation::SpringConfig;
    use reel_core::geometry::Size;

    fn setup() -> (ScrollController, ProgressIndicator) {
        let config = TrackConfig {
            length: Some(200.0),
            ..TrackConfig::default()
        };
        let mut controller = ScrollController::new();
        controller.set_layout(DeckLayout::measure(
            Size::new(1200.0, 800.0),
            4,
            &[],
            &config,
        ));
        (controller, ProgressIndicator::new(&config))
    }

    #[test]
    fn test_fill_and_thumb_follow_offset() {
        let (mut controller, indicator) = setup();
        assert_eq!(indicator.fill_extent(&controller), 0.0);
        assert_eq!(indicator.thumb_center(&controller).unwrap().y, 300.0);

        controller.set_offset(-1200.0);
        assert_eq!(indicator.progress(&controller), 0.5);
        assert_eq!(indicator.fill_extent(&controller), 100.0);
        let thumb = indicator.thumb_rect(&controller).unwrap();
        assert_eq!(thumb.center().y, 400.0);
        assert_eq!(thumb.width(), 14.0);
    }

    #[test]
    fn test_no_layout_no_geometry() {
        let indicator = ProgressIndicator::new(&TrackConfig::default());
        let controller = ScrollController::new();
        assert_eq!(indicator.fill_extent(&controller), 0.0);
        assert!(indicator.thumb_rect(&controller).is_none());
        assert!(indicator.hit_test(&controller, Point::new(1190.0, 400.0)).is_none());
    }

    #[test]
    fn test_hit_test_prefers_thumb() {
        let (controller, indicator) = setup();
        let thumb = indicator.thumb_center(&controller).unwrap();
        assert_eq!(indicator.hit_test(&controller, thumb), Some(RailHit::Thumb));
        assert_eq!(
            indicator.hit_test(&controller, Point::new(thumb.x, 450.0)),
            Some(RailHit::Track)
        );
        assert_eq!(indicator.hit_test(&controller, Point::new(10.0, 450.0)), None);
    }

    #[test]
    fn test_thumb_drag_inverse_mapping() {
        let (mut controller, mut indicator) = setup();
        controller.set_offset(-600.0);
        assert!(indicator.begin_drag(&mut controller, 350.0));

        assert_eq!(indicator.drag_to(&mut controller, 400.0), Some(0.5));
        assert_eq!(controller.offset(), -1200.0);
        assert!(!controller.is_animating());

        assert_eq!(indicator.drag_to(&mut controller, 1000.0), Some(1.0));
        assert_eq!(controller.offset(), -2400.0);
        assert_eq!(indicator.drag_to(&mut controller, -1000.0), Some(0.0));
        assert_eq!(controller.offset(), 0.0);
    }

    #[test]
    fn test_thumb_release_snaps() {
        let (mut controller, mut indicator) = setup();
        indicator.begin_drag(&mut controller, 300.0);
        indicator.drag_to(&mut controller, 350.0);
        assert_eq!(controller.offset(), -600.0);

        let snapped = indicator.end_drag(
            &mut controller,
            Some(MotionProfile::spring(SpringConfig::snappy())),
        );
        assert_eq!(snapped, Some(-800.0));
        assert_eq!(controller.mode(), InteractionMode::Settled);
        assert_eq!(indicator.end_drag(&mut controller, None), None);
    }

    #[test]
    fn test_thumb_click_does_not_snap() {
        let (mut controller, mut indicator) = setup();
        controller.set_offset(-600.0);
        indicator.begin_drag(&mut controller, 350.0);
        assert_eq!(controller.mode(), InteractionMode::Settled);

        let snapped = indicator.end_drag(
            &mut controller,
            Some(MotionProfile::spring(SpringConfig::snappy())),
        );
        assert_eq!(snapped, None);
        assert_eq!(controller.offset(), -600.0);
        assert!(!controller.is_animating());
    }

    #[test]
    fn test_drag_before_grab_is_ignored() {
        let (mut controller, mut indicator) = setup();
        assert_eq!(indicator.drag_to(&mut controller, 400.0), None);
        assert_eq!(controller.offset(), 0.0);
    }
}
