//! Deck layout
//!
//! Measured geometry the scroll bounds are derived from. A layout only
//! exists once the viewport has a real size; until then the deck has no
//! bounds and ignores offset writes.

use reel_core::geometry::{Point, Rect, Size};

use crate::config::TrackConfig;

/// Measured viewport, section extents and progress rail geometry
#[derive(Clone, Debug, PartialEq)]
pub struct DeckLayout {
    viewport: Size,
    /// Height of each section, never less than the viewport height
    section_extents: Vec<f32>,
    /// The visible rail
    track: Rect,
    /// Pointer-sensitive strip around the rail
    hit_area: Rect,
}

impl DeckLayout {
    /// Lay out `section_count` sections in `viewport`
    ///
    /// `measured` holds content heights reported by the host, indexed like
    /// the sections. Missing or unusable entries fall back to the viewport
    /// height. Returns `None` while the viewport is not measurable.
    pub fn measure(
        viewport: Size,
        section_count: usize,
        measured: &[f32],
        track: &TrackConfig,
    ) -> Option<Self> {
        if !viewport.is_measurable() {
            return None;
        }

        let section_extents = (0..section_count)
            .map(|i| match measured.get(i) {
                Some(&h) if h.is_finite() => h.max(viewport.height),
                _ => viewport.height,
            })
            .collect();

        let length = track
            .length
            .unwrap_or(viewport.height * track.viewport_fraction)
            .min(viewport.height);
        let top = (viewport.height - length) / 2.0;
        let rail = Rect::new(
            viewport.width - track.rail_inset - track.rail_width,
            top,
            track.rail_width,
            length,
        );

        let hit_width = track.hit_width.min(viewport.width);
        let hit_area = Rect::new(
            viewport.width - hit_width,
            top - track.thumb_size / 2.0,
            hit_width,
            length + track.thumb_size,
        );

        Some(Self {
            viewport,
            section_extents,
            track: rail,
            hit_area,
        })
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn track(&self) -> Rect {
        self.track
    }

    pub fn hit_area(&self) -> Rect {
        self.hit_area
    }

    pub fn track_length(&self) -> f32 {
        self.track.height()
    }

    pub fn section_count(&self) -> usize {
        self.section_extents.len()
    }

    pub fn section_extents(&self) -> &[f32] {
        &self.section_extents
    }

    /// Total height of all sections stacked
    pub fn content_extent(&self) -> f32 {
        self.section_extents.iter().sum()
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_extent() - self.viewport.height).max(0.0)
    }

    /// Offsets at which each section's top edge meets the viewport top,
    /// clamped into the scrollable range
    pub fn section_offsets(&self) -> impl Iterator<Item = f32> + '_ {
        let max = self.max_scroll();
        self.section_extents.iter().scan(0.0_f32, move |start, extent| {
            let offset = -start.min(max);
            *start += extent;
            Some(offset)
        })
    }

    /// Section boundary closest to `offset`
    pub fn nearest_boundary(&self, offset: f32) -> f32 {
        self.section_offsets()
            .min_by(|a, b| (a - offset).abs().total_cmp(&(b - offset).abs()))
            .unwrap_or(0.0)
    }

    /// Index of the section covering the middle of the viewport at `offset`
    pub fn section_at(&self, offset: f32) -> usize {
        let probe = -offset + self.viewport.height / 2.0;
        let mut start = 0.0;
        for (index, extent) in self.section_extents.iter().enumerate() {
            if probe < start + extent {
                return index;
            }
            start += extent;
        }
        self.section_extents.len().saturating_sub(1)
    }

    /// Horizontal center line of the rail, where the thumb rides
    pub fn track_center_x(&self) -> f32 {
        self.track.center().x
    }

    pub fn in_hit_area(&self, point: Point) -> bool {
        self.hit_area.contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(sections: usize) -> DeckLayout {
        DeckLayout::measure(
            Size::new(1200.0, 800.0),
            sections,
            &[],
            &TrackConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_four_sections_in_800_viewport() {
        let layout = layout(4);
        assert_eq!(layout.content_extent(), 3200.0);
        assert_eq!(layout.max_scroll(), 2400.0);
    }

    #[test]
    fn test_content_shorter_than_viewport() {
        assert_eq!(layout(1).max_scroll(), 0.0);
        assert_eq!(layout(0).max_scroll(), 0.0);
        assert_eq!(layout(0).nearest_boundary(-50.0), 0.0);
        assert_eq!(layout(0).section_at(0.0), 0);
    }

    #[test]
    fn test_unmeasured_viewport_has_no_layout() {
        let config = TrackConfig::default();
        assert!(DeckLayout::measure(Size::ZERO, 4, &[], &config).is_none());
        assert!(DeckLayout::measure(Size::new(f32::NAN, 800.0), 4, &[], &config).is_none());
    }

    #[test]
    fn test_measured_sections_never_shorter_than_viewport() {
        let layout = DeckLayout::measure(
            Size::new(1200.0, 800.0),
            3,
            &[1500.0, 300.0, f32::INFINITY],
            &TrackConfig::default(),
        )
        .unwrap();
        assert_eq!(layout.section_extents(), &[1500.0, 800.0, 800.0]);
        assert_eq!(layout.max_scroll(), 2300.0);
    }

    #[test]
    fn test_track_geometry() {
        let layout = layout(4);
        let track = layout.track();
        assert_eq!(track.height(), 640.0);
        assert_eq!(track.top(), 80.0);
        assert_eq!(track.x(), 1200.0 - 20.0 - 3.0);
        assert!(layout.in_hit_area(Point::new(1190.0, 400.0)));
        assert!(!layout.in_hit_area(Point::new(600.0, 400.0)));

        let fixed = DeckLayout::measure(
            Size::new(1200.0, 800.0),
            4,
            &[],
            &TrackConfig {
                length: Some(200.0),
                ..TrackConfig::default()
            },
        )
        .unwrap();
        assert_eq!(fixed.track_length(), 200.0);
        assert_eq!(fixed.track().top(), 300.0);
    }

    #[test]
    fn test_boundaries_and_active_section() {
        let layout = layout(4);
        let offsets: Vec<f32> = layout.section_offsets().collect();
        assert_eq!(offsets, vec![0.0, -800.0, -1600.0, -2400.0]);

        assert_eq!(layout.nearest_boundary(-350.0), 0.0);
        assert_eq!(layout.nearest_boundary(-450.0), -800.0);
        assert_eq!(layout.nearest_boundary(-5000.0), -2400.0);

        assert_eq!(layout.section_at(0.0), 0);
        assert_eq!(layout.section_at(-399.0), 0);
        assert_eq!(layout.section_at(-401.0), 1);
        assert_eq!(layout.section_at(-2400.0), 3);
    }
}
