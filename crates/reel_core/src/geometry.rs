//! Geometry primitives in logical pixels

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when both extents are finite and strictly positive
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn top(&self) -> f32 {
        self.origin.y
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.size.width
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.size.height
    }

    /// Grow the rect by a delta on all sides (negative values shrink it)
    pub fn outset(&self, dx: f32, dy: f32) -> Self {
        Rect {
            origin: Point::new(self.origin.x - dx, self.origin.y - dy),
            size: Size::new(
                (self.size.width + 2.0 * dx).max(0.0),
                (self.size.height + 2.0 * dy).max(0.0),
            ),
        }
    }

    /// Position of `y` along the vertical extent, as a fraction in [0, 1]
    ///
    /// Returns `None` for a degenerate (zero-height) rect.
    pub fn vertical_ratio(&self, y: f32) -> Option<f32> {
        if self.size.height <= 0.0 || !self.size.height.is_finite() {
            return None;
        }
        Some(((y - self.origin.y) / self.size.height).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(rect.contains(Point::new(40.0, 60.0)));
        assert!(!rect.contains(Point::new(9.9, 30.0)));
        assert!(!rect.contains(Point::new(20.0, 60.1)));
    }

    #[test]
    fn test_vertical_ratio_clamps() {
        let track = Rect::new(0.0, 100.0, 10.0, 200.0);
        assert_eq!(track.vertical_ratio(100.0), Some(0.0));
        assert_eq!(track.vertical_ratio(200.0), Some(0.5));
        assert_eq!(track.vertical_ratio(300.0), Some(1.0));
        assert_eq!(track.vertical_ratio(-50.0), Some(0.0));
        assert_eq!(track.vertical_ratio(900.0), Some(1.0));
    }

    #[test]
    fn test_vertical_ratio_degenerate() {
        assert_eq!(Rect::new(0.0, 0.0, 10.0, 0.0).vertical_ratio(5.0), None);
    }

    #[test]
    fn test_outset() {
        let r = Rect::new(10.0, 10.0, 4.0, 4.0).outset(2.0, 1.0);
        assert_eq!(r, Rect::new(8.0, 9.0, 8.0, 6.0));
        assert_eq!(r.bottom(), 15.0);
    }

    #[test]
    fn test_size_measurable() {
        assert!(Size::new(800.0, 600.0).is_measurable());
        assert!(!Size::new(0.0, 600.0).is_measurable());
        assert!(!Size::new(800.0, f32::NAN).is_measurable());
    }
}
