//! Screen-space geometry in CSS pixels.

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle from its four edges, the way a DOM bounding box
    /// reports them.
    #[must_use]
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Returns the left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Returns the top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns true if the point is inside the rectangle (half-open, for hit testing).
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns true if the point is inside or on the border of the rectangle.
    #[must_use]
    pub fn contains_inclusive(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Returns the point of the rectangle closest to `(x, y)`.
    ///
    /// For a point inside the rectangle this is the point itself.
    #[must_use]
    pub fn nearest_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x.min(self.right()).max(self.x),
            y.min(self.bottom()).max(self.y),
        )
    }

    /// Expands the rectangle by the given amount on all sides.
    #[must_use]
    pub fn expand(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }
}

/// Size of the drawing area in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either side is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        assert!(rect.contains(50.0, 30.0));
        assert!(!rect.contains(5.0, 30.0));
        assert!(!rect.contains(50.0, 80.0));
        assert!(!rect.contains(110.0, 30.0));
        assert!(rect.contains_inclusive(110.0, 30.0));
    }

    #[test]
    fn test_expand_by_padding() {
        let rect = Rect::from_edges(100.0, 100.0, 300.0, 200.0).expand(30.0);

        assert_eq!(rect.left(), 70.0);
        assert_eq!(rect.top(), 70.0);
        assert_eq!(rect.right(), 330.0);
        assert_eq!(rect.bottom(), 230.0);
    }

    #[test]
    fn test_nearest_point() {
        let rect = Rect::from_edges(0.0, 0.0, 100.0, 100.0);

        assert_eq!(rect.nearest_point(50.0, 50.0), (50.0, 50.0));
        assert_eq!(rect.nearest_point(-20.0, 50.0), (0.0, 50.0));
        assert_eq!(rect.nearest_point(150.0, 130.0), (100.0, 100.0));
    }

    #[test]
    fn test_empty_viewport() {
        assert!(Viewport::new(0, 800).is_empty());
        assert!(!Viewport::new(1000, 800).is_empty());
    }
}
