//! Viewport geometry shared by the session, toolbar and export code.
//!
//! Pointer positions arrive in viewport space; the annotation log stores
//! document space. [`Viewport`] carries the scroll offset that maps one onto
//! the other.

use crate::draw::Point;

/// Visible window onto the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Horizontal scroll offset in CSS pixels
    pub scroll_x: f64,
    /// Vertical scroll offset in CSS pixels
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
        }
    }

    /// Converts a viewport-relative position into document coordinates.
    pub fn to_document(&self, x: f64, y: f64) -> Point {
        Point::new(x + self.scroll_x, y + self.scroll_y)
    }

    /// Converts a document position back into viewport coordinates.
    pub fn to_viewport(&self, point: Point) -> (f64, f64) {
        (point.x - self.scroll_x, point.y - self.scroll_y)
    }

    /// Pixel size of a surface covering the viewport (at least 1x1).
    pub fn surface_size(&self) -> (i32, i32) {
        (
            (self.width.ceil() as i32).max(1),
            (self.height.ceil() as i32).max(1),
        )
    }
}

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether any edge sticks out of the viewport.
    pub fn exceeds(&self, viewport: &Viewport) -> bool {
        self.x < 0.0 || self.y < 0.0 || self.right() > viewport.width || self.bottom() > viewport.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_offset_maps_between_spaces() {
        let viewport = Viewport {
            scroll_x: 15.0,
            scroll_y: 400.0,
            width: 800.0,
            height: 600.0,
        };
        let doc = viewport.to_document(10.0, 20.0);
        assert_eq!(doc, Point::new(25.0, 420.0));
        assert_eq!(viewport.to_viewport(doc), (10.0, 20.0));
    }

    #[test]
    fn surface_size_rounds_up_and_never_collapses() {
        assert_eq!(Viewport::new(800.5, 600.0).surface_size(), (801, 600));
        assert_eq!(Viewport::new(0.0, -3.0).surface_size(), (1, 1));
    }

    #[test]
    fn rect_bounds_checks() {
        let viewport = Viewport::new(100.0, 100.0);
        let rect = Rect::new(90.0, 10.0, 20.0, 20.0);
        assert!(rect.exceeds(&viewport));
        assert!(rect.contains(95.0, 15.0));
        assert!(!rect.contains(110.0, 15.0));
        assert!(!Rect::new(0.0, 0.0, 100.0, 100.0).exceeds(&viewport));
    }
}
