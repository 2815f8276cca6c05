//! Integer rectangle geometry
//!
//! Rectangles are in play-area pixels with y growing downward. Edges are
//! half-open: a rect covers `left..right` and `top..bottom`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned integer rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub origin: IVec2,
    /// Width and height
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    /// Rect of the given size whose centre is at `center`
    pub fn from_center(center: IVec2, size: IVec2) -> Self {
        Self {
            origin: center - size / 2,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Strict overlap test (touching edges do not count, empty rects never hit)
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Overlapping region, if any
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let min = self.origin.max(other.origin);
        let max = IVec2::new(self.right(), self.bottom()).min(IVec2::new(other.right(), other.bottom()));
        Some(Rect {
            origin: min,
            size: max - min,
        })
    }

    /// Check if a pixel lies inside the rect
    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= self.left() && point.x < self.right() && point.y >= self.top() && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!((r.left(), r.top(), r.right(), r.bottom()), (10, 20, 40, 60));
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(IVec2::new(50, 256), IVec2::new(34, 24));
        assert_eq!(r.origin, IVec2::new(33, 244));
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(5, 5, 10, 10)));
        // Touching edges only
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
        assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
        // Empty rect
        assert!(!a.intersects(&Rect::new(2, 2, 0, 5)));
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(6, -4, 10, 8);
        assert_eq!(a.intersection(&b), Some(Rect::new(6, 0, 4, 4)));
        assert_eq!(a.intersection(&Rect::new(20, 20, 5, 5)), None);
    }

    #[test]
    fn test_contains() {
        let r = Rect::new(0, 0, 4, 4);
        assert!(r.contains(IVec2::new(0, 0)));
        assert!(r.contains(IVec2::new(3, 3)));
        assert!(!r.contains(IVec2::new(4, 3)));
    }
}
