//! Integer axis-aligned rectangles
//!
//! Every entity on the field is a rectangle in whole field units. Edges follow
//! the half-open convention: `right = x + width`, `bottom = y + height`, and two
//! rectangles that merely share an edge do not overlap.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in field units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    #[inline]
    pub fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.center_x(), self.center_y())
    }

    /// Move so that `center()` returns the given point
    pub fn set_center(&mut self, center: IVec2) {
        self.x = center.x - self.width / 2;
        self.y = center.y - self.height / 2;
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.width;
    }

    /// True when the interiors intersect; empty rectangles never overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.width <= 0 || self.height <= 0 || other.width <= 0 || other.height <= 0 {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True when the point lies inside (right and bottom edges excluded)
    pub fn contains_point(&self, point: IVec2) -> bool {
        point.x >= self.left() && point.x < self.right() && point.y >= self.top() && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(20, 200, 10, 100);
        assert_eq!(r.right(), 30);
        assert_eq!(r.bottom(), 300);
        assert_eq!(r.center(), IVec2::new(25, 250));
    }

    #[test]
    fn test_set_center_rounds_toward_top_left() {
        let mut r = Rect::new(0, 0, 16, 16);
        r.set_center(IVec2::new(450, 250));
        assert_eq!((r.x, r.y), (442, 242));
        assert_eq!(r.center(), IVec2::new(450, 250));
    }

    #[test]
    fn test_overlap_is_strict() {
        let paddle = Rect::new(20, 200, 10, 100);
        // Sharing the paddle's right edge is contact, not overlap
        assert!(!paddle.overlaps(&Rect::new(30, 240, 16, 16)));
        assert!(paddle.overlaps(&Rect::new(29, 240, 16, 16)));
        // Symmetric
        assert!(Rect::new(29, 240, 16, 16).overlaps(&paddle));
        // Vertical miss
        assert!(!paddle.overlaps(&Rect::new(22, 300, 16, 16)));
    }

    #[test]
    fn test_empty_rect_never_overlaps() {
        let a = Rect::new(0, 0, 0, 10);
        let b = Rect::new(0, 0, 10, 10);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_contains_point() {
        let r = Rect::new(10, 10, 5, 5);
        assert!(r.contains_point(IVec2::new(10, 10)));
        assert!(r.contains_point(IVec2::new(14, 14)));
        assert!(!r.contains_point(IVec2::new(15, 12)));
    }

    #[test]
    fn test_set_left_right() {
        let mut r = Rect::new(100, 0, 16, 16);
        r.set_right(870);
        assert_eq!(r.right(), 870);
        r.set_left(30);
        assert_eq!(r.left(), 30);
    }
}
