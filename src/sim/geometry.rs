//! Axis-aligned rectangles and overlap tests
//!
//! Every entity in the playfield is a box; there is no other collision shape.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width.max(0.0), height.max(0.0)),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// True once the top edge has reached or passed the horizontal line `y`
    #[inline]
    pub fn is_below(&self, y: f32) -> bool {
        self.pos.y >= y
    }

    /// Move the rectangle so it lies inside `bounds`.
    ///
    /// If the rectangle is larger than the bounds on an axis it is pinned to
    /// the bounds' origin on that axis.
    pub fn clamp_within(&mut self, bounds: &Rect) {
        let max = (bounds.pos + bounds.size - self.size).max(bounds.pos);
        self.pos = self.pos.clamp(bounds.pos, max);
    }
}

/// Check whether two rectangles overlap.
///
/// Strict inequalities: rectangles that only share an edge do not overlap.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));

        let far = Rect::new(50.0, 50.0, 10.0, 10.0);
        assert!(!overlaps(&a, &far));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Shares the right edge
        assert!(!overlaps(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        // Shares the bottom edge
        assert!(!overlaps(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Shares only a corner
        assert!(!overlaps(&a, &Rect::new(10.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_negative_size_is_zeroed() {
        let r = Rect::new(3.0, 4.0, -5.0, -1.0);
        assert_eq!(r.size, Vec2::ZERO);
    }

    #[test]
    fn test_clamp_within() {
        let bounds = Rect::new(0.0, 0.0, 400.0, 600.0);

        let mut r = Rect::new(-12.0, 590.0, 50.0, 80.0);
        r.clamp_within(&bounds);
        assert_eq!(r.pos, Vec2::new(0.0, 520.0));

        let mut r = Rect::new(380.0, -3.0, 50.0, 80.0);
        r.clamp_within(&bounds);
        assert_eq!(r.pos, Vec2::new(350.0, 0.0));

        // Oversized on x: pinned to the origin
        let mut r = Rect::new(20.0, 10.0, 500.0, 80.0);
        r.clamp_within(&bounds);
        assert_eq!(r.pos, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_is_below() {
        let r = Rect::new(0.0, 600.0, 10.0, 10.0);
        assert!(r.is_below(600.0));
        assert!(!Rect::new(0.0, 599.5, 10.0, 10.0).is_below(600.0));
    }

    fn rect() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in rect(), b in rect()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn horizontally_adjacent_never_overlap(a in rect(), dy in -300.0f32..300.0, w in 0.0f32..200.0, h in 0.0f32..200.0) {
            let b = Rect::new(a.right(), a.top() + dy, w, h);
            prop_assert!(!overlaps(&a, &b));
        }

        #[test]
        fn clamped_rect_stays_inside(r in rect()) {
            let bounds = Rect::new(0.0, 0.0, 400.0, 600.0);
            let mut r = r;
            r.clamp_within(&bounds);
            if r.size.x <= bounds.size.x {
                prop_assert!(r.left() >= 0.0 && r.right() <= 400.0 + 1e-3);
            }
            if r.size.y <= bounds.size.y {
                prop_assert!(r.top() >= 0.0 && r.bottom() <= 600.0 + 1e-3);
            }
        }
    }
}
