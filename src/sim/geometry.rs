//! Axis-aligned rectangle geometry
//!
//! Everything in the world is an AABB, so the entire collision story is the
//! `overlaps` test plus careful ordering in the tick pipeline.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle. Y grows downward (screen coordinates), so
/// `bottom` is the larger y value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at its top-left corner
    pub fn from_pos_size(pos: Vec2, width: f32, height: f32) -> Self {
        Self::new(pos.x, pos.y, width, height)
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (larger y)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Strict AABB overlap test.
///
/// Symmetric, side-effect free. Rectangles that merely touch do not overlap,
/// and a zero-width or zero-height rectangle never overlaps anything.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(a, b));

        let c = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(a, c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(a, b));

        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(a, below));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 10.0, 10.0);
        assert!(overlaps(outer, inner));
        assert!(overlaps(inner, outer));
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (
            -500.0f32..500.0,
            -500.0f32..500.0,
            0.0f32..200.0,
            0.0f32..200.0,
        )
            .prop_map(|(x, y, width, height)| Rect::new(x, y, width, height))
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(overlaps(a, b), overlaps(b, a));
        }

        #[test]
        fn prop_zero_area_never_overlaps(a in arb_rect(), b in arb_rect()) {
            let flat = Rect::new(a.x, a.y, a.width, 0.0);
            let thin = Rect::new(a.x, a.y, 0.0, a.height);
            prop_assert!(!overlaps(flat, b));
            prop_assert!(!overlaps(thin, b));
        }

        #[test]
        fn prop_rect_overlaps_itself(a in arb_rect()) {
            // Any rectangle with positive area overlaps itself
            prop_assume!(a.width > 0.0 && a.height > 0.0);
            prop_assert!(overlaps(a, a));
        }
    }
}
