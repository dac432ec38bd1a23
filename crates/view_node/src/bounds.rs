//! Integer rectangles in preview space.
//!
//! Resolved node geometry is snapped to whole device pixels, so unlike the
//! float geometry the nodes are described with, boxes and clips here are
//! `i32` based. Two flavors exist because they test points differently:
//!
//! - [`PreviewBox`] is half-open: the right and bottom edges are outside.
//! - [`ClipRect`] is inclusive on every edge.

use crate::coords::PreviewPoint;
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A node's resolved bounding box in preview space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreviewBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PreviewBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the origin (top-left corner) of the box
    pub fn origin(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Returns the width and height of the box
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    /// Exclusive right edge
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Width times height, widened so large boxes cannot overflow.
    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    /// A box with no positive extent on either axis.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Tests if a point lies inside the box.
    ///
    /// The right and bottom edges are excluded, and an empty box never
    /// contains anything.
    pub fn contains(&self, point: PreviewPoint) -> bool {
        !self.is_empty()
            && point.x() >= self.x
            && point.y() >= self.y
            && point.x() < self.right()
            && point.y() < self.bottom()
    }

    /// Tests if another box lies entirely within this one.
    pub fn contains_box(&self, other: &PreviewBox) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Translates the box by an offset
    pub fn translate(&self, offset: IVec2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }
}

/// The region a point must fall within for a node to be hit.
///
/// Built from the root box and narrowed by every ancestor that clips its
/// children. Edges are inclusive, so a point on the far edge of a clipping
/// parent still reaches its descendants.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClipRect {
    /// Top-left corner (inclusive)
    pub min: IVec2,
    /// Bottom-right corner (inclusive)
    pub max: IVec2,
}

impl ClipRect {
    pub fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// The clip covering the root box: `(0, 0)` to its width and height.
    pub fn from_root(root: &PreviewBox) -> Self {
        Self {
            min: IVec2::ZERO,
            max: IVec2::new(root.width, root.height),
        }
    }

    /// Narrows the clip to the overlap with a node box.
    ///
    /// The result may be inverted (min past max) when they do not overlap,
    /// in which case it contains no point.
    pub fn intersect_box(&self, bounds: &PreviewBox) -> Self {
        Self {
            min: self.min.max(bounds.origin()),
            max: self.max.min(IVec2::new(bounds.right(), bounds.bottom())),
        }
    }

    pub fn contains(&self, point: PreviewPoint) -> bool {
        point.x() >= self.min.x
            && point.x() <= self.max.x
            && point.y() >= self.min.y
            && point.y() <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_contains_is_half_open() {
        let bounds = PreviewBox::new(10, 20, 100, 50);

        assert!(bounds.contains(PreviewPoint::new(10, 20)));
        assert!(bounds.contains(PreviewPoint::new(109, 69)));
        assert!(!bounds.contains(PreviewPoint::new(110, 40)));
        assert!(!bounds.contains(PreviewPoint::new(50, 70)));
        assert!(!bounds.contains(PreviewPoint::new(9, 40)));
    }

    #[test]
    fn test_degenerate_box_never_contains() {
        assert!(!PreviewBox::new(0, 0, 0, 10).contains(PreviewPoint::new(0, 0)));
        assert!(!PreviewBox::new(0, 0, 10, 0).contains(PreviewPoint::new(0, 0)));
        assert!(!PreviewBox::new(5, 5, -3, -3).contains(PreviewPoint::new(4, 4)));
    }

    #[test]
    fn test_box_edges() {
        let bounds = PreviewBox::new(10, 20, 100, 50);

        assert_eq!(bounds.origin(), IVec2::new(10, 20));
        assert_eq!(bounds.size(), IVec2::new(100, 50));
        assert_eq!((bounds.right(), bounds.bottom()), (110, 70));
        assert_eq!(bounds.translate(IVec2::new(-10, 5)).origin(), IVec2::new(0, 25));
    }

    #[test]
    fn test_area_does_not_overflow() {
        let bounds = PreviewBox::new(0, 0, i32::MAX, i32::MAX);
        assert_eq!(bounds.area(), i64::from(i32::MAX) * i64::from(i32::MAX));
    }

    #[test]
    fn test_clip_is_inclusive() {
        let clip = ClipRect::from_root(&PreviewBox::new(0, 0, 200, 100));

        assert!(clip.contains(PreviewPoint::new(200, 100)));
        assert!(clip.contains(PreviewPoint::new(0, 0)));
        assert!(!clip.contains(PreviewPoint::new(201, 50)));
        assert!(!clip.contains(PreviewPoint::new(-1, 50)));
    }

    #[test]
    fn test_clip_intersection() {
        let clip = ClipRect::from_root(&PreviewBox::new(0, 0, 200, 200));
        let narrowed = clip.intersect_box(&PreviewBox::new(10, 10, 50, 50));

        assert_eq!(narrowed, ClipRect::new(IVec2::new(10, 10), IVec2::new(60, 60)));
        assert!(narrowed.contains(PreviewPoint::new(45, 45)));
        assert!(!narrowed.contains(PreviewPoint::new(65, 65)));
    }

    #[test]
    fn test_disjoint_clip_contains_nothing() {
        let clip = ClipRect::from_root(&PreviewBox::new(0, 0, 20, 20));
        let narrowed = clip.intersect_box(&PreviewBox::new(50, 50, 10, 10));

        for x in -5..70 {
            assert!(!narrowed.contains(PreviewPoint::new(x, x)));
        }
    }
}
