//! Type-safe coordinate spaces for the inspector.
//!
//! Pointer events arrive in one space and hit testing happens in another,
//! so each gets its own type to prevent accidental mixing at compile time.
//!
//! # Coordinate Spaces
//!
//! - **Screen space**: Pixels relative to the display surface origin, as
//!   reported by the host's pointer events.
//! - **Preview space**: Pixels relative to the top-left corner of the
//!   zoomed preview. Resolved node boxes live here; the root box always
//!   starts at `(0, 0)`.
//!
//! The two spaces differ only by the viewport's draw shift, which centers
//! the preview inside the surface.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Position in screen space (raw pointer coordinates on the display surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScreenPoint(pub IVec2);

/// Position in preview space (where resolved node boxes live).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PreviewPoint(pub IVec2);

/// Integer offset between the two spaces.
///
/// Represents a shift, not a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DrawShift(pub IVec2);

// === ScreenPoint ===

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    pub fn x(&self) -> i32 {
        self.0.x
    }

    pub fn y(&self) -> i32 {
        self.0.y
    }

    /// Moves this point into preview space by removing the draw shift.
    pub fn to_preview(self, shift: DrawShift) -> PreviewPoint {
        PreviewPoint(self.0 - shift.0)
    }
}

impl From<IVec2> for ScreenPoint {
    fn from(v: IVec2) -> Self {
        Self(v)
    }
}

impl From<ScreenPoint> for IVec2 {
    fn from(p: ScreenPoint) -> Self {
        p.0
    }
}

// === PreviewPoint ===

impl PreviewPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    pub fn x(&self) -> i32 {
        self.0.x
    }

    pub fn y(&self) -> i32 {
        self.0.y
    }

    /// Moves this point back into screen space by applying the draw shift.
    pub fn to_screen(self, shift: DrawShift) -> ScreenPoint {
        ScreenPoint(self.0 + shift.0)
    }
}

impl From<IVec2> for PreviewPoint {
    fn from(v: IVec2) -> Self {
        Self(v)
    }
}

impl From<PreviewPoint> for IVec2 {
    fn from(p: PreviewPoint) -> Self {
        p.0
    }
}

impl Add<DrawShift> for PreviewPoint {
    type Output = ScreenPoint;

    fn add(self, shift: DrawShift) -> Self::Output {
        self.to_screen(shift)
    }
}

impl Sub<DrawShift> for ScreenPoint {
    type Output = PreviewPoint;

    fn sub(self, shift: DrawShift) -> Self::Output {
        self.to_preview(shift)
    }
}

// === DrawShift ===

impl DrawShift {
    pub const ZERO: Self = Self(IVec2::ZERO);

    pub fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    pub fn x(&self) -> i32 {
        self.0.x
    }

    pub fn y(&self) -> i32 {
        self.0.y
    }
}
