//! Pointer-relative offsets for background stars.

use starfall_core::Point;

use crate::constants::{ATTRACTION_RADIUS, ATTRACTION_STRENGTH, PARALLAX_X, PARALLAX_Y};
use crate::surface::Surface;

/// Last known pointer position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PointerState {
    /// No pointer over the surface. The flat field treats this as the
    /// surface center (no shift); the depth field applies no attraction.
    #[default]
    Neutral,
    /// Pointer at a position in logical surface coordinates.
    At(Point),
}

impl PointerState {
    pub fn position(self) -> Option<Point> {
        match self {
            PointerState::Neutral => None,
            PointerState::At(p) => Some(p),
        }
    }
}

/// Parallax shift of a flat star with closeness `depth` in 0.0-1.0.
///
/// The pointer position is normalized to -1..1 around the surface center and
/// the star moves against it. Nearer stars shift less.
pub fn flat_offset(depth: f32, pointer: PointerState, surface: &Surface) -> Point {
    let Some(p) = pointer.position() else {
        return Point::default();
    };
    let fx = (p.x / surface.width() - 0.5) * 2.0;
    let fy = (p.y / surface.height() - 0.5) * 2.0;
    let distance = 1.0 - depth;
    Point::new(-fx * distance * PARALLAX_X, -fy * distance * PARALLAX_Y)
}

/// Displacement of a projected depth star toward the pointer.
pub fn attraction_offset(projected: Point, pointer: PointerState) -> Point {
    let Some(p) = pointer.position() else {
        return Point::default();
    };
    if projected.distance(p) >= ATTRACTION_RADIUS {
        return Point::default();
    }
    Point::new(
        (p.x - projected.x) * ATTRACTION_STRENGTH,
        (p.y - projected.y) * ATTRACTION_STRENGTH,
    )
}
