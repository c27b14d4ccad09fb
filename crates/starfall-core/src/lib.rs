//! Core types shared by the starfall crates.

use serde::{Deserialize, Serialize};

/// Star generation and update policy, selected when a starfield is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Flat 2D field with twinkle, drift and pointer parallax.
    #[default]
    Flat,
    /// Pseudo-3D field flying toward the viewer, attracted by the pointer.
    Depth,
}

impl Variant {
    /// Cycle to the next variant.
    pub fn next(self) -> Self {
        match self {
            Variant::Flat => Variant::Depth,
            Variant::Depth => Variant::Flat,
        }
    }

    /// Display name for the variant.
    pub fn name(self) -> &'static str {
        match self {
            Variant::Flat => "flat",
            Variant::Depth => "depth",
        }
    }
}

/// A point in logical surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Viewport dimensions as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width.
    pub width: f32,
    /// Logical height.
    pub height: f32,
    /// Backing pixels per logical unit.
    pub pixel_ratio: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Viewport for a terminal of `cols` x `rows` cells.
    ///
    /// Each cell is `cell_size` logical units wide and twice that tall, and
    /// holds one pixel column and two pixel rows (half blocks).
    pub fn from_terminal(cols: u16, rows: u16, cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        Self {
            width: cols as f32 * cell_size,
            height: rows as f32 * cell_size * 2.0,
            pixel_ratio: 1.0 / cell_size,
        }
    }
}

/// Input events the starfield listens to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The viewport changed size.
    Resize(Viewport),
    /// The pointer moved to a position in logical surface coordinates.
    PointerMove(Point),
    /// The pointer left the surface.
    PointerLeave,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_cycle() {
        assert_eq!(Variant::Flat.next(), Variant::Depth);
        assert_eq!(Variant::Depth.next(), Variant::Flat);
        assert_eq!(Variant::default(), Variant::Flat);
    }

    #[test]
    fn test_terminal_viewport() {
        let viewport = Viewport::from_terminal(200, 50, 8.0);
        assert_eq!(viewport.width, 1600.0);
        assert_eq!(viewport.height, 800.0);
        assert_eq!(viewport.pixel_ratio, 0.125);

        // Backing resolution lands on one pixel per column, two per row
        assert_eq!((viewport.width * viewport.pixel_ratio) as u16, 200);
        assert_eq!((viewport.height * viewport.pixel_ratio) as u16, 100);
    }

    #[test]
    fn test_terminal_viewport_bad_cell_size() {
        let viewport = Viewport::from_terminal(10, 5, 0.0);
        assert_eq!(viewport.pixel_ratio, 1.0);
        assert_eq!(viewport.width, 10.0);
    }

    #[test]
    fn test_point_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }
}
