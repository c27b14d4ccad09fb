//! Drawing surface and the canvas interface the starfield paints through.

use starfall_core::{Point, Viewport};

use crate::color::{ColorStop, Rgba};

/// Logical size and pixel density of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    width: f32,
    height: f32,
    pixel_ratio: f32,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            pixel_ratio: 1.0,
        }
    }
}

impl Surface {
    /// Build a surface from a viewport, clamping degenerate dimensions.
    ///
    /// When a dimension is raised to the minimum, the pixel ratio is lowered
    /// so the backing store never exceeds the pixels the viewport covers.
    pub fn from_viewport(viewport: Viewport) -> Self {
        let clamp_dim = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        let ratio = if viewport.pixel_ratio.is_finite() && viewport.pixel_ratio > 0.0 {
            viewport.pixel_ratio
        } else {
            1.0
        };
        let width = clamp_dim(viewport.width);
        let height = clamp_dim(viewport.height);

        let axis_limit = |raw: f32, dim: f32| {
            if raw.is_finite() && raw >= dim {
                return ratio;
            }
            let pixels = if raw.is_finite() && raw > 0.0 {
                (raw * ratio).floor().max(1.0)
            } else {
                1.0
            };
            pixels / dim
        };
        let pixel_ratio = ratio
            .min(axis_limit(viewport.width, width))
            .min(axis_limit(viewport.height, height));

        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Backing store resolution in device pixels.
    pub fn backing_size(&self) -> (usize, usize) {
        let w = (self.width * self.pixel_ratio).floor().max(1.0) as usize;
        let h = (self.height * self.pixel_ratio).floor().max(1.0) as usize;
        (w, h)
    }
}

/// A 2D drawing context. All coordinates are logical units; the canvas maps
/// them to device pixels through its transform.
pub trait Canvas {
    /// Reallocate the backing store. Contents are discarded.
    fn resize(&mut self, width: usize, height: usize);

    /// Set the logical-to-device scale.
    fn set_transform(&mut self, scale: f32);

    /// Reset every pixel to fully transparent.
    fn clear(&mut self);

    /// Paint every pixel with an opaque color.
    fn fill(&mut self, color: Rgba);

    /// Fill a disc of `radius` with a radial gradient reaching its last stop
    /// at `gradient_radius`.
    fn fill_radial(
        &mut self,
        center: Point,
        radius: f32,
        gradient_radius: f32,
        stops: &[ColorStop],
    );

    /// Fill a disc with a solid color.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba);

    /// Stroke a straight line whose color follows `stops` from `from` to `to`.
    fn stroke_gradient(&mut self, from: Point, to: Point, width: f32, stops: &[ColorStop]);
}
