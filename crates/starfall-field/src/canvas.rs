//! Software rasterizer backing the terminal surface.

use starfall_core::Point;

use crate::color::{ColorStop, Rgb, Rgba, sample_gradient};
use crate::surface::Canvas;

/// Alpha below which a pixel counts as transparent.
const ALPHA_EPSILON: f32 = 1.0 / 255.0;

/// Device pixel with premultiplied alpha.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pixel {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Pixel {
    pub fn is_transparent(&self) -> bool {
        self.a < ALPHA_EPSILON
    }

    /// Displayable color composited over black, or `None` when transparent.
    pub fn to_rgb(&self) -> Option<Rgb> {
        if self.is_transparent() {
            return None;
        }
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Some(Rgb::new(channel(self.r), channel(self.g), channel(self.b)))
    }

    /// Source-over blend of a straight-alpha color onto this pixel.
    fn blend(&mut self, color: Rgba) {
        let sa = color.a.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let keep = 1.0 - sa;
        self.r = color.r * sa + self.r * keep;
        self.g = color.g * sa + self.g * keep;
        self.b = color.b * sa + self.b * keep;
        self.a = sa + self.a * keep;
    }
}

/// A grid of device pixels drawn with logical coordinates.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: usize,
    height: usize,
    scale: f32,
    pixels: Vec<Pixel>,
}

impl Default for PixelCanvas {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl PixelCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            scale: 1.0,
            pixels: vec![Pixel::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Number of pixels that are not transparent.
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| !p.is_transparent()).count()
    }

    fn to_device(&self, p: Point) -> (f32, f32) {
        (p.x * self.scale, p.y * self.scale)
    }

    /// Blend a color onto the pixel containing device position `(x, y)`.
    fn plot(&mut self, x: f32, y: f32, color: Rgba) {
        if let Some(i) = self.index_at(x, y) {
            self.pixels[i].blend(color);
        }
    }

    fn index_at(&self, x: f32, y: f32) -> Option<usize> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let (xi, yi) = (x as usize, y as usize);
        if xi >= self.width || yi >= self.height {
            return None;
        }
        Some(yi * self.width + xi)
    }

    /// Device pixel range covering `[lo, hi]` along an axis of `len` pixels.
    fn span(lo: f32, hi: f32, len: usize) -> std::ops::Range<usize> {
        let start = lo.floor().max(0.0) as usize;
        let end = (hi.ceil().max(0.0) as usize).min(len);
        start.min(end)..end
    }

    /// Shade every pixel whose center lies within `radius` of `(cx, cy)`.
    /// `shade` receives the distance from the center.
    fn fill_disc(&mut self, cx: f32, cy: f32, radius: f32, shade: impl Fn(f32) -> Rgba) {
        // Discs smaller than a pixel collapse to a point sample at the center
        if radius < 0.5 {
            self.plot(cx, cy, shade(0.0));
            return;
        }
        let xs = Self::span(cx - radius, cx + radius, self.width);
        let ys = Self::span(cy - radius, cy + radius, self.height);
        for py in ys {
            for px in xs.clone() {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist <= radius {
                    let color = shade(dist);
                    self.pixels[py * self.width + px].blend(color);
                }
            }
        }
    }
}

impl Canvas for PixelCanvas {
    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, Pixel::default());
    }

    fn set_transform(&mut self, scale: f32) {
        self.scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
    }

    fn clear(&mut self) {
        self.pixels.fill(Pixel::default());
    }

    fn fill(&mut self, color: Rgba) {
        let pixel = Pixel {
            r: color.r,
            g: color.g,
            b: color.b,
            a: 1.0,
        };
        self.pixels.fill(pixel);
    }

    fn fill_radial(
        &mut self,
        center: Point,
        radius: f32,
        gradient_radius: f32,
        stops: &[ColorStop],
    ) {
        if radius <= 0.0 {
            return;
        }
        let (cx, cy) = self.to_device(center);
        let gradient_radius = (gradient_radius * self.scale).max(f32::EPSILON);
        self.fill_disc(cx, cy, radius * self.scale, |dist| {
            sample_gradient(stops, dist / gradient_radius)
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let (cx, cy) = self.to_device(center);
        self.fill_disc(cx, cy, radius * self.scale, |_| color);
    }

    fn stroke_gradient(&mut self, from: Point, to: Point, width: f32, stops: &[ColorStop]) {
        let (x0, y0) = self.to_device(from);
        let (x1, y1) = self.to_device(to);
        let (dx, dy) = (x1 - x0, y1 - y0);
        let len_sq = dx * dx + dy * dy;
        let half_width = width * self.scale / 2.0;

        if half_width < 0.5 {
            // Hairline: walk the segment in half-pixel steps, one blend per pixel
            let steps = (len_sq.sqrt() * 2.0).ceil().max(1.0) as usize;
            let mut last = None;
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                let Some(idx) = self.index_at(x0 + dx * t, y0 + dy * t) else {
                    continue;
                };
                if last == Some(idx) {
                    continue;
                }
                last = Some(idx);
                self.pixels[idx].blend(sample_gradient(stops, t));
            }
            return;
        }

        let xs = Self::span(x0.min(x1) - half_width, x0.max(x1) + half_width, self.width);
        let ys = Self::span(y0.min(y1) - half_width, y0.max(y1) + half_width, self.height);
        for py in ys {
            for px in xs.clone() {
                let (qx, qy) = (px as f32 + 0.5 - x0, py as f32 + 0.5 - y0);
                let t = if len_sq > 0.0 {
                    ((qx * dx + qy * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (ex, ey) = (qx - dx * t, qy - dy * t);
                if (ex * ex + ey * ey).sqrt() <= half_width {
                    self.pixels[py * self.width + px].blend(sample_gradient(stops, t));
                }
            }
        }
    }
}
