//! Canvas test double that records draw calls.

use starfall_core::Point;

use crate::color::{ColorStop, Rgba};
use crate::surface::Canvas;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Resize(usize, usize),
    Transform(f32),
    Clear,
    Fill,
    Radial { center: Point, radius: f32 },
    Circle { center: Point, radius: f32 },
    Stroke { from: Point, to: Point },
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl Canvas for RecordingCanvas {
    fn resize(&mut self, width: usize, height: usize) {
        self.calls.push(DrawCall::Resize(width, height));
    }

    fn set_transform(&mut self, scale: f32) {
        self.calls.push(DrawCall::Transform(scale));
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill(&mut self, _color: Rgba) {
        self.calls.push(DrawCall::Fill);
    }

    fn fill_radial(&mut self, center: Point, radius: f32, _gradient_radius: f32, _stops: &[ColorStop]) {
        self.calls.push(DrawCall::Radial { center, radius });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, _color: Rgba) {
        self.calls.push(DrawCall::Circle { center, radius });
    }

    fn stroke_gradient(&mut self, from: Point, to: Point, _width: f32, _stops: &[ColorStop]) {
        self.calls.push(DrawCall::Stroke { from, to });
    }
}
