//! Terminal output for a [`PixelCanvas`].

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::canvas::PixelCanvas;

/// Draws a pixel canvas with half blocks: each cell shows two stacked pixels.
///
/// Fully transparent cells are left untouched so the terminal background
/// shows through.
#[derive(Debug, Clone, Copy)]
pub struct HalfBlocks<'a> {
    canvas: &'a PixelCanvas,
}

impl<'a> HalfBlocks<'a> {
    pub fn new(canvas: &'a PixelCanvas) -> Self {
        Self { canvas }
    }
}

impl Widget for HalfBlocks<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let (x, y) = (col as usize, row as usize * 2);
                let top = self.canvas.pixel(x, y).and_then(|p| p.to_rgb());
                let bottom = self.canvas.pixel(x, y + 1).and_then(|p| p.to_rgb());

                let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) else {
                    continue;
                };
                match (top, bottom) {
                    (None, None) => {}
                    (Some(top), Some(bottom)) => {
                        cell.set_char('▀').set_fg(top.into()).set_bg(bottom.into());
                    }
                    (Some(top), None) => {
                        cell.set_char('▀').set_fg(top.into()).set_bg(Color::Reset);
                    }
                    (None, Some(bottom)) => {
                        cell.set_char('▄').set_fg(bottom.into()).set_bg(Color::Reset);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::surface::Canvas;
    use starfall_core::Point;

    #[test]
    fn test_half_blocks() {
        let mut canvas = PixelCanvas::new(3, 2);
        let red = Rgb::new(255, 0, 0);
        let blue = Rgb::new(0, 0, 255);
        // Column 0: top only, column 1: bottom only, column 2: both
        canvas.fill_circle(Point::new(0.5, 0.5), 0.1, red.with_alpha(1.0));
        canvas.fill_circle(Point::new(1.5, 1.5), 0.1, blue.with_alpha(1.0));
        canvas.fill_circle(Point::new(2.5, 0.5), 0.1, red.with_alpha(1.0));
        canvas.fill_circle(Point::new(2.5, 1.5), 0.1, blue.with_alpha(1.0));

        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        HalfBlocks::new(&canvas).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "▀");
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(255, 0, 0));
        assert_eq!(buf[(0, 0)].bg, Color::Reset);

        assert_eq!(buf[(1, 0)].symbol(), "▄");
        assert_eq!(buf[(1, 0)].fg, Color::Rgb(0, 0, 255));

        assert_eq!(buf[(2, 0)].symbol(), "▀");
        assert_eq!(buf[(2, 0)].bg, Color::Rgb(0, 0, 255));

        // Beyond the canvas: untouched
        assert_eq!(buf[(3, 0)].symbol(), " ");
    }

    #[test]
    fn test_dim_pixels_composite_over_black() {
        let mut canvas = PixelCanvas::new(1, 2);
        canvas.fill_circle(Point::new(0.5, 0.5), 0.1, Rgb::new(200, 200, 200).with_alpha(0.5));
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        HalfBlocks::new(&canvas).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(100, 100, 100));
    }
}
