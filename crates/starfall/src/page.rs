//! Page content drawn over the starfield: the hero card and skill sections.
//!
//! The page is taller than the terminal. It is laid out in page rows, drawn
//! into its own buffer, then copied onto the frame at the scroll offset.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Paragraph, Widget},
};
use starfall_config::Section;
use starfall_field::{constants::STAR_PALETTE, hsl_to_rgb};
use starfall_widgets::TiltCard;

const MAX_WIDTH: u16 = 60;
const CARD_HEIGHT: u16 = 7;
const SECTION_GAP: u16 = 1;
/// Panel background; the starfield does not show through page elements.
const PANEL: Color = Color::Rgb(8, 8, 16);

/// Positions of the page elements, in page rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    pub card: Rect,
    pub sections: Vec<Rect>,
    /// Total page height.
    pub height: u16,
    pub viewport_height: u16,
}

impl PageLayout {
    /// Lay out the hero card centered in the first screen, with the sections
    /// stacked below it.
    pub fn compute(width: u16, viewport_height: u16, sections: &[Section]) -> Self {
        let content_width = if width > 4 {
            (width - 4).min(MAX_WIDTH)
        } else {
            width
        };
        let x = (width - content_width) / 2;
        let card_height = CARD_HEIGHT.min(viewport_height);
        let card = Rect::new(
            x,
            (viewport_height - card_height) / 2,
            content_width,
            card_height,
        );

        let mut top = viewport_height.max(card.bottom());
        let sections: Vec<Rect> = sections
            .iter()
            .map(|section| {
                let height = (section.items.len() as u16).saturating_add(2);
                let rect = Rect::new(x, top.saturating_add(SECTION_GAP), content_width, height);
                top = rect.bottom();
                rect
            })
            .collect();

        Self {
            card,
            sections,
            height: top.saturating_add(SECTION_GAP),
            viewport_height,
        }
    }

    pub fn max_scroll(&self) -> u16 {
        self.height.saturating_sub(self.viewport_height)
    }

    /// `(top, height)` of each section for reveal tracking.
    pub fn section_extents(&self) -> Vec<(u32, u32)> {
        self.sections
            .iter()
            .map(|r| (r.y as u32, r.height as u32))
            .collect()
    }
}

/// The part of a page rect visible at `scroll`, in screen coordinates.
pub fn on_screen(rect: Rect, scroll: u16, viewport: Rect) -> Option<Rect> {
    let top = rect.y.max(scroll);
    let bottom = rect.bottom().min(scroll.saturating_add(viewport.height));
    if top >= bottom || rect.width == 0 {
        return None;
    }
    Some(Rect::new(
        viewport.x + rect.x,
        viewport.y + (top - scroll),
        rect.width,
        bottom - top,
    ))
}

/// Hero card with the page title and the typed phrase.
pub fn render_card(
    buf: &mut Buffer,
    card: Rect,
    title: &str,
    typed: &str,
    tilt: &TiltCard,
    now_ms: u64,
) {
    let accent: Color = STAR_PALETTE[2].into();
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(accent))
        .style(Style::new().bg(PANEL));
    let inner = block.inner(card);
    block.render(card, buf);

    let lines = vec![
        Line::from(title.to_string()).bold().white(),
        Line::default(),
        Line::from(vec![typed.to_string().fg(accent), "▌".fg(accent)]),
        Line::default(),
        Line::from("scroll to explore").dark_gray(),
    ];
    let content = tilt.content_area(inner, now_ms).intersection(inner);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(content, buf);
}

/// A bordered section; each one gets its own hue.
pub fn render_section(buf: &mut Buffer, rect: Rect, section: &Section, index: usize) {
    let hue = (200.0 + index as f32 * 40.0) % 360.0;
    let color: Color = hsl_to_rgb(hue, 0.7, 0.7).into();
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(color))
        .style(Style::new().bg(PANEL))
        .title(Line::from(format!(" {} ", section.title)).bold().fg(color));
    let items: Vec<Line> = section
        .items
        .iter()
        .map(|item| Line::from(vec!["• ".fg(color), item.clone().white()]))
        .collect();
    Paragraph::new(items).block(block).render(rect, buf);
}

/// Copy the visible page rows onto `buf`. Blank cells are skipped so the
/// starfield underneath stays visible.
pub fn blit(page: &Buffer, scroll: u16, buf: &mut Buffer, area: Rect) {
    for row in 0..area.height {
        let y = scroll.saturating_add(row);
        if y >= page.area.bottom() {
            break;
        }
        for col in 0..area.width.min(page.area.width) {
            let Some(src) = page.cell((col, y)) else {
                continue;
            };
            if src.symbol() == " " && src.bg == Color::Reset {
                continue;
            }
            if let Some(dst) = buf.cell_mut((area.x + col, area.y + row)) {
                *dst = src.clone();
            }
        }
    }
}
