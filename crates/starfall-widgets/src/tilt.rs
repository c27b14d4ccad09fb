//! Card whose content follows the pointer.

use ratatui::layout::Rect;
use starfall_core::Point;

/// Pointer offset from the card center is divided by this before it moves the content.
pub const TILT_DIVISOR: f32 = 12.0;

/// Duration of the ease back to rest after the pointer leaves.
pub const RESET_DURATION_MS: u64 = 400;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Release {
    from: Point,
    at_ms: u64,
}

/// Tracks the content offset of a card under the pointer.
///
/// Coordinates are terminal cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TiltCard {
    bounds: Rect,
    offset: Point,
    release: Option<Release>,
}

impl TiltCard {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn contains(&self, p: Point) -> bool {
        let b = self.bounds;
        p.x >= b.x as f32
            && p.y >= b.y as f32
            && p.x < (b.x + b.width) as f32
            && p.y < (b.y + b.height) as f32
    }

    /// Follow the pointer while it is over the card; leaving starts the reset.
    pub fn on_pointer_move(&mut self, p: Point, now_ms: u64) {
        if !self.contains(p) {
            self.on_pointer_leave(now_ms);
            return;
        }
        let b = self.bounds;
        self.offset = Point::new(
            ((p.x - b.x as f32) - b.width as f32 / 2.0) / TILT_DIVISOR,
            ((p.y - b.y as f32) - b.height as f32 / 2.0) / TILT_DIVISOR,
        );
        self.release = None;
    }

    /// Start easing the content back to rest.
    pub fn on_pointer_leave(&mut self, now_ms: u64) {
        if self.release.is_some() || self.offset == Point::default() {
            return;
        }
        self.release = Some(Release {
            from: self.offset,
            at_ms: now_ms,
        });
        self.offset = Point::default();
    }

    /// Content offset at `now_ms`.
    pub fn offset(&self, now_ms: u64) -> Point {
        let Some(release) = self.release else {
            return self.offset;
        };
        let t = (now_ms.saturating_sub(release.at_ms) as f32 / RESET_DURATION_MS as f32).min(1.0);
        // Ease-out cubic
        let remaining = (1.0 - t).powi(3);
        Point::new(release.from.x * remaining, release.from.y * remaining)
    }

    /// Whether the content is still easing back.
    pub fn is_settling(&self, now_ms: u64) -> bool {
        self.release
            .is_some_and(|r| now_ms.saturating_sub(r.at_ms) < RESET_DURATION_MS)
    }

    /// Inner content area shifted by the current offset, rounded to whole cells.
    pub fn content_area(&self, inner: Rect, now_ms: u64) -> Rect {
        let offset = self.offset(now_ms);
        let shift = |base: u16, delta: f32| (base as f32 + delta.round()).max(0.0) as u16;
        Rect {
            x: shift(inner.x, offset.x),
            y: shift(inner.y, offset.y),
            ..inner
        }
    }
}
