//! One-shot reveal of page sections as they scroll into view.

/// Fraction of an element that must be visible before it is revealed.
pub const REVEAL_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tracked {
    top: u32,
    height: u32,
    revealed: bool,
}

/// Watches element extents against a scrolling viewport.
///
/// Extents are in page rows. Once revealed, an element stays revealed.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealTracker {
    threshold: f32,
    elements: Vec<Tracked>,
}

impl Default for RevealTracker {
    fn default() -> Self {
        Self::new(REVEAL_THRESHOLD)
    }
}

impl RevealTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            elements: Vec::new(),
        }
    }

    /// Start observing an element. Returns its index.
    pub fn observe(&mut self, top: u32, height: u32) -> usize {
        self.elements.push(Tracked {
            top,
            height,
            revealed: false,
        });
        self.elements.len() - 1
    }

    /// Replace element extents after a relayout, keeping reveal state by index.
    pub fn relayout(&mut self, extents: &[(u32, u32)]) {
        self.elements.truncate(extents.len());
        for (i, &(top, height)) in extents.iter().enumerate() {
            match self.elements.get_mut(i) {
                Some(el) => {
                    el.top = top;
                    el.height = height;
                }
                None => {
                    self.observe(top, height);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.elements.get(index).is_some_and(|el| el.revealed)
    }

    pub fn revealed_count(&self) -> usize {
        self.elements.iter().filter(|el| el.revealed).count()
    }

    /// Check every element against the viewport rows
    /// `[viewport_top, viewport_top + viewport_height)` and return the indices
    /// revealed by this call.
    pub fn update(&mut self, viewport_top: u32, viewport_height: u32) -> Vec<usize> {
        let viewport_bottom = viewport_top.saturating_add(viewport_height);
        let threshold = self.threshold;
        let mut newly = Vec::new();
        for (i, el) in self.elements.iter_mut().enumerate() {
            if el.revealed {
                continue;
            }
            let bottom = el.top.saturating_add(el.height);
            let visible = if el.height == 0 {
                el.top >= viewport_top && el.top < viewport_bottom
            } else {
                let overlap = bottom.min(viewport_bottom).saturating_sub(el.top.max(viewport_top));
                overlap > 0 && overlap as f32 / el.height as f32 >= threshold
            };
            if visible {
                el.revealed = true;
                newly.push(i);
            }
        }
        newly
    }
}
