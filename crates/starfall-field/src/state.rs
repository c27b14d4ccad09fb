//! Starfield renderer state.

use rand::{SeedableRng, rngs::StdRng};
use starfall_core::{Variant, Viewport};

use crate::constants::{DEPTH_BACKDROP, SHOOTING_SPAWN_PROBABILITY};
use crate::parallax::PointerState;
use crate::particles::shooting::{self, ShootingStar};
use crate::particles::stars::{self, BackgroundStar};
use crate::surface::{Canvas, Surface};

/// Starfield state: surface, particles and pointer.
#[derive(Debug)]
pub struct Starfield {
    /// Generation and update policy.
    variant: Variant,
    /// Current drawing surface.
    surface: Surface,
    /// Background stars, regenerated on resize.
    stars: Vec<BackgroundStar>,
    /// Live shooting stars.
    shooting: Vec<ShootingStar>,
    /// Pointer reference for parallax and attraction.
    pointer: PointerState,
    /// Chance per frame of a new shooting star.
    spawn_probability: f64,
    /// Source of all randomness, seeded at construction.
    rng: StdRng,
    /// Simulation steps since construction.
    ticks: u64,
}

impl Starfield {
    /// Create an empty starfield. Call [`Starfield::resize`] before drawing.
    pub fn new(variant: Variant, seed: u64) -> Self {
        Self {
            variant,
            surface: Surface::default(),
            stars: Vec::new(),
            shooting: Vec::new(),
            pointer: PointerState::Neutral,
            spawn_probability: SHOOTING_SPAWN_PROBABILITY,
            rng: StdRng::seed_from_u64(seed),
            ticks: 0,
        }
    }

    /// Override the shooting star spawn chance.
    pub fn with_spawn_probability(mut self, probability: f64) -> Self {
        self.set_spawn_probability(probability);
        self
    }

    pub fn set_spawn_probability(&mut self, probability: f64) {
        self.spawn_probability = probability.clamp(0.0, 1.0);
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn stars(&self) -> &[BackgroundStar] {
        &self.stars
    }

    pub fn shooting_stars(&self) -> &[ShootingStar] {
        &self.shooting
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Rebuild the surface for a new viewport and regenerate every star.
    pub fn resize(&mut self, viewport: Viewport, canvas: &mut impl Canvas) {
        self.surface = Surface::from_viewport(viewport);
        let (backing_w, backing_h) = self.surface.backing_size();
        canvas.resize(backing_w, backing_h);
        canvas.set_transform(self.surface.pixel_ratio());

        self.stars = stars::generate(self.variant, &self.surface, &mut self.rng);
        self.shooting.clear();
        stars::apply_pointer(&mut self.stars, self.variant, &self.surface, self.pointer);

        log::debug!(
            "starfield resized to {}x{} @{}: {} {} stars",
            self.surface.width(),
            self.surface.height(),
            self.surface.pixel_ratio(),
            self.stars.len(),
            self.variant.name(),
        );
    }

    /// Switch the generation policy, regenerating stars for the current surface.
    pub fn set_variant(&mut self, variant: Variant, canvas: &mut impl Canvas) {
        self.variant = variant;
        let viewport = Viewport::new(
            self.surface.width(),
            self.surface.height(),
            self.surface.pixel_ratio(),
        );
        self.resize(viewport, canvas);
    }

    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.pointer = pointer;
    }

    /// Advance the animation by one frame.
    pub fn simulate(&mut self, elapsed_ms: u64) {
        stars::update(&mut self.stars, self.variant, &self.surface, elapsed_ms);

        shooting::update(&mut self.shooting);
        if shooting::should_spawn(self.shooting.len(), self.spawn_probability, &mut self.rng) {
            let star = shooting::spawn(&self.surface, &mut self.rng);
            log::trace!("shooting star at ({:.0}, {:.0})", star.x, star.y);
            self.shooting.push(star);
        }

        stars::apply_pointer(&mut self.stars, self.variant, &self.surface, self.pointer);
        self.ticks += 1;
    }

    /// Repaint the canvas: background stars first, shooting stars on top.
    pub fn render(&self, canvas: &mut impl Canvas) {
        match self.variant {
            // Let the terminal background show through
            Variant::Flat => canvas.clear(),
            Variant::Depth => canvas.fill(DEPTH_BACKDROP.with_alpha(1.0)),
        }
        stars::render(&self.stars, self.variant, &self.surface, canvas);
        shooting::render(&self.shooting, canvas);
    }
}
