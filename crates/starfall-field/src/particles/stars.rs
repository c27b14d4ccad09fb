//! Background stars (stateful).

use rand::Rng;
use starfall_core::{Point, Variant};

use crate::color::{ColorStop, Rgb, Rgba};
use crate::constants::{
    DEPTH_AREA_PER_STAR, DEPTH_MAX_SIZE, DEPTH_MAX_STARS, DEPTH_MIN_STARS, DEPTH_SPEED,
    DRIFT_BASE, DRIFT_DEPTH, DRIFT_SCALE, FLAT_AREA_PER_STAR, FLAT_MAX_STARS, FLAT_MIN_STARS,
    GLOW_CLIP_SCALE, GLOW_GRADIENT_SCALE, MIN_ALPHA, STAR_ALPHA_MAX, STAR_ALPHA_MIN,
    STAR_PALETTE, STAR_SIZE_DEPTH_EXPONENT, STAR_SIZE_MAX, STAR_SIZE_MIN, SWAY_AMPLITUDE,
    SWAY_SPEED, TWINKLE_AMPLITUDE, TWINKLE_SPEED_MAX, TWINKLE_SPEED_MIN, WRAP_MARGIN,
};
use crate::parallax::{self, PointerState};
use crate::surface::{Canvas, Surface};

/// State for a single background star.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundStar {
    /// Index within the generated set. Also offsets the twinkle phase.
    pub id: usize,
    /// Position in logical surface coordinates.
    pub x: f32,
    pub y: f32,
    /// Flat field: closeness in 0.0-1.0 (1.0 = near).
    /// Depth field: distance from the viewer in (0, surface width].
    pub depth: f32,
    /// Base radius.
    pub size: f32,
    /// Opacity, kept within [`MIN_ALPHA`, 1.0].
    pub alpha: f32,
    pub color: Rgb,
    /// Twinkle angular speed in radians per millisecond.
    pub twinkle_speed: f32,
    /// Position after perspective projection. Equals `(x, y)` for flat stars.
    pub projected: Point,
    /// Radius after perspective projection.
    pub projected_size: f32,
    /// Pointer offset computed by the last simulation step.
    pub offset: Point,
}

impl BackgroundStar {
    /// Where the star is drawn.
    pub fn screen_position(&self) -> Point {
        Point::new(
            self.projected.x + self.offset.x,
            self.projected.y + self.offset.y,
        )
    }

    /// Closeness of a depth star to the viewer, 0.0 at the far plane.
    fn nearness(&self, surface: &Surface) -> f32 {
        (1.0 - self.depth / surface.width()).clamp(0.0, 1.0)
    }
}

/// Number of stars for a surface: one per unit of area, within the variant's bounds.
pub fn star_count(variant: Variant, width: f32, height: f32) -> usize {
    let (area_per_star, min, max) = match variant {
        Variant::Flat => (FLAT_AREA_PER_STAR, FLAT_MIN_STARS, FLAT_MAX_STARS),
        Variant::Depth => (DEPTH_AREA_PER_STAR, DEPTH_MIN_STARS, DEPTH_MAX_STARS),
    };
    let area = width.max(1.0) * height.max(1.0);
    let estimate = (area / area_per_star).floor();
    // Saturating float-to-int cast keeps huge areas at usize::MAX
    (estimate as usize).clamp(min, max)
}

/// Generate a fresh set of stars for the surface.
pub fn generate(variant: Variant, surface: &Surface, rng: &mut impl Rng) -> Vec<BackgroundStar> {
    let count = star_count(variant, surface.width(), surface.height());
    (0..count)
        .map(|id| match variant {
            Variant::Flat => flat_star(id, surface, rng),
            Variant::Depth => depth_star(id, surface, rng),
        })
        .collect()
}

fn flat_star(id: usize, surface: &Surface, rng: &mut impl Rng) -> BackgroundStar {
    let depth: f32 = rng.gen_range(0.0..1.0);
    let x = rng.gen_range(0.0..surface.width());
    let y = rng.gen_range(0.0..surface.height());
    let size = depth.powf(STAR_SIZE_DEPTH_EXPONENT) * rng.gen_range(STAR_SIZE_MIN..STAR_SIZE_MAX);
    BackgroundStar {
        id,
        x,
        y,
        depth,
        size,
        alpha: rng.gen_range(STAR_ALPHA_MIN..STAR_ALPHA_MAX),
        color: STAR_PALETTE[rng.gen_range(0..STAR_PALETTE.len())],
        twinkle_speed: rng.gen_range(TWINKLE_SPEED_MIN..TWINKLE_SPEED_MAX),
        projected: Point::new(x, y),
        projected_size: size,
        offset: Point::default(),
    }
}

fn depth_star(id: usize, surface: &Surface, rng: &mut impl Rng) -> BackgroundStar {
    let x = rng.gen_range(0.0..surface.width());
    let y = rng.gen_range(0.0..surface.height());
    // Distance in (0, width]; zero would put the star on the viewer
    let depth = surface.width() - rng.gen_range(0.0..surface.width());
    let mut star = BackgroundStar {
        id,
        x,
        y,
        depth,
        size: DEPTH_MAX_SIZE,
        alpha: rng.gen_range(STAR_ALPHA_MIN..STAR_ALPHA_MAX),
        color: STAR_PALETTE[rng.gen_range(0..STAR_PALETTE.len())],
        twinkle_speed: rng.gen_range(TWINKLE_SPEED_MIN..TWINKLE_SPEED_MAX),
        projected: Point::new(x, y),
        projected_size: 0.0,
        offset: Point::default(),
    };
    project(&mut star, surface);
    star
}

/// Perspective-project a depth star onto the surface.
pub fn project(star: &mut BackgroundStar, surface: &Surface) {
    let center = surface.center();
    let scale = surface.width() / star.depth.max(f32::EPSILON);
    star.projected = Point::new(
        (star.x - center.x) * scale + center.x,
        (star.y - center.y) * scale + center.y,
    );
    star.projected_size = star.nearness(surface) * star.size;
}

/// Advance the twinkle oscillation.
pub fn twinkle(star: &mut BackgroundStar, elapsed_ms: u64) {
    let phase = elapsed_ms as f64 * star.twinkle_speed as f64 + star.id as f64;
    star.alpha = (star.alpha + phase.sin() as f32 * TWINKLE_AMPLITUDE).clamp(MIN_ALPHA, 1.0);
}

/// Move a flat star by its closeness-scaled drift and wrap it at the edges.
fn drift(star: &mut BackgroundStar, surface: &Surface, elapsed_ms: u64) {
    star.y += (DRIFT_BASE + star.depth * DRIFT_DEPTH) * DRIFT_SCALE;
    if star.y > surface.height() + WRAP_MARGIN {
        star.y = -WRAP_MARGIN;
    }

    let sway_phase = (elapsed_ms as f64 + star.id as f64) * SWAY_SPEED as f64;
    star.x += sway_phase.sin() as f32 * SWAY_AMPLITUDE;
    if star.x > surface.width() + WRAP_MARGIN {
        star.x = -WRAP_MARGIN;
    }
    if star.x < -WRAP_MARGIN {
        star.x = surface.width() + WRAP_MARGIN;
    }

    star.projected = Point::new(star.x, star.y);
}

/// Move a depth star toward the viewer, recycling it to the far plane once it passes.
fn approach(star: &mut BackgroundStar, surface: &Surface) {
    star.depth -= DEPTH_SPEED;
    if star.depth <= 0.0 {
        star.depth = surface.width();
    }
    project(star, surface);
}

/// Update star positions and brightness for one frame.
pub fn update(stars: &mut [BackgroundStar], variant: Variant, surface: &Surface, elapsed_ms: u64) {
    for star in stars {
        twinkle(star, elapsed_ms);
        match variant {
            Variant::Flat => drift(star, surface, elapsed_ms),
            Variant::Depth => approach(star, surface),
        }
    }
}

/// Recompute every star's pointer offset.
pub fn apply_pointer(
    stars: &mut [BackgroundStar],
    variant: Variant,
    surface: &Surface,
    pointer: PointerState,
) {
    for star in stars {
        star.offset = match variant {
            Variant::Flat => parallax::flat_offset(star.depth, pointer, surface),
            Variant::Depth => parallax::attraction_offset(star.projected, pointer),
        };
    }
}

/// Draw the stars.
pub fn render(stars: &[BackgroundStar], variant: Variant, surface: &Surface, canvas: &mut impl Canvas) {
    for star in stars {
        let position = star.screen_position();
        match variant {
            Variant::Flat => {
                let stops = [
                    ColorStop::new(0.0, star.color.with_alpha(star.alpha)),
                    ColorStop::new(0.3, star.color.with_alpha(star.alpha * 0.7)),
                    ColorStop::new(1.0, Rgba::TRANSPARENT),
                ];
                canvas.fill_radial(
                    position,
                    star.size * GLOW_CLIP_SCALE,
                    star.size * GLOW_GRADIENT_SCALE,
                    &stops,
                );
            }
            Variant::Depth => {
                let alpha = star.alpha * star.nearness(surface);
                canvas.fill_circle(position, star.projected_size, star.color.with_alpha(alpha));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use starfall_core::Viewport;

    fn surface(w: f32, h: f32) -> Surface {
        Surface::from_viewport(Viewport::new(w, h, 1.0))
    }

    #[test]
    fn test_star_count_bounds() {
        assert_eq!(star_count(Variant::Flat, 1920.0, 1080.0), FLAT_MAX_STARS);
        assert_eq!(star_count(Variant::Flat, 10.0, 10.0), FLAT_MIN_STARS);
        assert_eq!(star_count(Variant::Flat, 0.0, 0.0), FLAT_MIN_STARS);
        // 500 x 500 / 2500 = 100
        assert_eq!(star_count(Variant::Flat, 500.0, 500.0), 100);
        assert_eq!(star_count(Variant::Depth, 1920.0, 1080.0), DEPTH_MAX_STARS);
        assert_eq!(star_count(Variant::Depth, 300.0, 200.0), DEPTH_MIN_STARS);
        assert_eq!(star_count(Variant::Flat, f32::MAX, f32::MAX), FLAT_MAX_STARS);
    }

    #[test]
    fn test_generate_flat_attributes() {
        let s = surface(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(1);
        let stars = generate(Variant::Flat, &s, &mut rng);
        assert_eq!(stars.len(), star_count(Variant::Flat, 800.0, 600.0));
        for (i, star) in stars.iter().enumerate() {
            assert_eq!(star.id, i);
            assert!((0.0..800.0).contains(&star.x));
            assert!((0.0..600.0).contains(&star.y));
            assert!((0.0..1.0).contains(&star.depth));
            assert!(star.size < STAR_SIZE_MAX);
            assert!((STAR_ALPHA_MIN..STAR_ALPHA_MAX).contains(&star.alpha));
            assert!(STAR_PALETTE.contains(&star.color));
        }
    }

    #[test]
    fn test_generate_depth_in_range() {
        let s = surface(400.0, 300.0);
        let mut rng = StdRng::seed_from_u64(2);
        for star in generate(Variant::Depth, &s, &mut rng) {
            assert!(star.depth > 0.0 && star.depth <= 400.0);
        }
    }

    #[test]
    fn test_projection_at_far_plane_is_identity() {
        let s = surface(400.0, 300.0);
        let mut star = depth_star(0, &s, &mut StdRng::seed_from_u64(3));
        star.depth = 400.0;
        project(&mut star, &s);
        assert!((star.projected.x - star.x).abs() < 1e-3);
        assert!((star.projected.y - star.y).abs() < 1e-3);
        assert_eq!(star.projected_size, 0.0);

        // Halfway in, offsets from the center double
        star.depth = 200.0;
        project(&mut star, &s);
        let expected = (star.x - 200.0) * 2.0 + 200.0;
        assert!((star.projected.x - expected).abs() < 1e-3);
        assert!((star.projected_size - DEPTH_MAX_SIZE / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_depth_recycles_to_far_plane() {
        let s = surface(400.0, 300.0);
        let mut stars = generate(Variant::Depth, &s, &mut StdRng::seed_from_u64(4));
        stars[0].depth = 0.5;
        update(&mut stars, Variant::Depth, &s, 16);
        assert_eq!(stars[0].depth, 400.0);
    }

    #[test]
    fn test_flat_drift_wraps() {
        let s = surface(100.0, 100.0);
        let mut stars = generate(Variant::Flat, &s, &mut StdRng::seed_from_u64(5));
        stars[0].y = 100.0 + WRAP_MARGIN;
        stars[1].x = 100.0 + WRAP_MARGIN + 0.5;
        stars[2].x = -WRAP_MARGIN - 0.5;
        update(&mut stars, Variant::Flat, &s, 0);
        assert_eq!(stars[0].y, -WRAP_MARGIN);
        assert_eq!(stars[1].x, -WRAP_MARGIN);
        assert_eq!(stars[2].x, 100.0 + WRAP_MARGIN);
    }

    #[test]
    fn test_nearer_flat_stars_fall_faster() {
        let s = surface(1000.0, 1000.0);
        let mut stars = generate(Variant::Flat, &s, &mut StdRng::seed_from_u64(6));
        stars.truncate(2);
        stars[0].depth = 0.1;
        stars[1].depth = 0.9;
        stars[0].y = 100.0;
        stars[1].y = 100.0;
        update(&mut stars, Variant::Flat, &s, 0);
        assert!(stars[1].y - 100.0 > stars[0].y - 100.0);
    }

    #[test]
    fn test_twinkle_clamps_alpha() {
        let s = surface(100.0, 100.0);
        let mut star = flat_star(0, &s, &mut StdRng::seed_from_u64(7));
        star.alpha = MIN_ALPHA;
        star.twinkle_speed = 0.0;
        // With no speed the phase is the id: sin(4) < 0 dims, sin(1) > 0 brightens
        star.id = 4;
        for _ in 0..1000 {
            twinkle(&mut star, 0);
        }
        assert!(star.alpha >= MIN_ALPHA);
        star.alpha = 1.0;
        star.id = 1;
        for _ in 0..1000 {
            twinkle(&mut star, 0);
        }
        assert!(star.alpha <= 1.0);
    }
}
