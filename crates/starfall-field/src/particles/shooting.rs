//! Shooting stars (transient).

use rand::Rng;
use starfall_core::Point;

use crate::color::{ColorStop, Rgba};
use crate::constants::{
    MAX_SHOOTING_STARS, SHOOTING_FADE, SHOOTING_HEAD_COLOR, SHOOTING_HEAD_RADIUS,
    SHOOTING_LINE_WIDTH, SHOOTING_SPAWN_X, SHOOTING_SPAWN_Y, SHOOTING_SPEED_MAX,
    SHOOTING_SPEED_MIN, SHOOTING_START_ALPHA, SHOOTING_TAIL_COLOR, SHOOTING_TTL_MAX,
    SHOOTING_TTL_MIN, SHOOTING_VX_MAX, SHOOTING_VX_MIN, SHOOTING_VY_MAX, SHOOTING_VY_MIN,
    TRAIL_DRAW_SCALE, TRAIL_LENGTH_MAX, TRAIL_LENGTH_MIN,
};
use crate::surface::{Canvas, Surface};

/// State for a single shooting star.
#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStar {
    /// Head position.
    pub x: f32,
    pub y: f32,
    /// Velocity in units per frame.
    pub vx: f32,
    pub vy: f32,
    /// Trail length.
    pub trail: f32,
    /// Frames lived so far.
    pub life: u32,
    /// Frames to live.
    pub ttl: f32,
    pub alpha: f32,
}

impl ShootingStar {
    pub fn head(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_expired(&self) -> bool {
        self.life as f32 > self.ttl
    }

    /// End of the visible streak, behind the head along the reverse velocity.
    pub fn tail(&self) -> Point {
        let speed = (self.vx * self.vx + self.vy * self.vy).sqrt();
        if speed <= f32::EPSILON {
            return self.head();
        }
        let length = self.trail * TRAIL_DRAW_SCALE;
        Point::new(
            self.x - self.vx / speed * length,
            self.y - self.vy / speed * length,
        )
    }
}

/// Create a shooting star near the upper left, heading right and down.
pub fn spawn(surface: &Surface, rng: &mut impl Rng) -> ShootingStar {
    let (w, h) = (surface.width(), surface.height());
    let speed = rng.gen_range(SHOOTING_SPEED_MIN..SHOOTING_SPEED_MAX);
    ShootingStar {
        x: rng.gen_range(SHOOTING_SPAWN_X.0 * w..SHOOTING_SPAWN_X.1 * w),
        y: rng.gen_range(SHOOTING_SPAWN_Y.0 * h..SHOOTING_SPAWN_Y.1 * h),
        vx: speed * rng.gen_range(SHOOTING_VX_MIN..SHOOTING_VX_MAX),
        vy: speed * rng.gen_range(SHOOTING_VY_MIN..SHOOTING_VY_MAX),
        trail: rng.gen_range(TRAIL_LENGTH_MIN..TRAIL_LENGTH_MAX),
        life: 0,
        ttl: rng.gen_range(SHOOTING_TTL_MIN..SHOOTING_TTL_MAX),
        alpha: SHOOTING_START_ALPHA,
    }
}

/// Roll for a new shooting star. Never exceeds [`MAX_SHOOTING_STARS`].
pub fn should_spawn(live: usize, probability: f64, rng: &mut impl Rng) -> bool {
    live < MAX_SHOOTING_STARS && rng.gen_bool(probability.clamp(0.0, 1.0))
}

/// Advance every shooting star one frame and drop the expired ones.
pub fn update(stars: &mut Vec<ShootingStar>) {
    for star in stars.iter_mut() {
        star.x += star.vx;
        star.y += star.vy;
        star.life += 1;
        star.alpha *= SHOOTING_FADE;
    }
    stars.retain(|star| !star.is_expired());
}

/// Draw each streak and its head.
pub fn render(stars: &[ShootingStar], canvas: &mut impl Canvas) {
    for star in stars {
        let alpha = star.alpha.max(0.0);
        let stops = [
            ColorStop::new(0.0, SHOOTING_HEAD_COLOR.with_alpha(alpha)),
            ColorStop::new(0.8, SHOOTING_TAIL_COLOR.with_alpha(alpha * 0.6)),
            ColorStop::new(1.0, Rgba::TRANSPARENT),
        ];
        canvas.stroke_gradient(star.head(), star.tail(), SHOOTING_LINE_WIDTH, &stops);
        canvas.fill_circle(
            star.head(),
            SHOOTING_HEAD_RADIUS,
            SHOOTING_HEAD_COLOR.with_alpha(alpha),
        );
    }
}
