//! Tuning constants for the starfield.
//!
//! Distances and sizes are in logical surface units. Rates are per frame
//! unless the name says otherwise.

use crate::color::Rgb;

// ── Star count ───────────────────────────────────────────────────────────────

/// Surface area covered by one flat-field star. Lower means a denser sky.
pub const FLAT_AREA_PER_STAR: f32 = 2500.0;

/// Fewest stars the flat field generates, however small the surface.
pub const FLAT_MIN_STARS: usize = 80;

/// Most stars the flat field generates, however large the surface.
pub const FLAT_MAX_STARS: usize = 160;

/// Surface area covered by one depth-field star.
pub const DEPTH_AREA_PER_STAR: f32 = 1200.0;

/// Fewest stars the depth field generates.
pub const DEPTH_MIN_STARS: usize = 150;

/// Most stars the depth field generates.
pub const DEPTH_MAX_STARS: usize = 400;

// ── Palette ──────────────────────────────────────────────────────────────────

/// Star colors: white, warm and cool.
pub const STAR_PALETTE: [Rgb; 3] = [
    Rgb::new(0xff, 0xff, 0xff),
    Rgb::new(0xff, 0xe9, 0xc4),
    Rgb::new(0xd4, 0xfb, 0xff),
];

/// Opaque backdrop painted by the depth field each frame.
pub const DEPTH_BACKDROP: Rgb = Rgb::new(0x02, 0x02, 0x04);

/// Head color of a shooting star.
pub const SHOOTING_HEAD_COLOR: Rgb = Rgb::new(255, 255, 255);

/// Color of the tail end of a shooting star's streak.
pub const SHOOTING_TAIL_COLOR: Rgb = Rgb::new(255, 200, 150);

// ── Background stars ─────────────────────────────────────────────────────────

/// Lower bound of star opacity. Twinkle never dims a star below this.
pub const MIN_ALPHA: f32 = 0.05;

/// Initial opacity range of a flat star.
pub const STAR_ALPHA_MIN: f32 = 0.2;
pub const STAR_ALPHA_MAX: f32 = 0.98;

/// Base radius range of a flat star before depth scaling.
pub const STAR_SIZE_MIN: f32 = 0.5;
pub const STAR_SIZE_MAX: f32 = 1.8;

/// Exponent applied to closeness when sizing flat stars.
/// Below 1.0 keeps distant stars from vanishing.
pub const STAR_SIZE_DEPTH_EXPONENT: f32 = 0.6;

/// Twinkle angular speed range (radians per millisecond).
pub const TWINKLE_SPEED_MIN: f32 = 0.002;
pub const TWINKLE_SPEED_MAX: f32 = 0.01;

/// Alpha change per frame at the peak of the twinkle oscillation.
pub const TWINKLE_AMPLITUDE: f32 = 0.002;

/// Vertical drift of a flat star: `(DRIFT_BASE + closeness * DRIFT_DEPTH) * DRIFT_SCALE`.
/// Nearer stars fall faster.
pub const DRIFT_BASE: f32 = 0.02;
pub const DRIFT_DEPTH: f32 = 0.4;
pub const DRIFT_SCALE: f32 = 0.25;

/// Amplitude and angular speed (radians per millisecond) of the horizontal sway.
pub const SWAY_AMPLITUDE: f32 = 0.15;
pub const SWAY_SPEED: f32 = 0.0008;

/// Distance a flat star may travel past an edge before it wraps around.
pub const WRAP_MARGIN: f32 = 10.0;

/// Radius of the soft glow relative to star size, and the clip radius.
pub const GLOW_GRADIENT_SCALE: f32 = 8.0;
pub const GLOW_CLIP_SCALE: f32 = 2.0;

// ── Depth field ──────────────────────────────────────────────────────────────

/// Distance travelled toward the viewer per frame.
pub const DEPTH_SPEED: f32 = 0.8;

/// Projected radius of a star at the viewer.
pub const DEPTH_MAX_SIZE: f32 = 3.0;

// ── Pointer ──────────────────────────────────────────────────────────────────

/// Largest horizontal parallax shift of the most distant flat star.
pub const PARALLAX_X: f32 = 20.0;

/// Largest vertical parallax shift of the most distant flat star.
pub const PARALLAX_Y: f32 = 12.0;

/// Depth stars closer than this to the pointer are pulled toward it.
pub const ATTRACTION_RADIUS: f32 = 200.0;

/// Fraction of the distance to the pointer an attracted star moves.
pub const ATTRACTION_STRENGTH: f32 = 0.05;

// ── Shooting stars ───────────────────────────────────────────────────────────

/// Chance per frame that a new shooting star appears.
pub const SHOOTING_SPAWN_PROBABILITY: f64 = 0.0025;

/// Hard cap on live shooting stars.
pub const MAX_SHOOTING_STARS: usize = 4;

/// Speed range (units per frame).
pub const SHOOTING_SPEED_MIN: f32 = 6.0;
pub const SHOOTING_SPEED_MAX: f32 = 12.0;

/// Horizontal and vertical velocity multipliers. Streaks head right and down.
pub const SHOOTING_VX_MIN: f32 = 0.8;
pub const SHOOTING_VX_MAX: f32 = 1.2;
pub const SHOOTING_VY_MIN: f32 = 0.2;
pub const SHOOTING_VY_MAX: f32 = 0.7;

/// Spawn region as fractions of the surface, biased to the upper left.
pub const SHOOTING_SPAWN_X: (f32, f32) = (-0.3, 0.6);
pub const SHOOTING_SPAWN_Y: (f32, f32) = (-0.2, 0.4);

/// Trail length range.
pub const TRAIL_LENGTH_MIN: f32 = 150.0;
pub const TRAIL_LENGTH_MAX: f32 = 300.0;

/// Fraction of the trail length drawn as the visible streak.
pub const TRAIL_DRAW_SCALE: f32 = 0.12;

/// Lifetime range in frames.
pub const SHOOTING_TTL_MIN: f32 = 40.0;
pub const SHOOTING_TTL_MAX: f32 = 90.0;

/// Opacity at spawn and the multiplicative fade per frame.
pub const SHOOTING_START_ALPHA: f32 = 0.9;
pub const SHOOTING_FADE: f32 = 0.995;

/// Stroke width of the streak and radius of the head.
pub const SHOOTING_LINE_WIDTH: f32 = 2.2;
pub const SHOOTING_HEAD_RADIUS: f32 = 2.6;

// ── Driver ───────────────────────────────────────────────────────────────────

/// Lookup key of the surface the starfield mounts on.
pub const SPACE_CANVAS: &str = "space-canvas";

/// Default target frame rate.
pub const DEFAULT_FPS: u32 = 60;
