//! Animated starfield background for starfall.
//!
//! A [`Starfield`] owns the surface, background stars, shooting stars and the
//! pointer reference. Each frame it simulates then renders onto a [`Canvas`].
//! The [`Animator`] wraps it with start/stop control and a frame clock, and
//! [`HalfBlocks`] puts a [`PixelCanvas`] on a terminal.

mod blit;
mod canvas;
mod color;
pub mod constants;
mod driver;
mod parallax;
mod particles;
mod state;
mod surface;
#[cfg(test)]
mod test_support;

pub use blit::HalfBlocks;
pub use canvas::{Pixel, PixelCanvas};
pub use color::{ColorStop, Rgb, Rgba, hsl_to_rgb};
pub use driver::{Animator, FrameClock, Host, StartOutcome, SurfaceInfo};
pub use parallax::PointerState;
pub use particles::shooting::ShootingStar;
pub use particles::stars::{BackgroundStar, star_count};
pub use state::Starfield;
pub use surface::{Canvas, Surface};
