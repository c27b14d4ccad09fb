//! Particle records and the free functions that generate, step and draw them.

pub mod shooting;
pub mod stars;
