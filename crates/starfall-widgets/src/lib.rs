//! Small page effects drawn over the starfield: a typewriter headline, a
//! pointer-tilt card and one-shot reveal of sections scrolled into view.

mod reveal;
mod tilt;
mod typewriter;

pub use reveal::{REVEAL_THRESHOLD, RevealTracker};
pub use tilt::{RESET_DURATION_MS, TILT_DIVISOR, TiltCard};
pub use typewriter::{DELETE_DELAY, HOLD_DELAY, NEXT_PHRASE_DELAY, TYPE_DELAY, Typewriter};
