//! Typewriter text rotation.

use std::time::Duration;

/// Delay after typing a character.
pub const TYPE_DELAY: Duration = Duration::from_millis(100);

/// Delay after deleting a character.
pub const DELETE_DELAY: Duration = Duration::from_millis(50);

/// Pause once a phrase is fully typed.
pub const HOLD_DELAY: Duration = Duration::from_millis(2000);

/// Pause after a phrase is fully deleted, before typing the next one.
pub const NEXT_PHRASE_DELAY: Duration = Duration::from_millis(500);

/// Types out each phrase one character at a time, deletes it, and moves on.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    /// Index of the phrase being typed.
    phrase: usize,
    /// Characters of the phrase currently shown.
    shown: usize,
    deleting: bool,
    /// When the next step is due, in milliseconds.
    next_step_ms: u64,
}

impl Typewriter {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases.into_iter().map(Into::into).collect(),
            phrase: 0,
            shown: 0,
            deleting: false,
            next_step_ms: 0,
        }
    }

    /// The visible part of the current phrase.
    pub fn text(&self) -> &str {
        let Some(phrase) = self.phrases.get(self.phrase) else {
            return "";
        };
        match phrase.char_indices().nth(self.shown) {
            Some((end, _)) => &phrase[..end],
            None => phrase,
        }
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Type or delete one character. Returns the delay before the next step.
    pub fn step(&mut self) -> Duration {
        let Some(phrase) = self.phrases.get(self.phrase) else {
            return HOLD_DELAY;
        };
        let len = phrase.chars().count();

        if self.deleting {
            self.shown = self.shown.saturating_sub(1);
        } else {
            self.shown = (self.shown + 1).min(len);
        }

        if !self.deleting && self.shown == len {
            self.deleting = true;
            HOLD_DELAY
        } else if self.deleting && self.shown == 0 {
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.phrases.len();
            NEXT_PHRASE_DELAY
        } else if self.deleting {
            DELETE_DELAY
        } else {
            TYPE_DELAY
        }
    }

    /// Step once if the next step is due. Returns whether the text changed.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        if now_ms < self.next_step_ms {
            return false;
        }
        let delay = self.step();
        self.next_step_ms = now_ms + delay.as_millis() as u64;
        true
    }

    /// Time until the next step is due.
    pub fn next_step_in(&self, now_ms: u64) -> Duration {
        Duration::from_millis(self.next_step_ms.saturating_sub(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_holds_deletes_and_rotates() {
        let mut tw = Typewriter::new(["ab", "c"]);
        assert_eq!(tw.text(), "");

        assert_eq!(tw.step(), TYPE_DELAY);
        assert_eq!(tw.text(), "a");
        assert_eq!(tw.step(), HOLD_DELAY);
        assert_eq!(tw.text(), "ab");
        assert!(tw.is_deleting());

        assert_eq!(tw.step(), DELETE_DELAY);
        assert_eq!(tw.text(), "a");
        assert_eq!(tw.step(), NEXT_PHRASE_DELAY);
        assert_eq!(tw.phrase_index(), 1);
        assert_eq!(tw.text(), "");

        assert_eq!(tw.step(), HOLD_DELAY);
        assert_eq!(tw.text(), "c");
        assert_eq!(tw.step(), NEXT_PHRASE_DELAY);
        // Wraps back to the first phrase
        assert_eq!(tw.phrase_index(), 0);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut tw = Typewriter::new(["héllo ✦"]);
        tw.step();
        tw.step();
        assert_eq!(tw.text(), "hé");
        for _ in 0..5 {
            tw.step();
        }
        assert_eq!(tw.text(), "héllo ✦");
    }

    #[test]
    fn test_empty_inputs_do_not_panic() {
        let mut none = Typewriter::new(Vec::<String>::new());
        assert_eq!(none.step(), HOLD_DELAY);
        assert_eq!(none.text(), "");

        let mut blank = Typewriter::new(["", "x"]);
        assert_eq!(blank.step(), HOLD_DELAY);
        assert_eq!(blank.step(), NEXT_PHRASE_DELAY);
        assert_eq!(blank.phrase_index(), 1);
    }

    #[test]
    fn test_advance_waits_for_delay() {
        let mut tw = Typewriter::new(["abc"]);
        assert!(tw.advance(0));
        assert_eq!(tw.text(), "a");
        assert!(!tw.advance(50));
        assert_eq!(tw.next_step_in(50), Duration::from_millis(50));
        assert!(tw.advance(100));
        assert_eq!(tw.text(), "ab");
    }
}
