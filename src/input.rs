//! Input model: pointer coordinates, keyboard events, and held-key tracking.
//!
//! Raw DOM events are reduced to these plain types in [`crate::host`] so the
//! controller core can be driven from tests without a browser.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::ops::RangeInclusive;

/// Legacy `keyCode` range for the letters A–Z.
const LETTER_KEY_CODES: RangeInclusive<u32> = 65..=90;

/// A point in canvas-local CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate a client-space point into the space whose origin is `origin`.
    #[must_use]
    pub fn relative_to(self, origin: Point) -> Point {
        Point { x: self.x - origin.x, y: self.y - origin.y }
    }
}

/// A keyboard event as reported by the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// `KeyboardEvent.key` (e.g. `"a"`, `"Enter"`, `"ArrowLeft"`).
    pub key: String,
    /// `KeyboardEvent.keyCode`.
    pub key_code: u32,
    /// Shift held.
    pub shift: bool,
    /// Caps Lock active.
    pub caps_lock: bool,
}

impl KeyEvent {
    #[must_use]
    pub fn new(key: impl Into<String>, key_code: u32) -> Self {
        Self { key: key.into(), key_code, shift: false, caps_lock: false }
    }

    #[must_use]
    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    #[must_use]
    pub fn with_caps_lock(mut self, caps_lock: bool) -> Self {
        self.caps_lock = caps_lock;
        self
    }

    /// The key as the room should see it.
    ///
    /// Single-character letter keys are cased by `shift XOR caps_lock`; every
    /// other key is passed through untouched.
    #[must_use]
    pub fn normalized(&self) -> String {
        let single_char = self.key.chars().count() == 1;
        if !single_char || !LETTER_KEY_CODES.contains(&self.key_code) {
            return self.key.clone();
        }
        if self.shift ^ self.caps_lock {
            self.key.to_uppercase()
        } else {
            self.key.to_lowercase()
        }
    }
}

/// Raw keys currently held, in press order, without duplicates.
#[derive(Debug, Clone, Default)]
pub struct KeysPressed {
    keys: Vec<String>,
}

impl KeysPressed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Record `key` as held. Returns `false` if it was already held.
    pub fn press(&mut self, key: &str) -> bool {
        if self.contains(key) {
            return false;
        }
        self.keys.push(key.to_owned());
        true
    }

    /// Forget `key`. Releasing a key that is not held is a no-op.
    pub fn release(&mut self, key: &str) {
        self.keys.retain(|k| k != key);
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
