//! Recall quality on the SM-2 0-5 scale.
use serde::{Deserialize, Serialize};

/// Recall quality, 0 = complete blackout, 5 = perfect response.
///
/// Out-of-range input is clamped into `0..=5` rather than rejected so the
/// scheduler stays total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 5;

    /// Builds a quality score, clamping anything outside `0..=5`.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Maps the app's correct/incorrect buttons onto the 0-5 scale.
    pub fn from_answer(correct: bool) -> Self {
        if correct { Self(4) } else { Self(2) }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// True when the score counts as a successful recall.
    pub fn is_pass(self, threshold: u8) -> bool {
        self.0 >= threshold
    }
}

impl From<u8> for Quality {
    fn from(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}
