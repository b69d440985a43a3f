//! Presence probability for optional values.

use crate::{Randomizer, SharedRandomizer};
use populate_core::Value;
use rand::{Rng, RngCore};

/// Probability, in percent, that an optional value is present.
///
/// Out-of-range inputs are clamped to `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionalPercent(u8);

impl OptionalPercent {
    /// Always present.
    pub const ALWAYS: Self = Self(100);

    /// Never present.
    pub const NEVER: Self = Self(0);

    /// Create a new percentage, clamping to `0..=100`.
    pub fn new(percent: i32) -> Self {
        Self(percent.clamp(0, 100) as u8)
    }

    /// The clamped percentage.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Draw once and decide whether the value is present.
    ///
    /// Draws a number in `1..=100` and admits it when it does not exceed
    /// the percentage, so 0 never admits and 100 always does.
    pub fn admits<R: Rng + ?Sized>(self, rng: &mut R) -> bool {
        rng.gen_range(1..=100u8) <= self.0
    }
}

impl Default for OptionalPercent {
    fn default() -> Self {
        Self::ALWAYS
    }
}

impl From<i32> for OptionalPercent {
    fn from(percent: i32) -> Self {
        Self::new(percent)
    }
}

/// Wraps another randomizer and yields the absent value unless the
/// presence draw succeeds.
#[derive(Clone)]
pub struct OptionalRandomizer {
    inner: SharedRandomizer,
    percent: OptionalPercent,
}

impl OptionalRandomizer {
    /// Create a new optional wrapper.
    pub fn new(inner: SharedRandomizer, percent: impl Into<OptionalPercent>) -> Self {
        Self {
            inner,
            percent: percent.into(),
        }
    }
}

impl std::fmt::Debug for OptionalRandomizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionalRandomizer")
            .field("percent", &self.percent)
            .finish_non_exhaustive()
    }
}

impl Randomizer for OptionalRandomizer {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        if self.percent.admits(rng) {
            self.inner.generate(rng)
        } else {
            Value::Null
        }
    }
}
