//! Scalar randomizers for the graph-populate framework.
//!
//! A [`Randomizer`] produces one random [`Value`] on demand. The population
//! engine owns a registry of randomizers and calls them for every leaf of the
//! object graph, always passing the run's seeded RNG so that the same seed
//! reproduces the same tree.
//!
//! # Randomizers
//!
//! - [`numeric`] - integers, floats, decimals and booleans
//! - [`text`] - characters, strings and bytes restricted to a [`Charset`]
//! - [`temporal`] - dates, times, timestamps and durations
//! - [`identifier`] - UUID v4 and ULID
//! - [`pattern`] - pattern strings with `{uuid}` and `{rand:N}` placeholders
//! - [`static_value`] - static values, one-of pools, sampled arrays, null
//! - [`optional`] - presence-probability wrapper around another randomizer
//!
//! Any closure `Fn(&mut dyn RngCore) -> Value + Send + Sync` is also a
//! randomizer:
//!
//! ```rust
//! use populate_core::Value;
//! use populate_randomizers::Randomizer;
//! use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
//!
//! let dice = |rng: &mut dyn RngCore| Value::Int32(rng.gen_range(1..=6));
//! let mut rng = StdRng::seed_from_u64(42);
//! let roll = dice.generate(&mut rng).as_i64().unwrap();
//! assert!((1..=6).contains(&roll));
//! ```

pub mod config;
pub mod defaults;
pub mod identifier;
pub mod numeric;
pub mod optional;
pub mod pattern;
pub mod static_value;
pub mod temporal;
pub mod text;

use populate_core::Value;
use rand::RngCore;
use std::sync::Arc;

// Re-exports for convenience
pub use config::{config_problem, from_config};
pub use defaults::{default_randomizer, RandomizerSettings};
pub use optional::{OptionalPercent, OptionalRandomizer};
pub use text::Charset;

/// Capability that produces random values of one type.
///
/// Implementations must draw all randomness from the `rng` argument; holding
/// a private random source breaks seeded reproducibility.
pub trait Randomizer: Send + Sync {
    /// Generate a value using the given RNG.
    fn generate(&self, rng: &mut dyn RngCore) -> Value;
}

impl<F> Randomizer for F
where
    F: Fn(&mut dyn RngCore) -> Value + Send + Sync,
{
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        self(rng)
    }
}

/// Shared, thread-safe randomizer handle as stored by registries.
pub type SharedRandomizer = Arc<dyn Randomizer>;
