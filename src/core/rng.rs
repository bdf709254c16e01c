//! Deterministic random number generation for stimulus generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rounds
//! - **Context streams**: Independent sequences per game variant
//! - **Serializable**: O(1) state capture and restore for replaying a session
//!
//! ```
//! use rust_trials::core::TrialRng;
//!
//! let mut a = TrialRng::new(42);
//! let mut b = TrialRng::new(42);
//! assert_eq!(a.gen_range(0..10), b.gen_range(0..10));
//!
//! // Separate variants draw from separate streams
//! let mut digits = TrialRng::new(42).for_context("digit-span");
//! let mut dots = TrialRng::new(42).for_context("dot-counter");
//! let d: Vec<_> = (0..8).map(|_| digits.gen_range(0..1000)).collect();
//! let o: Vec<_> = (0..8).map(|_| dots.gen_range(0..1000)).collect();
//! assert_ne!(d, o);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Seedable random source injected into every stimulus source.
///
/// Uses ChaCha8 so a seed reproduces the same draws on every platform and
/// Rust release. Context streams are keyed with FxHash, which is fixed across
/// releases but depends on pointer width, so `for_context` streams match
/// only between targets of the same word size.
#[derive(Clone, Debug)]
pub struct TrialRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl TrialRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self::new(context_seed)
    }

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Random integer in a half-open range.
    pub fn gen_range(&mut self, range: std::ops::Range<u32>) -> u32 {
        self.inner.gen_range(range)
    }

    /// Random integer in an inclusive range.
    pub fn gen_inclusive(&mut self, range: std::ops::RangeInclusive<u32>) -> u32 {
        self.inner.gen_range(range)
    }

    /// Random signed integer in a half-open range.
    pub fn gen_range_i64(&mut self, range: std::ops::Range<i64>) -> i64 {
        self.inner.gen_range(range)
    }

    /// Random float in a half-open range.
    pub fn gen_range_f64(&mut self, range: std::ops::Range<f64>) -> f64 {
        self.inner.gen_range(range)
    }

    /// Random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> TrialRngState {
        TrialRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &TrialRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state.
///
/// Uses the ChaCha8 word position, so capture is O(1) regardless of how many
/// numbers have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
