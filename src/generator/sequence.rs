//! Symbol sequences for the span games.

use crate::core::{Stimulus, Symbols, TrialRng};

use super::StimulusSource;

/// `difficulty` symbols drawn uniformly from `0..alphabet`.
///
/// Repeats are allowed, as in a classic digit span.
#[derive(Clone, Copy, Debug)]
pub struct SequenceSource {
    alphabet: u8,
}

impl SequenceSource {
    #[must_use]
    pub const fn new(alphabet: u8) -> Self {
        Self { alphabet }
    }
}

impl StimulusSource for SequenceSource {
    fn stimulus(&self, difficulty: u32, rng: &mut TrialRng) -> Stimulus {
        let symbols: Symbols = (0..difficulty)
            .map(|_| rng.gen_range(0..u32::from(self.alphabet)) as u8)
            .collect();

        Stimulus::Sequence {
            symbols,
            alphabet: self.alphabet,
        }
    }
}
