//! Round generation.
//!
//! A `StimulusSource` turns a difficulty and a random stream into a
//! stimulus. `RoundGenerator` wraps one source, enforces the variant's
//! difficulty range and stamps each stimulus with a fresh `RoundId`.
//!
//! Sources are pure given the injected `TrialRng`: the same seed and the
//! same difficulty always produce the same round.

mod choice;
mod dots;
mod sequence;

pub use choice::{
    ColorInterferenceSource, FractionSource, GridProductSource, DEFAULT_DENOMINATORS, OPTION_COUNT,
};
pub use dots::DotFieldSource;
pub use sequence::SequenceSource;

use tracing::trace;

use crate::core::{DifficultyRange, Millis, Round, RoundId, SourceSpec, Stimulus, TrialRng};
use crate::error::{TrialError, TrialResult};

/// Produces stimuli for one kind of round.
pub trait StimulusSource: Send + Sync {
    /// Build a stimulus for `difficulty`.
    ///
    /// The difficulty has already been range-checked by `RoundGenerator`.
    fn stimulus(&self, difficulty: u32, rng: &mut TrialRng) -> Stimulus;
}

/// Build the source described by `spec`.
#[must_use]
pub fn source_for(spec: &SourceSpec) -> Box<dyn StimulusSource> {
    match spec {
        SourceSpec::Sequence { alphabet } => Box::new(SequenceSource::new(*alphabet)),
        SourceSpec::DotField {
            min_count,
            max_count,
            min_distance,
            max_attempts,
        } => Box::new(DotFieldSource {
            min_count: *min_count,
            max_count: *max_count,
            min_distance: *min_distance,
            max_attempts: *max_attempts,
        }),
        SourceSpec::Fraction { denominators } => {
            Box::new(FractionSource::new(denominators.clone()))
        }
        SourceSpec::GridProduct => Box::new(GridProductSource),
        SourceSpec::ColorInterference => Box::new(ColorInterferenceSource),
    }
}

/// Range-checked, id-stamping wrapper around a stimulus source.
pub struct RoundGenerator {
    variant: String,
    range: DifficultyRange,
    source: Box<dyn StimulusSource>,
    next_id: RoundId,
}

impl RoundGenerator {
    /// Create a generator. Round ids start at 1.
    pub fn new(variant: impl Into<String>, range: DifficultyRange, source: Box<dyn StimulusSource>) -> Self {
        Self {
            variant: variant.into(),
            range,
            source,
            next_id: RoundId::new(1),
        }
    }

    /// Generator for a source spec.
    pub fn from_spec(variant: impl Into<String>, range: DifficultyRange, spec: &SourceSpec) -> Self {
        Self::new(variant, range, source_for(spec))
    }

    /// Generate the next round.
    ///
    /// Fails with `TrialError::Configuration` if `difficulty` is outside the
    /// supported range; the id counter only advances on success.
    pub fn generate(
        &mut self,
        difficulty: u32,
        rng: &mut TrialRng,
        now: Millis,
    ) -> TrialResult<Round> {
        if !self.range.contains(difficulty) {
            return Err(TrialError::configuration(
                &self.variant,
                format!(
                    "difficulty {difficulty} outside [{}, {}]",
                    self.range.min, self.range.max
                ),
            ));
        }

        let id = self.next_id;
        let stimulus = self.source.stimulus(difficulty, rng);
        self.next_id = id.next();
        trace!(variant = %self.variant, %id, difficulty, kind = stimulus.kind(), "generated round");

        Ok(Round {
            id,
            difficulty,
            stimulus,
            created_at: now,
        })
    }

    /// Id the next successful `generate` will use.
    #[must_use]
    pub fn peek_id(&self) -> RoundId {
        self.next_id
    }

    /// Restart id allocation at 1.
    pub fn reset(&mut self) {
        self.next_id = RoundId::new(1);
    }

    #[must_use]
    pub fn range(&self) -> DifficultyRange {
        self.range
    }
}

impl std::fmt::Debug for RoundGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundGenerator")
            .field("variant", &self.variant)
            .field("range", &self.range)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}
