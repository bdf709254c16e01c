//! Per-variant configuration.
//!
//! A game variant is fully described by a `VariantConfig`:
//! - `DifficultyRange`: supported difficulty values and the starting value
//! - `SourceSpec`: which stimulus source generates rounds
//! - `PresentationMode`: how the stimulus is revealed
//! - `InputMode`: whole responses or symbol-by-symbol entry
//! - `EqualityPolicy` / `DifficultyPolicy`: how rounds are scored and adapted
//! - `FeedbackTimings` / `ResponseLimit`: the remaining phase durations
//!
//! The scheduler never hardcodes any of these; presets live in `games`.

use serde::{Deserialize, Serialize};

use crate::error::{TrialError, TrialResult};

use super::round::Millis;

/// Longest sequence a `Sequence` source may be asked for.
pub const MAX_SEQUENCE_LEN: u32 = 64;

/// Largest board side a `GridProduct` source may be asked for.
pub const MAX_GRID_SIZE: u32 = 100;

/// Supported difficulty values for a variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyRange {
    pub min: u32,
    pub max: u32,
    /// Difficulty of round 1.
    pub initial: u32,
}

impl DifficultyRange {
    #[must_use]
    pub const fn new(min: u32, max: u32, initial: u32) -> Self {
        Self { min, max, initial }
    }

    /// Range holding a single value.
    #[must_use]
    pub const fn fixed(value: u32) -> Self {
        Self::new(value, value, value)
    }

    #[must_use]
    pub fn contains(&self, difficulty: u32) -> bool {
        (self.min..=self.max).contains(&difficulty)
    }
}

/// Stimulus source and its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SourceSpec {
    /// `difficulty` symbols drawn uniformly from `0..alphabet`.
    Sequence { alphabet: u8 },
    /// Dot count drawn from `min_count..=max_count`, placed with a minimum
    /// spacing by bounded rejection sampling.
    DotField {
        min_count: u32,
        max_count: u32,
        min_distance: f64,
        max_attempts: u32,
    },
    /// Pie-chart fractions over the given denominators.
    Fraction { denominators: Vec<u32> },
    /// `rows × cols` products on a board of up to `difficulty` cells a side.
    GridProduct,
    /// Colour word in a mismatched ink; the answer is the ink.
    ColorInterference,
}

impl SourceSpec {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            SourceSpec::Sequence { .. } => "sequence",
            SourceSpec::DotField { .. } => "dot-field",
            SourceSpec::Fraction { .. } => "fraction",
            SourceSpec::GridProduct => "grid-product",
            SourceSpec::ColorInterference => "color-interference",
        }
    }
}

/// How the stimulus is revealed while `Presenting`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationMode {
    /// One symbol at a time: a blank lead-in, then `symbol_ms` visible and
    /// `gap_ms` blank per symbol.
    Sequential {
        lead_in_ms: Millis,
        symbol_ms: Millis,
        gap_ms: Millis,
    },
    /// Whole stimulus shown for `difficulty` milliseconds after a lead-in.
    Flash { lead_in_ms: Millis },
    /// No presentation phase; the stimulus stays visible while answering.
    Immediate,
}

impl PresentationMode {
    /// Whether the stimulus remains on screen during `AwaitingInput`.
    #[must_use]
    pub fn visible_while_answering(self) -> bool {
        matches!(self, PresentationMode::Immediate)
    }
}

/// How responses are entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    /// One complete response per round.
    Single,
    /// Symbols typed one at a time, bounded by the stimulus length.
    /// With `auto_submit` the round is evaluated as soon as the bound is hit.
    Incremental { auto_submit: bool },
}

/// Rule deciding whether a response is correct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EqualityPolicy {
    /// Same length and same symbol at every position.
    ExactSequence,
    /// Declared count equals the number of dots, no tolerance.
    ExactCount,
    /// Chosen option equals the target value.
    TargetOption,
}

/// Rule for moving difficulty between rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyPolicy {
    /// Size parameter: up on success, down on failure, clamped.
    Stepped {
        up: u32,
        down: u32,
        floor: u32,
        ceiling: u32,
    },
    /// Timing parameter: shortened on success, held on failure.
    Timed { step: u32, floor: u32 },
    /// No adaptation.
    Fixed,
}

/// How long the verdict stays on screen before the next round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackTimings {
    pub success_ms: Millis,
    pub failure_ms: Millis,
}

impl FeedbackTimings {
    #[must_use]
    pub const fn new(success_ms: Millis, failure_ms: Millis) -> Self {
        Self {
            success_ms,
            failure_ms,
        }
    }

    #[must_use]
    pub fn for_outcome(&self, correct: bool) -> Millis {
        if correct {
            self.success_ms
        } else {
            self.failure_ms
        }
    }
}

impl Default for FeedbackTimings {
    fn default() -> Self {
        Self::new(2_000, 3_000)
    }
}

/// Hard countdown on `AwaitingInput`. The budget is the round difficulty
/// in milliseconds; a snapshot is emitted every `tick_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseLimit {
    pub tick_ms: Millis,
}

/// Complete configuration of one game variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Human-readable name, also used to pick the RNG stream.
    pub name: String,
    pub difficulty: DifficultyRange,
    pub source: SourceSpec,
    pub presentation: PresentationMode,
    pub input: InputMode,
    pub equality: EqualityPolicy,
    pub adaptation: DifficultyPolicy,
    pub feedback: FeedbackTimings,
    pub response_limit: Option<ResponseLimit>,
}

impl VariantConfig {
    /// Create a configuration with single-shot input, immediate presentation
    /// and no adaptation. Use the builder methods to refine it.
    pub fn new(
        name: impl Into<String>,
        source: SourceSpec,
        equality: EqualityPolicy,
        difficulty: DifficultyRange,
    ) -> Self {
        Self {
            name: name.into(),
            difficulty,
            source,
            presentation: PresentationMode::Immediate,
            input: InputMode::Single,
            equality,
            adaptation: DifficultyPolicy::Fixed,
            feedback: FeedbackTimings::default(),
            response_limit: None,
        }
    }

    #[must_use]
    pub fn with_presentation(mut self, presentation: PresentationMode) -> Self {
        self.presentation = presentation;
        self
    }

    #[must_use]
    pub fn with_input(mut self, input: InputMode) -> Self {
        self.input = input;
        self
    }

    #[must_use]
    pub fn with_adaptation(mut self, adaptation: DifficultyPolicy) -> Self {
        self.adaptation = adaptation;
        self
    }

    #[must_use]
    pub fn with_feedback(mut self, success_ms: Millis, failure_ms: Millis) -> Self {
        self.feedback = FeedbackTimings::new(success_ms, failure_ms);
        self
    }

    #[must_use]
    pub fn with_response_limit(mut self, tick_ms: Millis) -> Self {
        self.response_limit = Some(ResponseLimit { tick_ms });
        self
    }

    #[must_use]
    pub fn with_initial_difficulty(mut self, initial: u32) -> Self {
        self.difficulty.initial = initial;
        self
    }

    /// Check internal consistency.
    pub fn validate(&self) -> TrialResult<()> {
        let fail = |reason: String| Err(TrialError::configuration(&self.name, reason));
        let range = self.difficulty;

        if range.min == 0 {
            return fail("difficulty must be positive".into());
        }
        if range.min > range.max {
            return fail(format!("empty difficulty range [{}, {}]", range.min, range.max));
        }
        if !range.contains(range.initial) {
            return fail(format!(
                "initial difficulty {} outside [{}, {}]",
                range.initial, range.min, range.max
            ));
        }

        match self.adaptation {
            DifficultyPolicy::Stepped { floor, ceiling, .. } => {
                if floor > ceiling || floor < range.min || ceiling > range.max {
                    return fail(format!(
                        "stepped bounds [{floor}, {ceiling}] must lie within [{}, {}]",
                        range.min, range.max
                    ));
                }
                // Outside [floor, ceiling] the clamp would move the wrong way.
                if !(floor..=ceiling).contains(&range.initial) {
                    return fail(format!(
                        "initial difficulty {} outside stepped bounds [{floor}, {ceiling}]",
                        range.initial
                    ));
                }
            }
            DifficultyPolicy::Timed { step, floor } => {
                if step == 0 {
                    return fail("timed step must be positive".into());
                }
                if floor < range.min || floor > range.max {
                    return fail(format!(
                        "timed floor {floor} outside [{}, {}]",
                        range.min, range.max
                    ));
                }
                if range.initial < floor {
                    return fail(format!(
                        "initial difficulty {} below timed floor {floor}",
                        range.initial
                    ));
                }
            }
            DifficultyPolicy::Fixed => {}
        }

        let expected_equality = match &self.source {
            SourceSpec::Sequence { alphabet } => {
                if !(2..=10).contains(alphabet) {
                    return fail(format!("alphabet size {alphabet} outside [2, 10]"));
                }
                if range.max > MAX_SEQUENCE_LEN {
                    return fail(format!(
                        "sequence length {} above {MAX_SEQUENCE_LEN}",
                        range.max
                    ));
                }
                EqualityPolicy::ExactSequence
            }
            SourceSpec::DotField {
                min_count,
                max_count,
                min_distance,
                max_attempts,
            } => {
                if *min_count == 0 || min_count > max_count {
                    return fail(format!("dot count range [{min_count}, {max_count}] is invalid"));
                }
                if *max_attempts == 0 || !min_distance.is_finite() || *min_distance < 0.0 {
                    return fail("dot placement needs a finite spacing and at least one attempt".into());
                }
                EqualityPolicy::ExactCount
            }
            SourceSpec::Fraction { denominators } => {
                if denominators.iter().any(|&d| d == 0) {
                    return fail("denominators must be positive".into());
                }
                // Each distinct denominator d contributes d distinct fractions.
                let mut unique = denominators.clone();
                unique.sort_unstable();
                unique.dedup();
                let distinct: u32 = unique.iter().sum();
                if distinct < 4 {
                    return fail("need at least four distinct fractions".into());
                }
                EqualityPolicy::TargetOption
            }
            SourceSpec::GridProduct => {
                if range.min < 2 {
                    return fail("grid size must be at least 2".into());
                }
                if range.max > MAX_GRID_SIZE {
                    return fail(format!("grid size {} above {MAX_GRID_SIZE}", range.max));
                }
                EqualityPolicy::TargetOption
            }
            SourceSpec::ColorInterference => EqualityPolicy::TargetOption,
        };
        if self.equality != expected_equality {
            return fail(format!(
                "{} source cannot be scored with {:?}",
                self.source.kind(),
                self.equality
            ));
        }

        if matches!(self.input, InputMode::Incremental { .. })
            && !matches!(self.source, SourceSpec::Sequence { .. })
        {
            return fail("incremental input needs a sequence source".into());
        }
        if matches!(self.response_limit, Some(ResponseLimit { tick_ms: 0 })) {
            return fail("countdown tick must be positive".into());
        }

        Ok(())
    }
}
