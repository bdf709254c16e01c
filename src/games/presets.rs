//! Preset `VariantConfig`s for the bundled games.

use crate::core::{
    DifficultyPolicy, DifficultyRange, EqualityPolicy, InputMode, PresentationMode, SourceSpec,
    VariantConfig,
};
use crate::generator::DEFAULT_DENOMINATORS;

/// Recall a growing string of digits shown one at a time.
///
/// Starts at 3 digits; +1 on success, -1 on failure, within [3, 20].
#[must_use]
pub fn digit_span() -> VariantConfig {
    VariantConfig::new(
        "digit-span",
        SourceSpec::Sequence { alphabet: 10 },
        EqualityPolicy::ExactSequence,
        DifficultyRange::new(3, 20, 3),
    )
    .with_presentation(PresentationMode::Sequential {
        lead_in_ms: 1_500,
        symbol_ms: 800,
        gap_ms: 200,
    })
    .with_input(InputMode::Incremental { auto_submit: false })
    .with_adaptation(DifficultyPolicy::Stepped {
        up: 1,
        down: 1,
        floor: 3,
        ceiling: 20,
    })
    .with_feedback(2_000, 3_000)
}

/// Repeat a sequence of coloured pads (six colours).
///
/// The round is submitted as soon as the last pad is entered.
#[must_use]
pub fn pattern_memory() -> VariantConfig {
    VariantConfig::new(
        "pattern-memory",
        SourceSpec::Sequence { alphabet: 6 },
        EqualityPolicy::ExactSequence,
        DifficultyRange::new(3, 12, 3),
    )
    .with_presentation(PresentationMode::Sequential {
        lead_in_ms: 1_500,
        symbol_ms: 800,
        gap_ms: 0,
    })
    .with_input(InputMode::Incremental { auto_submit: true })
    .with_adaptation(DifficultyPolicy::Stepped {
        up: 1,
        down: 1,
        floor: 3,
        ceiling: 12,
    })
    .with_feedback(2_000, 3_000)
}

/// Count dots flashed for a shrinking exposure time.
///
/// Difficulty is the flash duration in ms: 1000 down to 300 in steps of 50.
#[must_use]
pub fn dot_counter() -> VariantConfig {
    VariantConfig::new(
        "dot-counter",
        SourceSpec::DotField {
            min_count: 3,
            max_count: 17,
            min_distance: 8.0,
            max_attempts: 50,
        },
        EqualityPolicy::ExactCount,
        DifficultyRange::new(300, 1_000, 1_000),
    )
    .with_presentation(PresentationMode::Flash { lead_in_ms: 0 })
    .with_adaptation(DifficultyPolicy::Timed { step: 50, floor: 300 })
    .with_feedback(2_000, 3_000)
}

/// Name the ink colour of a colour word under a countdown.
///
/// Difficulty is the answer budget in ms: 3000 down to 1500 in steps of 100.
#[must_use]
pub fn color_interference() -> VariantConfig {
    VariantConfig::new(
        "color-interference",
        SourceSpec::ColorInterference,
        EqualityPolicy::TargetOption,
        DifficultyRange::new(1_500, 3_000, 3_000),
    )
    .with_adaptation(DifficultyPolicy::Timed {
        step: 100,
        floor: 1_500,
    })
    .with_response_limit(100)
    .with_feedback(2_000, 2_000)
}

#[must_use]
pub fn fractions() -> VariantConfig {
    VariantConfig::new(
        "fractions",
        SourceSpec::Fraction {
            denominators: DEFAULT_DENOMINATORS.to_vec(),
        },
        EqualityPolicy::TargetOption,
        DifficultyRange::fixed(1),
    )
    .with_feedback(2_000, 2_000)
}

/// Pick the number of cells in a `rows x cols` block of a grid.
///
/// Difficulty is the largest grid side.
#[must_use]
pub fn math_grid() -> VariantConfig {
    VariantConfig::new(
        "math-grid",
        SourceSpec::GridProduct,
        EqualityPolicy::TargetOption,
        DifficultyRange::new(2, 12, 12),
    )
    .with_feedback(1_500, 1_500)
}
