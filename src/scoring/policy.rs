//! Equality and difficulty-adaptation rules.
//!
//! Both are pure functions of their inputs so that re-evaluating a round
//! always yields the same verdict.

use crate::core::{DifficultyPolicy, EqualityPolicy, ResponseValue, Stimulus};

/// Decide whether `response` answers `stimulus` under `policy`.
///
/// A payload whose shape does not fit the stimulus, or a `NoAnswer`, is
/// simply incorrect.
#[must_use]
pub fn judge(policy: EqualityPolicy, stimulus: &Stimulus, response: &ResponseValue) -> bool {
    match (policy, stimulus, response) {
        (
            EqualityPolicy::ExactSequence,
            Stimulus::Sequence { symbols, .. },
            ResponseValue::Sequence(given),
        ) => given.len() == symbols.len() && given.iter().zip(symbols).all(|(a, b)| a == b),
        (EqualityPolicy::ExactCount, Stimulus::Dots { dots }, ResponseValue::Count(n)) => {
            *n as usize == dots.len()
        }
        (EqualityPolicy::TargetOption, Stimulus::Choice(choice), ResponseValue::Choice(value)) => {
            *value == choice.target
        }
        _ => false,
    }
}

/// Difficulty for the round after one scored at `current`.
#[must_use]
pub fn next_difficulty(policy: DifficultyPolicy, current: u32, correct: bool) -> u32 {
    match policy {
        DifficultyPolicy::Stepped {
            up,
            down,
            floor,
            ceiling,
        } => {
            if correct {
                current.saturating_add(up).min(ceiling)
            } else {
                current.saturating_sub(down).max(floor)
            }
        }
        DifficultyPolicy::Timed { step, floor } => {
            if correct {
                current.saturating_sub(step).max(floor)
            } else {
                current
            }
        }
        DifficultyPolicy::Fixed => current,
    }
}

/// Whether `candidate` is harder than `reference` under `policy`.
///
/// Larger sizes are harder for stepped variants; shorter timings are harder
/// for timed ones.
#[must_use]
pub fn is_harder(policy: DifficultyPolicy, candidate: u32, reference: u32) -> bool {
    match policy {
        DifficultyPolicy::Stepped { .. } => candidate > reference,
        DifficultyPolicy::Timed { .. } => candidate < reference,
        DifficultyPolicy::Fixed => false,
    }
}
