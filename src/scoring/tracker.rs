//! Score accumulation and adaptive difficulty.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    DifficultyPolicy, EqualityPolicy, Response, ResponseValue, Round, RoundId, VariantConfig,
};

use super::policy::{is_harder, judge, next_difficulty};

/// Outcome of evaluating one response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub correct: bool,
    pub score_delta: i32,
    /// The response was synthesized by an expired countdown.
    pub timed_out: bool,
}

/// One scored round, kept in the session history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub round_id: RoundId,
    pub difficulty: u32,
    pub correct: bool,
    pub timed_out: bool,
}

impl RoundOutcome {
    fn verdict(&self) -> Verdict {
        Verdict {
            correct: self.correct,
            score_delta: i32::from(self.correct),
            timed_out: self.timed_out,
        }
    }
}

/// Correct/total counts at one difficulty level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyTally {
    pub correct: u32,
    pub total: u32,
}

/// Session score. Only `ScoreTracker::evaluate` mutates it.
///
/// `history` is a persistent vector so a snapshot clone is O(1).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreState {
    pub correct_count: u32,
    pub total_count: u32,
    /// Difficulty the next round will be generated at.
    pub current_difficulty: u32,
    pub streak: u32,
    pub best_streak: u32,
    /// Hardest difficulty reached this session.
    pub best_difficulty: u32,
    pub score: i64,
    pub history: Vector<RoundOutcome>,
    pub by_difficulty: FxHashMap<u32, DifficultyTally>,
}

impl ScoreState {
    /// Fresh state starting at `initial` difficulty.
    #[must_use]
    pub fn new(initial: u32) -> Self {
        Self {
            correct_count: 0,
            total_count: 0,
            current_difficulty: initial,
            streak: 0,
            best_streak: 0,
            best_difficulty: initial,
            score: 0,
            history: Vector::new(),
            by_difficulty: FxHashMap::default(),
        }
    }

    /// Percentage of correct rounds, rounded; 0 before any round.
    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        if self.total_count == 0 {
            0
        } else {
            (f64::from(self.correct_count) / f64::from(self.total_count) * 100.0).round() as u32
        }
    }

    /// Recorded outcome of a round, if it has been scored.
    #[must_use]
    pub fn outcome(&self, round_id: RoundId) -> Option<&RoundOutcome> {
        self.history.iter().rev().find(|o| o.round_id == round_id)
    }
}

/// Scores responses and adapts difficulty for one session.
#[derive(Clone, Debug)]
pub struct ScoreTracker {
    equality: EqualityPolicy,
    adaptation: DifficultyPolicy,
    initial: u32,
    state: ScoreState,
}

impl ScoreTracker {
    #[must_use]
    pub fn new(equality: EqualityPolicy, adaptation: DifficultyPolicy, initial: u32) -> Self {
        Self {
            equality,
            adaptation,
            initial,
            state: ScoreState::new(initial),
        }
    }

    #[must_use]
    pub fn from_config(config: &VariantConfig) -> Self {
        Self::new(config.equality, config.adaptation, config.difficulty.initial)
    }

    /// Score `response` against `round` and update the session state.
    ///
    /// A round is applied to the state at most once: evaluating it again
    /// returns the recorded verdict untouched. A response addressed to a
    /// different round is scored as incorrect.
    pub fn evaluate(&mut self, round: &Round, response: &Response) -> Verdict {
        if let Some(outcome) = self.state.outcome(round.id) {
            return outcome.verdict();
        }

        let timed_out = response.value == ResponseValue::NoAnswer;
        let correct =
            response.round_id == round.id && judge(self.equality, &round.stimulus, &response.value);
        let verdict = Verdict {
            correct,
            score_delta: i32::from(correct),
            timed_out,
        };

        let state = &mut self.state;
        state.total_count += 1;
        if correct {
            state.correct_count += 1;
            state.streak += 1;
            state.best_streak = state.best_streak.max(state.streak);
        } else {
            state.streak = 0;
        }
        state.score += i64::from(verdict.score_delta);

        let tally = state.by_difficulty.entry(round.difficulty).or_default();
        tally.total += 1;
        if correct {
            tally.correct += 1;
        }

        let next = next_difficulty(self.adaptation, round.difficulty, correct);
        state.current_difficulty = next;
        if is_harder(self.adaptation, next, state.best_difficulty) {
            state.best_difficulty = next;
        }

        state.history.push_back(RoundOutcome {
            round_id: round.id,
            difficulty: round.difficulty,
            correct,
            timed_out,
        });

        debug!(
            round = %round.id,
            correct,
            timed_out,
            difficulty = round.difficulty,
            next_difficulty = next,
            "round evaluated"
        );
        verdict
    }

    /// Difficulty after a round at `current` (pure).
    #[must_use]
    pub fn next_difficulty(&self, current: u32, correct: bool) -> u32 {
        next_difficulty(self.adaptation, current, correct)
    }

    #[must_use]
    pub fn state(&self) -> &ScoreState {
        &self.state
    }

    /// Start a new session at the initial difficulty.
    pub fn reset(&mut self) {
        self.state = ScoreState::new(self.initial);
    }
}
