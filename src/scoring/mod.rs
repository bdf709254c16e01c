//! Scoring: equality rules, difficulty adaptation and session score.
//!
//! - `policy`: pure `judge` / `next_difficulty` functions per variant rule
//! - `tracker`: `ScoreTracker`, the only owner allowed to mutate `ScoreState`

pub mod policy;
pub mod tracker;

pub use policy::{is_harder, judge, next_difficulty};
pub use tracker::{DifficultyTally, RoundOutcome, ScoreState, ScoreTracker, Verdict};
