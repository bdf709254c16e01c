//! # rust-trials
//!
//! A timed-round trial engine for cognitive mini-games.
//!
//! Digit span, pattern memory, dot counting, colour interference, fraction
//! and grid-product quizzes all run the same loop: generate a stimulus,
//! present it, collect a response, score it, adapt the difficulty, repeat.
//! This crate implements that loop once and configures it per game.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: The scheduler knows nothing about digits or dots.
//!    Games are a `VariantConfig`: a stimulus source, a presentation mode,
//!    an equality rule and a difficulty policy.
//!
//! 2. **Deterministic**: All randomness flows through an injected,
//!    seedable `TrialRng`. Time is a logical millisecond clock advanced by
//!    the host, so whole sessions replay exactly in tests.
//!
//! 3. **Stale-Safe**: Timers and responses carry the `RoundId` they belong
//!    to. Anything that outlives its round is dropped, never scored.
//!
//! ## Modules
//!
//! - `core`: ids, rounds, responses, RNG, configuration
//! - `generator`: `StimulusSource` implementations and `RoundGenerator`
//! - `scoring`: equality/difficulty policies and `ScoreTracker`
//! - `scheduler`: the `RoundScheduler` phase machine and snapshots
//! - `games`: bundled presets and the word-typing tracker
//! - `error`: `TrialError`

pub mod core;
pub mod error;
pub mod games;
pub mod generator;
pub mod scheduler;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    RoundId, TimerHandle,
    TrialRng, TrialRngState,
    DifficultyPolicy, DifficultyRange, EqualityPolicy, FeedbackTimings,
    InputMode, PresentationMode, ResponseLimit, SourceSpec, VariantConfig,
    Millis, Response, ResponseValue, Round, Stimulus, Symbols,
};

pub use crate::error::{TrialError, TrialResult};

pub use crate::generator::{RoundGenerator, StimulusSource};

pub use crate::scoring::{ScoreState, ScoreTracker, Verdict};

pub use crate::scheduler::{
    Phase, Reveal, RoundScheduler, Snapshot, SnapshotObserver, SubmitOutcome,
};

pub use crate::games::{GameKind, TypingRun, TypingStatus};
