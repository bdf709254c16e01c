//! Core types: identifiers, rounds, responses, RNG, configuration.
//!
//! Everything here is variant-agnostic. Variants configure the engine via
//! `VariantConfig` rather than modifying the core.

pub mod ids;
pub mod rng;
pub mod config;
pub mod round;

pub use ids::{RoundId, TimerHandle};
pub use rng::{TrialRng, TrialRngState};
pub use config::{
    DifficultyPolicy, DifficultyRange, EqualityPolicy, FeedbackTimings, InputMode,
    PresentationMode, ResponseLimit, SourceSpec, VariantConfig, MAX_GRID_SIZE, MAX_SEQUENCE_LEN,
};
pub use round::{
    ChoicePrompt, ChoiceStimulus, ChoiceValue, Color, Dot, Fraction, Millis, Response,
    ResponseValue, Round, Stimulus, Symbols,
};
