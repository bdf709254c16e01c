//! Scheduler phases and presentation frames.

use serde::{Deserialize, Serialize};

use crate::core::{Millis, PresentationMode, Round, Stimulus};

/// State of the round scheduler.
///
/// ```text
/// Idle -> Presenting -> AwaitingInput -> Evaluating -> Feedback -+
///          ^                                                     |
///          +-----------------------------------------------------+
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for `start()`.
    Idle,
    /// Revealing the stimulus; input is ignored.
    Presenting,
    /// Collecting the response for the current round.
    AwaitingInput,
    /// Scoring; never observed between calls, only in emitted snapshots.
    Evaluating,
    /// Showing the verdict before the next round.
    Feedback,
}

impl Phase {
    /// Whether responses are accepted in this phase.
    #[must_use]
    pub fn accepts_input(self) -> bool {
        self == Phase::AwaitingInput
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Presenting => "presenting",
            Phase::AwaitingInput => "awaiting-input",
            Phase::Evaluating => "evaluating",
            Phase::Feedback => "feedback",
        };
        f.write_str(name)
    }
}

/// What part of the stimulus the view should show right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reveal {
    /// Nothing (lead-in, gaps, recall).
    Hidden,
    /// A single symbol of a sequence.
    Symbol { index: usize, symbol: u8 },
    /// The whole stimulus.
    Whole,
}

/// One timed step of a presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub reveal: Reveal,
    pub duration: Millis,
}

/// Frames for presenting `round` under `mode`. Zero-length frames are
/// dropped, so an empty plan means "go straight to input".
#[must_use]
pub fn presentation_plan(mode: PresentationMode, round: &Round) -> Vec<Frame> {
    let mut frames = Vec::new();
    let mut push = |reveal: Reveal, duration: Millis| {
        if duration > 0 {
            frames.push(Frame { reveal, duration });
        }
    };

    match mode {
        PresentationMode::Sequential {
            lead_in_ms,
            symbol_ms,
            gap_ms,
        } => {
            push(Reveal::Hidden, lead_in_ms);
            match &round.stimulus {
                Stimulus::Sequence { symbols, .. } => {
                    for (index, &symbol) in symbols.iter().enumerate() {
                        push(Reveal::Symbol { index, symbol }, symbol_ms);
                        push(Reveal::Hidden, gap_ms);
                    }
                }
                _ => push(Reveal::Whole, symbol_ms),
            }
        }
        PresentationMode::Flash { lead_in_ms } => {
            push(Reveal::Hidden, lead_in_ms);
            push(Reveal::Whole, Millis::from(round.difficulty));
        }
        PresentationMode::Immediate => {}
    }

    frames
}
