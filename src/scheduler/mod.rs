//! Round scheduling.
//!
//! `RoundScheduler` drives a session through
//! `Idle -> Presenting -> AwaitingInput -> Evaluating -> Feedback` and back to
//! `Presenting` for the next round.
//!
//! ## Timing
//!
//! The scheduler owns a logical millisecond clock. Hosts call
//! `advance_to` / `advance_by` from their frame loop (or a test does it
//! directly), and every timer that comes due fires in order. At most one
//! timer is pending at a time; any transition cancels it first.
//!
//! ## Stale callbacks
//!
//! Each timer carries the `RoundId` it belongs to. A timer whose round is no
//! longer current, or that has been cancelled, is dropped without touching
//! state. Responses outside `AwaitingInput` are discarded the same way.

mod engine;
mod input;
mod phase;
mod snapshot;
mod timer;

pub use engine::{RoundScheduler, SubmitOutcome};
pub use phase::{presentation_plan, Frame, Phase, Reveal};
pub use snapshot::{Snapshot, SnapshotObserver};
pub use timer::{Timer, TimerAction};
