//! Outbound state snapshots.
//!
//! The scheduler pushes a `Snapshot` to every subscribed observer on each
//! transition. Any `FnMut(&Snapshot) + Send` closure is an observer, which
//! covers forwarding into a channel:
//!
//! ```
//! use std::sync::mpsc;
//! use rust_trials::games::GameKind;
//! use rust_trials::scheduler::{Phase, Snapshot};
//!
//! let (tx, rx) = mpsc::channel::<Snapshot>();
//! let mut scheduler = GameKind::Fractions.scheduler(7).unwrap();
//! scheduler.subscribe(move |s: &Snapshot| {
//!     let _ = tx.send(s.clone());
//! });
//! scheduler.start().unwrap();
//!
//! let phases: Vec<Phase> = rx.try_iter().map(|s| s.phase).collect();
//! assert_eq!(phases.last(), Some(&Phase::AwaitingInput));
//! ```

use std::sync::Arc;

use crate::core::{Millis, Round, Symbols};
use crate::scoring::{ScoreState, Verdict};

use super::phase::{Phase, Reveal};

/// Everything a view needs to render the current state.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub round: Option<Arc<Round>>,
    pub reveal: Reveal,
    /// Symbols entered so far in incremental mode.
    pub input: Symbols,
    pub score: ScoreState,
    /// Verdict of the current round, once evaluated.
    pub verdict: Option<Verdict>,
    /// Milliseconds left on the countdown, for variants that have one.
    pub time_remaining_ms: Option<Millis>,
    pub at_ms: Millis,
}

/// Receives every snapshot the scheduler emits.
pub trait SnapshotObserver: Send {
    fn on_snapshot(&mut self, snapshot: &Snapshot);
}

impl<F> SnapshotObserver for F
where
    F: FnMut(&Snapshot) + Send,
{
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}
