//! Cancellable single-slot timer.
//!
//! The scheduler holds at most one pending timer. Every timer carries the
//! round it was scheduled for and a handle that is never reused, so a
//! callback that outlives its round (or a cancelled timer fired by a host
//! that did not drop it) can be recognised and ignored.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Millis, RoundId, TimerHandle};

/// What to do when a timer fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    /// Show presentation frame `n` (or open input once past the last frame).
    Frame(usize),
    /// Countdown tick while awaiting input.
    Countdown,
    /// Feedback finished; move on to the next round.
    FeedbackDone,
}

/// A scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub handle: TimerHandle,
    pub round: RoundId,
    pub due_at: Millis,
    pub action: TimerAction,
}

/// The scheduler's single timer slot.
#[derive(Debug, Default)]
pub(crate) struct TimerSlot {
    pending: Option<Timer>,
    issued: u64,
}

impl TimerSlot {
    /// Replace any pending timer with a new one.
    pub(crate) fn schedule(&mut self, round: RoundId, due_at: Millis, action: TimerAction) -> Timer {
        self.issued += 1;
        let timer = Timer {
            handle: TimerHandle::new(self.issued),
            round,
            due_at,
            action,
        };
        trace!(handle = %timer.handle, %round, due_at, ?action, "timer scheduled");
        self.pending = Some(timer);
        timer
    }

    /// Drop the pending timer, if any. Handles keep counting up.
    pub(crate) fn cancel(&mut self) -> Option<Timer> {
        let cancelled = self.pending.take();
        if let Some(timer) = &cancelled {
            trace!(handle = %timer.handle, "timer cancelled");
        }
        cancelled
    }

    pub(crate) fn pending(&self) -> Option<Timer> {
        self.pending
    }

    /// Whether `timer` is the one currently pending.
    pub(crate) fn is_pending(&self, timer: &Timer) -> bool {
        self.pending.map(|t| t.handle) == Some(timer.handle)
    }

    /// Pending timer if it is due at or before `now`.
    pub(crate) fn due(&self, now: Millis) -> Option<Timer> {
        self.pending.filter(|t| t.due_at <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_replaces_pending() {
        let mut slot = TimerSlot::default();
        let first = slot.schedule(RoundId::new(1), 100, TimerAction::Frame(1));
        let second = slot.schedule(RoundId::new(1), 200, TimerAction::Frame(2));

        assert_ne!(first.handle, second.handle);
        assert!(!slot.is_pending(&first));
        assert!(slot.is_pending(&second));
    }

    #[test]
    fn test_handles_survive_cancel() {
        let mut slot = TimerSlot::default();
        let before = slot.schedule(RoundId::new(1), 100, TimerAction::Frame(1));
        assert_eq!(slot.cancel(), Some(before));
        assert_eq!(slot.pending(), None);

        let after = slot.schedule(RoundId::new(1), 100, TimerAction::Frame(1));
        assert_ne!(before.handle, after.handle);
        assert!(!slot.is_pending(&before));
    }

    #[test]
    fn test_due() {
        let mut slot = TimerSlot::default();
        slot.schedule(RoundId::new(1), 100, TimerAction::Countdown);

        assert!(slot.due(99).is_none());
        assert!(slot.due(100).is_some());
        assert!(slot.due(500).is_some());
    }
}
