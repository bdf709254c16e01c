//! The round scheduler state machine.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::core::{
    InputMode, Millis, Response, ResponseValue, Round, RoundId, Stimulus, Symbols, TrialRng,
    TrialRngState, VariantConfig,
};
use crate::error::{TrialError, TrialResult};
use crate::generator::RoundGenerator;
use crate::scoring::{ScoreState, ScoreTracker, Verdict};

use super::input;
use super::phase::{presentation_plan, Frame, Phase, Reveal};
use super::snapshot::{Snapshot, SnapshotObserver};
use super::timer::{Timer, TimerAction, TimerSlot};

/// Result of handing input to the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The round was scored.
    Evaluated(Verdict),
    /// Incremental input was updated; `len` symbols are buffered.
    Buffered { len: usize },
    /// The input arrived outside its round's input window and was dropped.
    Discarded,
}

/// Single-threaded, cooperative round scheduler for one game session.
///
/// Time is a logical millisecond clock advanced by the host with
/// `advance_to` / `advance_by`. Phase transitions happen only inside those
/// calls or inside input calls, so the scheduler never needs a lock.
///
/// ## Example
///
/// ```
/// use rust_trials::games::GameKind;
/// use rust_trials::scheduler::{Phase, SubmitOutcome};
///
/// let mut scheduler = GameKind::DigitSpan.scheduler(42).unwrap();
/// scheduler.start().unwrap();
/// assert_eq!(scheduler.phase(), Phase::Presenting);
///
/// // 1.5s lead-in, then 3 digits at 800ms on / 200ms off
/// scheduler.advance_by(4_500);
/// assert_eq!(scheduler.phase(), Phase::AwaitingInput);
///
/// let round = scheduler.current_round().unwrap();
/// let answer: String = match &round.stimulus {
///     rust_trials::core::Stimulus::Sequence { symbols, .. } => {
///         symbols.iter().map(|s| s.to_string()).collect()
///     }
///     _ => unreachable!(),
/// };
/// let outcome = scheduler.submit_text(round.id, &answer).unwrap();
/// assert!(matches!(outcome, SubmitOutcome::Evaluated(v) if v.correct));
/// assert_eq!(scheduler.score().current_difficulty, 4);
/// ```
pub struct RoundScheduler {
    config: VariantConfig,
    generator: RoundGenerator,
    tracker: ScoreTracker,
    rng: TrialRng,

    phase: Phase,
    round: Option<Arc<Round>>,
    plan: Vec<Frame>,
    reveal: Reveal,
    input: Symbols,
    verdict: Option<Verdict>,
    deadline: Option<Millis>,

    timers: TimerSlot,
    now: Millis,
    observers: Vec<Box<dyn SnapshotObserver>>,
}

impl RoundScheduler {
    /// Create an idle scheduler for `config`, seeding its random stream.
    ///
    /// Fails with `TrialError::Configuration` if the config is inconsistent.
    pub fn new(config: VariantConfig, seed: u64) -> TrialResult<Self> {
        config.validate()?;

        let generator = RoundGenerator::from_spec(&config.name, config.difficulty, &config.source);
        let tracker = ScoreTracker::from_config(&config);
        let rng = TrialRng::new(seed).for_context(&config.name);

        Ok(Self {
            config,
            generator,
            tracker,
            rng,
            phase: Phase::Idle,
            round: None,
            plan: Vec::new(),
            reveal: Reveal::Hidden,
            input: Symbols::new(),
            verdict: None,
            deadline: None,
            timers: TimerSlot::default(),
            now: 0,
            observers: Vec::new(),
        })
    }

    /// Register an observer for every subsequent snapshot.
    pub fn subscribe(&mut self, observer: impl SnapshotObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &VariantConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn current_round(&self) -> Option<Arc<Round>> {
        self.round.clone()
    }

    #[must_use]
    pub fn score(&self) -> &ScoreState {
        self.tracker.state()
    }

    #[must_use]
    pub fn now(&self) -> Millis {
        self.now
    }

    /// The timer that will fire next, if any.
    #[must_use]
    pub fn pending_timer(&self) -> Option<Timer> {
        self.timers.pending()
    }

    /// Random stream position, for reproducing a session.
    #[must_use]
    pub fn rng_state(&self) -> TrialRngState {
        self.rng.state()
    }

    /// Current state as the view would receive it.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            round: self.round.clone(),
            reveal: self.reveal,
            input: self.input.clone(),
            score: self.tracker.state().clone(),
            verdict: self.verdict,
            time_remaining_ms: self.deadline.map(|d| d.saturating_sub(self.now)),
            at_ms: self.now,
        }
    }

    // === Session control ===

    /// Leave `Idle` and present round 1 (or the next round after a reset).
    ///
    /// Does nothing outside `Idle`.
    pub fn start(&mut self) -> TrialResult<()> {
        if self.phase != Phase::Idle {
            debug!(variant = %self.config.name, phase = %self.phase, "start ignored");
            return Ok(());
        }
        self.begin_round()
    }

    /// Cancel everything and return to `Idle` with a fresh score.
    pub fn reset(&mut self) {
        self.timers.cancel();
        self.tracker.reset();
        self.generator.reset();
        self.phase = Phase::Idle;
        self.round = None;
        self.plan.clear();
        self.reveal = Reveal::Hidden;
        self.input.clear();
        self.verdict = None;
        self.deadline = None;
        debug!(variant = %self.config.name, "session reset");
        self.emit();
    }

    /// `reset()` then `start()`.
    pub fn new_game(&mut self) -> TrialResult<()> {
        self.reset();
        self.start()
    }

    // === Clock ===

    /// Move the clock to `now`, firing every timer due on the way.
    ///
    /// Earlier times are ignored; the clock never runs backwards.
    pub fn advance_to(&mut self, now: Millis) {
        if now < self.now {
            return;
        }
        while let Some(timer) = self.timers.due(now) {
            self.fire(timer);
        }
        self.now = now;
    }

    pub fn advance_by(&mut self, delta: Millis) {
        self.advance_to(self.now.saturating_add(delta));
    }

    /// Run a timer callback.
    ///
    /// The timer must still be the pending one and must belong to the
    /// current round; anything else is stale and is dropped without touching
    /// state. Returns whether the timer ran.
    pub fn fire(&mut self, timer: Timer) -> bool {
        let current = self.round.as_ref().map(|r| r.id);
        if !self.timers.is_pending(&timer) || current != Some(timer.round) {
            debug!(handle = %timer.handle, round = %timer.round, "stale timer dropped");
            return false;
        }

        self.timers.cancel();
        self.now = self.now.max(timer.due_at);

        match timer.action {
            TimerAction::Frame(index) => self.show_frame(index),
            TimerAction::Countdown => self.countdown(),
            TimerAction::FeedbackDone => {
                if let Err(err) = self.begin_round() {
                    error!(variant = %self.config.name, %err, "could not generate next round");
                    self.phase = Phase::Idle;
                    self.round = None;
                    self.emit();
                }
            }
        }
        true
    }

    // === Input ===

    /// Submit a complete response.
    pub fn submit_response(&mut self, response: Response) -> TrialResult<SubmitOutcome> {
        let round = match self.accepting(response.round_id) {
            Ok(round) => round,
            Err(err) if err.is_stale() => return Ok(self.discard(&err)),
            Err(err) => return Err(err),
        };

        if let Err(err) = input::validate(&round.stimulus, &response.value) {
            warn!(round = %round.id, %err, "response rejected");
            return Err(err);
        }

        Ok(SubmitOutcome::Evaluated(self.evaluate(&round, response)))
    }

    /// Parse typed text and submit it (digits, a count, or an option index).
    pub fn submit_text(&mut self, round_id: RoundId, text: &str) -> TrialResult<SubmitOutcome> {
        let round = match self.accepting(round_id) {
            Ok(round) => round,
            Err(err) if err.is_stale() => return Ok(self.discard(&err)),
            Err(err) => return Err(err),
        };

        let value = input::parse_text(&round.stimulus, text).map_err(|err| {
            warn!(round = %round_id, %err, "text rejected");
            err
        })?;
        self.submit_response(Response::new(round_id, value, self.now))
    }

    /// Choose the option at `index` of a multiple-choice round.
    pub fn select_option(&mut self, round_id: RoundId, index: usize) -> TrialResult<SubmitOutcome> {
        let round = match self.accepting(round_id) {
            Ok(round) => round,
            Err(err) if err.is_stale() => return Ok(self.discard(&err)),
            Err(err) => return Err(err),
        };

        let value = match &round.stimulus {
            Stimulus::Choice(choice) => choice.options.get(index).copied(),
            _ => None,
        }
        .ok_or_else(|| TrialError::invalid_input(format!("no option at index {index}")))?;

        self.submit_response(Response::new(round_id, ResponseValue::Choice(value), self.now))
    }

    /// Append one symbol in incremental mode.
    ///
    /// Symbols past the stimulus length are ignored. With `auto_submit`, the
    /// symbol that fills the buffer triggers evaluation.
    pub fn push_symbol(&mut self, round_id: RoundId, symbol: u8) -> TrialResult<SubmitOutcome> {
        let round = match self.accepting(round_id) {
            Ok(round) => round,
            Err(err) if err.is_stale() => return Ok(self.discard(&err)),
            Err(err) => return Err(err),
        };
        let auto_submit = self.incremental_mode()?;

        let Stimulus::Sequence { alphabet, .. } = round.stimulus else {
            return Err(TrialError::invalid_input("symbol input needs a sequence round"));
        };
        if symbol >= alphabet {
            return Err(TrialError::invalid_input(format!(
                "symbol {symbol} outside alphabet of {alphabet}"
            )));
        }

        let bound = round.expected_len();
        if self.input.len() >= bound {
            return Ok(SubmitOutcome::Buffered {
                len: self.input.len(),
            });
        }
        self.input.push(symbol);

        if auto_submit && self.input.len() == bound {
            let response = Response::new(
                round_id,
                ResponseValue::Sequence(self.input.clone()),
                self.now,
            );
            return Ok(SubmitOutcome::Evaluated(self.evaluate(&round, response)));
        }

        self.emit();
        Ok(SubmitOutcome::Buffered {
            len: self.input.len(),
        })
    }

    /// Remove the last buffered symbol.
    pub fn pop_symbol(&mut self, round_id: RoundId) -> TrialResult<SubmitOutcome> {
        if let Err(err) = self.accepting(round_id) {
            return if err.is_stale() {
                Ok(self.discard(&err))
            } else {
                Err(err)
            };
        }
        self.incremental_mode()?;

        if self.input.pop().is_some() {
            self.emit();
        }
        Ok(SubmitOutcome::Buffered {
            len: self.input.len(),
        })
    }

    /// Submit the buffered symbols. The buffer must be full.
    pub fn submit_input(&mut self, round_id: RoundId) -> TrialResult<SubmitOutcome> {
        let round = match self.accepting(round_id) {
            Ok(round) => round,
            Err(err) if err.is_stale() => return Ok(self.discard(&err)),
            Err(err) => return Err(err),
        };
        self.incremental_mode()?;

        let bound = round.expected_len();
        if self.input.len() != bound {
            return Err(TrialError::invalid_input(format!(
                "entered {} of {bound} symbols",
                self.input.len()
            )));
        }

        let response = Response::new(round_id, ResponseValue::Sequence(self.input.clone()), self.now);
        Ok(SubmitOutcome::Evaluated(self.evaluate(&round, response)))
    }

    // === Transitions ===

    fn begin_round(&mut self) -> TrialResult<()> {
        let difficulty = self.tracker.state().current_difficulty;
        let round = self.generator.generate(difficulty, &mut self.rng, self.now)?;

        let round_id = round.id;
        self.plan = presentation_plan(self.config.presentation, &round);
        self.round = Some(Arc::new(round));
        self.input.clear();
        self.verdict = None;
        self.deadline = None;
        self.phase = Phase::Presenting;
        debug!(
            variant = %self.config.name,
            round = %round_id,
            difficulty,
            frames = self.plan.len(),
            "presenting"
        );

        self.show_frame(0);
        Ok(())
    }

    fn show_frame(&mut self, index: usize) {
        let Some(round_id) = self.current_id() else {
            return;
        };

        match self.plan.get(index).copied() {
            Some(frame) => {
                self.reveal = frame.reveal;
                let due_at = self.now.saturating_add(frame.duration);
                self.timers
                    .schedule(round_id, due_at, TimerAction::Frame(index + 1));
                self.emit();
            }
            None => self.open_input(round_id),
        }
    }

    fn open_input(&mut self, round_id: RoundId) {
        self.phase = Phase::AwaitingInput;
        self.reveal = if self.config.presentation.visible_while_answering() {
            Reveal::Whole
        } else {
            Reveal::Hidden
        };

        if let (Some(limit), Some(round)) = (self.config.response_limit, &self.round) {
            let deadline = self.now.saturating_add(Millis::from(round.difficulty));
            self.deadline = Some(deadline);
            let next_tick = self.now.saturating_add(limit.tick_ms).min(deadline);
            self.timers.schedule(round_id, next_tick, TimerAction::Countdown);
        }

        debug!(variant = %self.config.name, round = %round_id, "awaiting input");
        self.emit();
    }

    fn countdown(&mut self) {
        let (Some(deadline), Some(round), Some(limit)) =
            (self.deadline, self.round.clone(), self.config.response_limit)
        else {
            return;
        };

        if self.now >= deadline {
            debug!(round = %round.id, "countdown expired");
            let response = Response::new(round.id, ResponseValue::NoAnswer, self.now);
            self.evaluate(&round, response);
            return;
        }

        let next_tick = self.now.saturating_add(limit.tick_ms).min(deadline);
        self.timers.schedule(round.id, next_tick, TimerAction::Countdown);
        self.emit();
    }

    fn evaluate(&mut self, round: &Round, response: Response) -> Verdict {
        self.timers.cancel();
        self.phase = Phase::Evaluating;
        let verdict = self.tracker.evaluate(round, &response);
        self.verdict = Some(verdict);
        self.emit();

        self.phase = Phase::Feedback;
        self.deadline = None;
        self.reveal = Reveal::Whole;
        let wait = self.config.feedback.for_outcome(verdict.correct);
        let due_at = self.now.saturating_add(wait);
        self.timers.schedule(round.id, due_at, TimerAction::FeedbackDone);
        self.emit();

        verdict
    }

    // === Helpers ===

    fn current_id(&self) -> Option<RoundId> {
        self.round.as_ref().map(|r| r.id)
    }

    /// The current round, if `round_id` may answer it right now.
    fn accepting(&self, round_id: RoundId) -> TrialResult<Arc<Round>> {
        match &self.round {
            Some(round) if round.id == round_id && self.phase.accepts_input() => Ok(Arc::clone(round)),
            _ => Err(TrialError::StaleResponse {
                expected: self.current_id().filter(|_| self.phase.accepts_input()),
                received: round_id,
            }),
        }
    }

    fn discard(&self, err: &TrialError) -> SubmitOutcome {
        debug!(phase = %self.phase, %err, "input discarded");
        SubmitOutcome::Discarded
    }

    /// `auto_submit` flag, or an error when the variant takes whole answers.
    fn incremental_mode(&self) -> TrialResult<bool> {
        match self.config.input {
            InputMode::Incremental { auto_submit } => Ok(auto_submit),
            InputMode::Single => Err(TrialError::invalid_input(format!(
                "{} takes whole responses",
                self.config.name
            ))),
        }
    }

    fn emit(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_snapshot(&snapshot);
        }
    }
}

impl std::fmt::Debug for RoundScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundScheduler")
            .field("variant", &self.config.name)
            .field("phase", &self.phase)
            .field("round", &self.current_id())
            .field("now", &self.now)
            .field("pending", &self.timers.pending())
            .finish_non_exhaustive()
    }
}
