//! Round scheduler integration tests.
//!
//! These drive complete sessions through the logical clock and check phase
//! timing, input handling, countdowns and stale-timer safety.

use std::sync::{Arc, Mutex};

use rust_trials::core::{ChoiceValue, Response, ResponseValue, RoundId, Stimulus};
use rust_trials::games::GameKind;
use rust_trials::scheduler::{Phase, Reveal, RoundScheduler, Snapshot, SubmitOutcome};
use rust_trials::TrialError;

fn symbols(scheduler: &RoundScheduler) -> Vec<u8> {
    match &scheduler.current_round().unwrap().stimulus {
        Stimulus::Sequence { symbols, .. } => symbols.to_vec(),
        other => panic!("expected a sequence, got {other:?}"),
    }
}

fn target_index(scheduler: &RoundScheduler) -> usize {
    match &scheduler.current_round().unwrap().stimulus {
        Stimulus::Choice(choice) => choice
            .options
            .iter()
            .position(|o| *o == choice.target)
            .unwrap(),
        other => panic!("expected a choice, got {other:?}"),
    }
}

fn round_id(scheduler: &RoundScheduler) -> RoundId {
    scheduler.current_round().unwrap().id
}

fn recorder(scheduler: &mut RoundScheduler) -> Arc<Mutex<Vec<Snapshot>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    scheduler.subscribe(move |s: &Snapshot| sink.lock().unwrap().push(s.clone()));
    log
}

// =============================================================================
// Presentation Timing
// =============================================================================

/// Digit span: 1.5s lead-in, then 800ms per digit plus a 200ms gap.
#[test]
fn test_digit_span_presentation_timing() {
    let mut scheduler = GameKind::DigitSpan.scheduler(42).unwrap();
    scheduler.start().unwrap();

    assert_eq!(scheduler.phase(), Phase::Presenting);
    assert_eq!(scheduler.snapshot().reveal, Reveal::Hidden);
    let digits = symbols(&scheduler);
    assert_eq!(digits.len(), 3);

    scheduler.advance_to(1_500);
    assert_eq!(
        scheduler.snapshot().reveal,
        Reveal::Symbol { index: 0, symbol: digits[0] }
    );

    scheduler.advance_to(2_300);
    assert_eq!(scheduler.snapshot().reveal, Reveal::Hidden);

    scheduler.advance_to(2_500);
    assert_eq!(
        scheduler.snapshot().reveal,
        Reveal::Symbol { index: 1, symbol: digits[1] }
    );

    scheduler.advance_to(4_499);
    assert_eq!(scheduler.phase(), Phase::Presenting);

    scheduler.advance_to(4_500);
    assert_eq!(scheduler.phase(), Phase::AwaitingInput);
    assert_eq!(scheduler.snapshot().reveal, Reveal::Hidden);
}

/// Dot counter flashes the field for `difficulty` ms.
#[test]
fn test_dot_counter_flash() {
    let mut scheduler = GameKind::DotCounter.scheduler(5).unwrap();
    scheduler.start().unwrap();

    assert_eq!(scheduler.phase(), Phase::Presenting);
    assert_eq!(scheduler.snapshot().reveal, Reveal::Whole);

    scheduler.advance_by(999);
    assert_eq!(scheduler.phase(), Phase::Presenting);
    scheduler.advance_by(1);
    assert_eq!(scheduler.phase(), Phase::AwaitingInput);
    assert_eq!(scheduler.snapshot().reveal, Reveal::Hidden);
}

/// Choice variants go straight to input with the stimulus visible.
#[test]
fn test_immediate_presentation() {
    for game in [GameKind::Fractions, GameKind::MathGrid, GameKind::ColorInterference] {
        let mut scheduler = game.scheduler(1).unwrap();
        scheduler.start().unwrap();
        assert_eq!(scheduler.phase(), Phase::AwaitingInput, "{game}");
        assert_eq!(scheduler.snapshot().reveal, Reveal::Whole, "{game}");
    }
}

// =============================================================================
// Input Handling
// =============================================================================

/// Input while Presenting is discarded and never scored.
#[test]
fn test_input_during_presenting_discarded() {
    let mut scheduler = GameKind::DigitSpan.scheduler(42).unwrap();
    scheduler.start().unwrap();
    let id = round_id(&scheduler);

    assert_eq!(scheduler.submit_text(id, "123").unwrap(), SubmitOutcome::Discarded);
    assert_eq!(scheduler.push_symbol(id, 1).unwrap(), SubmitOutcome::Discarded);
    assert_eq!(scheduler.score().total_count, 0);
    assert_eq!(scheduler.phase(), Phase::Presenting);
}

/// Digit span buffers digits, ignores extras and needs a full buffer.
#[test]
fn test_incremental_entry_without_auto_submit() {
    let mut scheduler = GameKind::DigitSpan.scheduler(42).unwrap();
    scheduler.start().unwrap();
    scheduler.advance_to(4_500);

    let id = round_id(&scheduler);
    let digits = symbols(&scheduler);

    scheduler.push_symbol(id, digits[0]).unwrap();
    assert!(matches!(
        scheduler.submit_input(id),
        Err(TrialError::InvalidInput { .. })
    ));

    scheduler.push_symbol(id, digits[1]).unwrap();
    assert_eq!(
        scheduler.push_symbol(id, digits[2]).unwrap(),
        SubmitOutcome::Buffered { len: 3 }
    );
    // Past the bound
    assert_eq!(
        scheduler.push_symbol(id, 0).unwrap(),
        SubmitOutcome::Buffered { len: 3 }
    );
    assert_eq!(scheduler.phase(), Phase::AwaitingInput);

    // Pop and re-enter the last digit
    scheduler.pop_symbol(id).unwrap();
    scheduler.push_symbol(id, digits[2]).unwrap();

    let outcome = scheduler.submit_input(id).unwrap();
    assert!(matches!(outcome, SubmitOutcome::Evaluated(v) if v.correct));
    assert_eq!(scheduler.phase(), Phase::Feedback);
    assert_eq!(scheduler.score().current_difficulty, 4);
}

/// Symbols outside the alphabet are rejected without leaving the phase.
#[test]
fn test_symbol_outside_alphabet() {
    let mut scheduler = GameKind::PatternMemory.scheduler(3).unwrap();
    scheduler.start().unwrap();
    scheduler.advance_to(3_900);
    assert_eq!(scheduler.phase(), Phase::AwaitingInput);

    let id = round_id(&scheduler);
    assert!(matches!(
        scheduler.push_symbol(id, 6),
        Err(TrialError::InvalidInput { .. })
    ));
    assert_eq!(scheduler.snapshot().input.len(), 0);
}

/// Pattern memory submits as soon as the last pad is entered.
#[test]
fn test_pattern_memory_auto_submit() {
    let mut scheduler = GameKind::PatternMemory.scheduler(3).unwrap();
    scheduler.start().unwrap();
    // 1.5s lead-in plus 3 pads at 800ms with no gaps
    scheduler.advance_to(3_899);
    assert_eq!(scheduler.phase(), Phase::Presenting);
    scheduler.advance_to(3_900);
    assert_eq!(scheduler.phase(), Phase::AwaitingInput);

    let id = round_id(&scheduler);
    let pads = symbols(&scheduler);

    assert_eq!(
        scheduler.push_symbol(id, pads[0]).unwrap(),
        SubmitOutcome::Buffered { len: 1 }
    );
    scheduler.push_symbol(id, pads[1]).unwrap();
    let outcome = scheduler.push_symbol(id, pads[2]).unwrap();

    assert!(matches!(outcome, SubmitOutcome::Evaluated(v) if v.correct));
    assert_eq!(scheduler.phase(), Phase::Feedback);
}

/// Malformed text is an error and leaves the round open.
#[test]
fn test_invalid_text_keeps_round_open() {
    let mut scheduler = GameKind::DotCounter.scheduler(5).unwrap();
    scheduler.start().unwrap();
    scheduler.advance_by(1_000);
    let id = round_id(&scheduler);

    assert!(matches!(
        scheduler.submit_text(id, "lots"),
        Err(TrialError::InvalidInput { .. })
    ));
    assert_eq!(scheduler.phase(), Phase::AwaitingInput);
    assert_eq!(scheduler.score().total_count, 0);
}

/// Option indices outside the option list are rejected.
#[test]
fn test_option_index_out_of_range() {
    let mut scheduler = GameKind::MathGrid.scheduler(8).unwrap();
    scheduler.start().unwrap();
    let id = round_id(&scheduler);

    assert!(matches!(
        scheduler.select_option(id, 4),
        Err(TrialError::InvalidInput { .. })
    ));
    assert_eq!(scheduler.phase(), Phase::AwaitingInput);
}

/// A response for a previous round is discarded.
#[test]
fn test_late_response_discarded() {
    let mut scheduler = GameKind::Fractions.scheduler(11).unwrap();
    scheduler.start().unwrap();
    let first = round_id(&scheduler);

    let index = target_index(&scheduler);
    scheduler.select_option(first, index).unwrap();
    assert_eq!(scheduler.phase(), Phase::Feedback);

    // Second answer during feedback
    assert_eq!(
        scheduler.select_option(first, index).unwrap(),
        SubmitOutcome::Discarded
    );

    scheduler.advance_by(2_000);
    assert_eq!(scheduler.phase(), Phase::AwaitingInput);
    assert_eq!(round_id(&scheduler), first.next());

    // Answer addressed to round 1 while round 2 is open
    let response = Response::new(first, ResponseValue::Choice(ChoiceValue::Number(1)), 0);
    assert_eq!(
        scheduler.submit_response(response).unwrap(),
        SubmitOutcome::Discarded
    );
    assert_eq!(scheduler.score().total_count, 1);
}

// =============================================================================
// Feedback and Adaptation
// =============================================================================

/// Wrong answers hold feedback for the failure duration and step down.
#[test]
fn test_failure_feedback_then_next_round() {
    let mut scheduler = GameKind::DigitSpan.scheduler(42).unwrap();
    scheduler.start().unwrap();
    scheduler.advance_to(4_500);

    let id = round_id(&scheduler);
    let mut wrong = symbols(&scheduler);
    wrong[0] = (wrong[0] + 1) % 10;
    let text: String = wrong.iter().map(|d| d.to_string()).collect();

    let outcome = scheduler.submit_text(id, &text).unwrap();
    assert!(matches!(outcome, SubmitOutcome::Evaluated(v) if !v.correct));
    assert_eq!(scheduler.score().current_difficulty, 3);

    scheduler.advance_by(2_999);
    assert_eq!(scheduler.phase(), Phase::Feedback);
    scheduler.advance_by(1);
    assert_eq!(scheduler.phase(), Phase::Presenting);
    assert_eq!(round_id(&scheduler), id.next());
    assert_eq!(scheduler.current_round().unwrap().difficulty, 3);
}

/// A correct dot count shortens the next flash by 50ms.
#[test]
fn test_dot_counter_speeds_up() {
    let mut scheduler = GameKind::DotCounter.scheduler(5).unwrap();
    scheduler.start().unwrap();
    scheduler.advance_by(1_000);

    let id = round_id(&scheduler);
    let count = match &scheduler.current_round().unwrap().stimulus {
        Stimulus::Dots { dots } => dots.len(),
        other => panic!("expected dots, got {other:?}"),
    };
    let outcome = scheduler.submit_text(id, &count.to_string()).unwrap();
    assert!(matches!(outcome, SubmitOutcome::Evaluated(v) if v.correct));

    scheduler.advance_by(2_000);
    assert_eq!(scheduler.current_round().unwrap().difficulty, 950);
}

// =============================================================================
// Countdown
// =============================================================================

/// Colour interference times out with a synthetic no-answer.
#[test]
fn test_countdown_expiry() {
    let mut scheduler = GameKind::ColorInterference.scheduler(9).unwrap();
    let log = recorder(&mut scheduler);
    scheduler.start().unwrap();
    assert_eq!(scheduler.snapshot().time_remaining_ms, Some(3_000));

    scheduler.advance_to(1_000);
    assert_eq!(scheduler.snapshot().time_remaining_ms, Some(2_000));
    assert_eq!(scheduler.phase(), Phase::AwaitingInput);

    scheduler.advance_to(3_000);
    assert_eq!(scheduler.phase(), Phase::Feedback);

    let verdict = scheduler.snapshot().verdict.unwrap();
    assert!(!verdict.correct);
    assert!(verdict.timed_out);
    // Timed policy holds on failure
    assert_eq!(scheduler.score().current_difficulty, 3_000);
    assert_eq!(scheduler.snapshot().time_remaining_ms, None);

    let ticks = log
        .lock()
        .unwrap()
        .iter()
        .filter(|s| s.phase == Phase::AwaitingInput)
        .count();
    // Opening snapshot plus a tick every 100ms before expiry
    assert_eq!(ticks, 30);
}

/// Answering before expiry cancels the countdown.
#[test]
fn test_countdown_cancelled_by_answer() {
    let mut scheduler = GameKind::ColorInterference.scheduler(9).unwrap();
    scheduler.start().unwrap();
    scheduler.advance_to(1_250);

    let id = round_id(&scheduler);
    let index = target_index(&scheduler);
    let outcome = scheduler.select_option(id, index).unwrap();
    assert!(matches!(outcome, SubmitOutcome::Evaluated(v) if v.correct && !v.timed_out));
    assert_eq!(scheduler.score().current_difficulty, 2_900);

    scheduler.advance_to(3_249);
    assert_eq!(scheduler.phase(), Phase::Feedback);
    scheduler.advance_to(3_250);
    assert_eq!(scheduler.phase(), Phase::AwaitingInput);
    assert_eq!(scheduler.snapshot().time_remaining_ms, Some(2_900));
}

// =============================================================================
// Reset and Stale Timers
// =============================================================================

/// Reset mid-presentation cancels the reveal; the old timer is inert.
#[test]
fn test_reset_mid_presenting_with_stale_timer() {
    let mut scheduler = GameKind::DigitSpan.scheduler(42).unwrap();
    scheduler.start().unwrap();
    scheduler.advance_to(1_600);
    let stale = scheduler.pending_timer().unwrap();

    scheduler.reset();
    assert_eq!(scheduler.phase(), Phase::Idle);
    assert!(scheduler.pending_timer().is_none());

    assert!(!scheduler.fire(stale));
    assert_eq!(scheduler.phase(), Phase::Idle);
    assert!(scheduler.current_round().is_none());

    // Round 1 again, yet the old timer still does nothing
    scheduler.start().unwrap();
    assert_eq!(round_id(&scheduler), RoundId::new(1));
    let before = scheduler.snapshot();
    assert!(!scheduler.fire(stale));
    assert_eq!(scheduler.snapshot(), before);
    assert_eq!(scheduler.score().total_count, 0);
}

/// A replaced timer cannot fire.
#[test]
fn test_superseded_timer_is_stale() {
    let mut scheduler = GameKind::DigitSpan.scheduler(42).unwrap();
    scheduler.start().unwrap();
    let lead_in = scheduler.pending_timer().unwrap();
    scheduler.advance_to(1_500);

    assert!(!scheduler.fire(lead_in));
    let current = scheduler.pending_timer().unwrap();
    assert!(scheduler.fire(current));
}

/// New game clears the score and presents round 1.
#[test]
fn test_new_game() {
    let mut scheduler = GameKind::Fractions.scheduler(2).unwrap();
    scheduler.start().unwrap();
    let id = round_id(&scheduler);
    let index = target_index(&scheduler);
    scheduler.select_option(id, index).unwrap();
    assert_eq!(scheduler.score().correct_count, 1);

    scheduler.new_game().unwrap();
    assert_eq!(scheduler.phase(), Phase::AwaitingInput);
    assert_eq!(round_id(&scheduler), RoundId::new(1));
    assert_eq!(scheduler.score().total_count, 0);
    assert!(scheduler.score().history.is_empty());
}

// =============================================================================
// Snapshots and Determinism
// =============================================================================

/// Evaluation is visible to observers before feedback.
#[test]
fn test_snapshot_sequence() {
    let mut scheduler = GameKind::MathGrid.scheduler(4).unwrap();
    let log = recorder(&mut scheduler);
    scheduler.start().unwrap();
    let id = round_id(&scheduler);
    let index = target_index(&scheduler);
    scheduler.select_option(id, index).unwrap();
    scheduler.advance_by(1_500);

    let phases: Vec<Phase> = log.lock().unwrap().iter().map(|s| s.phase).collect();
    assert_eq!(
        phases,
        vec![
            Phase::AwaitingInput,
            Phase::Evaluating,
            Phase::Feedback,
            Phase::AwaitingInput,
        ]
    );

    let log = log.lock().unwrap();
    assert!(log[1].verdict.unwrap().correct);
    assert_eq!(log[2].score.correct_count, 1);
}

/// Same seed, same session.
#[test]
fn test_same_seed_same_rounds() {
    let mut a = GameKind::DigitSpan.scheduler(77).unwrap();
    let mut b = GameKind::DigitSpan.scheduler(77).unwrap();
    a.start().unwrap();
    b.start().unwrap();

    assert_eq!(a.current_round(), b.current_round());
    assert_eq!(a.rng_state(), b.rng_state());
}

/// Scheduler errors on bad configs at construction.
#[test]
fn test_bad_config_rejected() {
    let config = GameKind::DotCounter.config().with_initial_difficulty(200);
    assert!(RoundScheduler::new(config, 0).is_err());
}
