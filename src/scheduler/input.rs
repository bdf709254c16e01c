//! Response validation at the UI boundary.
//!
//! Malformed payloads are rejected here with `TrialError::InvalidInput`
//! before they can reach the score tracker.

use crate::core::{ResponseValue, Stimulus, Symbols};
use crate::error::{TrialError, TrialResult};

/// Check that `value` is a well-formed answer to `stimulus`.
pub(crate) fn validate(stimulus: &Stimulus, value: &ResponseValue) -> TrialResult<()> {
    match (stimulus, value) {
        (Stimulus::Sequence { alphabet, .. }, ResponseValue::Sequence(given)) => {
            if given.is_empty() {
                return Err(TrialError::invalid_input("empty sequence"));
            }
            if let Some(bad) = given.iter().find(|&&s| s >= *alphabet) {
                return Err(TrialError::invalid_input(format!(
                    "symbol {bad} outside alphabet of {alphabet}"
                )));
            }
            Ok(())
        }
        (Stimulus::Dots { .. }, ResponseValue::Count(_)) => Ok(()),
        (Stimulus::Choice(choice), ResponseValue::Choice(v)) => {
            if choice.options.contains(v) {
                Ok(())
            } else {
                Err(TrialError::invalid_input(format!("{v:?} is not one of the options")))
            }
        }
        (_, ResponseValue::NoAnswer) => Err(TrialError::invalid_input(
            "no-answer is reserved for expired countdowns",
        )),
        (stimulus, value) => Err(TrialError::invalid_input(format!(
            "{} response for a {} round",
            value_kind(value),
            stimulus.kind()
        ))),
    }
}

/// Parse free text typed by the player into a response for `stimulus`.
///
/// - sequences: a run of digits, e.g. `"417"`
/// - dot counts: a whole number
/// - choices: a zero-based option index
pub(crate) fn parse_text(stimulus: &Stimulus, text: &str) -> TrialResult<ResponseValue> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TrialError::invalid_input("empty response"));
    }

    match stimulus {
        Stimulus::Sequence { alphabet, .. } => {
            let symbols = text
                .chars()
                .map(|c| {
                    c.to_digit(10)
                        .filter(|&d| d < u32::from(*alphabet))
                        .map(|d| d as u8)
                        .ok_or_else(|| {
                            TrialError::invalid_input(format!("'{c}' is not a valid symbol"))
                        })
                })
                .collect::<TrialResult<Symbols>>()?;
            Ok(ResponseValue::Sequence(symbols))
        }
        Stimulus::Dots { .. } => text
            .parse::<u32>()
            .map(ResponseValue::Count)
            .map_err(|_| TrialError::invalid_input(format!("'{text}' is not a whole number"))),
        Stimulus::Choice(choice) => {
            let index = text
                .parse::<usize>()
                .map_err(|_| TrialError::invalid_input(format!("'{text}' is not an option index")))?;
            choice
                .options
                .get(index)
                .copied()
                .map(ResponseValue::Choice)
                .ok_or_else(|| TrialError::invalid_input(format!("no option at index {index}")))
        }
    }
}

fn value_kind(value: &ResponseValue) -> &'static str {
    match value {
        ResponseValue::Sequence(_) => "sequence",
        ResponseValue::Count(_) => "count",
        ResponseValue::Choice(_) => "choice",
        ResponseValue::NoAnswer => "no-answer",
    }
}
