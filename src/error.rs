//! Error taxonomy for the trial engine.
//!
//! Only `Configuration` and `InvalidInput` ever reach a caller.
//! `StaleResponse` is produced while validating a response and is swallowed
//! by the scheduler, which reports the submission as discarded instead.

use thiserror::Error;

use crate::core::RoundId;

/// Errors raised by round generation, configuration and input handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrialError {
    /// Invalid difficulty or variant configuration.
    #[error("invalid configuration for {variant}: {reason}")]
    Configuration { variant: String, reason: String },

    /// A response arrived for a round that is no longer current.
    #[error("stale response for {received}, current round is {expected:?}")]
    StaleResponse {
        expected: Option<RoundId>,
        received: RoundId,
    },

    /// Malformed response payload, rejected before scoring.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl TrialError {
    pub(crate) fn configuration(variant: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            variant: variant.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// True for errors the scheduler drops silently.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleResponse { .. })
    }
}

/// Convenience alias used throughout the crate.
pub type TrialResult<T> = Result<T, TrialError>;
