//! Word-by-word passage typing.
//!
//! Unlike the timed-round games there is no scheduler here: the host feeds
//! the input field's contents on every change and `TypingRun` reports how
//! the current word is going. Passages come from the caller.

use serde::{Deserialize, Serialize};

use crate::core::{Millis, TrialRng};
use crate::error::{TrialError, TrialResult};

/// State of the input field after an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypingStatus {
    /// Field is empty.
    Idle,
    /// Input is a prefix of the current word.
    Matching,
    /// Input has diverged from the current word.
    Mismatch,
    /// The current word was typed exactly; the field should be cleared.
    WordComplete,
    /// The last word was typed.
    PassageComplete,
}

/// Progress through one passage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingRun {
    words: Vec<String>,
    current: usize,
    started_at: Option<Millis>,
    finished_at: Option<Millis>,
}

impl TypingRun {
    /// Split `passage` on whitespace. Fails if it has no words.
    pub fn new(passage: &str) -> TrialResult<Self> {
        let words: Vec<String> = passage.split_whitespace().map(str::to_owned).collect();
        if words.is_empty() {
            return Err(TrialError::invalid_input("passage has no words"));
        }
        Ok(Self {
            words,
            current: 0,
            started_at: None,
            finished_at: None,
        })
    }

    /// Start a run on a passage picked uniformly from `passages`.
    pub fn pick<S: AsRef<str>>(passages: &[S], rng: &mut TrialRng) -> TrialResult<Self> {
        let passage = rng
            .choose(passages)
            .ok_or_else(|| TrialError::invalid_input("no passages to choose from"))?;
        Self::new(passage.as_ref())
    }

    /// Feed the field's current contents, typed at `now`.
    ///
    /// The first update starts the clock. Surrounding whitespace is ignored.
    pub fn update(&mut self, input: &str, now: Millis) -> TypingStatus {
        if self.is_complete() {
            return TypingStatus::PassageComplete;
        }
        self.started_at.get_or_insert(now);

        let input = input.trim();
        let word = self.words[self.current].as_str();

        if input == word {
            self.current += 1;
            if self.current == self.words.len() {
                self.finished_at = Some(now);
                return TypingStatus::PassageComplete;
            }
            return TypingStatus::WordComplete;
        }

        if input.is_empty() {
            TypingStatus::Idle
        } else if word.starts_with(input) {
            TypingStatus::Matching
        } else {
            TypingStatus::Mismatch
        }
    }

    /// The word to type next, or `None` once complete.
    #[must_use]
    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.current).map(String::as_str)
    }

    #[must_use]
    pub fn completed_words(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Milliseconds from the first keystroke to the last word.
    #[must_use]
    pub fn elapsed_ms(&self) -> Option<Millis> {
        Some(self.finished_at?.saturating_sub(self.started_at?))
    }

    /// Rounded words per minute, once the passage is complete.
    #[must_use]
    pub fn words_per_minute(&self) -> Option<u32> {
        // Sub-millisecond runs count as 1ms
        let elapsed = self.elapsed_ms()?.max(1) as f64;
        let minutes = elapsed / 60_000.0;
        Some((self.completed_words() as f64 / minutes).round() as u32)
    }

    /// Restart the same passage.
    pub fn reset(&mut self) {
        self.current = 0;
        self.started_at = None;
        self.finished_at = None;
    }
}
