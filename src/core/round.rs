//! Rounds, stimuli and responses.
//!
//! A `Round` is immutable once generated. A `Response` is created at the UI
//! boundary and consumed once by the score tracker.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ids::RoundId;

/// Sequence of symbols (digits, colour indices).
///
/// Inline up to 20 symbols, the digit-span ceiling. Longer custom spans
/// spill to the heap.
pub type Symbols = SmallVec<[u8; 20]>;

/// Logical milliseconds since the session clock started.
pub type Millis = u64;

/// One trial: a stimulus plus everything needed to score a response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    /// Difficulty the round was generated at.
    pub difficulty: u32,
    pub stimulus: Stimulus,
    pub created_at: Millis,
}

impl Round {
    /// Number of symbols expected back for sequence stimuli, 0 otherwise.
    #[must_use]
    pub fn expected_len(&self) -> usize {
        match &self.stimulus {
            Stimulus::Sequence { symbols, .. } => symbols.len(),
            _ => 0,
        }
    }
}

/// The payload presented to the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Stimulus {
    /// Symbols revealed one at a time, to be recalled in order.
    Sequence { symbols: Symbols, alphabet: u8 },
    /// A field of dots flashed briefly, to be counted.
    Dots { dots: Vec<Dot> },
    /// A prompt with a fixed set of distinct options.
    Choice(ChoiceStimulus),
}

impl Stimulus {
    /// Short name of the payload kind, for logs and errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Stimulus::Sequence { .. } => "sequence",
            Stimulus::Dots { .. } => "dots",
            Stimulus::Choice(_) => "choice",
        }
    }
}

/// Dot position in percent of the container, both axes in `[10, 90)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
}

impl Dot {
    #[must_use]
    pub fn distance(&self, other: &Dot) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Palette shared by pattern memory and colour interference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Blue => "BLUE",
            Color::Green => "GREEN",
            Color::Yellow => "YELLOW",
            Color::Purple => "PURPLE",
            Color::Orange => "ORANGE",
        }
    }

    /// Colour at a palette index, if in range.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A fraction compared structurally: 2/4 and 1/2 are different options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fraction {
    pub numerator: u32,
    pub denominator: u32,
}

impl Fraction {
    #[must_use]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

impl std::fmt::Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Value carried by a multiple-choice option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceValue {
    Number(i64),
    Fraction(Fraction),
    Color(Color),
}

/// What a multiple-choice round shows above its options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoicePrompt {
    /// Pie chart with `numerator` of `denominator` slices filled.
    Pie(Fraction),
    /// Grid of `rows × cols` cells, drawn from a board of `size`.
    Grid { rows: u32, cols: u32, size: u32 },
    /// Colour word printed in an ink colour; option buttons get their own
    /// inks, never matching the colour they name.
    ColorWord {
        word: Color,
        ink: Color,
        option_inks: SmallVec<[Color; 4]>,
    },
}

/// Multiple-choice stimulus. `options` never contains duplicates and always
/// contains `target`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceStimulus {
    pub prompt: ChoicePrompt,
    pub options: SmallVec<[ChoiceValue; 4]>,
    pub target: ChoiceValue,
}

/// A player's answer to one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub round_id: RoundId,
    pub value: ResponseValue,
    pub submitted_at: Millis,
}

impl Response {
    #[must_use]
    pub fn new(round_id: RoundId, value: ResponseValue, submitted_at: Millis) -> Self {
        Self {
            round_id,
            value,
            submitted_at,
        }
    }
}

/// Response payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseValue {
    Sequence(Symbols),
    Count(u32),
    Choice(ChoiceValue),
    /// Synthesized when a countdown expires. Never accepted from the UI.
    NoAnswer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DifficultyPolicy, SourceSpec};
    use crate::games::GameKind;
    use smallvec::smallvec;

    #[test]
    fn test_preset_spans_stay_inline() {
        for game in GameKind::all() {
            let config = game.config();
            if !matches!(config.source, SourceSpec::Sequence { .. }) {
                continue;
            }
            let DifficultyPolicy::Stepped { ceiling, .. } = config.adaptation else {
                panic!("{game} should use stepped adaptation");
            };
            let longest = Symbols::from_elem(0, ceiling as usize);
            assert!(!longest.spilled(), "{game} spills at {ceiling}");
        }
    }

    #[test]
    fn test_expected_len() {
        let round = Round {
            id: RoundId::new(1),
            difficulty: 3,
            stimulus: Stimulus::Sequence {
                symbols: smallvec![4, 1, 7],
                alphabet: 10,
            },
            created_at: 0,
        };
        assert_eq!(round.expected_len(), 3);
        assert_eq!(round.stimulus.kind(), "sequence");
    }

    #[test]
    fn test_dot_distance() {
        let a = Dot { x: 10.0, y: 10.0 };
        let b = Dot { x: 13.0, y: 14.0 };
        assert!((a.distance(&b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_color_palette() {
        assert_eq!(Color::from_index(0), Some(Color::Red));
        assert_eq!(Color::from_index(5), Some(Color::Orange));
        assert_eq!(Color::from_index(6), None);
        assert_eq!(Color::Purple.to_string(), "PURPLE");
    }

    #[test]
    fn test_fraction_is_structural() {
        assert_ne!(Fraction::new(1, 2), Fraction::new(2, 4));
        assert_eq!(Fraction::new(3, 8).to_string(), "3/8");
    }

    #[test]
    fn test_response_serde() {
        let response = Response::new(
            RoundId::new(4),
            ResponseValue::Choice(ChoiceValue::Fraction(Fraction::new(1, 3))),
            1_500,
        );
        let json = serde_json::to_string(&response).unwrap();
        let back: Response = serde_json::from_str(&json).unwrap();
        assert_eq!(response, back);
    }
}
