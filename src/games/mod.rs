//! Bundled game variants.
//!
//! Every timed-round game is the same engine with a different
//! `VariantConfig`; `GameKind` names them and builds ready-to-run
//! schedulers. Word typing has no rounds and lives in `typing`.

pub mod presets;
pub mod typing;

pub use typing::{TypingRun, TypingStatus};

use serde::{Deserialize, Serialize};

use crate::core::VariantConfig;
use crate::error::TrialResult;
use crate::scheduler::RoundScheduler;

/// The timed-round games shipped with the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    DigitSpan,
    PatternMemory,
    DotCounter,
    ColorInterference,
    Fractions,
    MathGrid,
}

impl GameKind {
    /// All games, in menu order.
    #[must_use]
    pub fn all() -> &'static [GameKind] {
        &[
            GameKind::DigitSpan,
            GameKind::PatternMemory,
            GameKind::DotCounter,
            GameKind::ColorInterference,
            GameKind::Fractions,
            GameKind::MathGrid,
        ]
    }

    /// Short identifier, also the `VariantConfig` name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GameKind::DigitSpan => "digit-span",
            GameKind::PatternMemory => "pattern-memory",
            GameKind::DotCounter => "dot-counter",
            GameKind::ColorInterference => "color-interference",
            GameKind::Fractions => "fractions",
            GameKind::MathGrid => "math-grid",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            GameKind::DigitSpan => "Remember and type back a growing string of digits",
            GameKind::PatternMemory => "Repeat a sequence of coloured pads",
            GameKind::DotCounter => "Count the dots before they disappear",
            GameKind::ColorInterference => "Pick the ink colour, not the word",
            GameKind::Fractions => "Match the shaded pie to its fraction",
            GameKind::MathGrid => "Count the cells of a highlighted block",
        }
    }

    /// Preset configuration for this game.
    #[must_use]
    pub fn config(self) -> VariantConfig {
        match self {
            GameKind::DigitSpan => presets::digit_span(),
            GameKind::PatternMemory => presets::pattern_memory(),
            GameKind::DotCounter => presets::dot_counter(),
            GameKind::ColorInterference => presets::color_interference(),
            GameKind::Fractions => presets::fractions(),
            GameKind::MathGrid => presets::math_grid(),
        }
    }

    /// An idle scheduler running this game's preset.
    pub fn scheduler(self, seed: u64) -> TrialResult<RoundScheduler> {
        RoundScheduler::new(self.config(), seed)
    }

    /// Look a game up by `name()`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<GameKind> {
        Self::all().iter().copied().find(|g| g.name() == name)
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
