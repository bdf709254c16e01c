//! Multiple-choice sources: fractions, grid products, colour words.
//!
//! Every source returns four distinct options, shuffled, one of which is the
//! target.

use smallvec::SmallVec;

use crate::core::{
    ChoicePrompt, ChoiceStimulus, ChoiceValue, Color, Fraction, Stimulus, TrialRng, MAX_GRID_SIZE,
};

use super::StimulusSource;

/// Options per multiple-choice round.
pub const OPTION_COUNT: usize = 4;

/// Denominators used when none (or too few) are configured.
pub const DEFAULT_DENOMINATORS: [u32; 8] = [2, 3, 4, 5, 6, 8, 10, 12];

fn shuffled_options(
    target: ChoiceValue,
    distractors: impl IntoIterator<Item = ChoiceValue>,
    rng: &mut TrialRng,
) -> SmallVec<[ChoiceValue; 4]> {
    let mut options: SmallVec<[ChoiceValue; 4]> = SmallVec::new();
    options.push(target);
    options.extend(distractors);
    rng.shuffle(&mut options);
    options
}

// =============================================================================
// Fractions
// =============================================================================

/// Pie-chart fractions: pick a denominator, then a numerator in
/// `1..=denominator`.
#[derive(Clone, Debug)]
pub struct FractionSource {
    denominators: Vec<u32>,
}

impl FractionSource {
    /// Falls back to `DEFAULT_DENOMINATORS` when the list cannot yield four
    /// distinct fractions.
    #[must_use]
    pub fn new(mut denominators: Vec<u32>) -> Self {
        denominators.sort_unstable();
        denominators.dedup();
        let usable = denominators.iter().all(|&d| d > 0)
            && denominators.iter().sum::<u32>() >= OPTION_COUNT as u32;
        Self {
            denominators: if usable {
                denominators
            } else {
                DEFAULT_DENOMINATORS.to_vec()
            },
        }
    }

    fn draw(&self, rng: &mut TrialRng) -> Fraction {
        let denominator = rng.choose(&self.denominators).copied().unwrap_or(2);
        let numerator = rng.gen_inclusive(1..=denominator);
        Fraction::new(numerator, denominator)
    }
}

impl Default for FractionSource {
    fn default() -> Self {
        Self::new(DEFAULT_DENOMINATORS.to_vec())
    }
}

impl StimulusSource for FractionSource {
    fn stimulus(&self, _difficulty: u32, rng: &mut TrialRng) -> Stimulus {
        let fraction = self.draw(rng);

        let mut wrong: SmallVec<[Fraction; 3]> = SmallVec::new();
        while wrong.len() < OPTION_COUNT - 1 {
            let candidate = self.draw(rng);
            if candidate != fraction && !wrong.contains(&candidate) {
                wrong.push(candidate);
            }
        }

        let target = ChoiceValue::Fraction(fraction);
        let options = shuffled_options(target, wrong.into_iter().map(ChoiceValue::Fraction), rng);

        Stimulus::Choice(ChoiceStimulus {
            prompt: ChoicePrompt::Pie(fraction),
            options,
            target,
        })
    }
}

// =============================================================================
// Grid products
// =============================================================================

/// `rows × cols` counting grids. The difficulty is the largest board side.
///
/// Distractors are "near misses" (target -5..+4) half the time and
/// arbitrary cell counts on the board otherwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridProductSource;

impl StimulusSource for GridProductSource {
    fn stimulus(&self, difficulty: u32, rng: &mut TrialRng) -> Stimulus {
        let size = rng.gen_inclusive(2..=difficulty.clamp(2, MAX_GRID_SIZE));
        let rows = rng.gen_inclusive(1..=size);
        let cols = rng.gen_inclusive(1..=size);
        let answer = i64::from(rows) * i64::from(cols);
        let board = i64::from(size) * i64::from(size);

        let mut wrong: SmallVec<[i64; 3]> = SmallVec::new();
        while wrong.len() < OPTION_COUNT - 1 {
            let candidate = if rng.gen_bool(0.5) {
                answer + rng.gen_range_i64(-5..5)
            } else {
                rng.gen_range_i64(1..board + 1)
            };
            if candidate > 0 && candidate != answer && !wrong.contains(&candidate) {
                wrong.push(candidate);
            }
        }

        let target = ChoiceValue::Number(answer);
        let options = shuffled_options(target, wrong.into_iter().map(ChoiceValue::Number), rng);

        Stimulus::Choice(ChoiceStimulus {
            prompt: ChoicePrompt::Grid { rows, cols, size },
            options,
            target,
        })
    }
}

// =============================================================================
// Colour interference
// =============================================================================

/// Colour word printed in an independently drawn ink. The answer is the ink.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorInterferenceSource;

impl StimulusSource for ColorInterferenceSource {
    fn stimulus(&self, _difficulty: u32, rng: &mut TrialRng) -> Stimulus {
        let word = Color::ALL[rng.gen_range(0..Color::ALL.len() as u32) as usize];
        let ink = Color::ALL[rng.gen_range(0..Color::ALL.len() as u32) as usize];

        let mut palette = Color::ALL;
        rng.shuffle(&mut palette);
        let distractors = palette
            .into_iter()
            .filter(|&c| c != ink)
            .take(OPTION_COUNT - 1)
            .map(ChoiceValue::Color);

        let target = ChoiceValue::Color(ink);
        let options = shuffled_options(target, distractors, rng);

        // Each button is drawn in some colour other than the one it names.
        let option_inks = options
            .iter()
            .map(|option| {
                let named = match option {
                    ChoiceValue::Color(c) => Some(*c),
                    _ => None,
                };
                let others: SmallVec<[Color; 6]> =
                    Color::ALL.into_iter().filter(|&c| Some(c) != named).collect();
                others[rng.gen_range(0..others.len() as u32) as usize]
            })
            .collect();

        Stimulus::Choice(ChoiceStimulus {
            prompt: ChoicePrompt::ColorWord {
                word,
                ink,
                option_inks,
            },
            options,
            target,
        })
    }
}
