//! Dot fields for the counting game.

use tracing::trace;

use crate::core::{Dot, Stimulus, TrialRng};

use super::StimulusSource;

/// Lower edge of the placement area, in percent.
const AREA_MIN: f64 = 10.0;
/// Upper edge of the placement area (exclusive), in percent.
const AREA_MAX: f64 = 90.0;

/// Random dot field with a soft minimum spacing.
///
/// Each dot is placed by rejection sampling: up to `max_attempts` candidate
/// positions are tried, and the first one further than `min_distance` from
/// every placed dot wins. If every attempt fails, a fresh unconstrained
/// position is accepted so generation always terminates.
///
/// The difficulty is the flash duration and does not shape the field.
#[derive(Clone, Copy, Debug)]
pub struct DotFieldSource {
    pub min_count: u32,
    pub max_count: u32,
    pub min_distance: f64,
    pub max_attempts: u32,
}

impl DotFieldSource {
    fn random_dot(rng: &mut TrialRng) -> Dot {
        Dot {
            x: rng.gen_range_f64(AREA_MIN..AREA_MAX),
            y: rng.gen_range_f64(AREA_MIN..AREA_MAX),
        }
    }

    fn place(&self, placed: &[Dot], rng: &mut TrialRng) -> Dot {
        for _ in 0..self.max_attempts {
            let candidate = Self::random_dot(rng);
            if placed
                .iter()
                .all(|dot| dot.distance(&candidate) > self.min_distance)
            {
                return candidate;
            }
        }

        trace!(
            placed = placed.len(),
            attempts = self.max_attempts,
            "spacing not satisfiable, placing dot unconstrained"
        );
        Self::random_dot(rng)
    }
}

impl StimulusSource for DotFieldSource {
    fn stimulus(&self, _difficulty: u32, rng: &mut TrialRng) -> Stimulus {
        let count = rng.gen_inclusive(self.min_count..=self.max_count);
        let mut dots = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let dot = self.place(&dots, rng);
            dots.push(dot);
        }

        Stimulus::Dots { dots }
    }
}
