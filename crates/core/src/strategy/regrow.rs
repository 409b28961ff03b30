//! Post-fire regrowth transition
//!
//! Applied after a burn has run its course: burnt vegetation recovers,
//! either from a dormant seed bank early in the run or by seeds spreading
//! from living neighbours, biased downwind and by slope. Inert terrain
//! (lake, source, town) is never touched. This strategy has no stopping
//! condition; regrowth always runs the full generation budget.

use super::{StepOutcome, TransitionStrategy};
use crate::grid::{Compass, Grid};
use crate::terrain::regrowth_rate;
use crate::wind::angular_difference;
use rand::{Rng, RngCore};

/// Generations at the start of a run during which the buried seed bank
/// can still resprout without living neighbours
const SEED_BANK_WINDOW: usize = 3;

/// Seed-bank resprout chance relative to the type's regrowth rate
const RESPROUT_MULTIPLIER: f32 = 0.5;

/// Spread bonus for seeds carried into the downwind half-circle
const DOWNWIND_MULTIPLIER: f32 = 1.3;

/// Vegetation regrowth strategy. The prevailing wind bearing is fixed for
/// the whole recovery period.
pub struct RegrowthStrategy {
    prevailing_bearing: f32,
}

impl RegrowthStrategy {
    pub fn new(prevailing_bearing: f32) -> Self {
        RegrowthStrategy { prevailing_bearing }
    }

    /// True when the neighbour in `direction` lies within the downwind
    /// half-circle of the prevailing bearing
    fn is_downwind(&self, direction: Compass) -> bool {
        angular_difference(self.prevailing_bearing, direction.bearing_from_centre()) < 90.0
    }
}

impl TransitionStrategy for RegrowthStrategy {
    fn name(&self) -> &'static str {
        "regrowth"
    }

    fn step(&mut self, grid: &Grid, time_step: usize, rng: &mut dyn RngCore) -> StepOutcome {
        let mut next = grid.clone();

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let old = grid.get(x, y);
                if !old.terrain.is_natural_vegetation() {
                    continue;
                }

                if !old.burnt {
                    next.get_mut(x, y).regenerate();
                    continue;
                }

                // early resprout from the seed bank, independent of
                // neighbours
                if time_step < SEED_BANK_WINDOW {
                    let p = regrowth_rate(old.terrain) * RESPROUT_MULTIPLIER;
                    if rng.random::<f32>() < p {
                        let cell = next.get_mut(x, y);
                        cell.burnt = false;
                        cell.burnt_timer = 0;
                        continue;
                    }
                }

                // seed spread from living natural vegetation; edge cells
                // are excluded from the scan
                let mut seeded = false;
                if grid.is_interior(x, y) {
                    for direction in Compass::ALL {
                        let Some(neighbour) = grid.neighbour(x, y, direction) else {
                            continue;
                        };
                        if neighbour.burnt || !neighbour.terrain.is_natural_vegetation() {
                            continue;
                        }

                        let mut prob = regrowth_rate(neighbour.terrain);
                        if self.is_downwind(direction) {
                            prob *= DOWNWIND_MULTIPLIER;
                        }
                        prob = (prob * old.slope_effect(neighbour.elevation)).clamp(0.0, 1.0);

                        if rng.random::<f32>() < prob {
                            let cell = next.get_mut(x, y);
                            cell.terrain = neighbour.terrain;
                            cell.burnt = false;
                            cell.burnt_timer = 0;
                            seeded = true;
                            break;
                        }
                    }
                }

                if !seeded {
                    // no seed took hold; age the burnt timer toward the
                    // slow recovery path
                    next.get_mut(x, y).regenerate();
                }
            }
        }

        StepOutcome {
            grid: next,
            stop: false,
        }
    }
}
