//! Active fire-spread transition
//!
//! The primary per-generation rule while a fire is alive: apply scheduled
//! water drops, test every unburnt cell against its burning neighbours,
//! and advance the combustion of cells already alight. The composite
//! ignition probability per burning neighbour is
//!
//! ```text
//! p = (1 - (1 - base)^wind) * moisture_effect * slope_effect
//! ```
//!
//! clamped to [0, 1], where `base` is the terrain-pair table probability,
//! `wind` the directional contribution of the wind model keyed on the
//! bearing from neighbour to cell, `moisture_effect` a cubic damping
//! polynomial of the cell's own moisture, and `slope_effect` the
//! elevation-difference curve.
//! One Bernoulli trial is drawn per neighbour in canonical offset order;
//! the first success ignites the cell and ends its scan.

use super::{StepOutcome, TransitionStrategy};
use crate::grid::{Compass, Grid};
use crate::plan::WaterDropPlan;
use crate::terrain::TerrainType;
use crate::wind::WindModel;
use rand::{Rng, RngCore};
use tracing::debug;

/// Damping factor of the cell's own moisture on ignition, clamped to [0, 1]
fn moisture_effect(moisture: f32) -> f32 {
    let m = moisture;
    (1.0 - 2.59 * m + 5.11 * m * m - 3.52 * m * m * m).clamp(0.0, 1.0)
}

/// Active fire-spread strategy. Owns the run's wind model and water-drop
/// plan; records the town-ignition generation as a side channel.
pub struct FireSpreadStrategy {
    wind: WindModel,
    plan: WaterDropPlan,
    max_moisture: f32,
    town_ignition_step: Option<usize>,
}

impl FireSpreadStrategy {
    pub fn new(wind: WindModel, plan: WaterDropPlan, max_moisture: f32) -> Self {
        FireSpreadStrategy {
            wind,
            plan,
            max_moisture,
            town_ignition_step: None,
        }
    }
}

impl TransitionStrategy for FireSpreadStrategy {
    fn name(&self) -> &'static str {
        "fire-spread"
    }

    fn step(&mut self, grid: &Grid, time_step: usize, rng: &mut dyn RngCore) -> StepOutcome {
        let mut next = grid.clone();
        let drops = self.plan.drops_at(time_step);
        let mut town_ignited = false;

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let old = grid.get(x, y);
                let cell = next.get_mut(x, y);

                if drops.iter().any(|c| c[0] == x && c[1] == y) {
                    cell.drop_water(self.max_moisture);
                } else if old.waterdropped {
                    cell.waterdropped = false;
                }

                if !old.burning && !old.burnt {
                    for direction in Compass::ALL {
                        let Some(neighbour) = grid.neighbour(x, y, direction) else {
                            continue;
                        };
                        if !neighbour.burning {
                            continue;
                        }

                        let base = old.ignition_prob_from(neighbour.terrain);
                        let wind = self
                            .wind
                            .fire_spread_contribution(direction.spread_bearing(), rng);
                        let slope = old.slope_effect(neighbour.elevation);

                        let prob = ((1.0 - (1.0 - base).powf(wind))
                            * moisture_effect(old.moisture)
                            * slope)
                            .clamp(0.0, 1.0);

                        if rng.random::<f32>() < prob {
                            let cell = next.get_mut(x, y);
                            cell.ignite();
                            if cell.burning
                                && cell.terrain == TerrainType::Town
                                && self.town_ignition_step.is_none()
                            {
                                self.town_ignition_step = Some(time_step);
                                town_ignited = true;
                                debug!("town ignited at generation {time_step}");
                            }
                            break;
                        }
                    }
                }

                if old.burning {
                    next.get_mut(x, y).burn(rng);
                }
            }
        }

        StepOutcome {
            grid: next,
            stop: town_ignited,
        }
    }

    fn town_ignition_step(&self) -> Option<usize> {
        self.town_ignition_step
    }
}
