//! Per-generation transition strategies
//!
//! A strategy is the rule set applied to every cell once per generation:
//! active fire spread during a burn, or vegetation regrowth after one. The
//! engine is strategy-agnostic; implementations are swapped by run
//! configuration behind the [`TransitionStrategy`] trait.

mod regrow;
mod spread;

pub use regrow::RegrowthStrategy;
pub use spread::FireSpreadStrategy;

use crate::config::SimulationConfig;
use crate::grid::Grid;
use crate::plan::WaterDropPlan;
use crate::wind::WindModel;
use rand::RngCore;

/// Result of advancing the grid by one generation
#[derive(Debug)]
pub struct StepOutcome {
    /// The freshly built next-generation grid
    pub grid: Grid,
    /// True when the strategy's stopping condition fired this generation
    pub stop: bool,
}

/// A per-generation update rule over the whole grid.
///
/// `step` reads the frozen previous grid and returns a newly built grid;
/// it must never mutate its input (the engine relies on full double
/// buffering for determinism). Cells are visited in row-major order and
/// neighbours in [`crate::grid::Compass::ALL`] order so that a fixed seed
/// reproduces the exact trial sequence.
pub trait TransitionStrategy {
    /// Human-readable strategy name for logs
    fn name(&self) -> &'static str;

    /// Advance one generation
    fn step(&mut self, grid: &Grid, time_step: usize, rng: &mut dyn RngCore) -> StepOutcome;

    /// Side channel: the generation at which the town first ignited, when
    /// this strategy tracks one.
    fn town_ignition_step(&self) -> Option<usize> {
        None
    }
}

/// Build the strategy selected by the run configuration: regrowth when
/// `run_regrow` is set, active fire spread otherwise.
pub fn strategy_for(
    config: &SimulationConfig,
    wind: WindModel,
    plan: WaterDropPlan,
) -> Box<dyn TransitionStrategy> {
    if config.run_regrow {
        Box::new(RegrowthStrategy::new(wind.direction))
    } else {
        Box::new(FireSpreadStrategy::new(wind, plan, config.max_moisture))
    }
}
