//! Generation-stepping driver
//!
//! `GridEngine` owns the grid, the run's seeded RNG stream, and the
//! timeline. Each generation it hands the frozen current grid to the
//! active transition strategy, records the returned grid, and swaps
//! buffers, so a strategy never reads the grid it is writing. The run ends
//! when the generation budget is spent or the strategy signals its
//! stopping condition.

use crate::config::{ConfigError, SimulationConfig};
use crate::grid::Grid;
use crate::strategy::TransitionStrategy;
use crate::timeline::Timeline;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Why a run terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The generation budget was spent
    BudgetExhausted,
    /// The strategy's stopping condition fired (town ignition)
    StopCondition,
}

/// Outcome of one completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Generations actually executed
    pub generations_run: usize,
    /// Why the run terminated
    pub stop_reason: StopReason,
    /// Generation at which the town first ignited, when it did
    pub town_ignition_step: Option<usize>,
}

/// Driver for one simulation run.
///
/// A single run is strictly sequential: generation `n + 1` depends on the
/// complete output of generation `n`, and all randomness is drawn from one
/// seeded stream, so a fixed seed and inputs reproduce the run exactly.
/// Multi-run workloads parallelize across whole independent engines
/// instead (see [`crate::experiment`]).
pub struct GridEngine {
    grid: Grid,
    num_generations: usize,
    rng: StdRng,
    timeline: Timeline,
}

impl GridEngine {
    /// Create an engine over a validated configuration and initial grid.
    ///
    /// Records the initial grid as timeline frame 0.
    ///
    /// # Errors
    /// Returns a validation error for degenerate configurations or when
    /// the initial grid does not match the configured dimensions.
    pub fn new(config: &SimulationConfig, initial: Grid) -> Result<Self, ConfigError> {
        config.validate()?;
        if initial.width() != config.width || initial.height() != config.height {
            return Err(ConfigError::GridMismatch {
                expected: (config.width, config.height),
                actual: (initial.width(), initial.height()),
            });
        }

        let mut timeline = Timeline::new(initial.width(), initial.height());
        timeline.push(&initial);

        Ok(GridEngine {
            grid: initial,
            num_generations: config.num_generations,
            rng: StdRng::seed_from_u64(config.seed),
            timeline,
        })
    }

    /// Run the simulation to completion with the given strategy.
    ///
    /// Appends one timeline frame per executed generation and returns the
    /// run summary. The engine is spent afterwards; a new run needs a new
    /// engine.
    pub fn run(&mut self, strategy: &mut dyn TransitionStrategy) -> RunSummary {
        info!(
            "Starting run: {}x{} grid, {} generation budget, strategy {}",
            self.grid.width(),
            self.grid.height(),
            self.num_generations,
            strategy.name()
        );

        for step in 0..self.num_generations {
            let outcome = strategy.step(&self.grid, step, &mut self.rng);
            self.grid = outcome.grid;
            self.timeline.push(&self.grid);

            if outcome.stop {
                info!("Stopping condition met at generation {step}");
                return RunSummary {
                    generations_run: step + 1,
                    stop_reason: StopReason::StopCondition,
                    town_ignition_step: strategy.town_ignition_step(),
                };
            }

            if step % 50 == 0 {
                debug!(
                    "generation {step}: {} cells burning",
                    self.grid.burning_count()
                );
            }
        }

        info!("Generation budget exhausted");
        RunSummary {
            generations_run: self.num_generations,
            stop_reason: StopReason::BudgetExhausted,
            town_ignition_step: strategy.town_ignition_step(),
        }
    }

    /// The current (latest) grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The recorded timeline so far
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Consume the engine, yielding its timeline
    pub fn into_timeline(self) -> Timeline {
        self.timeline
    }
}
