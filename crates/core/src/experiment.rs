//! Wind-direction sweep experiments
//!
//! Answers "how does the prevailing wind bearing change the time until the
//! fire reaches the town?" by running one full, independent simulation per
//! candidate bearing. Parallelism is strictly across whole runs: every run
//! owns its grid, strategy, and RNG stream (seeded from the base seed and
//! the bearing), so results are reproducible regardless of scheduling.

use crate::config::{ConfigError, SimulationConfig};
use crate::engine::GridEngine;
use crate::plan::WaterDropPlan;
use crate::scenario;
use crate::strategy::FireSpreadStrategy;
use crate::wind::WindModel;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Outcome of one sweep run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepOutcome {
    /// Prevailing wind bearing of the run, degrees
    pub direction: i32,
    /// Generation at which the town ignited, if it did
    pub town_ignition_step: Option<usize>,
    /// Fraction of the grid burning in the frame where the town first
    /// burned (0 when it never did)
    pub burning_fraction: f32,
}

/// Run one real-domain simulation per wind bearing in `directions`.
///
/// Each run derives its seed from `config.seed` and its bearing, keeping
/// the sweep reproducible while decorrelating the runs.
///
/// # Errors
/// Returns a validation error for a degenerate base configuration.
pub fn wind_direction_sweep(
    config: &SimulationConfig,
    wind: &WindModel,
    directions: &[i32],
    plan: &WaterDropPlan,
) -> Result<Vec<SweepOutcome>, ConfigError> {
    // the scenario dictates the grid dimensions
    let mut base = config.clone();
    base.width = scenario::REAL_DOMAIN_SIZE;
    base.height = scenario::REAL_DOMAIN_SIZE;
    base.validate()?;

    info!(
        "Wind-direction sweep: {} directions, {} generations each",
        directions.len(),
        base.num_generations
    );

    let outcomes = directions
        .par_iter()
        .map(|&direction| run_direction(&base, wind, direction, plan))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(outcomes)
}

fn run_direction(
    base: &SimulationConfig,
    wind: &WindModel,
    direction: i32,
    plan: &WaterDropPlan,
) -> Result<SweepOutcome, ConfigError> {
    let mut config = base.clone();
    config.seed = derive_seed(base.seed, direction);

    let grid = scenario::real_domain(&config);
    let run_wind = WindModel::new(
        wind.mean_speed,
        direction.rem_euclid(360) as f32,
        wind.shape_k,
        wind.scale_c,
    );

    let mut strategy = FireSpreadStrategy::new(run_wind, plan.clone(), config.max_moisture);
    let mut engine = GridEngine::new(&config, grid)?;
    let summary = engine.run(&mut strategy);

    let timeline = engine.timeline();
    let burning_fraction = timeline
        .first_town_burning_frame()
        .and_then(|frame| timeline.burning_fraction(frame))
        .unwrap_or(0.0);

    Ok(SweepOutcome {
        direction,
        town_ignition_step: summary.town_ignition_step,
        burning_fraction,
    })
}

// Decorrelate per-direction RNG streams from one base seed
// (splitmix64-style mixing).
fn derive_seed(base: u64, direction: i32) -> u64 {
    let mut z = base ^ (direction as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Write sweep outcomes as CSV (`direction,town_ignition_step,
/// burning_fraction`; an untouched town leaves the step column empty).
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn save_csv<P: AsRef<Path>>(outcomes: &[SweepOutcome], path: P) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "direction,town_ignition_step,burning_fraction")?;
    for outcome in outcomes {
        let step = outcome
            .town_ignition_step
            .map_or_else(String::new, |s| s.to_string());
        writeln!(
            writer,
            "{},{},{}",
            outcome.direction, step, outcome.burning_fraction
        )?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_seed_decorrelates_directions() {
        let a = derive_seed(0, -52);
        let b = derive_seed(0, -51);
        let c = derive_seed(1, -52);
        assert_ne!(a, b);
        assert_ne!(a, c);
        // and stays reproducible
        assert_eq!(a, derive_seed(0, -52));
    }

    #[test]
    fn test_sweep_is_reproducible() {
        let config = SimulationConfig {
            num_generations: 5,
            power_plant_enabled: true,
            ..SimulationConfig::default()
        };
        let wind = WindModel::fitted(0.0);
        let directions = [0, 90];
        let plan = WaterDropPlan::empty();

        let first = wind_direction_sweep(&config, &wind, &directions, &plan).expect("sweep runs");
        let second = wind_direction_sweep(&config, &wind, &directions, &plan).expect("sweep runs");
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        // five generations cannot carry the fire from the north edge to
        // the town
        assert!(first.iter().all(|o| o.town_ignition_step.is_none()));
    }

    #[test]
    fn test_csv_format() {
        let outcomes = vec![
            SweepOutcome {
                direction: -10,
                town_ignition_step: Some(42),
                burning_fraction: 0.125,
            },
            SweepOutcome {
                direction: 0,
                town_ignition_step: None,
                burning_fraction: 0.0,
            },
        ];
        let path = std::env::temp_dir().join("fire_ca_sweep_test.csv");
        save_csv(&outcomes, &path).expect("writes");
        let contents = std::fs::read_to_string(&path).expect("reads");
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("direction,town_ignition_step,burning_fraction")
        );
        assert_eq!(lines.next(), Some("-10,42,0.125"));
        assert_eq!(lines.next(), Some("0,,0"));
        let _ = std::fs::remove_file(path);
    }
}
