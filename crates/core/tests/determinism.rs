//! Determinism guarantees of seeded runs
//!
//! The iteration order (row-major cells, canonical neighbour offsets) and
//! the single sequential RNG stream make a run a pure function of its seed
//! and inputs. These tests pin that contract.

use fire_ca_core::{
    strategy_for, FireSpreadStrategy, GridEngine, SimulationConfig, Timeline,
    WaterDropPlan, WindModel,
};

fn run_real_domain(seed: u64) -> Timeline {
    let config = SimulationConfig {
        num_generations: 30,
        seed,
        power_plant_enabled: true,
        incinerator_enabled: true,
        ..SimulationConfig::default()
    };
    let grid = fire_ca_core::scenario::real_domain(&config);
    let mut strategy = strategy_for(&config, WindModel::fitted(0.0), WaterDropPlan::empty());
    let mut engine = GridEngine::new(&config, grid).expect("valid config");
    engine.run(strategy.as_mut());
    engine.into_timeline()
}

#[test]
fn same_seed_reproduces_the_timeline() {
    let first = run_real_domain(1234);
    let second = run_real_domain(1234);
    assert_eq!(first, second);
}

#[test]
fn different_seeds_diverge() {
    let first = run_real_domain(1);
    let second = run_real_domain(2);
    // 30 generations of spread from two burning sources: the trial
    // sequences are different, so the burn patterns will be too
    assert_ne!(first, second);
}

#[test]
fn regrowth_runs_are_reproducible_too() {
    let config = SimulationConfig {
        num_generations: 20,
        seed: 77,
        run_regrow: true,
        ..SimulationConfig::default()
    };
    let run = || {
        let grid = fire_ca_core::scenario::real_domain(&config);
        let mut strategy = strategy_for(&config, WindModel::fitted(180.0), WaterDropPlan::empty());
        let mut engine = GridEngine::new(&config, grid).expect("valid config");
        engine.run(strategy.as_mut());
        engine.into_timeline()
    };
    assert_eq!(run(), run());
}

#[test]
fn strategy_selection_follows_config() {
    let spread = strategy_for(
        &SimulationConfig::default(),
        WindModel::fitted(0.0),
        WaterDropPlan::empty(),
    );
    assert_eq!(spread.name(), "fire-spread");

    let regrow_config = SimulationConfig {
        run_regrow: true,
        ..SimulationConfig::default()
    };
    let regrow = strategy_for(
        &regrow_config,
        WindModel::fitted(0.0),
        WaterDropPlan::empty(),
    );
    assert_eq!(regrow.name(), "regrowth");

    // the spread strategy exists independently of the selector as well
    let direct = FireSpreadStrategy::new(WindModel::fitted(0.0), WaterDropPlan::empty(), 0.5);
    assert_eq!(
        fire_ca_core::TransitionStrategy::name(&direct),
        "fire-spread"
    );
}
