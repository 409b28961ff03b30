//! Stochastic wildfire cellular automaton
//!
//! Simulates wildfire ignition, spread, suppression, and vegetation
//! regrowth on a fixed 2-D terrain grid, for comparing firefighting
//! strategies across many independent stochastic trials.
//!
//! The moving parts:
//! - a per-cell terrain state machine (fuel, moisture, burning/burnt,
//!   elevation) with calibrated terrain-pair ignition likelihoods
//! - a Weibull-sampled wind model that biases spread direction and
//!   strength
//! - swappable per-generation transition strategies (active fire spread,
//!   post-fire regrowth) behind one trait
//! - a generation-stepping engine that double-buffers the grid, records a
//!   timeline, and enforces the budget/stopping condition
//!
//! A single run is strictly sequential and reproducible from its seed;
//! multi-run workloads (wind-direction sweeps, external optimizers)
//! parallelize across whole independent runs.

pub mod config;
pub mod engine;
pub mod experiment;
pub mod grid;
pub mod plan;
pub mod scenario;
pub mod strategy;
pub mod terrain;
pub mod timeline;
pub mod wind;

// Re-export the main surface
pub use config::{ConfigError, SimulationConfig};
pub use engine::{GridEngine, RunSummary, StopReason};
pub use experiment::{save_csv, wind_direction_sweep, SweepOutcome};
pub use grid::{Compass, Grid};
pub use plan::{PlanError, WaterDropPlan};
pub use strategy::{
    strategy_for, FireSpreadStrategy, RegrowthStrategy, StepOutcome, TransitionStrategy,
};
pub use terrain::{state_index, TerrainCell, TerrainType};
pub use timeline::{Timeline, TimelineError};
pub use wind::WindModel;
