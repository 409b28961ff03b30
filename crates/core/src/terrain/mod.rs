//! Terrain model: cell state machine and calibrated probability tables

mod cell;
mod ignition;

pub use cell::{
    state_index, TerrainCell, TerrainType, BURNT_RESIDUAL_FUEL, DEFAULT_BURNT_PERIOD,
    SLOPE_CUTOFF, SOURCE_EXTINGUISH_PROB,
};
pub use ignition::{base_ignition_prob, regrowth_rate};
