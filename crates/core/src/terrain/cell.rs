//! Per-cell terrain state machine
//!
//! Each grid cell owns a `TerrainCell`: the physical model of one patch of
//! terrain (fuel, moisture, elevation) plus its combustion state. All state
//! transitions are local; neighbourhood effects are composed by the
//! transition strategies, which call into these methods.

use super::ignition::base_ignition_prob;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Terrain kinds of the simulated domain.
///
/// The ordinal order is load-bearing: state-index encoding reserves four
/// consecutive indices per terrain type, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainType {
    /// Fast-burning shrubland, the default ground cover
    Chaparral,
    /// Slow-burning, hard-to-ignite forest
    DenseForest,
    /// Scrubland on the canyon floor and walls
    CanyonScrubland,
    /// Open water, never burns
    Lake,
    /// Persistent ignition emitter (power plant, incinerator)
    Source,
    /// The settlement whose ignition ends a run
    Town,
}

impl TerrainType {
    /// Number of terrain variants
    pub const COUNT: usize = 6;

    /// All variants in ordinal order
    pub const ALL: [TerrainType; TerrainType::COUNT] = [
        TerrainType::Chaparral,
        TerrainType::DenseForest,
        TerrainType::CanyonScrubland,
        TerrainType::Lake,
        TerrainType::Source,
        TerrainType::Town,
    ];

    /// True for the vegetation types that burn, carry fuel, and regrow
    #[inline]
    pub fn is_natural_vegetation(self) -> bool {
        matches!(
            self,
            TerrainType::Chaparral | TerrainType::DenseForest | TerrainType::CanyonScrubland
        )
    }

    /// Base display colour (linear RGB, 0-1)
    pub fn base_color(self) -> (f32, f32, f32) {
        match self {
            TerrainType::Chaparral => (0.749, 0.749, 0.0),
            TerrainType::DenseForest => (0.310, 0.384, 0.153),
            TerrainType::CanyonScrubland => (0.996, 1.0, 0.0),
            TerrainType::Lake => (0.239, 0.690, 0.941),
            TerrainType::Source => (1.0, 1.0, 1.0),
            TerrainType::Town => (0.0, 0.0, 0.0),
        }
    }

    /// Default per-generation fuel consumption while burning
    fn default_burn_rate(self) -> f32 {
        match self {
            TerrainType::Chaparral => 0.2,
            TerrainType::DenseForest => 0.05,
            TerrainType::CanyonScrubland => 0.125,
            TerrainType::Lake | TerrainType::Source | TerrainType::Town => 0.0,
        }
    }

    /// Default per-generation fuel recovery while regenerating
    fn default_regen_rate(self) -> f32 {
        super::ignition::regrowth_rate(self)
    }
}

/// Probability per generation that a fire source burns itself out
pub const SOURCE_EXTINGUISH_PROB: f32 = 0.2;

/// Residual fuel granted when a cell completes its burnt period
pub const BURNT_RESIDUAL_FUEL: f32 = 0.1;

/// Elevation difference (in elevation units) beyond which spread is cut off
pub const SLOPE_CUTOFF: f32 = 50.0;

/// Generations a cell stays burnt before it may recover
pub const DEFAULT_BURNT_PERIOD: u32 = 500;

const DEFAULT_MOISTURE_DECAY_RATE: f32 = 0.05;
const DEFAULT_BURN_THRESHOLD: f32 = 0.5;

/// One grid cell: terrain kind, physical reserves, and combustion state.
///
/// Invariants maintained by every transition: `fuel ∈ [0, 1]`,
/// `moisture ≥ 0`, and `burnt` implies `!burning`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainCell {
    /// Terrain kind. Fixed for the cell's lifetime, except that regrowth
    /// seed spread may overwrite it on an unburnt vegetation cell.
    pub terrain: TerrainType,
    /// Combustible reserve, 0-1
    pub fuel: f32,
    /// Dampness; suppresses ignition while above `burn_threshold`
    pub moisture: f32,
    /// Moisture lost per generation (doubled while not burning)
    pub moisture_decay_rate: f32,
    /// Moisture level at or above which the cell refuses to ignite
    pub burn_threshold: f32,
    /// Fuel recovered per generation while regenerating
    pub regen_rate: f32,
    /// Fuel consumed per generation while burning
    pub burn_rate: f32,
    /// Elevation in model units, drives slope-modulated spread
    pub elevation: f32,
    /// Currently on fire
    pub burning: bool,
    /// Burned out; mutually exclusive with `burning`
    pub burnt: bool,
    /// Generations spent in the burnt state
    pub burnt_timer: u32,
    /// Generations required in the burnt state before recovery
    pub burnt_period: u32,
    /// Generations this cell has spent burning in its current episode
    pub burn_duration: u32,
    /// Suppressed this generation; cleared the next generation unless
    /// the water-drop plan re-applies it
    pub waterdropped: bool,
}

impl TerrainCell {
    /// Create a fresh, unburnt cell of the given terrain with full fuel
    /// and per-type default rates.
    pub fn new(terrain: TerrainType) -> Self {
        TerrainCell {
            terrain,
            fuel: 1.0,
            moisture: 0.0,
            moisture_decay_rate: DEFAULT_MOISTURE_DECAY_RATE,
            burn_threshold: DEFAULT_BURN_THRESHOLD,
            regen_rate: terrain.default_regen_rate(),
            burn_rate: terrain.default_burn_rate(),
            elevation: 0.0,
            burning: false,
            burnt: false,
            burnt_timer: 0,
            burnt_period: DEFAULT_BURNT_PERIOD,
            burn_duration: 0,
            waterdropped: false,
        }
    }

    /// Set the cell's elevation (builder style)
    pub fn with_elevation(mut self, elevation: f32) -> Self {
        self.elevation = elevation;
        self
    }

    /// Start the cell in the burnt state (builder style)
    pub fn with_burnt(mut self, burnt: bool) -> Self {
        self.burnt = burnt;
        self
    }

    /// Start the cell on fire (builder style)
    pub fn with_burning(mut self, burning: bool) -> Self {
        self.burning = burning;
        self
    }

    /// Base probability that fire spreads into this cell from a burning
    /// neighbour of the given terrain type.
    #[inline]
    pub fn ignition_prob_from(&self, source: TerrainType) -> f32 {
        base_ignition_prob(source, self.terrain)
    }

    /// Attempt to set this cell on fire.
    ///
    /// Burnt cells and lakes ignore the attempt. Town and source cells
    /// ignite unconditionally. Vegetation ignites only while dry
    /// (`moisture < burn_threshold`) with at least `burn_rate` fuel in
    /// reserve; a dry cell without enough fuel exhausts its reserve
    /// instead. Vegetation always loses moisture afterwards.
    pub fn ignite(&mut self) {
        if self.burnt {
            return;
        }

        match self.terrain {
            TerrainType::Town | TerrainType::Source => {
                self.burning = true;
                self.burn_duration = 0;
            }
            TerrainType::Lake => {}
            _ => {
                if self.moisture < self.burn_threshold {
                    if self.fuel >= self.burn_rate {
                        self.burning = true;
                        self.fuel -= self.burn_rate;
                        self.burn_duration = 0;
                    } else {
                        self.fuel = 0.0;
                    }
                }
                self.strip_moisture();
            }
        }
    }

    /// Advance one generation of burning.
    ///
    /// A burning town stays burning indefinitely. A source extinguishes
    /// with probability [`SOURCE_EXTINGUISH_PROB`] per generation.
    /// Vegetation consumes `burn_rate` fuel; once the reserve is spent the
    /// cell enters the burnt state.
    pub fn burn(&mut self, rng: &mut dyn RngCore) {
        match self.terrain {
            TerrainType::Town => {}
            TerrainType::Source => {
                if rng.random::<f32>() < SOURCE_EXTINGUISH_PROB {
                    self.burning = false;
                }
            }
            _ => {
                if self.fuel >= self.burn_rate {
                    self.fuel -= self.burn_rate;
                    self.burn_duration += 1;
                } else {
                    self.burning = false;
                    self.fuel = 0.0;
                    self.burnt = true;
                    self.burnt_timer = 0;
                    self.burn_duration = 0;
                }
                self.strip_moisture();
            }
        }
    }

    /// Advance one generation of recovery.
    ///
    /// A burnt cell ages its timer and, once `burnt_period` generations
    /// have passed, leaves the burnt state with a small residual fuel
    /// reserve. Living vegetation recovers fuel toward 1.0 while not
    /// burning and loses moisture.
    pub fn regenerate(&mut self) {
        if self.burnt {
            self.burnt_timer += 1;
            if self.burnt_timer >= self.burnt_period {
                self.burnt = false;
                self.burnt_timer = 0;
                self.fuel = BURNT_RESIDUAL_FUEL.min(self.fuel + BURNT_RESIDUAL_FUEL);
            }
            return;
        }

        if self.terrain.is_natural_vegetation() {
            if !self.burning {
                self.fuel = (self.fuel + self.regen_rate).min(1.0);
            }
            self.strip_moisture();
        }
    }

    /// Apply an aerial water drop.
    ///
    /// Marks the cell suppressed for this generation. Burnt cells, towns,
    /// and lakes take no further effect. On a source the drop fails and
    /// the generator keeps burning. Burning vegetation is extinguished
    /// with a moisture top-up of half `max_moisture` (capped); unburnt
    /// vegetation is saturated to `max_moisture`.
    pub fn drop_water(&mut self, max_moisture: f32) {
        self.waterdropped = true;
        if self.burnt {
            return;
        }
        match self.terrain {
            TerrainType::Town | TerrainType::Lake => {}
            TerrainType::Source => {
                self.burning = true;
            }
            _ => {
                if self.burning {
                    self.burning = false;
                    self.moisture = (self.moisture + 0.5 * max_moisture).min(max_moisture);
                } else {
                    self.moisture = max_moisture;
                }
            }
        }
    }

    /// Slope-driven spread multiplier for fire arriving from a neighbour
    /// at the given elevation.
    ///
    /// Exactly 0 beyond a ±[`SLOPE_CUTOFF`] elevation difference, exactly
    /// 1 on flat ground, otherwise a logistic curve in roughly
    /// [0.5, 1.25] that favours upslope spread.
    pub fn slope_effect(&self, neighbour_elevation: f32) -> f32 {
        let diff = self.elevation - neighbour_elevation;
        if diff.abs() > SLOPE_CUTOFF {
            return 0.0;
        }
        if diff == 0.0 {
            return 1.0;
        }
        0.5 + 0.75 / (1.0 + (-diff / 12.0).exp())
    }

    // Moisture decays every generation, floored at zero. Decay runs at
    // double rate while the cell is not burning.
    fn strip_moisture(&mut self) {
        let multiplier = if self.burning { 1.0 } else { 2.0 };
        self.moisture = (self.moisture - multiplier * self.moisture_decay_rate).max(0.0);
    }
}

/// Map a cell to its timeline state index.
///
/// Each terrain type owns four consecutive indices: `ordinal × 4` for the
/// default state, `+1` burning, `+2` water-dropped, `+3` burnt. Precedence
/// when flags overlap: waterdropped > burning > burnt > default.
pub fn state_index(cell: &TerrainCell) -> u8 {
    let base = cell.terrain as u8 * 4;
    if cell.waterdropped {
        base + 2
    } else if cell.burning {
        base + 1
    } else if cell.burnt {
        base + 3
    } else {
        base
    }
}
