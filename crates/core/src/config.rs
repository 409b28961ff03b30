//! Run configuration
//!
//! The contract between the CA core and its callers (CLI, experiment
//! sweeps, external optimizers): grid dimensions, generation budget, the
//! scenario feature toggles, and the seed of the run's RNG stream. All
//! fields carry defaults so partial configuration files stay valid;
//! validation happens once, before a run starts, never mid-run.

use crate::terrain::TerrainType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Cell-steps (`generations * width * height`) above which a run is worth
/// a warning before starting
pub const COMPLEXITY_WARNING_THRESHOLD: u64 = 30_000_000;

/// Minimum grid edge length
pub const MIN_GRID_DIM: usize = 3;

/// Configuration of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Generation budget of the run
    pub num_generations: usize,
    /// Whether the neighbourhood wraps at grid edges (always false for
    /// this model; kept for interface compatibility)
    pub wrap: bool,
    /// Moisture ceiling applied by water drops
    pub max_moisture: f32,
    /// Seed of the run's RNG stream
    pub seed: u64,
    /// Run the post-fire regrowth strategy instead of active spread
    pub run_regrow: bool,
    /// Place the power-plant ignition source
    pub power_plant_enabled: bool,
    /// Place the incinerator ignition source
    pub incinerator_enabled: bool,
    /// Intervention 1: extend the forest to the west
    pub intervention_1_enabled: bool,
    /// Intervention 2: extend the forest to the south
    pub intervention_2_enabled: bool,
    /// Intervention 3: flood the canyon
    pub intervention_3_enabled: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            width: 200,
            height: 200,
            num_generations: 250,
            wrap: false,
            max_moisture: 0.5,
            seed: 0,
            run_regrow: false,
            power_plant_enabled: false,
            incinerator_enabled: false,
            intervention_1_enabled: false,
            intervention_2_enabled: false,
            intervention_3_enabled: false,
        }
    }
}

impl SimulationConfig {
    /// Check the configuration against the model's hard requirements.
    ///
    /// # Errors
    /// Rejects grids below 3x3 and generation budgets below 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GRID_DIM || self.height < MIN_GRID_DIM {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.num_generations < 1 {
            return Err(ConfigError::TooFewGenerations(self.num_generations));
        }
        Ok(())
    }

    /// Total cell-steps of the run
    pub fn complexity(&self) -> u64 {
        self.num_generations as u64 * self.width as u64 * self.height as u64
    }

    /// Non-fatal warning for runs that may take a long time: returns the
    /// cell-step count when it exceeds [`COMPLEXITY_WARNING_THRESHOLD`].
    pub fn complexity_warning(&self) -> Option<u64> {
        let complexity = self.complexity();
        (complexity > COMPLEXITY_WARNING_THRESHOLD).then_some(complexity)
    }

    /// The ordered state enumeration: four states per terrain type
    pub fn states() -> Vec<u8> {
        (0..(TerrainType::COUNT * 4) as u8).collect()
    }

    /// Display colours matching [`SimulationConfig::states`]: per terrain
    /// type its base colour, fire red, water-drop blue, and burnt grey.
    pub fn state_colors() -> Vec<(f32, f32, f32)> {
        let fire = (1.0, 0.0, 0.0);
        let waterdrop = (0.0, 0.0, 1.0);
        let burnt = (0.2, 0.2, 0.2);

        let mut colors = Vec::with_capacity(TerrainType::COUNT * 4);
        for terrain in TerrainType::ALL {
            colors.push(terrain.base_color());
            colors.push(fire);
            colors.push(waterdrop);
            colors.push(burnt);
        }
        colors
    }

    /// Load a configuration from JSON.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save the configuration as JSON.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeFailed(e.to_string()))?;
        fs::write(path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    /// One or both grid dimensions are below the minimum
    GridTooSmall { width: usize, height: usize },
    /// The generation budget is below 1
    TooFewGenerations(usize),
    /// The initial grid does not match the configured dimensions
    GridMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Failed to read the configuration file
    LoadFailed(String),
    /// Failed to parse the configuration file
    ParseFailed(String),
    /// Failed to serialize the configuration
    SerializeFailed(String),
    /// Failed to write the configuration file
    SaveFailed(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::GridTooSmall { width, height } => {
                write!(f, "Grid dimensions too small: {width}x{height} (minimum {MIN_GRID_DIM}x{MIN_GRID_DIM})")
            }
            ConfigError::TooFewGenerations(n) => {
                write!(f, "Invalid generation budget {n}, at least 1 required")
            }
            ConfigError::GridMismatch { expected, actual } => write!(
                f,
                "Initial grid is {}x{} but the configuration expects {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            ConfigError::LoadFailed(msg) => write!(f, "Failed to load config: {msg}"),
            ConfigError::ParseFailed(msg) => write!(f, "Failed to parse config: {msg}"),
            ConfigError::SerializeFailed(msg) => write!(f, "Failed to serialize config: {msg}"),
            ConfigError::SaveFailed(msg) => write!(f, "Failed to save config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.wrap);
    }

    #[test]
    fn test_rejects_tiny_grid() {
        let config = SimulationConfig {
            width: 2,
            height: 10,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_generations() {
        let config = SimulationConfig {
            num_generations: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooFewGenerations(0))
        ));
    }

    #[test]
    fn test_complexity_warning_threshold() {
        let config = SimulationConfig::default();
        // 250 * 200 * 200 = 10M, well under the threshold
        assert_eq!(config.complexity_warning(), None);

        let heavy = SimulationConfig {
            num_generations: 1000,
            ..SimulationConfig::default()
        };
        // 1000 * 200 * 200 = 40M: warn, but do not fail
        assert_eq!(heavy.complexity_warning(), Some(40_000_000));
        assert!(heavy.validate().is_ok());
    }

    #[test]
    fn test_states_and_colors_align() {
        let states = SimulationConfig::states();
        let colors = SimulationConfig::state_colors();
        assert_eq!(states.len(), 24);
        assert_eq!(colors.len(), states.len());
        // burning substates are all fire red
        for terrain in 0..TerrainType::COUNT {
            assert_eq!(colors[terrain * 4 + 1], (1.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"seed": 7, "power_plant_enabled": true}"#).expect("parses");
        assert_eq!(config.seed, 7);
        assert!(config.power_plant_enabled);
        assert_eq!(config.width, 200);
        assert_eq!(config.num_generations, 250);
    }
}
