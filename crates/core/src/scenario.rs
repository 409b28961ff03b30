//! The "real domain" scenario
//!
//! A 200x200 terrain modelled on the study area: chaparral ground cover,
//! three dense-forest blocks, a canyon scrubland strip with a piecewise
//! descend/flat/ascend elevation profile, two lakes, and the town in the
//! south. Feature toggles place the ignition sources on the north edge and
//! apply the three candidate interventions (forest extensions, flooding
//! the canyon). With `run_regrow` set, all vegetation starts burnt so the
//! recovery strategy can be studied in isolation.

use crate::config::SimulationConfig;
use crate::grid::Grid;
use crate::terrain::{TerrainCell, TerrainType};
use tracing::info;

/// Edge length of the real-domain grid
pub const REAL_DOMAIN_SIZE: usize = 200;

/// Canyon floor depth relative to the surrounding terrain
const CANYON_DEPTH: f32 = -100.0;

/// Fractions of the canyon length spent descending and ascending
const CANYON_DESC_PCT: f32 = 0.1;
const CANYON_ASC_PCT: f32 = 0.1;

// Canyon floor elevation along the normalised strip position.
fn canyon_elevation(t: f32) -> f32 {
    let flat_pct = 1.0 - CANYON_DESC_PCT - CANYON_ASC_PCT;
    if t < CANYON_DESC_PCT {
        (t / CANYON_DESC_PCT) * CANYON_DEPTH
    } else if t < CANYON_DESC_PCT + flat_pct {
        CANYON_DEPTH
    } else {
        let t2 = (t - (CANYON_DESC_PCT + flat_pct)) / CANYON_ASC_PCT;
        CANYON_DEPTH + t2 * (0.0 - CANYON_DEPTH)
    }
}

/// Build the real-domain initial grid for the given configuration.
///
/// The grid is always [`REAL_DOMAIN_SIZE`] square; callers should keep
/// `config.width`/`config.height` in agreement (the engine rejects a
/// mismatch).
pub fn real_domain(config: &SimulationConfig) -> Grid {
    let burnt = config.run_regrow;
    let vegetation =
        |terrain: TerrainType| TerrainCell::new(terrain).with_burnt(burnt);

    let mut grid = Grid::filled(
        REAL_DOMAIN_SIZE,
        REAL_DOMAIN_SIZE,
        &vegetation(TerrainType::Chaparral),
    );

    // dense forest: the northern flick, the tall trunk, the south block
    grid.fill_rect(20..80, 20..30, &vegetation(TerrainType::DenseForest));
    grid.fill_rect(20..50, 30..100, &vegetation(TerrainType::DenseForest));
    grid.fill_rect(20..100, 100..140, &vegetation(TerrainType::DenseForest));

    // canyon scrubland strip, elevation varying north to south
    let canyon_y = 40..130usize;
    let canyon_len = (canyon_y.end - canyon_y.start) as f32;
    for y in canyon_y {
        let t = (y - 40) as f32 / canyon_len;
        let cell = vegetation(TerrainType::CanyonScrubland).with_elevation(canyon_elevation(t));
        grid.fill_rect(140..150, y..y + 1, &cell);
    }

    // lakes never carry the burnt flag
    grid.fill_rect(70..80, 40..80, &TerrainCell::new(TerrainType::Lake));
    grid.fill_rect(100..160, 160..170, &TerrainCell::new(TerrainType::Lake));

    // the town
    grid.fill_rect(56..66, 176..186, &TerrainCell::new(TerrainType::Town));

    // ignition sources on the north edge (pointless when everything
    // starts burnt)
    if config.power_plant_enabled && !burnt {
        *grid.get_mut(20, 0) = TerrainCell::new(TerrainType::Source).with_burning(true);
    }
    if config.incinerator_enabled && !burnt {
        *grid.get_mut(199, 0) = TerrainCell::new(TerrainType::Source).with_burning(true);
    }

    // intervention 1: extend the forest westward
    if config.intervention_1_enabled {
        grid.fill_rect(0..20, 100..140, &vegetation(TerrainType::DenseForest));
    }

    // intervention 2: extend the forest southward
    if config.intervention_2_enabled {
        grid.fill_rect(20..100, 140..160, &vegetation(TerrainType::DenseForest));
    }

    // both forest interventions together square the corner off
    if config.intervention_1_enabled && config.intervention_2_enabled {
        grid.fill_rect(0..20, 140..160, &vegetation(TerrainType::DenseForest));
    }

    // intervention 3: flood the canyon
    if config.intervention_3_enabled {
        grid.fill_rect(140..150, 40..130, &TerrainCell::new(TerrainType::Lake));
    }

    info!(
        "Built real domain: {}x{}, sources(power_plant={}, incinerator={}), interventions({}, {}, {}), all_burnt={}",
        REAL_DOMAIN_SIZE,
        REAL_DOMAIN_SIZE,
        config.power_plant_enabled,
        config.incinerator_enabled,
        config.intervention_1_enabled,
        config.intervention_2_enabled,
        config.intervention_3_enabled,
        burnt
    );

    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_landmarks() {
        let config = SimulationConfig {
            power_plant_enabled: true,
            incinerator_enabled: true,
            ..SimulationConfig::default()
        };
        let grid = real_domain(&config);

        assert_eq!(grid.width(), REAL_DOMAIN_SIZE);
        assert_eq!(grid.get(0, 0).terrain, TerrainType::Chaparral);
        assert_eq!(grid.get(30, 25).terrain, TerrainType::DenseForest);
        assert_eq!(grid.get(145, 80).terrain, TerrainType::CanyonScrubland);
        assert_eq!(grid.get(75, 60).terrain, TerrainType::Lake);
        assert_eq!(grid.get(60, 180).terrain, TerrainType::Town);

        // both sources present and already burning
        assert_eq!(grid.get(20, 0).terrain, TerrainType::Source);
        assert!(grid.get(20, 0).burning);
        assert_eq!(grid.get(199, 0).terrain, TerrainType::Source);
        assert!(grid.get(199, 0).burning);
    }

    #[test]
    fn test_canyon_elevation_profile() {
        // descend, flat floor, ascend
        assert_eq!(canyon_elevation(0.0), 0.0);
        assert_eq!(canyon_elevation(0.05), -50.0);
        assert_eq!(canyon_elevation(0.5), CANYON_DEPTH);
        assert!(canyon_elevation(0.95) > CANYON_DEPTH);

        let grid = real_domain(&SimulationConfig::default());
        assert_eq!(grid.get(145, 85).elevation, CANYON_DEPTH);
        assert!(grid.get(145, 41).elevation > CANYON_DEPTH);
    }

    #[test]
    fn test_regrow_variant_starts_burnt() {
        let config = SimulationConfig {
            run_regrow: true,
            power_plant_enabled: true,
            ..SimulationConfig::default()
        };
        let grid = real_domain(&config);

        assert!(grid.get(0, 0).burnt);
        assert!(grid.get(30, 25).burnt);
        // inert terrain is never burnt, and sources are suppressed
        assert!(!grid.get(75, 60).burnt);
        assert!(!grid.get(60, 180).burnt);
        assert_eq!(grid.get(20, 0).terrain, TerrainType::Chaparral);
    }

    #[test]
    fn test_intervention_3_floods_canyon() {
        let config = SimulationConfig {
            intervention_3_enabled: true,
            ..SimulationConfig::default()
        };
        let grid = real_domain(&config);
        assert_eq!(grid.get(145, 80).terrain, TerrainType::Lake);
    }
}
