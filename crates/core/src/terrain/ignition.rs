//! Terrain-pair ignition likelihoods and regrowth rates
//!
//! Base probabilities are calibrated per ordered (source, target) terrain
//! pair and are independent of cell state; the dynamic factors (wind,
//! moisture, slope) are applied on top by the transition strategies.

use super::TerrainType;

/// Base ignition probability table indexed `[source][target]` by terrain
/// ordinal. Pairings with no calibrated value carry 0.0, so a lookup can
/// never fail.
const BASE_IGNITION_PROB: [[f32; TerrainType::COUNT]; TerrainType::COUNT] = [
    // source: Chaparral
    [0.45, 0.25, 0.50, 0.0, 0.35, 0.25],
    // source: DenseForest
    [0.15, 0.15, 0.24, 0.0, 0.35, 0.20],
    // source: CanyonScrubland
    [0.45, 0.25, 0.50, 0.0, 0.35, 0.35],
    // source: Lake
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    // source: Source
    [0.80, 0.70, 0.90, 0.0, 1.00, 0.95],
    // source: Town
    [0.20, 0.20, 0.20, 0.0, 0.35, 0.15],
];

/// Base probability that fire spreads from a burning `source` cell into an
/// adjacent `target` cell, before wind, moisture, and slope modulation.
#[inline]
pub fn base_ignition_prob(source: TerrainType, target: TerrainType) -> f32 {
    BASE_IGNITION_PROB[source as usize][target as usize]
}

/// Per-generation regrowth rate of a vegetation type. Inert terrain
/// (lake, source, town) never regrows and carries 0.0.
#[inline]
pub fn regrowth_rate(terrain: TerrainType) -> f32 {
    match terrain {
        TerrainType::Chaparral => 0.02,
        TerrainType::DenseForest => 0.01,
        TerrainType::CanyonScrubland => 0.015,
        TerrainType::Lake | TerrainType::Source | TerrainType::Town => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lake_never_ignites() {
        for source in TerrainType::ALL {
            assert_eq!(
                base_ignition_prob(source, TerrainType::Lake),
                0.0,
                "lake must be inert regardless of source {source:?}"
            );
        }
    }

    #[test]
    fn test_source_is_strongest_igniter() {
        for target in TerrainType::ALL {
            for source in TerrainType::ALL {
                assert!(
                    base_ignition_prob(TerrainType::Source, target)
                        >= base_ignition_prob(source, target),
                    "a fire source should dominate {source:?} when igniting {target:?}"
                );
            }
        }
    }

    #[test]
    fn test_probabilities_in_range() {
        for source in TerrainType::ALL {
            for target in TerrainType::ALL {
                let p = base_ignition_prob(source, target);
                assert!((0.0..=1.0).contains(&p));
            }
        }
    }

    #[test]
    fn test_regrowth_rates() {
        assert_eq!(regrowth_rate(TerrainType::Chaparral), 0.02);
        assert_eq!(regrowth_rate(TerrainType::DenseForest), 0.01);
        assert_eq!(regrowth_rate(TerrainType::CanyonScrubland), 0.015);
        assert_eq!(regrowth_rate(TerrainType::Lake), 0.0);
        assert_eq!(regrowth_rate(TerrainType::Source), 0.0);
        assert_eq!(regrowth_rate(TerrainType::Town), 0.0);
    }
}
