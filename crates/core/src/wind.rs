//! Prevailing wind model
//!
//! Wind speed follows a Weibull distribution fitted to observed speeds;
//! every query draws a fresh sample from the run's RNG stream. The model
//! converts a candidate fire-spread compass bearing into a scalar
//! contribution factor: spread aligned with the prevailing direction is
//! favoured, and the directional bias sharpens as the sampled speed
//! approaches a 30 m/s reference cap.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Wind speed (m/s) at which the directional bias saturates
pub const REFERENCE_SPEED_CAP: f32 = 30.0;

/// Lower bound of the spread contribution; even spread dead against the
/// wind keeps a residual chance
pub const MIN_CONTRIBUTION: f32 = 0.1;

/// Minimal angular difference between two compass bearings, in degrees
/// (always in [0, 180]).
pub fn angular_difference(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Prevailing wind for one simulation run.
///
/// Immutable for the run; all randomness comes from the RNG handle passed
/// to each query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindModel {
    /// Mean observed wind speed, m/s
    pub mean_speed: f32,
    /// Compass bearing the wind blows toward, degrees
    pub direction: f32,
    /// Weibull shape parameter k
    pub shape_k: f32,
    /// Weibull scale parameter c
    pub scale_c: f32,
}

impl WindModel {
    pub fn new(mean_speed: f32, direction: f32, shape_k: f32, scale_c: f32) -> Self {
        WindModel {
            mean_speed,
            direction,
            shape_k,
            scale_c,
        }
    }

    /// Parameters fitted to the observed speed record (mean 13.892 m/s,
    /// k = 37.284, c = 14.778) with a chosen prevailing bearing.
    pub fn fitted(direction: f32) -> Self {
        WindModel::new(13.892, direction, 37.284, 14.778)
    }

    /// Draw an instantaneous wind speed by Weibull inverse-CDF sampling:
    /// `c * (-ln(1 - u))^(1/k)` for uniform `u`.
    pub fn sample_speed(&self, rng: &mut dyn RngCore) -> f32 {
        let u: f32 = rng.random();
        self.scale_c * (-(1.0 - u).ln()).powf(1.0 / self.shape_k)
    }

    /// Contribution factor for fire spreading along `fire_bearing`
    /// (compass degrees, the direction of travel from the burning
    /// neighbour into the receiving cell).
    ///
    /// Draws a fresh speed, then shapes a Gaussian of the angular
    /// difference to the prevailing direction: higher speeds narrow the
    /// Gaussian and raise its overall scale. The result is clamped into
    /// `[MIN_CONTRIBUTION, 1.0]`.
    pub fn fire_spread_contribution(&self, fire_bearing: f32, rng: &mut dyn RngCore) -> f32 {
        let speed = self.sample_speed(rng);
        let theta = angular_difference(self.direction, fire_bearing).to_radians();

        let f = (speed / REFERENCE_SPEED_CAP).min(1.0);

        let sigma = (1.0 - f) + 0.3;
        let y = MIN_CONTRIBUTION + 0.9 * (-(theta / sigma).powi(2)).exp();

        (y * (0.5 + 0.5 * f)).clamp(MIN_CONTRIBUTION, 1.0)
    }
}
