//! Bearing sensor model and observation likelihood.
//!
//! Each landmark yields one bearing: the direction to the landmark
//! measured relative to the vehicle heading, wrapped into `[0, 2π)`.
//! The likelihood of an observation vector is the product of independent
//! Gaussian densities over the per-landmark bearing errors. It behaves
//! as a relative importance weight, not a normalized probability.

use rand::Rng;
use std::f64::consts::PI;
use thiserror::Error;

use crate::core::math::{angle_diff, wrap_angle};
use crate::core::types::{Landmark, Pose};

use super::noise::gaussian;

/// Sensor model errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SensorError {
    /// Likelihood evaluation requires a strictly positive bearing noise;
    /// zero would divide by zero inside the Gaussian density.
    #[error("bearing noise must be positive for likelihood evaluation, got {0}")]
    DegenerateBearingNoise(f64),
}

/// Bearing-to-landmark sensor model.
///
/// Holds the landmark table (fixed observation order) and the bearing
/// noise for the lifetime of a run.
#[derive(Debug, Clone)]
pub struct BearingModel {
    landmarks: Vec<Landmark>,
    bearing_noise: f64,
}

impl BearingModel {
    /// Create a sensor model over a fixed landmark table.
    pub fn new(landmarks: Vec<Landmark>, bearing_noise: f64) -> Self {
        Self {
            landmarks,
            bearing_noise,
        }
    }

    /// The landmark table, in observation order.
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    /// Noise-free bearings to every landmark, in landmark order.
    pub fn predict(&self, pose: &Pose) -> Vec<f64> {
        self.landmarks
            .iter()
            .map(|lm| wrap_angle((lm.y - pose.y).atan2(lm.x - pose.x) - pose.heading))
            .collect()
    }

    /// Bearings with measurement noise applied, in landmark order.
    pub fn observe<R: Rng + ?Sized>(&self, pose: &Pose, rng: &mut R) -> Vec<f64> {
        self.landmarks
            .iter()
            .map(|lm| {
                let bearing = (lm.y - pose.y).atan2(lm.x - pose.x) - pose.heading;
                wrap_angle(gaussian(rng, bearing, self.bearing_noise))
            })
            .collect()
    }

    /// Relative likelihood that `observed` was measured from `pose`.
    ///
    /// Product over landmarks of the Gaussian density of the shortest-arc
    /// bearing error. Strictly positive and finite for positive bearing
    /// noise, though it underflows to zero for wildly wrong poses.
    pub fn likelihood(&self, pose: &Pose, observed: &[f64]) -> Result<f64, SensorError> {
        if self.bearing_noise <= 0.0 {
            return Err(SensorError::DegenerateBearingNoise(self.bearing_noise));
        }
        debug_assert_eq!(observed.len(), self.landmarks.len());

        let var = self.bearing_noise * self.bearing_noise;
        let norm = (2.0 * PI * var).sqrt();
        let weight = self
            .predict(pose)
            .iter()
            .zip(observed)
            .map(|(&predicted, &measured)| {
                let err = angle_diff(measured, predicted);
                (-err * err / (2.0 * var)).exp() / norm
            })
            .product();
        Ok(weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::WorldConfig;
    use approx::assert_relative_eq;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::f64::consts::FRAC_PI_4;

    fn corners() -> Vec<Landmark> {
        WorldConfig::default().landmarks
    }

    #[test]
    fn test_predict_from_arena_center() {
        // From (50, 50) facing +x the corner landmarks sit at odd
        // multiples of π/4. Landmark order: (0,100), (0,0), (100,0), (100,100).
        let model = BearingModel::new(corners(), 0.0);
        let bearings = model.predict(&Pose::new(50.0, 50.0, 0.0));

        assert_eq!(bearings.len(), 4);
        assert_relative_eq!(bearings[0], 7.0 * FRAC_PI_4, epsilon = 1e-12);
        assert_relative_eq!(bearings[1], 5.0 * FRAC_PI_4, epsilon = 1e-12);
        assert_relative_eq!(bearings[2], 3.0 * FRAC_PI_4, epsilon = 1e-12);
        assert_relative_eq!(bearings[3], FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn test_predict_subtracts_heading() {
        let model = BearingModel::new(corners(), 0.0);
        let facing_x = model.predict(&Pose::new(50.0, 50.0, 0.0));
        let rotated = model.predict(&Pose::new(50.0, 50.0, FRAC_PI_4));

        for (a, b) in facing_x.iter().zip(&rotated) {
            assert_relative_eq!(angle_diff(*a, *b), FRAC_PI_4, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_predict_wraps_into_range() {
        let model = BearingModel::new(corners(), 0.0);
        for heading in [0.0, 1.0, 3.0, 6.0] {
            for b in model.predict(&Pose::new(12.0, 87.0, heading)) {
                assert!((0.0..2.0 * PI).contains(&b), "bearing out of range: {}", b);
            }
        }
    }

    #[test]
    fn test_observe_zero_noise_matches_predict() {
        let model = BearingModel::new(corners(), 0.0);
        let pose = Pose::new(30.0, 70.0, 1.5);
        let mut rng = SmallRng::seed_from_u64(42);
        assert_eq!(model.observe(&pose, &mut rng), model.predict(&pose));
    }

    #[test]
    fn test_observe_is_seeded() {
        let model = BearingModel::new(corners(), 0.1);
        let pose = Pose::new(30.0, 70.0, 1.5);
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        assert_eq!(model.observe(&pose, &mut a), model.observe(&pose, &mut b));
    }

    #[test]
    fn test_likelihood_peaks_at_true_pose() {
        let model = BearingModel::new(corners(), 0.1);
        let truth = Pose::new(40.0, 60.0, 0.7);
        let observed = model.predict(&truth);

        let at_truth = model.likelihood(&truth, &observed).unwrap();
        let nearby = model
            .likelihood(&Pose::new(41.0, 60.0, 0.7), &observed)
            .unwrap();

        // Perfect match hits the density maximum: (1/√(2πσ²))⁴.
        let peak = (2.0 * PI * 0.01).sqrt().powi(-4);
        assert_relative_eq!(at_truth, peak, epsilon = 1e-9);
        assert!(nearby < at_truth);
        assert!(nearby > 0.0);
    }

    #[test]
    fn test_likelihood_positive_and_finite() {
        let model = BearingModel::new(corners(), 0.3);
        let observed = model.predict(&Pose::new(10.0, 10.0, 0.0));
        for x in [0.0, 25.0, 50.0, 99.0] {
            for heading in [0.0, 1.0, 2.0, 5.0] {
                let w = model
                    .likelihood(&Pose::new(x, 50.0, heading), &observed)
                    .unwrap();
                assert!(w > 0.0 && w.is_finite(), "weight {} at x={}", w, x);
            }
        }
    }

    #[test]
    fn test_likelihood_uses_shortest_arc_error() {
        // Observed just above 0, predicted just below 2π: tiny true
        // error, so the weight must stay near the peak.
        let model = BearingModel::new(vec![Landmark::new(0.0, 100.0)], 0.1);
        // Pose chosen so the predicted bearing is 2π - 0.05.
        let pose = Pose::new(0.0, 0.0, 0.05);
        let predicted = model.predict(&pose)[0];
        assert_relative_eq!(predicted, 2.0 * PI - 0.05, epsilon = 1e-12);

        let w = model.likelihood(&pose, &[0.05]).unwrap();
        let peak = 1.0 / (2.0 * PI * 0.01).sqrt();
        // True error is 0.1 rad, one sigma.
        assert_relative_eq!(w, peak * (-0.5f64).exp(), epsilon = 1e-9);
    }

    #[test]
    fn test_likelihood_rejects_zero_noise() {
        let model = BearingModel::new(corners(), 0.0);
        let err = model
            .likelihood(&Pose::identity(), &[0.0, 0.0, 0.0, 0.0])
            .unwrap_err();
        assert_eq!(err, SensorError::DegenerateBearingNoise(0.0));
    }
}
