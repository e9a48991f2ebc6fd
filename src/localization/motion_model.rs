//! Bicycle-steering motion model for particle prediction.
//!
//! Advances a pose along a circular arc whose curvature is set by the
//! steering angle and the wheelbase. When the accumulated turn over a
//! step is below a small tolerance the arc radius blows up, so the model
//! switches to a straight-line approximation; the two branches agree in
//! the limit `turn → 0`.

use rand::Rng;
use std::f64::consts::FRAC_PI_4;
use thiserror::Error;

use crate::core::types::{Control, Pose};

use super::noise::{gaussian, NoiseConfig};

/// Motion model errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Commanded steering angle beyond the configured limit.
    #[error("steering angle {steering} exceeds limit ±{max}")]
    InvalidSteering { steering: f64, max: f64 },

    /// Commanded travel distance is negative.
    #[error("negative travel distance {0}")]
    InvalidDistance(f64),
}

/// Configuration for the bicycle motion model.
#[derive(Debug, Clone, Copy)]
pub struct MotionConfig {
    /// Vehicle wheelbase in world units.
    pub wheelbase: f64,

    /// Maximum allowed commanded steering angle (radians).
    pub max_steering: f64,

    /// Turn magnitude below which the straight-line approximation is
    /// used instead of the arc formula. Guards the `distance / turn`
    /// division; also covers zero steering exactly.
    pub turn_tolerance: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            wheelbase: 20.0,
            max_steering: FRAC_PI_4,
            turn_tolerance: 1e-3,
        }
    }
}

/// Bicycle motion model.
///
/// Holds the vehicle geometry and actuation noise for the lifetime of a
/// run. Every step returns a fresh [`Pose`]; inputs are never mutated.
#[derive(Debug, Clone)]
pub struct MotionModel {
    config: MotionConfig,
    noise: NoiseConfig,
}

impl MotionModel {
    /// Create a motion model with the given geometry and noise.
    pub fn new(config: MotionConfig, noise: NoiseConfig) -> Self {
        Self { config, noise }
    }

    /// Get the configuration.
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Advance a pose by one control step without noise.
    pub fn step(&self, pose: &Pose, control: &Control) -> Result<Pose, MotionError> {
        self.validate(control)?;
        Ok(self.advance(pose, control.steering, control.distance))
    }

    /// Advance a pose by one control step with actuation noise.
    ///
    /// The *commanded* control is validated; the noisy realization is
    /// not, so noise may push the effective steering past the limit or
    /// the effective distance below zero. That is the intended physics:
    /// the limit constrains commands, not what the wheels actually do.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        pose: &Pose,
        control: &Control,
        rng: &mut R,
    ) -> Result<Pose, MotionError> {
        self.validate(control)?;
        let steering = gaussian(rng, control.steering, self.noise.steering);
        let distance = gaussian(rng, control.distance, self.noise.distance);
        Ok(self.advance(pose, steering, distance))
    }

    fn validate(&self, control: &Control) -> Result<(), MotionError> {
        if control.steering.abs() > self.config.max_steering {
            return Err(MotionError::InvalidSteering {
                steering: control.steering,
                max: self.config.max_steering,
            });
        }
        if control.distance < 0.0 {
            return Err(MotionError::InvalidDistance(control.distance));
        }
        Ok(())
    }

    /// Apply the kinematics to an (already noisy) steering and distance.
    fn advance(&self, pose: &Pose, steering: f64, distance: f64) -> Pose {
        let turn = steering.tan() * distance / self.config.wheelbase;

        if turn.abs() < self.config.turn_tolerance {
            // Straight-line approximation.
            Pose::new(
                pose.x + distance * pose.heading.cos(),
                pose.y + distance * pose.heading.sin(),
                pose.heading + turn,
            )
        } else {
            // Arc about the rotation center; rotate the position back
            // out along the new heading.
            let radius = distance / turn;
            let cx = pose.x - pose.heading.sin() * radius;
            let cy = pose.y + pose.heading.cos() * radius;
            let heading = crate::core::math::wrap_angle(pose.heading + turn);
            Pose::new(cx + heading.sin() * radius, cy - heading.cos() * radius, heading)
        }
    }
}
