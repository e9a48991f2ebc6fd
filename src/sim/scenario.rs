//! Scripted ground-truth scenarios.
//!
//! Drives a simulated vehicle along a control script with actuation
//! noise, recording one noisy bearing observation per step. The output
//! pairs directly with [`ParticleFilter::run`] and the tolerance check
//! closes the loop for end-to-end trials.
//!
//! [`ParticleFilter::run`]: crate::localization::ParticleFilter::run

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::math::angle_diff;
use crate::core::types::{Control, Pose, WorldConfig};
use crate::localization::{
    random_pose, BearingModel, MotionConfig, MotionError, MotionModel, NoiseConfig,
};

/// Pass/fail tolerances for comparing an estimate against ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    /// Maximum absolute error in each of x and y.
    pub xy: f64,
    /// Maximum absolute shortest-arc heading error (radians).
    pub heading: f64,
}

impl Default for Tolerances {
    /// Reference acceptance thresholds: 15 units in position, 0.25 rad
    /// in heading.
    fn default() -> Self {
        Self {
            xy: 15.0,
            heading: 0.25,
        }
    }
}

/// A generated ground-truth run: the final true pose and the bearing
/// observations recorded along the way.
#[derive(Debug, Clone)]
pub struct GroundTruth {
    /// True pose after the last control step.
    pub final_pose: Pose,
    /// One observation vector per step, in step order.
    pub measurements: Vec<Vec<f64>>,
}

/// Drive a simulated vehicle along `motions` from a random start pose.
///
/// Actuation noise perturbs every step and measurement noise every
/// recorded bearing, so repeated calls with the same script and a fresh
/// RNG produce distinct trajectories. Fails if the script itself is
/// invalid (excess steering or negative distance).
pub fn generate_ground_truth<R: Rng + ?Sized>(
    motions: &[Control],
    world: &WorldConfig,
    motion_config: MotionConfig,
    noise: NoiseConfig,
    rng: &mut R,
) -> Result<GroundTruth, MotionError> {
    let motion = MotionModel::new(motion_config, noise);
    let sensor = BearingModel::new(world.landmarks.clone(), noise.bearing);

    let mut pose = random_pose(world, rng);
    let mut measurements = Vec::with_capacity(motions.len());
    for control in motions {
        pose = motion.sample(&pose, control, rng)?;
        measurements.push(sensor.observe(&pose, rng));
    }

    Ok(GroundTruth {
        final_pose: pose,
        measurements,
    })
}

/// Check an estimate against ground truth.
///
/// Position errors are compared per axis; the heading error takes the
/// shortest arc so estimates straddling the 0/2π boundary are judged
/// fairly.
pub fn within_tolerance(truth: &Pose, estimate: &Pose, tolerances: &Tolerances) -> bool {
    (truth.x - estimate.x).abs() < tolerances.xy
        && (truth.y - estimate.y).abs() < tolerances.xy
        && angle_diff(estimate.heading, truth.heading).abs() < tolerances.heading
}
