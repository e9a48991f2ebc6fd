//! Monte Carlo localization: motion model, sensor model, particle filter.
//!
//! # Components
//!
//! - [`MotionModel`]: stochastic bicycle-steering kinematics
//! - [`BearingModel`]: bearing-to-landmark prediction and likelihood
//! - [`ParticleFilter`]: predict/weight/resample cycle with aggregation
//!
//! # Example
//!
//! ```
//! use disha_mcl::core::types::Control;
//! use disha_mcl::localization::{run_particle_filter, NoiseConfig};
//! use std::f64::consts::PI;
//!
//! let motions = vec![Control::new(2.0 * PI / 20.0, 12.0); 6];
//! // One bearing per landmark per step, recorded elsewhere.
//! let measurements = vec![vec![0.9, 2.1, 3.2, 4.4]; 6];
//!
//! let noise = NoiseConfig::new(0.1, 0.1, 5.0);
//! let estimate = run_particle_filter(&motions, &measurements, noise, 500).unwrap();
//! assert!(estimate.heading >= 0.0 && estimate.heading < 2.0 * PI);
//! ```

mod motion_model;
mod noise;
mod particle_filter;
mod sensor_model;

pub use motion_model::{MotionConfig, MotionError, MotionModel};
pub use noise::{gaussian, NoiseConfig};
pub use particle_filter::{random_pose, FilterError, ParticleFilter, ParticleFilterConfig};
pub use sensor_model::{BearingModel, SensorError};

use crate::core::types::{Control, Pose};

/// Run a particle filter over a recorded sequence with default vehicle
/// geometry and arena, returning the aggregated pose estimate.
///
/// Convenience wrapper around [`ParticleFilter`] for callers that only
/// need the flat entry point: noise parameters and population size in,
/// estimate out. The RNG is entropy-seeded; construct a
/// [`ParticleFilter`] with an explicit seed for reproducible runs.
pub fn run_particle_filter(
    motions: &[Control],
    measurements: &[Vec<f64>],
    noise: NoiseConfig,
    num_particles: usize,
) -> Result<Pose, FilterError> {
    let config = ParticleFilterConfig {
        num_particles,
        noise,
        ..Default::default()
    };
    ParticleFilter::new(config)?.run(motions, measurements)
}
