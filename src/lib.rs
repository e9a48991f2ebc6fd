//! Disha-MCL — Monte Carlo localization from landmark bearings
//!
//! Estimates the pose (position + heading) of a wheeled vehicle moving
//! under a noisy bicycle-steering motion model, from noisy bearing
//! observations to fixed landmarks. A population of hypothesized poses
//! is propagated through motion, re-weighted by observation likelihood,
//! and resampled to concentrate probability mass near the true pose.
//!
//! # Architecture
//!
//! The crate is organized into 3 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      sim/                           │  ← Harness
//! │        (ground-truth scenarios, tolerances)         │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                  localization/                      │  ← Core algorithms
//! │    (motion model, sensor model, particle filter)    │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │                 (types, math)                       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Conventions
//!
//! - Headings and bearings are radians in `[0, 2π)`; angular differences
//!   always take the shortest arc.
//! - The arena is an open plane — poses may leave the nominal bounds.
//! - Poses are immutable values; motion returns fresh instances.
//! - All randomness flows through seedable generators so that runs are
//!   reproducible (config seed 0 opts into entropy).
//!
//! # Example
//!
//! ```
//! use disha_mcl::{
//!     Control, ParticleFilter, ParticleFilterConfig, Tolerances,
//! };
//! use disha_mcl::localization::NoiseConfig;
//! use disha_mcl::sim::{generate_ground_truth, within_tolerance};
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use std::f64::consts::PI;
//!
//! let config = ParticleFilterConfig {
//!     seed: 42,
//!     ..Default::default()
//! };
//! let motions = vec![Control::new(2.0 * PI / 20.0, 12.0); 6];
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let truth = generate_ground_truth(
//!     &motions,
//!     &config.world,
//!     config.motion,
//!     config.noise,
//!     &mut rng,
//! )
//! .unwrap();
//!
//! let mut filter = ParticleFilter::new(config).unwrap();
//! let estimate = filter.run(&motions, &truth.measurements).unwrap();
//! # let _ = within_tolerance(&truth.final_pose, &estimate, &Tolerances::default());
//! ```

pub mod core;
pub mod localization;
pub mod sim;

pub use crate::core::types::{Control, Landmark, Pose, PoseError, WorldConfig};
pub use crate::localization::{
    run_particle_filter, BearingModel, FilterError, MotionConfig, MotionError, MotionModel,
    NoiseConfig, ParticleFilter, ParticleFilterConfig, SensorError,
};
pub use crate::sim::Tolerances;
