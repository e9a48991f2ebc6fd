//! Simulation harness: ground-truth scenarios and acceptance checks.
//!
//! Thin collaborators around the localization core — nothing here is
//! needed to run the filter on real recorded data.

mod scenario;

pub use scenario::{generate_ground_truth, within_tolerance, GroundTruth, Tolerances};
