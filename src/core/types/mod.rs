//! Core value types shared across the crate.

mod control;
mod landmark;
mod pose;
mod world;

pub use control::Control;
pub use landmark::Landmark;
pub use pose::{Pose, PoseError};
pub use world::WorldConfig;
