//! Vehicle pose type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::math::wrap_angle;

/// Errors from checked pose construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoseError {
    /// Heading supplied outside `[0, 2π)`.
    #[error("heading {0} outside [0, 2π)")]
    InvalidHeading(f64),
}

/// Vehicle pose in the plane.
///
/// Position (x, y) in world units and heading in radians. The plane is
/// open and non-cyclic: positions may leave the arena bounds. The heading
/// is always held in `[0, 2π)`; every constructor and every motion step
/// re-normalizes it.
///
/// Poses are immutable values. Motion produces a new pose and never
/// aliases or mutates the prior one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// X position in world units.
    pub x: f64,
    /// Y position in world units.
    pub y: f64,
    /// Heading in radians, held in `[0, 2π)`.
    pub heading: f64,
}

impl Pose {
    /// Create a new pose, wrapping the heading into `[0, 2π)`.
    #[inline]
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            x,
            y,
            heading: wrap_angle(heading),
        }
    }

    /// Create a pose from a heading that must already be in `[0, 2π)`.
    ///
    /// Use this at trust boundaries (user-supplied starting poses) where
    /// an out-of-range heading indicates a caller bug rather than
    /// accumulated arithmetic.
    pub fn checked(x: f64, y: f64, heading: f64) -> Result<Self, PoseError> {
        if !(0.0..2.0 * std::f64::consts::PI).contains(&heading) {
            return Err(PoseError::InvalidHeading(heading));
        }
        Ok(Self { x, y, heading })
    }

    /// Pose at the origin facing along +x.
    #[inline]
    pub fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            heading: 0.0,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::fmt::Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[x={:.4} y={:.4} heading={:.4}]",
            self.x, self.y, self.heading
        )
    }
}
