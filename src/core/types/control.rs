//! Control input type.

use serde::{Deserialize, Serialize};

/// One step of commanded motion.
///
/// Steering is the front-wheel angle in radians (positive turns left);
/// distance is the commanded travel in world units. The motion model
/// rejects controls with `|steering|` beyond its configured limit or a
/// negative distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Control {
    /// Steering angle in radians.
    pub steering: f64,
    /// Travel distance in world units.
    pub distance: f64,
}

impl Control {
    /// Create a control input.
    #[inline]
    pub fn new(steering: f64, distance: f64) -> Self {
        Self { steering, distance }
    }
}
