//! Arena configuration.

use serde::{Deserialize, Serialize};

use super::Landmark;

/// Immutable arena description: landmark positions and nominal extent.
///
/// The landmark order is significant — observation vectors carry one
/// bearing per landmark in this order. The arena is open: `size` bounds
/// only where random poses are drawn, not where vehicles may travel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Landmarks in fixed observation order.
    pub landmarks: Vec<Landmark>,
    /// Nominal arena extent in world units (poses are drawn in `[0, size)²`).
    pub size: f64,
}

impl Default for WorldConfig {
    /// Reference arena: a 100-unit square with a landmark at each corner.
    fn default() -> Self {
        Self {
            landmarks: vec![
                Landmark::new(0.0, 100.0),
                Landmark::new(0.0, 0.0),
                Landmark::new(100.0, 0.0),
                Landmark::new(100.0, 100.0),
            ],
            size: 100.0,
        }
    }
}
