//! Landmark type.

use serde::{Deserialize, Serialize};

/// A fixed, known reference point in the arena.
///
/// Stored in (row, col) order — `y` first, then `x` — matching the
/// survey convention of the reference landmark tables. The named fields
/// keep observation code honest about which coordinate is which.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Row coordinate (y) in world units.
    pub y: f64,
    /// Column coordinate (x) in world units.
    pub x: f64,
}

impl Landmark {
    /// Create a landmark from (row, col) coordinates.
    #[inline]
    pub fn new(y: f64, x: f64) -> Self {
        Self { y, x }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_col_order() {
        let lm = Landmark::new(0.0, 100.0);
        assert_eq!(lm.y, 0.0);
        assert_eq!(lm.x, 100.0);
    }
}
