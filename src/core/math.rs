//! Mathematical primitives for planar localization.
//!
//! Functions for bearing wrapping and angular arithmetic. Bearings follow
//! the compass convention: every stored angle lives in `[0, 2π)`, while
//! angular *differences* live in `[-π, π]`.

use std::f64::consts::PI;

/// Wrap an angle into `[0, 2π)`.
///
/// # Example
/// ```
/// use disha_mcl::core::math::wrap_angle;
/// use std::f64::consts::PI;
///
/// assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-12);
/// assert!((wrap_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
/// ```
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    angle.rem_euclid(2.0 * PI)
}

/// Shortest signed arc from angle `b` to angle `a`.
///
/// Returns `a - b` wrapped into `[-π, π]`. Raw subtraction of two
/// `[0, 2π)` bearings is not the true angular error; this is.
///
/// # Example
/// ```
/// use disha_mcl::core::math::angle_diff;
/// use std::f64::consts::PI;
///
/// // Crossing the 0/2π boundary takes the short way.
/// let diff = angle_diff(0.1, 2.0 * PI - 0.1);
/// assert!((diff - 0.2).abs() < 1e-12);
/// ```
#[inline]
pub fn angle_diff(a: f64, b: f64) -> f64 {
    (a - b + PI).rem_euclid(2.0 * PI) - PI
}
