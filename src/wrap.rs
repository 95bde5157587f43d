//! Differences between values that live in a finite looped space.
//!
//! A spline driving a rotation should move from 6.2 to 0.1 radians by
//! crossing 2pi rather than sweeping backward through the whole circle.
//! Giving the spline a spatial extent of 2pi makes every difference it
//! takes between neighboring control points the shortest signed path
//! around that circle.
use num_traits::Float;

/// Shortest signed difference `a - b` in a looped space of circumference `extent`.
///
/// An `extent` of zero or less disables wrapping and returns `a - b`.
///
/// Otherwise the candidates are the direct difference, the difference
/// against `b` shifted down by one period, and against `b` shifted up by one
/// period, in that order. The one with the smallest magnitude wins and ties
/// keep the earlier candidate. Including the direct difference is
/// deliberate: comparing only the two shifted candidates would force values
/// that never cross the seam to go the long way around.
///
/// ```rust
/// use cspline::wrapped_difference;
///
/// let tau = core::f64::consts::TAU;
/// // Going forward across the seam is shorter than going back.
/// let d = wrapped_difference(0.1, 6.2, tau);
/// assert!((d - (0.1 - (6.2 - tau))).abs() < 1e-12);
///
/// // Nearby values are not wrapped.
/// assert_eq!(wrapped_difference(1.0, 0.5, tau), 0.5);
/// ```
#[inline]
pub fn wrapped_difference<T: Float>(a: T, b: T, extent: T) -> T {
    let direct = a - b;
    if extent <= T::zero() {
        return direct;
    }

    let plus_diff = a - (b + extent);
    let minus_diff = a - (b - extent);

    let mut best = direct;
    if minus_diff.abs() < best.abs() {
        best = minus_diff;
    }
    if plus_diff.abs() < best.abs() {
        best = plus_diff;
    }
    best
}
