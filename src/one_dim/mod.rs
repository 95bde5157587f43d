//! Cubic spline through a sequence of scalar control points.
//!
//! Control points sit at integer parameter values `0, 1, ..., n - 1`.
//! The segment starting at point `i` is
//!
//! ```text
//! a + b * t + c * t^2 + d * t^3,    t in [0, 1]
//! ```
//!
//! with `a` the value the user set and `b`, `c`, `d` solved so that the
//! value, slope, and curvature agree wherever two segments meet.
//!
//! The same spline can be solved "straight", with natural (zero curvature)
//! ends, or "looped", where the last point connects back to the first.
//! Independently of that, the values themselves may live in a looped space
//! (angles, for example) by giving the spline a nonzero spatial extent.
//!
//! ```rust
//! use cspline::{CubicSpline, SolutionCache};
//!
//! let mut spline = CubicSpline::from_values(&[0.0_f64, 1.0, 0.0, -1.0]);
//! let mut cache = SolutionCache::new();
//! spline.solve_looped_with(&mut cache);
//!
//! // Control points are hit exactly
//! assert_eq!(spline.evaluate(1.0, true), 1.0);
//! // Looping wraps the parameter
//! assert!((spline.evaluate(4.5, true) - spline.evaluate(0.5, true)).abs() < 1e-12);
//! ```
mod looped;
mod straight;

use alloc::vec::Vec;

use itertools::Itertools;
use num_traits::{Float, NumCast, ToPrimitive};

use crate::error::{SplineError, SplineResult};
use crate::wrap::wrapped_difference;
#[cfg(feature = "std")]
use crate::{cache::with_shared_cache, SharedCache};
use crate::SolutionCache;

/// One control point and the cubic segment that starts at it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint<T> {
    /// Value at the point
    pub a: T,
    pub b: T,
    pub c: T,
    pub d: T,
}

impl<T: Float> ControlPoint<T> {
    /// A point at zero with a flat segment.
    pub fn zero() -> Self {
        Self {
            a: T::zero(),
            b: T::zero(),
            c: T::zero(),
            d: T::zero(),
        }
    }

    #[inline]
    fn coefficients(&self) -> Coefficients<T> {
        Coefficients {
            b: self.b,
            c: self.c,
            d: self.d,
        }
    }

    #[inline]
    fn clear_coefficients(&mut self) {
        self.b = T::zero();
        self.c = T::zero();
        self.d = T::zero();
    }
}

/// The linear, quadratic, and cubic coefficients of one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients<T> {
    pub b: T,
    pub c: T,
    pub d: T,
}

/// Cubic spline in a single dimension.
#[derive(Debug, Clone)]
pub struct CubicSpline<T> {
    points: Vec<ControlPoint<T>>,
    /// Period of the value space, or zero for an unbounded space
    spatial_extent: T,
}

impl<T: Float> Default for CubicSpline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> CubicSpline<T> {
    /// An empty spline in an unbounded value space.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            spatial_extent: T::zero(),
        }
    }

    /// A spline of `n` points, all zero.
    pub fn with_size(n: usize) -> Self {
        let mut spline = Self::new();
        spline.resize(n);
        spline
    }

    /// An unsolved spline through `values`.
    pub fn from_values(values: &[T]) -> Self {
        Self {
            points: values
                .iter()
                .map(|&a| ControlPoint {
                    a,
                    ..ControlPoint::zero()
                })
                .collect(),
            spatial_extent: T::zero(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All control points, in order.
    pub fn points(&self) -> &[ControlPoint<T>] {
        &self.points
    }

    pub fn point(&self, i: usize) -> SplineResult<ControlPoint<T>> {
        self.check_index(i)?;
        Ok(self.points[i])
    }

    /// Grow or shrink to `n` points. New points are zero.
    pub fn resize(&mut self, n: usize) {
        self.points.resize(n, ControlPoint::zero());
    }

    pub fn spatial_extent(&self) -> T {
        self.spatial_extent
    }

    /// Period of the value space; zero or less disables wrapping.
    pub fn set_spatial_extent(&mut self, extent: T) {
        self.spatial_extent = extent;
    }

    /// Set the value of point `i`, leaving its coefficients alone.
    ///
    /// # Errors
    /// * If `i` is not less than the number of points
    pub fn set_point(&mut self, i: usize, value: T) -> SplineResult<()> {
        self.check_index(i)?;
        self.points[i].a = value;
        Ok(())
    }

    /// Override the solved coefficients of point `i`.
    ///
    /// # Errors
    /// * If `i` is not less than the number of points
    pub fn set_coefficients(&mut self, i: usize, b: T, c: T, d: T) -> SplineResult<()> {
        self.check_index(i)?;
        let point = &mut self.points[i];
        point.b = b;
        point.c = c;
        point.d = d;
        Ok(())
    }

    /// # Errors
    /// * If `i` is not less than the number of points
    pub fn get_coefficients(&self, i: usize) -> SplineResult<Coefficients<T>> {
        self.check_index(i)?;
        Ok(self.points[i].coefficients())
    }

    #[inline]
    fn check_index(&self, i: usize) -> SplineResult<()> {
        if i >= self.points.len() {
            return Err(SplineError::PointIndex {
                index: i,
                size: self.points.len(),
            });
        }
        Ok(())
    }

    /// Solve with natural ends, using `cache` for the elimination pivots.
    pub fn solve_straight_with(&mut self, cache: &mut SolutionCache<T>) {
        if self.check_minimum_size() {
            return;
        }
        let mut diagonals = alloc::vec![T::zero(); self.points.len()];
        cache.solve_diagonals_straight(&mut diagonals);
        self.solve_straight_from(&diagonals);
    }

    /// Solve as a closed loop, using `cache` for the elimination pivots.
    pub fn solve_looped_with(&mut self, cache: &mut SolutionCache<T>) {
        if self.check_minimum_size() {
            return;
        }
        let mut diagonals = alloc::vec![T::zero(); self.points.len()];
        cache.solve_diagonals_looped(&mut diagonals);
        self.solve_looped_from(&diagonals);
    }

    /// Handle the sizes that have no system to solve.
    ///
    /// Returns `true` if the coefficients are already final:
    /// * Fewer than 2 points have no segment to fit
    /// * 2 points become a straight line there and, when looped, back again
    /// * 3 or more identical points are a flat line
    ///
    /// Otherwise all coefficients are zeroed and `false` is returned.
    fn check_minimum_size(&mut self) -> bool {
        let extent = self.spatial_extent;
        match self.points.as_mut_slice() {
            [] => true,
            [only] => {
                only.clear_coefficients();
                true
            }
            [first, second] => {
                *first = ControlPoint {
                    a: first.a,
                    b: wrapped_difference(second.a, first.a, extent),
                    ..ControlPoint::zero()
                };
                *second = ControlPoint {
                    a: second.a,
                    b: wrapped_difference(first.a, second.a, extent),
                    ..ControlPoint::zero()
                };
                true
            }
            points => {
                points.iter_mut().for_each(ControlPoint::clear_coefficients);
                points.iter().map(|p| p.a).all_equal()
            }
        }
    }

    /// Turn the solved slopes into the coefficients of every segment.
    fn set_results(&mut self, slopes: &[T]) {
        let one = T::one();
        let two = one + one;
        let three = two + one;

        let n = self.points.len();
        for i in 0..n {
            let next = (i + 1) % n;
            let diff = wrapped_difference(self.points[next].a, self.points[i].a, self.spatial_extent);
            let point = &mut self.points[i];
            point.b = unnan(slopes[i]);
            point.c = unnan(three * diff - two * slopes[i] - slopes[next]);
            point.d = unnan(-two * diff + slopes[i] + slopes[next]);
        }
    }

    /// Value of the spline at parameter `t`.
    ///
    /// With `looped`, `t` is taken modulo the number of points. Without it,
    /// `t` is clamped to the fitted range and the ends hold their values.
    pub fn evaluate(&self, t: T, looped: bool) -> T {
        let Some(last) = self.points.last() else {
            return T::zero();
        };

        let (p, frac) = match self.locate(t, looped) {
            Located::Inside(p, frac) => (p, frac),
            Located::Below => return self.points[0].a,
            Located::Above => return last.a,
        };

        let point = &self.points[p];
        let frac2 = frac * frac;
        let frac3 = frac2 * frac;
        point.a + point.b * frac + point.c * frac2 + point.d * frac3
    }

    /// Slope of the spline at parameter `t`.
    ///
    /// Takes `t` the same way as [`CubicSpline::evaluate`]. Outside the fitted
    /// range of a straight spline the held ends are flat, so the slope is zero.
    pub fn evaluate_derivative(&self, t: T, looped: bool) -> T {
        if self.points.is_empty() {
            return T::zero();
        }

        let (p, frac) = match self.locate(t, looped) {
            Located::Inside(p, frac) => (p, frac),
            Located::Below | Located::Above => return T::zero(),
        };

        let two = T::one() + T::one();
        let three = two + T::one();
        let point = &self.points[p];
        point.b + two * point.c * frac + three * point.d * frac * frac
    }

    /// Evaluate at each of `locs`, writing into `out`.
    ///
    /// # Errors
    /// * If `locs` and `out` differ in length
    pub fn evaluate_into(&self, locs: &[T], looped: bool, out: &mut [T]) -> SplineResult<()> {
        if locs.len() != out.len() {
            return Err(SplineError::LengthMismatch {
                expected: locs.len(),
                actual: out.len(),
            });
        }

        for i in 0..locs.len() {
            out[i] = self.evaluate(locs[i], looped);
        }

        Ok(())
    }

    /// Evaluate at each of `locs`, allocating the output for convenience.
    #[cfg(feature = "std")]
    pub fn evaluate_many(&self, locs: &[T], looped: bool) -> Vec<T> {
        locs.iter().map(|&t| self.evaluate(t, looped)).collect()
    }

    /// Find the segment containing `t`. Requires at least one point.
    #[inline]
    fn locate(&self, t: T, looped: bool) -> Located<T> {
        let n = self.points.len();
        let last = n - 1;

        let t = if looped {
            wrap_parameter(t, <T as NumCast>::from(n).unwrap_or_else(T::max_value))
        } else if t < T::zero() {
            return Located::Below;
        } else if t >= <T as NumCast>::from(last).unwrap_or_else(T::max_value) {
            return Located::Above;
        } else {
            t
        };

        let floor = t.floor();
        // Non-finite parameters land on the first segment
        let p = floor.to_usize().unwrap_or(0).min(last);
        Located::Inside(p, t - floor)
    }
}

#[cfg(feature = "std")]
impl<T: SharedCache> CubicSpline<T> {
    /// Solve with natural ends, using the process-wide cache for `T`.
    pub fn solve_straight(&mut self) {
        if self.check_minimum_size() {
            return;
        }
        let mut diagonals = alloc::vec![T::zero(); self.points.len()];
        with_shared_cache(|cache: &mut SolutionCache<T>| {
            cache.solve_diagonals_straight(&mut diagonals);
        });
        self.solve_straight_from(&diagonals);
    }

    /// Solve as a closed loop, using the process-wide cache for `T`.
    pub fn solve_looped(&mut self) {
        if self.check_minimum_size() {
            return;
        }
        let mut diagonals = alloc::vec![T::zero(); self.points.len()];
        with_shared_cache(|cache: &mut SolutionCache<T>| {
            cache.solve_diagonals_looped(&mut diagonals);
        });
        self.solve_looped_from(&diagonals);
    }
}

enum Located<T> {
    Inside(usize, T),
    Below,
    Above,
}

/// Reduce `t` into `[0, period)`.
#[inline]
fn wrap_parameter<T: Float>(t: T, period: T) -> T {
    let t = t % period;
    let t = if t < T::zero() { t + period } else { t };
    // A tiny negative remainder can round up to exactly one period
    if t >= period {
        T::zero()
    } else {
        t
    }
}

#[inline]
fn unnan<T: Float>(v: T) -> T {
    if v.is_nan() {
        T::zero()
    } else {
        v
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use alloc::vec;

    #[test]
    fn test_empty_spline_evaluates_to_zero() {
        let spline = CubicSpline::<f64>::new();
        for t in [-3.0, 0.0, 0.5, 2.0, 1e9] {
            assert_eq!(spline.evaluate(t, false), 0.0);
            assert_eq!(spline.evaluate(t, true), 0.0);
            assert_eq!(spline.evaluate_derivative(t, true), 0.0);
        }
    }

    #[test]
    fn test_single_point_holds_its_value() {
        let mut spline = CubicSpline::from_values(&[4.5_f64]);
        spline.set_coefficients(0, 1.0, 2.0, 3.0).unwrap();
        spline.solve_straight_with(&mut SolutionCache::new());
        assert_eq!(
            spline.get_coefficients(0).unwrap(),
            Coefficients {
                b: 0.0,
                c: 0.0,
                d: 0.0
            }
        );
        for t in [-3.0, 0.0, 0.25, 0.75, 5.5] {
            assert_eq!(spline.evaluate(t, false), 4.5);
            assert_eq!(spline.evaluate(t, true), 4.5);
        }
    }

    #[test]
    fn test_two_points_are_a_line_both_ways() {
        let mut spline = CubicSpline::from_values(&[1.0_f64, 3.0]);
        spline.solve_looped_with(&mut SolutionCache::new());
        assert_eq!(spline.get_coefficients(0).unwrap().b, 2.0);
        assert_eq!(spline.get_coefficients(1).unwrap().b, -2.0);

        // Out and back
        assert_eq!(spline.evaluate(0.5, true), 2.0);
        assert_eq!(spline.evaluate(1.0, true), 3.0);
        assert_eq!(spline.evaluate(1.5, true), 2.0);
        assert_eq!(spline.evaluate_derivative(1.5, true), -2.0);

        // Straight holds the end
        assert_eq!(spline.evaluate(1.5, false), 3.0);
        assert_eq!(spline.evaluate_derivative(1.5, false), 0.0);
    }

    #[test]
    fn test_two_points_across_seam() {
        let tau = core::f64::consts::TAU;
        let mut spline = CubicSpline::from_values(&[6.0_f64, 0.2]);
        spline.set_spatial_extent(tau);
        spline.solve_straight_with(&mut SolutionCache::new());
        let b = spline.get_coefficients(0).unwrap().b;
        assert!((b - (0.2 + tau - 6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_line_has_no_curvature() {
        let mut spline = CubicSpline::from_values(&[0.0_f64, 1.0, 2.0, 3.0]);
        spline.solve_straight_with(&mut SolutionCache::new());
        for i in 0..3 {
            let Coefficients { b, c, d } = spline.get_coefficients(i).unwrap();
            assert!((b - 1.0).abs() < 1e-12, "b[{i}] = {b}");
            assert!(c.abs() < 1e-12, "c[{i}] = {c}");
            assert!(d.abs() < 1e-12, "d[{i}] = {d}");
        }
        assert!((spline.evaluate(1.25, false) - 1.25).abs() < 1e-12);
        assert!((spline.evaluate_derivative(2.5, false) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_identical_points_are_flat() {
        let mut spline = CubicSpline::from_values(&[5.0_f32; 5]);
        // Stale coefficients must not survive the solve
        spline.set_coefficients(2, 1.0, 1.0, 1.0).unwrap();
        spline.solve_looped_with(&mut SolutionCache::new());
        for p in spline.points() {
            assert_eq!((p.b, p.c, p.d), (0.0, 0.0, 0.0));
        }
        assert_eq!(spline.evaluate(2.7, true), 5.0);
    }

    #[test]
    fn test_coefficient_round_trip() {
        let mut spline = CubicSpline::<f64>::with_size(3);
        spline.set_coefficients(1, 0.125, -7.5, 1e6).unwrap();
        assert_eq!(
            spline.get_coefficients(1).unwrap(),
            Coefficients {
                b: 0.125,
                c: -7.5,
                d: 1e6
            }
        );
    }

    #[test]
    fn test_index_checks() {
        let mut spline = CubicSpline::<f64>::with_size(2);
        assert_eq!(
            spline.set_point(2, 1.0),
            Err(SplineError::PointIndex { index: 2, size: 2 })
        );
        assert!(spline.set_coefficients(5, 0.0, 0.0, 0.0).is_err());
        assert!(spline.get_coefficients(2).is_err());
        assert!(spline.point(2).is_err());
        assert_eq!(spline.points(), &[ControlPoint::<f64>::zero(); 2]);
    }

    #[test]
    fn test_resize_zero_fills() {
        let mut spline = CubicSpline::from_values(&[1.0_f64, 2.0]);
        spline.resize(4);
        assert_eq!(spline.len(), 4);
        assert_eq!(spline.point(1).unwrap().a, 2.0);
        assert_eq!(spline.point(3).unwrap(), ControlPoint::<f64>::zero());
        spline.resize(1);
        let first = ControlPoint {
            a: 1.0,
            ..ControlPoint::<f64>::zero()
        };
        assert_eq!(spline.points(), &[first]);
        spline.resize(0);
        assert!(spline.is_empty());
    }

    #[test]
    fn test_straight_clamps_outside_fitted_range() {
        let mut spline = CubicSpline::from_values(&[2.0_f64, -1.0, 4.0, 0.5]);
        spline.solve_straight_with(&mut SolutionCache::new());
        assert_eq!(spline.evaluate(-0.5, false), spline.evaluate(0.0, false));
        assert_eq!(spline.evaluate(-100.0, false), 2.0);
        assert_eq!(spline.evaluate(3.0, false), 0.5);
        assert_eq!(spline.evaluate(7.25, false), 0.5);
        assert_eq!(spline.evaluate_derivative(-0.5, false), 0.0);
        assert_eq!(spline.evaluate_derivative(3.5, false), 0.0);
    }

    #[test]
    fn test_looped_is_periodic() {
        let mut rng = rng_fixed_seed();
        let values: Vec<f64> = randn(&mut rng, 6);
        let mut spline = CubicSpline::from_values(&values);
        spline.solve_looped_with(&mut SolutionCache::new());

        // Dyadic parameters keep the shifted copies exact
        for t in [0.0, 0.25, 1.5, 3.125, 5.75] {
            let v = spline.evaluate(t, true);
            let dv = spline.evaluate_derivative(t, true);
            for k in [-3.0, -1.0, 1.0, 2.0, 10.0] {
                let shifted = t + k * 6.0;
                assert!((spline.evaluate(shifted, true) - v).abs() < 1e-9);
                assert!((spline.evaluate_derivative(shifted, true) - dv).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_control_points_are_interpolated() {
        let mut rng = rng_fixed_seed();
        let values: Vec<f64> = randn(&mut rng, 9);
        let mut spline = CubicSpline::from_values(&values);
        let mut cache = SolutionCache::new();

        spline.solve_straight_with(&mut cache);
        for (i, &v) in values.iter().enumerate() {
            assert_eq!(spline.evaluate(i as f64, false), v);
        }

        spline.solve_looped_with(&mut cache);
        for (i, &v) in values.iter().enumerate() {
            assert_eq!(spline.evaluate(i as f64, true), v);
        }
        // Segment ends meet the next point, including the closing segment
        let last = values.len() as f64 - 1e-12;
        assert!((spline.evaluate(last, true) - values[0]).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_into_checks_lengths() {
        let spline = CubicSpline::from_values(&[0.0_f64, 1.0, 4.0]);
        let mut out = vec![0.0; 2];
        assert_eq!(
            spline.evaluate_into(&[0.0, 1.0, 2.0], false, &mut out),
            Err(SplineError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
        spline.evaluate_into(&[0.0, 2.0], false, &mut out).unwrap();
        assert_eq!(out, vec![0.0, 4.0]);
        assert_eq!(spline.evaluate_many(&[1.0, 9.0], false), vec![1.0, 4.0]);
    }

    #[test]
    fn test_shared_cache_solve_matches_explicit_cache() {
        let values = [0.5_f32, 3.0, -2.0, 1.0, 0.0];
        let mut shared = CubicSpline::from_values(&values);
        let mut local = shared.clone();

        shared.solve_looped();
        local.solve_looped_with(&mut SolutionCache::new());
        assert_eq!(shared.points(), local.points());

        shared.solve_straight();
        local.solve_straight_with(&mut SolutionCache::new());
        assert_eq!(shared.points(), local.points());
    }

    #[test]
    fn test_wrap_parameter() {
        assert_eq!(wrap_parameter(7.5_f64, 3.0), 1.5);
        assert_eq!(wrap_parameter(-0.5_f64, 3.0), 2.5);
        assert_eq!(wrap_parameter(-3.0_f64, 3.0), 0.0);
        let t = wrap_parameter(-1e-20_f64, 3.0);
        assert!((0.0..3.0).contains(&t));
        // Huge parameters still terminate
        let t = wrap_parameter(1e30_f64, 3.0);
        assert!((0.0..3.0).contains(&t));
    }
}
