//! Cubic splines through points with any number of coordinates.
//!
//! A [`CubicSplineN`] is one [`CubicSpline`] per axis, all with the same
//! number of points and all solved and evaluated together. Whether the
//! point sequence loops is shared by every axis; whether the *values* of an
//! axis loop is set per axis through its spatial extent.
//!
//! Mutations mark the spline dirty, and [`CubicSplineN::solve`] does nothing
//! unless something changed since the last solve.
//!
//! ```rust
//! use cspline::{CubicSplineN, SplineConfig};
//!
//! let mut spline = CubicSplineN::with_config(SplineConfig {
//!     dimension: 2,
//!     size: 4,
//!     looped: true,
//!     ..Default::default()
//! });
//!
//! // Corners of a square
//! spline.set_point(0, &[0.0_f64, 0.0]).unwrap();
//! spline.set_point(1, &[1.0, 0.0]).unwrap();
//! spline.set_point(2, &[1.0, 1.0]).unwrap();
//! spline.set_point(3, &[0.0, 1.0]).unwrap();
//! spline.solve();
//!
//! assert_eq!(spline.evaluate(2.0), vec![1.0, 1.0]);
//! // Halfway back from the last corner to the first
//! let p = spline.evaluate(3.5);
//! assert!(p[0] < 0.0 && (p[1] - 0.5).abs() < 1e-12);
//! ```
use alloc::vec::Vec;

use itertools::izip;
use num_traits::Float;

use crate::error::{SplineError, SplineResult};
#[cfg(feature = "std")]
use crate::SharedCache;
use crate::{CubicSpline, SolutionCache};

/// How a [`CubicSplineN`] starts out and what its owner allows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplineConfig {
    /// Number of axes
    pub dimension: usize,
    /// Number of points on each axis
    pub size: usize,
    /// Whether the point sequence loops back to the start
    pub looped: bool,
    /// Set when the owner relies on the number of axes never changing;
    /// [`CubicSplineN::redimension`] is then refused.
    pub dimension_pinned: bool,
}

/// A cubic spline with one [`CubicSpline`] per axis.
#[derive(Debug, Clone)]
pub struct CubicSplineN<T> {
    splines: Vec<CubicSpline<T>>,
    looped: bool,
    dirty: bool,
    dimension_pinned: bool,
}

impl<T: Float> CubicSplineN<T> {
    /// An empty, straight spline with `dimension` axes.
    pub fn new(dimension: usize) -> Self {
        Self::with_config(SplineConfig {
            dimension,
            ..Default::default()
        })
    }

    pub fn with_config(config: SplineConfig) -> Self {
        Self {
            splines: (0..config.dimension)
                .map(|_| CubicSpline::with_size(config.size))
                .collect(),
            looped: config.looped,
            dirty: true,
            dimension_pinned: config.dimension_pinned,
        }
    }

    /// Recompute coefficients on every axis if anything changed since the last solve.
    pub fn solve_with(&mut self, cache: &mut SolutionCache<T>) {
        if !self.dirty {
            return;
        }
        log::trace!(
            "solving {} axes of {} points, looped: {}",
            self.splines.len(),
            self.size(),
            self.looped
        );
        for spline in self.splines.iter_mut() {
            if self.looped {
                spline.solve_looped_with(cache);
            } else {
                spline.solve_straight_with(cache);
            }
        }
        self.dirty = false;
    }

    /// Position at parameter `t`, one value per axis.
    pub fn evaluate(&self, t: T) -> Vec<T> {
        self.splines
            .iter()
            .map(|spline| spline.evaluate(t, self.looped))
            .collect()
    }

    /// Velocity at parameter `t`, one value per axis.
    pub fn evaluate_derivative(&self, t: T) -> Vec<T> {
        self.splines
            .iter()
            .map(|spline| spline.evaluate_derivative(t, self.looped))
            .collect()
    }

    /// Position at parameter `t`, written into `out` without allocating.
    ///
    /// # Errors
    /// * If `out` does not have one slot per axis
    pub fn evaluate_into(&self, t: T, out: &mut [T]) -> SplineResult<()> {
        self.check_dimension(out.len())?;
        for (v, spline) in out.iter_mut().zip(&self.splines) {
            *v = spline.evaluate(t, self.looped);
        }
        Ok(())
    }

    /// Velocity at parameter `t`, written into `out` without allocating.
    ///
    /// # Errors
    /// * If `out` does not have one slot per axis
    pub fn evaluate_derivative_into(&self, t: T, out: &mut [T]) -> SplineResult<()> {
        self.check_dimension(out.len())?;
        for (v, spline) in out.iter_mut().zip(&self.splines) {
            *v = spline.evaluate_derivative(t, self.looped);
        }
        Ok(())
    }

    /// Set point `i` to `values`, one value per axis.
    ///
    /// # Errors
    /// * If `values` does not have one entry per axis
    /// * If `i` is not less than the number of points
    pub fn set_point(&mut self, i: usize, values: &[T]) -> SplineResult<()> {
        self.check_dimension(values.len())?;
        self.check_point(i)?;
        for (spline, &v) in self.splines.iter_mut().zip(values) {
            spline.set_point(i, v)?;
        }
        self.dirty = true;
        Ok(())
    }

    /// Override the coefficients of point `i` on every axis.
    ///
    /// # Errors
    /// * If any of `b`, `c`, `d` does not have one entry per axis
    /// * If `i` is not less than the number of points
    pub fn set_coefficients(&mut self, i: usize, b: &[T], c: &[T], d: &[T]) -> SplineResult<()> {
        for len in [b.len(), c.len(), d.len()] {
            self.check_dimension(len)?;
        }
        self.check_point(i)?;
        for (spline, &b, &c, &d) in izip!(self.splines.iter_mut(), b, c, d) {
            spline.set_coefficients(i, b, c, d)?;
        }
        self.dirty = true;
        Ok(())
    }

    /// Coefficients of point `i` as `(b, c, d)`, each with one entry per axis.
    ///
    /// # Errors
    /// * If `i` is not less than the number of points
    pub fn get_coefficients(&self, i: usize) -> SplineResult<(Vec<T>, Vec<T>, Vec<T>)> {
        self.check_point(i)?;
        let n = self.splines.len();
        let (mut b, mut c, mut d) = (
            Vec::with_capacity(n),
            Vec::with_capacity(n),
            Vec::with_capacity(n),
        );
        for spline in &self.splines {
            let coeffs = spline.get_coefficients(i)?;
            b.push(coeffs.b);
            c.push(coeffs.c);
            d.push(coeffs.d);
        }
        Ok((b, c, d))
    }

    /// Set the period of the value space of one axis; zero disables wrapping.
    ///
    /// # Errors
    /// * If `axis` is not less than the number of axes
    pub fn set_spatial_extent(&mut self, axis: usize, extent: T) -> SplineResult<()> {
        self.check_axis(axis)?;
        self.splines[axis].set_spatial_extent(extent);
        self.dirty = true;
        Ok(())
    }

    /// # Errors
    /// * If `axis` is not less than the number of axes
    pub fn get_spatial_extent(&self, axis: usize) -> SplineResult<T> {
        self.check_axis(axis)?;
        Ok(self.splines[axis].spatial_extent())
    }

    /// Change the number of points on every axis. New points are zero.
    pub fn resize(&mut self, size: usize) {
        for spline in self.splines.iter_mut() {
            spline.resize(size);
        }
        self.dirty = true;
    }

    /// Change the number of axes. New axes get the same number of points as
    /// the existing ones, all zero.
    ///
    /// # Errors
    /// * If the dimension was pinned by the spline's config
    pub fn redimension(&mut self, dimension: usize) -> SplineResult<()> {
        if self.dimension_pinned {
            log::debug!(
                "refusing to redimension pinned spline from {} to {dimension} axes",
                self.splines.len()
            );
            return Err(SplineError::DimensionPinned);
        }
        let size = self.size();
        self.splines.resize_with(dimension, || CubicSpline::with_size(size));
        self.dirty = true;
        Ok(())
    }

    /// Number of points on each axis, or zero with no axes.
    pub fn size(&self) -> usize {
        self.splines.first().map_or(0, CubicSpline::len)
    }

    /// Number of axes.
    pub fn dimension(&self) -> usize {
        self.splines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splines.first().map_or(true, CubicSpline::is_empty)
    }

    pub fn looped(&self) -> bool {
        self.looped
    }

    /// Switch between straight and looped. A change marks the spline dirty.
    pub fn set_looped(&mut self, looped: bool) {
        if self.looped != looped {
            self.looped = looped;
            self.dirty = true;
        }
    }

    /// Whether coefficients are stale relative to the points.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_dimension_pinned(&self) -> bool {
        self.dimension_pinned
    }

    /// # Errors
    /// * If `axis` is not less than the number of axes
    pub fn axis(&self, axis: usize) -> SplineResult<&CubicSpline<T>> {
        self.check_axis(axis)?;
        Ok(&self.splines[axis])
    }

    #[inline]
    fn check_dimension(&self, len: usize) -> SplineResult<()> {
        if len != self.splines.len() {
            return Err(SplineError::DimensionMismatch {
                expected: self.splines.len(),
                actual: len,
            });
        }
        Ok(())
    }

    #[inline]
    fn check_point(&self, i: usize) -> SplineResult<()> {
        if i >= self.size() {
            return Err(SplineError::PointIndex {
                index: i,
                size: self.size(),
            });
        }
        Ok(())
    }

    #[inline]
    fn check_axis(&self, axis: usize) -> SplineResult<()> {
        if axis >= self.splines.len() {
            return Err(SplineError::AxisIndex {
                axis,
                dimension: self.splines.len(),
            });
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl<T: SharedCache> CubicSplineN<T> {
    /// Recompute coefficients on every axis if anything changed since the
    /// last solve, using the process-wide cache for `T`.
    pub fn solve(&mut self) {
        if !self.dirty {
            return;
        }
        // The shared cache is locked per axis, only while pivots are fetched
        for spline in self.splines.iter_mut() {
            if self.looped {
                spline.solve_looped();
            } else {
                spline.solve_straight();
            }
        }
        log::trace!("solved {} axes using the shared cache", self.splines.len());
        self.dirty = false;
    }
}
