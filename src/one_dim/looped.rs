//! Looped (periodic) spline solve.
//!
//! Point 0 follows the last point, which adds a 1 in two corners of the
//! matrix:
//!
//! ```text
//! | 4 1 0 0 1 | -> | 4 0 0 0 0 | -> | 4 0 0 0 0 | -> | 4 0 0 0 0 |
//! | 1 4 1 0 0 | -> | 0 d 1 0 x | -> | 0 d 0 0 0 | -> | 0 d 0 0 0 |
//! | 0 1 4 1 0 | -> | 0 1 4 1 0 | -> | 0 0 d 1 x | -> | 0 0 d 0 0 |
//! | 0 0 1 4 1 | -> | 0 0 1 4 1 | -> | 0 0 1 4 1 | -> | 0 0 0 d y |
//! | 1 0 0 1 4 | -> | 0 x 0 1 q | -> | 0 0 x 1 r | -> | 0 0 0 y s |
//! ```
//!
//! Eliminating each row drags its corner one column further along the
//! last row and column. The row before the last is special because its
//! corner lands on the ordinary 1 beside the last pivot.
use alloc::vec::Vec;

use num_traits::Float;

use super::CubicSpline;
use crate::cache::looped_corners;
use crate::wrap::wrapped_difference;

impl<T: Float> CubicSpline<T> {
    /// Finish a looped solve given the eliminated pivots. Requires at least 3 points.
    pub(super) fn solve_looped_from(&mut self, diagonals: &[T]) {
        let mut results = self.looped_results();
        let corners = looped_corners(diagonals);
        let last = results.len();
        let end = last - 1;
        let stop = end - 1;

        // Forward: zero the entry below each pivot and the corner in the last row
        for i in 0..stop {
            results[i + 1] = results[i + 1] - results[i] / diagonals[i];
            results[end] = results[end] - results[i] * corners[i] / diagonals[i];
        }
        results[end] = results[end] - results[stop] * corners[stop] / diagonals[stop];

        for i in 0..last {
            results[i] = results[i] / diagonals[i];
        }

        // Backward: clear the 1s above the diagonal and the last column
        results[stop] = results[stop] - results[end] * corners[stop] / diagonals[stop];
        for i in (0..stop).rev() {
            results[i] = results[i] - (results[i + 1] + results[end] * corners[i]) / diagonals[i];
        }

        self.set_results(&results);
    }

    /// Right-hand side of the looped system, where the neighbors of the
    /// first and last points wrap around.
    fn looped_results(&self) -> Vec<T> {
        let three = T::one() + T::one() + T::one();
        let extent = self.spatial_extent;
        let a = |i: usize| self.points[i].a;
        let last = self.points.len();

        (0..last)
            .map(|i| {
                let prev = (i + last - 1) % last;
                let next = (i + 1) % last;
                three * wrapped_difference(a(next), a(prev), extent)
            })
            .collect()
    }
}
