//! Straight (natural-end) spline solve.
//!
//! The system for the slopes `x` of `n` points looks like
//!
//! ```text
//! | 2 1 0 0 |   | x0 |   | 3 (p1 - p0) |
//! | 1 4 1 0 | * | x1 | = | 3 (p2 - p0) |
//! | 0 1 4 1 |   | x2 |   | 3 (p3 - p1) |
//! | 0 0 1 2 |   | x3 |   | 3 (p3 - p2) |
//! ```
//!
//! The pivots come from the solution cache. Here the same row operations
//! are replayed on the right-hand side, each row is divided by its pivot,
//! and a backward sweep removes the 1s above the diagonal.
use alloc::vec::Vec;

use num_traits::Float;

use super::CubicSpline;
use crate::wrap::wrapped_difference;

impl<T: Float> CubicSpline<T> {
    /// Finish a straight solve given the eliminated pivots. Requires at least 3 points.
    pub(super) fn solve_straight_from(&mut self, diagonals: &[T]) {
        let mut results = self.straight_results();
        let last = results.len();

        // Forward: add row[i] / -[ri][ci] to row[i+1] to zero [ri+1][ci]
        for i in 0..last - 1 {
            results[i + 1] = results[i + 1] - results[i] / diagonals[i];
        }

        // Only the diagonal and the 1s above it are left
        for i in 0..last {
            results[i] = results[i] / diagonals[i];
        }
        for i in (0..last - 1).rev() {
            results[i] = results[i] - results[i + 1] / diagonals[i];
        }

        self.set_results(&results);
    }

    /// Right-hand side of the straight system.
    fn straight_results(&self) -> Vec<T> {
        let three = T::one() + T::one() + T::one();
        let extent = self.spatial_extent;
        let a = |i: usize| self.points[i].a;
        let last = self.points.len();

        let mut results = Vec::with_capacity(last);
        results.push(three * wrapped_difference(a(1), a(0), extent));
        for i in 1..last - 1 {
            results.push(three * wrapped_difference(a(i + 1), a(i - 1), extent));
        }
        results.push(three * wrapped_difference(a(last - 1), a(last - 2), extent));
        results
    }
}
