//! Cubic splines through ordered control points in any number of dimensions,
//! no-std compatible, with straight or looped point sequences and optionally
//! looped value spaces (angles that wrap at 2pi, for example).
//!
//! # Solving
//! Each axis solves a tridiagonal system (cyclic tridiagonal when looped)
//! for the slope at every control point. The matrix depends only on the
//! number of points, so its elimination is done once per point count and
//! remembered in a [`SolutionCache`]; solving a spline then only costs a
//! pass over its right-hand side.
//!
//! | Operation        | RAM      | Cost                              |
//! |------------------|----------|-----------------------------------|
//! | solve, cache hit | O(n)     | O(n) per axis + O(cache) lookup   |
//! | solve, miss      | O(n)     | O(n) per axis + O(n) elimination  |
//! | evaluate         | O(ndims) | O(1) per axis                     |
//!
//! Inputs with 0, 1, or 2 points, or with every point identical, never reach
//! the linear system and never produce NaN.
//!
//! # Example: Looped Path w/ Wrapped Heading
//! ```rust
//! use cspline::{CubicSplineN, SplineConfig};
//! use core::f64::consts::TAU;
//!
//! // x, y, heading
//! let mut path = CubicSplineN::with_config(SplineConfig {
//!     dimension: 3,
//!     size: 5,
//!     looped: true,
//!     ..Default::default()
//! });
//! path.set_spatial_extent(2, TAU).unwrap();
//!
//! let step = TAU / 5.0;
//! for i in 0..5 {
//!     let heading = i as f64 * step;
//!     path.set_point(i, &[heading.cos(), heading.sin(), heading]).unwrap();
//! }
//! path.solve();
//!
//! let pos = path.evaluate(1.5);
//! assert_eq!(pos.len(), 3);
//!
//! // The closing segment runs from 4/5 of a turn across the seam back to 0,
//! // and the heading keeps turning forward at the same rate.
//! let vel = path.evaluate_derivative(4.5);
//! assert!((vel[2] - step).abs() < 1e-9);
//! ```
//!
//! # Example: Explicit Cache w/o Std
//! ```rust
//! use cspline::{CubicSpline, Lookup, SolutionCache};
//!
//! let mut cache = SolutionCache::new();
//! let mut spline = CubicSpline::from_values(&[0.0_f32, 1.0, 2.0, 3.0]);
//! spline.solve_straight_with(&mut cache);
//!
//! // Another spline of the same size reuses the eliminated pivots
//! let mut diagonals = [0.0_f32; 4];
//! assert_eq!(cache.solve_diagonals_straight(&mut diagonals), Lookup::Hit);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
// These "needless" range loops are a significant speedup
#![allow(clippy::needless_range_loop)]

extern crate alloc;

pub mod cache;
pub use cache::{Lookup, SolutionCache, MIN_SYSTEM_ROWS, SOLUTION_CACHE_LIMIT};
#[cfg(feature = "std")]
pub use cache::{with_shared_cache, SharedCache};

pub mod error;
pub use error::{SplineError, SplineResult};

pub mod multi_dim;
pub use multi_dim::{CubicSplineN, SplineConfig};

pub mod one_dim;
pub use one_dim::{Coefficients, ControlPoint, CubicSpline};

pub mod wrap;
pub use wrap::wrapped_difference;

#[cfg(feature = "std")]
pub mod utils;

#[cfg(all(test, feature = "std"))]
pub(crate) mod testing;
