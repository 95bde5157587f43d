//! Error type shared by every spline operation.
use thiserror::Error;

/// Result alias for fallible spline operations.
pub type SplineResult<T> = Result<T, SplineError>;

/// Precondition failures reported at the call boundary.
///
/// Every check runs before anything is mutated, so an `Err` always
/// leaves the spline exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplineError {
    /// Point index past the end of the point sequence.
    #[error("point index {index} is out of range for a spline of {size} points")]
    PointIndex { index: usize, size: usize },

    /// Axis index past the number of dimensions.
    #[error("axis index {axis} is out of range for a spline of {dimension} dimensions")]
    AxisIndex { axis: usize, dimension: usize },

    /// A per-axis sequence does not have one entry per dimension.
    #[error("expected {expected} values, one per dimension, but got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Input and output slices of a batch evaluation differ in length.
    #[error("length mismatch: {expected} observation points but {actual} output slots")]
    LengthMismatch { expected: usize, actual: usize },

    /// The owner of this spline relies on its dimension staying fixed.
    #[error("spline cannot be redimensioned because its dimension is pinned by its owner")]
    DimensionPinned,
}
