//! Convenience methods for sampling a spline's parameter range.
use num_traits::Float;

use crate::CubicSplineN;

/// Generates evenly spaced values from start to stop,
/// including the endpoint.
///
/// Returns an empty vector for `n == 0` and `[start]` for `n == 1`.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Vec<T>
where
    T: Float,
{
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let dx = (stop - start) / T::from(n - 1).unwrap_or_else(T::one);
            (0..n)
                .map(|i| start + T::from(i).unwrap_or_else(T::zero) * dx)
                .collect()
        }
    }
}

/// Evaluate `spline` at `n` evenly spaced parameters covering every segment,
/// one position per sample.
///
/// Straight splines are sampled over `[0, size - 1]`; looped splines over
/// `[0, size]`, so the closing segment is included and the last sample
/// repeats the first.
pub fn sample<T: Float>(spline: &CubicSplineN<T>, n: usize) -> Vec<Vec<T>> {
    let size = spline.size();
    let span = if spline.looped() { size } else { size.saturating_sub(1) };
    let stop = T::from(span).unwrap_or_else(T::zero);
    linspace(T::zero(), stop, n)
        .into_iter()
        .map(|t| spline.evaluate(t))
        .collect()
}
