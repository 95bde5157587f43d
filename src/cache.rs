//! Memoized elimination of the fixed-structure part of the spline system.
//!
//! The tridiagonal (or cyclic tridiagonal) matrix a spline of `n` points
//! solves against is the same for every spline of `n` points; only the
//! right-hand side depends on the point values. Gaussian elimination is
//! therefore split in two:
//!
//! 1. Eliminate the matrix, producing the pivot of each row. This depends
//!    only on `n` and is what this module computes and caches.
//! 2. Apply the same row operations to the right-hand side of a particular
//!    spline and back-substitute. This lives with the spline itself.
//!
//! The off-diagonal entries are all 1 and the row operations are chosen so
//! that they never change, which is why a single vector of pivots is enough
//! to describe the eliminated matrix.
//!
//! The pivots for the last [`SOLUTION_CACHE_LIMIT`] point counts used are
//! kept, separately for straight and looped systems, so programs juggling
//! many splines of a handful of sizes rarely eliminate anything.
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use num_traits::Float;

/// Number of distinct point counts remembered per boundary condition.
pub const SOLUTION_CACHE_LIMIT: usize = 16;

/// Fewest rows that make up a linear system. Smaller splines are solved
/// directly without going through the cache.
pub const MIN_SYSTEM_ROWS: usize = 3;

/// How a request for diagonals was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Copied out of the cache.
    Hit,
    /// Eliminated from scratch and inserted into the cache.
    Computed,
    /// Fewer than [`MIN_SYSTEM_ROWS`] rows. The buffer is left untouched
    /// and nothing is cached.
    TooSmall,
}

/// Bounded most-recently-used list of solved diagonals, keyed by length.
#[derive(Debug, Clone)]
struct DiagonalCache<T> {
    entries: VecDeque<Vec<T>>,
}

impl<T: Float> DiagonalCache<T> {
    const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Copy the entry of matching length into `out`, moving it to the front.
    fn find(&mut self, out: &mut [T]) -> bool {
        let n = out.len();
        let Some(pos) = self.entries.iter().position(|entry| entry.len() == n) else {
            return false;
        };
        if let Some(entry) = self.entries.remove(pos) {
            out.copy_from_slice(&entry);
            self.entries.push_front(entry);
        }
        true
    }

    fn insert(&mut self, solved: &[T]) {
        if self.entries.len() >= SOLUTION_CACHE_LIMIT {
            if let Some(evicted) = self.entries.pop_back() {
                log::debug!("evicting cached diagonals for {} points", evicted.len());
            }
        }
        self.entries.push_front(solved.to_vec());
    }

    fn contains(&self, n: usize) -> bool {
        self.entries.iter().any(|entry| entry.len() == n)
    }
}

/// Cache of eliminated diagonals for straight and looped spline systems.
///
/// Both solve methods take `&mut self`, so lookup and insert can never
/// interleave with another caller; share one instance between threads
/// through a lock (see [`with_shared_cache`]).
#[derive(Debug, Clone)]
pub struct SolutionCache<T> {
    straight: DiagonalCache<T>,
    looped: DiagonalCache<T>,
}

impl<T: Float> Default for SolutionCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> SolutionCache<T> {
    /// An empty cache.
    pub const fn new() -> Self {
        Self {
            straight: DiagonalCache::new(),
            looped: DiagonalCache::new(),
        }
    }

    /// Fill `diagonals` with the eliminated pivots of the straight system
    /// with `diagonals.len()` rows.
    ///
    /// The incoming contents of `diagonals` are ignored. Buffers shorter than
    /// [`MIN_SYSTEM_ROWS`] are left as they are.
    pub fn solve_diagonals_straight(&mut self, diagonals: &mut [T]) -> Lookup {
        if diagonals.len() < MIN_SYSTEM_ROWS {
            return Lookup::TooSmall;
        }
        if self.straight.find(diagonals) {
            log::trace!("straight diagonals for {} points found in cache", diagonals.len());
            return Lookup::Hit;
        }
        log::trace!("eliminating straight diagonals for {} points", diagonals.len());
        straight_diagonals(diagonals);
        self.straight.insert(diagonals);
        Lookup::Computed
    }

    /// Fill `diagonals` with the eliminated pivots of the looped (cyclic)
    /// system with `diagonals.len()` rows.
    ///
    /// The incoming contents of `diagonals` are ignored. Buffers shorter than
    /// [`MIN_SYSTEM_ROWS`] are left as they are.
    pub fn solve_diagonals_looped(&mut self, diagonals: &mut [T]) -> Lookup {
        if diagonals.len() < MIN_SYSTEM_ROWS {
            return Lookup::TooSmall;
        }
        if self.looped.find(diagonals) {
            log::trace!("looped diagonals for {} points found in cache", diagonals.len());
            return Lookup::Hit;
        }
        log::trace!("eliminating looped diagonals for {} points", diagonals.len());
        looped_diagonals(diagonals);
        self.looped.insert(diagonals);
        Lookup::Computed
    }

    /// Whether straight diagonals for `n` points are currently cached.
    pub fn contains_straight(&self, n: usize) -> bool {
        self.straight.contains(n)
    }

    /// Whether looped diagonals for `n` points are currently cached.
    pub fn contains_looped(&self, n: usize) -> bool {
        self.looped.contains(n)
    }

    pub fn len_straight(&self) -> usize {
        self.straight.entries.len()
    }

    pub fn len_looped(&self) -> usize {
        self.looped.entries.len()
    }

    /// Forget every cached entry.
    pub fn clear(&mut self) {
        self.straight.entries.clear();
        self.looped.entries.clear();
    }
}

/// Eliminate the straight spline system in place.
///
/// ```text
/// | 2 1 0 0 |
/// | 1 4 1 0 |
/// | 0 1 4 1 |
/// | 0 0 1 2 |
/// ```
///
/// Row `i` scaled by `-1 / pivot[i]` is added to row `i + 1` (and the same
/// on columns), which zeroes the off-diagonal pair and leaves the 1 above
/// the next pivot untouched. Buffers shorter than [`MIN_SYSTEM_ROWS`] are
/// left as they are.
pub fn straight_diagonals<T: Float>(diagonals: &mut [T]) {
    if diagonals.len() < MIN_SYSTEM_ROWS {
        return;
    }
    let one = T::one();
    let two = one + one;
    let four = two + two;

    let last = diagonals.len();
    diagonals[0] = two;
    diagonals[1..last - 1].fill(four);
    diagonals[last - 1] = two;

    for i in 0..last - 1 {
        diagonals[i + 1] = diagonals[i + 1] - one / diagonals[i];
    }
}

/// Eliminate the looped (cyclic) spline system in place.
///
/// ```text
/// | 4 1 0 0 1 |
/// | 1 4 1 0 0 |
/// | 0 1 4 1 0 |
/// | 0 0 1 4 1 |
/// | 1 0 0 1 4 |
/// ```
///
/// Eliminating row `i` pushes its corner entry one column to the right,
/// scaled by `-1 / pivot[i]`, and drains `corner^2 / pivot[i]` from the
/// last pivot. The matrix is symmetric, so the corner in the last column and
/// the one in the last row are always equal and one accumulator tracks both.
/// Row `n - 2` is special: its corner coincides with the ordinary 1 next to
/// the last pivot. Buffers shorter than [`MIN_SYSTEM_ROWS`] are left as
/// they are.
pub fn looped_diagonals<T: Float>(diagonals: &mut [T]) {
    if diagonals.len() < MIN_SYSTEM_ROWS {
        return;
    }
    let one = T::one();
    let four = one + one + one + one;

    let last = diagonals.len();
    diagonals.fill(four);

    let end = last - 1;
    let stop = end - 1;
    let mut edge = one;
    for i in 0..stop {
        let recip = one / diagonals[i];
        diagonals[i + 1] = diagonals[i + 1] - recip;
        diagonals[end] = diagonals[end] - edge * edge * recip;
        edge = -edge * recip;
    }

    let residual = one + edge;
    diagonals[end] = diagonals[end] - residual * residual / diagonals[stop];
}

/// Corner entries of the last column after eliminating each row of a looped
/// system with the given pivots.
///
/// Entry `i` is the value sitting in row `i` of the last column when row `i`
/// is used as a pivot row; the final meaningful entry (row `n - 2`) already
/// includes the ordinary off-diagonal 1. The last entry is zero. Fewer than
/// [`MIN_SYSTEM_ROWS`] pivots give all zeros.
pub(crate) fn looped_corners<T: Float>(diagonals: &[T]) -> Vec<T> {
    let last = diagonals.len();
    let mut corners = alloc::vec![T::zero(); last];
    if last < MIN_SYSTEM_ROWS {
        return corners;
    }
    let stop = last - 2;

    let mut edge = T::one();
    for i in 0..stop {
        corners[i] = edge;
        edge = -edge / diagonals[i];
    }
    corners[stop] = T::one() + edge;

    corners
}

#[cfg(feature = "std")]
pub use shared::{with_shared_cache, SharedCache};

#[cfg(feature = "std")]
mod shared {
    use std::sync::{Mutex, PoisonError};

    use num_traits::Float;

    use super::SolutionCache;

    /// Float types that own a process-wide [`SolutionCache`].
    pub trait SharedCache: Float + Send + 'static {
        fn shared_cache() -> &'static Mutex<SolutionCache<Self>>;
    }

    impl SharedCache for f32 {
        fn shared_cache() -> &'static Mutex<SolutionCache<Self>> {
            static CACHE: Mutex<SolutionCache<f32>> = Mutex::new(SolutionCache::new());
            &CACHE
        }
    }

    impl SharedCache for f64 {
        fn shared_cache() -> &'static Mutex<SolutionCache<Self>> {
            static CACHE: Mutex<SolutionCache<f64>> = Mutex::new(SolutionCache::new());
            &CACHE
        }
    }

    /// Run `f` with exclusive access to the process-wide cache for `T`.
    ///
    /// A panic inside another holder cannot leave the cache half-updated,
    /// so a poisoned lock is simply taken over.
    pub fn with_shared_cache<T: SharedCache, R>(f: impl FnOnce(&mut SolutionCache<T>) -> R) -> R {
        let mut cache = T::shared_cache()
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut cache)
    }
}
