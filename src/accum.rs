//! Statistical accumulator capability.
//!
//! The aggregation engine is written against this trait rather than a
//! concrete statistics implementation. `merge` must be associative and
//! commutative so that per-axis (and, in the future, per-block) partial
//! accumulations compose in any order to the same result, within floating
//! tolerance of a single pass over all samples.
//!
//! The built-in [`MomentAccumulator`] covers the full statistic set with
//! numerically stable streaming moments.

pub mod moments;

pub use moments::MomentAccumulator;

use crate::features::Statistic;

/// Incremental, mergeable statistics over `f32` samples.
pub trait StatAccumulator: Clone {
    /// Create an accumulator prepared for the given statistics. Implementors
    /// may use this to allocate only what the requested set needs (the
    /// built-in accumulator retains raw samples only when a quantile is
    /// requested).
    fn for_stats(stats: &[Statistic]) -> Self;

    /// Fold one sample into the accumulator.
    fn ingest(&mut self, value: f32);

    /// Fold another accumulator's state into this one. Associative and
    /// commutative; both sides must have been created for the same statistic
    /// set.
    fn merge(&mut self, other: &Self);

    /// Extract a statistic. Undefined statistics of an empty accumulator
    /// yield NaN (counts and sums yield 0).
    fn extract(&self, stat: Statistic) -> f32;
}
