//! Baseline correction: the distribution of candidate minus baseline.

use super::filter::FilterConfig;
use super::summary::SummaryStat;
use crate::error::{CompareError, Result};

/// Subtract a baseline series from a candidate series and summarize the
/// result.
///
/// Both inputs are filtered first, with the same configuration, so that one
/// extreme raw sample cannot dominate the correction. The filtered series are
/// then subtracted elementwise and reduced with [`SummaryStat::from_samples`].
///
/// # Errors
///
/// * `SeriesLengthMismatch` when the filtered series end up with different
///   lengths. With the default rank-trim filter this only happens when the
///   raw inputs were already misaligned.
/// * `EmptySeries` when both inputs are empty.
/// * `InvalidFilterConfig` for filter parameters outside their domain.
pub fn difference(series: &[f64], baseline: &[f64], filter: &FilterConfig) -> Result<SummaryStat> {
    let cur = filter.apply(series)?;
    let base = filter.apply(baseline)?;

    if cur.len() != base.len() {
        return Err(CompareError::SeriesLengthMismatch {
            left: cur.len(),
            right: base.len(),
        });
    }

    let deltas: Vec<f64> = cur.iter().zip(&base).map(|(a, b)| a - b).collect();
    SummaryStat::from_samples(&deltas)
}
