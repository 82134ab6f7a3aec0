//! Summary statistics: central tendency plus an uncertainty estimate.

use serde::{Deserialize, Serialize};

use crate::error::{CompareError, Result};

/// z-score for a two-sided 95% confidence interval under the normal
/// approximation. All confidence margins in this crate derive from it.
pub(crate) const Z_95: f64 = 1.96;

/// Mean, dispersion, and sample count for one candidate's series.
///
/// The uncertainty estimate is the 95% confidence margin of the mean
/// (`1.96 * std_dev / sqrt(count)`). The same estimator backs both the
/// baseline-difference path and the ratio comparison, so their outputs
/// compose.
///
/// # Examples
///
/// ```
/// use compare_core::SummaryStat;
///
/// let stat = SummaryStat::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert_eq!(stat.mean, 5.0);
/// assert_eq!(stat.count, 8);
/// assert!(stat.margin() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStat {
    /// Central estimate of the series.
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std_dev: f64,
    /// Number of samples that survived filtering.
    pub count: usize,
}

impl SummaryStat {
    /// Reduce a non-empty series to its summary statistic.
    ///
    /// # Errors
    ///
    /// Returns `EmptySeries` for zero samples.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(CompareError::EmptySeries);
        }

        let count = samples.len();
        let mean = samples.iter().sum::<f64>() / count as f64;
        let variance = if count > 1 {
            samples.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (count - 1) as f64
        } else {
            0.0
        };

        Ok(SummaryStat {
            mean,
            std_dev: variance.sqrt(),
            count,
        })
    }

    /// Sample variance.
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    /// Standard error of the mean.
    pub fn sem(&self) -> f64 {
        self.std_dev / (self.count as f64).sqrt()
    }

    /// Half-width of the 95% confidence interval of the mean.
    pub fn margin(&self) -> f64 {
        Z_95 * self.sem()
    }

    /// True when the statistic cannot participate in a ratio comparison.
    pub fn is_degenerate(&self) -> bool {
        self.count == 0 || !self.mean.is_finite()
    }
}
