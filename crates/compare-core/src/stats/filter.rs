//! Outlier filtering for raw sample series.
//!
//! Timing series routinely contain extreme samples caused by scheduling
//! noise, GC pauses, or cache warmup. Filtering runs before any aggregation
//! so that a single extreme sample cannot dominate a mean or a baseline
//! correction.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CompareError, Result};

/// Outlier-rejection settings for a comparison run.
///
/// Selected with a tagged table in TOML options:
///
/// ```toml
/// filter = { method = "trim", lower = 0.05, upper = 0.95 }
/// ```
///
/// # Examples
///
/// ```
/// use compare_core::FilterConfig;
///
/// let filter = FilterConfig::default();
/// let kept = filter.apply(&[10.0, 11.0, 10.5, 9.8, 10.2]).unwrap();
/// assert!(!kept.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum FilterConfig {
    /// Keep samples ranked between the `lower` and `upper` quantile
    /// fractions. Cut counts depend only on the series length, so two
    /// equal-length series always keep the same number of samples.
    Trim {
        #[serde(default = "default_trim_lower")]
        lower: f64,
        #[serde(default = "default_trim_upper")]
        upper: f64,
    },
    /// Tukey fences: keep samples within `[Q1 - k*IQR, Q3 + k*IQR]`.
    /// Series shorter than four samples pass through unchanged.
    Iqr {
        #[serde(default = "default_iqr_k")]
        k: f64,
    },
    /// Keep every sample.
    None,
}

fn default_trim_lower() -> f64 {
    0.05
}

fn default_trim_upper() -> f64 {
    0.95
}

fn default_iqr_k() -> f64 {
    1.5
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig::Trim {
            lower: default_trim_lower(),
            upper: default_trim_upper(),
        }
    }
}

impl FilterConfig {
    /// Check the parameters without applying the filter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilterConfig` when a parameter is outside its domain:
    /// trim fractions must satisfy `0 <= lower < upper <= 1`, and the IQR
    /// fence multiplier must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        match *self {
            FilterConfig::Trim { lower, upper } => {
                let in_domain = lower.is_finite()
                    && upper.is_finite()
                    && (0.0..=1.0).contains(&lower)
                    && (0.0..=1.0).contains(&upper)
                    && lower < upper;
                if !in_domain {
                    return Err(CompareError::InvalidFilterConfig(format!(
                        "trim fractions must satisfy 0 <= lower < upper <= 1 (got {lower} and {upper})"
                    )));
                }
            }
            FilterConfig::Iqr { k } => {
                if !k.is_finite() || k < 0.0 {
                    return Err(CompareError::InvalidFilterConfig(format!(
                        "fence multiplier must be finite and non-negative (got {k})"
                    )));
                }
            }
            FilterConfig::None => {}
        }
        Ok(())
    }

    /// Remove outliers from `samples`.
    ///
    /// Deterministic for identical input; survivors keep their relative
    /// order. If filtering would remove every sample, the median-ranked
    /// sample is kept so downstream statistics stay defined. An empty input
    /// stays empty.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilterConfig` for parameters outside their domain.
    pub fn apply(&self, samples: &[f64]) -> Result<Vec<f64>> {
        self.validate()?;
        if samples.is_empty() {
            return Ok(Vec::new());
        }

        let kept = match *self {
            FilterConfig::None => samples.to_vec(),
            FilterConfig::Trim { lower, upper } => trim(samples, lower, upper),
            FilterConfig::Iqr { k } => iqr(samples, k),
        };

        if kept.is_empty() {
            return Ok(vec![median_sample(samples)]);
        }
        if kept.len() < samples.len() {
            debug!(
                removed = samples.len() - kept.len(),
                kept = kept.len(),
                "Filtered outliers"
            );
        }
        Ok(kept)
    }
}

/// Rank-based trimming: drop the lowest `lower` and highest `1 - upper`
/// fractions by value, keeping survivors in their original positions.
fn trim(samples: &[f64], lower: f64, upper: f64) -> Vec<f64> {
    let n = samples.len();
    let lo = ((n as f64) * lower).floor() as usize;
    let hi = (((n as f64) * upper).ceil() as usize).min(n);

    let mut order: Vec<usize> = (0..n).collect();
    // Stable sort keeps equal values in original order.
    order.sort_by(|&a, &b| samples[a].partial_cmp(&samples[b]).unwrap_or(Ordering::Equal));

    let mut keep = vec![false; n];
    for &idx in &order[lo.min(hi)..hi] {
        keep[idx] = true;
    }

    samples
        .iter()
        .enumerate()
        .filter_map(|(i, &v)| if keep[i] { Some(v) } else { None })
        .collect()
}

/// Tukey-fence filtering with linearly interpolated quartiles.
fn iqr(samples: &[f64], k: f64) -> Vec<f64> {
    // Quartiles are not meaningful below four samples.
    if samples.len() < 4 {
        return samples.to_vec();
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let q1 = quantile(&sorted, 0.25);
    let q3 = quantile(&sorted, 0.75);
    let spread = q3 - q1;
    let lower_fence = q1 - k * spread;
    let upper_fence = q3 + k * spread;

    samples
        .iter()
        .copied()
        .filter(|v| (lower_fence..=upper_fence).contains(v))
        .collect()
}

/// Interpolated quantile of an already-sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

fn median_sample(samples: &[f64]) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted[sorted.len() / 2]
}
