//! Pairwise ratio comparison of two summary statistics.
//!
//! The comparison answers one question: how much faster is `cur` than `vs`,
//! and how sure are we? The factor is the ratio of the two central estimates;
//! its confidence bounds come from propagating both inputs' standard errors
//! through the ratio with the first-order delta method, at the same 95%
//! level the summary statistics use.

use serde::{Deserialize, Serialize};

use crate::error::{CompareError, Result};
use crate::stats::summary::{SummaryStat, Z_95};

/// Factors above this cutoff read better as multipliers ("3.2x") than as
/// percentages ("220%"). The boundary is exclusive.
const MULTIPLICATIVE_CUTOFF: f64 = 1.8;

/// Result of comparing two candidates' summary statistics.
///
/// `factor == 1` means the confidence interval straddled 1.0 and the two
/// candidates are statistically indistinguishable. This is a deliberate
/// floor, not rounding: downstream ranking and formatting treat it as the
/// "similar" case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Performance ratio; 1.0 when indistinguishable.
    pub factor: f64,
    /// Lower bound of the factor's 95% confidence interval.
    pub min: f64,
    /// Upper bound of the factor's 95% confidence interval.
    pub max: f64,
    /// Half-width of the confidence interval.
    pub precision: f64,
}

impl Comparison {
    /// True when the two candidates could not be told apart.
    pub fn is_similar(&self) -> bool {
        self.factor == 1.0
    }

    /// Human-readable rendering of the factor and its margin.
    ///
    /// Large ratios render multiplicatively, near-1.0 ratios as a percentage
    /// difference:
    ///
    /// ```
    /// use compare_core::Comparison;
    ///
    /// let wide = Comparison { factor: 2.0, min: 2.0, max: 2.0, precision: 0.0 };
    /// assert_eq!(wide.format(), "2.0x ± 0.0");
    ///
    /// let close = Comparison { factor: 1.25, min: 1.2, max: 1.3, precision: 0.05 };
    /// assert_eq!(close.format(), "25.0% ± 5.0%");
    /// ```
    pub fn format(&self) -> String {
        if self.factor.abs() > MULTIPLICATIVE_CUTOFF {
            format!("{:.1}x ± {:.1}", self.factor, self.precision)
        } else {
            format!(
                "{:.1}% ± {:.1}%",
                (self.factor - 1.0) * 100.0,
                self.precision * 100.0
            )
        }
    }
}

/// Compare two summary statistics, `cur` against `vs`.
///
/// The factor is `vs.mean / cur.mean`, so a faster `cur` (smaller mean)
/// yields a factor above 1 against a slower `vs`.
///
/// # Errors
///
/// Returns `DegenerateStat` when either input has zero samples or a
/// non-finite mean, or when the ratio itself is non-finite (zero-mean
/// divisor).
pub fn compare(cur: &SummaryStat, vs: &SummaryStat) -> Result<Comparison> {
    for stat in [cur, vs] {
        if stat.is_degenerate() {
            return Err(CompareError::DegenerateStat {
                mean: stat.mean,
                count: stat.count,
            });
        }
    }

    let ratio = vs.mean / cur.mean;
    if !ratio.is_finite() {
        return Err(CompareError::DegenerateStat {
            mean: cur.mean,
            count: cur.count,
        });
    }

    // First-order propagation: var(b/a) ~= (b/a)^2 * (sem_a^2/a^2 + sem_b^2/b^2).
    let precision = Z_95 * (ratio * ratio * (relative_var(cur) + relative_var(vs))).sqrt();
    let min = ratio - precision;
    let max = ratio + precision;

    // An interval straddling 1.0 means no distinguishable difference.
    let factor = if min <= 1.0 && 1.0 <= max { 1.0 } else { ratio };

    Ok(Comparison {
        factor,
        min,
        max,
        precision,
    })
}

fn relative_var(stat: &SummaryStat) -> f64 {
    let sem = stat.sem();
    if sem == 0.0 {
        0.0
    } else {
        (sem / stat.mean).powi(2)
    }
}
