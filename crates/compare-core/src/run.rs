//! Comparison run orchestration.
//!
//! A [`ComparisonRun`] ties the whole pipeline together for one benchmark
//! group: it classifies the baseline mode, builds one summary statistic per
//! candidate at construction, and then answers read-only queries: pairwise
//! comparisons, the ranked narrative report, and raw-data export.
//!
//! # Example
//!
//! ```
//! use compare_core::{Baselines, ComparisonRun, Group, GroupOptions};
//!
//! # fn example() -> compare_core::Result<()> {
//! let group = Group::new(
//!     vec![("insertion".to_string(), ()), ("quick".to_string(), ())],
//!     GroupOptions::default(),
//! )?;
//! let timings = vec![vec![4.1, 4.0, 4.2], vec![1.9, 2.0, 2.1]];
//!
//! let run = ComparisonRun::new(group, timings, Baselines::None)?;
//! println!("{}", run.ranked_report()?);
//! # Ok(())
//! # }
//! ```

use std::cmp::Ordering;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compare::{compare, Comparison};
use crate::error::{CompareError, Result};
use crate::export::CsvExporter;
use crate::group::{Evaluate, Group};
use crate::stats::difference::difference;
use crate::stats::summary::SummaryStat;

/// Baseline measurements for overhead subtraction.
///
/// The variant is the mode; no runtime shape inspection happens inside the
/// core. The untagged serde representation classifies loose data once at the
/// API boundary: `null` is no baseline, a flat numeric array is one shared
/// baseline, an array of arrays is one baseline per candidate.
///
/// ```
/// use compare_core::Baselines;
///
/// let none: Baselines = serde_json::from_str("null").unwrap();
/// assert_eq!(none, Baselines::None);
///
/// let shared: Baselines = serde_json::from_str("[1.0, 1.1]").unwrap();
/// assert_eq!(shared, Baselines::Shared(vec![1.0, 1.1]));
///
/// let split: Baselines = serde_json::from_str("[[1.0], [2.0]]").unwrap();
/// assert_eq!(split, Baselines::PerCandidate(vec![vec![1.0], vec![2.0]]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Baselines {
    /// No correction.
    #[default]
    None,
    /// One series shared by every candidate.
    Shared(Vec<f64>),
    /// One series per candidate, aligned with the candidate order.
    PerCandidate(Vec<Vec<f64>>),
}

impl Baselines {
    fn mode_label(&self) -> &'static str {
        match self {
            Baselines::None => "none",
            Baselines::Shared(_) => "single",
            Baselines::PerCandidate(_) => "split",
        }
    }
}

/// Serializable view of one candidate's outcome, for JSON reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub candidate: String,
    #[serde(flatten)]
    pub stat: SummaryStat,
}

/// One benchmark group's complete comparison state.
///
/// Two phases: construction (one-shot, fails fast, all-or-nothing) and
/// query (read-only, any number of calls). The per-candidate statistics are
/// computed exactly once in [`ComparisonRun::new`] and frozen; every query
/// is a pure function of that state.
#[derive(Debug, Clone)]
pub struct ComparisonRun<E> {
    group: Group<E>,
    timings: Vec<Vec<f64>>,
    baselines: Baselines,
    stats: Vec<SummaryStat>,
}

impl<E> ComparisonRun<E> {
    /// Build a run from collected timings.
    ///
    /// The filter configuration is taken once from the group's options and
    /// reused for every series and baseline. Either every candidate's
    /// statistic is computed or construction fails entirely; no partial run
    /// is ever produced.
    ///
    /// # Errors
    ///
    /// * `SizeMismatch` when `timings` (or per-candidate baselines) do not
    ///   line up with the candidate count.
    /// * `InvalidFilterConfig` for filter parameters outside their domain.
    /// * `EmptySeries`, `SeriesLengthMismatch` from the stats layer.
    pub fn new(group: Group<E>, timings: Vec<Vec<f64>>, baselines: Baselines) -> Result<Self> {
        if timings.len() != group.len() {
            return Err(CompareError::SizeMismatch {
                expected: group.len(),
                actual: timings.len(),
            });
        }
        if let Baselines::PerCandidate(series) = &baselines {
            if series.len() != group.len() {
                return Err(CompareError::SizeMismatch {
                    expected: group.len(),
                    actual: series.len(),
                });
            }
        }

        let filter = group.options().filter.clone();
        filter.validate()?;

        let mut stats = Vec::with_capacity(group.len());
        for (index, series) in timings.iter().enumerate() {
            let stat = match &baselines {
                Baselines::None => SummaryStat::from_samples(&filter.apply(series)?)?,
                Baselines::Shared(base) => difference(series, base, &filter)?,
                Baselines::PerCandidate(bases) => difference(series, &bases[index], &filter)?,
            };
            debug!(
                candidate = group.name(index),
                mean = stat.mean,
                count = stat.count,
                baseline = baselines.mode_label(),
                "Computed summary statistic"
            );
            stats.push(stat);
        }

        Ok(Self {
            group,
            timings,
            baselines,
            stats,
        })
    }

    pub fn group(&self) -> &Group<E> {
        &self.group
    }

    /// Raw, unfiltered timings as supplied at construction.
    pub fn timings(&self) -> &[Vec<f64>] {
        &self.timings
    }

    pub fn baselines(&self) -> &Baselines {
        &self.baselines
    }

    /// Frozen per-candidate statistics, aligned with the candidate order.
    pub fn stats(&self) -> &[SummaryStat] {
        &self.stats
    }

    /// Number of samples in the first candidate's series.
    pub fn sample_count(&self) -> usize {
        self.timings.first().map_or(0, Vec::len)
    }

    /// Compare candidate `cur` against candidate `vs`.
    pub fn comparison(&self, cur: usize, vs: usize) -> Result<Comparison> {
        compare(&self.stats[cur], &self.stats[vs])
    }

    /// The performance factor of `cur` relative to `vs`.
    pub fn factor(&self, cur: usize, vs: usize) -> Result<f64> {
        Ok(self.comparison(cur, vs)?.factor)
    }

    /// Confidence bounds of the factor.
    pub fn factor_range(&self, cur: usize, vs: usize) -> Result<RangeInclusive<f64>> {
        let cmp = self.comparison(cur, vs)?;
        Ok(cmp.min..=cmp.max)
    }

    /// Per-candidate summaries in candidate order, for JSON reporting.
    pub fn summaries(&self) -> Vec<RunSummary> {
        self.group
            .names()
            .zip(&self.stats)
            .map(|(name, stat)| RunSummary {
                candidate: name.to_string(),
                stat: *stat,
            })
            .collect()
    }

    /// Write the raw samples to `path` as a delimited table.
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        CsvExporter::write(self, path)
    }

    /// Candidate indices sorted fastest first; ties keep original order.
    fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.stats.len()).collect();
        order.sort_by(|&a, &b| {
            self.stats[a]
                .mean
                .partial_cmp(&self.stats[b].mean)
                .unwrap_or(Ordering::Equal)
        });
        order
    }
}

impl<E: Evaluate> ComparisonRun<E> {
    /// Render the narrative report, fastest candidate first.
    ///
    /// One line per adjacent pair in rank order: "`a` is similar to `b`"
    /// when the pair is statistically indistinguishable, otherwise "`a` is
    /// faster than `b` by ...". Pairs whose logical return values disagree
    /// get a " (results differ)" annotation.
    pub fn ranked_report(&self) -> Result<String> {
        let order = self.ranking();
        let mut lines = Vec::with_capacity(order.len().saturating_sub(1));

        for pair in order.windows(2) {
            let (i, j) = (pair[0], pair[1]);
            let cmp = self.comparison(i, j)?;

            let mut line = if cmp.is_similar() {
                format!("{} is similar to {}", self.group.name(i), self.group.name(j))
            } else {
                format!(
                    "{} is faster than {} by {}",
                    self.group.name(i),
                    self.group.name(j),
                    cmp.format()
                )
            };

            let lhs = self.group.element(i).evaluate(self.group.options());
            let rhs = self.group.element(j).evaluate(self.group.options());
            if lhs != rhs {
                line.push_str(" (results differ)");
            }

            lines.push(line);
        }

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GroupOptions;
    use crate::group::EvalFn;
    use crate::stats::filter::FilterConfig;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn plain_group(names: &[&str]) -> Group<()> {
        Group::new(
            names.iter().map(|n| (n.to_string(), ())).collect(),
            GroupOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_timings_count_must_match_group() {
        let group = plain_group(&["a", "b"]);
        let err = ComparisonRun::new(group, vec![vec![1.0]], Baselines::None).unwrap_err();
        assert!(matches!(
            err,
            CompareError::SizeMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_per_candidate_baselines_must_match_group() {
        let group = plain_group(&["a", "b"]);
        let err = ComparisonRun::new(
            group,
            vec![vec![1.0], vec![2.0]],
            Baselines::PerCandidate(vec![vec![0.1]]),
        )
        .unwrap_err();
        assert!(matches!(err, CompareError::SizeMismatch { .. }));
    }

    #[test]
    fn test_invalid_filter_fails_at_construction() {
        let options = GroupOptions {
            filter: FilterConfig::Trim {
                lower: 0.9,
                upper: 0.1,
            },
            ..GroupOptions::default()
        };
        let group = Group::new(
            vec![("a".to_string(), ()), ("b".to_string(), ())],
            options,
        )
        .unwrap();

        let err = ComparisonRun::new(
            group,
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            Baselines::None,
        )
        .unwrap_err();
        assert!(matches!(err, CompareError::InvalidFilterConfig(_)));
    }

    #[test]
    fn test_empty_candidate_series_aborts_construction() {
        let group = plain_group(&["a", "b"]);
        let err =
            ComparisonRun::new(group, vec![vec![1.0, 2.0], vec![]], Baselines::None).unwrap_err();
        assert!(matches!(err, CompareError::EmptySeries));
    }

    #[test]
    fn test_two_to_one_scenario() {
        let group = plain_group(&["A", "B"]);
        let run = ComparisonRun::new(
            group,
            vec![vec![10.0, 10.0, 10.0], vec![20.0, 20.0, 20.0]],
            Baselines::None,
        )
        .unwrap();

        assert_eq!(run.factor(0, 1).unwrap(), 2.0);
        assert_eq!(run.factor_range(0, 1).unwrap(), 2.0..=2.0);
        assert_eq!(run.ranked_report().unwrap(), "A is faster than B by 2.0x ± 0.0");
    }

    #[test]
    fn test_self_comparison_is_one() {
        let group = plain_group(&["a", "b"]);
        let run = ComparisonRun::new(
            group,
            vec![vec![5.0, 5.0, 5.0], vec![7.0, 7.0, 7.0]],
            Baselines::None,
        )
        .unwrap();

        let cmp = run.comparison(1, 1).unwrap();
        assert_eq!(cmp.factor, 1.0);
        assert_eq!(cmp.min, 1.0);
        assert_eq!(cmp.max, 1.0);
    }

    #[test]
    fn test_ranking_breaks_ties_by_original_index() {
        let group = plain_group(&["slow", "tie1", "tie2"]);
        let run = ComparisonRun::new(
            group,
            vec![
                vec![10.0, 10.0, 10.0],
                vec![5.0, 5.0, 5.0],
                vec![5.0, 5.0, 5.0],
            ],
            Baselines::None,
        )
        .unwrap();

        assert_eq!(run.ranking(), vec![1, 2, 0]);
        let report = run.ranked_report().unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert!(lines[0].starts_with("tie1 is similar to tie2"));
        assert!(lines[1].starts_with("tie2 is faster than slow"));
    }

    #[test]
    fn test_ranked_report_is_idempotent() {
        let group = plain_group(&["a", "b", "c"]);
        let run = ComparisonRun::new(
            group,
            vec![
                vec![3.0, 3.1, 2.9, 3.0],
                vec![1.0, 1.1, 0.9, 1.0],
                vec![2.0, 2.1, 1.9, 2.0],
            ],
            Baselines::None,
        )
        .unwrap();

        assert_eq!(run.ranked_report().unwrap(), run.ranked_report().unwrap());
    }

    #[test]
    fn test_shared_baseline_subtracts_overhead() {
        let group = plain_group(&["a", "b"]);
        let run = ComparisonRun::new(
            group,
            vec![vec![11.0, 11.0, 11.0], vec![21.0, 21.0, 21.0]],
            Baselines::Shared(vec![1.0, 1.0, 1.0]),
        )
        .unwrap();

        assert_eq!(run.stats()[0].mean, 10.0);
        assert_eq!(run.stats()[1].mean, 20.0);
        assert_eq!(run.factor(0, 1).unwrap(), 2.0);
    }

    #[test]
    fn test_split_baseline_identical_to_series_gives_zero_mean() {
        let group = plain_group(&["a", "b"]);
        let series_a = vec![4.0, 4.2, 3.9, 4.1];
        let series_b = vec![7.0, 7.1, 6.9, 7.0];
        let run = ComparisonRun::new(
            group,
            vec![series_a.clone(), series_b],
            Baselines::PerCandidate(vec![series_a, vec![1.0, 1.0, 1.0, 1.0]]),
        )
        .unwrap();

        assert_eq!(run.stats()[0].mean, 0.0);
        assert!(run.stats()[1].mean > 5.0);
    }

    #[test]
    fn test_report_flags_result_mismatch() {
        let defs: Vec<(String, Box<dyn Evaluate>)> = vec![
            (
                "sorted".to_string(),
                Box::new(EvalFn(|_: &GroupOptions| json!([1, 2, 3]))),
            ),
            (
                "buggy".to_string(),
                Box::new(EvalFn(|_: &GroupOptions| json!([3, 2, 1]))),
            ),
        ];
        let group = Group::new(defs, GroupOptions::default()).unwrap();
        let run = ComparisonRun::new(
            group,
            vec![vec![1.0, 1.0, 1.0], vec![2.0, 2.0, 2.0]],
            Baselines::None,
        )
        .unwrap();

        let report = run.ranked_report().unwrap();
        assert_eq!(
            report,
            "sorted is faster than buggy by 2.0x ± 0.0 (results differ)"
        );
    }

    #[test]
    fn test_report_has_no_annotation_when_results_agree() {
        let defs: Vec<(String, Box<dyn Evaluate>)> = vec![
            (
                "a".to_string(),
                Box::new(EvalFn(|_: &GroupOptions| Value::from(42))),
            ),
            (
                "b".to_string(),
                Box::new(EvalFn(|_: &GroupOptions| Value::from(42))),
            ),
        ];
        let group = Group::new(defs, GroupOptions::default()).unwrap();
        let run = ComparisonRun::new(
            group,
            vec![vec![1.0, 1.0], vec![3.0, 3.0]],
            Baselines::None,
        )
        .unwrap();

        assert!(!run.ranked_report().unwrap().contains("results differ"));
    }

    #[test]
    fn test_sample_count_reads_first_series() {
        let group = plain_group(&["a", "b"]);
        let run = ComparisonRun::new(
            group,
            vec![vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0]],
            Baselines::None,
        )
        .unwrap();
        assert_eq!(run.sample_count(), 4);
    }

    #[test]
    fn test_summaries_align_with_candidates() {
        let group = plain_group(&["first", "second"]);
        let run = ComparisonRun::new(
            group,
            vec![vec![2.0, 2.0], vec![4.0, 4.0]],
            Baselines::None,
        )
        .unwrap();

        let summaries = run.summaries();
        assert_eq!(summaries[0].candidate, "first");
        assert_eq!(summaries[0].stat.mean, 2.0);
        assert_eq!(summaries[1].candidate, "second");
        assert_eq!(summaries[1].stat.mean, 4.0);
    }
}
