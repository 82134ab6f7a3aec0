//! Statistical core for benchmark comparison
//!
//! Given repeated timing samples for several competing implementations of
//! the same task, this crate computes robust per-implementation statistics,
//! optionally removes baseline overhead, and produces pairwise comparisons
//! ranked fastest-to-slowest.
//!
//! # Features
//!
//! - **Outlier Filtering**: rank-trim and IQR-fence rejection of extreme samples
//! - **Baseline Correction**: none, one shared baseline, or one baseline per candidate
//! - **Confidence Intervals**: 95% margins on every mean and every ratio
//! - **Narrative Reports**: "A is faster than B by 2.0x ± 0.0", ranked
//! - **Raw Export**: delimited tables of the unfiltered samples for re-analysis
//!
//! # Example
//!
//! ```
//! use compare_core::{Baselines, ComparisonRun, Group, GroupOptions};
//!
//! # fn main() -> compare_core::Result<()> {
//! let group = Group::new(
//!     vec![("btree".to_string(), ()), ("hash".to_string(), ())],
//!     GroupOptions::default(),
//! )?;
//!
//! // One series of delays per candidate, from the execution harness.
//! let timings = vec![
//!     vec![3.9, 4.1, 4.0, 4.2, 4.0],
//!     vec![2.0, 2.1, 1.9, 2.0, 2.0],
//! ];
//!
//! let run = ComparisonRun::new(group, timings, Baselines::None)?;
//! println!("{}", run.ranked_report()?);
//!
//! let path = std::env::temp_dir().join("compare-core-samples.csv");
//! run.export(&path)?;
//! # std::fs::remove_file(&path).ok();
//! # Ok(())
//! # }
//! ```
//!
//! The crate never runs benchmarks or measures time itself; timings and
//! logical return values come from the surrounding harness through narrow
//! interfaces ([`Group`], [`Evaluate`]).

pub mod compare;
pub mod config;
pub mod error;
pub mod export;
pub mod group;
pub mod run;
pub mod stats;

// Re-export main types for convenience
pub use compare::{compare, Comparison};
pub use config::GroupOptions;
pub use error::{CompareError, Result};
pub use export::CsvExporter;
pub use group::{EvalFn, Evaluate, Group};
pub use run::{Baselines, ComparisonRun, RunSummary};
pub use stats::{difference, FilterConfig, SummaryStat};
