//! Statistical reduction of sample series.
//!
//! Three stages, applied in order: outlier filtering, optional baseline
//! correction, and summary-statistic computation. Filtering always runs
//! first so that downstream aggregation never sees raw extremes.
//!
//! # Examples
//!
//! ```
//! use compare_core::{FilterConfig, SummaryStat};
//! use compare_core::stats::difference;
//!
//! let filter = FilterConfig::default();
//! let series = vec![10.0, 10.5, 9.8, 10.2, 10.1];
//! let overhead = vec![1.0, 1.1, 0.9, 1.0, 1.0];
//!
//! let raw = SummaryStat::from_samples(&filter.apply(&series).unwrap()).unwrap();
//! let corrected = difference(&series, &overhead, &filter).unwrap();
//! assert!(corrected.mean < raw.mean);
//! ```

pub mod difference;
pub mod filter;
pub mod summary;

// Re-export main types and functions
pub use difference::difference;
pub use filter::FilterConfig;
pub use summary::SummaryStat;
