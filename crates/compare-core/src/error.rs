//! Error types for the comparison core.

use thiserror::Error;

/// Errors raised while building or querying a comparison run.
///
/// Every variant is fatal for the operation that raised it: construction
/// either produces a complete run or nothing, and query failures propagate
/// to the caller unchanged.
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Expected timings for {expected} candidates, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Cannot summarize an empty sample series")]
    EmptySeries,

    #[error("Degenerate statistic (mean {mean}, {count} samples) cannot be compared")]
    DegenerateStat { mean: f64, count: usize },

    #[error("Invalid filter configuration: {0}")]
    InvalidFilterConfig(String),

    #[error("Series lengths differ after filtering: {left} vs {right}")]
    SeriesLengthMismatch { left: usize, right: usize },

    #[error("Duplicate candidate name: {0}")]
    DuplicateCandidate(String),

    #[error("Export failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CompareError>;
