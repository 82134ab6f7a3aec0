//! Group option parsing.
//!
//! A comparison group carries one configuration bag. The core reads exactly
//! one key, `filter`; everything else passes through untouched for the
//! surrounding tooling (iteration counts, warmup policy, whatever the
//! harness defines).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::stats::filter::FilterConfig;

/// Options attached to a benchmark group.
///
/// Loaded from TOML:
///
/// ```toml
/// filter = { method = "trim", lower = 0.05, upper = 0.95 }
/// iterations = 50          # opaque to the core, kept in `extra`
/// ```
///
/// # Examples
///
/// ```
/// use compare_core::GroupOptions;
///
/// let options = GroupOptions::from_toml_str(
///     "filter = { method = \"iqr\", k = 1.5 }\nwarmup = 3",
/// ).unwrap();
/// assert!(options.extra.contains_key("warmup"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupOptions {
    /// Outlier-rejection parameters applied to every series in the run.
    #[serde(default)]
    pub filter: FilterConfig,
    /// Benchmark-specific options the core does not interpret.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl GroupOptions {
    /// Load options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file: {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Parse options from a TOML string.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML options")
    }
}
