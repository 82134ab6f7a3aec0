//! Benchmark groups and the execution capability interface.
//!
//! A group is an ordered mapping from candidate name to an executable
//! benchmark definition. The core never runs the definitions; it only asks
//! them, through [`Evaluate`], for their logical return value so the ranked
//! report can flag candidates that disagree on results.

use std::collections::HashSet;

use serde_json::Value;

use crate::config::GroupOptions;
use crate::error::{CompareError, Result};

/// Capability interface to the external execution harness.
///
/// Implementations produce the benchmark's logical return value (not its
/// timing) for equality comparison across candidates.
pub trait Evaluate {
    fn evaluate(&self, options: &GroupOptions) -> Value;
}

/// Stats-only groups carry no executable definitions.
impl Evaluate for () {
    fn evaluate(&self, _options: &GroupOptions) -> Value {
        Value::Null
    }
}

impl<T: Evaluate + ?Sized> Evaluate for Box<T> {
    fn evaluate(&self, options: &GroupOptions) -> Value {
        (**self).evaluate(options)
    }
}

/// Adapter turning a plain closure into an [`Evaluate`] capability.
///
/// # Examples
///
/// ```
/// use compare_core::{Evaluate, EvalFn, GroupOptions};
/// use serde_json::json;
///
/// let exec = EvalFn(|_: &GroupOptions| json!([1, 2, 3]));
/// assert_eq!(exec.evaluate(&GroupOptions::default()), json!([1, 2, 3]));
/// ```
pub struct EvalFn<F>(pub F);

impl<F> Evaluate for EvalFn<F>
where
    F: Fn(&GroupOptions) -> Value,
{
    fn evaluate(&self, options: &GroupOptions) -> Value {
        (self.0)(options)
    }
}

/// An ordered set of named candidates plus the options shared by a run.
///
/// Immutable once constructed. Candidate names are unique; order is the
/// order of insertion and is preserved everywhere (reports, exports,
/// tie-breaks).
#[derive(Debug, Clone)]
pub struct Group<E> {
    elements: Vec<(String, E)>,
    options: GroupOptions,
}

impl<E> Group<E> {
    /// Build a group from `(name, definition)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCandidate` if two candidates share a name.
    pub fn new(elements: Vec<(String, E)>, options: GroupOptions) -> Result<Self> {
        let mut seen = HashSet::new();
        for (name, _) in &elements {
            if !seen.insert(name.as_str()) {
                return Err(CompareError::DuplicateCandidate(name.clone()));
            }
        }
        Ok(Self { elements, options })
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Candidate names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|(name, _)| name.as_str())
    }

    /// Name of the candidate at `index`.
    pub fn name(&self, index: usize) -> &str {
        &self.elements[index].0
    }

    /// Executable definition of the candidate at `index`.
    pub fn element(&self, index: usize) -> &E {
        &self.elements[index].1
    }

    pub fn options(&self) -> &GroupOptions {
        &self.options
    }
}
