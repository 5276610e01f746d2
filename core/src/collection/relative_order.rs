//! Relative order and parallel runs: the matchers as a subsequence of the items.
//!
//! One forward pass over the items keeps `R` cursors into the shared matcher list.
//! Each item advances at most one run, the first whose next matcher accepts it.
//! Items that no run wants are skipped. Plain relative order is the `R = 1` case.

use super::{equal_to_each, non_empty};
use crate::description::{Description, SelfDescribing};
use crate::matcher::{DiagnosingMatcher, Matcher};
use crate::value::Value;
use crate::MatcherError;
use tracing::trace;

/// Matches arrays containing `runs` interleaved, non-overlapping occurrences of the
/// matcher sequence, with other items allowed in between.
///
/// # Example
///
/// ```
/// use matchbook::{contains_in_relative_order_values, contains_parallel_runs_of, equal_to, Matcher, Value};
///
/// let matcher = contains_in_relative_order_values(["b", "d"]).unwrap();
/// assert!(matcher.matches(&Value::from(["a", "b", "c", "d", "e"])));
/// assert!(!matcher.matches(&Value::from(["d", "b"])));
///
/// let matcher = contains_parallel_runs_of(2, vec![equal_to("a").boxed(), equal_to("b").boxed()]).unwrap();
/// assert!(matcher.matches(&Value::from(["a", "a", "x", "b", "b"])));
/// assert!(!matcher.matches(&Value::from(["a", "b", "x"])));
/// ```
#[derive(Debug)]
pub struct IsIterableContainingParallelRunsOf {
    runs: usize,
    matchers: Vec<Box<dyn Matcher>>,
}

impl IsIterableContainingParallelRunsOf {
    /// Create a matcher for `runs` parallel occurrences of `matchers`.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::ZeroRuns`] if `runs` is zero and
    /// [`MatcherError::EmptyMatchers`] if `matchers` is empty.
    pub fn new(
        runs: usize,
        matchers: impl IntoIterator<Item = Box<dyn Matcher>>,
    ) -> Result<Self, MatcherError> {
        if runs == 0 {
            return Err(MatcherError::ZeroRuns);
        }
        let name = if runs == 1 {
            "contains_in_relative_order"
        } else {
            "contains_parallel_runs_of"
        };
        Ok(Self {
            runs,
            matchers: non_empty(name, matchers)?,
        })
    }

    /// Returns the number of runs.
    #[must_use]
    pub fn runs(&self) -> usize {
        self.runs
    }
}

impl SelfDescribing for IsIterableContainingParallelRunsOf {
    fn describe_to(&self, description: &mut Description) {
        description.append_text("iterable containing ");
        if self.runs == 1 {
            description
                .append_list("[", ", ", "]", &self.matchers)
                .append_text(" in relative order");
        } else {
            description
                .append_text(&format!("{} parallel runs of ", self.runs))
                .append_list("[", ", ", "]", &self.matchers);
        }
    }
}

/// One run's progress through the matcher list.
#[derive(Clone, Copy, Default)]
struct Run<'a> {
    next: usize,
    last: Option<&'a Value>,
}

impl DiagnosingMatcher for IsIterableContainingParallelRunsOf {
    type Target = [Value];

    fn matches_diagnosing(&self, items: &[Value], mismatch: &mut Description) -> bool {
        // Each item advances at most one run and unstarted runs form a suffix, so runs
        // past `items.len()` never start.
        let tracked = self.runs.min(items.len());
        let mut runs = vec![Run::default(); tracked];
        for item in items {
            for run in &mut runs {
                let accepted = self
                    .matchers
                    .get(run.next)
                    .is_some_and(|matcher| matcher.matches(item));
                if accepted {
                    run.next += 1;
                    run.last = Some(item);
                    break;
                }
            }
        }

        let finished = runs
            .iter()
            .filter(|run| run.next == self.matchers.len())
            .count();
        trace!(runs = self.runs, tracked, finished, "relative order pass complete");
        if finished == self.runs {
            return true;
        }

        let unfinished = runs
            .iter()
            .enumerate()
            .filter(|(_, run)| run.next < self.matchers.len());
        let mut reported = 0;
        for (index, run) in unfinished {
            if reported > 0 {
                mismatch.append_text(", ");
            }
            reported += 1;
            if self.runs > 1 {
                mismatch.append_text(&format!("run {index}: "));
            }
            mismatch
                .append_description_of(&self.matchers[run.next])
                .append_text(" was not found");
            if let Some(last) = run.last {
                mismatch.append_text(" after ").append_value(last);
            }
        }

        let untracked = self.runs - tracked;
        if untracked > 0 {
            if reported > 0 {
                mismatch.append_text(", ");
            }
            match (self.runs, untracked) {
                (1, _) => {}
                (_, 1) => {
                    mismatch.append_text(&format!("run {tracked}: "));
                }
                _ => {
                    mismatch.append_text(&format!("runs {tracked} to {}: ", self.runs - 1));
                }
            }
            mismatch
                .append_description_of(&self.matchers[0])
                .append_text(" was not found");
        }
        false
    }
}

/// Matches arrays in which `matchers` are satisfied in order, other items allowed between.
///
/// # Errors
///
/// Returns [`MatcherError::EmptyMatchers`] if `matchers` is empty.
pub fn contains_in_relative_order(
    matchers: impl IntoIterator<Item = Box<dyn Matcher>>,
) -> Result<IsIterableContainingParallelRunsOf, MatcherError> {
    IsIterableContainingParallelRunsOf::new(1, matchers)
}

/// Matches arrays containing `values` as a subsequence.
///
/// # Errors
///
/// Returns [`MatcherError::EmptyMatchers`] if `values` is empty.
pub fn contains_in_relative_order_values(
    values: impl IntoIterator<Item = impl Into<Value>>,
) -> Result<IsIterableContainingParallelRunsOf, MatcherError> {
    IsIterableContainingParallelRunsOf::new(1, equal_to_each(values))
}

/// Matches arrays containing `runs` interleaved occurrences of the `matchers` subsequence.
///
/// # Errors
///
/// Returns [`MatcherError::ZeroRuns`] if `runs` is zero and
/// [`MatcherError::EmptyMatchers`] if `matchers` is empty.
pub fn contains_parallel_runs_of(
    runs: usize,
    matchers: impl IntoIterator<Item = Box<dyn Matcher>>,
) -> Result<IsIterableContainingParallelRunsOf, MatcherError> {
    IsIterableContainingParallelRunsOf::new(runs, matchers)
}
