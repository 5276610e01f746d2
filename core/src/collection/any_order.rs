//! Any order: a perfect matching between items and matchers must exist.
//!
//! The decision is a bipartite matching problem. Kuhn's augmenting-path algorithm
//! answers it in O(n³) matcher evaluations at worst, each cached so no pair is
//! evaluated twice within one call. A greedy claim-once pass would reject inputs
//! where an early item claims a matcher a later item needs; augmenting paths
//! reassign it instead.

use super::{equal_to_each, non_empty};
use crate::description::{Description, SelfDescribing};
use crate::matcher::{DiagnosingMatcher, Matcher};
use crate::value::Value;
use crate::MatcherError;
use std::collections::HashMap;
use tracing::trace;

/// Matches arrays whose items can be paired one-to-one with the matchers.
///
/// # Example
///
/// ```
/// use matchbook::{contains_in_any_order_values, Matcher, Value};
///
/// let matcher = contains_in_any_order_values(["a", "b", "c"]).unwrap();
/// assert!(matcher.matches(&Value::from(["c", "b", "a"])));
/// assert!(!matcher.matches(&Value::from(["a", "b"])));
/// assert!(!matcher.matches(&Value::from(["a", "b", "d"])));
/// ```
#[derive(Debug)]
pub struct IsIterableContainingInAnyOrder {
    matchers: Vec<Box<dyn Matcher>>,
}

impl IsIterableContainingInAnyOrder {
    /// Create an any-order matcher.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::EmptyMatchers`] if `matchers` is empty.
    pub fn new(matchers: impl IntoIterator<Item = Box<dyn Matcher>>) -> Result<Self, MatcherError> {
        Ok(Self {
            matchers: non_empty("contains_in_any_order", matchers)?,
        })
    }
}

impl SelfDescribing for IsIterableContainingInAnyOrder {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("iterable with items ")
            .append_list("[", ", ", "]", &self.matchers)
            .append_text(" in any order");
    }
}

impl DiagnosingMatcher for IsIterableContainingInAnyOrder {
    type Target = [Value];

    fn matches_diagnosing(&self, items: &[Value], mismatch: &mut Description) -> bool {
        let expected = self.matchers.len();
        if items.len() != expected {
            let problem = if items.len() < expected {
                "not enough items"
            } else {
                "too many items"
            };
            mismatch.append_text(&format!(
                "{problem}: expected {expected} but got {}",
                items.len()
            ));
            return false;
        }

        let mut session = Assignment::new(&self.matchers, items);
        for matcher in 0..expected {
            let mut visited = vec![false; items.len()];
            if !session.assign(matcher, &mut visited) {
                trace!(matcher, items = items.len(), "no augmenting path");
                mismatch.append_text("no permutation of the matchers matched the items sequence.");
                return false;
            }
        }
        trace!(items = items.len(), "perfect matching found");
        true
    }
}

/// Per-call matching session: which matcher owns each item, plus the pair results
/// evaluated so far.
struct Assignment<'a> {
    matchers: &'a [Box<dyn Matcher>],
    items: &'a [Value],
    owner: Vec<Option<usize>>,
    results: HashMap<(usize, usize), bool>,
}

impl<'a> Assignment<'a> {
    fn new(matchers: &'a [Box<dyn Matcher>], items: &'a [Value]) -> Self {
        Self {
            matchers,
            items,
            owner: vec![None; items.len()],
            results: HashMap::new(),
        }
    }

    fn accepts(&mut self, matcher: usize, item: usize) -> bool {
        let (matchers, items) = (self.matchers, self.items);
        *self
            .results
            .entry((matcher, item))
            .or_insert_with(|| matchers[matcher].matches(&items[item]))
    }

    /// Find an item for `matcher`, displacing earlier owners along an augmenting path.
    fn assign(&mut self, matcher: usize, visited: &mut [bool]) -> bool {
        for item in 0..self.items.len() {
            if visited[item] || !self.accepts(matcher, item) {
                continue;
            }
            visited[item] = true;
            let free = match self.owner[item] {
                None => true,
                Some(previous) => self.assign(previous, visited),
            };
            if free {
                self.owner[item] = Some(matcher);
                return true;
            }
        }
        false
    }
}

/// Matches arrays whose items pair one-to-one with `matchers`, in any order.
///
/// # Errors
///
/// Returns [`MatcherError::EmptyMatchers`] if `matchers` is empty.
pub fn contains_in_any_order(
    matchers: impl IntoIterator<Item = Box<dyn Matcher>>,
) -> Result<IsIterableContainingInAnyOrder, MatcherError> {
    IsIterableContainingInAnyOrder::new(matchers)
}

/// Matches arrays that are a permutation of `values`.
///
/// # Errors
///
/// Returns [`MatcherError::EmptyMatchers`] if `values` is empty.
pub fn contains_in_any_order_values(
    values: impl IntoIterator<Item = impl Into<Value>>,
) -> Result<IsIterableContainingInAnyOrder, MatcherError> {
    IsIterableContainingInAnyOrder::new(equal_to_each(values))
}
