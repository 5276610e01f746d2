//! Intersecting: existential, one item satisfying one matcher is enough.

use super::{equal_to_each, non_empty};
use crate::description::{Description, SelfDescribing};
use crate::matcher::{DiagnosingMatcher, Matcher};
use crate::value::Value;
use crate::MatcherError;
use tracing::trace;

/// Matches arrays sharing at least one element with the matcher pool.
///
/// # Example
///
/// ```
/// use matchbook::{intersects_with_values, Matcher, Value};
///
/// let matcher = intersects_with_values(["x", "b"]).unwrap();
/// assert!(matcher.matches(&Value::from(["a", "b", "c"])));
/// assert!(!matcher.matches(&Value::from(["a", "c"])));
/// ```
#[derive(Debug)]
pub struct IsIterableIntersecting {
    matchers: Vec<Box<dyn Matcher>>,
}

impl IsIterableIntersecting {
    /// Create an intersecting matcher.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::EmptyMatchers`] if `matchers` is empty.
    pub fn new(matchers: impl IntoIterator<Item = Box<dyn Matcher>>) -> Result<Self, MatcherError> {
        Ok(Self {
            matchers: non_empty("intersects_with", matchers)?,
        })
    }
}

impl SelfDescribing for IsIterableIntersecting {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("iterable intersecting with ")
            .append_list("[", ", ", "]", &self.matchers);
    }
}

impl DiagnosingMatcher for IsIterableIntersecting {
    type Target = [Value];

    fn matches_diagnosing(&self, items: &[Value], mismatch: &mut Description) -> bool {
        for (index, item) in items.iter().enumerate() {
            if let Some(matcher) = self.matchers.iter().position(|m| m.matches(item)) {
                trace!(item = index, matcher, "intersection found");
                return true;
            }
        }
        mismatch
            .append_text("no item matched any of ")
            .append_list("[", ", ", "]", &self.matchers);
        false
    }
}

/// Matches arrays with at least one item satisfying one of `matchers`.
///
/// # Errors
///
/// Returns [`MatcherError::EmptyMatchers`] if `matchers` is empty.
pub fn intersects_with(
    matchers: impl IntoIterator<Item = Box<dyn Matcher>>,
) -> Result<IsIterableIntersecting, MatcherError> {
    IsIterableIntersecting::new(matchers)
}

/// Matches arrays sharing at least one value with `values`.
///
/// # Errors
///
/// Returns [`MatcherError::EmptyMatchers`] if `values` is empty.
pub fn intersects_with_values(
    values: impl IntoIterator<Item = impl Into<Value>>,
) -> Result<IsIterableIntersecting, MatcherError> {
    IsIterableIntersecting::new(equal_to_each(values))
}
