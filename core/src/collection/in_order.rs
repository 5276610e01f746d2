//! Exact order: item *i* must match matcher *i*, and the lengths must agree.

use super::{equal_to_each, non_empty};
use crate::description::{Description, SelfDescribing};
use crate::matcher::{DiagnosingMatcher, Matcher};
use crate::value::Value;
use crate::MatcherError;

/// Matches arrays whose items match the matchers position by position.
///
/// A single forward pass with one cursor and no backtracking: the first item that
/// fails its matcher is final.
///
/// # Example
///
/// ```
/// use matchbook::{contains_values, Matcher, Value};
///
/// let matcher = contains_values(["foo", "bar"]).unwrap();
/// assert!(matcher.matches(&Value::from(["foo", "bar"])));
/// assert!(!matcher.matches(&Value::from(["foo", "bar", "baz"])));
/// assert!(!matcher.matches(&Value::from(["bar", "foo"])));
/// ```
#[derive(Debug)]
pub struct IsIterableContainingInOrder {
    matchers: Vec<Box<dyn Matcher>>,
}

impl IsIterableContainingInOrder {
    /// Create an exact-order matcher.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::EmptyMatchers`] if `matchers` is empty.
    pub fn new(matchers: impl IntoIterator<Item = Box<dyn Matcher>>) -> Result<Self, MatcherError> {
        Ok(Self {
            matchers: non_empty("contains", matchers)?,
        })
    }
}

impl SelfDescribing for IsIterableContainingInOrder {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("iterable containing ")
            .append_list("[", ", ", "]", &self.matchers);
    }
}

impl DiagnosingMatcher for IsIterableContainingInOrder {
    type Target = [Value];

    fn matches_diagnosing(&self, items: &[Value], mismatch: &mut Description) -> bool {
        let mut next = 0;
        for item in items {
            let Some(matcher) = self.matchers.get(next) else {
                mismatch.append_text("not matched: ").append_value(item);
                return false;
            };
            if !matcher.matches(item) {
                mismatch.append_text(&format!("item {next}: "));
                matcher.describe_mismatch(item, mismatch);
                return false;
            }
            next += 1;
        }
        if let Some(matcher) = self.matchers.get(next) {
            mismatch
                .append_text("no item was ")
                .append_description_of(matcher);
            return false;
        }
        true
    }
}

/// Matches arrays whose items match `matchers` in exactly this order.
///
/// # Errors
///
/// Returns [`MatcherError::EmptyMatchers`] if `matchers` is empty.
pub fn contains(
    matchers: impl IntoIterator<Item = Box<dyn Matcher>>,
) -> Result<IsIterableContainingInOrder, MatcherError> {
    IsIterableContainingInOrder::new(matchers)
}

/// Matches arrays equal to `values` item by item.
///
/// # Errors
///
/// Returns [`MatcherError::EmptyMatchers`] if `values` is empty.
pub fn contains_values(
    values: impl IntoIterator<Item = impl Into<Value>>,
) -> Result<IsIterableContainingInOrder, MatcherError> {
    IsIterableContainingInOrder::new(equal_to_each(values))
}
