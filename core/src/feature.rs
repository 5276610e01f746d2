//! `FeatureMatcher`: match a value through an extracted sub-value
//!
//! The extractor is an ordinary closure, so a "property" is whatever the caller can
//! compute from a [`Value`]: an array element, a custom value's field, a length.

use crate::condition::Condition;
use crate::description::{Description, SelfDescribing};
use crate::matcher::{DiagnosingMatcher, Matcher};
use crate::value::Value;
use std::fmt;

type Extractor = dyn Fn(&Value) -> Option<Value> + Send + Sync;

/// Applies a matcher to a feature extracted from the examined value.
///
/// - extractor returns `None` → mismatch `no <name>`
/// - feature does not match → mismatch `<name> <feature mismatch>`
///
/// # Example
///
/// ```
/// use matchbook::{equal_to, feature, Description, Matcher, Value};
///
/// let first = feature("first item", "an array whose first item is", |v: &Value| {
///     v.as_array()?.first().cloned()
/// }, equal_to("a"));
///
/// assert!(first.matches(&Value::from(["a", "b"])));
/// assert_eq!(Description::of(&first), "an array whose first item is \"a\"");
///
/// let mut mismatch = Description::new();
/// first.describe_mismatch(&Value::from(["b"]), &mut mismatch);
/// assert_eq!(mismatch.as_str(), "first item was \"b\"");
/// ```
pub struct FeatureMatcher {
    name: String,
    description: String,
    extractor: Box<Extractor>,
    matcher: Box<dyn Matcher>,
}

impl FeatureMatcher {
    /// Create a feature matcher.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        extractor: impl Fn(&Value) -> Option<Value> + Send + Sync + 'static,
        matcher: impl Matcher + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            extractor: Box::new(extractor),
            matcher: matcher.boxed(),
        }
    }

    /// Returns the feature name used in mismatches.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for FeatureMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureMatcher")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

impl SelfDescribing for FeatureMatcher {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text(&self.description)
            .append_text(" ")
            .append_description_of(&self.matcher);
    }
}

impl DiagnosingMatcher for FeatureMatcher {
    type Target = Value;

    fn matches_diagnosing(&self, actual: &Value, mismatch: &mut Description) -> bool {
        Condition::matched(actual, mismatch)
            .and(|value, mismatch| match (self.extractor)(value) {
                Some(feature) => Condition::matched(feature, mismatch),
                None => {
                    mismatch.append_text("no ").append_text(&self.name);
                    Condition::not_matched()
                }
            })
            .matching_with(&self.matcher, &format!("{} ", self.name))
    }
}

/// Match the feature `extractor` pulls out of a value against `matcher`.
pub fn feature(
    name: impl Into<String>,
    description: impl Into<String>,
    extractor: impl Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    matcher: impl Matcher + 'static,
) -> FeatureMatcher {
    FeatureMatcher::new(name, description, extractor, matcher)
}
