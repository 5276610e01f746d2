//! Element-wise array matchers: every item, some item, emptiness, size.

use crate::combinator::AllOf;
use crate::condition::Condition;
use crate::description::{Description, SelfDescribing};
use crate::leaf::IsEqual;
use crate::matcher::{DiagnosingMatcher, Matcher, TypeSafeMatcher};
use crate::value::Value;
use crate::MatcherError;

/// Matches arrays in which every item matches.
#[derive(Debug)]
pub struct Every {
    matcher: Box<dyn Matcher>,
}

impl SelfDescribing for Every {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("every item is ")
            .append_description_of(&self.matcher);
    }
}

impl DiagnosingMatcher for Every {
    type Target = [Value];

    fn matches_diagnosing(&self, items: &[Value], mismatch: &mut Description) -> bool {
        for item in items {
            if !self.matcher.matches(item) {
                mismatch.append_text("an item ");
                self.matcher.describe_mismatch(item, mismatch);
                return false;
            }
        }
        true
    }
}

/// Matches arrays with at least one matching item.
#[derive(Debug)]
pub struct IsIterableContaining {
    matcher: Box<dyn Matcher>,
}

impl SelfDescribing for IsIterableContaining {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("a collection containing ")
            .append_description_of(&self.matcher);
    }
}

impl DiagnosingMatcher for IsIterableContaining {
    type Target = [Value];

    fn matches_diagnosing(&self, items: &[Value], mismatch: &mut Description) -> bool {
        if items.is_empty() {
            mismatch.append_text("was empty");
            return false;
        }
        if items.iter().any(|item| self.matcher.matches(item)) {
            return true;
        }
        mismatch.append_text("mismatches were: [");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                mismatch.append_text(", ");
            }
            self.matcher.describe_mismatch(item, mismatch);
        }
        mismatch.append_text("]");
        false
    }
}

/// Matches empty arrays.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsEmpty;

impl SelfDescribing for IsEmpty {
    fn describe_to(&self, description: &mut Description) {
        description.append_text("an empty iterable");
    }
}

impl TypeSafeMatcher for IsEmpty {
    type Target = [Value];

    fn matches_safely(&self, items: &[Value]) -> bool {
        items.is_empty()
    }
}

/// Matches arrays whose length satisfies a matcher.
///
/// The length is offered to the matcher as an `Int` (or `Long` past `i32::MAX`),
/// so `has_size(equal_to(2))` reads naturally.
#[derive(Debug)]
pub struct IsIterableWithSize {
    size: Box<dyn Matcher>,
}

impl SelfDescribing for IsIterableWithSize {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("an iterable with size ")
            .append_description_of(&self.size);
    }
}

impl DiagnosingMatcher for IsIterableWithSize {
    type Target = [Value];

    fn matches_diagnosing(&self, items: &[Value], mismatch: &mut Description) -> bool {
        Condition::matched(Value::from_len(items.len()), mismatch)
            .matching_with(&self.size, "iterable size ")
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constructors
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches arrays whose every item matches `matcher`. Empty arrays match.
pub fn every_item(matcher: impl Matcher + 'static) -> Every {
    Every {
        matcher: matcher.boxed(),
    }
}

/// Matches arrays with at least one item matching `matcher`.
pub fn has_item(matcher: impl Matcher + 'static) -> IsIterableContaining {
    IsIterableContaining {
        matcher: matcher.boxed(),
    }
}

/// Matches arrays containing at least one item equal to `value`.
pub fn has_item_value(value: impl Into<Value>) -> IsIterableContaining {
    has_item(IsEqual::new(value))
}

/// Matches arrays in which each of `matchers` is satisfied by some item.
///
/// Items may satisfy more than one matcher.
///
/// # Errors
///
/// Returns [`MatcherError::EmptyMatchers`] if `matchers` is empty.
pub fn has_items(
    matchers: impl IntoIterator<Item = Box<dyn Matcher>>,
) -> Result<AllOf, MatcherError> {
    let each: Vec<Box<dyn Matcher>> = matchers
        .into_iter()
        .map(|matcher| IsIterableContaining { matcher }.boxed())
        .collect();
    if each.is_empty() {
        return Err(MatcherError::EmptyMatchers {
            matcher: "has_items",
        });
    }
    AllOf::new(each)
}

/// Matches empty arrays.
#[must_use]
pub fn empty() -> IsEmpty {
    IsEmpty
}

/// Matches arrays whose length satisfies `size`.
pub fn has_size(size: impl Matcher + 'static) -> IsIterableWithSize {
    IsIterableWithSize { size: size.boxed() }
}
