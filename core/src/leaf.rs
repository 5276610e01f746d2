//! Leaf matchers: the base cases the combinators are built from
//!
//! - [`IsEqual`]: equality under the examined value's own rule (deep for arrays)
//! - [`IsInstanceOf`]: the value's variant is a given [`Extract`] target
//! - [`IsNull`]: the value is `Null`
//! - [`IsAnything`]: always matches

use crate::description::{Description, SelfDescribing};
use crate::matcher::Matcher;
use crate::value::{Extract, Value};
use crate::Not;

/// Equality matcher.
///
/// The *examined* value decides equality ([`Value`]'s `PartialEq`): `Null` matches
/// only `Null` (or a custom value that claims equality with it), arrays compare
/// element by element at every nesting level, and numeric kinds never mix.
///
/// # Example
///
/// ```
/// use matchbook::{equal_to, Matcher, Value};
///
/// let matcher = equal_to([[1, 2], [3, 4]]);
/// assert!(matcher.matches(&Value::from([[1, 2], [3, 4]])));
/// assert!(!matcher.matches(&Value::from(vec![vec![1, 2, 3, 4], vec![3, 4]])));
/// assert!(!matcher.matches(&Value::Null));
/// ```
#[derive(Debug, Clone)]
pub struct IsEqual {
    expected: Value,
}

impl IsEqual {
    /// Create an equality matcher for `expected`.
    pub fn new(expected: impl Into<Value>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    /// Returns the expected value.
    #[must_use]
    pub fn expected(&self) -> &Value {
        &self.expected
    }
}

impl SelfDescribing for IsEqual {
    fn describe_to(&self, description: &mut Description) {
        description.append_value(&self.expected);
    }
}

impl Matcher for IsEqual {
    fn matches(&self, actual: &Value) -> bool {
        actual == &self.expected
    }
}

/// Matches values whose variant is the target of an [`Extract`] witness.
#[derive(Debug, Clone, Copy)]
pub struct IsInstanceOf {
    type_name: &'static str,
    accepts: fn(&Value) -> bool,
}

impl IsInstanceOf {
    /// Create a matcher for values extractable as `T`.
    #[must_use]
    pub fn new<T: Extract + ?Sized>() -> Self {
        Self {
            type_name: T::TYPE_NAME,
            accepts: |value| !value.is_null() && T::extract(value).is_some(),
        }
    }
}

impl SelfDescribing for IsInstanceOf {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("an instance of ")
            .append_text(self.type_name);
    }
}

impl Matcher for IsInstanceOf {
    fn matches(&self, actual: &Value) -> bool {
        (self.accepts)(actual)
    }

    fn describe_mismatch(&self, actual: &Value, mismatch: &mut Description) {
        if actual.is_null() {
            mismatch.append_text("null");
            return;
        }
        mismatch
            .append_value(actual)
            .append_text(" is a ")
            .append_text(actual.type_name());
    }
}

/// Matches `Null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsNull;

impl SelfDescribing for IsNull {
    fn describe_to(&self, description: &mut Description) {
        description.append_text("null");
    }
}

impl Matcher for IsNull {
    fn matches(&self, actual: &Value) -> bool {
        actual.is_null()
    }
}

/// Always matches.
#[derive(Debug, Clone)]
pub struct IsAnything {
    message: String,
}

impl IsAnything {
    /// Create a matcher that always matches, described as `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for IsAnything {
    fn default() -> Self {
        Self::new("ANYTHING")
    }
}

impl SelfDescribing for IsAnything {
    fn describe_to(&self, description: &mut Description) {
        description.append_text(&self.message);
    }
}

impl Matcher for IsAnything {
    fn matches(&self, _actual: &Value) -> bool {
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constructors
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches values equal to `expected`.
pub fn equal_to(expected: impl Into<Value>) -> IsEqual {
    IsEqual::new(expected)
}

/// Matches values of the type witnessed by `T`, e.g. `instance_of::<str>()`.
#[must_use]
pub fn instance_of<T: Extract + ?Sized>() -> IsInstanceOf {
    IsInstanceOf::new::<T>()
}

/// Matches `Null`.
#[must_use]
pub fn null_value() -> IsNull {
    IsNull
}

/// Matches anything but `Null`.
#[must_use]
pub fn not_null_value() -> Not {
    Not::new(IsNull)
}

/// Always matches; described as `ANYTHING`.
#[must_use]
pub fn anything() -> IsAnything {
    IsAnything::default()
}

/// Always matches; described as `message`.
pub fn anything_described(message: impl Into<String>) -> IsAnything {
    IsAnything::new(message)
}
