//! Logical combinators: matchers built from other matchers
//!
//! - [`AllOf`]: conjunction, short-circuits on the first failure
//! - [`AnyOf`]: disjunction, short-circuits on the first success
//! - [`Not`]: negation
//! - [`Is`]: transparent decorator that only changes the description
//! - [`DescribedAs`]: replaces the description with a `%N` template
//! - [`CombinableMatcher`]: `both(a).and(b)` / `either(a).or(b)` chaining
//!
//! Combinators implement [`Matcher`] directly rather than through the typed layer:
//! they must see `Null` and every other variant unfiltered, since the children decide
//! what they accept.

use crate::description::{Description, SelfDescribing};
use crate::leaf::{instance_of, IsEqual};
use crate::matcher::Matcher;
use crate::value::{Extract, Value};
use crate::MatcherError;

/// All sub-matchers must match (logical AND).
///
/// Evaluates in the order supplied and stops at the first failing sub-matcher.
/// The mismatch is that sub-matcher's description followed by its own mismatch.
///
/// # Example
///
/// ```
/// use matchbook::{all_of, equal_to, Description, Matcher};
///
/// let matcher = all_of(vec![
///     equal_to("good").boxed(),
///     equal_to("bad").boxed(),
///     equal_to("ugly").boxed(),
/// ])
/// .unwrap();
/// assert_eq!(Description::of(&matcher), "(\"good\" and \"bad\" and \"ugly\")");
/// ```
#[derive(Debug)]
pub struct AllOf {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AllOf {
    /// Create a conjunction.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::EmptyMatchers`] if `matchers` is empty.
    pub fn new(matchers: impl IntoIterator<Item = Box<dyn Matcher>>) -> Result<Self, MatcherError> {
        let matchers: Vec<_> = matchers.into_iter().collect();
        if matchers.is_empty() {
            return Err(MatcherError::EmptyMatchers { matcher: "all_of" });
        }
        Ok(Self { matchers })
    }

    /// Returns the sub-matchers in evaluation order.
    #[must_use]
    pub fn matchers(&self) -> &[Box<dyn Matcher>] {
        &self.matchers
    }

    fn describe_first_failure(&self, actual: &Value, mismatch: &mut Description) {
        if let Some(matcher) = self.matchers.iter().find(|m| !m.matches(actual)) {
            mismatch.append_description_of(matcher).append_text(" ");
            matcher.describe_mismatch(actual, mismatch);
        }
    }
}

impl SelfDescribing for AllOf {
    fn describe_to(&self, description: &mut Description) {
        description.append_list("(", " and ", ")", &self.matchers);
    }
}

impl Matcher for AllOf {
    fn matches(&self, actual: &Value) -> bool {
        self.matchers.iter().all(|m| m.matches(actual))
    }

    fn describe_mismatch(&self, actual: &Value, mismatch: &mut Description) {
        self.describe_first_failure(actual, mismatch);
    }
}

/// At least one sub-matcher must match (logical OR).
///
/// Evaluates in the order supplied and stops at the first success. When all fail
/// there is no single culprit, so the mismatch is the plain `was <value>`.
#[derive(Debug)]
pub struct AnyOf {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyOf {
    /// Create a disjunction.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::EmptyMatchers`] if `matchers` is empty.
    pub fn new(matchers: impl IntoIterator<Item = Box<dyn Matcher>>) -> Result<Self, MatcherError> {
        let matchers: Vec<_> = matchers.into_iter().collect();
        if matchers.is_empty() {
            return Err(MatcherError::EmptyMatchers { matcher: "any_of" });
        }
        Ok(Self { matchers })
    }

    /// Returns the sub-matchers in evaluation order.
    #[must_use]
    pub fn matchers(&self) -> &[Box<dyn Matcher>] {
        &self.matchers
    }
}

impl SelfDescribing for AnyOf {
    fn describe_to(&self, description: &mut Description) {
        description.append_list("(", " or ", ")", &self.matchers);
    }
}

impl Matcher for AnyOf {
    fn matches(&self, actual: &Value) -> bool {
        self.matchers.iter().any(|m| m.matches(actual))
    }
}

/// Inverts the wrapped matcher (logical NOT).
#[derive(Debug)]
pub struct Not {
    matcher: Box<dyn Matcher>,
}

impl Not {
    /// Negate `matcher`.
    pub fn new(matcher: impl Matcher + 'static) -> Self {
        Self {
            matcher: matcher.boxed(),
        }
    }

    /// Negate an already boxed matcher.
    #[must_use]
    pub fn from_boxed(matcher: Box<dyn Matcher>) -> Self {
        Self { matcher }
    }
}

impl SelfDescribing for Not {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("not ")
            .append_description_of(&self.matcher);
    }
}

impl Matcher for Not {
    fn matches(&self, actual: &Value) -> bool {
        !self.matcher.matches(actual)
    }
}

/// Transparent decorator: same result and mismatch, description prefixed with `is `.
#[derive(Debug)]
pub struct Is {
    matcher: Box<dyn Matcher>,
}

impl Is {
    /// Decorate `matcher`.
    pub fn new(matcher: impl Matcher + 'static) -> Self {
        Self {
            matcher: matcher.boxed(),
        }
    }

    /// Decorate an already boxed matcher.
    #[must_use]
    pub fn from_boxed(matcher: Box<dyn Matcher>) -> Self {
        Self { matcher }
    }
}

impl SelfDescribing for Is {
    fn describe_to(&self, description: &mut Description) {
        description
            .append_text("is ")
            .append_description_of(&self.matcher);
    }
}

impl Matcher for Is {
    fn matches(&self, actual: &Value) -> bool {
        self.matcher.matches(actual)
    }

    fn describe_mismatch(&self, actual: &Value, mismatch: &mut Description) {
        self.matcher.describe_mismatch(actual, mismatch);
    }
}

/// Replaces the wrapped matcher's description with a fixed template.
///
/// `%N` in the template is substituted with the literal form of the `N`th value.
/// A placeholder without a corresponding value is left as written. Matching and
/// mismatch description are delegated unchanged.
///
/// # Example
///
/// ```
/// use matchbook::{described_as, equal_to, Description, Value};
///
/// let matcher = described_as("the answer %0, not %1 or %7", equal_to(42), [42, 41]).unwrap();
/// assert_eq!(Description::of(&matcher), "the answer <42>, not <41> or %7");
/// ```
#[derive(Debug)]
pub struct DescribedAs {
    template: String,
    matcher: Box<dyn Matcher>,
    values: Vec<Value>,
}

impl DescribedAs {
    /// Wrap `matcher` with a description template.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::EmptyDescription`] if `template` is empty.
    pub fn new(
        template: impl Into<String>,
        matcher: Box<dyn Matcher>,
        values: Vec<Value>,
    ) -> Result<Self, MatcherError> {
        let template = template.into();
        if template.is_empty() {
            return Err(MatcherError::EmptyDescription);
        }
        Ok(Self {
            template,
            matcher,
            values,
        })
    }
}

impl SelfDescribing for DescribedAs {
    fn describe_to(&self, description: &mut Description) {
        let mut rest = self.template.as_str();
        while let Some(at) = rest.find('%') {
            description.append_text(&rest[..at]);
            let after = &rest[at + 1..];
            let digits = after
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after.len());
            let value = after[..digits]
                .parse::<usize>()
                .ok()
                .and_then(|index| self.values.get(index));
            match value {
                Some(value) => {
                    description.append_value(value);
                }
                None => {
                    description.append_text(&rest[at..at + 1 + digits]);
                }
            }
            rest = &after[digits..];
        }
        description.append_text(rest);
    }
}

impl Matcher for DescribedAs {
    fn matches(&self, actual: &Value) -> bool {
        self.matcher.matches(actual)
    }

    fn describe_mismatch(&self, actual: &Value, mismatch: &mut Description) {
        self.matcher.describe_mismatch(actual, mismatch);
    }
}

/// Fluent two-way combination: `both(a).and(b)` or `either(a).or(b)`.
///
/// Each `and` / `or` wraps the matcher built so far together with the new one, so
/// `both(a).and(b).and(c)` describes as `((a and b) and c)`.
#[derive(Debug)]
pub struct CombinableMatcher {
    matcher: Box<dyn Matcher>,
}

impl CombinableMatcher {
    /// Start a chain from `matcher`.
    pub fn new(matcher: impl Matcher + 'static) -> Self {
        Self {
            matcher: matcher.boxed(),
        }
    }

    /// Require `other` as well.
    #[must_use]
    pub fn and(self, other: impl Matcher + 'static) -> Self {
        Self {
            matcher: Box::new(AllOf {
                matchers: vec![self.matcher, other.boxed()],
            }),
        }
    }

    /// Accept `other` instead.
    #[must_use]
    pub fn or(self, other: impl Matcher + 'static) -> Self {
        Self {
            matcher: Box::new(AnyOf {
                matchers: vec![self.matcher, other.boxed()],
            }),
        }
    }
}

impl SelfDescribing for CombinableMatcher {
    fn describe_to(&self, description: &mut Description) {
        self.matcher.describe_to(description);
    }
}

impl Matcher for CombinableMatcher {
    fn matches(&self, actual: &Value) -> bool {
        self.matcher.matches(actual)
    }

    fn describe_mismatch(&self, actual: &Value, mismatch: &mut Description) {
        self.matcher.describe_mismatch(actual, mismatch);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constructors
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches when every matcher matches.
///
/// # Errors
///
/// Returns [`MatcherError::EmptyMatchers`] if `matchers` is empty.
pub fn all_of(matchers: impl IntoIterator<Item = Box<dyn Matcher>>) -> Result<AllOf, MatcherError> {
    AllOf::new(matchers)
}

/// Matches when any matcher matches.
///
/// # Errors
///
/// Returns [`MatcherError::EmptyMatchers`] if `matchers` is empty.
pub fn any_of(matchers: impl IntoIterator<Item = Box<dyn Matcher>>) -> Result<AnyOf, MatcherError> {
    AnyOf::new(matchers)
}

/// Start a conjunction: `both(a).and(b)`.
pub fn both(matcher: impl Matcher + 'static) -> CombinableMatcher {
    CombinableMatcher::new(matcher)
}

/// Start a disjunction: `either(a).or(b)`.
pub fn either(matcher: impl Matcher + 'static) -> CombinableMatcher {
    CombinableMatcher::new(matcher)
}

/// Decorate `matcher` so it reads `is ...`.
pub fn is(matcher: impl Matcher + 'static) -> Is {
    Is::new(matcher)
}

/// Shortcut for `is(equal_to(value))`.
pub fn is_value(value: impl Into<Value>) -> Is {
    Is::new(IsEqual::new(value))
}

/// Shortcut for `is(instance_of::<T>())`.
#[must_use]
pub fn is_a<T: Extract + ?Sized>() -> Is {
    Is::new(instance_of::<T>())
}

/// Invert `matcher`.
pub fn not(matcher: impl Matcher + 'static) -> Not {
    Not::new(matcher)
}

/// Shortcut for `not(equal_to(value))`.
pub fn not_value(value: impl Into<Value>) -> Not {
    Not::new(IsEqual::new(value))
}

/// Replace `matcher`'s description with `template`, substituting `%N` with `values[N]`.
///
/// # Errors
///
/// Returns [`MatcherError::EmptyDescription`] if `template` is empty.
pub fn described_as(
    template: impl Into<String>,
    matcher: impl Matcher + 'static,
    values: impl IntoIterator<Item = impl Into<Value>>,
) -> Result<DescribedAs, MatcherError> {
    DescribedAs::new(
        template,
        matcher.boxed(),
        values.into_iter().map(Into::into).collect(),
    )
}
