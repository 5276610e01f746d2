//! Assertion entry points
//!
//! A failed assertion renders exactly three lines:
//!
//! ```text
//! <reason>
//! Expected: <matcher description>
//!      but: <mismatch description>
//! ```
//!
//! An empty reason leaves the first line blank.

use crate::description::Description;
use crate::matcher::Matcher;
use crate::value::Value;
use tracing::debug;

/// A failed assertion, carrying the rendered failure text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AssertionError {
    message: String,
}

impl AssertionError {
    /// Returns the rendered failure text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Evaluate `matcher` against `actual` once, rendering the failure text if it fails.
///
/// # Errors
///
/// Returns an [`AssertionError`] when `actual` does not match.
///
/// # Example
///
/// ```
/// use matchbook::{check_that, equal_to, Value};
///
/// let err = check_that("mood", &Value::from("bad"), &equal_to("good")).unwrap_err();
/// assert_eq!(err.to_string(), "mood\nExpected: \"good\"\n     but: was \"bad\"");
/// ```
pub fn check_that(
    reason: &str,
    actual: &Value,
    matcher: &(impl Matcher + ?Sized),
) -> Result<(), AssertionError> {
    if matcher.matches(actual) {
        return Ok(());
    }
    let mut description = Description::new();
    description
        .append_text(reason)
        .append_text("\nExpected: ")
        .append_description_of(matcher)
        .append_text("\n     but: ");
    matcher.describe_mismatch(actual, &mut description);

    let message = description.into_string();
    debug!(reason, %message, "assertion failed");
    Err(AssertionError { message })
}

/// Assert that `actual` matches, panicking with the failure text otherwise.
///
/// # Panics
///
/// Panics when `actual` does not match.
#[track_caller]
pub fn assert_that(actual: &Value, matcher: &(impl Matcher + ?Sized)) {
    assert_that_with_reason("", actual, matcher);
}

/// Assert that `actual` matches, with `reason` as the first line of the failure text.
///
/// # Panics
///
/// Panics when `actual` does not match.
#[track_caller]
pub fn assert_that_with_reason(reason: &str, actual: &Value, matcher: &(impl Matcher + ?Sized)) {
    if let Err(error) = check_that(reason, actual, matcher) {
        panic!("{error}");
    }
}

/// Assert a plain condition, panicking with `reason` alone if it is false.
///
/// # Panics
///
/// Panics when `assertion` is false.
#[track_caller]
pub fn assert_true(reason: &str, assertion: bool) {
    if !assertion {
        debug!(reason, "assertion failed");
        panic!("{reason}");
    }
}
