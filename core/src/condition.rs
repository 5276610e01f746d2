//! `Condition`: short-circuiting pipeline for multi-step matches
//!
//! A multi-step match (extract a field, convert it, then apply a matcher) threads a
//! value and the mismatch sink through each step. The first step that fails writes
//! its reason and returns [`Condition::NotMatched`]; every later step is skipped.
//!
//! ```
//! use matchbook::{equal_to, Condition, Description, Value};
//!
//! let mut mismatch = Description::new();
//! let matched = Condition::matched(Value::from(vec![1, 2]), &mut mismatch)
//!     .and(|value, mismatch| match value.as_array() {
//!         Some(items) => Condition::matched(Value::from_len(items.len()), mismatch),
//!         None => {
//!             mismatch.append_text("not an array");
//!             Condition::not_matched()
//!         }
//!     })
//!     .matching_with(&equal_to(3), "length ");
//!
//! assert!(!matched);
//! assert_eq!(mismatch.as_str(), "length was <2>");
//! ```

use crate::description::Description;
use crate::matcher::Matcher;
use crate::value::Value;
use std::borrow::Borrow;

/// The state of a pipeline: still carrying a value, or already failed.
#[derive(Debug)]
pub enum Condition<'d, T> {
    /// Every step so far succeeded.
    Matched {
        /// The value produced by the last step.
        value: T,
        /// Where later steps write their mismatch.
        mismatch: &'d mut Description,
    },
    /// A step failed and wrote its reason. Terminal.
    NotMatched,
}

impl<'d, T> Condition<'d, T> {
    /// Start a pipeline carrying `value`.
    pub fn matched(value: T, mismatch: &'d mut Description) -> Self {
        Self::Matched { value, mismatch }
    }

    /// A failed pipeline.
    #[must_use]
    pub fn not_matched() -> Self {
        Self::NotMatched
    }

    /// Returns `true` while no step has failed.
    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// Run the next step. Skipped once the pipeline has failed.
    pub fn and<U>(
        self,
        step: impl FnOnce(T, &'d mut Description) -> Condition<'d, U>,
    ) -> Condition<'d, U> {
        match self {
            Self::Matched { value, mismatch } => step(value, mismatch),
            Self::NotMatched => Condition::NotMatched,
        }
    }

    /// Alias for [`and`](Self::and), for pipelines that read better as a sequence.
    pub fn then<U>(
        self,
        step: impl FnOnce(T, &'d mut Description) -> Condition<'d, U>,
    ) -> Condition<'d, U> {
        self.and(step)
    }
}

impl<T: Borrow<Value>> Condition<'_, T> {
    /// Apply `matcher` to the carried value. `false` if the pipeline already failed.
    pub fn matching(self, matcher: &(impl Matcher + ?Sized)) -> bool {
        self.matching_with(matcher, "")
    }

    /// Like [`matching`](Self::matching), prefixing the matcher's mismatch with `message`.
    pub fn matching_with(self, matcher: &(impl Matcher + ?Sized), message: &str) -> bool {
        let Self::Matched { value, mismatch } = self else {
            return false;
        };
        let value = value.borrow();
        if matcher.matches(value) {
            return true;
        }
        mismatch.append_text(message);
        matcher.describe_mismatch(value, mismatch);
        false
    }
}
