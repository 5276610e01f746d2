//! matchbook - Composable matchers with human-readable failure diagnostics
//!
//! A matcher answers "does this value satisfy me?" and, when it does not, explains why.
//! Matchers compose: combinators wrap other matchers, collection engines apply lists of
//! matchers to arrays, and the assertion entry points turn a failed match into the
//! familiar three-line message.
//!
//! # Architecture
//!
//! The type system uses a hybrid erasure approach:
//!
//! - [`Value`]: Erased data type (primitives, arrays, extensible `Custom` variant)
//! - [`Matcher`]: Non-generic predicate over `&Value`, shareable across threads
//! - [`TypeSafeMatcher`]: Typed matcher; a blanket impl null-checks and type-checks once
//! - [`DiagnosingMatcher`]: Typed matcher that decides and explains in one pass
//! - [`Description`]: Owned text builder every matcher writes into
//! - [`Condition`]: Short-circuiting pipeline for multi-step matches
//!
//! # Key Design Insights
//!
//! 1. **Type erasure at data level**: `Value` lets combinators hold heterogeneous
//!    `Box<dyn Matcher>` children without generics leaking into their types.
//!
//! 2. **Explicit type witness**: a typed matcher names its target through [`Extract`].
//!    Nothing inspects types at runtime beyond matching on the `Value` variant.
//!
//! 3. **Fresh state per call**: collection engines allocate their cursors and pools on
//!    the stack of each `matches` call, so matchers stay immutable and reusable.
//!
//! # Example
//!
//! ```
//! use matchbook::prelude::*;
//!
//! let matcher = all_of(vec![
//!     starts_with("mat").boxed(),
//!     not(contains_string("z")).boxed(),
//! ])
//! .unwrap();
//!
//! assert!(matcher.matches(&Value::from("matchbook")));
//! assert_eq!(
//!     Description::of(&matcher),
//!     "(a string starting with \"mat\" and not a string containing \"z\")"
//! );
//!
//! let error = check_that("", &Value::from("fizz"), &matcher).unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     "\nExpected: (a string starting with \"mat\" and not a string containing \"z\")\n     but: a string starting with \"mat\" was \"fizz\""
//! );
//! ```
//!
//! # Extensions
//!
//! - [`MatcherConfig`]: build matchers from JSON/YAML (feature = `"config"`)
//! - [`matchbook-test`](https://docs.rs/matchbook-test): conformance fixtures (internal)

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod assert;
mod collection;
mod combinator;
mod condition;
mod description;
mod feature;
mod leaf;
mod matcher;
mod string_match;
mod value;

#[cfg(feature = "config")]
mod config;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use condition::Condition;
pub use description::{Description, Literal, SelfDescribing};
pub use matcher::{DiagnosingMatcher, Matcher, TypeSafeMatcher};
pub use string_match::StringMatchSpec;
pub use value::{CustomValue, Extract, Value};

// Assertions
pub use assert::{assert_that, assert_that_with_reason, assert_true, check_that, AssertionError};

// Concrete matchers
pub use collection::{
    Every, IsEmpty, IsIterableContaining, IsIterableContainingInAnyOrder,
    IsIterableContainingInOrder, IsIterableContainingParallelRunsOf, IsIterableIntersecting,
    IsIterableWithSize,
};
pub use combinator::{AllOf, AnyOf, CombinableMatcher, DescribedAs, Is, Not};
pub use feature::FeatureMatcher;
pub use leaf::{IsAnything, IsEqual, IsInstanceOf, IsNull};
pub use string_match::StringMatcher;

// Constructors
pub use collection::{
    contains, contains_in_any_order, contains_in_any_order_values, contains_in_relative_order,
    contains_in_relative_order_values, contains_parallel_runs_of, contains_values, empty,
    every_item, has_item, has_item_value, has_items, has_size, intersects_with,
    intersects_with_values,
};
pub use combinator::{
    all_of, any_of, both, described_as, either, is, is_a, is_value, not, not_value,
};
pub use feature::feature;
pub use leaf::{anything, anything_described, equal_to, instance_of, not_null_value, null_value};
pub use string_match::{
    contains_string, contains_string_ignoring_case, ends_with, ends_with_ignoring_case,
    equal_to_ignoring_case, matches_regex, starts_with, starts_with_ignoring_case,
};

// Config (feature-gated)
#[cfg(feature = "config")]
pub use config::{MatcherConfig, ValueType};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use matchbook::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Combinators
        all_of,
        any_of,
        // Leaves
        anything,
        // Assertions
        assert_that,
        assert_that_with_reason,
        assert_true,
        both,
        check_that,
        // Collections
        contains,
        contains_in_any_order,
        contains_in_relative_order,
        contains_parallel_runs_of,
        // Strings
        contains_string,
        described_as,
        either,
        empty,
        ends_with,
        equal_to,
        equal_to_ignoring_case,
        every_item,
        feature,
        has_item,
        has_items,
        has_size,
        instance_of,
        intersects_with,
        is,
        is_a,
        is_value,
        matches_regex,
        not,
        not_null_value,
        not_value,
        null_value,
        starts_with,
        // Core types
        AssertionError,
        Condition,
        CustomValue,
        Description,
        DiagnosingMatcher,
        Extract,
        Matcher,
        // Errors
        MatcherError,
        SelfDescribing,
        TypeSafeMatcher,
        Value,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum allowed depth for nested matcher configs.
///
/// Matchers built in code nest as deeply as the caller writes them. Configs are
/// untrusted input, so `MatcherConfig::build` rejects anything deeper.
pub const MAX_DEPTH: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from matcher construction.
///
/// These are raised while building matchers, never while matching. A mismatch is
/// always `matches() == false` plus a description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatcherError {
    /// A combinator or collection engine was given no sub-matchers.
    #[error("{matcher} requires at least one matcher, but none were given")]
    EmptyMatchers {
        /// Which matcher was being built.
        matcher: &'static str,
    },
    /// A parallel-runs matcher was asked for zero runs.
    #[error("parallel runs matcher requires at least one run")]
    ZeroRuns,
    /// A fixed-text description template was empty.
    #[error("description template must not be empty")]
    EmptyDescription,
    /// A regex pattern is invalid.
    #[error("invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying error message.
        reason: String,
    },
    /// Configuration deserialization or construction failed.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// The underlying error message.
        reason: String,
    },
    /// Config nesting exceeds [`MAX_DEPTH`].
    #[error(
        "matcher nesting depth is {depth}, but maximum allowed is {max} - reduce nesting or flatten your matcher config"
    )]
    DepthExceeded {
        /// Actual depth of the matcher config.
        depth: usize,
        /// Maximum allowed depth.
        max: usize,
    },
    /// Copying a rendered description into an external sink failed.
    #[error("failed to write description to sink")]
    Render,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Macros
// ═══════════════════════════════════════════════════════════════════════════════

/// Assert that a value satisfies a matcher, panicking with the three-line message.
///
/// The value is converted with [`Value::from`]. An optional trailing format string
/// becomes the reason line.
///
/// ```
/// use matchbook::{assert_that, contains_values, equal_to};
///
/// assert_that!("good", equal_to("good"));
/// assert_that!(vec!["foo", "bar"], contains_values(["foo", "bar"]).unwrap());
/// assert_that!(42, equal_to(42), "answer for {}", "everything");
/// ```
///
/// ```should_panic
/// use matchbook::{assert_that, equal_to};
///
/// assert_that!("bad", equal_to("good"), "checking the mood");
/// ```
#[macro_export]
macro_rules! assert_that {
    ($actual:expr, $matcher:expr $(,)?) => {
        $crate::assert_that_with_reason("", &$crate::Value::from($actual), &$matcher)
    };
    ($actual:expr, $matcher:expr, $($reason:tt)+) => {
        $crate::assert_that_with_reason(
            &::std::format!($($reason)+),
            &$crate::Value::from($actual),
            &$matcher,
        )
    };
}
