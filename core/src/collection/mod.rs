//! Collection matchers: apply matchers to the items of an array
//!
//! Four ordering disciplines, each an independent single-pass engine over a
//! non-empty list of item matchers:
//!
//! | Engine | Constructor | Succeeds when |
//! |---|---|---|
//! | [`IsIterableContainingInOrder`] | [`contains`] | item *i* matches matcher *i*, same length |
//! | [`IsIterableContainingInAnyOrder`] | [`contains_in_any_order`] | a bijection items ↔ matchers exists |
//! | [`IsIterableContainingParallelRunsOf`] | [`contains_in_relative_order`], [`contains_parallel_runs_of`] | each run finds the matchers as a subsequence |
//! | [`IsIterableIntersecting`] | [`intersects_with`] | some item matches some matcher |
//!
//! Plus the element-wise matchers in `iterable`: [`every_item`], [`has_item`],
//! [`has_items`], [`empty`], [`has_size`].
//!
//! All engines are [`DiagnosingMatcher`](crate::DiagnosingMatcher)s over `[Value]`:
//! non-arrays get the uniform `was a <type> (<value>)` mismatch, and the per-call
//! session state (cursors, assignments) lives on the stack of each call.

mod any_order;
mod in_order;
mod intersecting;
mod iterable;
mod relative_order;

pub use any_order::{contains_in_any_order, contains_in_any_order_values, IsIterableContainingInAnyOrder};
pub use in_order::{contains, contains_values, IsIterableContainingInOrder};
pub use intersecting::{intersects_with, intersects_with_values, IsIterableIntersecting};
pub use iterable::{
    empty, every_item, has_item, has_item_value, has_items, has_size, Every, IsEmpty,
    IsIterableContaining, IsIterableWithSize,
};
pub use relative_order::{
    contains_in_relative_order, contains_in_relative_order_values, contains_parallel_runs_of,
    IsIterableContainingParallelRunsOf,
};

use crate::leaf::IsEqual;
use crate::matcher::Matcher;
use crate::value::Value;
use crate::MatcherError;

/// Collect `matchers`, rejecting an empty list on behalf of `name`.
fn non_empty(
    name: &'static str,
    matchers: impl IntoIterator<Item = Box<dyn Matcher>>,
) -> Result<Vec<Box<dyn Matcher>>, MatcherError> {
    let matchers: Vec<_> = matchers.into_iter().collect();
    if matchers.is_empty() {
        return Err(MatcherError::EmptyMatchers { matcher: name });
    }
    Ok(matchers)
}

/// Wrap each value in an equality matcher.
fn equal_to_each(values: impl IntoIterator<Item = impl Into<Value>>) -> Vec<Box<dyn Matcher>> {
    values
        .into_iter()
        .map(|value| IsEqual::new(value).boxed())
        .collect()
}
