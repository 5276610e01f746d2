//! `Matcher`: The predicate-with-explanation contract
//!
//! Three layers, from the erased boundary inwards:
//!
//! - [`Matcher`]: examines any [`Value`]. Combinators and collection engines hold
//!   heterogeneous `Box<dyn Matcher>` children and call through this trait.
//! - [`TypeSafeMatcher`]: states its target type through [`Extract`]. A blanket impl
//!   turns it into a `Matcher` that null-checks and type-checks the value once, with
//!   a uniform mismatch for both, and only then forwards the typed item.
//! - [`DiagnosingMatcher`]: a typed matcher that decides and explains in the same
//!   pass. Every `DiagnosingMatcher` is a `TypeSafeMatcher`.
//!
//! # INV: Purity
//!
//! `matches()` returns the same result for the same input on every call. All
//! per-evaluation state lives on the stack of the call that needs it.
//!
//! # INV: Mismatch after failure
//!
//! `describe_mismatch()` is only meaningful right after `matches()` returned `false`
//! for the same value.

use crate::description::{Description, Literal, SelfDescribing};
use crate::value::{Extract, Value};
use std::fmt::Debug;

/// An immutable predicate over a [`Value`] that can explain itself.
///
/// # Example
///
/// ```
/// use matchbook::{equal_to, Description, Matcher, Value};
///
/// let matcher = equal_to("good");
/// assert!(matcher.matches(&Value::from("good")));
///
/// let mut mismatch = Description::new();
/// matcher.describe_mismatch(&Value::from("bad"), &mut mismatch);
/// assert_eq!(mismatch.as_str(), "was \"bad\"");
/// assert_eq!(Description::of(&matcher), "\"good\"");
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Matcher`",
    label = "this type cannot match against a Value",
    note = "implement `TypeSafeMatcher` or `DiagnosingMatcher` for a typed matcher, or `Matcher` directly for one that inspects any Value"
)]
pub trait Matcher: SelfDescribing + Send + Sync + Debug {
    /// Check whether `actual` satisfies this matcher.
    fn matches(&self, actual: &Value) -> bool;

    /// Explain why `actual` did not match.
    ///
    /// Only called after `matches(actual)` returned `false`.
    fn describe_mismatch(&self, actual: &Value, mismatch: &mut Description) {
        mismatch.append_text("was ").append_value(actual);
    }

    /// Box this matcher for use in a heterogeneous collection.
    fn boxed(self) -> Box<dyn Matcher>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

#[diagnostic::do_not_recommend]
impl Matcher for Box<dyn Matcher> {
    fn matches(&self, actual: &Value) -> bool {
        (**self).matches(actual)
    }

    fn describe_mismatch(&self, actual: &Value, mismatch: &mut Description) {
        (**self).describe_mismatch(actual, mismatch);
    }

    fn boxed(self) -> Box<dyn Matcher> {
        self
    }
}

/// A matcher over one statically known target type.
///
/// The blanket [`Matcher`] impl guarantees `matches_safely` only ever sees a
/// non-null value of the target type:
///
/// 1. `Null` → mismatch `was null`
/// 2. another type → mismatch `was a <type> (<value>)`
/// 3. otherwise forwarded to `matches_safely` / `describe_mismatch_safely`
///
/// # Example
///
/// ```
/// use matchbook::{Description, Matcher, SelfDescribing, TypeSafeMatcher, Value};
///
/// #[derive(Debug)]
/// struct Even;
///
/// impl SelfDescribing for Even {
///     fn describe_to(&self, description: &mut Description) {
///         description.append_text("an even int");
///     }
/// }
///
/// impl TypeSafeMatcher for Even {
///     type Target = i32;
///
///     fn matches_safely(&self, item: &i32) -> bool {
///         item % 2 == 0
///     }
/// }
///
/// assert!(Even.matches(&Value::from(4)));
///
/// let mut mismatch = Description::new();
/// Even.describe_mismatch(&Value::from("4"), &mut mismatch);
/// assert_eq!(mismatch.as_str(), "was a string (\"4\")");
/// ```
pub trait TypeSafeMatcher: SelfDescribing + Send + Sync + Debug {
    /// The type this matcher examines.
    type Target: ?Sized + Extract + Literal;

    /// Check a non-null item of the target type.
    fn matches_safely(&self, item: &Self::Target) -> bool;

    /// Explain why a non-null item of the target type did not match.
    fn describe_mismatch_safely(&self, item: &Self::Target, mismatch: &mut Description) {
        mismatch.append_text("was ").append_value(item);
    }
}

impl<M: TypeSafeMatcher> Matcher for M {
    fn matches(&self, actual: &Value) -> bool {
        if actual.is_null() {
            return false;
        }
        <M::Target as Extract>::extract(actual).is_some_and(|item| self.matches_safely(item))
    }

    fn describe_mismatch(&self, actual: &Value, mismatch: &mut Description) {
        if actual.is_null() {
            mismatch.append_text("was null");
            return;
        }
        match <M::Target as Extract>::extract(actual) {
            Some(item) => self.describe_mismatch_safely(item, mismatch),
            None => {
                mismatch
                    .append_text("was a ")
                    .append_text(actual.type_name())
                    .append_text(" (")
                    .append_value(actual)
                    .append_text(")");
            }
        }
    }
}

/// A typed matcher that writes its diagnosis while deciding.
///
/// `matches_diagnosing` receives a discarding [`Description::none()`] when only the
/// boolean is wanted, and the real mismatch sink when the explanation is rendered,
/// so the decision logic is written once.
pub trait DiagnosingMatcher: SelfDescribing + Send + Sync + Debug {
    /// The type this matcher examines.
    type Target: ?Sized + Extract + Literal;

    /// Decide whether `item` matches, writing the reason into `mismatch` if not.
    fn matches_diagnosing(&self, item: &Self::Target, mismatch: &mut Description) -> bool;
}

impl<M: DiagnosingMatcher> TypeSafeMatcher for M {
    type Target = <M as DiagnosingMatcher>::Target;

    fn matches_safely(&self, item: &<M as DiagnosingMatcher>::Target) -> bool {
        self.matches_diagnosing(item, &mut Description::none())
    }

    fn describe_mismatch_safely(
        &self,
        item: &<M as DiagnosingMatcher>::Target,
        mismatch: &mut Description,
    ) {
        self.matches_diagnosing(item, mismatch);
    }
}
