//! matchbook-test: Conformance fixtures and test-support types
//!
//! Provides instrumented matchers and custom values for exercising matchbook's
//! evaluation guarantees, plus the YAML fixture runner (feature = `"fixtures"`).
//!
//! # Example
//!
//! ```
//! use matchbook_test::prelude::*;
//!
//! // Probe counts how often it is asked
//! let probe = Probe::new(equal_to("admin"));
//! let matcher = any_of(vec![probe.clone().boxed(), anything().boxed()]).unwrap();
//!
//! assert!(matcher.matches(&Value::from("admin")));
//! assert_eq!(probe.evaluations(), 1);
//! ```

use matchbook::prelude::*;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[cfg(feature = "fixtures")]
pub mod fixture;

// ═══════════════════════════════════════════════════════════════════════════════
// Probe
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
struct Counters {
    evaluations: AtomicUsize,
    mismatches: AtomicUsize,
}

/// Wraps a matcher and counts `matches` and `describe_mismatch` calls.
///
/// Clones share their counters, so a clone can be handed to a combinator while
/// the original is kept for inspection.
#[derive(Debug, Clone)]
pub struct Probe {
    inner: Arc<dyn Matcher>,
    counters: Arc<Counters>,
}

impl Probe {
    /// Wrap `matcher`.
    pub fn new(matcher: impl Matcher + 'static) -> Self {
        Self {
            inner: Arc::new(matcher),
            counters: Arc::default(),
        }
    }

    /// How many times `matches` was called.
    #[must_use]
    pub fn evaluations(&self) -> usize {
        self.counters.evaluations.load(Ordering::SeqCst)
    }

    /// How many times `describe_mismatch` was called.
    #[must_use]
    pub fn mismatches(&self) -> usize {
        self.counters.mismatches.load(Ordering::SeqCst)
    }
}

impl SelfDescribing for Probe {
    fn describe_to(&self, description: &mut Description) {
        self.inner.describe_to(description);
    }
}

impl Matcher for Probe {
    fn matches(&self, actual: &Value) -> bool {
        self.counters.evaluations.fetch_add(1, Ordering::SeqCst);
        self.inner.matches(actual)
    }

    fn describe_mismatch(&self, actual: &Value, mismatch: &mut Description) {
        self.counters.mismatches.fetch_add(1, Ordering::SeqCst);
        self.inner.describe_mismatch(actual, mismatch);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Custom values
// ═══════════════════════════════════════════════════════════════════════════════

/// A 2D point, the reference [`CustomValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl CustomValue for Point {
    fn custom_type_name(&self) -> &'static str {
        "point"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_value(&self, other: &Value) -> bool {
        other.as_custom::<Point>() == Some(self)
    }
}

impl From<Point> for Value {
    fn from(point: Point) -> Self {
        Value::custom(point)
    }
}

/// A custom value whose `Display` always fails.
///
/// Descriptions fall back to `unprintable@<address>` for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unprintable;

impl fmt::Display for Unprintable {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Err(fmt::Error)
    }
}

impl CustomValue for Unprintable {
    fn custom_type_name(&self) -> &'static str {
        "unprintable"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_value(&self, other: &Value) -> bool {
        other.as_custom::<Unprintable>().is_some()
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{Point, Probe, Unprintable};
    pub use matchbook::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch_of(matcher: &dyn Matcher, actual: &Value) -> String {
        let mut mismatch = Description::new();
        matcher.describe_mismatch(actual, &mut mismatch);
        mismatch.into_string()
    }

    #[test]
    fn test_probe_counts_are_shared_by_clones() {
        let probe = Probe::new(equal_to(1));
        let clone = probe.clone();

        assert!(!clone.matches(&Value::from(2)));
        let _ = mismatch_of(&clone, &Value::from(2));

        assert_eq!(probe.evaluations(), 1);
        assert_eq!(probe.mismatches(), 1);
    }

    #[test]
    fn test_probe_is_transparent() {
        let probe = Probe::new(starts_with("a"));
        assert_eq!(Description::of(&probe), "a string starting with \"a\"");
        assert_eq!(mismatch_of(&probe, &Value::from(3)), "was a int (<3>)");
    }

    #[test]
    fn test_point_equality_and_rendering() {
        let matcher = equal_to(Point::new(1, 2));
        assert!(matcher.matches(&Point::new(1, 2).into()));
        assert!(!matcher.matches(&Point::new(2, 1).into()));
        assert!(!matcher.matches(&Value::from("(1, 2)")));
        assert_eq!(Description::of(&matcher), "<(1, 2)>");
        assert_eq!(Value::from(Point::new(0, 0)).type_name(), "point");
    }

    #[test]
    fn test_unprintable_falls_back_to_type_and_address() {
        let matcher = equal_to(Value::custom(Unprintable));
        assert!(Description::of(&matcher).starts_with("unprintable@"));
        assert!(matcher.matches(&Value::custom(Unprintable)));
    }
}
