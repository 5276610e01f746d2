//! `Value`: Type-erased data that every matcher consumes
//!
//! Matchers are non-generic over their input: they examine a `&Value` and decide.
//! This mirrors the erased-object boundary of classic matcher libraries while keeping
//! the primitives stack-allocated and the extension point explicit.
//!
//! # Extensibility via `Custom`
//!
//! Domain types that are not covered by the primitives implement [`CustomValue`]
//! and are wrapped with [`Value::custom`].
//!
//! # Type witnesses
//!
//! [`Extract`] is the explicit witness a typed matcher uses to pull its target type
//! out of a `Value`. There is no runtime reflection: a matcher states its target type
//! through an associated type, and the witness does the checked projection.

use std::any::Any;
use std::fmt::{Debug, Display};
use std::sync::Arc;

/// Extension trait for custom value types.
///
/// `Display` is the value's literal form in descriptions (`<...>`). A `Display`
/// implementation that returns `fmt::Error` is tolerated: rendering falls back to
/// `type_name@address`.
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use std::fmt;
/// use matchbook::{CustomValue, Value};
///
/// #[derive(Debug, PartialEq)]
/// struct Celsius(i32);
///
/// impl fmt::Display for Celsius {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{}°C", self.0)
///     }
/// }
///
/// impl CustomValue for Celsius {
///     fn custom_type_name(&self) -> &'static str {
///         "celsius"
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn eq_value(&self, other: &Value) -> bool {
///         other.as_custom::<Celsius>().is_some_and(|c| c == self)
///     }
/// }
///
/// let hot = Value::custom(Celsius(40));
/// assert_eq!(hot.type_name(), "celsius");
/// assert_eq!(hot, Value::custom(Celsius(40)));
/// ```
pub trait CustomValue: Send + Sync + Debug + Display {
    /// Human-readable type identifier, used in "was a <type>" mismatches.
    ///
    /// Convention: `snake_case`, e.g. `"geo_location"`.
    fn custom_type_name(&self) -> &'static str;

    /// Returns `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Equality as decided by this (examined) value against any other value.
    fn eq_value(&self, other: &Value) -> bool;
}

/// The erased value type that flows into every [`Matcher`](crate::Matcher).
///
/// The numeric variants are distinct kinds: `Int(5)` and `Long(5)` are not equal,
/// and each renders with its own literal suffix in descriptions.
///
/// # Example
///
/// ```
/// use matchbook::Value;
///
/// let v = Value::from(vec!["a", "b"]);
/// assert_eq!(v.type_name(), "array");
/// assert_eq!(v.as_array().map(<[Value]>::len), Some(2));
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A single character.
    Char(char),
    /// An 8-bit integer.
    Byte(i8),
    /// A 16-bit integer, rendered `<5s>`.
    Short(i16),
    /// A 32-bit integer, rendered `<5>`.
    Int(i32),
    /// A 64-bit integer, rendered `<5L>`.
    Long(i64),
    /// A 32-bit float, rendered `<5.0F>`.
    Float(f32),
    /// A 64-bit float, rendered `<5.0>`.
    Double(f64),
    /// A string, rendered double-quoted and escaped.
    String(String),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// A user-defined value.
    Custom(Arc<dyn CustomValue>),
}

// Examined-side equality: the left operand decides. For `Custom` this delegates to
// the examined value's `eq_value`, which may accept values of other kinds.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom(a), _) => a.eq_value(other),
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Byte(a), Self::Byte(b)) => a == b,
            (Self::Short(a), Self::Short(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::Double(a), Self::Double(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
            }
            _ => false,
        }
    }
}

impl Value {
    /// Wrap a [`CustomValue`].
    pub fn custom(value: impl CustomValue + 'static) -> Self {
        Self::Custom(Arc::new(value))
    }

    /// Returns `true` if this is the `Null` variant.
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this is the `String` variant.
    #[inline]
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Returns `true` if this is the `Array` variant.
    #[inline]
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Returns `true` if this is the `Custom` variant.
    #[inline]
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Returns the string slice if this is a `String`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Bool`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns any integral variant widened to `i64`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Byte(i) => Some(i64::from(*i)),
            Self::Short(i) => Some(i64::from(*i)),
            Self::Int(i) => Some(i64::from(*i)),
            Self::Long(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the elements if this is an `Array`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Downcast a `Custom` value to its concrete type.
    #[must_use]
    pub fn as_custom<C: CustomValue + 'static>(&self) -> Option<&C> {
        match self {
            Self::Custom(c) => c.as_any().downcast_ref::<C>(),
            _ => None,
        }
    }

    /// The runtime type name of this value.
    ///
    /// Used by the type-safe matcher base in "was a <type> (<value>)" mismatches.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
            Self::Byte(_) => "byte",
            Self::Short(_) => "short",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Custom(c) => c.custom_type_name(),
        }
    }

    /// An integer value sized the way collection sizes are reported.
    #[must_use]
    pub fn from_len(len: usize) -> Self {
        match i32::try_from(len) {
            Ok(n) => Self::Int(n),
            Err(_) => Self::Long(i64::try_from(len).unwrap_or(i64::MAX)),
        }
    }

    /// Convert a JSON value (as found in matcher configuration).
    ///
    /// Integers become `Int` when they fit in 32 bits and `Long` otherwise; other
    /// numbers become `Double`.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::InvalidConfig`](crate::MatcherError::InvalidConfig)
    /// for JSON objects and numbers that fit no variant.
    #[cfg(feature = "config")]
    pub fn from_json(json: &serde_json::Value) -> Result<Self, crate::MatcherError> {
        use serde_json::Value as Json;

        match json {
            Json::Null => Ok(Self::Null),
            Json::Bool(b) => Ok(Self::Bool(*b)),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(i32::try_from(i).map_or(Self::Long(i), Self::Int))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Double(f))
                } else {
                    Err(crate::MatcherError::InvalidConfig {
                        reason: format!("number {n} does not fit a 64-bit integer or float"),
                    })
                }
            }
            Json::String(s) => Ok(Self::String(s.clone())),
            Json::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Array),
            Json::Object(_) => Err(crate::MatcherError::InvalidConfig {
                reason: "objects cannot be used as values".into(),
            }),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_primitive! {
    bool => Bool,
    char => Char,
    i8 => Byte,
    i16 => Short,
    u8 => Short,
    i32 => Int,
    u16 => Int,
    i64 => Long,
    u32 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T, const N: usize> From<[T; N]> for Value
where
    T: Into<Value>,
{
    fn from(items: [T; N]) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Type witnesses
// ═══════════════════════════════════════════════════════════════════════════════

/// Type witness: the checked projection from a [`Value`] to a matcher's target type.
///
/// Implemented for [`Value`] itself (accepts everything but `Null`, which the typed
/// base rejects first), the primitive targets, `str`, `[Value]`, and `dyn CustomValue`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be extracted from a `Value`",
    note = "typed matchers target one of: Value, str, bool, char, i8, i16, i32, i64, f32, f64, [Value], dyn CustomValue"
)]
pub trait Extract {
    /// The name reported when a value of the wrong type is examined.
    const TYPE_NAME: &'static str;

    /// Project the value to this type, or `None` when the variant differs.
    fn extract(value: &Value) -> Option<&Self>;
}

impl Extract for Value {
    const TYPE_NAME: &'static str = "value";

    fn extract(value: &Value) -> Option<&Self> {
        Some(value)
    }
}

impl Extract for str {
    const TYPE_NAME: &'static str = "string";

    fn extract(value: &Value) -> Option<&Self> {
        value.as_str()
    }
}

impl Extract for [Value] {
    const TYPE_NAME: &'static str = "array";

    fn extract(value: &Value) -> Option<&Self> {
        value.as_array()
    }
}

impl Extract for dyn CustomValue {
    const TYPE_NAME: &'static str = "custom";

    fn extract(value: &Value) -> Option<&Self> {
        match value {
            Value::Custom(c) => Some(c.as_ref()),
            _ => None,
        }
    }
}

macro_rules! impl_extract_primitive {
    ($($ty:ty => $variant:ident, $name:literal),* $(,)?) => {
        $(
            impl Extract for $ty {
                const TYPE_NAME: &'static str = $name;

                fn extract(value: &Value) -> Option<&Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_extract_primitive! {
    bool => Bool, "bool",
    char => Char, "char",
    i8 => Byte, "byte",
    i16 => Short, "short",
    i32 => Int, "int",
    i64 => Long, "long",
    f32 => Float, "float",
    f64 => Double, "double",
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
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
            other.as_custom::<Point>().is_some_and(|p| p == self)
        }
    }

    #[derive(Debug)]
    struct EqualsEverything;

    impl fmt::Display for EqualsEverything {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("anything")
        }
    }

    impl CustomValue for EqualsEverything {
        fn custom_type_name(&self) -> &'static str {
            "equals_everything"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn eq_value(&self, _other: &Value) -> bool {
            true
        }
    }

    #[test]
    fn test_from_conversions() {
        assert!(matches!(Value::from("hello"), Value::String(_)));
        assert!(matches!(Value::from(5i16), Value::Short(5)));
        assert!(matches!(Value::from(5i64), Value::Long(5)));
        assert!(matches!(Value::from(5), Value::Int(5)));
        assert!(matches!(Value::from('x'), Value::Char('x')));
        assert!(Value::from(Option::<i32>::None).is_null());
        assert_eq!(Value::from(Some("a")), Value::from("a"));
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::Array(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!(Value::from([[1, 2], [3, 4]]).as_array().map(<[Value]>::len), Some(2));
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from("x").type_name(), "string");
        assert_eq!(Value::from(1).type_name(), "int");
        assert_eq!(Value::from(1i64).type_name(), "long");
        assert_eq!(Value::from(1.0f32).type_name(), "float");
        assert_eq!(Value::from(vec![1]).type_name(), "array");
        assert_eq!(Value::custom(Point { x: 0, y: 0 }).type_name(), "point");
    }

    #[test]
    fn test_numeric_kinds_are_distinct() {
        assert_ne!(Value::Int(5), Value::Long(5));
        assert_ne!(Value::Float(5.0), Value::Double(5.0));
        assert_eq!(Value::Double(f64::NAN), Value::Double(f64::NAN));
    }

    #[test]
    fn test_null_equals_only_null() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Null, Value::from(""));
        assert_ne!(Value::from(0), Value::Null);
    }

    #[test]
    fn test_arrays_compare_deep() {
        let a = Value::from([[1, 2], [3, 4]]);
        assert_eq!(a, Value::from([[1, 2], [3, 4]]));
        assert_ne!(a, Value::from(vec![vec![1, 2, 3, 4], vec![3, 4]]));
        assert_ne!(a, Value::from(vec![vec![1, 2]]));
    }

    #[test]
    fn test_custom_equality_is_decided_by_examined_value() {
        let p = Value::custom(Point { x: 1, y: 2 });
        assert_eq!(p, Value::custom(Point { x: 1, y: 2 }));
        assert_ne!(p, Value::custom(Point { x: 2, y: 1 }));
        assert_ne!(p, Value::from(1));

        let lenient = Value::custom(EqualsEverything);
        assert_eq!(lenient, Value::Null);
        assert_ne!(Value::Null, lenient);
    }

    #[test]
    fn test_as_custom_downcast() {
        let p = Value::custom(Point { x: 3, y: 4 });
        assert_eq!(p.as_custom::<Point>().map(|p| p.x), Some(3));
        assert!(p.as_custom::<EqualsEverything>().is_none());
        assert!(Value::from(1).as_custom::<Point>().is_none());
    }

    #[test]
    fn test_extract_witnesses() {
        assert_eq!(<str as Extract>::extract(&Value::from("a")), Some("a"));
        assert_eq!(<str as Extract>::extract(&Value::from(1)), None);
        assert_eq!(<i32 as Extract>::extract(&Value::from(7)), Some(&7));
        assert_eq!(<i64 as Extract>::extract(&Value::from(7)), None);
        assert!(<[Value] as Extract>::extract(&Value::from(vec![1])).is_some());
        assert!(<dyn CustomValue as Extract>::extract(&Value::custom(Point { x: 0, y: 0 })).is_some());
        assert_eq!(<Value as Extract>::extract(&Value::Null), Some(&Value::Null));
    }

    #[test]
    fn test_from_len() {
        assert_eq!(Value::from_len(3), Value::Int(3));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_json() {
        let json = serde_json::json!([1, 5_000_000_000i64, 1.5, "x", null, true, [2]]);
        let value = Value::from_json(&json).unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Int(1),
                Value::Long(5_000_000_000),
                Value::Double(1.5),
                Value::from("x"),
                Value::Null,
                Value::Bool(true),
                Value::from(vec![2]),
            ])
        );
        assert!(Value::from_json(&serde_json::json!({ "a": 1 })).is_err());
    }
}
