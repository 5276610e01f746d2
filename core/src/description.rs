//! `Description`: The text sink matchers explain themselves into
//!
//! A `Description` is created fresh for each evaluation and threaded through the
//! matcher graph as `&mut Description`. It is append-only: matchers write their
//! self-description ([`SelfDescribing::describe_to`]) or mismatch explanation
//! ([`Matcher::describe_mismatch`](crate::Matcher::describe_mismatch)) into it, and the
//! caller reads the finished text once.
//!
//! # Literal rendering
//!
//! [`Description::append_value`] renders values through [`Literal`]:
//!
//! | Value | Rendered |
//! |-------|----------|
//! | `Null` | `null` |
//! | `String("a\"b")` | `"a\"b"` |
//! | `Char('x')` | `"x"` |
//! | `Short(5)` / `Long(5)` / `Float(5.0)` | `<5s>` / `<5L>` / `<5.0F>` |
//! | `Int(5)` / `Double(5.0)` / `Bool(true)` | `<5>` / `<5.0>` / `<true>` |
//! | `Array([a, b])` | `[<a>, <b>]` |
//! | `Custom(c)` | `<c's Display>`, or `type@address` if `Display` fails |

use crate::value::{CustomValue, Value};
use crate::MatcherError;
use std::fmt::{self, Write as _};
use std::sync::Arc;

/// Something that can describe itself into a [`Description`].
pub trait SelfDescribing {
    /// Append a description of `self`.
    fn describe_to(&self, description: &mut Description);
}

impl<S: SelfDescribing + ?Sized> SelfDescribing for &S {
    fn describe_to(&self, description: &mut Description) {
        (**self).describe_to(description);
    }
}

impl<S: SelfDescribing + ?Sized> SelfDescribing for Box<S> {
    fn describe_to(&self, description: &mut Description) {
        (**self).describe_to(description);
    }
}

impl<S: SelfDescribing + ?Sized> SelfDescribing for Arc<S> {
    fn describe_to(&self, description: &mut Description) {
        (**self).describe_to(description);
    }
}

/// Accumulates human-readable text.
///
/// # Example
///
/// ```
/// use matchbook::{Description, Value};
///
/// let mut description = Description::new();
/// description
///     .append_text("was ")
///     .append_value(&Value::from("hi\n"))
///     .append_text(" not ")
///     .append_value(&5i64);
/// assert_eq!(description.as_str(), "was \"hi\\n\" not <5L>");
/// ```
#[derive(Debug, Clone)]
pub struct Description {
    // `None` discards everything written.
    buffer: Option<String>,
}

impl Description {
    /// Create an empty description.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: Some(String::new()),
        }
    }

    /// Create a description that discards everything written into it.
    ///
    /// Used when a diagnosing matcher is run only for its boolean result.
    #[must_use]
    pub fn none() -> Self {
        Self { buffer: None }
    }

    /// Render the self-description of `item` into a new string.
    #[must_use]
    pub fn of(item: &(impl SelfDescribing + ?Sized)) -> String {
        let mut description = Self::new();
        item.describe_to(&mut description);
        description.into_string()
    }

    /// Returns `true` if this description discards its input.
    #[must_use]
    pub fn is_discarding(&self) -> bool {
        self.buffer.is_none()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.as_ref().is_none_or(String::is_empty)
    }

    /// The accumulated text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.buffer.as_deref().unwrap_or("")
    }

    /// Consume the description and return the accumulated text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer.unwrap_or_default()
    }

    /// Append raw text, without escaping.
    pub fn append_text(&mut self, text: &str) -> &mut Self {
        if let Some(buffer) = &mut self.buffer {
            buffer.push_str(text);
        }
        self
    }

    /// Append the literal form of a value.
    pub fn append_value<V: Literal + ?Sized>(&mut self, value: &V) -> &mut Self {
        if !self.is_discarding() {
            value.write_literal(self);
        }
        self
    }

    /// Append the self-description of `item`.
    pub fn append_description_of(&mut self, item: &(impl SelfDescribing + ?Sized)) -> &mut Self {
        if !self.is_discarding() {
            item.describe_to(self);
        }
        self
    }

    /// Append self-describing items joined by `separator`, framed by `start` and `end`.
    pub fn append_list<'a, I, S>(
        &mut self,
        start: &str,
        separator: &str,
        end: &str,
        items: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = &'a S>,
        S: SelfDescribing + ?Sized + 'a,
    {
        self.append_text(start);
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.append_text(separator);
            }
            self.append_description_of(item);
        }
        self.append_text(end)
    }

    /// Append literal values joined by `separator`, framed by `start` and `end`.
    pub fn append_value_list<'a, I, V>(
        &mut self,
        start: &str,
        separator: &str,
        end: &str,
        values: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = &'a V>,
        V: Literal + ?Sized + 'a,
    {
        self.append_text(start);
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                self.append_text(separator);
            }
            self.append_value(value);
        }
        self.append_text(end)
    }

    /// Copy the accumulated text into an external sink.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::Render`] if the sink rejects the write.
    pub fn write_to<W: fmt::Write>(&self, sink: &mut W) -> Result<(), MatcherError> {
        sink.write_str(self.as_str()).map_err(|_| MatcherError::Render)
    }

    fn push_quoted(&mut self, chars: impl Iterator<Item = char>) {
        let Some(buffer) = &mut self.buffer else {
            return;
        };
        buffer.push('"');
        for c in chars {
            match c {
                '"' => buffer.push_str("\\\""),
                '\n' => buffer.push_str("\\n"),
                '\r' => buffer.push_str("\\r"),
                '\t' => buffer.push_str("\\t"),
                '\\' => buffer.push_str("\\\\"),
                other => buffer.push(other),
            }
        }
        buffer.push('"');
    }

    fn push_bracketed(&mut self, literal: fmt::Arguments<'_>) {
        if let Some(buffer) = &mut self.buffer {
            // Writing into a String cannot fail.
            let _ = write!(buffer, "<{literal}>");
        }
    }
}

impl Default for Description {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Literal rendering
// ═══════════════════════════════════════════════════════════════════════════════

/// The literal form of a value inside a description.
pub trait Literal {
    /// Write the literal form of `self`.
    fn write_literal(&self, description: &mut Description);
}

impl<L: Literal + ?Sized> Literal for &L {
    fn write_literal(&self, description: &mut Description) {
        (**self).write_literal(description);
    }
}

impl Literal for Value {
    fn write_literal(&self, description: &mut Description) {
        match self {
            Self::Null => {
                description.append_text("null");
            }
            Self::Bool(v) => v.write_literal(description),
            Self::Char(v) => v.write_literal(description),
            Self::Byte(v) => v.write_literal(description),
            Self::Short(v) => v.write_literal(description),
            Self::Int(v) => v.write_literal(description),
            Self::Long(v) => v.write_literal(description),
            Self::Float(v) => v.write_literal(description),
            Self::Double(v) => v.write_literal(description),
            Self::String(v) => v.as_str().write_literal(description),
            Self::Array(items) => items.as_slice().write_literal(description),
            Self::Custom(c) => c.as_ref().write_literal(description),
        }
    }
}

impl Literal for str {
    fn write_literal(&self, description: &mut Description) {
        description.push_quoted(self.chars());
    }
}

impl Literal for String {
    fn write_literal(&self, description: &mut Description) {
        self.as_str().write_literal(description);
    }
}

impl Literal for char {
    fn write_literal(&self, description: &mut Description) {
        description.push_quoted(std::iter::once(*self));
    }
}

impl Literal for [Value] {
    fn write_literal(&self, description: &mut Description) {
        description.append_value_list("[", ", ", "]", self);
    }
}

impl Literal for i16 {
    fn write_literal(&self, description: &mut Description) {
        description.push_bracketed(format_args!("{self}s"));
    }
}

impl Literal for i64 {
    fn write_literal(&self, description: &mut Description) {
        description.push_bracketed(format_args!("{self}L"));
    }
}

impl Literal for f32 {
    fn write_literal(&self, description: &mut Description) {
        description.push_bracketed(format_args!("{self:?}F"));
    }
}

impl Literal for f64 {
    fn write_literal(&self, description: &mut Description) {
        description.push_bracketed(format_args!("{self:?}"));
    }
}

macro_rules! impl_plain_literal {
    ($($ty:ty),*) => {
        $(
            impl Literal for $ty {
                fn write_literal(&self, description: &mut Description) {
                    description.push_bracketed(format_args!("{self}"));
                }
            }
        )*
    };
}

impl_plain_literal!(bool, i8, i32);

impl Literal for dyn CustomValue {
    fn write_literal(&self, description: &mut Description) {
        let mut rendered = String::new();
        if write!(rendered, "{self}").is_ok() {
            description.push_bracketed(format_args!("{rendered}"));
        } else {
            let address = (self as *const dyn CustomValue).cast::<()>() as usize;
            description.append_text(&format!("{}@{address:x}", self.custom_type_name()));
        }
    }
}
