//! String matchers and `StringMatchSpec`
//!
//! [`StringMatcher`] is the runtime engine: one enum covering equality, prefix,
//! suffix, substring, and regex matching, with optional ASCII case folding. It is a
//! [`TypeSafeMatcher`] over `str`, so non-string values get the uniform
//! `was a <type> (<value>)` mismatch for free.
//!
//! # Naming: Spec vs Matcher
//!
//! - [`StringMatchSpec`] = config-level specification (what the user wrote)
//! - [`StringMatcher`] = runtime engine (what evaluates at match time)

use crate::description::{Description, SelfDescribing};
use crate::matcher::{Matcher, TypeSafeMatcher};
use crate::MatcherError;
use std::fmt;

/// Unified string matcher.
///
/// # Example
///
/// ```
/// use matchbook::{Description, Matcher, StringMatcher, Value};
///
/// // Case-insensitive prefix match
/// let matcher = StringMatcher::prefix("/API/", true);
/// assert!(matcher.matches(&Value::from("/api/users")));
/// assert_eq!(Description::of(&matcher), "a string starting with \"/API/\" ignoring case");
///
/// // Regex match
/// let matcher = StringMatcher::regex(r"^user-\d+$").unwrap();
/// assert!(matcher.matches(&Value::from("user-123")));
/// assert!(!matcher.matches(&Value::from("user-abc")));
/// ```
#[derive(Debug, Clone)]
pub enum StringMatcher {
    /// Exact string equality.
    Exact { value: String, ignore_case: bool },
    /// String prefix match.
    Prefix { value: String, ignore_case: bool },
    /// String suffix match.
    Suffix { value: String, ignore_case: bool },
    /// Substring contains match.
    Contains { value: String, ignore_case: bool },
    /// Regular expression match (linear time, no backtracking).
    Regex(regex::Regex),
}

impl StringMatcher {
    /// Create an exact match.
    #[must_use]
    pub fn exact(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::Exact {
            value: value.into(),
            ignore_case,
        }
    }

    /// Create a prefix match.
    #[must_use]
    pub fn prefix(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::Prefix {
            value: value.into(),
            ignore_case,
        }
    }

    /// Create a suffix match.
    #[must_use]
    pub fn suffix(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::Suffix {
            value: value.into(),
            ignore_case,
        }
    }

    /// Create a contains match.
    #[must_use]
    pub fn contains(value: impl Into<String>, ignore_case: bool) -> Self {
        Self::Contains {
            value: value.into(),
            ignore_case,
        }
    }

    /// Create a regex match. The pattern may match anywhere in the string; anchor it
    /// with `^...$` for a full match.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::InvalidPattern`] if the pattern does not compile.
    pub fn regex(pattern: &str) -> Result<Self, MatcherError> {
        regex::Regex::new(pattern)
            .map(Self::Regex)
            .map_err(|e| MatcherError::InvalidPattern {
                pattern: pattern.to_owned(),
                reason: e.to_string(),
            })
    }

    /// Create a case-insensitive regex match by prepending `(?i)`.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::InvalidPattern`] if the pattern does not compile.
    pub fn regex_ignore_case(pattern: &str) -> Result<Self, MatcherError> {
        regex::Regex::new(&format!("(?i){pattern}"))
            .map(Self::Regex)
            .map_err(|e| MatcherError::InvalidPattern {
                pattern: pattern.to_owned(),
                reason: e.to_string(),
            })
    }
}

impl SelfDescribing for StringMatcher {
    fn describe_to(&self, description: &mut Description) {
        let (relationship, value, ignore_case) = match self {
            Self::Exact { value, ignore_case } => ("equal to", value, *ignore_case),
            Self::Prefix { value, ignore_case } => ("starting with", value, *ignore_case),
            Self::Suffix { value, ignore_case } => ("ending with", value, *ignore_case),
            Self::Contains { value, ignore_case } => ("containing", value, *ignore_case),
            Self::Regex(re) => {
                description
                    .append_text("a string matching the pattern '")
                    .append_text(re.as_str())
                    .append_text("'");
                return;
            }
        };
        description
            .append_text("a string ")
            .append_text(relationship)
            .append_text(" ")
            .append_value(value.as_str());
        if ignore_case {
            description.append_text(" ignoring case");
        }
    }
}

impl TypeSafeMatcher for StringMatcher {
    type Target = str;

    fn matches_safely(&self, input: &str) -> bool {
        match self {
            Self::Exact { value, ignore_case } => {
                if *ignore_case {
                    input.eq_ignore_ascii_case(value)
                } else {
                    input == value
                }
            }
            Self::Prefix { value, ignore_case } => {
                if *ignore_case {
                    input
                        .get(..value.len())
                        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(value))
                } else {
                    input.starts_with(value.as_str())
                }
            }
            Self::Suffix { value, ignore_case } => {
                if *ignore_case {
                    input
                        .len()
                        .checked_sub(value.len())
                        .and_then(|start| input.get(start..))
                        .is_some_and(|suffix| suffix.eq_ignore_ascii_case(value))
                } else {
                    input.ends_with(value.as_str())
                }
            }
            Self::Contains { value, ignore_case } => {
                if *ignore_case {
                    input
                        .to_ascii_lowercase()
                        .contains(&value.to_ascii_lowercase())
                } else {
                    input.contains(value.as_str())
                }
            }
            Self::Regex(re) => re.is_match(input),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// StringMatchSpec
// ═══════════════════════════════════════════════════════════════════════════════

/// A string match specification from user configuration.
///
/// Represents one of five matching strategies. Compiles to a [`StringMatcher`] via
/// [`to_matcher()`](Self::to_matcher).
///
/// # Example
///
/// ```
/// use matchbook::{Matcher, StringMatchSpec, Value};
///
/// let spec = StringMatchSpec::Prefix("/api".into());
/// let matcher = spec.to_matcher(false).unwrap();
/// assert!(matcher.matches(&Value::from("/api/users")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum StringMatchSpec {
    /// Exact string equality.
    Exact(String),
    /// String starts with prefix.
    Prefix(String),
    /// String ends with suffix.
    Suffix(String),
    /// String contains substring.
    Contains(String),
    /// Regular expression match.
    Regex(String),
}

impl StringMatchSpec {
    /// Compile this spec into a runtime [`StringMatcher`].
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::InvalidPattern`] if the regex is invalid.
    pub fn to_matcher(&self, ignore_case: bool) -> Result<StringMatcher, MatcherError> {
        match self {
            Self::Exact(v) => Ok(StringMatcher::exact(v.as_str(), ignore_case)),
            Self::Prefix(v) => Ok(StringMatcher::prefix(v.as_str(), ignore_case)),
            Self::Suffix(v) => Ok(StringMatcher::suffix(v.as_str(), ignore_case)),
            Self::Contains(v) => Ok(StringMatcher::contains(v.as_str(), ignore_case)),
            Self::Regex(v) if ignore_case => StringMatcher::regex_ignore_case(v),
            Self::Regex(v) => StringMatcher::regex(v),
        }
    }

    /// Compile this spec into a boxed [`Matcher`].
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::InvalidPattern`] if the regex is invalid.
    pub fn to_boxed_matcher(&self, ignore_case: bool) -> Result<Box<dyn Matcher>, MatcherError> {
        self.to_matcher(ignore_case).map(Matcher::boxed)
    }
}

impl fmt::Display for StringMatchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(v) => write!(f, "Exact(\"{v}\")"),
            Self::Prefix(v) => write!(f, "Prefix(\"{v}\")"),
            Self::Suffix(v) => write!(f, "Suffix(\"{v}\")"),
            Self::Contains(v) => write!(f, "Contains(\"{v}\")"),
            Self::Regex(v) => write!(f, "Regex(\"{v}\")"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constructors
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches strings containing `substring`.
pub fn contains_string(substring: impl Into<String>) -> StringMatcher {
    StringMatcher::contains(substring, false)
}

/// Matches strings containing `substring`, ignoring ASCII case.
pub fn contains_string_ignoring_case(substring: impl Into<String>) -> StringMatcher {
    StringMatcher::contains(substring, true)
}

/// Matches strings starting with `prefix`.
pub fn starts_with(prefix: impl Into<String>) -> StringMatcher {
    StringMatcher::prefix(prefix, false)
}

/// Matches strings starting with `prefix`, ignoring ASCII case.
pub fn starts_with_ignoring_case(prefix: impl Into<String>) -> StringMatcher {
    StringMatcher::prefix(prefix, true)
}

/// Matches strings ending with `suffix`.
pub fn ends_with(suffix: impl Into<String>) -> StringMatcher {
    StringMatcher::suffix(suffix, false)
}

/// Matches strings ending with `suffix`, ignoring ASCII case.
pub fn ends_with_ignoring_case(suffix: impl Into<String>) -> StringMatcher {
    StringMatcher::suffix(suffix, true)
}

/// Matches strings equal to `expected`, ignoring ASCII case.
pub fn equal_to_ignoring_case(expected: impl Into<String>) -> StringMatcher {
    StringMatcher::exact(expected, true)
}

/// Matches strings in which `pattern` finds a match.
///
/// # Errors
///
/// Returns [`MatcherError::InvalidPattern`] if the pattern does not compile.
pub fn matches_regex(pattern: &str) -> Result<StringMatcher, MatcherError> {
    StringMatcher::regex(pattern)
}
