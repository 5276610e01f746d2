//! Config types for data-driven matcher construction.
//!
//! [`MatcherConfig`] mirrors the constructor functions of this crate as a serde
//! discriminated union, so a matcher can be written in JSON or YAML and built with
//! [`MatcherConfig::build()`]:
//!
//! ```json
//! { "type": "all_of", "matchers": [
//!     { "type": "string", "spec": { "prefix": "/api" } },
//!     { "type": "not", "matcher": { "type": "equal_to", "value": "/api/admin" } }
//! ] }
//! ```
//!
//! Configs are untrusted input: nesting is limited to [`MAX_DEPTH`](crate::MAX_DEPTH)
//! and every construction error surfaces as a [`MatcherError`].

use crate::{
    all_of, any_of, anything, anything_described, contains, contains_in_any_order,
    contains_in_relative_order, contains_parallel_runs_of, described_as, empty, equal_to,
    every_item, has_item, has_items, has_size, instance_of, intersects_with, is, not,
    not_null_value, null_value, Matcher, MatcherError, StringMatchSpec, Value, MAX_DEPTH,
};
use serde::Deserialize;

/// Configuration for a [`Matcher`].
///
/// Uses `#[serde(tag = "type")]`; each variant is named after the constructor it calls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatcherConfig {
    /// Always matches.
    Anything {
        /// Replaces the default `ANYTHING` description.
        #[serde(default)]
        description: Option<String>,
    },
    /// Matches `Null`.
    Null,
    /// Matches anything but `Null`.
    NotNull,
    /// Equality with a JSON value.
    EqualTo {
        /// The expected value.
        value: serde_json::Value,
    },
    /// The value has the given type.
    InstanceOf {
        /// The expected type.
        of: ValueType,
    },
    /// A string match.
    String {
        /// How to match.
        spec: StringMatchSpec,
        /// ASCII case-insensitive matching (default: false).
        #[serde(default)]
        ignore_case: bool,
    },
    /// All child matchers must match.
    AllOf {
        /// Child matchers, evaluated in order.
        matchers: Vec<MatcherConfig>,
    },
    /// Any child matcher must match.
    AnyOf {
        /// Child matchers, evaluated in order.
        matchers: Vec<MatcherConfig>,
    },
    /// Inverts the child matcher.
    Not {
        /// The matcher to negate.
        matcher: Box<MatcherConfig>,
    },
    /// Decorates the child description with `is `.
    Is {
        /// The decorated matcher.
        matcher: Box<MatcherConfig>,
    },
    /// Replaces the child description with a `%N` template.
    DescribedAs {
        /// The description template.
        template: String,
        /// The decorated matcher.
        matcher: Box<MatcherConfig>,
        /// Values substituted for `%0`, `%1`, ...
        #[serde(default)]
        values: Vec<serde_json::Value>,
    },
    /// Items match position by position.
    Contains {
        /// One matcher per expected item.
        matchers: Vec<MatcherConfig>,
    },
    /// Items pair one-to-one with the matchers in any order.
    ContainsInAnyOrder {
        /// One matcher per expected item.
        matchers: Vec<MatcherConfig>,
    },
    /// The matchers are satisfied in order, other items allowed between.
    ContainsInRelativeOrder {
        /// The expected subsequence.
        matchers: Vec<MatcherConfig>,
    },
    /// `runs` interleaved occurrences of the matcher subsequence.
    ContainsParallelRunsOf {
        /// Number of runs.
        runs: usize,
        /// The expected subsequence.
        matchers: Vec<MatcherConfig>,
    },
    /// Some item satisfies some matcher.
    IntersectsWith {
        /// The matcher pool.
        matchers: Vec<MatcherConfig>,
    },
    /// Every item matches.
    EveryItem {
        /// The item matcher.
        matcher: Box<MatcherConfig>,
    },
    /// Some item matches.
    HasItem {
        /// The item matcher.
        matcher: Box<MatcherConfig>,
    },
    /// Each matcher is satisfied by some item.
    HasItems {
        /// The item matchers.
        matchers: Vec<MatcherConfig>,
    },
    /// The array is empty.
    Empty,
    /// The array length matches.
    HasSize {
        /// Matcher applied to the length.
        size: Box<MatcherConfig>,
    },
}

/// Type names accepted by [`MatcherConfig::InstanceOf`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Any non-null value.
    Value,
    /// `Bool`.
    Bool,
    /// `Char`.
    Char,
    /// `Byte`.
    Byte,
    /// `Short`.
    Short,
    /// `Int`.
    Int,
    /// `Long`.
    Long,
    /// `Float`.
    Float,
    /// `Double`.
    Double,
    /// `String`.
    String,
    /// `Array`.
    Array,
}

impl MatcherConfig {
    /// Parse a config from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::InvalidConfig`] if the text is not a valid config.
    pub fn from_json_str(json: &str) -> Result<Self, MatcherError> {
        serde_json::from_str(json).map_err(|e| MatcherError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    /// Calculate the nesting depth of this config. A leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Anything { .. }
            | Self::Null
            | Self::NotNull
            | Self::EqualTo { .. }
            | Self::InstanceOf { .. }
            | Self::String { .. }
            | Self::Empty => 1,
            Self::Not { matcher }
            | Self::Is { matcher }
            | Self::DescribedAs { matcher, .. }
            | Self::EveryItem { matcher }
            | Self::HasItem { matcher }
            | Self::HasSize { size: matcher } => 1 + matcher.depth(),
            Self::AllOf { matchers }
            | Self::AnyOf { matchers }
            | Self::Contains { matchers }
            | Self::ContainsInAnyOrder { matchers }
            | Self::ContainsInRelativeOrder { matchers }
            | Self::ContainsParallelRunsOf { matchers, .. }
            | Self::IntersectsWith { matchers }
            | Self::HasItems { matchers } => {
                1 + matchers.iter().map(Self::depth).max().unwrap_or(0)
            }
        }
    }

    /// Build the runtime matcher.
    ///
    /// # Errors
    ///
    /// - [`MatcherError::DepthExceeded`] if nesting exceeds [`MAX_DEPTH`]
    /// - [`MatcherError::EmptyMatchers`], [`MatcherError::ZeroRuns`],
    ///   [`MatcherError::EmptyDescription`], [`MatcherError::InvalidPattern`] from the
    ///   constructors
    /// - [`MatcherError::InvalidConfig`] for values that do not convert
    pub fn build(&self) -> Result<Box<dyn Matcher>, MatcherError> {
        let depth = self.depth();
        if depth > MAX_DEPTH {
            return Err(MatcherError::DepthExceeded {
                depth,
                max: MAX_DEPTH,
            });
        }
        self.build_unchecked()
    }

    fn build_unchecked(&self) -> Result<Box<dyn Matcher>, MatcherError> {
        let matcher = match self {
            Self::Anything { description: None } => anything().boxed(),
            Self::Anything {
                description: Some(text),
            } => anything_described(text.as_str()).boxed(),
            Self::Null => null_value().boxed(),
            Self::NotNull => not_null_value().boxed(),
            Self::EqualTo { value } => equal_to(Value::from_json(value)?).boxed(),
            Self::InstanceOf { of } => of.instance_of(),
            Self::String { spec, ignore_case } => spec.to_boxed_matcher(*ignore_case)?,
            Self::AllOf { matchers } => all_of(build_all(matchers)?)?.boxed(),
            Self::AnyOf { matchers } => any_of(build_all(matchers)?)?.boxed(),
            Self::Not { matcher } => not(matcher.build_unchecked()?).boxed(),
            Self::Is { matcher } => is(matcher.build_unchecked()?).boxed(),
            Self::DescribedAs {
                template,
                matcher,
                values,
            } => {
                let values = values
                    .iter()
                    .map(Value::from_json)
                    .collect::<Result<Vec<_>, _>>()?;
                described_as(template.as_str(), matcher.build_unchecked()?, values)?.boxed()
            }
            Self::Contains { matchers } => contains(build_all(matchers)?)?.boxed(),
            Self::ContainsInAnyOrder { matchers } => {
                contains_in_any_order(build_all(matchers)?)?.boxed()
            }
            Self::ContainsInRelativeOrder { matchers } => {
                contains_in_relative_order(build_all(matchers)?)?.boxed()
            }
            Self::ContainsParallelRunsOf { runs, matchers } => {
                contains_parallel_runs_of(*runs, build_all(matchers)?)?.boxed()
            }
            Self::IntersectsWith { matchers } => intersects_with(build_all(matchers)?)?.boxed(),
            Self::EveryItem { matcher } => every_item(matcher.build_unchecked()?).boxed(),
            Self::HasItem { matcher } => has_item(matcher.build_unchecked()?).boxed(),
            Self::HasItems { matchers } => has_items(build_all(matchers)?)?.boxed(),
            Self::Empty => empty().boxed(),
            Self::HasSize { size } => has_size(size.build_unchecked()?).boxed(),
        };
        Ok(matcher)
    }
}

impl ValueType {
    fn instance_of(self) -> Box<dyn Matcher> {
        match self {
            Self::Value => instance_of::<Value>().boxed(),
            Self::Bool => instance_of::<bool>().boxed(),
            Self::Char => instance_of::<char>().boxed(),
            Self::Byte => instance_of::<i8>().boxed(),
            Self::Short => instance_of::<i16>().boxed(),
            Self::Int => instance_of::<i32>().boxed(),
            Self::Long => instance_of::<i64>().boxed(),
            Self::Float => instance_of::<f32>().boxed(),
            Self::Double => instance_of::<f64>().boxed(),
            Self::String => instance_of::<str>().boxed(),
            Self::Array => instance_of::<[Value]>().boxed(),
        }
    }
}

fn build_all(configs: &[MatcherConfig]) -> Result<Vec<Box<dyn Matcher>>, MatcherError> {
    configs.iter().map(MatcherConfig::build_unchecked).collect()
}
