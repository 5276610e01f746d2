//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against matchbook. A fixture pairs one
//! [`MatcherConfig`] with the cases it must accept or reject:
//!
//! ```yaml
//! name: prefix_match
//! description: prefix matches the start of the string
//! matcher:
//!   type: string
//!   spec: { prefix: "/api" }
//! describes: a string starting with "/api"
//! cases:
//!   - name: hit
//!     value: "/api/users"
//!     matches: true
//!   - name: miss
//!     value: "/web"
//!     matches: false
//!     mismatch: was "/web"
//! ```
//!
//! A fixture with `error` expects the config to be rejected at build time with
//! exactly that message.

use matchbook::{Description, Matcher, MatcherConfig, Value};
use serde::Deserialize;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    pub description: String,
    pub matcher: MatcherConfig,
    /// Expected self-description of the built matcher.
    #[serde(default)]
    pub describes: Option<String>,
    /// Expected construction error message.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub value: serde_json::Value,
    pub matches: bool,
    /// Expected mismatch text; only checked when `matches` is false.
    #[serde(default)]
    pub mismatch: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
}

impl TestCase {
    fn run(&self, matcher: &dyn Matcher) -> CaseResult {
        let value = match Value::from_json(&self.value) {
            Ok(value) => value,
            Err(e) => {
                return CaseResult {
                    case_name: self.name.clone(),
                    passed: false,
                    expected: "a convertible value".into(),
                    actual: e.to_string(),
                }
            }
        };

        let first = matcher.matches(&value);
        // Matchers carry no state between calls.
        let second = matcher.matches(&value);
        if first != self.matches || second != first {
            return CaseResult {
                case_name: self.name.clone(),
                passed: false,
                expected: format!("matches = {}", self.matches),
                actual: format!("matches = {first}, then {second}"),
            };
        }

        match (&self.mismatch, first) {
            (Some(expected), false) => {
                let mut mismatch = Description::new();
                matcher.describe_mismatch(&value, &mut mismatch);
                let actual = mismatch.into_string();
                CaseResult {
                    case_name: self.name.clone(),
                    passed: &actual == expected,
                    expected: expected.clone(),
                    actual,
                }
            }
            _ => CaseResult {
                case_name: self.name.clone(),
                passed: true,
                expected: format!("matches = {}", self.matches),
                actual: format!("matches = {first}"),
            },
        }
    }
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Build the matcher and run all test cases.
    ///
    /// A construction error is reported as a single failed result named `build`.
    pub fn run(&self) -> Vec<CaseResult> {
        let built = self.matcher.build();

        if let Some(expected) = &self.error {
            let actual = match built {
                Ok(matcher) => format!("built {}", Description::of(&matcher)),
                Err(e) => e.to_string(),
            };
            return vec![CaseResult {
                case_name: "build".into(),
                passed: &actual == expected,
                expected: expected.clone(),
                actual,
            }];
        }

        let matcher = match built {
            Ok(matcher) => matcher,
            Err(e) => {
                return vec![CaseResult {
                    case_name: "build".into(),
                    passed: false,
                    expected: "a matcher".into(),
                    actual: e.to_string(),
                }]
            }
        };

        let mut results = Vec::with_capacity(self.cases.len() + 1);
        if let Some(expected) = &self.describes {
            let actual = Description::of(&matcher);
            results.push(CaseResult {
                case_name: "describes".into(),
                passed: &actual == expected,
                expected: expected.clone(),
                actual,
            });
        }
        results.extend(self.cases.iter().map(|case| case.run(&*matcher)));
        results
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        let results = self.run();
        for result in results {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {:?}, got {:?}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = r#"
name: prefix_match
description: prefix matches the start of the string
matcher:
  type: string
  spec: { prefix: "/api" }
describes: a string starting with "/api"
cases:
  - name: hit
    value: "/api/users"
    matches: true
  - name: miss
    value: "/web"
    matches: false
    mismatch: was "/web"
"#;

    #[test]
    fn test_parse_and_run_fixture() {
        let fixture = Fixture::from_yaml(PREFIX).unwrap();
        assert_eq!(fixture.cases.len(), 2);
        assert!(fixture.run().iter().all(|r| r.passed));
    }

    #[test]
    fn test_wrong_expectation_fails() {
        let mut fixture = Fixture::from_yaml(PREFIX).unwrap();
        fixture.cases[1].mismatch = Some("was \"/api\"".into());
        let results = fixture.run();
        assert!(!results[2].passed);
        assert_eq!(results[2].actual, "was \"/web\"");
    }

    #[test]
    fn test_expected_build_error() {
        let yaml = r#"
name: empty_all_of
description: all_of needs children
matcher: { type: all_of, matchers: [] }
error: all_of requires at least one matcher, but none were given
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        fixture.run_and_assert();
    }

    #[test]
    fn test_multi_document() {
        let yaml = format!("{PREFIX}\n---\n{PREFIX}");
        assert_eq!(Fixture::from_yaml_multi(&yaml).unwrap().len(), 2);
    }
}
