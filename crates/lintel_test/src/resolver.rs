use std::sync::OnceLock;

use regex::Regex;

use crate::error::HarnessError;

/// The identifier of a rule under test, derived from a suite's filename or
/// declared explicitly. Always non-empty ASCII word characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleName(Box<str>);

impl RuleName {
    pub fn new<S: AsRef<str>>(name: S) -> Result<Self, HarnessError> {
        let name = name.as_ref();
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
            return Err(HarnessError::InvalidRuleName {
                name: name.to_string(),
            });
        }
        Ok(Self(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RuleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?i:test)_?([0-9A-Za-z_]+)\.(?i:rs)$").expect("valid suite filename regex")
    })
}

/// Resolve the name of the rule under test from a suite's base filename.
///
/// The convention couples test-file naming to the rule it targets: a suite
/// named `test_debug.rs` or `TestDebugRule.rs` targets the rule `debug` or
/// `DebugRule` respectively, with the captured casing preserved. A filename
/// that does not match yields `None`, which leaves the tester in its
/// not-runnable state rather than panicking.
pub fn rule_name_from_file(file_name: &str) -> Option<RuleName> {
    let captured = pattern().captures(file_name)?;
    // The captured group is non-empty ASCII word characters by construction.
    Some(RuleName(captured[1].into()))
}
