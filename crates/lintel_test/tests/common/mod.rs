//! Shared fixtures for the harness's own integration tests: a concrete rule
//! with a memoized read path, the registry the suites resolve against, and a
//! tempdir-backed project builder (shape borrowed from CLI test fixtures).

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context as _, Result};
use lintel_cache::Memo;
use lintel_test::{Finding, Lintable, Rule, RuleRegistry};
use tempfile::TempDir;

/// The marker the demo rule (and the `lintel-stub` binary) flags.
pub(crate) const DENY_MARKER: &str = "lintel:deny";

/// Memoized file reads, keyed by path. Registered under the rule's own
/// scope, so `RuleTester::clear` resets it between cases.
static CONTENTS: Memo<PathBuf, String> = Memo::new("banned_word_rule", "contents");

/// Flags every file containing [`DENY_MARKER`], reading through the memo so
/// suites can observe (and reset) cross-case cache leakage.
pub(crate) struct BannedWordRule;

impl Rule for BannedWordRule {
    fn name(&self) -> &str {
        "banned_word_rule"
    }

    fn check(&self, lintable: &Lintable) -> anyhow::Result<Vec<Finding>> {
        let path = lintable.path().to_path_buf();
        let contents = CONTENTS.get_or_insert_with(path.clone(), || {
            fs::read_to_string(&path).unwrap_or_default()
        });
        if contents.contains(DENY_MARKER) {
            Ok(vec![Finding {
                rule: self.name().to_string(),
                path,
                message: format!("found `{DENY_MARKER}` marker"),
            }])
        } else {
            Ok(Vec::new())
        }
    }
}

pub(crate) static REGISTRY: LazyLock<RuleRegistry> =
    LazyLock::new(|| RuleRegistry::new("demo_rules").with(|| Box::new(BannedWordRule)));

/// A throwaway project tree for one test.
pub(crate) struct Project {
    temp_dir: TempDir,
}

impl Project {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub(crate) fn write_file(&self, path: impl AsRef<Path>, contents: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create `{}`", parent.display()))?;
        }
        fs::write(&path, contents)
            .with_context(|| format!("failed to write `{}`", path.display()))?;
        Ok(path)
    }

    pub(crate) fn mkdir(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(path);
        fs::create_dir_all(&path)
            .with_context(|| format!("failed to create `{}`", path.display()))?;
        Ok(path)
    }
}
