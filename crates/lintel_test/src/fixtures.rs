//! Fixture discovery for a rule's on-disk test data.
//!
//! Fixtures live at `<root>/<rule-name>/<subdir>/<case-dir>/…`; each case
//! directory is one scenario whose contents are opaque to the harness.

use std::io;
use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::error::HarnessError;
use crate::resolver::RuleName;

/// The top directory keeping test data for `rule`. Pure path arithmetic, no
/// I/O.
pub fn test_data_dir(root: &Path, rule: &RuleName) -> PathBuf {
    root.join(rule.as_str())
}

/// List the case directories directly under `<root>/<rule>/<subdir>`,
/// lexicographically sorted. Files alongside them are ignored.
///
/// Zero matches (including a missing parent) are an error naming the rule
/// and subdir; a suite must never silently run zero cases.
pub fn list_test_data_dirs(
    root: &Path,
    rule: &RuleName,
    subdir: &str,
) -> Result<Vec<PathBuf>, HarnessError> {
    let parent = test_data_dir(root, rule).join(subdir);
    let no_fixtures = || HarnessError::NoFixtures {
        rule: rule.to_string(),
        subdir: subdir.to_string(),
    };

    let entries = match std::fs::read_dir(&parent) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Err(no_fixtures()),
        Err(err) => {
            return Err(HarnessError::FixtureIo {
                path: parent,
                source: err,
            })
        }
    };

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| HarnessError::FixtureIo {
            path: parent.clone(),
            source: err,
        })?;
        let file_type = entry.file_type().map_err(|err| HarnessError::FixtureIo {
            path: entry.path(),
            source: err,
        })?;
        if file_type.is_dir() {
            dirs.push(entry.path());
        }
    }

    if dirs.is_empty() {
        return Err(no_fixtures());
    }
    Ok(dirs.into_iter().sorted().collect())
}
