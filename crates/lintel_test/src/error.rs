use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything the harness can refuse to do, surfaced synchronously to the
/// calling test. None of these are caught or retried internally; a broken
/// naming convention or a missing fixture is a test-authoring defect that
/// must fail the run visibly.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The suite's filename did not resolve to a rule name; the tester was
    /// never initialized and rejects every operation.
    #[error("tester is not runnable: `{file}` does not match `test_?<Name>.rs`")]
    NotRunnable { file: String },

    #[error("no such rule `{rule}` in registry `{registry}`")]
    RuleNotFound { rule: String, registry: String },

    #[error("rule `{rule}` is already registered in `{registry}`")]
    DuplicateRule { rule: String, registry: String },

    #[error("invalid rule name `{name}`: expected non-empty ASCII word characters")]
    InvalidRuleName { name: String },

    #[error("{rule}: no test data dirs found [{subdir}]")]
    NoFixtures { rule: String, subdir: String },

    #[error("failed to read `{}`", path.display())]
    FixtureIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("rule `{rule}` failed on `{}`", path.display())]
    RuleCheck {
        rule: String,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to spawn `{command}`")]
    CliSpawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` produced unparseable output (stderr: {stderr})")]
    CliOutput {
        command: String,
        stderr: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{rule}: expected `{}` to lint clean, got {count} findings", case.display())]
    CaseExpectedClean {
        rule: String,
        case: PathBuf,
        count: usize,
    },

    #[error("{rule}: expected `{}` to produce findings, got none", case.display())]
    CaseExpectedFindings { rule: String, case: PathBuf },
}
