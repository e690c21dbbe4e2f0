//! Process-wide defaults and per-suite runner options.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Environment variable overriding the default fixtures root.
pub const FIXTURES_ROOT_VAR: &str = "LINTEL_TEST_FIXTURES";

/// Environment variable overriding the default CLI program.
pub const CLI_PROGRAM_VAR: &str = "LINTEL_TEST_CLI";

static FIXTURES_ROOT: LazyLock<PathBuf> = LazyLock::new(|| {
    std::env::var_os(FIXTURES_ROOT_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("resources/test/fixtures"))
});

static CLI_PROGRAM: LazyLock<String> = LazyLock::new(|| {
    std::env::var(CLI_PROGRAM_VAR).unwrap_or_else(|_| String::from("lintel"))
});

/// The search root used when a caller omits an explicit fixtures root.
pub fn default_fixtures_root() -> &'static Path {
    &FIXTURES_ROOT
}

/// The lint command the CLI adapter spawns unless overridden per tester.
pub fn default_cli_program() -> &'static str {
    &CLI_PROGRAM
}

/// Arguments passed to the CLI program ahead of the workdir.
pub fn default_cli_args() -> &'static [&'static str] {
    &["check", "--format", "json"]
}

/// Skip and default-rule configuration shared by both runner adapters.
///
/// The skip list names other rules to disable during a run, to avoid
/// cross-rule interference; it is supplied by the suite and constant for
/// that suite's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerOptions {
    pub skip_list: Vec<String>,
    pub enable_default: bool,
}
