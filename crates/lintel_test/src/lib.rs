//! Test harness for `lintel` rule implementations.
//!
//! Rule crates depend on this in `dev-dependencies` to validate their rules
//! against on-disk fixture trees, both in-process and through a `lintel`
//! command line. The entry point is [`RuleTester`]: it resolves which rule a
//! test suite targets from the suite's own source filename, looks the rule up
//! in a [`RuleRegistry`], locates the rule's fixture directories, and owns
//! two interchangeable execution adapters behind one `run` call.
//!
//! ```text
//! static RULES: LazyLock<RuleRegistry> =
//!     LazyLock::new(|| RuleRegistry::new("my_rules").with(|| Box::new(DebugRule)));
//!
//! // In tests/test_debug_rule.rs (the filename selects `debug_rule`):
//! let tester = RuleTester::builder(&RULES).from_caller()?;
//! let result = tester.run(&workdir)?;
//! ```
//!
//! Memoized state inside rule modules is reset between cases through
//! [`lintel_cache`]; [`RuleTester::clear`] resets everything registered under
//! the rule's scopes.

pub mod cases;
mod context;
mod error;
mod fixtures;
pub mod flags;
mod registry;
mod resolver;
mod runner;
pub mod settings;
mod tester;

pub use context::{Context, Lintable, RunResult, SubContext};
pub use error::HarnessError;
pub use fixtures::{list_test_data_dirs, test_data_dir};
pub use flags::{Isolation, RunnerKind};
pub use registry::{Finding, Rule, RuleFactory, RuleRegistry};
pub use resolver::{rule_name_from_file, RuleName};
pub use runner::{CliRunner, RuleRunner, Runner};
pub use settings::RunnerOptions;
pub use tester::{RuleTester, RuleTesterBuilder};
