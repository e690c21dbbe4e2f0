use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use crate::context::RunResult;
use crate::error::HarnessError;
use crate::fixtures;
use crate::flags::{Isolation, RunnerKind};
use crate::registry::{Rule, RuleRegistry};
use crate::resolver::{rule_name_from_file, RuleName};
use crate::runner::{CliRunner, RuleRunner, Runner};
use crate::settings::{self, RunnerOptions};

/// The harness facade owned by one rule test suite.
///
/// A tester is either *runnable* (the suite's filename resolved to a
/// registered rule, and the rule instance, both adapters, and the cache
/// scopes were all built at construction) or *not runnable* (the filename
/// did not match the naming convention). The state is fixed for the tester's
/// lifetime; a not-runnable tester rejects every operation with
/// [`HarnessError::NotRunnable`] instead of panicking, so a mis-named suite
/// fails visibly in its first assertion rather than at collection time.
pub struct RuleTester {
    state: State,
}

enum State {
    Unresolvable { file: String },
    Runnable(Box<Runnable>),
}

struct Runnable {
    name: RuleName,
    rule: Arc<dyn Rule>,
    fixtures_root: PathBuf,
    // Memoization scopes harvested at construction: the registry's name for
    // module-level caches, the rule's name for rule-level ones.
    scopes: Vec<String>,
    rule_runner: Box<dyn Runner>,
    cli_runner: Box<dyn Runner>,
}

impl std::fmt::Debug for RuleTester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            State::Unresolvable { file } => f
                .debug_struct("RuleTester")
                .field("unresolvable_file", file)
                .finish(),
            State::Runnable(runnable) => f
                .debug_struct("RuleTester")
                .field("rule", &runnable.name)
                .finish_non_exhaustive(),
        }
    }
}

impl RuleTester {
    pub fn builder(registry: &RuleRegistry) -> RuleTesterBuilder<'_> {
        RuleTesterBuilder {
            registry,
            fixtures_root: settings::default_fixtures_root().to_path_buf(),
            options: RunnerOptions::default(),
            cli_program: None,
            cli_args: None,
            rule_runner: None,
            cli_runner: None,
        }
    }

    pub fn is_runnable(&self) -> bool {
        matches!(self.state, State::Runnable(_))
    }

    pub fn rule_name(&self) -> Option<&RuleName> {
        match &self.state {
            State::Runnable(runnable) => Some(&runnable.name),
            State::Unresolvable { .. } => None,
        }
    }

    pub fn rule(&self) -> Result<&Arc<dyn Rule>, HarnessError> {
        Ok(&self.runnable()?.rule)
    }

    fn runnable(&self) -> Result<&Runnable, HarnessError> {
        match &self.state {
            State::Runnable(runnable) => Ok(runnable),
            State::Unresolvable { file } => Err(HarnessError::NotRunnable { file: file.clone() }),
        }
    }

    /// Run the rule over `workdir`: isolated, through the direct adapter.
    pub fn run(&self, workdir: &Path) -> Result<RunResult, HarnessError> {
        self.run_with(workdir, Isolation::Isolated, RunnerKind::Direct)
    }

    /// Stateless dispatch over the two pre-built adapters.
    pub fn run_with(
        &self,
        workdir: &Path,
        isolation: Isolation,
        kind: RunnerKind,
    ) -> Result<RunResult, HarnessError> {
        let runnable = self.runnable()?;
        let runner = if kind.is_cli() {
            &runnable.cli_runner
        } else {
            &runnable.rule_runner
        };
        runner.run(workdir, isolation)
    }

    /// Reset every memoized computation registered under the rule's scopes,
    /// returning the number of entries dropped.
    ///
    /// Callers invoke this between test cases; the harness never calls it
    /// itself. Clearing goes through the live registry, so a memo first
    /// touched mid-test is still caught.
    pub fn clear(&self) -> Result<usize, HarnessError> {
        let runnable = self.runnable()?;
        let dropped = runnable
            .scopes
            .iter()
            .map(|scope| lintel_cache::clear_scope(scope))
            .sum();
        debug!(
            "cleared {dropped} memoized entries under scopes {:?}",
            runnable.scopes
        );
        Ok(dropped)
    }

    /// The top directory keeping this rule's test data under the tester's
    /// fixtures root.
    pub fn test_data_dir(&self) -> Result<PathBuf, HarnessError> {
        let runnable = self.runnable()?;
        Ok(fixtures::test_data_dir(&runnable.fixtures_root, &runnable.name))
    }

    pub fn test_data_dir_in(&self, root: &Path) -> Result<PathBuf, HarnessError> {
        Ok(fixtures::test_data_dir(root, &self.runnable()?.name))
    }

    /// The case directories under `<fixtures-root>/<rule>/<subdir>`, sorted.
    pub fn list_test_data_dirs(&self, subdir: &str) -> Result<Vec<PathBuf>, HarnessError> {
        let runnable = self.runnable()?;
        fixtures::list_test_data_dirs(&runnable.fixtures_root, &runnable.name, subdir)
    }

    pub fn list_test_data_dirs_in(
        &self,
        subdir: &str,
        root: &Path,
    ) -> Result<Vec<PathBuf>, HarnessError> {
        fixtures::list_test_data_dirs(root, &self.runnable()?.name, subdir)
    }
}

/// Configures and constructs a [`RuleTester`].
///
/// Terminal constructors: [`from_caller`](Self::from_caller) (resolves the
/// rule from the calling file's name), [`from_file`](Self::from_file)
/// (explicit filename), and [`for_rule`](Self::for_rule) (bypasses the
/// filename convention with a declared rule name).
pub struct RuleTesterBuilder<'a> {
    registry: &'a RuleRegistry,
    fixtures_root: PathBuf,
    options: RunnerOptions,
    cli_program: Option<String>,
    cli_args: Option<Vec<String>>,
    rule_runner: Option<Box<dyn Runner>>,
    cli_runner: Option<Box<dyn Runner>>,
}

impl RuleTesterBuilder<'_> {
    /// Other rules' identifiers to disable during runs, to avoid cross-rule
    /// interference.
    #[must_use]
    pub fn with_skip_list(mut self, skip_list: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options.skip_list = skip_list.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_enable_default(mut self, enable_default: bool) -> Self {
        self.options.enable_default = enable_default;
        self
    }

    #[must_use]
    pub fn with_fixtures_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.fixtures_root = root.into();
        self
    }

    #[must_use]
    pub fn with_cli_program(mut self, program: impl Into<String>) -> Self {
        self.cli_program = Some(program.into());
        self
    }

    #[must_use]
    pub fn with_cli_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.cli_args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Inject a direct adapter, replacing the built-in [`RuleRunner`].
    #[must_use]
    pub fn with_rule_runner(mut self, runner: Box<dyn Runner>) -> Self {
        self.rule_runner = Some(runner);
        self
    }

    /// Inject a CLI adapter, replacing the built-in [`CliRunner`].
    #[must_use]
    pub fn with_cli_runner(mut self, runner: Box<dyn Runner>) -> Self {
        self.cli_runner = Some(runner);
        self
    }

    /// Resolve the rule under test from the calling source file's name.
    ///
    /// This reads the location of the caller, so the convention keeps
    /// working when suites wrap construction in their own helper (the
    /// helper's caller is still the suite file as long as the helper is
    /// `#[track_caller]` too).
    #[track_caller]
    pub fn from_caller(self) -> Result<RuleTester, HarnessError> {
        let file = std::panic::Location::caller().file();
        let file_name = Path::new(file)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.from_file(&file_name)
    }

    /// Resolve the rule under test from an explicit suite filename.
    ///
    /// A non-matching filename yields a not-runnable tester, never an error:
    /// the failure surfaces on first use, carrying the offending filename.
    pub fn from_file(self, file_name: &str) -> Result<RuleTester, HarnessError> {
        match rule_name_from_file(file_name) {
            Some(name) => self.build(name),
            None => Ok(RuleTester {
                state: State::Unresolvable {
                    file: file_name.to_string(),
                },
            }),
        }
    }

    /// Bypass the filename convention with a declared rule name.
    pub fn for_rule(self, name: &str) -> Result<RuleTester, HarnessError> {
        let name = RuleName::new(name)?;
        self.build(name)
    }

    // A missing rule is a hard construction-time failure, not deferred to
    // the first run.
    fn build(self, name: RuleName) -> Result<RuleTester, HarnessError> {
        let factory = self.registry.get(&name)?;
        let rule: Arc<dyn Rule> = Arc::from(factory());

        let mut scopes = vec![self.registry.name().to_string()];
        if self.registry.name() != name.as_str() {
            scopes.push(name.as_str().to_string());
        }

        let rule_runner = self.rule_runner.unwrap_or_else(|| {
            Box::new(RuleRunner::new(
                rule.clone(),
                self.fixtures_root.clone(),
                self.options.clone(),
            ))
        });
        let cli_runner = match self.cli_runner {
            Some(runner) => runner,
            None => {
                let mut cli = CliRunner::new(
                    rule.clone(),
                    self.fixtures_root.clone(),
                    self.options.clone(),
                );
                match (self.cli_program, self.cli_args) {
                    (Some(program), Some(args)) => cli = cli.with_command(program, args),
                    (Some(program), None) => {
                        let args: Vec<String> = settings::default_cli_args()
                            .iter()
                            .map(ToString::to_string)
                            .collect();
                        cli = cli.with_command(program, args);
                    }
                    (None, Some(args)) => {
                        cli = cli.with_command(settings::default_cli_program(), args);
                    }
                    (None, None) => {}
                }
                Box::new(cli)
            }
        };

        debug!("built tester for rule `{name}`");
        Ok(RuleTester {
            state: State::Runnable(Box::new(Runnable {
                name,
                rule,
                fixtures_root: self.fixtures_root,
                scopes,
                rule_runner,
                cli_runner,
            })),
        })
    }
}
