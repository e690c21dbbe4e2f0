//! The two execution adapters behind [`RuleTester::run`].
//!
//! Both are parameterized identically with the rule, the fixtures root, and
//! the skip configuration; they differ only in how the lint actually
//! happens: [`RuleRunner`] applies the rule in-process, [`CliRunner`] spawns
//! the lint command line. Each produces the same [`RunResult`] record so
//! suites can flip between them without changing assertions.
//!
//! [`RuleTester::run`]: crate::RuleTester::run

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use log::debug;
use serde_json::json;
use walkdir::WalkDir;

use crate::context::{Context, Lintable, RunResult, SubContext};
use crate::error::HarnessError;
use crate::flags::Isolation;
use crate::registry::{Finding, Rule};
use crate::settings::{self, RunnerOptions};

/// Environment variables through which invocation configuration reaches the
/// lint tool.
pub(crate) const FIXTURES_ROOT_ENV: &str = "LINTEL_FIXTURES_ROOT";
pub(crate) const SKIP_LIST_ENV: &str = "LINTEL_SKIP_LIST";
pub(crate) const DEFAULT_RULES_ENV: &str = "LINTEL_DEFAULT_RULES";

/// One strategy for executing a lint run over a workdir.
///
/// The facade holds two boxed runners; engine-backed implementations or test
/// doubles can be injected through the tester builder.
pub trait Runner: Send + Sync {
    fn run(&self, workdir: &Path, isolation: Isolation) -> Result<RunResult, HarnessError>;
}

/// Regular files under `workdir`, recursive, sorted by name.
fn collect_lintables(workdir: &Path) -> Result<Vec<Lintable>, HarnessError> {
    let mut lintables = Vec::new();
    for entry in WalkDir::new(workdir).sort_by_file_name() {
        let entry = entry.map_err(|err| HarnessError::FixtureIo {
            path: workdir.to_path_buf(),
            source: err.into(),
        })?;
        if entry.file_type().is_file() {
            lintables.push(Lintable::new(entry.into_path()));
        }
    }
    Ok(lintables)
}

fn invocation_conf(
    rule: &str,
    fixtures_root: &Path,
    options: &RunnerOptions,
) -> BTreeMap<String, serde_json::Value> {
    BTreeMap::from([
        (String::from("rule"), json!(rule)),
        (String::from("fixtures_root"), json!(fixtures_root)),
        (String::from("skip_list"), json!(options.skip_list)),
        (String::from("enable_default"), json!(options.enable_default)),
    ])
}

fn tool_env(fixtures_root: &Path, options: &RunnerOptions) -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            String::from(FIXTURES_ROOT_ENV),
            fixtures_root.display().to_string(),
        ),
        (String::from(SKIP_LIST_ENV), options.skip_list.join(",")),
        (
            String::from(DEFAULT_RULES_ENV),
            String::from(if options.enable_default { "1" } else { "0" }),
        ),
    ])
}

/// Isolation is visible in the result record: ambient runs snapshot the
/// process environment into `os_env`, isolated runs leave it empty.
fn os_env_snapshot(isolation: Isolation) -> BTreeMap<String, String> {
    if isolation.is_isolated() {
        BTreeMap::new()
    } else {
        std::env::vars().collect()
    }
}

/// The direct, library-style adapter: applies [`Rule::check`] to every
/// lintable under the workdir and packages the surviving findings as a JSON
/// array.
pub struct RuleRunner {
    rule: Arc<dyn Rule>,
    fixtures_root: PathBuf,
    options: RunnerOptions,
}

impl RuleRunner {
    pub fn new(rule: Arc<dyn Rule>, fixtures_root: PathBuf, options: RunnerOptions) -> Self {
        Self {
            rule,
            fixtures_root,
            options,
        }
    }
}

impl Runner for RuleRunner {
    fn run(&self, workdir: &Path, isolation: Isolation) -> Result<RunResult, HarnessError> {
        let lintables = collect_lintables(workdir)?;
        debug!(
            "rule runner: applying `{}` to {} lintables under {}",
            self.rule.name(),
            lintables.len(),
            workdir.display()
        );

        let mut findings: Vec<Finding> = Vec::new();
        for lintable in &lintables {
            let checked =
                self.rule
                    .check(lintable)
                    .map_err(|source| HarnessError::RuleCheck {
                        rule: self.rule.name().to_string(),
                        path: lintable.path().to_path_buf(),
                        source,
                    })?;
            findings.extend(
                checked
                    .into_iter()
                    .filter(|finding| !self.options.skip_list.contains(&finding.rule)),
            );
        }

        let sub = SubContext {
            conf: invocation_conf(self.rule.name(), &self.fixtures_root, &self.options),
            env: tool_env(&self.fixtures_root, &self.options),
            os_env: os_env_snapshot(isolation),
        };
        let result = serde_json::to_value(&findings).expect("findings serialize to JSON");
        Ok(RunResult::new(
            result,
            Context::new(sub, workdir.to_path_buf(), lintables),
        ))
    }
}

/// The command-line adapter: spawns the configured lint command with the
/// workdir as its final argument and parses stdout as a JSON array.
///
/// A nonzero exit status is not an error; lint tools conventionally exit
/// nonzero when findings exist. Spawn failures and unparseable output are.
pub struct CliRunner {
    rule: Arc<dyn Rule>,
    fixtures_root: PathBuf,
    options: RunnerOptions,
    program: String,
    args: Vec<String>,
}

impl CliRunner {
    pub fn new(rule: Arc<dyn Rule>, fixtures_root: PathBuf, options: RunnerOptions) -> Self {
        Self {
            rule,
            fixtures_root,
            options,
            program: settings::default_cli_program().to_string(),
            args: settings::default_cli_args()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Replace the spawned command; the harness's own tests point this at a
    /// stub binary.
    #[must_use]
    pub fn with_command(
        mut self,
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.program = program.into();
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    fn rendered_command(&self, workdir: &Path) -> String {
        let mut rendered = self.program.clone();
        for arg in &self.args {
            rendered.push(' ');
            rendered.push_str(arg);
        }
        rendered.push(' ');
        rendered.push_str(&workdir.display().to_string());
        rendered
    }
}

impl Runner for CliRunner {
    fn run(&self, workdir: &Path, isolation: Isolation) -> Result<RunResult, HarnessError> {
        let env = tool_env(&self.fixtures_root, &self.options);

        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(workdir);
        if isolation.is_isolated() {
            command.env_clear();
        }
        command.envs(&env);

        let rendered = self.rendered_command(workdir);
        debug!("cli runner: spawning `{rendered}` (isolated: {})", isolation.is_isolated());
        let output = command.output().map_err(|source| HarnessError::CliSpawn {
            command: rendered.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let result: serde_json::Value =
            serde_json::from_str(stdout.trim()).map_err(|source| HarnessError::CliOutput {
                command: rendered,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                source,
            })?;

        let sub = SubContext {
            conf: invocation_conf(self.rule.name(), &self.fixtures_root, &self.options),
            env,
            os_env: os_env_snapshot(isolation),
        };
        let lintables = collect_lintables(workdir)?;
        Ok(RunResult::new(
            result,
            Context::new(sub, workdir.to_path_buf(), lintables),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use anyhow::Result;
    use serde_json::json;
    use tempfile::TempDir;

    use super::{collect_lintables, RuleRunner, Runner};
    use crate::context::Lintable;
    use crate::flags::Isolation;
    use crate::registry::{Finding, Rule};
    use crate::settings::RunnerOptions;

    /// Flags every line containing `needle`, attributed to `name`.
    struct NeedleRule {
        name: &'static str,
        needle: &'static str,
    }

    impl Rule for NeedleRule {
        fn name(&self) -> &str {
            self.name
        }

        fn check(&self, lintable: &Lintable) -> anyhow::Result<Vec<Finding>> {
            let contents = fs::read_to_string(lintable.path())?;
            Ok(contents
                .lines()
                .filter(|line| line.contains(self.needle))
                .map(|line| Finding {
                    rule: self.name.to_string(),
                    path: lintable.path().to_path_buf(),
                    message: format!("banned: {line}"),
                })
                .collect())
        }
    }

    #[test]
    fn lintables_are_files_only_sorted() -> Result<()> {
        let workdir = TempDir::new()?;
        fs::create_dir(workdir.path().join("sub"))?;
        fs::write(workdir.path().join("sub/inner.txt"), "")?;
        fs::write(workdir.path().join("b.txt"), "")?;
        fs::write(workdir.path().join("a.txt"), "")?;

        let lintables = collect_lintables(workdir.path())?;
        let names: Vec<_> = lintables
            .iter()
            .map(|lintable| {
                lintable
                    .path()
                    .strip_prefix(workdir.path())
                    .unwrap()
                    .to_path_buf()
            })
            .collect();
        assert_eq!(
            names,
            vec![
                std::path::PathBuf::from("a.txt"),
                "b.txt".into(),
                "sub/inner.txt".into(),
            ]
        );
        Ok(())
    }

    #[test]
    fn direct_run_filters_skip_list() -> Result<()> {
        let workdir = TempDir::new()?;
        fs::write(workdir.path().join("play.txt"), "keep\nbad line\n")?;

        let rule = Arc::new(NeedleRule {
            name: "bad_line",
            needle: "bad",
        });

        let kept = RuleRunner::new(rule.clone(), "res".into(), RunnerOptions::default())
            .run(workdir.path(), Isolation::Isolated)?;
        assert_eq!(kept.result.as_array().map(Vec::len), Some(1));
        assert!(kept.context.os_env.is_empty());

        let skipped = RuleRunner::new(
            rule,
            "res".into(),
            RunnerOptions {
                skip_list: vec![String::from("bad_line")],
                enable_default: false,
            },
        )
        .run(workdir.path(), Isolation::Isolated)?;
        assert!(skipped.is_clean());
        assert_eq!(
            skipped.context.conf.get("skip_list"),
            Some(&json!(["bad_line"]))
        );
        Ok(())
    }

    #[test]
    fn failing_rule_surfaces_as_rule_check_error() -> Result<()> {
        struct BrokenRule;

        impl Rule for BrokenRule {
            fn name(&self) -> &str {
                "broken"
            }

            fn check(&self, _lintable: &Lintable) -> anyhow::Result<Vec<Finding>> {
                anyhow::bail!("cannot parse")
            }
        }

        let workdir = TempDir::new()?;
        fs::write(workdir.path().join("play.txt"), "")?;

        let err = RuleRunner::new(Arc::new(BrokenRule), "res".into(), RunnerOptions::default())
            .run(workdir.path(), Isolation::Isolated)
            .unwrap_err();
        assert!(
            matches!(&err, crate::error::HarnessError::RuleCheck { rule, .. } if rule == "broken")
        );
        Ok(())
    }

    #[test]
    fn ambient_run_snapshots_process_environment() -> Result<()> {
        let workdir = TempDir::new()?;
        fs::write(workdir.path().join("play.txt"), "fine\n")?;

        let rule = Arc::new(NeedleRule {
            name: "bad_line",
            needle: "bad",
        });
        let result = RuleRunner::new(rule, "res".into(), RunnerOptions::default())
            .run(workdir.path(), Isolation::Ambient)?;
        // PATH is a safe proxy for "the ambient environment was captured".
        assert!(result.context.os_env.contains_key("PATH"));
        Ok(())
    }
}
