use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// One target handed to a rule. The harness only carries the path; what the
/// rule reads from it is its own business.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Lintable {
    path: PathBuf,
}

impl Lintable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The tunable inputs to a single lint invocation: invocation configuration,
/// tool-facing environment variables, and the ambient process environment.
///
/// Construct-once, read-only after creation; no identity beyond structural
/// equality.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubContext {
    pub conf: BTreeMap<String, serde_json::Value>,
    pub env: BTreeMap<String, String>,
    pub os_env: BTreeMap<String, String>,
}

/// A fully-formed invocation request: [`SubContext`] inputs plus the workdir
/// and the lintables enumerated under it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Context {
    pub conf: BTreeMap<String, serde_json::Value>,
    pub env: BTreeMap<String, String>,
    pub os_env: BTreeMap<String, String>,
    pub workdir: PathBuf,
    pub lintables: Vec<Lintable>,
}

impl Context {
    pub fn new(sub: SubContext, workdir: PathBuf, lintables: Vec<Lintable>) -> Self {
        Self {
            conf: sub.conf,
            env: sub.env,
            os_env: sub.os_env,
            workdir,
            lintables,
        }
    }
}

/// An invocation's opaque outcome paired with the [`Context`] that produced
/// it, for traceability. By convention the result is a JSON findings array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    pub result: serde_json::Value,
    pub context: Context,
}

impl RunResult {
    pub fn new(result: serde_json::Value, context: Context) -> Self {
        Self { result, context }
    }

    /// A run is clean when it produced no findings: a null result or an
    /// empty findings array.
    pub fn is_clean(&self) -> bool {
        match &self.result {
            serde_json::Value::Null => true,
            serde_json::Value::Array(findings) => findings.is_empty(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Context, RunResult, SubContext};

    #[test]
    fn clean_is_null_or_empty_array() {
        let context = Context::new(SubContext::default(), "wd".into(), Vec::new());
        assert!(RunResult::new(json!(null), context.clone()).is_clean());
        assert!(RunResult::new(json!([]), context.clone()).is_clean());
        assert!(!RunResult::new(json!([{"rule": "x"}]), context.clone()).is_clean());
        assert!(!RunResult::new(json!({"findings": []}), context).is_clean());
    }

    #[test]
    fn contexts_compare_structurally() {
        let make = || Context::new(SubContext::default(), "wd".into(), Vec::new());
        assert_eq!(make(), make());
    }
}
