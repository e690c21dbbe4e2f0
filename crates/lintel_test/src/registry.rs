use std::path::PathBuf;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::context::Lintable;
use crate::error::HarnessError;
use crate::resolver::RuleName;

/// One violation reported by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule: String,
    pub path: PathBuf,
    pub message: String,
}

/// The seam between the harness and a rule implementation under test.
///
/// Rule implementations live outside this crate; the harness only needs a
/// stable identifier and a way to apply the rule to one lintable.
pub trait Rule: Send + Sync {
    /// The rule's identifier, matched against suite filenames and skip
    /// lists.
    fn name(&self) -> &str;

    fn check(&self, lintable: &Lintable) -> anyhow::Result<Vec<Finding>>;
}

impl std::fmt::Debug for dyn Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name()).finish()
    }
}

pub type RuleFactory = fn() -> Box<dyn Rule>;

/// An explicit mapping from rule names to rule factories.
///
/// Rule crates build one (typically under a `LazyLock` static) and hand it
/// to tester construction; the registry's own name doubles as the cache
/// scope for the module-level memos of the rules it holds.
pub struct RuleRegistry {
    name: String,
    rules: FxHashMap<String, RuleFactory>,
}

impl RuleRegistry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a rule factory under the name its rule reports.
    ///
    /// The factory is instantiated once here to learn that name. Duplicate
    /// names are rejected; silently replacing a rule would let two suites
    /// disagree about what they tested.
    pub fn register(&mut self, factory: RuleFactory) -> Result<(), HarnessError> {
        let name = factory().name().to_string();
        if self.rules.contains_key(&name) {
            return Err(HarnessError::DuplicateRule {
                rule: name,
                registry: self.name.clone(),
            });
        }
        self.rules.insert(name, factory);
        Ok(())
    }

    /// Builder-style [`register`](Self::register) for static construction.
    ///
    /// Panics on a duplicate name; at a registry definition site that is a
    /// programming error, not a runtime condition.
    #[must_use]
    pub fn with(mut self, factory: RuleFactory) -> Self {
        if let Err(err) = self.register(factory) {
            panic!("{err}");
        }
        self
    }

    pub fn get(&self, rule: &RuleName) -> Result<RuleFactory, HarnessError> {
        self.rules
            .get(rule.as_str())
            .copied()
            .ok_or_else(|| HarnessError::RuleNotFound {
                rule: rule.to_string(),
                registry: self.name.clone(),
            })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("name", &self.name)
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}
