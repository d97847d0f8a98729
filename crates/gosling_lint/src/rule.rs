//! The rule contract and the registry the engine evaluates.

use crate::finding::{Category, Finding};
use crate::unit::Unit;
use gosling_config::ConfigError;
use std::sync::Arc;

/// One lint check.
///
/// A single instance is shared across the whole run and applied to many
/// files concurrently, so implementations take `&self` and keep any
/// mutable state behind interior mutability. Per-run one-time state
/// (compiled patterns, parsed arguments) belongs in a `OnceLock` filled
/// during [`Rule::configure`]; package-wide state shared across the files
/// of one package belongs in that package's side table, guarded by its
/// mutex.
pub trait Rule: Send + Sync {
    /// The stable kebab-case name findings and directives refer to.
    fn name(&self) -> &'static str;

    /// The category attached to this rule's findings.
    fn category(&self) -> Category;

    /// Validates and caches the rule's configured arguments.
    ///
    /// Called exactly once per run, before the first `apply`. An error
    /// here removes the rule from the run; it is reported as a single
    /// internal finding, not a crash.
    fn configure(&self, _args: &[toml::Value]) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Evaluates the rule against one compilation unit.
    ///
    /// Invoked at most once per unit; never re-entered concurrently for
    /// the same unit, but may run concurrently for different units.
    fn apply(&self, unit: &Unit, args: &[toml::Value]) -> Vec<Finding>;
}

/// The ordered set of rules for one lint run.
///
/// Registration order is evaluation order within a file.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule. A rule whose name is already registered replaces the
    /// earlier registration, keeping its position.
    pub fn register(&mut self, rule: impl Rule + 'static) {
        let rule: Arc<dyn Rule> = Arc::new(rule);
        match self.rules.iter().position(|r| r.name() == rule.name()) {
            Some(i) => self.rules[i] = rule,
            None => self.rules.push(rule),
        }
    }

    /// Looks a rule up by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Rule>> {
        self.rules.iter().find(|r| r.name() == name)
    }

    /// The registered rules, in registration order.
    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    /// The number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
