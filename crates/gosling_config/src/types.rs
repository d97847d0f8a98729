//! Configuration types deserialized from `gosling.toml`.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The severity label attached to findings for reporting purposes.
///
/// Purely informational: it never affects whether a finding is produced,
/// only how the caller chooses to present it or derive an exit code.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLabel {
    /// Report as a warning.
    Warning,
    /// Report as an error.
    Error,
}

impl Default for SeverityLabel {
    fn default() -> Self {
        SeverityLabel::Warning
    }
}

/// The top-level lint options parsed from `gosling.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LintOptions {
    /// Skip files carrying the machine-generated marker comment.
    #[serde(default)]
    pub ignore_generated_files: bool,
    /// Advisory confidence floor; findings below it are still emitted and
    /// filtering is the caller's choice.
    #[serde(default)]
    pub confidence: f64,
    /// Maximum number of files open for reading at once; 0 means unbounded.
    #[serde(default)]
    pub max_open_files: usize,
    /// Default severity label for rules without their own.
    #[serde(default)]
    pub severity: SeverityLabel,
    /// File-exclusion filters applied to every rule.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Per-rule settings, keyed by rule name.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleSettings>,
}

impl LintOptions {
    /// Returns the settings for a rule, or `None` if it has no section.
    pub fn rule(&self, name: &str) -> Option<&RuleSettings> {
        self.rules.get(name)
    }

    /// Returns `true` if the named rule is disabled by configuration.
    pub fn rule_disabled(&self, name: &str) -> bool {
        self.rule(name).is_some_and(|r| r.disabled)
    }

    /// Returns the argument blobs configured for a rule (empty if none).
    pub fn rule_arguments(&self, name: &str) -> &[toml::Value] {
        self.rule(name).map(|r| r.arguments.as_slice()).unwrap_or(&[])
    }

    /// Returns the severity label in effect for a rule.
    pub fn rule_severity(&self, name: &str) -> SeverityLabel {
        self.rule(name)
            .and_then(|r| r.severity)
            .unwrap_or(self.severity)
    }
}

/// Settings for one rule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleSettings {
    /// Opaque argument values handed to the rule's `configure`.
    #[serde(default)]
    pub arguments: Vec<toml::Value>,
    /// Severity label override for this rule.
    #[serde(default)]
    pub severity: Option<SeverityLabel>,
    /// File-exclusion filters for this rule only.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Disable this rule entirely.
    #[serde(default)]
    pub disabled: bool,
}
