//! The finding type: one reported issue, immutable once created.

use gosling_source::Location;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Coarse classification of a finding.
///
/// Informational only: suppression works on rule names, never categories.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Stylistic conventions.
    Style,
    /// Suspicious or broken program logic.
    Logic,
    /// Naming conventions.
    Naming,
    /// Error-handling issues.
    Errors,
    /// Complexity and maintainability.
    Complexity,
    /// A file that could not be analyzed at all.
    Validity,
    /// A failure inside the linter itself (misconfigured or panicking rule).
    Internal,
}

impl Category {
    /// Returns the lowercase display name of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Style => "style",
            Category::Logic => "logic",
            Category::Naming => "naming",
            Category::Errors => "errors",
            Category::Complexity => "complexity",
            Category::Validity => "validity",
            Category::Internal => "internal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One issue reported by a rule.
///
/// Created during a rule's `apply`, never mutated afterwards. Confidence is
/// advisory and never filters output inside the engine; the optional
/// replacement is a suggested substitution for the offending line and is
/// never applied automatically.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Finding {
    /// Human-readable description of the issue.
    pub message: String,
    /// Stable name of the rule that produced this finding.
    pub rule_name: String,
    /// Coarse classification tag.
    pub category: Category,
    /// Where the issue starts.
    pub start: Location,
    /// Where the issue ends.
    pub end: Location,
    /// How certain the rule is, in (0, 1].
    pub confidence: f64,
    /// A suggested literal replacement for the offending line, if any.
    pub replacement: Option<String>,
}

impl Finding {
    /// Creates a finding at full confidence.
    pub fn new(
        rule_name: impl Into<String>,
        category: Category,
        message: impl Into<String>,
        start: Location,
        end: Location,
    ) -> Self {
        Self {
            message: message.into(),
            rule_name: rule_name.into(),
            category,
            start,
            end,
            confidence: 1.0,
            replacement: None,
        }
    }

    /// Sets the confidence value.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Attaches a replacement hint.
    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = Some(replacement.into());
        self
    }

    /// The key callers sort by for deterministic output:
    /// position first, then rule name, then message.
    pub fn sort_key(&self) -> (&Location, &Location, &str, &str) {
        (&self.start, &self.end, &self.rule_name, &self.message)
    }
}

impl PartialEq for Finding {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
            && self.rule_name == other.rule_name
            && self.category == other.category
            && self.start == other.start
            && self.end == other.end
            && self.confidence.to_bits() == other.confidence.to_bits()
            && self.replacement == other.replacement
    }
}

impl Eq for Finding {}

impl PartialOrd for Finding {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Finding {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: [{}] {} ({})",
            self.start, self.rule_name, self.message, self.category
        )
    }
}
