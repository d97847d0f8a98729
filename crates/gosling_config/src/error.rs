//! Error types for configuration loading and rule configuration.

/// Errors that can occur when loading a `gosling.toml` or configuring a rule.
///
/// A `BadRuleArgument` raised from a rule's `configure` disables that rule
/// for the run; it never aborts the run as a whole.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    Io(String),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// A rule received an argument of the wrong type or shape.
    #[error("invalid argument for rule '{rule}': {reason}")]
    BadRuleArgument {
        /// The rule that rejected its arguments.
        rule: String,
        /// What was wrong with them.
        reason: String,
    },

    /// A file-exclusion filter or allow-pattern regular expression is invalid.
    #[error("invalid pattern '{pattern}': {reason}")]
    BadPattern {
        /// The offending pattern text.
        pattern: String,
        /// The regex engine's complaint.
        reason: String,
    },

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    Validation(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}
