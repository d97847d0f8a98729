//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::LintOptions;
use std::path::Path;

/// Loads and validates a `gosling.toml` from the given path.
pub fn load_options(path: &Path) -> Result<LintOptions, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_options_from_str(&content)
}

/// Parses and validates lint options from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_options_from_str(content: &str) -> Result<LintOptions, ConfigError> {
    let options: LintOptions =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_options(&options)?;
    Ok(options)
}

/// Validates value ranges the type system cannot express.
fn validate_options(options: &LintOptions) -> Result<(), ConfigError> {
    if options.confidence < 0.0 || options.confidence > 1.0 {
        return Err(ConfigError::Validation(format!(
            "confidence must be within [0, 1], got {}",
            options.confidence
        )));
    }
    Ok(())
}
