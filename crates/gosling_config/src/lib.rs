//! Parsing and validation of `gosling.toml` lint configuration files.
//!
//! This crate reads the lint configuration and produces strongly-typed
//! [`LintOptions`] consumed by the evaluation engine. Discovery and merging
//! of configuration files across directories belongs to the caller; here we
//! only deserialize and validate one document.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_options, load_options_from_str};
pub use types::{LintOptions, RuleSettings, SeverityLabel};
