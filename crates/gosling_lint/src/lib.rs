//! The gosling rule-evaluation engine.
//!
//! This crate implements the core of the linter: the inline-directive
//! parser that partitions a file into suppression regions, the compilation
//! unit and package models with their once-guarded shared facts, file
//! filters, the concurrent evaluation engine, and the built-in rules.
//!
//! # Architecture
//!
//! The engine fans out one worker per package and, within each package,
//! lints files concurrently. Rules run sequentially per file because a rule
//! instance may hold mutable state and is shared across the whole run.
//! Findings from every (package, file, rule) evaluation converge on a
//! single [`FindingStream`] that closes only after all work has finished.

#![warn(missing_docs)]

mod directive;
mod engine;
mod filter;
mod finding;
mod gate;
mod package;
mod rule;
mod rules;
mod stream;
#[cfg(test)]
mod testutil;
mod unit;

pub use directive::{parse_directives, Interval, SuppressionMap, DIRECTIVE_MARKER};
pub use engine::{is_generated, FsLoader, Linter, PackageInput, SourceLoader, UnitInput};
pub use filter::FileFilter;
pub use finding::{Category, Finding};
pub use gate::ReadGate;
pub use package::Package;
pub use rule::{Rule, RuleRegistry};
pub use rules::{
    register_builtin_rules, DuplicatedBranches, PackageCollisions, UnusedParam,
};
pub use stream::FindingStream;
pub use unit::Unit;
