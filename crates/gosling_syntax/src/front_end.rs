//! The collaborator interface to the external parser and type checker.

use crate::ast::File;
use crate::types::TypeTable;
use gosling_source::FileId;
use std::path::Path;

/// A parse failure for one compilation unit.
///
/// The message conventionally embeds the upstream position as a
/// `path:line:col:` prefix when one is known; the engine recovers a
/// best-effort finding position from that text.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    /// The upstream parser's error text.
    pub message: String,
}

impl ParseError {
    /// Creates a parse error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A type-resolution failure.
///
/// Cloneable so the package model can cache one result and hand the same
/// error to every concurrent caller.
#[derive(Clone, Debug, thiserror::Error)]
#[error("type resolution failed: {message}")]
pub struct TypeError {
    /// Description of the failure.
    pub message: String,
}

impl TypeError {
    /// Creates a type error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The result of one type-resolution pass over a package.
///
/// Resolution is collected, not thrown: even when `errors` is non-empty the
/// `table` carries whatever was resolved, and rules consume it defensively.
#[derive(Clone, Debug, Default)]
pub struct TypeCheckOutcome {
    /// Partial symbol information for resolved expressions.
    pub table: TypeTable,
    /// The resolution failures encountered, in no particular order.
    pub errors: Vec<TypeError>,
}

/// The language version a package is compiled under (`go1.22` → 1, 22).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct LanguageVersion {
    /// The major version component.
    pub major: u16,
    /// The minor version component.
    pub minor: u16,
}

impl std::fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "go{}.{}", self.major, self.minor)
    }
}

/// The external parser/type-checker consumed by the lint engine.
///
/// Implementations must be shareable across worker threads; the engine
/// calls `parse` concurrently for independent files. `resolve_types` is
/// only ever invoked once per package by the package model's once-guard.
pub trait FrontEnd: Send + Sync {
    /// Parses one source file into a syntax tree.
    fn parse(&self, id: FileId, path: &Path, content: &str) -> Result<File, ParseError>;

    /// Resolves types across the files of one package, best-effort.
    fn resolve_types(&self, files: &[&File]) -> TypeCheckOutcome;

    /// Returns the language version in effect for the given package.
    fn language_version(&self, package_name: &str) -> LanguageVersion;
}
