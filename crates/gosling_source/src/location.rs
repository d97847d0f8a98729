//! Resolved source positions carried by findings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A single resolved source position: file path, 1-indexed line and column,
/// and the raw byte offset.
///
/// Findings carry a start and an end `Location` so that callers can sort
/// output deterministically regardless of the order findings arrived in.
/// The derived `Ord` sorts by path, then line, then column, then offset.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Location {
    /// The filesystem path of the source file.
    pub path: PathBuf,
    /// The line number (1-indexed).
    pub line: u32,
    /// The column number (1-indexed).
    pub column: u32,
    /// The byte offset within the file.
    pub offset: u32,
}

impl Location {
    /// Creates a location with the given coordinates.
    pub fn new(path: impl Into<PathBuf>, line: u32, column: u32, offset: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path.display(), self.line, self.column)
    }
}
