//! Best-effort symbol information produced by type resolution.

use gosling_source::Span;
use std::collections::HashMap;

/// Resolved type information for a single expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeInfo {
    /// The resolved type name (`"int"`, `"*net/http.Server"`, ...).
    pub type_name: String,
}

/// A table mapping expression spans to resolved type information.
///
/// Resolution is best-effort: expressions the checker could not resolve are
/// simply absent, and rules must treat a missing entry as "unknown", never
/// as an error.
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    entries: HashMap<Span, TypeInfo>,
}

impl TypeTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the resolved type of the expression at `span`.
    pub fn insert(&mut self, span: Span, info: TypeInfo) {
        self.entries.insert(span, info);
    }

    /// Looks up the resolved type of the expression at `span`, if known.
    pub fn lookup(&self, span: Span) -> Option<&TypeInfo> {
        self.entries.get(&span)
    }

    /// Returns the number of resolved entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
