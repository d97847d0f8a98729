//! The per-file compilation unit model.

use crate::directive::{parse_directives, SuppressionMap};
use crate::package::Package;
use gosling_source::{Location, SourceFile, Span};
use gosling_syntax::{CommentGroup, File};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock, Weak};

/// One compilation unit: a source file plus its parsed tree.
///
/// The unit owns its source text and syntax tree and holds a weak
/// back-reference to the [`Package`] that owns it (the package owns the
/// unit list, never the other way around). The node→comment association
/// and the per-rule suppression intervals are memoized, computed at most
/// once even when several rules race on the first access.
pub struct Unit {
    source: SourceFile,
    /// The parsed syntax tree.
    pub ast: File,
    pkg: Weak<Package>,
    suppressions: OnceLock<SuppressionMap>,
    comment_map: OnceLock<HashMap<Span, Vec<CommentGroup>>>,
}

impl Unit {
    /// Creates a unit belonging to `pkg`. The caller is responsible for
    /// registering it with the package afterwards.
    pub fn new(source: SourceFile, ast: File, pkg: &Arc<Package>) -> Arc<Self> {
        Arc::new(Self {
            source,
            ast,
            pkg: Arc::downgrade(pkg),
            suppressions: OnceLock::new(),
            comment_map: OnceLock::new(),
        })
    }

    /// The unit's file path.
    pub fn path(&self) -> &Path {
        &self.source.path
    }

    /// The raw source text.
    pub fn content(&self) -> &str {
        &self.source.content
    }

    /// The underlying source file with its line index.
    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    /// Resolves a byte offset to a full location.
    pub fn locate(&self, offset: u32) -> Location {
        self.source.locate(offset)
    }

    /// Resolves a span to its start and end locations.
    pub fn span_locations(&self, span: Span) -> (Location, Location) {
        (self.locate(span.start), self.locate(span.end))
    }

    /// Returns `true` if this unit follows the test-file naming convention.
    pub fn is_test(&self) -> bool {
        self.path()
            .to_string_lossy()
            .ends_with("_test.go")
    }

    /// The owning package, if it is still alive.
    pub fn package(&self) -> Option<Arc<Package>> {
        self.pkg.upgrade()
    }

    /// The unit's suppression intervals, parsed from directive comments.
    /// Computed on first use and cached.
    pub fn suppressions(&self) -> &SuppressionMap {
        self.suppressions
            .get_or_init(|| parse_directives(&self.ast.comments, &self.source))
    }

    /// A mapping from declaration spans to the comment groups attached
    /// directly above them. Computed on first use and cached.
    pub fn comment_map(&self) -> &HashMap<Span, Vec<CommentGroup>> {
        self.comment_map.get_or_init(|| {
            let mut map: HashMap<Span, Vec<CommentGroup>> = HashMap::new();
            for decl in &self.ast.decls {
                let span = decl.span();
                let (decl_line, _) = self.source.line_col(span.start);
                for group in &self.ast.comments {
                    let (group_end_line, _) = self.source.line_col(group.span.end.saturating_sub(1));
                    if group_end_line + 1 == decl_line {
                        map.entry(span).or_default().push(group.clone());
                    }
                }
            }
            map
        })
    }
}
