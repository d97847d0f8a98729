//! Shared fixtures for in-crate tests.

use gosling_source::FileId;
use gosling_syntax::{File, FrontEnd, LanguageVersion, ParseError, TypeCheckOutcome};
use std::path::Path;
use std::sync::Arc;

/// A front end that parses nothing and resolves no types, for tests that
/// build their ASTs by hand.
pub(crate) struct InertFrontEnd;

impl FrontEnd for InertFrontEnd {
    fn parse(&self, _id: FileId, _path: &Path, _content: &str) -> Result<File, ParseError> {
        Err(ParseError::new("parsing not supported"))
    }

    fn resolve_types(&self, _files: &[&File]) -> TypeCheckOutcome {
        TypeCheckOutcome::default()
    }

    fn language_version(&self, _package_name: &str) -> LanguageVersion {
        LanguageVersion { major: 1, minor: 22 }
    }
}

pub(crate) fn front_end() -> Arc<dyn FrontEnd> {
    Arc::new(InertFrontEnd)
}
