//! Source file representation with line-start indexing for fast line/column lookup.

use crate::file_id::FileId;
use crate::location::Location;
use crate::span::Span;
use std::path::PathBuf;

/// A source file under analysis.
///
/// Stores the file's content along with precomputed line-start offsets so
/// that byte offsets can be resolved to line/column coordinates in
/// logarithmic time while findings are being filtered and reported.
pub struct SourceFile {
    /// The unique identifier for this file within the analysis run.
    pub id: FileId,
    /// The filesystem path of this file (or a synthetic name for in-memory sources).
    pub path: PathBuf,
    /// The full text content of the file.
    pub content: String,
    /// Byte offsets of each line start (the first entry is always 0).
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Creates a new `SourceFile` with precomputed line starts.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = compute_line_starts(&content);
        Self {
            id,
            path,
            content,
            line_starts,
        }
    }

    /// Converts a byte offset into 1-indexed (line, column) coordinates.
    ///
    /// Uses binary search on the precomputed line-start offsets.
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line = (line_idx as u32) + 1;
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Resolves a byte offset to a full [`Location`].
    pub fn locate(&self, byte_offset: u32) -> Location {
        let (line, column) = self.line_col(byte_offset);
        Location::new(self.path.clone(), line, column, byte_offset)
    }

    /// Returns the number of lines in the file.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Returns the text of a 1-indexed line, without its trailing newline.
    pub fn line_text(&self, line: u32) -> &str {
        let idx = (line - 1) as usize;
        let start = self.line_starts[idx] as usize;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|s| *s as usize)
            .unwrap_or(self.content.len());
        self.content[start..end].trim_end_matches('\n')
    }

    /// Returns a substring of the file content covered by the given span.
    pub fn snippet(&self, span: Span) -> &str {
        &self.content[span.start as usize..span.end as usize]
    }
}

/// Computes the byte offsets of each line start in the given content.
fn compute_line_starts(content: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push((i + 1) as u32);
        }
    }
    starts
}
