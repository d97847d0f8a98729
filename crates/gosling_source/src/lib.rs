//! Source text management, span tracking, and position resolution.
//!
//! This crate provides the [`SourceFile`] wrapper over raw source text,
//! [`FileId`] and [`Span`] types for tracking byte ranges, and [`Location`]
//! for converting byte offsets into the human-readable (path, line, column,
//! offset) tuples carried by findings.

#![warn(missing_docs)]

pub mod file_id;
pub mod location;
pub mod source_file;
pub mod span;

pub use file_id::FileId;
pub use location::Location;
pub use source_file::SourceFile;
pub use span::Span;
