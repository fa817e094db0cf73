//! Source text bookkeeping for the module front end.
//!
//! [`SourceDb`] owns every loaded module source, [`Span`] ties a byte range to
//! its [`FileId`], and [`ResolvedSpan`] turns a span back into the 1-indexed
//! line/column pair shown in diagnostics.

#![warn(missing_docs)]

pub mod file_id;
pub mod resolved_span;
pub mod source_db;
pub mod source_file;
pub mod span;

pub use file_id::FileId;
pub use resolved_span::ResolvedSpan;
pub use source_db::SourceDb;
pub use source_file::SourceFile;
pub use span::Span;
