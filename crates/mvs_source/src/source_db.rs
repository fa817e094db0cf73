//! Owner of every module source loaded in a session.

use crate::file_id::FileId;
use crate::resolved_span::ResolvedSpan;
use crate::source_file::SourceFile;
use crate::span::Span;
use std::io;
use std::path::{Path, PathBuf};

/// Holds source buffers and resolves spans against them.
#[derive(Default)]
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a file from disk and registers it.
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, content))
    }

    /// Registers an in-memory buffer under `name`.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, name.into(), content));
        id
    }

    /// Looks up a file, returning `None` for unknown or dummy ids.
    pub fn get_file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.as_raw() as usize)
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolves `span` to line/column coordinates.
    pub fn resolve_span(&self, span: Span) -> Option<ResolvedSpan> {
        let file = self.get_file(span.file)?;
        let (start_line, start_col) = file.line_col(span.start);
        let last = span.end.saturating_sub(1).max(span.start);
        let (end_line, end_col) = file.line_col(last);
        Some(ResolvedSpan {
            file_path: file.path.clone(),
            start_line,
            start_col,
            end_line,
            end_col,
        })
    }

    /// Source text covered by `span`.
    pub fn snippet(&self, span: Span) -> &str {
        self.get_file(span.file)
            .map(|f| f.snippet(span.start, span.end))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn add_and_get() {
        let mut db = SourceDb::new();
        let id = db.add_source("top.v", "module top(); endmodule".into());
        assert_eq!(db.len(), 1);
        assert_eq!(
            db.get_file(id).map(|f| f.content.as_str()),
            Some("module top(); endmodule")
        );
        assert!(db.get_file(FileId::DUMMY).is_none());
    }

    #[test]
    fn resolve() {
        let mut db = SourceDb::new();
        let id = db.add_source("top.v", "wire a;\nassign a = 1;".into());
        let resolved = db.resolve_span(Span::new(id, 15, 16)).unwrap();
        assert_eq!(resolved.file_path, PathBuf::from("top.v"));
        assert_eq!((resolved.start_line, resolved.start_col), (2, 8));
        assert_eq!((resolved.end_line, resolved.end_col), (2, 8));
        assert!(db.resolve_span(Span::DUMMY).is_none());
    }

    #[test]
    fn snippet() {
        let mut db = SourceDb::new();
        let id = db.add_source("top.v", "wire abc;".into());
        assert_eq!(db.snippet(Span::new(id, 5, 8)), "abc");
        assert_eq!(db.snippet(Span::DUMMY), "");
    }

    #[test]
    fn load_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "module m(); endmodule").unwrap();
        let mut db = SourceDb::new();
        let id = db.load_file(tmp.path()).unwrap();
        assert_eq!(db.get_file(id).unwrap().content, "module m(); endmodule");
    }

    #[test]
    fn load_missing_file_errors() {
        let mut db = SourceDb::new();
        assert!(db.load_file(Path::new("/nonexistent/mvs/top.v")).is_err());
        assert!(db.is_empty());
    }
}
