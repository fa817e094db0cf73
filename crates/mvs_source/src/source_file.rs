//! One loaded module source plus its line index.

use crate::file_id::FileId;
use std::path::PathBuf;

/// A module source held by the [`SourceDb`](crate::SourceDb).
pub struct SourceFile {
    /// Handle of this file.
    pub id: FileId,
    /// Path on disk, or the name given to an in-memory buffer.
    pub path: PathBuf,
    /// Full text.
    pub content: String,
    // Byte offset where each line begins; always starts with 0.
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Wraps `content` and indexes its line starts.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                content
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| (i + 1) as u32),
            )
            .collect();
        Self {
            id,
            path,
            content,
            line_starts,
        }
    }

    /// Maps a byte offset to a 1-indexed `(line, col)` pair.
    ///
    /// Columns count bytes, matching the lexer.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts.get(idx).copied().unwrap_or(0);
        (idx as u32 + 1, offset.saturating_sub(line_start) + 1)
    }

    /// Number of lines (an empty file has one).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of the 1-indexed `line` without its line terminator.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)? as usize;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&next| next as usize)
            .unwrap_or(self.content.len());
        self.content
            .get(start..end)
            .map(|text| text.trim_end_matches(['\n', '\r']))
    }

    /// Text between two byte offsets, or `""` if the range is not valid.
    pub fn snippet(&self, start: u32, end: u32) -> &str {
        self.content
            .get(start as usize..end as usize)
            .unwrap_or_default()
    }
}
