// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source location tracking.

use std::fmt;
use std::sync::Arc;

/// The file a piece of source text came from.
///
/// One instance is shared by every token and node parsed from that file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceFile {
    /// Name as written by the user, used in messages.
    pub file_name: String,
    pub full_path: String,
    /// Locations of the `@include` directives that pulled this file in,
    /// innermost first. Empty for a top-level file.
    pub included_from: Vec<SourceLoc>,
}

impl SourceFile {
    pub fn new(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        Self {
            full_path: file_name.clone(),
            file_name,
            included_from: Vec::new(),
        }
    }

    pub fn with_full_path(mut self, full_path: impl Into<String>) -> Self {
        self.full_path = full_path.into();
        self
    }

    pub fn included_from(mut self, loc: SourceLoc) -> Self {
        self.included_from.push(loc);
        self
    }
}

/// A line within a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLoc {
    pub line: u32,
    pub file: Arc<SourceFile>,
}

impl SourceLoc {
    pub fn new(line: u32, file: Arc<SourceFile>) -> Self {
        Self { line, file }
    }

    /// Write `file:line`, followed by one `included from` line per include
    /// hop, each prefixed with `indent`.
    pub fn write_to<W: fmt::Write>(&self, w: &mut W, indent: &str) -> fmt::Result {
        write!(w, "{}:{}", self.file.file_name, self.line)?;
        for inc in &self.file.included_from {
            write!(w, "\n{}included from ", indent)?;
            inc.write_to(w, indent)?;
        }
        Ok(())
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, "    ")
    }
}

/// Precomputed line-start offsets for O(log n) byte-offset → line:col lookup.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offset of the start of each line. line_starts[0] is always 0.
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map by scanning source for newlines. O(n).
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        LineMap { line_starts }
    }

    /// Convert byte offset to (line, col), both 1-based. O(log n).
    pub fn offset_to_line_col(&self, offset: usize) -> (u32, u32) {
        let offset = offset as u32;
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line = (line_idx + 1) as u32;
        let col = offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Get the source text of a 1-based line number, without its newline.
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)? as usize;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| (s as usize).saturating_sub(1))
            .unwrap_or(source.len());
        source.get(start..end).map(|l| l.strip_suffix('\r').unwrap_or(l))
    }

    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(line: u32, name: &str) -> SourceLoc {
        SourceLoc::new(line, Arc::new(SourceFile::new(name)))
    }

    #[test]
    fn display_plain() {
        assert_eq!(loc(12, "pipeline.mro").to_string(), "pipeline.mro:12");
    }

    #[test]
    fn display_include_chain() {
        let top = loc(3, "main.mro");
        let mid = SourceFile::new("stages.mro").included_from(top);
        let inner = SourceLoc::new(7, Arc::new(mid));

        let mut out = String::new();
        inner.write_to(&mut out, "        ").unwrap();
        assert_eq!(out, "stages.mro:7\n        included from main.mro:3");
    }

    #[test]
    fn full_path_defaults_to_name() {
        let file = SourceFile::new("a.mro");
        assert_eq!(file.full_path, "a.mro");
        let file = file.with_full_path("/work/a.mro");
        assert_eq!(file.full_path, "/work/a.mro");
        assert_eq!(file.file_name, "a.mro");
    }

    #[test]
    fn line_map_multi_line() {
        let src = "abc\ndef\r\nghi";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_count(), 3);
        assert_eq!(lm.offset_to_line_col(0), (1, 1));
        assert_eq!(lm.offset_to_line_col(4), (2, 1));
        assert_eq!(lm.offset_to_line_col(10), (3, 2));
        assert_eq!(lm.line_text(src, 1), Some("abc"));
        assert_eq!(lm.line_text(src, 2), Some("def"));
        assert_eq!(lm.line_text(src, 3), Some("ghi"));
        assert_eq!(lm.line_text(src, 4), None);
    }

    #[test]
    fn line_map_trailing_newline() {
        let src = "abc\n";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_count(), 2);
        assert_eq!(lm.line_text(src, 2), Some(""));
    }
}
