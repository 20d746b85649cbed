// SPDX-License-Identifier: (MIT OR Apache-2.0)

use crate::SourceLoc;

/// A comment collected by the lexer, with its marker stripped and its
/// surrounding whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommentBlock {
    pub loc: SourceLoc,
    pub text: String,
}

impl CommentBlock {
    pub fn new(loc: SourceLoc, text: impl Into<String>) -> Self {
        Self { loc, text: text.into() }
    }

    /// Build a block from the raw scanned lexeme (`# text` or `// text`).
    pub fn from_lexeme(loc: SourceLoc, lexeme: &str) -> Self {
        let trimmed = lexeme.trim();
        let body = trimmed
            .strip_prefix("//")
            .or_else(|| trimmed.strip_prefix('#'))
            .unwrap_or(trimmed);
        Self::new(loc, body.trim())
    }

    pub fn line(&self) -> u32 {
        self.loc.line
    }
}
