// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lexer errors and the source-pointing syntax error message.

use std::fmt;

use mro_ast::SourceLoc;
use thiserror::Error;

/// Internal scanner faults. These are bugs, never a problem with the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("scanner made no progress at byte {offset} ({loc})")]
    EmptyMatch { offset: usize, loc: SourceLoc },
}

/// A rejected token, with everything needed to point at it.
///
/// `Display` renders the full message:
///
/// ```text
/// MRO ParseError: unexpected token ')' after ','
///     call FOO(x = 1, )
///                     ^
///     at pipeline.mro:12
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Text of the offending token (the last token, at end of input).
    pub token: String,
    /// Text of the token before it, if any.
    pub previous: Option<String>,
    pub loc: SourceLoc,
    /// Byte offset where the offending token starts.
    pub offset: usize,
    /// The parser ran out of tokens.
    pub at_end: bool,
    /// The full line holding the offending token. `None` at end of input.
    pub source_line: Option<String>,
    /// Column of the token within `source_line`, in characters, 0-based.
    pub column: usize,
    /// What the parser was looking for.
    pub expected: Option<String>,
    pub hint: Option<String>,
}

impl SyntaxError {
    /// Build the error for a token spanning `start..start + token.len()` of
    /// `src`.
    pub fn new(
        src: &str,
        start: usize,
        token: &str,
        previous: &str,
        loc: SourceLoc,
        at_end: bool,
    ) -> Self {
        let (source_line, column) = if at_end || token.is_empty() {
            (None, 0)
        } else {
            let (line, column) = line_at(src, start);
            (Some(line.to_string()), column)
        };
        Self {
            token: token.to_string(),
            previous: (!previous.is_empty()).then(|| previous.to_string()),
            loc,
            offset: start,
            at_end,
            source_line,
            column,
            expected: None,
            hint: None,
        }
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// One-line summary without location or source context.
    pub fn summary(&self) -> String {
        if self.token.is_empty() {
            return "unexpected end of input".to_string();
        }
        match &self.previous {
            Some(prev) => format!("unexpected token '{}' after '{}'", self.token, prev),
            None => format!("unexpected token '{}'", self.token),
        }
    }

    /// Whitespace that lines a caret up under `column`, keeping tabs.
    fn caret_padding(&self, line: &str) -> String {
        line.chars()
            .take(self.column)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MRO ParseError: {}", self.summary())?;
        match &self.source_line {
            Some(line) => {
                writeln!(f)?;
                writeln!(f, "{}", line)?;
                writeln!(f, "{}^", self.caret_padding(line))?;
                write!(f, "    at ")?;
            }
            None => write!(f, " at ")?,
        }
        self.loc.write_to(f, "        ")
    }
}

impl std::error::Error for SyntaxError {}

/// The line of `src` containing byte `pos`, without its terminator, and the
/// character column of `pos` within it.
fn line_at(src: &str, pos: usize) -> (&str, usize) {
    let pos = pos.min(src.len());
    let start = src[..pos].rfind('\n').map_or(0, |i| i + 1);
    let end = src[pos..].find('\n').map_or(src.len(), |i| pos + i);
    let line = &src[start..end];
    let column = src[start..pos].chars().count();
    (line.strip_suffix('\r').unwrap_or(line), column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mro_ast::SourceFile;
    use std::sync::Arc;

    fn loc(line: u32) -> SourceLoc {
        SourceLoc::new(line, Arc::new(SourceFile::new("test.mro")))
    }

    #[test]
    fn line_at_middle() {
        let src = "first\nsecond line\nthird";
        assert_eq!(line_at(src, 13), ("second line", 7));
        assert_eq!(line_at(src, 0), ("first", 0));
        assert_eq!(line_at(src, 18), ("third", 0));
    }

    #[test]
    fn renders_caret_under_token() {
        let src = "stage A(\n    in int x y,\n)";
        let start = src.find('y').unwrap();
        let err = SyntaxError::new(src, start, "y", "x", loc(2), false);
        assert_eq!(
            err.to_string(),
            "MRO ParseError: unexpected token 'y' after 'x'\n    in int x y,\n             ^\n    at test.mro:2"
        );
        assert_eq!(err.column, 13);
    }

    #[test]
    fn caret_keeps_tabs() {
        let src = "\tcall\tX";
        let err = SyntaxError::new(src, 6, "X", "call", loc(1), false);
        assert!(err.to_string().contains("\n\tcall\tX\n\t    \t^\n"));
    }

    #[test]
    fn no_previous_token() {
        let src = "}";
        let err = SyntaxError::new(src, 0, "}", "", loc(1), false);
        assert_eq!(
            err.to_string(),
            "MRO ParseError: unexpected token '}'\n}\n^\n    at test.mro:1"
        );
    }

    #[test]
    fn end_of_input_has_no_source_block() {
        let src = "stage A(";
        let err = SyntaxError::new(src, 7, "(", "A", loc(1), true);
        assert_eq!(
            err.to_string(),
            "MRO ParseError: unexpected token '(' after 'A' at test.mro:1"
        );
        assert!(err.source_line.is_none());
    }

    #[test]
    fn include_chain_is_indented() {
        let top = loc(4);
        let file = SourceFile::new("inc.mro").included_from(top);
        let err = SyntaxError::new("x", 0, "x", "", SourceLoc::new(1, Arc::new(file)), true);
        assert_eq!(
            err.to_string(),
            "MRO ParseError: unexpected token 'x' at inc.mro:1\n        included from test.mro:4"
        );
    }

    #[test]
    fn empty_input() {
        let err = SyntaxError::new("", 0, "", "", loc(1), true);
        assert_eq!(err.to_string(), "MRO ParseError: unexpected end of input at test.mro:1");
    }
}
