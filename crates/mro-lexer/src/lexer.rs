// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Pull-based lexer driver.
//!
//! The driver owns the scan position and the line counter. Whitespace is
//! dropped, comments are diverted into a side list, and every significant
//! token comes back with its location.

use std::sync::Arc;

use mro_ast::token::TokenKind;
use mro_ast::{CommentBlock, SourceFile, SourceLoc};

use crate::error::{LexError, SyntaxError};
use crate::intern::StringIntern;
use crate::scanner;

/// A significant token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// The lexeme, borrowed from the source buffer.
    pub text: &'src str,
    pub loc: SourceLoc,
    /// Byte offset of the lexeme in the source buffer.
    pub offset: usize,
    /// Interned text, for identifiers and keywords.
    pub symbol: Option<Arc<str>>,
}

/// Lexer state for one source unit.
pub struct Lexer<'src, 'i> {
    src: &'src str,
    pos: usize,
    line: u32,
    /// Text of the significant token before `token`.
    previous: &'src str,
    /// Text of the most recently returned significant token.
    token: &'src str,
    token_start: usize,
    at_end: bool,
    file: Arc<SourceFile>,
    intern: &'i mut StringIntern,
    comments: Vec<CommentBlock>,
}

impl<'src, 'i> Lexer<'src, 'i> {
    pub fn new(src: &'src str, file: Arc<SourceFile>, intern: &'i mut StringIntern) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            previous: "",
            token: "",
            token_start: 0,
            at_end: false,
            file,
            intern,
            comments: Vec::new(),
        }
    }

    /// Produce the next significant token, or `None` at end of input.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<Token<'src>>, LexError> {
        loop {
            if self.pos >= self.src.len() {
                self.at_end = true;
                return Ok(None);
            }
            let start = self.pos;
            let scan = scanner::next_token(&self.src[start..]);
            if scan.len == 0 {
                return Err(LexError::EmptyMatch {
                    offset: start,
                    loc: self.loc(),
                });
            }
            self.pos += scan.len;
            let text = &self.src[start..self.pos];

            match scan.kind {
                TokenKind::Skip => {
                    self.line += text.bytes().filter(|&b| b == b'\n').count() as u32;
                }
                TokenKind::Comment => {
                    let block = CommentBlock::from_lexeme(self.loc(), text);
                    log::trace!("comment at line {}: {:?}", self.line, block.text);
                    self.comments.push(block);
                    self.line += 1;
                }
                kind => {
                    self.previous = self.token;
                    self.token = text;
                    self.token_start = start;
                    let symbol = kind.is_word().then(|| self.intern.intern(text));
                    return Ok(Some(Token {
                        kind,
                        text,
                        loc: self.loc(),
                        offset: start,
                        symbol,
                    }));
                }
            }
        }
    }

    /// Location of the current scan line.
    pub fn loc(&self) -> SourceLoc {
        SourceLoc::new(self.line, Arc::clone(&self.file))
    }

    pub fn file(&self) -> &Arc<SourceFile> {
        &self.file
    }

    pub fn source(&self) -> &'src str {
        self.src
    }

    /// Text of the most recently returned token, empty before the first.
    pub fn current_text(&self) -> &'src str {
        self.token
    }

    pub fn previous_text(&self) -> &'src str {
        self.previous
    }

    pub fn is_at_end(&self) -> bool {
        self.at_end
    }

    pub fn intern(&mut self, value: &str) -> Arc<str> {
        self.intern.intern(value)
    }

    /// Comments collected so far, in source order.
    pub fn comments(&self) -> &[CommentBlock] {
        &self.comments
    }

    pub fn take_comments(&mut self) -> Vec<CommentBlock> {
        std::mem::take(&mut self.comments)
    }

    /// A syntax error rejecting the most recently returned token.
    pub fn syntax_error(&self) -> SyntaxError {
        SyntaxError::new(
            self.src,
            self.token_start,
            self.token,
            self.previous,
            self.loc(),
            self.at_end,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(src: &str) -> (Vec<(TokenKind, String, u32)>, Vec<CommentBlock>) {
        let mut intern = StringIntern::new();
        let mut lexer = Lexer::new(src, Arc::new(SourceFile::new("t.mro")), &mut intern);
        let mut out = Vec::new();
        while let Some(tok) = lexer.next().unwrap() {
            out.push((tok.kind, tok.text.to_string(), tok.loc.line));
        }
        let comments = lexer.take_comments();
        (out, comments)
    }

    #[test]
    fn counts_lines_across_whitespace() {
        let (toks, _) = lex_all("stage\n\nA\r\n(\n)");
        let lines: Vec<u32> = toks.iter().map(|t| t.2).collect();
        assert_eq!(lines, vec![1, 3, 4, 5]);
    }

    #[test]
    fn comments_are_diverted() {
        let (toks, comments) = lex_all("# header\n\n// about A\nstage A # trailing\n)");
        let kinds: Vec<TokenKind> = toks.iter().map(|t| t.0).collect();
        assert_eq!(kinds, vec![TokenKind::Stage, TokenKind::Id, TokenKind::RParen]);
        assert_eq!(toks[0].2, 4);
        assert_eq!(toks[2].2, 5);

        let found: Vec<(u32, &str)> = comments.iter().map(|c| (c.line(), c.text.as_str())).collect();
        assert_eq!(found, vec![(1, "header"), (3, "about A"), (4, "trailing")]);
    }

    #[test]
    fn tracks_previous_and_current() {
        let mut intern = StringIntern::new();
        let mut lexer = Lexer::new("call A(", Arc::new(SourceFile::new("t.mro")), &mut intern);
        assert_eq!(lexer.current_text(), "");
        lexer.next().unwrap();
        lexer.next().unwrap();
        assert_eq!(lexer.previous_text(), "call");
        assert_eq!(lexer.current_text(), "A");
        lexer.next().unwrap();
        assert!(lexer.next().unwrap().is_none());
        assert!(lexer.is_at_end());
        assert_eq!(lexer.current_text(), "(");
        assert_eq!(lexer.previous_text(), "A");
    }

    #[test]
    fn identifiers_are_interned() {
        let mut intern = StringIntern::new();
        let mut lexer = Lexer::new("A A 1", Arc::new(SourceFile::new("t.mro")), &mut intern);
        let a = lexer.next().unwrap().unwrap();
        let b = lexer.next().unwrap().unwrap();
        let n = lexer.next().unwrap().unwrap();
        assert!(Arc::ptr_eq(a.symbol.as_ref().unwrap(), b.symbol.as_ref().unwrap()));
        assert!(n.symbol.is_none());
        drop(lexer);
        assert_eq!(intern.len(), 1);
    }

    #[test]
    fn invalid_input_is_a_token() {
        let (toks, _) = lex_all("a $ b");
        assert_eq!(toks[1].0, TokenKind::Invalid);
        assert_eq!(toks[1].1, "$");
        assert_eq!(toks[2].1, "b");
    }

    #[test]
    fn syntax_error_points_at_current_token() {
        let mut intern = StringIntern::new();
        let src = "stage A(\n    in int x y,\n)";
        let mut lexer = Lexer::new(src, Arc::new(SourceFile::new("t.mro")), &mut intern);
        for _ in 0..7 {
            lexer.next().unwrap();
        }
        let err = lexer.syntax_error();
        assert_eq!(err.token, "y");
        assert_eq!(err.previous.as_deref(), Some("x"));
        assert_eq!(err.loc.line, 2);
        assert_eq!(err.column, 13);
    }

    #[test]
    fn empty_input() {
        let (toks, comments) = lex_all("");
        assert!(toks.is_empty());
        assert!(comments.is_empty());
    }
}
