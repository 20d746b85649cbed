// SPDX-License-Identifier: (MIT OR Apache-2.0)

use mro_ast::SourceLoc;
use mro_lexer::{LexError, SyntaxError};
use thiserror::Error;

/// Why a source unit could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The token stream does not match the grammar.
    #[error(transparent)]
    Syntax(Box<SyntaxError>),

    /// The input bytes are not UTF-8.
    #[error("MRO ParseError: invalid UTF-8 at byte {offset}\n    at {loc}")]
    Encoding { loc: SourceLoc, offset: usize },

    /// A bug in the front end, never a problem with the input.
    #[error("internal parser error: {0}")]
    Internal(#[from] InternalError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("node at {loc} passes its comments on but has no children")]
    NoInheritor { loc: SourceLoc },
}

impl ParseError {
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            ParseError::Syntax(err) => Some(err),
            _ => None,
        }
    }

    /// Where the failure was detected.
    pub fn loc(&self) -> Option<&SourceLoc> {
        match self {
            ParseError::Syntax(err) => Some(&err.loc),
            ParseError::Encoding { loc, .. } => Some(loc),
            ParseError::Internal(InternalError::Lex(LexError::EmptyMatch { loc, .. })) => Some(loc),
            ParseError::Internal(InternalError::NoInheritor { loc }) => Some(loc),
        }
    }
}

impl From<SyntaxError> for ParseError {
    fn from(err: SyntaxError) -> Self {
        ParseError::Syntax(Box::new(err))
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Internal(InternalError::Lex(err))
    }
}
