// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lexer for the MRO pipeline language.
//!
//! Splits source text into tokens for the parser, tracking line numbers and
//! setting comments aside for later attachment to AST nodes.

mod error;
mod intern;
mod lexer;
pub mod scanner;

pub use error::{LexError, SyntaxError};
pub use intern::StringIntern;
pub use lexer::{Lexer, Token};
