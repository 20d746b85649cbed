// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from front-end error types to `Diagnostic`.

use mro_ast::SourceLoc;
use mro_lexer::{LexError, SyntaxError};
use mro_parser::{InternalError, ParseError};

use crate::codes::{INTERNAL, INVALID_ENCODING, UNEXPECTED_TOKEN};
use crate::{Diagnostic, ToDiagnostic};

/// One secondary label per `@include` hop above `loc`.
fn with_include_chain(mut diag: Diagnostic, loc: &SourceLoc) -> Diagnostic {
    for site in &loc.file.included_from {
        diag = diag.with_secondary(site, "included from here");
        diag = with_include_chain(diag, site);
    }
    diag
}

// ============================================================================
// Syntax Errors
// ============================================================================

impl ToDiagnostic for SyntaxError {
    fn to_diagnostic(&self) -> Diagnostic {
        let label = match &self.expected {
            Some(expected) => format!("expected {}", expected),
            None => "here".to_string(),
        };
        let column = self.source_line.as_ref().map(|_| self.column + 1);
        let mut diag = Diagnostic::error(self.summary())
            .with_code(UNEXPECTED_TOKEN)
            .with_primary(&self.loc, column, label);
        if self.at_end {
            diag = diag.with_note("reached the end of the file");
        }
        if let Some(hint) = &self.hint {
            diag = diag.with_help(hint.as_str());
        }
        with_include_chain(diag, &self.loc)
    }
}

// ============================================================================
// Internal Errors
// ============================================================================

impl ToDiagnostic for LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        let LexError::EmptyMatch { loc, .. } = self;
        Diagnostic::error(format!("internal parser error: {}", self))
            .with_code(INTERNAL)
            .with_primary(loc, None, "scanner stopped here")
    }
}

impl ToDiagnostic for InternalError {
    fn to_diagnostic(&self) -> Diagnostic {
        match self {
            InternalError::Lex(err) => err.to_diagnostic(),
            InternalError::NoInheritor { loc } => {
                Diagnostic::error(format!("internal parser error: {}", self))
                    .with_code(INTERNAL)
                    .with_primary(loc, None, "while attaching comments")
            }
        }
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

impl ToDiagnostic for ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ParseError::Syntax(err) => err.to_diagnostic(),
            ParseError::Encoding { loc, offset } => {
                let diag = Diagnostic::error("source is not valid UTF-8")
                    .with_code(INVALID_ENCODING)
                    .with_primary(loc, None, format!("invalid byte at offset {}", offset))
                    .with_help("save the file as UTF-8");
                with_include_chain(diag, loc)
            }
            ParseError::Internal(err) => err.to_diagnostic(),
        }
    }
}
