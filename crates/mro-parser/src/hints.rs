// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error hints - suggestions for fixing common mistakes.
//!
//! Kept separate from the main parser to avoid clutter.

use mro_ast::token::TokenKind;

/// Get a hint for an "expected X" error. `found` is `None` at end of input.
pub fn for_expected(expected: &str, found: Option<TokenKind>) -> Option<&'static str> {
    match (expected, found) {
        // Closing delimiters
        ("')'", None) => Some("add ')' to close the parenthesis"),
        ("')'", Some(TokenKind::Equals)) => Some("bindings are written 'name = value'"),
        ("']'", None) => Some("add ']' to close the array"),
        ("'}'", None) => Some("add '}' to close the block"),
        ("'>'", _) => Some("close the map type with '>'"),
        ("';'", _) => Some("filetype declarations end with ';'"),

        // Declarations
        ("declaration", Some(TokenKind::Id)) => {
            Some("start with 'stage', 'pipeline', 'call', 'struct', 'filetype' or '@include'")
        }
        ("declaration", Some(TokenKind::In | TokenKind::Out | TokenKind::Src)) => {
            Some("parameters belong inside a stage or pipeline parameter list")
        }
        ("declaration", _) => Some("top-level items are declarations or a single call"),

        // Stage bodies
        ("'src'", _) => Some("a stage needs a 'src py \"path\"' line after its parameters"),
        ("'in', 'out' or 'src'", Some(TokenKind::Id)) => {
            Some("parameters start with 'in' or 'out'")
        }
        ("'in', 'out' or ')'", Some(TokenKind::Src)) => {
            Some("only stages have a 'src' line")
        }
        ("source language", _) => Some("use 'py', 'exec' or 'comp'"),
        ("resource", _) => Some("resources are mem_gb, vmem_gb, threads, special and volatile"),
        ("'strict', 'true' or 'false'", _) => Some("write 'volatile = strict'"),

        // Pipelines
        ("'call' or 'return'", Some(TokenKind::RBrace)) => {
            Some("a pipeline must end with a 'return' statement")
        }
        ("'call' or 'return'", _) => Some("pipeline bodies hold calls followed by one 'return'"),
        ("'call'", Some(TokenKind::Id)) => Some("'map' must be followed by 'call'"),
        ("modifier", _) => Some("modifiers are local, preflight, volatile and disabled"),

        // Types and names
        ("type", Some(TokenKind::Int | TokenKind::Float)) => {
            Some("the type comes before the parameter name")
        }
        ("type", _) => Some("try a type like 'int', 'string', 'bam' or 'map<int>'"),
        ("a name", Some(TokenKind::Int)) => Some("names can't start with a number"),
        ("a name", _) => Some("names start with a letter or '_'"),
        ("identifier", _) => Some("names start with a letter or '_'"),

        // Values
        ("a string", _) => Some("expected a quoted string like \"example\""),
        ("an integer", Some(TokenKind::Float)) => Some("this value must be a whole number"),
        ("an integer", _) => None,
        ("expression", Some(TokenKind::RParen | TokenKind::Comma)) => {
            Some("put the value after '='")
        }
        ("expression", Some(TokenKind::Invalid)) => Some("strings are quoted and stay on one line"),
        ("expression", _) => Some("try a literal, an array, a map or a reference like self.x"),
        ("'='", Some(TokenKind::Colon)) => Some("use '=' for bindings, ':' only inside maps"),

        (_, Some(TokenKind::Invalid)) => Some("this character is not part of the language"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_specific() {
        assert_eq!(for_expected("')'", None), Some("add ')' to close the parenthesis"));
        assert_eq!(for_expected("')'", Some(TokenKind::Id)), None);
    }

    #[test]
    fn invalid_fallback() {
        assert!(for_expected("'('", Some(TokenKind::Invalid)).is_some());
        assert!(for_expected("'('", Some(TokenKind::Id)).is_none());
    }
}
