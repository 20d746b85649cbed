// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token classification using logos.
//!
//! Longest match wins. When a fixed string and a pattern match the same
//! text, the fixed string wins, so `stage` is a keyword while `stages` is an
//! identifier.

use logos::Logos;
use mro_ast::token::TokenKind;

/// Raw token type for logos. Whitespace and comments are real tokens here so
/// that every byte of the input is accounted for.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
    #[regex(r"[ \t\r\n\f]+")]
    Skip,

    // Line comments own their terminating newline.
    #[regex(r"#[^\n]*\n?")]
    #[regex(r"//[^\n]*\n?")]
    Comment,

    #[token("@include")]
    Include,

    // === Punctuation ===
    #[token("=")]
    Equals,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    // === Keywords ===
    #[token("filetype")]
    Filetype,
    #[token("struct")]
    Struct,
    #[token("stage")]
    Stage,
    #[token("pipeline")]
    Pipeline,
    #[token("call")]
    Call,
    #[token("map")]
    Map,
    #[token("split")]
    Split,
    #[token("using")]
    Using,
    #[token("self")]
    SelfKw,
    #[token("return")]
    Return,
    #[token("retain")]
    Retain,
    #[token("in")]
    In,
    #[token("out")]
    Out,
    #[token("src")]
    Src,
    #[token("as")]
    As,
    #[token("py")]
    Py,
    #[token("exec")]
    Exec,
    #[token("comp")]
    Comp,
    #[token("mem_gb")]
    MemGb,
    #[token("vmem_gb")]
    VmemGb,
    #[token("threads")]
    Threads,
    #[token("special")]
    Special,
    #[token("volatile")]
    Volatile,
    #[token("strict")]
    Strict,
    #[token("local")]
    Local,
    #[token("preflight")]
    Preflight,
    #[token("disabled")]
    Disabled,
    #[token("int")]
    IntType,
    #[token("float")]
    FloatType,
    #[token("string")]
    StringType,
    #[token("bool")]
    BoolType,
    #[token("path")]
    PathType,
    #[token("file")]
    FileType,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // === Literals ===
    #[regex(r"-?[0-9]+\.[0-9]+([eE][-+]?[0-9]+)?")]
    #[regex(r"-?[0-9]+[eE][-+]?[0-9]+")]
    Float,

    #[regex(r"-?[0-9]+")]
    Int,

    // Single line; escapes follow JSON.
    #[regex(r#""([^\\"\n]|\\[\\"/bfnrt]|\\u[0-9a-fA-F]{4})*""#)]
    String,

    // === Identifier (keywords take precedence) ===
    #[regex(r"_?[a-zA-Z][a-zA-Z0-9_]*")]
    Id,
}

impl RawToken {
    fn kind(self) -> TokenKind {
        match self {
            RawToken::Skip => TokenKind::Skip,
            RawToken::Comment => TokenKind::Comment,
            RawToken::Include => TokenKind::Include,

            RawToken::Equals => TokenKind::Equals,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Dot => TokenKind::Dot,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,

            RawToken::Filetype => TokenKind::Filetype,
            RawToken::Struct => TokenKind::Struct,
            RawToken::Stage => TokenKind::Stage,
            RawToken::Pipeline => TokenKind::Pipeline,
            RawToken::Call => TokenKind::Call,
            RawToken::Map => TokenKind::Map,
            RawToken::Split => TokenKind::Split,
            RawToken::Using => TokenKind::Using,
            RawToken::SelfKw => TokenKind::SelfKw,
            RawToken::Return => TokenKind::Return,
            RawToken::Retain => TokenKind::Retain,
            RawToken::In => TokenKind::In,
            RawToken::Out => TokenKind::Out,
            RawToken::Src => TokenKind::Src,
            RawToken::As => TokenKind::As,
            RawToken::Py => TokenKind::Py,
            RawToken::Exec => TokenKind::Exec,
            RawToken::Comp => TokenKind::Comp,
            RawToken::MemGb => TokenKind::MemGb,
            RawToken::VmemGb => TokenKind::VmemGb,
            RawToken::Threads => TokenKind::Threads,
            RawToken::Special => TokenKind::Special,
            RawToken::Volatile => TokenKind::Volatile,
            RawToken::Strict => TokenKind::Strict,
            RawToken::Local => TokenKind::Local,
            RawToken::Preflight => TokenKind::Preflight,
            RawToken::Disabled => TokenKind::Disabled,
            RawToken::IntType => TokenKind::IntType,
            RawToken::FloatType => TokenKind::FloatType,
            RawToken::StringType => TokenKind::StringType,
            RawToken::BoolType => TokenKind::BoolType,
            RawToken::PathType => TokenKind::PathType,
            RawToken::FileType => TokenKind::FileType,
            RawToken::True => TokenKind::True,
            RawToken::False => TokenKind::False,
            RawToken::Null => TokenKind::Null,

            RawToken::Float => TokenKind::Float,
            RawToken::Int => TokenKind::Int,
            RawToken::String => TokenKind::String,
            RawToken::Id => TokenKind::Id,
        }
    }
}

/// Result of classifying the start of a suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scan {
    pub kind: TokenKind,
    /// Length in bytes of the lexeme, starting at offset 0.
    pub len: usize,
}

/// Classify the lexeme at the start of `head`.
///
/// Unrecognized input yields [`TokenKind::Invalid`] covering at least one
/// character. Only an empty `head` produces a zero-length scan.
pub fn next_token(head: &str) -> Scan {
    let mut lex = RawToken::lexer(head);
    match lex.next() {
        Some(Ok(raw)) => Scan {
            kind: raw.kind(),
            len: lex.span().end,
        },
        Some(Err(())) => {
            // Never swallow a newline, so line numbers stay exact.
            let first = head.chars().next().map_or(0, char::len_utf8);
            let mut len = lex.span().end.max(first);
            if let Some(nl) = head[..len].find('\n') {
                len = nl.max(first);
            }
            Scan {
                kind: TokenKind::Invalid,
                len,
            }
        }
        None => Scan {
            kind: TokenKind::Invalid,
            len: 0,
        },
    }
}

/// Scan all of `source`, trivia included.
///
/// The lexemes concatenate back to `source`.
pub fn scan_all(source: &str) -> Vec<(TokenKind, &str)> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < source.len() {
        let scan = next_token(&source[pos..]);
        if scan.len == 0 {
            break;
        }
        out.push((scan.kind, &source[pos..pos + scan.len]));
        pos += scan.len;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("stage FOO", TokenKind::Stage, "stage")]
    #[case("stages", TokenKind::Id, "stages")]
    #[case("in_x", TokenKind::Id, "in_x")]
    #[case("in x", TokenKind::In, "in")]
    #[case("_private", TokenKind::Id, "_private")]
    #[case("mem_gb = 4", TokenKind::MemGb, "mem_gb")]
    #[case("map<int>", TokenKind::Map, "map")]
    #[case("@include \"a.mro\"", TokenKind::Include, "@include")]
    #[case("-12,", TokenKind::Int, "-12")]
    #[case("3.25)", TokenKind::Float, "3.25")]
    #[case("1e-5 ", TokenKind::Float, "1e-5")]
    #[case("2.5E+3]", TokenKind::Float, "2.5E+3")]
    #[case("\"a \\\"b\\\" \\u00e9\" x", TokenKind::String, "\"a \\\"b\\\" \\u00e9\"")]
    #[case("  \n\t x", TokenKind::Skip, "  \n\t ")]
    #[case("# note\nstage", TokenKind::Comment, "# note\n")]
    #[case("// note\nstage", TokenKind::Comment, "// note\n")]
    #[case("# last line", TokenKind::Comment, "# last line")]
    fn classifies_prefix(#[case] head: &str, #[case] kind: TokenKind, #[case] lexeme: &str) {
        let scan = next_token(head);
        assert_eq!(scan.kind, kind);
        assert_eq!(&head[..scan.len], lexeme);
    }

    #[rstest]
    #[case("$x")]
    #[case("?")]
    #[case("é")]
    #[case("/x")]
    fn unknown_input_advances(#[case] head: &str) {
        let scan = next_token(head);
        assert_eq!(scan.kind, TokenKind::Invalid);
        assert!(scan.len >= 1);
        assert!(head.is_char_boundary(scan.len));
    }

    #[test]
    fn unterminated_string_stops_before_newline() {
        let src = "\"abc\nx";
        let scan = next_token(src);
        assert_eq!(scan.kind, TokenKind::Invalid);
        assert!(scan.len >= 1);
        assert!(!src[..scan.len].contains('\n'));
    }

    #[test]
    fn empty_head_is_zero_length() {
        assert_eq!(next_token("").len, 0);
    }

    #[test]
    fn scan_all_round_trips() {
        let src = "stage A(\n  in int x, # c\n)\n";
        let lexemes = scan_all(src);
        let joined: String = lexemes.iter().map(|(_, s)| *s).collect();
        assert_eq!(joined, src);
        let kinds: Vec<TokenKind> = lexemes
            .iter()
            .map(|(k, _)| *k)
            .filter(|k| !k.is_trivia())
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Stage,
                TokenKind::Id,
                TokenKind::LParen,
                TokenKind::In,
                TokenKind::IntType,
                TokenKind::Id,
                TokenKind::Comma,
                TokenKind::RParen,
            ]
        );
    }
}
