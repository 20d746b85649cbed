// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Property-based tests for the scanner and lexer driver.

use std::sync::Arc;

use mro_ast::token::TokenKind;
use mro_ast::SourceFile;
use mro_lexer::scanner::scan_all;
use mro_lexer::{Lexer, StringIntern};
use proptest::prelude::*;

/// Lines of plausible MRO source, mixed with comments and junk.
fn mro_fragment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "stage [A-Z_]{1,8}\\(",
        "    in  (int|float|string|path|map<int>|bam\\[\\]) [a-z_]{1,6},",
        "    out [a-z]{1,6} [a-z_]{1,6} \"[a-z ]{0,10}\",",
        "    src py \"stages/[a-z_]{1,8}\",",
        "call [A-Z_]{1,8}\\(",
        "    [a-z_]{1,6} = (self|[A-Z_]{1,4})\\.[a-z_]{1,6},",
        "    [a-z_]{1,6} = -?[0-9]{1,4}(\\.[0-9]{1,3})?,",
        "\\) using \\( mem_gb = [0-9], volatile = strict \\)",
        "# [ -~]{0,20}",
        "// [ -~]{0,20}",
        "[ \\t]{0,4}",
        "[$?!\\\\]{1,3}",
        "\"unterminated [a-z]{0,4}",
    ]
}

fn mro_document_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(mro_fragment_strategy(), 0..20),
        prop_oneof!["\n", "\r\n", "\n\n"],
    )
        .prop_map(|(lines, sep)| lines.join(&sep))
}

fn lex_lines(src: &str) -> Vec<(usize, u32)> {
    let mut intern = StringIntern::new();
    let mut lexer = Lexer::new(src, Arc::new(SourceFile::new("p.mro")), &mut intern);
    let mut out = Vec::new();
    while let Some(tok) = lexer.next().expect("scanner stalled") {
        out.push((tok.offset, tok.loc.line));
    }
    out
}

proptest! {
    #[test]
    fn scan_reproduces_input(input in "\\PC{0,80}") {
        let joined: String = scan_all(&input).into_iter().map(|(_, s)| s).collect();
        prop_assert_eq!(joined, input);
    }

    #[test]
    fn scan_reproduces_documents(input in mro_document_strategy()) {
        let joined: String = scan_all(&input).into_iter().map(|(_, s)| s).collect();
        prop_assert_eq!(joined, input);
    }

    #[test]
    fn lexer_never_stalls(input in "\\PC{0,80}") {
        let mut intern = StringIntern::new();
        let mut lexer = Lexer::new(&input, Arc::new(SourceFile::new("p.mro")), &mut intern);
        let mut steps = 0usize;
        while lexer.next().map_err(|e| TestCaseError::fail(e.to_string()))?.is_some() {
            steps += 1;
            prop_assert!(steps <= input.len());
        }
    }

    #[test]
    fn line_is_one_plus_preceding_newlines(input in mro_document_strategy()) {
        for (offset, line) in lex_lines(&input) {
            let newlines = input[..offset].bytes().filter(|&b| b == b'\n').count() as u32;
            prop_assert_eq!(line, newlines + 1, "token at byte {}", offset);
        }
    }

    #[test]
    fn every_comment_is_collected(input in mro_document_strategy()) {
        let scanned = scan_all(&input)
            .into_iter()
            .filter(|(kind, _)| *kind == TokenKind::Comment)
            .count();
        let mut intern = StringIntern::new();
        let mut lexer = Lexer::new(&input, Arc::new(SourceFile::new("p.mro")), &mut intern);
        while lexer.next().map_err(|e| TestCaseError::fail(e.to_string()))?.is_some() {}
        let comments = lexer.take_comments();
        prop_assert_eq!(comments.len(), scanned);
        prop_assert!(comments.windows(2).all(|w| w[0].line() < w[1].line()));
    }
}

#[test]
fn crlf_counts_once() {
    let lines: Vec<u32> = lex_lines("a\r\nb\r\n\r\nc").into_iter().map(|(_, l)| l).collect();
    assert_eq!(lines, vec![1, 2, 4]);
}
