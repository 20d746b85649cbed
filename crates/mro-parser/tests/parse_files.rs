// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! End-to-end parsing of realistic MRO files.

use std::sync::Arc;

use mro_ast::decl::Stage;
use mro_ast::token::TokenKind;
use mro_ast::{Ast, Decl, Node, SourceFile, SourceLoc};
use mro_lexer::scanner::scan_all;
use mro_lexer::StringIntern;
use mro_parser::{parse, ParseError};
use rstest::rstest;

const SUM_SQUARES: &str = r#"#
# Copyright (c) 2024 Example Labs. All rights reserved.
#

@include "_common.mro"

filetype txt;

# Squares each value, then adds them up.
stage SUM_SQUARES(
    # Numbers to square.
    in  float[] values,
    in  int     factor,
    out float   sum,
    src py      "stages/sum_squares",
) split (
    in  float   value,
    out float   square,
) using (
    mem_gb  = 2,
    threads = 1,
)

# Sums squares, then reports.
pipeline SUM_SQUARE_REPORT(
    in  float[] values,
    out float   sum,
    out txt     report,
)
{
    # square and sum
    call SUM_SQUARES(
        values = self.values,
        # doubling
        factor = 2,
    )

    call REPORT(
        total = SUM_SQUARES.sum,
    )

    return (
        sum    = SUM_SQUARES.sum,
        report = REPORT.report,
    )
}

call SUM_SQUARE_REPORT(
    values = [1.0, 2.0, 3.0],
)

# end of file
"#;

fn parse_str(src: &str) -> Result<Ast, ParseError> {
    let mut intern = StringIntern::new();
    parse(src, Arc::new(SourceFile::new("sum_squares.mro")), &mut intern)
}

fn stage(ast: &Ast) -> &Stage {
    ast.stages().next().expect("no stage")
}

#[test]
fn parses_sum_squares() {
    let ast = parse_str(SUM_SQUARES).unwrap();
    let kinds: Vec<&str> = ast
        .decls
        .iter()
        .map(|d| match d {
            Decl::Include(_) => "include",
            Decl::Filetype(_) => "filetype",
            Decl::Struct(_) => "struct",
            Decl::Stage(_) => "stage",
            Decl::Pipeline(_) => "pipeline",
            Decl::Call(_) => "call",
        })
        .collect();
    assert_eq!(kinds, vec!["include", "filetype", "stage", "pipeline", "call"]);
}

#[test]
fn header_is_scope_of_first_declaration() {
    let ast = parse_str(SUM_SQUARES).unwrap();
    let include = ast.decls[0].node();
    let texts: Vec<&str> = include.scope_comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["", "Copyright (c) 2024 Example Labs. All rights reserved.", ""]
    );
    assert!(include.comments.is_empty());
}

#[test]
fn doc_comments_reach_their_nodes() {
    let ast = parse_str(SUM_SQUARES).unwrap();
    assert_eq!(ast.decls[2].node().comments, vec!["Squares each value, then adds them up."]);
    assert_eq!(ast.decls[3].node().comments, vec!["Sums squares, then reports."]);

    // Handed down from the parameter list to its first parameter.
    let stage = stage(&ast);
    assert!(stage.in_params.node.comments.is_empty());
    assert_eq!(stage.in_params.params[0].node.comments, vec!["Numbers to square."]);

    let pipeline = ast.pipelines().next().unwrap();
    let call = pipeline.call("SUM_SQUARES").unwrap();
    assert_eq!(call.node.comments, vec!["square and sum"]);
    let factor = call.bindings.get("factor").unwrap();
    assert_eq!(factor.node.comments, vec!["doubling"]);
    assert!(call.bindings.get("values").unwrap().node.comments.is_empty());
}

#[test]
fn trailing_comment_stays_on_root() {
    let ast = parse_str(SUM_SQUARES).unwrap();
    let texts: Vec<&str> = ast.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["end of file"]);
}

#[test]
fn every_comment_is_placed_once() {
    let produced = scan_all(SUM_SQUARES)
        .into_iter()
        .filter(|(kind, _)| *kind == TokenKind::Comment)
        .count();
    let ast = parse_str(SUM_SQUARES).unwrap();
    let mut placed = ast.comments.len();
    ast.for_each_node(|node| {
        placed += node.node().comments.len() + node.node().scope_comments.len();
    });
    assert_eq!(placed, produced);
}

#[test]
fn nested_inheritance_prepends() {
    // The run above the first binding lands on the list, then moves down.
    let src = "call A(\n    # one\n    # two\n    x = 1,\n)\n";
    let ast = parse_str(src).unwrap();
    let call = ast.call().unwrap();
    assert_eq!(call.bindings.list[0].node.comments, vec!["one", "two"]);
    assert!(call.bindings.node.comments.is_empty());
}

#[test]
fn syntax_error_message() {
    let src = "stage A(\n    in int x,\n    src py \"a\" \"b\",\n)\n";
    let err = parse_str(src).unwrap_err();
    assert_eq!(
        err.to_string(),
        "MRO ParseError: unexpected token '\"b\"' after '\"a\"'\n    src py \"a\" \"b\",\n               ^\n    at sum_squares.mro:3"
    );
    let syntax = err.as_syntax().unwrap();
    assert_eq!(syntax.column, 15);
    assert_eq!(syntax.offset, src.find("\"b\"").unwrap());
}

#[test]
fn error_is_reproducible() {
    let src = "pipeline P(\n    in int x\n    in int y,\n) {\n    return (\n";
    let first = parse_str(src).unwrap_err().to_string();
    let second = parse_str(src).unwrap_err().to_string();
    assert_eq!(first, second);
    assert!(first.ends_with("at sum_squares.mro:6"));
}

#[test]
fn included_file_error_names_the_chain() {
    let top = SourceLoc::new(5, Arc::new(SourceFile::new("main.mro")));
    let file = Arc::new(SourceFile::new("_common.mro").included_from(top));
    let mut intern = StringIntern::new();
    let err = parse("stage", file, &mut intern).unwrap_err();
    assert_eq!(
        err.to_string(),
        "MRO ParseError: unexpected token 'stage' at _common.mro:1\n        included from main.mro:5"
    );
}

#[rstest]
#[case("stage A(", "(", Some("A"))]
#[case("call A(x = )", ")", Some("="))]
#[case("filetype bam", "bam", Some("filetype"))]
#[case("in int x,", "in", None)]
fn rejects(#[case] src: &str, #[case] token: &str, #[case] previous: Option<&str>) {
    let err = parse_str(src).unwrap_err();
    let syntax = err.as_syntax().expect("syntax error");
    assert_eq!(syntax.token, token);
    assert_eq!(syntax.previous.as_deref(), previous);
    assert!(err.to_string().starts_with("MRO ParseError: unexpected token"));
}

#[test]
fn unterminated_string_is_rejected() {
    let err = parse_str("call A(\n    x = \"open,\n)\n").unwrap_err();
    let syntax = err.as_syntax().expect("syntax error");
    assert!(syntax.token.starts_with('"'));
    assert_eq!(syntax.previous.as_deref(), Some("="));
    assert_eq!(syntax.loc.line, 2);
}
