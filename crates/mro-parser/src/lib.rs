// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for the MRO pipeline language.
//!
//! Turns source text into an [`Ast`] whose nodes carry the comments that
//! document them.

pub mod comments;
mod config;
mod error;
mod hints;
mod literal;
mod parser;

use std::sync::Arc;

use mro_ast::{Ast, SourceFile, SourceLoc};
use mro_lexer::StringIntern;

pub use config::ParseConfig;
pub use error::{InternalError, ParseError};
pub use parser::Parser;

/// Parse one source unit with the default configuration.
pub fn parse(
    src: &str,
    file: Arc<SourceFile>,
    intern: &mut StringIntern,
) -> Result<Ast, ParseError> {
    parse_with_config(src, file, intern, &ParseConfig::default())
}

pub fn parse_with_config(
    src: &str,
    file: Arc<SourceFile>,
    intern: &mut StringIntern,
    config: &ParseConfig,
) -> Result<Ast, ParseError> {
    log::debug!("parsing {} ({} bytes)", file.file_name, src.len());
    let mut ast = Parser::new(src, Arc::clone(&file), intern).parse()?;
    let collected = ast.comments.len();
    if config.attach_comments {
        comments::compile_comments(&mut ast).map_err(|err| {
            log::debug!("comment attachment failed in {}: {}", file.file_name, err);
            ParseError::Internal(err)
        })?;
    }
    log::debug!(
        "parsed {}: {} declarations, {} comments",
        file.file_name,
        ast.decls.len(),
        collected
    );
    Ok(ast)
}

/// Parse raw bytes, which must be UTF-8.
pub fn parse_bytes(
    src: &[u8],
    file: Arc<SourceFile>,
    intern: &mut StringIntern,
    config: &ParseConfig,
) -> Result<Ast, ParseError> {
    match std::str::from_utf8(src) {
        Ok(text) => parse_with_config(text, file, intern, config),
        Err(err) => {
            let offset = err.valid_up_to();
            let line = 1 + src[..offset].iter().filter(|&&b| b == b'\n').count() as u32;
            log::debug!("{} is not UTF-8 at byte {}", file.file_name, offset);
            Err(ParseError::Encoding {
                loc: SourceLoc::new(line, file),
                offset,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mro_ast::{Decl, Node};

    fn file() -> Arc<SourceFile> {
        Arc::new(SourceFile::new("lib.mro"))
    }

    #[test]
    fn doc_comment_attaches_to_stage() {
        let mut intern = StringIntern::new();
        let ast = parse("// doc\nstage FOO(src py \"foo\",)\n", file(), &mut intern).unwrap();
        assert_eq!(ast.decls.len(), 1);
        let node = ast.decls[0].node();
        assert_eq!(node.comments, vec!["doc"]);
        assert!(node.scope_comments.is_empty());
        assert!(ast.comments.is_empty());
    }

    #[test]
    fn separated_comment_is_scope() {
        let mut intern = StringIntern::new();
        let ast = parse("// orphan\n\nstage FOO(src py \"foo\",)\n", file(), &mut intern).unwrap();
        let node = ast.decls[0].node();
        assert!(node.comments.is_empty());
        assert_eq!(node.scope_comments.len(), 1);
        assert_eq!(node.scope_comments[0].text, "orphan");
        assert_eq!(node.scope_comments[0].line(), 1);
    }

    #[test]
    fn attachment_can_be_disabled() {
        let mut intern = StringIntern::new();
        let config = ParseConfig {
            attach_comments: false,
        };
        let ast = parse_with_config("# a\nfiletype x;\n", file(), &mut intern, &config).unwrap();
        assert!(ast.decls[0].node().comments.is_empty());
        assert_eq!(ast.comments.len(), 1);
    }

    #[test]
    fn bytes_must_be_utf8() {
        let mut intern = StringIntern::new();
        let src = b"filetype a;\nfiletype \xff;\n";
        let err = parse_bytes(src, file(), &mut intern, &ParseConfig::default()).unwrap_err();
        match &err {
            ParseError::Encoding { loc, offset } => {
                assert_eq!(loc.line, 2);
                assert_eq!(*offset, 21);
            }
            other => panic!("expected encoding error, got {:?}", other),
        }
        assert!(err.to_string().starts_with("MRO ParseError: invalid UTF-8 at byte 21"));
    }

    #[test]
    fn bytes_parse_like_text() {
        let mut intern = StringIntern::new();
        let ast = parse_bytes(b"filetype a;", file(), &mut intern, &ParseConfig::default()).unwrap();
        assert!(matches!(ast.decls[0], Decl::Filetype(_)));
    }
}
