// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Recursive-descent parser for MRO source.
//!
//! The parser pulls tokens from the lexer one at a time and keeps a single
//! token of lookahead. Every error is raised while that lookahead is the
//! lexer's current token, so the message points at the token that did not
//! fit.

use std::sync::Arc;

use mro_ast::decl::{
    BindStm, BindStms, CallStm, Direction, FiletypeDecl, Include, Modifiers, Param, ParamList,
    Pipeline, PipelineRetains, ResourceValues, Resources, RetainParam, ReturnStm, SplitParams,
    SrcLang, SrcParam, Stage, StageRetains, StructDecl, StructMember, TypeId,
};
use mro_ast::exp::{Exp, ExpKind, RefExp, RefKind};
use mro_ast::token::TokenKind;
use mro_ast::{Ast, AstNode, Decl, SourceFile, SourceLoc};
use mro_lexer::{Lexer, StringIntern, Token};

use crate::error::ParseError;
use crate::hints;
use crate::literal;

/// Parser session for one source unit.
pub struct Parser<'src, 'i> {
    lexer: Lexer<'src, 'i>,
    peeked: Option<Token<'src>>,
}

impl<'src, 'i> Parser<'src, 'i> {
    pub fn new(src: &'src str, file: Arc<SourceFile>, intern: &'i mut StringIntern) -> Self {
        Self {
            lexer: Lexer::new(src, file, intern),
            peeked: None,
        }
    }

    /// Parse the whole unit. Comments are left, unattached and in source
    /// order, on `Ast::comments`.
    pub fn parse(mut self) -> Result<Ast, ParseError> {
        let mut decls = Vec::new();
        while self.peek_kind()?.is_some() {
            decls.push(self.parse_decl()?);
        }
        let mut ast = Ast::new(decls);
        ast.comments = self.lexer.take_comments();
        Ok(ast)
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn peek_kind(&mut self) -> Result<Option<TokenKind>, ParseError> {
        if self.peeked.is_none() && !self.lexer.is_at_end() {
            self.peeked = self.lexer.next()?;
        }
        Ok(self.peeked.as_ref().map(|t| t.kind))
    }

    fn at(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        Ok(self.peek_kind()? == Some(kind))
    }

    fn bump(&mut self, expected: &str) -> Result<Token<'src>, ParseError> {
        self.peek_kind()?;
        match self.peeked.take() {
            Some(tok) => Ok(tok),
            None => Err(self.error(expected)),
        }
    }

    fn eat(&mut self, kind: TokenKind) -> Result<Option<Token<'src>>, ParseError> {
        if self.at(kind)? {
            self.bump(kind.display_name()).map(Some)
        } else {
            Ok(None)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'src>, ParseError> {
        self.expect_as(kind, kind.display_name())
    }

    /// Like `expect`, reporting a broader expectation on failure.
    fn expect_as(&mut self, kind: TokenKind, expected: &str) -> Result<Token<'src>, ParseError> {
        if self.at(kind)? {
            self.bump(expected)
        } else {
            Err(self.error(expected))
        }
    }

    /// Reject the lookahead token.
    fn error(&mut self, expected: &str) -> ParseError {
        if let Err(err) = self.peek_kind() {
            return err;
        }
        let found = self.peeked.as_ref().map(|t| t.kind);
        let mut err = self.lexer.syntax_error().with_expected(expected);
        if let Some(hint) = hints::for_expected(expected, found) {
            err = err.with_hint(hint);
        }
        log::debug!("syntax error at {}: expected {}", err.loc, expected);
        err.into()
    }

    fn symbol(&mut self, tok: &Token<'src>) -> Arc<str> {
        match &tok.symbol {
            Some(sym) => Arc::clone(sym),
            None => self.lexer.intern(tok.text),
        }
    }

    /// An identifier or any keyword.
    fn expect_name(&mut self) -> Result<(Arc<str>, SourceLoc), ParseError> {
        match self.peek_kind()? {
            Some(kind) if kind.is_word() => {
                let tok = self.bump("a name")?;
                Ok((self.symbol(&tok), tok.loc))
            }
            _ => Err(self.error("a name")),
        }
    }

    fn expect_id(&mut self) -> Result<(Arc<str>, SourceLoc), ParseError> {
        let tok = self.expect_as(TokenKind::Id, "identifier")?;
        Ok((self.symbol(&tok), tok.loc))
    }

    fn expect_string(&mut self) -> Result<(String, SourceLoc), ParseError> {
        let tok = self.expect_as(TokenKind::String, "a string")?;
        Ok((literal::unquote(tok.text), tok.loc))
    }

    fn eat_string(&mut self) -> Result<Option<String>, ParseError> {
        Ok(self
            .eat(TokenKind::String)?
            .map(|tok| literal::unquote(tok.text)))
    }

    fn expect_int(&mut self) -> Result<i64, ParseError> {
        if self.at(TokenKind::Int)? {
            let value = self.peeked.as_ref().and_then(|t| t.text.parse::<i64>().ok());
            if let Some(value) = value {
                self.bump("an integer")?;
                return Ok(value);
            }
        }
        Err(self.error("an integer"))
    }

    /// `ID ('.' name)*`, interned as one string.
    fn parse_dotted(&mut self) -> Result<(Arc<str>, SourceLoc), ParseError> {
        let (first, loc) = self.expect_id()?;
        match self.parse_path_tail()? {
            Some(rest) => Ok((self.lexer.intern(&format!("{}.{}", first, rest)), loc)),
            None => Ok((first, loc)),
        }
    }

    /// `('.' name)*`, joined with dots.
    fn parse_path_tail(&mut self) -> Result<Option<Arc<str>>, ParseError> {
        let mut parts: Vec<Arc<str>> = Vec::new();
        while self.eat(TokenKind::Dot)?.is_some() {
            parts.push(self.expect_name()?.0);
        }
        Ok(match parts.len() {
            0 => None,
            1 => parts.pop(),
            _ => Some(self.lexer.intern(&parts.join("."))),
        })
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_decl(&mut self) -> Result<Decl, ParseError> {
        match self.peek_kind()? {
            Some(TokenKind::Include) => self.parse_include().map(Decl::Include),
            Some(TokenKind::Filetype) => self.parse_filetype().map(Decl::Filetype),
            Some(TokenKind::Struct) => self.parse_struct().map(Decl::Struct),
            Some(TokenKind::Stage) => self.parse_stage().map(Decl::Stage),
            Some(TokenKind::Pipeline) => self.parse_pipeline().map(Decl::Pipeline),
            Some(TokenKind::Call | TokenKind::Map) => self.parse_call().map(Decl::Call),
            _ => Err(self.error("declaration")),
        }
    }

    fn parse_include(&mut self) -> Result<Include, ParseError> {
        let kw = self.bump("'@include'")?;
        let (value, _) = self.expect_string()?;
        Ok(Include {
            node: AstNode::new(kw.loc),
            value,
        })
    }

    fn parse_filetype(&mut self) -> Result<FiletypeDecl, ParseError> {
        let kw = self.bump("'filetype'")?;
        let (id, _) = self.parse_dotted()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(FiletypeDecl {
            node: AstNode::new(kw.loc),
            id,
        })
    }

    fn parse_struct(&mut self) -> Result<StructDecl, ParseError> {
        let kw = self.bump("'struct'")?;
        let (id, _) = self.expect_id()?;
        self.expect(TokenKind::LParen)?;
        let mut members = Vec::new();
        while !self.at(TokenKind::RParen)? {
            let (tname, loc) = self.parse_type()?;
            let (member_id, _) = self.expect_name()?;
            let help = self.eat_string()?;
            let out_name = self.eat_string()?;
            members.push(StructMember {
                node: AstNode::new(loc),
                tname,
                id: member_id,
                help,
                out_name,
            });
            self.eat(TokenKind::Comma)?;
        }
        self.expect(TokenKind::RParen)?;
        Ok(StructDecl {
            node: AstNode::new(kw.loc),
            id,
            members,
        })
    }

    fn parse_type(&mut self) -> Result<(TypeId, SourceLoc), ParseError> {
        self.parse_type_in(true)
    }

    /// Map element types may not themselves be maps.
    fn parse_type_in(&mut self, allow_map: bool) -> Result<(TypeId, SourceLoc), ParseError> {
        let (mut ty, loc) = match self.peek_kind()? {
            Some(TokenKind::Map) => {
                let tok = self.bump("type")?;
                if allow_map && self.eat(TokenKind::Lt)?.is_some() {
                    let (elem, _) = self.parse_type_in(false)?;
                    self.expect(TokenKind::Gt)?;
                    let ty = TypeId {
                        tname: elem.tname,
                        array_dim: 0,
                        map_dim: elem.array_dim + 1,
                    };
                    (ty, tok.loc)
                } else {
                    (TypeId::new(self.symbol(&tok)), tok.loc)
                }
            }
            Some(
                TokenKind::IntType
                | TokenKind::FloatType
                | TokenKind::StringType
                | TokenKind::BoolType
                | TokenKind::PathType
                | TokenKind::FileType,
            ) => {
                let tok = self.bump("type")?;
                (TypeId::new(self.symbol(&tok)), tok.loc)
            }
            Some(TokenKind::Id) => {
                let (tname, loc) = self.parse_dotted()?;
                (TypeId::new(tname), loc)
            }
            _ => return Err(self.error("type")),
        };
        while self.eat(TokenKind::LBracket)?.is_some() {
            self.expect(TokenKind::RBracket)?;
            ty.array_dim += 1;
        }
        Ok((ty, loc))
    }

    /// A run of `in` or `out` parameters. An empty list sits at `fallback`.
    fn parse_params(
        &mut self,
        direction: Direction,
        fallback: &SourceLoc,
    ) -> Result<ParamList, ParseError> {
        let kind = match direction {
            Direction::In => TokenKind::In,
            Direction::Out => TokenKind::Out,
        };
        let mut params = Vec::new();
        while self.at(kind)? {
            params.push(self.parse_param(direction)?);
        }
        let loc = params
            .first()
            .map_or_else(|| fallback.clone(), |p| p.node.loc.clone());
        Ok(ParamList {
            node: AstNode::new(loc),
            params,
        })
    }

    fn parse_param(&mut self, direction: Direction) -> Result<Param, ParseError> {
        let kw = self.bump("parameter")?;
        let (tname, _) = self.parse_type()?;
        let id = match direction {
            Direction::In => self.expect_name()?.0,
            // Unnamed outputs are called `default`; a keyword that opens the
            // next line is never taken as the name.
            Direction::Out => match self.peek_kind()? {
                Some(kind)
                    if kind.is_word()
                        && !matches!(kind, TokenKind::In | TokenKind::Out | TokenKind::Src) =>
                {
                    self.expect_name()?.0
                }
                _ => self.lexer.intern("default"),
            },
        };
        let help = self.eat_string()?;
        let out_name = match direction {
            Direction::In => None,
            Direction::Out => self.eat_string()?,
        };
        self.eat(TokenKind::Comma)?;
        Ok(Param {
            node: AstNode::new(kw.loc),
            direction,
            tname,
            id,
            help,
            out_name,
        })
    }

    fn parse_stage(&mut self) -> Result<Stage, ParseError> {
        let kw = self.bump("'stage'")?;
        let (id, _) = self.expect_id()?;
        let open = self.expect(TokenKind::LParen)?;
        let in_params = self.parse_params(Direction::In, &open.loc)?;
        let out_params = self.parse_params(Direction::Out, &open.loc)?;
        let expected = if out_params.is_empty() {
            "'in', 'out' or 'src'"
        } else {
            "'src'"
        };
        let src_kw = self.expect_as(TokenKind::Src, expected)?;
        let src = self.parse_src(src_kw)?;
        self.expect(TokenKind::RParen)?;

        let split = if self.at(TokenKind::Split)? {
            Some(self.parse_split()?)
        } else {
            None
        };
        let resources = if self.at(TokenKind::Using)? {
            Some(self.parse_resources()?)
        } else {
            None
        };
        let retain = if self.at(TokenKind::Retain)? {
            Some(self.parse_stage_retains()?)
        } else {
            None
        };
        Ok(Stage {
            node: AstNode::new(kw.loc),
            id,
            in_params,
            out_params,
            src,
            split,
            resources,
            retain,
        })
    }

    fn parse_src(&mut self, kw: Token<'src>) -> Result<SrcParam, ParseError> {
        let lang = match self.peek_kind()? {
            Some(TokenKind::Py) => SrcLang::Python,
            Some(TokenKind::Exec) => SrcLang::Exec,
            Some(TokenKind::Comp) => SrcLang::Compiled,
            _ => return Err(self.error("source language")),
        };
        self.bump("source language")?;
        let (value, _) = self.expect_string()?;
        let (path, args) = literal::split_src(&value);
        self.eat(TokenKind::Comma)?;
        Ok(SrcParam {
            node: AstNode::new(kw.loc),
            lang,
            path,
            args,
        })
    }

    fn parse_split(&mut self) -> Result<SplitParams, ParseError> {
        let kw = self.bump("'split'")?;
        self.eat(TokenKind::Using)?;
        let open = self.expect(TokenKind::LParen)?;
        let in_params = self.parse_params(Direction::In, &open.loc)?;
        let out_params = self.parse_params(Direction::Out, &open.loc)?;
        self.expect_as(TokenKind::RParen, "'in', 'out' or ')'")?;
        Ok(SplitParams {
            node: AstNode::new(kw.loc),
            in_params,
            out_params,
        })
    }

    fn parse_resources(&mut self) -> Result<Resources, ParseError> {
        let kw = self.bump("'using'")?;
        self.expect(TokenKind::LParen)?;
        let mut values = ResourceValues::default();
        while !self.at(TokenKind::RParen)? {
            self.parse_resource(&mut values)?;
            self.eat(TokenKind::Comma)?;
        }
        self.expect(TokenKind::RParen)?;
        Ok(Resources {
            node: AstNode::new(kw.loc),
            values,
        })
    }

    fn parse_resource(&mut self, values: &mut ResourceValues) -> Result<(), ParseError> {
        let kind = match self.peek_kind()? {
            Some(
                kind @ (TokenKind::MemGb
                | TokenKind::VmemGb
                | TokenKind::Threads
                | TokenKind::Special
                | TokenKind::Volatile),
            ) => kind,
            _ => return Err(self.error("resource")),
        };
        self.bump("resource")?;
        self.expect(TokenKind::Equals)?;
        match kind {
            TokenKind::MemGb => values.mem_gb = Some(self.expect_int()?),
            TokenKind::VmemGb => values.vmem_gb = Some(self.expect_int()?),
            TokenKind::Threads => values.threads = Some(self.expect_int()?),
            TokenKind::Special => values.special = Some(self.expect_string()?.0),
            _ => {
                values.strict_volatile = match self.peek_kind()? {
                    Some(TokenKind::Strict) => true,
                    Some(TokenKind::True | TokenKind::False) => false,
                    _ => return Err(self.error("'strict', 'true' or 'false'")),
                };
                self.bump("'strict', 'true' or 'false'")?;
            }
        }
        Ok(())
    }

    fn parse_stage_retains(&mut self) -> Result<StageRetains, ParseError> {
        let kw = self.bump("'retain'")?;
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.at(TokenKind::RParen)? {
            let (id, loc) = self.expect_name()?;
            params.push(RetainParam {
                node: AstNode::new(loc),
                id,
            });
            self.eat(TokenKind::Comma)?;
        }
        self.expect(TokenKind::RParen)?;
        Ok(StageRetains {
            node: AstNode::new(kw.loc),
            params,
        })
    }

    fn parse_pipeline(&mut self) -> Result<Pipeline, ParseError> {
        let kw = self.bump("'pipeline'")?;
        let (id, _) = self.expect_id()?;
        let open = self.expect(TokenKind::LParen)?;
        let in_params = self.parse_params(Direction::In, &open.loc)?;
        let out_params = self.parse_params(Direction::Out, &open.loc)?;
        self.expect_as(TokenKind::RParen, "'in', 'out' or ')'")?;
        self.expect(TokenKind::LBrace)?;

        let mut calls = Vec::new();
        loop {
            match self.peek_kind()? {
                Some(TokenKind::Call | TokenKind::Map) => calls.push(self.parse_call()?),
                Some(TokenKind::Return) => break,
                _ => return Err(self.error("'call' or 'return'")),
            }
        }
        let ret = self.parse_return()?;
        let retain = if self.at(TokenKind::Retain)? {
            Some(self.parse_pipeline_retains()?)
        } else {
            None
        };
        self.expect(TokenKind::RBrace)?;
        Ok(Pipeline {
            node: AstNode::new(kw.loc),
            id,
            in_params,
            out_params,
            calls,
            ret,
            retain,
        })
    }

    fn parse_call(&mut self) -> Result<CallStm, ParseError> {
        let map_kw = self.eat(TokenKind::Map)?;
        let call_kw = self.expect_as(TokenKind::Call, "'call'")?;
        let mapped = map_kw.is_some();
        let loc = map_kw.map_or(call_kw.loc, |tok| tok.loc);

        let (decl_id, _) = self.expect_id()?;
        let id = if self.eat(TokenKind::As)?.is_some() {
            self.expect_id()?.0
        } else {
            Arc::clone(&decl_id)
        };
        let open = self.expect(TokenKind::LParen)?;
        let bindings = self.parse_bindings(&open.loc, false)?;
        self.expect(TokenKind::RParen)?;
        let modifiers = if self.at(TokenKind::Using)? {
            Some(self.parse_modifiers()?)
        } else {
            None
        };
        Ok(CallStm {
            node: AstNode::new(loc),
            mapped,
            id,
            decl_id,
            bindings,
            modifiers,
        })
    }

    /// Bindings up to, not including, the closing `)`. An empty list sits
    /// at `fallback`.
    fn parse_bindings(
        &mut self,
        fallback: &SourceLoc,
        modifiers: bool,
    ) -> Result<BindStms, ParseError> {
        let mut list = Vec::new();
        while !self.at(TokenKind::RParen)? {
            if modifiers
                && !matches!(
                    self.peek_kind()?,
                    Some(
                        TokenKind::Local
                            | TokenKind::Preflight
                            | TokenKind::Volatile
                            | TokenKind::Disabled
                    )
                )
            {
                return Err(self.error("modifier"));
            }
            list.push(self.parse_binding()?);
            self.eat(TokenKind::Comma)?;
        }
        let loc = list
            .first()
            .map_or_else(|| fallback.clone(), |b| b.node.loc.clone());
        Ok(BindStms {
            node: AstNode::new(loc),
            list,
        })
    }

    fn parse_binding(&mut self) -> Result<BindStm, ParseError> {
        let (id, loc) = self.expect_name()?;
        self.expect(TokenKind::Equals)?;
        let exp = self.parse_exp()?;
        Ok(BindStm {
            node: AstNode::new(loc),
            id,
            exp,
        })
    }

    fn parse_modifiers(&mut self) -> Result<Modifiers, ParseError> {
        let kw = self.bump("'using'")?;
        self.expect(TokenKind::LParen)?;
        let bindings = self.parse_bindings(&kw.loc, true)?;
        self.expect(TokenKind::RParen)?;
        Ok(Modifiers {
            node: AstNode::new(kw.loc),
            bindings,
        })
    }

    fn parse_return(&mut self) -> Result<ReturnStm, ParseError> {
        let kw = self.bump("'return'")?;
        let open = self.expect(TokenKind::LParen)?;
        let bindings = self.parse_bindings(&open.loc, false)?;
        self.expect(TokenKind::RParen)?;
        Ok(ReturnStm {
            node: AstNode::new(kw.loc),
            bindings,
        })
    }

    fn parse_pipeline_retains(&mut self) -> Result<PipelineRetains, ParseError> {
        let kw = self.bump("'retain'")?;
        self.expect(TokenKind::LParen)?;
        let mut refs = Vec::new();
        while !self.at(TokenKind::RParen)? {
            refs.push(self.parse_ref()?);
            self.eat(TokenKind::Comma)?;
        }
        self.expect(TokenKind::RParen)?;
        Ok(PipelineRetains {
            node: AstNode::new(kw.loc),
            refs,
        })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_exp(&mut self) -> Result<Exp, ParseError> {
        let kind = match self.peek_kind()? {
            Some(kind) => kind,
            None => return Err(self.error("expression")),
        };
        let exp = match kind {
            TokenKind::String => {
                let tok = self.bump("a string")?;
                Exp::new(AstNode::new(tok.loc), ExpKind::String(literal::unquote(tok.text)))
            }
            TokenKind::Int => {
                let loc = self.peek_loc();
                let value = self.expect_int()?;
                Exp::new(AstNode::new(loc), ExpKind::Int(value))
            }
            TokenKind::Float => {
                let value = self.peeked.as_ref().and_then(|t| t.text.parse::<f64>().ok());
                match value {
                    Some(value) => {
                        let tok = self.bump("a number")?;
                        Exp::new(AstNode::new(tok.loc), ExpKind::Float(value))
                    }
                    None => return Err(self.error("a number")),
                }
            }
            TokenKind::True | TokenKind::False => {
                let tok = self.bump("expression")?;
                Exp::new(AstNode::new(tok.loc), ExpKind::Bool(kind == TokenKind::True))
            }
            TokenKind::Null => {
                let tok = self.bump("expression")?;
                Exp::new(AstNode::new(tok.loc), ExpKind::Null)
            }
            TokenKind::LBracket => self.parse_array()?,
            TokenKind::LBrace => self.parse_map()?,
            TokenKind::Split => {
                let tok = self.bump("'split'")?;
                let inner = self.parse_exp()?;
                Exp::new(AstNode::new(tok.loc), ExpKind::Split(Box::new(inner)))
            }
            TokenKind::SelfKw | TokenKind::Id => {
                let r = self.parse_ref()?;
                Exp::new(AstNode::new(r.node.loc.clone()), ExpKind::Ref(r))
            }
            _ => return Err(self.error("expression")),
        };
        Ok(exp)
    }

    fn peek_loc(&self) -> SourceLoc {
        match &self.peeked {
            Some(tok) => tok.loc.clone(),
            None => self.lexer.loc(),
        }
    }

    fn parse_array(&mut self) -> Result<Exp, ParseError> {
        let open = self.bump("'['")?;
        let mut elems = Vec::new();
        while !self.at(TokenKind::RBracket)? {
            elems.push(self.parse_exp()?);
            if self.eat(TokenKind::Comma)?.is_none() {
                break;
            }
        }
        self.expect(TokenKind::RBracket)?;
        Ok(Exp::new(AstNode::new(open.loc), ExpKind::Array(elems)))
    }

    fn parse_map(&mut self) -> Result<Exp, ParseError> {
        let open = self.bump("'{'")?;
        let mut entries = Vec::new();
        while !self.at(TokenKind::RBrace)? {
            let key = match self.peek_kind()? {
                Some(TokenKind::String) => {
                    let (key, _) = self.expect_string()?;
                    self.lexer.intern(&key)
                }
                Some(kind) if kind.is_word() => self.expect_name()?.0,
                _ => return Err(self.error("map key")),
            };
            self.expect(TokenKind::Colon)?;
            entries.push((key, self.parse_exp()?));
            if self.eat(TokenKind::Comma)?.is_none() {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(Exp::new(AstNode::new(open.loc), ExpKind::Map(entries)))
    }

    fn parse_ref(&mut self) -> Result<RefExp, ParseError> {
        match self.peek_kind()? {
            Some(TokenKind::SelfKw) => {
                let tok = self.bump("reference")?;
                self.expect(TokenKind::Dot)?;
                let (id, _) = self.expect_name()?;
                let output_id = self.parse_path_tail()?;
                Ok(RefExp {
                    node: AstNode::new(tok.loc),
                    kind: RefKind::SelfRef,
                    id,
                    output_id,
                })
            }
            Some(TokenKind::Id) => {
                let tok = self.bump("reference")?;
                let id = self.symbol(&tok);
                let output_id = self.parse_path_tail()?;
                Ok(RefExp {
                    node: AstNode::new(tok.loc),
                    kind: RefKind::CallRef,
                    id,
                    output_id,
                })
            }
            _ => Err(self.error("reference")),
        }
    }
}
