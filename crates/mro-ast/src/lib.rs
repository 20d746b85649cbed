// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for the MRO pipeline language.
//!
//! This crate defines the source locations, token kinds, comment blocks and
//! AST nodes shared between the lexer, the parser and downstream consumers.

pub mod comment;
pub mod decl;
pub mod exp;
pub mod loc;
pub mod node;
pub mod token;

pub use comment::CommentBlock;
pub use decl::Decl;
pub use loc::{LineMap, SourceFile, SourceLoc};
pub use node::{AstNode, Node};

/// A parsed compilation unit.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ast {
    /// Top-level declarations in source order.
    pub decls: Vec<Decl>,
    /// Comments not owned by any declaration (those after the last one).
    pub comments: Vec<CommentBlock>,
}

impl Ast {
    pub fn new(decls: Vec<Decl>) -> Self {
        Self { decls, comments: Vec::new() }
    }

    /// Direct children of the root, in source order.
    pub fn subnodes(&self) -> Vec<&dyn Node> {
        self.decls.iter().map(|d| d as &dyn Node).collect()
    }

    pub fn subnodes_mut(&mut self) -> Vec<&mut dyn Node> {
        self.decls.iter_mut().map(|d| d as &mut dyn Node).collect()
    }

    /// Visit every node of the tree, depth-first in source order.
    pub fn for_each_node<F: FnMut(&dyn Node)>(&self, mut f: F) {
        for decl in self.subnodes() {
            node::walk(decl, &mut f);
        }
    }

    pub fn stages(&self) -> impl Iterator<Item = &decl::Stage> {
        self.decls.iter().filter_map(|d| match d {
            Decl::Stage(s) => Some(s),
            _ => None,
        })
    }

    pub fn pipelines(&self) -> impl Iterator<Item = &decl::Pipeline> {
        self.decls.iter().filter_map(|d| match d {
            Decl::Pipeline(p) => Some(p),
            _ => None,
        })
    }

    /// The top-level call, if the file has one.
    pub fn call(&self) -> Option<&decl::CallStm> {
        self.decls.iter().find_map(|d| match d {
            Decl::Call(c) => Some(c),
            _ => None,
        })
    }
}
