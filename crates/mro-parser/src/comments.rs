// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Attaches collected comments to the nodes they document.
//!
//! Comments are handed out in one depth-first, source-order walk. A node
//! takes every remaining comment at or above its line. The unbroken run of
//! comment lines directly above the node becomes its `comments`; anything
//! separated from the node by a blank line becomes `scope_comments`.

use std::collections::VecDeque;

use mro_ast::{Ast, AstNode, CommentBlock, Node};

use crate::error::InternalError;

/// Sorted comments with front-to-back consumption.
pub struct CommentList {
    comments: VecDeque<CommentBlock>,
}

impl CommentList {
    pub fn new(comments: Vec<CommentBlock>) -> Self {
        Self {
            comments: comments.into(),
        }
    }

    /// Peek at the next unconsumed comment without advancing.
    pub fn peek_next(&self) -> Option<&CommentBlock> {
        self.comments.front()
    }

    pub fn advance(&mut self) -> Option<CommentBlock> {
        self.comments.pop_front()
    }

    /// Take all comments on or before `line`.
    pub fn take_through(&mut self, line: u32) -> Vec<CommentBlock> {
        let mut result = Vec::new();
        while self.peek_next().is_some_and(|c| c.line() <= line) {
            if let Some(c) = self.advance() {
                result.push(c);
            }
        }
        result
    }

    /// Drain any remaining comments.
    pub fn take_rest(&mut self) -> Vec<CommentBlock> {
        self.comments.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

/// Give `node` the comments above it, replacing whatever it had.
pub fn attach(list: &mut CommentList, node: &mut AstNode) {
    let mut scope = Vec::new();
    let mut run: Vec<CommentBlock> = Vec::new();
    for comment in list.take_through(node.line()) {
        if run.last().is_some_and(|last| last.line() + 1 < comment.line()) {
            scope.append(&mut run);
        }
        run.push(comment);
    }
    if run.last().is_some_and(|last| last.line() + 1 < node.line()) {
        scope.append(&mut run);
    }
    node.scope_comments = scope;
    node.comments = run.into_iter().map(|c| c.text).collect();
}

/// Attach comments throughout the subtree under `node`.
///
/// `node` itself must already have been given its comments.
pub fn compile(list: &mut CommentList, node: &mut dyn Node) -> Result<(), InternalError> {
    for child in node.subnodes_mut() {
        attach(list, child.node_mut());
        compile(list, child)?;
    }
    if node.inherits_comments() {
        let mut scope = std::mem::take(&mut node.node_mut().scope_comments);
        let mut comments = std::mem::take(&mut node.node_mut().comments);
        let loc = node.node().loc.clone();
        let mut children = node.subnodes_mut();
        let Some(first) = children.first_mut() else {
            return Err(InternalError::NoInheritor { loc });
        };
        let first = first.node_mut();
        scope.append(&mut first.scope_comments);
        first.scope_comments = scope;
        comments.append(&mut first.comments);
        first.comments = comments;
    }
    Ok(())
}

/// Run the attachment pass over a freshly parsed unit.
///
/// Takes the raw comments from `ast.comments`. Whatever follows the last
/// declaration is put back there.
pub fn compile_comments(ast: &mut Ast) -> Result<(), InternalError> {
    let mut list = CommentList::new(std::mem::take(&mut ast.comments));
    for decl in &mut ast.decls {
        attach(&mut list, decl.node_mut());
        compile(&mut list, decl)?;
    }
    ast.comments = list.take_rest();
    Ok(())
}
