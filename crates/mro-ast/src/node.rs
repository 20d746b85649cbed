// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Fields and traversal shared by every AST node.

use crate::{CommentBlock, SourceLoc};

/// Base data embedded in every node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AstNode {
    pub loc: SourceLoc,
    /// Comments directly above this node, with no blank line in between.
    pub comments: Vec<String>,
    /// Comments in front of this node's subtree that were separated from it
    /// by a blank line.
    pub scope_comments: Vec<CommentBlock>,
}

impl AstNode {
    pub fn new(loc: SourceLoc) -> Self {
        Self {
            loc,
            comments: Vec::new(),
            scope_comments: Vec::new(),
        }
    }

    pub fn line(&self) -> u32 {
        self.loc.line
    }
}

/// Tree-walking capability implemented by every node type.
pub trait Node {
    fn node(&self) -> &AstNode;

    fn node_mut(&mut self) -> &mut AstNode;

    /// Direct children, in source order.
    fn subnodes(&self) -> Vec<&dyn Node> {
        Vec::new()
    }

    fn subnodes_mut(&mut self) -> Vec<&mut dyn Node> {
        Vec::new()
    }

    /// True for list containers whose leading comments document their first
    /// element. A node returning true must have at least one child.
    fn inherits_comments(&self) -> bool {
        false
    }
}

/// Depth-first, pre-order traversal.
pub fn walk<F: FnMut(&dyn Node)>(node: &dyn Node, f: &mut F) {
    f(node);
    for child in node.subnodes() {
        walk(child, f);
    }
}

macro_rules! impl_leaf_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::node::Node for $ty {
                fn node(&self) -> &$crate::node::AstNode {
                    &self.node
                }

                fn node_mut(&mut self) -> &mut $crate::node::AstNode {
                    &mut self.node
                }
            }
        )*
    };
}

pub(crate) use impl_leaf_node;
