// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Value expressions: literals, collections and references.

use std::sync::Arc;

use crate::node::{impl_leaf_node, AstNode, Node};

/// A value expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exp {
    pub node: AstNode,
    pub kind: ExpKind,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExpKind {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// String literal, unescaped.
    String(String),
    Array(Vec<Exp>),
    /// Map or struct literal. Keys keep their source order.
    Map(Vec<(Arc<str>, Exp)>),
    /// `split <exp>` inside a mapped call.
    Split(Box<Exp>),
    Ref(RefExp),
}

impl Exp {
    pub fn new(node: AstNode, kind: ExpKind) -> Self {
        Self { node, kind }
    }

    pub fn as_ref_exp(&self) -> Option<&RefExp> {
        match &self.kind {
            ExpKind::Ref(r) => Some(r),
            _ => None,
        }
    }
}

impl Node for Exp {
    fn node(&self) -> &AstNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut AstNode {
        &mut self.node
    }

    fn subnodes(&self) -> Vec<&dyn Node> {
        match &self.kind {
            ExpKind::Array(elems) => elems.iter().map(|e| e as &dyn Node).collect(),
            ExpKind::Map(entries) => entries.iter().map(|(_, v)| v as &dyn Node).collect(),
            ExpKind::Split(inner) => vec![&**inner as &dyn Node],
            _ => Vec::new(),
        }
    }

    fn subnodes_mut(&mut self) -> Vec<&mut dyn Node> {
        match &mut self.kind {
            ExpKind::Array(elems) => elems.iter_mut().map(|e| e as &mut dyn Node).collect(),
            ExpKind::Map(entries) => entries
                .iter_mut()
                .map(|(_, v)| v as &mut dyn Node)
                .collect(),
            ExpKind::Split(inner) => vec![&mut **inner as &mut dyn Node],
            _ => Vec::new(),
        }
    }
}

/// What a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RefKind {
    /// `self.param`: an input of the enclosing pipeline.
    SelfRef,
    /// `STAGE.output`: an output of a call in the same pipeline.
    CallRef,
}

/// A reference to a pipeline input or a call output.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefExp {
    pub node: AstNode,
    pub kind: RefKind,
    /// Parameter name for `self` refs, call name otherwise.
    pub id: Arc<str>,
    /// Dotted path after `id`, if any (`sum` in `SUM.sum`, `a.b` in `self.x.a.b`
    /// has id `x` and output `a.b`).
    pub output_id: Option<Arc<str>>,
}

impl_leaf_node!(RefExp);

impl std::fmt::Display for RefExp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind == RefKind::SelfRef {
            write!(f, "self.")?;
        }
        write!(f, "{}", self.id)?;
        if let Some(out) = &self.output_id {
            write!(f, ".{}", out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SourceFile, SourceLoc};

    fn node(line: u32) -> AstNode {
        AstNode::new(SourceLoc::new(line, Arc::new(SourceFile::new("t.mro"))))
    }

    #[test]
    fn array_children_in_order() {
        let exp = Exp::new(
            node(1),
            ExpKind::Array(vec![
                Exp::new(node(2), ExpKind::Int(1)),
                Exp::new(node(3), ExpKind::Int(2)),
            ]),
        );
        let lines: Vec<u32> = exp.subnodes().iter().map(|n| n.node().line()).collect();
        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn ref_display() {
        let r = RefExp {
            node: node(1),
            kind: RefKind::SelfRef,
            id: "values".into(),
            output_id: None,
        };
        assert_eq!(r.to_string(), "self.values");

        let r = RefExp {
            node: node(1),
            kind: RefKind::CallRef,
            id: "SUM_SQUARES".into(),
            output_id: Some("sum".into()),
        };
        assert_eq!(r.to_string(), "SUM_SQUARES.sum");
    }
}
