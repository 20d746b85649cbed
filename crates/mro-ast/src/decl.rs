// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Declaration AST nodes.

use std::fmt;
use std::sync::Arc;

use crate::exp::{Exp, RefExp};
use crate::node::{impl_leaf_node, AstNode, Node};

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decl {
    /// `@include "file.mro"`
    Include(Include),
    /// `filetype bam;`
    Filetype(FiletypeDecl),
    Struct(StructDecl),
    Stage(Stage),
    Pipeline(Pipeline),
    /// The top-level call that instantiates a pipeline.
    Call(CallStm),
}

impl Decl {
    fn inner(&self) -> &dyn Node {
        match self {
            Decl::Include(d) => d,
            Decl::Filetype(d) => d,
            Decl::Struct(d) => d,
            Decl::Stage(d) => d,
            Decl::Pipeline(d) => d,
            Decl::Call(d) => d,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Node {
        match self {
            Decl::Include(d) => d,
            Decl::Filetype(d) => d,
            Decl::Struct(d) => d,
            Decl::Stage(d) => d,
            Decl::Pipeline(d) => d,
            Decl::Call(d) => d,
        }
    }

    /// The declared name, for declarations that have one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Decl::Include(_) => None,
            Decl::Filetype(d) => Some(&*d.id),
            Decl::Struct(d) => Some(&*d.id),
            Decl::Stage(d) => Some(&*d.id),
            Decl::Pipeline(d) => Some(&*d.id),
            Decl::Call(d) => Some(&*d.id),
        }
    }
}

impl Node for Decl {
    fn node(&self) -> &AstNode {
        self.inner().node()
    }

    fn node_mut(&mut self) -> &mut AstNode {
        self.inner_mut().node_mut()
    }

    fn subnodes(&self) -> Vec<&dyn Node> {
        self.inner().subnodes()
    }

    fn subnodes_mut(&mut self) -> Vec<&mut dyn Node> {
        self.inner_mut().subnodes_mut()
    }

    fn inherits_comments(&self) -> bool {
        self.inner().inherits_comments()
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Include {
    pub node: AstNode,
    /// The path as written, unquoted.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FiletypeDecl {
    pub node: AstNode,
    /// Possibly dotted extension, e.g. `bam.bai`.
    pub id: Arc<str>,
}

/// A parameter or member type, e.g. `int`, `bam[]` or `map<float[]>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeId {
    pub tname: Arc<str>,
    pub array_dim: u16,
    /// Zero for non-map types; otherwise one more than the array depth of the
    /// map's element type.
    pub map_dim: u16,
}

impl TypeId {
    pub fn new(tname: Arc<str>) -> Self {
        Self { tname, array_dim: 0, map_dim: 0 }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.map_dim > 0 {
            write!(f, "map<{}", self.tname)?;
            for _ in 1..self.map_dim {
                write!(f, "[]")?;
            }
            write!(f, ">")?;
        } else {
            write!(f, "{}", self.tname)?;
        }
        for _ in 0..self.array_dim {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructDecl {
    pub node: AstNode,
    pub id: Arc<str>,
    pub members: Vec<StructMember>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructMember {
    pub node: AstNode,
    pub tname: TypeId,
    pub id: Arc<str>,
    pub help: Option<String>,
    pub out_name: Option<String>,
}

impl Node for StructDecl {
    fn node(&self) -> &AstNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut AstNode {
        &mut self.node
    }

    fn subnodes(&self) -> Vec<&dyn Node> {
        self.members.iter().map(|m| m as &dyn Node).collect()
    }

    fn subnodes_mut(&mut self) -> Vec<&mut dyn Node> {
        self.members.iter_mut().map(|m| m as &mut dyn Node).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    In,
    Out,
}

/// An `in` or `out` parameter of a stage, pipeline or split.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    pub node: AstNode,
    pub direction: Direction,
    pub tname: TypeId,
    pub id: Arc<str>,
    pub help: Option<String>,
    /// Output file name override (`out` parameters only).
    pub out_name: Option<String>,
}

/// The `in` or the `out` parameters of a callable.
///
/// Located at its first parameter, so a comment above that parameter is
/// collected by the list and then handed down to the parameter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamList {
    pub node: AstNode,
    pub params: Vec<Param>,
}

impl ParamList {
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Param> {
        self.params.iter().find(|p| &*p.id == id)
    }
}

impl Node for ParamList {
    fn node(&self) -> &AstNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut AstNode {
        &mut self.node
    }

    fn subnodes(&self) -> Vec<&dyn Node> {
        self.params.iter().map(|p| p as &dyn Node).collect()
    }

    fn subnodes_mut(&mut self) -> Vec<&mut dyn Node> {
        self.params.iter_mut().map(|p| p as &mut dyn Node).collect()
    }

    fn inherits_comments(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SrcLang {
    Python,
    Exec,
    Compiled,
}

impl SrcLang {
    pub fn keyword(self) -> &'static str {
        match self {
            SrcLang::Python => "py",
            SrcLang::Exec => "exec",
            SrcLang::Compiled => "comp",
        }
    }
}

/// `src py "path arg..."`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SrcParam {
    pub node: AstNode,
    pub lang: SrcLang,
    pub path: String,
    pub args: Vec<String>,
}

/// The `split (...)` parameters of a stage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitParams {
    pub node: AstNode,
    pub in_params: ParamList,
    pub out_params: ParamList,
}

/// Stage-level `using (...)` resource requests.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceValues {
    pub mem_gb: Option<i64>,
    pub vmem_gb: Option<i64>,
    pub threads: Option<i64>,
    pub special: Option<String>,
    pub strict_volatile: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resources {
    pub node: AstNode,
    pub values: ResourceValues,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetainParam {
    pub node: AstNode,
    pub id: Arc<str>,
}

/// Stage-level `retain (...)`: outputs kept after the pipeline finishes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageRetains {
    pub node: AstNode,
    pub params: Vec<RetainParam>,
}

impl Node for StageRetains {
    fn node(&self) -> &AstNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut AstNode {
        &mut self.node
    }

    fn subnodes(&self) -> Vec<&dyn Node> {
        self.params.iter().map(|p| p as &dyn Node).collect()
    }

    fn subnodes_mut(&mut self) -> Vec<&mut dyn Node> {
        self.params.iter_mut().map(|p| p as &mut dyn Node).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stage {
    pub node: AstNode,
    pub id: Arc<str>,
    pub in_params: ParamList,
    pub out_params: ParamList,
    pub src: SrcParam,
    pub split: Option<SplitParams>,
    pub resources: Option<Resources>,
    pub retain: Option<StageRetains>,
}

impl Node for Stage {
    fn node(&self) -> &AstNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut AstNode {
        &mut self.node
    }

    fn subnodes(&self) -> Vec<&dyn Node> {
        let mut nodes: Vec<&dyn Node> = Vec::new();
        if !self.in_params.is_empty() {
            nodes.push(&self.in_params);
        }
        if !self.out_params.is_empty() {
            nodes.push(&self.out_params);
        }
        nodes.push(&self.src);
        if let Some(split) = &self.split {
            nodes.push(split);
        }
        if let Some(resources) = &self.resources {
            nodes.push(resources);
        }
        if let Some(retain) = &self.retain {
            nodes.push(retain);
        }
        nodes
    }

    fn subnodes_mut(&mut self) -> Vec<&mut dyn Node> {
        let mut nodes: Vec<&mut dyn Node> = Vec::new();
        if !self.in_params.is_empty() {
            nodes.push(&mut self.in_params);
        }
        if !self.out_params.is_empty() {
            nodes.push(&mut self.out_params);
        }
        nodes.push(&mut self.src);
        if let Some(split) = &mut self.split {
            nodes.push(split);
        }
        if let Some(resources) = &mut self.resources {
            nodes.push(resources);
        }
        if let Some(retain) = &mut self.retain {
            nodes.push(retain);
        }
        nodes
    }
}

impl Node for SplitParams {
    fn node(&self) -> &AstNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut AstNode {
        &mut self.node
    }

    fn subnodes(&self) -> Vec<&dyn Node> {
        let mut nodes: Vec<&dyn Node> = Vec::new();
        if !self.in_params.is_empty() {
            nodes.push(&self.in_params);
        }
        if !self.out_params.is_empty() {
            nodes.push(&self.out_params);
        }
        nodes
    }

    fn subnodes_mut(&mut self) -> Vec<&mut dyn Node> {
        let mut nodes: Vec<&mut dyn Node> = Vec::new();
        if !self.in_params.is_empty() {
            nodes.push(&mut self.in_params);
        }
        if !self.out_params.is_empty() {
            nodes.push(&mut self.out_params);
        }
        nodes
    }
}

/// `id = exp`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindStm {
    pub node: AstNode,
    pub id: Arc<str>,
    pub exp: Exp,
}

impl Node for BindStm {
    fn node(&self) -> &AstNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut AstNode {
        &mut self.node
    }

    fn subnodes(&self) -> Vec<&dyn Node> {
        vec![&self.exp as &dyn Node]
    }

    fn subnodes_mut(&mut self) -> Vec<&mut dyn Node> {
        vec![&mut self.exp as &mut dyn Node]
    }
}

/// A parenthesized list of bindings, located at its first binding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindStms {
    pub node: AstNode,
    pub list: Vec<BindStm>,
}

impl BindStms {
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&BindStm> {
        self.list.iter().find(|b| &*b.id == id)
    }
}

impl Node for BindStms {
    fn node(&self) -> &AstNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut AstNode {
        &mut self.node
    }

    fn subnodes(&self) -> Vec<&dyn Node> {
        self.list.iter().map(|b| b as &dyn Node).collect()
    }

    fn subnodes_mut(&mut self) -> Vec<&mut dyn Node> {
        self.list.iter_mut().map(|b| b as &mut dyn Node).collect()
    }

    fn inherits_comments(&self) -> bool {
        true
    }
}

/// Call-level `using (...)`: `local`, `preflight`, `volatile`, `disabled`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifiers {
    pub node: AstNode,
    pub bindings: BindStms,
}

/// `[map] call STAGE [as ALIAS] (bindings) [using (modifiers)]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallStm {
    pub node: AstNode,
    pub mapped: bool,
    /// The name the call is referred to by: the alias if given, else `decl_id`.
    pub id: Arc<str>,
    /// The stage or pipeline being called.
    pub decl_id: Arc<str>,
    pub bindings: BindStms,
    pub modifiers: Option<Modifiers>,
}

impl Node for CallStm {
    fn node(&self) -> &AstNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut AstNode {
        &mut self.node
    }

    fn subnodes(&self) -> Vec<&dyn Node> {
        let mut nodes: Vec<&dyn Node> = Vec::new();
        if !self.bindings.is_empty() {
            nodes.push(&self.bindings);
        }
        if let Some(modifiers) = &self.modifiers {
            nodes.push(modifiers);
        }
        nodes
    }

    fn subnodes_mut(&mut self) -> Vec<&mut dyn Node> {
        let mut nodes: Vec<&mut dyn Node> = Vec::new();
        if !self.bindings.is_empty() {
            nodes.push(&mut self.bindings);
        }
        if let Some(modifiers) = &mut self.modifiers {
            nodes.push(modifiers);
        }
        nodes
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReturnStm {
    pub node: AstNode,
    pub bindings: BindStms,
}

macro_rules! impl_bindings_holder {
    ($($ty:ty),*) => {
        $(
            impl Node for $ty {
                fn node(&self) -> &AstNode {
                    &self.node
                }

                fn node_mut(&mut self) -> &mut AstNode {
                    &mut self.node
                }

                fn subnodes(&self) -> Vec<&dyn Node> {
                    if self.bindings.is_empty() {
                        Vec::new()
                    } else {
                        vec![&self.bindings as &dyn Node]
                    }
                }

                fn subnodes_mut(&mut self) -> Vec<&mut dyn Node> {
                    if self.bindings.is_empty() {
                        Vec::new()
                    } else {
                        vec![&mut self.bindings as &mut dyn Node]
                    }
                }
            }
        )*
    };
}

impl_bindings_holder!(Modifiers, ReturnStm);

/// Pipeline-level `retain (...)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineRetains {
    pub node: AstNode,
    pub refs: Vec<RefExp>,
}

impl Node for PipelineRetains {
    fn node(&self) -> &AstNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut AstNode {
        &mut self.node
    }

    fn subnodes(&self) -> Vec<&dyn Node> {
        self.refs.iter().map(|r| r as &dyn Node).collect()
    }

    fn subnodes_mut(&mut self) -> Vec<&mut dyn Node> {
        self.refs.iter_mut().map(|r| r as &mut dyn Node).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pipeline {
    pub node: AstNode,
    pub id: Arc<str>,
    pub in_params: ParamList,
    pub out_params: ParamList,
    pub calls: Vec<CallStm>,
    pub ret: ReturnStm,
    pub retain: Option<PipelineRetains>,
}

impl Pipeline {
    pub fn call(&self, id: &str) -> Option<&CallStm> {
        self.calls.iter().find(|c| &*c.id == id)
    }
}

impl Node for Pipeline {
    fn node(&self) -> &AstNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut AstNode {
        &mut self.node
    }

    fn subnodes(&self) -> Vec<&dyn Node> {
        let mut nodes: Vec<&dyn Node> = Vec::new();
        if !self.in_params.is_empty() {
            nodes.push(&self.in_params);
        }
        if !self.out_params.is_empty() {
            nodes.push(&self.out_params);
        }
        nodes.extend(self.calls.iter().map(|c| c as &dyn Node));
        nodes.push(&self.ret);
        if let Some(retain) = &self.retain {
            nodes.push(retain);
        }
        nodes
    }

    fn subnodes_mut(&mut self) -> Vec<&mut dyn Node> {
        let mut nodes: Vec<&mut dyn Node> = Vec::new();
        if !self.in_params.is_empty() {
            nodes.push(&mut self.in_params);
        }
        if !self.out_params.is_empty() {
            nodes.push(&mut self.out_params);
        }
        nodes.extend(self.calls.iter_mut().map(|c| c as &mut dyn Node));
        nodes.push(&mut self.ret);
        if let Some(retain) = &mut self.retain {
            nodes.push(retain);
        }
        nodes
    }
}

impl_leaf_node!(
    Include,
    FiletypeDecl,
    StructMember,
    Param,
    SrcParam,
    Resources,
    RetainParam,
);
