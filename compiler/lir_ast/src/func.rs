//! Function definition syntax.

use crate::{InstNode, LocalIdent, TermNode, TypeRef};

/// A function parameter: `i32 %x` or just `i32`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    pub ty: TypeRef,
    pub name: Option<LocalIdent>,
}

impl Param {
    pub fn new(ty: TypeRef) -> Self {
        Self { ty, name: None }
    }

    pub fn named(ty: TypeRef, name: impl Into<LocalIdent>) -> Self {
        Self {
            ty,
            name: Some(name.into()),
        }
    }
}

/// A basic block: optional label, instructions, and exactly one terminator.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockNode {
    pub name: Option<LocalIdent>,
    pub insts: Vec<InstNode>,
    pub term: TermNode,
}

impl BlockNode {
    pub fn new(insts: Vec<InstNode>, term: TermNode) -> Self {
        Self {
            name: None,
            insts,
            term,
        }
    }

    pub fn named(name: impl Into<LocalIdent>, insts: Vec<InstNode>, term: TermNode) -> Self {
        Self {
            name: Some(name.into()),
            insts,
            term,
        }
    }
}

/// A function definition with a body.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuncDef {
    /// Global name, without the `@` prefix.
    pub name: String,
    pub ret: TypeRef,
    pub params: Vec<Param>,
    pub variadic: bool,
    pub blocks: Vec<BlockNode>,
}

impl FuncDef {
    pub fn new(name: &str, ret: TypeRef, params: Vec<Param>, blocks: Vec<BlockNode>) -> Self {
        Self {
            name: name.to_owned(),
            ret,
            params,
            variadic: false,
            blocks,
        }
    }

    /// The function's own type, `ret (params...)`.
    pub fn sig(&self) -> TypeRef {
        TypeRef::func(
            self.ret.clone(),
            self.params.iter().map(|p| p.ty.clone()).collect(),
            self.variadic,
        )
    }
}
