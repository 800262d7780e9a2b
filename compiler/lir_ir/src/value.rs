//! Linked operands.

use lir_ast::Constant;
use lir_types::Idx;

use crate::ids::{BlockId, InstId, ParamId};

/// What a linked operand refers to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    Param(ParamId),
    Inst(InstId),
    /// Result of the value-producing terminator of a block (`invoke`,
    /// `catchswitch`).
    TermResult(BlockId),
    /// Module-level symbol, kept by name.
    Global(String),
    Const(Constant),
}

/// A linked operand with its resolved type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Value {
    pub ty: Idx,
    pub kind: ValueKind,
}

impl Value {
    pub fn new(ty: Idx, kind: ValueKind) -> Self {
        Self { ty, kind }
    }

    /// The instruction this operand refers to, if it is an instruction result.
    pub fn as_inst(&self) -> Option<InstId> {
        match self.kind {
            ValueKind::Inst(id) => Some(id),
            _ => None,
        }
    }

    /// The parameter this operand refers to, if any.
    pub fn as_param(&self) -> Option<ParamId> {
        match self.kind {
            ValueKind::Param(id) => Some(id),
            _ => None,
        }
    }
}
