//! Instructions and terminators.
//!
//! Both start life as *shells*: identity, opcode and result type, with
//! `body: None`. Resolution fills in the body once every local in the
//! function is known. The result type is fixed when the shell is created.

use lir_ast::ops::{AtomicOp, AtomicOrdering, BinaryOp, CastOp, FloatPredicate, IntPredicate};
use lir_ast::{LocalIdent, Opcode};
use lir_types::Idx;

use crate::ids::BlockId;
use crate::value::Value;

/// A linked `landingpad` clause.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Clause {
    Catch(Value),
    Filter(Value),
}

/// Linked operands of an instruction, one variant per opcode family.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstBody {
    Binary {
        op: BinaryOp,
        x: Value,
        y: Value,
    },
    ExtractElement {
        x: Value,
        index: Value,
    },
    InsertElement {
        x: Value,
        elem: Value,
        index: Value,
    },
    ShuffleVector {
        x: Value,
        y: Value,
        mask: Value,
    },
    ExtractValue {
        x: Value,
        indices: Vec<u64>,
    },
    InsertValue {
        x: Value,
        elem: Value,
        indices: Vec<u64>,
    },
    Alloca {
        elem_ty: Idx,
        count: Option<Value>,
    },
    Load {
        elem_ty: Idx,
        src: Value,
        volatile: bool,
    },
    Store {
        src: Value,
        dst: Value,
        volatile: bool,
    },
    Fence {
        ordering: AtomicOrdering,
    },
    CmpXchg {
        ptr: Value,
        cmp: Value,
        new: Value,
        success: AtomicOrdering,
        failure: AtomicOrdering,
    },
    AtomicRmw {
        op: AtomicOp,
        dst: Value,
        x: Value,
        ordering: AtomicOrdering,
    },
    GetElementPtr {
        elem_ty: Idx,
        src: Value,
        indices: Vec<Value>,
        in_bounds: bool,
    },
    Cast {
        op: CastOp,
        from: Value,
    },
    ICmp {
        pred: IntPredicate,
        x: Value,
        y: Value,
    },
    FCmp {
        pred: FloatPredicate,
        x: Value,
        y: Value,
    },
    Phi {
        incoming: Vec<(Value, BlockId)>,
    },
    Select {
        cond: Value,
        x: Value,
        y: Value,
    },
    Call {
        callee: Value,
        args: Vec<Value>,
        tail: bool,
    },
    VaArg {
        list: Value,
    },
    LandingPad {
        cleanup: bool,
        clauses: Vec<Clause>,
    },
    CatchPad {
        within: Value,
        args: Vec<Value>,
    },
    CleanupPad {
        within: Value,
        args: Vec<Value>,
    },
}

/// An instruction: shell identity plus, once linked, its operands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inst {
    /// Explicit or assigned name; `None` for void instructions.
    pub ident: Option<LocalIdent>,
    pub opcode: Opcode,
    /// Result type; [`Idx::VOID`] when the instruction produces no value.
    pub ty: Idx,
    pub body: Option<InstBody>,
}

impl Inst {
    /// Create an operand-less shell.
    pub fn shell(ident: Option<LocalIdent>, opcode: Opcode, ty: Idx) -> Self {
        Self {
            ident,
            opcode,
            ty,
            body: None,
        }
    }

    /// Whether this instruction yields a value (and so may be referenced).
    #[inline]
    pub fn produces_value(&self) -> bool {
        !self.ty.is_void()
    }

    #[inline]
    pub fn is_linked(&self) -> bool {
        self.body.is_some()
    }
}

/// Linked operands of a terminator.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TermBody {
    Ret {
        value: Option<Value>,
    },
    Br {
        target: BlockId,
    },
    CondBr {
        cond: Value,
        then_block: BlockId,
        else_block: BlockId,
    },
    Switch {
        x: Value,
        default: BlockId,
        cases: Vec<(Value, BlockId)>,
    },
    IndirectBr {
        addr: Value,
        targets: Vec<BlockId>,
    },
    Invoke {
        callee: Value,
        args: Vec<Value>,
        normal: BlockId,
        unwind: BlockId,
    },
    Resume {
        x: Value,
    },
    CatchSwitch {
        within: Value,
        handlers: Vec<BlockId>,
        unwind: Option<BlockId>,
    },
    CatchRet {
        from: Value,
        to: BlockId,
    },
    CleanupRet {
        from: Value,
        unwind: Option<BlockId>,
    },
    Unreachable,
}

impl TermBody {
    /// Successor blocks in operand order.
    pub fn successors(&self) -> Vec<BlockId> {
        match self {
            TermBody::Br { target } => vec![*target],
            TermBody::CondBr {
                then_block,
                else_block,
                ..
            } => vec![*then_block, *else_block],
            TermBody::Switch { default, cases, .. } => {
                let mut succs = Vec::with_capacity(1 + cases.len());
                succs.push(*default);
                succs.extend(cases.iter().map(|(_, b)| *b));
                succs
            }
            TermBody::IndirectBr { targets, .. } => targets.clone(),
            TermBody::Invoke { normal, unwind, .. } => vec![*normal, *unwind],
            TermBody::CatchSwitch {
                handlers, unwind, ..
            } => {
                let mut succs = handlers.clone();
                succs.extend(*unwind);
                succs
            }
            TermBody::CatchRet { to, .. } => vec![*to],
            TermBody::CleanupRet { unwind, .. } => unwind.iter().copied().collect(),
            TermBody::Ret { .. } | TermBody::Resume { .. } | TermBody::Unreachable => vec![],
        }
    }
}

/// A block terminator: shell identity plus, once linked, its operands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Term {
    /// Name of the result for `invoke`/`catchswitch`; otherwise `None`.
    pub ident: Option<LocalIdent>,
    pub opcode: Opcode,
    pub ty: Idx,
    pub body: Option<TermBody>,
}

impl Term {
    pub fn shell(ident: Option<LocalIdent>, opcode: Opcode, ty: Idx) -> Self {
        Self {
            ident,
            opcode,
            ty,
            body: None,
        }
    }

    #[inline]
    pub fn produces_value(&self) -> bool {
        !self.ty.is_void()
    }

    #[inline]
    pub fn is_linked(&self) -> bool {
        self.body.is_some()
    }
}
