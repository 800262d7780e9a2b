//! Instruction and terminator syntax.

use crate::ops::{
    AtomicOp, AtomicOrdering, BinaryOp, CastOp, FloatPredicate, IntPredicate, Opcode,
};
use crate::{LocalIdent, TypeRef, TypedValue, ValueRef};

/// A `landingpad` clause.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Clause {
    Catch(TypedValue),
    Filter(TypedValue),
}

/// One non-terminator instruction: an optional result name and its body.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstNode {
    /// `%name = ...`; `None` when the result is unnamed or absent.
    pub name: Option<LocalIdent>,
    pub kind: InstKind,
}

impl InstNode {
    /// An unnamed instruction.
    pub fn new(kind: InstKind) -> Self {
        Self { name: None, kind }
    }

    /// An instruction with an explicit result name.
    pub fn named(name: impl Into<LocalIdent>, kind: InstKind) -> Self {
        Self {
            name: Some(name.into()),
            kind,
        }
    }
}

/// Instruction bodies as parsed, one variant per opcode family.
///
/// Operand types appear exactly where the assembly syntax writes them; the
/// second operand of a binary instruction or comparison shares the type of
/// the first and is therefore untyped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstKind {
    Binary {
        op: BinaryOp,
        x: TypedValue,
        y: ValueRef,
    },
    ExtractElement {
        x: TypedValue,
        index: TypedValue,
    },
    InsertElement {
        x: TypedValue,
        elem: TypedValue,
        index: TypedValue,
    },
    ShuffleVector {
        x: TypedValue,
        y: TypedValue,
        mask: TypedValue,
    },
    ExtractValue {
        x: TypedValue,
        indices: Vec<u64>,
    },
    InsertValue {
        x: TypedValue,
        elem: TypedValue,
        indices: Vec<u64>,
    },
    Alloca {
        elem_ty: TypeRef,
        count: Option<TypedValue>,
        addr_space: u32,
    },
    Load {
        elem_ty: TypeRef,
        src: TypedValue,
        volatile: bool,
    },
    Store {
        src: TypedValue,
        dst: TypedValue,
        volatile: bool,
    },
    Fence {
        ordering: AtomicOrdering,
    },
    CmpXchg {
        ptr: TypedValue,
        cmp: TypedValue,
        new: TypedValue,
        success: AtomicOrdering,
        failure: AtomicOrdering,
    },
    AtomicRmw {
        op: AtomicOp,
        dst: TypedValue,
        x: TypedValue,
        ordering: AtomicOrdering,
    },
    GetElementPtr {
        elem_ty: TypeRef,
        src: TypedValue,
        indices: Vec<TypedValue>,
        in_bounds: bool,
    },
    Cast {
        op: CastOp,
        from: TypedValue,
        to: TypeRef,
    },
    ICmp {
        pred: IntPredicate,
        x: TypedValue,
        y: ValueRef,
    },
    FCmp {
        pred: FloatPredicate,
        x: TypedValue,
        y: ValueRef,
    },
    Phi {
        ty: TypeRef,
        incoming: Vec<(ValueRef, LocalIdent)>,
    },
    Select {
        cond: TypedValue,
        x: TypedValue,
        y: TypedValue,
    },
    /// `call <ret> <callee>(<args>)`. `ret` is either the return type or a
    /// full function type (for variadic callees).
    Call {
        ret: TypeRef,
        callee: ValueRef,
        args: Vec<TypedValue>,
        tail: bool,
    },
    VaArg {
        list: TypedValue,
        arg_ty: TypeRef,
    },
    LandingPad {
        result_ty: TypeRef,
        cleanup: bool,
        clauses: Vec<Clause>,
    },
    CatchPad {
        within: ValueRef,
        args: Vec<TypedValue>,
    },
    CleanupPad {
        within: ValueRef,
        args: Vec<TypedValue>,
    },
    /// An opcode the grammar accepts but resolution does not handle.
    Unsupported {
        opcode: String,
    },
}

impl InstKind {
    /// The opcode tag, or `None` for [`InstKind::Unsupported`].
    pub fn opcode(&self) -> Option<Opcode> {
        let op = match self {
            InstKind::Binary { op, .. } => Opcode::Binary(*op),
            InstKind::Cast { op, .. } => Opcode::Cast(*op),
            InstKind::ExtractElement { .. } => Opcode::ExtractElement,
            InstKind::InsertElement { .. } => Opcode::InsertElement,
            InstKind::ShuffleVector { .. } => Opcode::ShuffleVector,
            InstKind::ExtractValue { .. } => Opcode::ExtractValue,
            InstKind::InsertValue { .. } => Opcode::InsertValue,
            InstKind::Alloca { .. } => Opcode::Alloca,
            InstKind::Load { .. } => Opcode::Load,
            InstKind::Store { .. } => Opcode::Store,
            InstKind::Fence { .. } => Opcode::Fence,
            InstKind::CmpXchg { .. } => Opcode::CmpXchg,
            InstKind::AtomicRmw { .. } => Opcode::AtomicRmw,
            InstKind::GetElementPtr { .. } => Opcode::GetElementPtr,
            InstKind::ICmp { .. } => Opcode::ICmp,
            InstKind::FCmp { .. } => Opcode::FCmp,
            InstKind::Phi { .. } => Opcode::Phi,
            InstKind::Select { .. } => Opcode::Select,
            InstKind::Call { .. } => Opcode::Call,
            InstKind::VaArg { .. } => Opcode::VaArg,
            InstKind::LandingPad { .. } => Opcode::LandingPad,
            InstKind::CatchPad { .. } => Opcode::CatchPad,
            InstKind::CleanupPad { .. } => Opcode::CleanupPad,
            InstKind::Unsupported { .. } => return None,
        };
        Some(op)
    }

    /// The mnemonic, including for unsupported opcodes.
    pub fn mnemonic(&self) -> &str {
        match self {
            InstKind::Unsupported { opcode } => opcode,
            _ => self.opcode().map_or("", Opcode::as_str),
        }
    }
}

/// A block terminator: an optional result name and its body.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TermNode {
    /// Result name of value-producing terminators (`invoke`, `catchswitch`).
    pub name: Option<LocalIdent>,
    pub kind: TermKind,
}

impl TermNode {
    pub fn new(kind: TermKind) -> Self {
        Self { name: None, kind }
    }

    pub fn named(name: impl Into<LocalIdent>, kind: TermKind) -> Self {
        Self {
            name: Some(name.into()),
            kind,
        }
    }
}

/// Terminator bodies as parsed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TermKind {
    Ret {
        value: Option<TypedValue>,
    },
    Br {
        target: LocalIdent,
    },
    CondBr {
        cond: TypedValue,
        then_target: LocalIdent,
        else_target: LocalIdent,
    },
    Switch {
        x: TypedValue,
        default: LocalIdent,
        cases: Vec<(TypedValue, LocalIdent)>,
    },
    IndirectBr {
        addr: TypedValue,
        targets: Vec<LocalIdent>,
    },
    Invoke {
        ret: TypeRef,
        callee: ValueRef,
        args: Vec<TypedValue>,
        normal: LocalIdent,
        unwind: LocalIdent,
    },
    Resume {
        x: TypedValue,
    },
    CatchSwitch {
        within: ValueRef,
        handlers: Vec<LocalIdent>,
        /// `None` means `unwind to caller`.
        unwind: Option<LocalIdent>,
    },
    CatchRet {
        from: ValueRef,
        to: LocalIdent,
    },
    CleanupRet {
        from: ValueRef,
        unwind: Option<LocalIdent>,
    },
    Unreachable,
    Unsupported {
        opcode: String,
    },
}

impl TermKind {
    /// The opcode tag, or `None` for [`TermKind::Unsupported`].
    pub fn opcode(&self) -> Option<Opcode> {
        let op = match self {
            TermKind::Ret { .. } => Opcode::Ret,
            TermKind::Br { .. } => Opcode::Br,
            TermKind::CondBr { .. } => Opcode::CondBr,
            TermKind::Switch { .. } => Opcode::Switch,
            TermKind::IndirectBr { .. } => Opcode::IndirectBr,
            TermKind::Invoke { .. } => Opcode::Invoke,
            TermKind::Resume { .. } => Opcode::Resume,
            TermKind::CatchSwitch { .. } => Opcode::CatchSwitch,
            TermKind::CatchRet { .. } => Opcode::CatchRet,
            TermKind::CleanupRet { .. } => Opcode::CleanupRet,
            TermKind::Unreachable => Opcode::Unreachable,
            TermKind::Unsupported { .. } => return None,
        };
        Some(op)
    }

    pub fn mnemonic(&self) -> &str {
        match self {
            TermKind::Unsupported { opcode } => opcode,
            _ => self.opcode().map_or("", Opcode::as_str),
        }
    }
}
