//! Shared syntax builders for unit tests. Only compiled in test builds.

use lir_ast::ops::BinaryOp;
use lir_ast::{
    BlockNode, FuncDef, InstKind, InstNode, LocalIdent, Param, TermKind, TermNode, TypeRef,
    TypedValue, ValueRef,
};

pub(crate) fn i32_ty() -> TypeRef {
    TypeRef::int(32)
}

pub(crate) fn i32_ptr() -> TypeRef {
    TypeRef::ptr(TypeRef::int(32))
}

/// `<ty> %name`
pub(crate) fn local(ty: TypeRef, name: impl Into<LocalIdent>) -> TypedValue {
    TypedValue::local(ty, name)
}

/// `add i32 %x, <y>`
pub(crate) fn add(x: impl Into<LocalIdent>, y: i64) -> InstKind {
    InstKind::Binary {
        op: BinaryOp::Add,
        x: local(i32_ty(), x),
        y: ValueRef::int(y),
    }
}

/// `call void @callee()`
pub(crate) fn void_call(callee: &str) -> InstKind {
    InstKind::Call {
        ret: TypeRef::Void,
        callee: ValueRef::global(callee),
        args: vec![],
        tail: false,
    }
}

/// `store i32 <v>, i32* %ptr`
pub(crate) fn store(v: i64, ptr: impl Into<LocalIdent>) -> InstKind {
    InstKind::Store {
        src: TypedValue::int(i32_ty(), v),
        dst: local(i32_ptr(), ptr),
        volatile: false,
    }
}

/// `ret i32 %name`
pub(crate) fn ret(name: impl Into<LocalIdent>) -> TermNode {
    TermNode::new(TermKind::Ret {
        value: Some(local(i32_ty(), name)),
    })
}

pub(crate) fn ret_void() -> TermNode {
    TermNode::new(TermKind::Ret { value: None })
}

/// `br label %target`
pub(crate) fn br(target: impl Into<LocalIdent>) -> TermNode {
    TermNode::new(TermKind::Br {
        target: target.into(),
    })
}

pub(crate) fn inst(kind: InstKind) -> InstNode {
    InstNode::new(kind)
}

pub(crate) fn named(name: impl Into<LocalIdent>, kind: InstKind) -> InstNode {
    InstNode::named(name, kind)
}

/// `define i32 @f(<params>) { <blocks> }`
pub(crate) fn func(params: Vec<Param>, blocks: Vec<BlockNode>) -> FuncDef {
    FuncDef::new("f", i32_ty(), params, blocks)
}
