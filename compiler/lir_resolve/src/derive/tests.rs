use lir_ast::ops::{AtomicOp, AtomicOrdering, BinaryOp, CastOp, FloatPredicate, IntPredicate};
use lir_ast::{InstKind, Opcode, TermKind, TypeRef, TypedValue, ValueRef};
use lir_types::Idx;
use pretty_assertions::assert_eq;

use super::*;
use crate::resolver::ModuleTypes;
use crate::test_helpers::{i32_ty, i32_ptr, local};

fn derive(kind: &InstKind) -> (ModuleTypes, Result<Idx, ResolveError>) {
    let types = ModuleTypes::new();
    let ty = derive_inst_type(&types, kind);
    (types, ty)
}

#[test]
fn binary_takes_first_operand_type() {
    let (_, ty) = derive(&InstKind::Binary {
        op: BinaryOp::Add,
        x: local(TypeRef::int(64), "a"),
        y: ValueRef::int(1),
    });
    assert_eq!(ty, Ok(Idx::I64));
}

#[test]
fn icmp_scalar_and_vector() {
    let (_, scalar) = derive(&InstKind::ICmp {
        pred: IntPredicate::Eq,
        x: local(i32_ty(), "a"),
        y: ValueRef::int(0),
    });
    assert_eq!(scalar, Ok(Idx::I1));

    let (types, vector) = derive(&InstKind::ICmp {
        pred: IntPredicate::Slt,
        x: local(TypeRef::vector(4, i32_ty()), "v"),
        y: ValueRef::local("w"),
    });
    assert_eq!(vector, Ok(types.pool().vector(4, Idx::I1)));

    let (_, pointer) = derive(&InstKind::ICmp {
        pred: IntPredicate::Ne,
        x: local(i32_ptr(), "p"),
        y: ValueRef::Const(lir_ast::Constant::Null),
    });
    assert_eq!(pointer, Ok(Idx::I1));
}

#[test]
fn icmp_rejects_floats() {
    let (_, ty) = derive(&InstKind::ICmp {
        pred: IntPredicate::Eq,
        x: local(TypeRef::double(), "d"),
        y: ValueRef::local("e"),
    });
    assert_eq!(
        ty,
        Err(ResolveError::TypeShape {
            opcode: Opcode::ICmp,
            expected: "integer, pointer or vector type",
            found: "double".to_owned(),
        })
    );
}

#[test]
fn fcmp_scalar_and_vector() {
    let (_, scalar) = derive(&InstKind::FCmp {
        pred: FloatPredicate::Olt,
        x: local(TypeRef::float(), "a"),
        y: ValueRef::local("b"),
    });
    assert_eq!(scalar, Ok(Idx::I1));

    let (types, vector) = derive(&InstKind::FCmp {
        pred: FloatPredicate::Oeq,
        x: local(TypeRef::vector(4, TypeRef::float()), "a"),
        y: ValueRef::local("b"),
    });
    assert_eq!(vector, Ok(types.pool().vector(4, Idx::I1)));

    let (_, int) = derive(&InstKind::FCmp {
        pred: FloatPredicate::Oeq,
        x: local(i32_ty(), "a"),
        y: ValueRef::local("b"),
    });
    assert!(matches!(int, Err(ResolveError::TypeShape { opcode: Opcode::FCmp, .. })));
}

#[test]
fn vector_element_ops() {
    let v4 = TypeRef::vector(4, TypeRef::float());
    let (_, extract) = derive(&InstKind::ExtractElement {
        x: local(v4.clone(), "v"),
        index: TypedValue::int(i32_ty(), 0),
    });
    assert_eq!(extract, Ok(Idx::FLOAT));

    let (types, insert) = derive(&InstKind::InsertElement {
        x: local(v4.clone(), "v"),
        elem: local(TypeRef::float(), "f"),
        index: TypedValue::int(i32_ty(), 1),
    });
    assert_eq!(insert, Ok(types.pool().vector(4, Idx::FLOAT)));

    let (types, shuffle) = derive(&InstKind::ShuffleVector {
        x: local(v4.clone(), "a"),
        y: local(v4, "b"),
        mask: TypedValue::new(
            TypeRef::vector(8, i32_ty()),
            ValueRef::Const(lir_ast::Constant::ZeroInitializer),
        ),
    });
    assert_eq!(shuffle, Ok(types.pool().vector(8, Idx::FLOAT)));

    let (_, bad) = derive(&InstKind::ExtractElement {
        x: local(i32_ty(), "s"),
        index: TypedValue::int(i32_ty(), 0),
    });
    assert!(matches!(
        bad,
        Err(ResolveError::TypeShape {
            opcode: Opcode::ExtractElement,
            ..
        })
    ));
}

#[test]
fn memory_ops() {
    let (types, alloca) = derive(&InstKind::Alloca {
        elem_ty: TypeRef::array(8, TypeRef::int(8)),
        count: None,
        addr_space: 5,
    });
    let pool = types.pool();
    assert_eq!(alloca, Ok(pool.pointer_in(pool.array(8, Idx::I8), 5)));

    let (_, load) = derive(&InstKind::Load {
        elem_ty: i32_ty(),
        src: local(i32_ptr(), "p"),
        volatile: false,
    });
    assert_eq!(load, Ok(Idx::I32));

    let (_, store) = derive(&InstKind::Store {
        src: TypedValue::int(i32_ty(), 1),
        dst: local(i32_ptr(), "p"),
        volatile: true,
    });
    assert_eq!(store, Ok(Idx::VOID));

    let (_, fence) = derive(&InstKind::Fence {
        ordering: AtomicOrdering::SeqCst,
    });
    assert_eq!(fence, Ok(Idx::VOID));
}

#[test]
fn atomics() {
    let (types, cmpxchg) = derive(&InstKind::CmpXchg {
        ptr: local(i32_ptr(), "p"),
        cmp: TypedValue::int(i32_ty(), 0),
        new: TypedValue::int(i32_ty(), 1),
        success: AtomicOrdering::AcqRel,
        failure: AtomicOrdering::Acquire,
    });
    assert_eq!(cmpxchg, Ok(types.pool().structure(&[Idx::I32, Idx::I1], false)));

    let (_, rmw) = derive(&InstKind::AtomicRmw {
        op: AtomicOp::Add,
        dst: local(TypeRef::ptr(TypeRef::int(64)), "p"),
        x: TypedValue::int(TypeRef::int(64), 1),
        ordering: AtomicOrdering::Monotonic,
    });
    assert_eq!(rmw, Ok(Idx::I64));

    let (_, bad) = derive(&InstKind::AtomicRmw {
        op: AtomicOp::Xchg,
        dst: local(i32_ty(), "p"),
        x: TypedValue::int(i32_ty(), 1),
        ordering: AtomicOrdering::Monotonic,
    });
    assert!(matches!(
        bad,
        Err(ResolveError::TypeShape {
            opcode: Opcode::AtomicRmw,
            ..
        })
    ));
}

#[test]
fn gep_uses_source_address_space() {
    let (types, ty) = derive(&InstKind::GetElementPtr {
        elem_ty: TypeRef::array(4, i32_ty()),
        src: local(
            TypeRef::Pointer {
                elem: Box::new(TypeRef::array(4, i32_ty())),
                addr_space: 1,
            },
            "p",
        ),
        indices: vec![TypedValue::int(i32_ty(), 0), TypedValue::int(i32_ty(), 3)],
        in_bounds: true,
    });
    assert_eq!(ty, Ok(types.pool().pointer_in(Idx::I32, 1)));
}

#[test]
fn cast_phi_select_vaarg_take_declared_types() {
    let (_, cast) = derive(&InstKind::Cast {
        op: CastOp::ZExt,
        from: local(TypeRef::int(8), "b"),
        to: TypeRef::int(64),
    });
    assert_eq!(cast, Ok(Idx::I64));

    let (_, phi) = derive(&InstKind::Phi {
        ty: TypeRef::double(),
        incoming: vec![],
    });
    assert_eq!(phi, Ok(Idx::DOUBLE));

    let (_, select) = derive(&InstKind::Select {
        cond: local(TypeRef::int(1), "c"),
        x: local(TypeRef::int(16), "a"),
        y: local(TypeRef::int(16), "b"),
    });
    assert_eq!(select, Ok(Idx::I16));

    let (_, va_arg) = derive(&InstKind::VaArg {
        list: local(TypeRef::ptr(TypeRef::int(8)), "ap"),
        arg_ty: i32_ty(),
    });
    assert_eq!(va_arg, Ok(Idx::I32));
}

#[test]
fn call_return_types() {
    let call = |ret: TypeRef| InstKind::Call {
        ret,
        callee: ValueRef::global("f"),
        args: vec![],
        tail: false,
    };
    assert_eq!(derive(&call(TypeRef::Void)).1, Ok(Idx::VOID));
    assert_eq!(derive(&call(i32_ty())).1, Ok(Idx::I32));

    let variadic = TypeRef::func(i32_ty(), vec![TypeRef::ptr(TypeRef::int(8))], true);
    assert_eq!(derive(&call(variadic)).1, Ok(Idx::I32));

    let (types, ptr) = derive(&call(TypeRef::ptr(TypeRef::int(8))));
    assert_eq!(ptr, Ok(types.pool().pointer(Idx::I8)));
}

#[test]
fn call_returning_function_pointer() {
    // %fp = call void ()* @get_handler()
    let handler = TypeRef::ptr(TypeRef::func(TypeRef::Void, vec![], false));
    let (types, ty) = derive(&InstKind::Call {
        ret: handler,
        callee: ValueRef::global("get_handler"),
        args: vec![],
        tail: false,
    });
    let pool = types.pool();
    assert_eq!(ty, Ok(pool.pointer(pool.function(Idx::VOID, &[], false))));

    // Same for `invoke`.
    let term = derive_term_type(
        &types,
        &TermKind::Invoke {
            ret: TypeRef::ptr(TypeRef::func(i32_ty(), vec![i32_ty()], false)),
            callee: ValueRef::global("get_op"),
            args: vec![],
            normal: "ok".into(),
            unwind: "lp".into(),
        },
    );
    assert_eq!(term, Ok(pool.pointer(pool.function(Idx::I32, &[Idx::I32], false))));
}

#[test]
fn pads_are_tokens() {
    let (_, pad) = derive(&InstKind::CleanupPad {
        within: ValueRef::Const(lir_ast::Constant::None),
        args: vec![],
    });
    assert_eq!(pad, Ok(Idx::TOKEN));
}

#[test]
fn unresolvable_declared_type() {
    let (_, ty) = derive(&InstKind::Load {
        elem_ty: TypeRef::named("Missing"),
        src: local(TypeRef::ptr(TypeRef::named("Missing")), "p"),
        volatile: false,
    });
    assert!(matches!(
        ty,
        Err(ResolveError::TypeResolution { ref ty, .. }) if ty == "%Missing"
    ));
}

#[test]
fn unsupported_opcode() {
    let (_, ty) = derive(&InstKind::Unsupported {
        opcode: "freeze".to_owned(),
    });
    assert_eq!(
        ty,
        Err(ResolveError::Unsupported {
            opcode: "freeze".to_owned()
        })
    );
}

#[test]
fn terminator_types() {
    let types = ModuleTypes::new();
    let invoke = TermKind::Invoke {
        ret: i32_ty(),
        callee: ValueRef::global("may_throw"),
        args: vec![],
        normal: "ok".into(),
        unwind: "lpad".into(),
    };
    assert_eq!(derive_term_type(&types, &invoke), Ok(Idx::I32));
    assert_eq!(
        derive_term_type(
            &types,
            &TermKind::CatchSwitch {
                within: ValueRef::Const(lir_ast::Constant::None),
                handlers: vec!["h".into()],
                unwind: None,
            }
        ),
        Ok(Idx::TOKEN)
    );
    assert_eq!(
        derive_term_type(&types, &TermKind::Br { target: "x".into() }),
        Ok(Idx::VOID)
    );
    assert_eq!(
        derive_term_type(
            &types,
            &TermKind::Unsupported {
                opcode: "callbr".to_owned()
            }
        ),
        Err(ResolveError::Unsupported {
            opcode: "callbr".to_owned()
        })
    );
}
