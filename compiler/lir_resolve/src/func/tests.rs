use lir_ast::ops::IntPredicate;
use lir_ast::{BlockNode, InstKind, LocalIdent, Param, TermKind, TermNode, TypeRef, ValueRef};
use lir_ir::{BlockId, InstBody, InstId, ParamId, TermBody, Value, ValueKind};
use lir_types::Idx;
use pretty_assertions::assert_eq;

use super::*;
use crate::link::StandardLinker;
use crate::resolver::ModuleTypes;
use crate::test_helpers::{add, br, func, i32_ty, inst, local, named, ret};

/// define i32 @count(i32 %n) {
/// entry:
///   br label %loop
/// loop:
///   %i = phi i32 [ 0, %entry ], [ %next, %loop ]
///   %next = add i32 %i, 1
///   %done = icmp eq i32 %next, %n
///   br i1 %done, label %exit, label %loop
/// exit:
///   ret i32 %next
/// }
fn counting_loop() -> FuncDef {
    func(
        vec![Param::named(i32_ty(), "n")],
        vec![
            BlockNode::named("entry", vec![], br("loop")),
            BlockNode::named(
                "loop",
                vec![
                    named(
                        "i",
                        InstKind::Phi {
                            ty: i32_ty(),
                            incoming: vec![
                                (ValueRef::int(0), "entry".into()),
                                (ValueRef::local("next"), "loop".into()),
                            ],
                        },
                    ),
                    named("next", add("i", 1)),
                    named(
                        "done",
                        InstKind::ICmp {
                            pred: IntPredicate::Eq,
                            x: local(i32_ty(), "next"),
                            y: ValueRef::local("n"),
                        },
                    ),
                ],
                TermNode::new(TermKind::CondBr {
                    cond: local(TypeRef::int(1), "done"),
                    then_target: "exit".into(),
                    else_target: "loop".into(),
                }),
            ),
            BlockNode::named("exit", vec![], ret("next")),
        ],
    )
}

fn inst_value(n: u32, ty: Idx) -> Value {
    Value::new(ty, ValueKind::Inst(InstId::new(n)))
}

// ── Phase ordering ──────────────────────────────────────────

#[test]
fn phases_advance_in_order() {
    let def = counting_loop();
    let types = ModuleTypes::new();
    let mut state = FuncResolver::new(&def, &types, &StandardLinker);
    assert_eq!(state.phase(), Phase::Unindexed);
    state.index().unwrap();
    assert_eq!(state.phase(), Phase::Indexed);
    assert_eq!(state.func().insts.len(), 3);
    assert_eq!(state.locals().len(), 7);
    state.link_instructions().unwrap();
    assert_eq!(state.phase(), Phase::InstructionsLinked);
    assert!(state.func().insts.iter().all(|inst| inst.is_linked()));
    assert!(!state.func().blocks[0].term.is_linked());
    state.link_terminators().unwrap();
    assert_eq!(state.phase(), Phase::TerminatorsLinked);
    let func = state.finish().unwrap();
    assert!(func.is_linked());
}

#[test]
fn out_of_order_calls_are_rejected() {
    let def = counting_loop();
    let types = ModuleTypes::new();
    let mut state = FuncResolver::new(&def, &types, &StandardLinker);
    assert_eq!(
        state.link_instructions(),
        Err(ResolveError::PhaseOrder {
            expected: Phase::Indexed,
            found: Phase::Unindexed,
        })
    );
    state.index().unwrap();
    assert_eq!(
        state.index(),
        Err(ResolveError::PhaseOrder {
            expected: Phase::Unindexed,
            found: Phase::Indexed,
        })
    );
    assert_eq!(
        state.link_terminators(),
        Err(ResolveError::PhaseOrder {
            expected: Phase::InstructionsLinked,
            found: Phase::Indexed,
        })
    );
    // Misuse does not poison the resolver.
    assert_eq!(state.phase(), Phase::Indexed);
    assert_eq!(
        state.finish(),
        Err(ResolveError::PhaseOrder {
            expected: Phase::TerminatorsLinked,
            found: Phase::Indexed,
        })
    );
}

#[test]
fn failure_poisons_the_resolver() {
    let def = func(
        vec![],
        vec![BlockNode::new(vec![inst(add("missing", 1))], ret(1u32))],
    );
    let types = ModuleTypes::new();
    let mut state = FuncResolver::new(&def, &types, &StandardLinker);
    state.index().unwrap();
    assert_eq!(
        state.link_instructions(),
        Err(ResolveError::Unresolved {
            ident: LocalIdent::from("missing")
        })
    );
    assert_eq!(state.phase(), Phase::Failed);
    assert!(matches!(
        state.link_terminators(),
        Err(ResolveError::PhaseOrder {
            found: Phase::Failed,
            ..
        })
    ));
    assert!(state.finish().is_err());
}

// ── Linking ─────────────────────────────────────────────────

#[test]
fn forward_and_backward_references_agree() {
    let def = counting_loop();
    let types = ModuleTypes::new();
    let func = resolve_function(&def, &types, &StandardLinker).unwrap();

    let next = inst_value(1, Idx::I32);
    let Some(InstBody::Phi { incoming }) = &func.insts[0].body else {
        panic!("expected phi, got {:?}", func.insts[0].body);
    };
    assert_eq!(
        incoming,
        &vec![
            (
                Value::new(Idx::I32, ValueKind::Const(lir_ast::Constant::Int(0))),
                BlockId::new(0)
            ),
            (next.clone(), BlockId::new(1)),
        ]
    );

    // `%next` used forward by the phi and backward by `ret` is one entity.
    assert_eq!(
        func.blocks[2].term.body,
        Some(TermBody::Ret {
            value: Some(next.clone())
        })
    );
    assert_eq!(
        func.insts[2].body,
        Some(InstBody::ICmp {
            pred: IntPredicate::Eq,
            x: next,
            y: Value::new(Idx::I32, ValueKind::Param(ParamId::new(0))),
        })
    );
    assert_eq!(
        func.blocks[1].term.body,
        Some(TermBody::CondBr {
            cond: inst_value(2, Idx::I1),
            then_block: BlockId::new(2),
            else_block: BlockId::new(1),
        })
    );
    assert_eq!(
        func.blocks[0].term.body,
        Some(TermBody::Br {
            target: BlockId::new(1)
        })
    );
}

#[test]
fn branch_to_a_value_is_a_kind_mismatch() {
    let def = func(
        vec![Param::named(i32_ty(), "x")],
        vec![BlockNode::new(vec![], br("x"))],
    );
    let types = ModuleTypes::new();
    assert_eq!(
        resolve_function(&def, &types, &StandardLinker),
        Err(ResolveError::KindMismatch {
            ident: LocalIdent::from("x"),
            expected: crate::LocalKind::Block,
            found: crate::LocalKind::Param,
        })
    );
}

#[test]
fn empty_body_resolves_to_an_empty_function() {
    let def = func(vec![Param::new(i32_ty())], vec![]);
    let types = ModuleTypes::new();
    let func = resolve_function(&def, &types, &StandardLinker).unwrap();
    assert!(func.blocks.is_empty());
    assert_eq!(func.params[0].ident, LocalIdent::Id(0));
}
