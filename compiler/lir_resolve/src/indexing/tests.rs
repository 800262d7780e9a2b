use lir_ast::{TypeRef, TypedValue};
use lir_types::{Idx, StructBody, TypePool};
use pretty_assertions::assert_eq;
use smallvec::smallvec;

use super::*;

fn idx(n: i64) -> TypedValue {
    TypedValue::int(TypeRef::int(32), n)
}

/// `{ i32, [4 x i8] }`
fn header(pool: &TypePool) -> Idx {
    let bytes = pool.array(4, Idx::I8);
    pool.structure(&[Idx::I32, bytes], false)
}

#[test]
fn gep_walks_struct_then_array() {
    let pool = TypePool::new();
    let s = header(&pool);
    let ty = gep_type(&pool, s, &[idx(0), idx(1), idx(2)], 0);
    assert_eq!(ty, Ok(pool.pointer(Idx::I8)));
}

#[test]
fn gep_first_index_keeps_the_element_type() {
    let pool = TypePool::new();
    let s = header(&pool);
    assert_eq!(gep_type(&pool, s, &[idx(7)], 0), Ok(pool.pointer(s)));
    assert_eq!(gep_type(&pool, s, &[], 0), Ok(pool.pointer(s)));
}

#[test]
fn gep_keeps_the_address_space() {
    let pool = TypePool::new();
    let s = header(&pool);
    assert_eq!(
        gep_type(&pool, s, &[idx(0), idx(0)], 3),
        Ok(pool.pointer_in(Idx::I32, 3))
    );
}

#[test]
fn gep_struct_index_must_be_constant() {
    let pool = TypePool::new();
    let s = header(&pool);
    let err = gep_type(&pool, s, &[idx(0), TypedValue::local(TypeRef::int(32), "i")], 0);
    assert_eq!(
        err,
        Err(ResolveError::NonConstantStructIndex {
            opcode: Opcode::GetElementPtr,
            index: "i32 %i".to_owned(),
        })
    );
}

#[test]
fn gep_array_index_may_be_dynamic() {
    let pool = TypePool::new();
    let arr = pool.array(16, Idx::I64);
    let ty = gep_type(&pool, arr, &[idx(0), TypedValue::local(TypeRef::int(64), 3u32)], 0);
    assert_eq!(ty, Ok(pool.pointer(Idx::I64)));
}

#[test]
fn gep_struct_index_out_of_range() {
    let pool = TypePool::new();
    let s = header(&pool);
    assert_eq!(
        gep_type(&pool, s, &[idx(0), idx(2)], 0),
        Err(ResolveError::IndexOutOfRange {
            opcode: Opcode::GetElementPtr,
            index: 2,
            ty: "{ i32, [4 x i8] }".to_owned(),
        })
    );
    assert!(matches!(
        gep_type(&pool, s, &[idx(0), idx(-1)], 0),
        Err(ResolveError::IndexOutOfRange { index: -1, .. })
    ));
}

#[test]
fn gep_cannot_step_through_a_pointer() {
    let pool = TypePool::new();
    let p = pool.pointer(Idx::I32);
    assert_eq!(
        gep_type(&pool, p, &[idx(0), idx(0)], 0),
        Err(ResolveError::IndexThroughPointer {
            opcode: Opcode::GetElementPtr,
            ty: "i32*".to_owned(),
        })
    );
}

#[test]
fn gep_cannot_step_into_a_scalar() {
    let pool = TypePool::new();
    assert!(matches!(
        gep_type(&pool, Idx::I32, &[idx(0), idx(0)], 0),
        Err(ResolveError::TypeShape { .. })
    ));
}

#[test]
fn gep_through_identified_struct() {
    let pool = TypePool::new();
    let node = pool.declare_named("node");
    let next = pool.pointer(node);
    assert_eq!(
        pool.define_named(
            node,
            StructBody {
                fields: smallvec![Idx::I32, next],
                packed: false,
            },
        ),
        Ok(())
    );
    assert_eq!(gep_type(&pool, node, &[idx(0), idx(1)], 0), Ok(pool.pointer(next)));
}

#[test]
fn extractvalue_path_containment() {
    let pool = TypePool::new();
    let inner = pool.structure(&[Idx::I8, Idx::DOUBLE], false);
    let outer = pool.structure(&[Idx::I32, inner], false);
    assert_eq!(aggregate_elem_type(&pool, outer, &[1]), Ok(inner));
    assert_eq!(aggregate_elem_type(&pool, outer, &[1, 1]), Ok(Idx::DOUBLE));
    assert_eq!(aggregate_elem_type(&pool, outer, &[]), Ok(outer));
}

#[test]
fn extractvalue_array_steps_to_element() {
    let pool = TypePool::new();
    let arr = pool.array(2, pool.structure(&[Idx::I1, Idx::I64], false));
    assert_eq!(aggregate_elem_type(&pool, arr, &[5, 1]), Ok(Idx::I64));
}

#[test]
fn extractvalue_rejects_scalars_and_bad_fields() {
    let pool = TypePool::new();
    let s = header(&pool);
    assert!(matches!(
        aggregate_elem_type(&pool, s, &[0, 0]),
        Err(ResolveError::TypeShape {
            opcode: Opcode::ExtractValue,
            ..
        })
    ));
    assert!(matches!(
        aggregate_elem_type(&pool, s, &[9]),
        Err(ResolveError::IndexOutOfRange { index: 9, .. })
    ));
}

#[test]
fn opaque_struct_cannot_be_indexed() {
    let pool = TypePool::new();
    let opaque = pool.declare_named("opaque");
    assert!(matches!(
        aggregate_elem_type(&pool, opaque, &[0]),
        Err(ResolveError::TypeShape { .. })
    ));
}
