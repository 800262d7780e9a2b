//! Indexed type walks for `extractvalue` and `getelementptr`.

use lir_ast::{Opcode, TypedValue};
use lir_types::{Idx, TypeData, TypePool};

use crate::error::ResolveError;

fn shape_error(pool: &TypePool, opcode: Opcode, expected: &'static str, ty: Idx) -> ResolveError {
    ResolveError::TypeShape {
        opcode,
        expected,
        found: pool.display(ty),
    }
}

/// Step into field `index` of a struct type (literal or identified).
fn struct_field(pool: &TypePool, opcode: Opcode, ty: Idx, index: i64) -> Result<Idx, ResolveError> {
    let body = pool
        .struct_body(ty)
        .ok_or_else(|| shape_error(pool, opcode, "sized struct type", ty))?;
    usize::try_from(index)
        .ok()
        .and_then(|i| body.fields.get(i).copied())
        .ok_or_else(|| ResolveError::IndexOutOfRange {
            opcode,
            index,
            ty: pool.display(ty),
        })
}

/// The type reached by indexing into aggregate `ty` along `indices`.
///
/// Arrays step to their element type, structs to the indexed field. The
/// array length is not checked.
pub fn aggregate_elem_type(pool: &TypePool, ty: Idx, indices: &[u64]) -> Result<Idx, ResolveError> {
    let opcode = Opcode::ExtractValue;
    indices.iter().try_fold(ty, |cur, &index| match pool.get(cur) {
        TypeData::Array { elem, .. } => Ok(elem),
        TypeData::Struct { .. } | TypeData::Named(_) => {
            struct_field(pool, opcode, cur, i64::try_from(index).unwrap_or(i64::MAX))
        }
        _ => Err(shape_error(pool, opcode, "aggregate type", cur)),
    })
}

/// The result type of a `getelementptr` over `elem` with `indices`.
///
/// The first index steps over the source pointer itself and leaves the type
/// unchanged. Every later index steps into the current type; struct steps
/// need an integer literal. The result points to the final type in
/// `addr_space`.
pub fn gep_type(
    pool: &TypePool,
    elem: Idx,
    indices: &[TypedValue],
    addr_space: u32,
) -> Result<Idx, ResolveError> {
    let opcode = Opcode::GetElementPtr;
    let target = indices.iter().skip(1).try_fold(elem, |cur, index| match pool.get(cur) {
        TypeData::Vector { elem, .. } | TypeData::Array { elem, .. } => Ok(elem),
        TypeData::Struct { .. } | TypeData::Named(_) => {
            let field = index.value.as_int().ok_or_else(|| ResolveError::NonConstantStructIndex {
                opcode,
                index: index.to_string(),
            })?;
            struct_field(pool, opcode, cur, field)
        }
        TypeData::Pointer { .. } => Err(ResolveError::IndexThroughPointer {
            opcode,
            ty: pool.display(cur),
        }),
        _ => Err(shape_error(pool, opcode, "aggregate or vector type", cur)),
    })?;
    Ok(pool.pointer_in(target, addr_space))
}

#[cfg(test)]
mod tests;
