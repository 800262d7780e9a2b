//! Result-type derivation, the shell half of opcode dispatch.
//!
//! Every shell's result type is computed from its opcode, its declared
//! types and the annotated types of its operands, before any operand is
//! linked. Only the types written in the instruction are consulted, so the
//! result is the same whatever order the shells are built in.

use lir_ast::{InstKind, Opcode, TermKind, TypeRef};
use lir_types::{Idx, TypeData, TypePool};

use crate::error::ResolveError;
use crate::indexing::{aggregate_elem_type, gep_type};
use crate::resolver::{resolve, TypeResolver};

fn shape_error(pool: &TypePool, opcode: Opcode, expected: &'static str, ty: Idx) -> ResolveError {
    ResolveError::TypeShape {
        opcode,
        expected,
        found: pool.display(ty),
    }
}

/// Result type of a non-terminator instruction; [`Idx::VOID`] when it
/// produces no value.
pub fn derive_inst_type(resolver: &dyn TypeResolver, kind: &InstKind) -> Result<Idx, ResolveError> {
    let pool = resolver.pool();
    let ty = |t: &TypeRef| resolve(resolver, t);
    match kind {
        InstKind::Binary { x, .. } => ty(&x.ty),
        InstKind::ExtractElement { x, .. } => extract_element_type(pool, ty(&x.ty)?),
        InstKind::InsertElement { x, .. } => insert_element_type(pool, ty(&x.ty)?),
        InstKind::ShuffleVector { x, mask, .. } => shuffle_type(pool, ty(&x.ty)?, ty(&mask.ty)?),
        InstKind::ExtractValue { x, indices } => aggregate_elem_type(pool, ty(&x.ty)?, indices),
        InstKind::InsertValue { x, .. } => ty(&x.ty),
        InstKind::Alloca {
            elem_ty, addr_space, ..
        } => Ok(pool.pointer_in(ty(elem_ty)?, *addr_space)),
        InstKind::Load { elem_ty, .. } => ty(elem_ty),
        InstKind::Store { .. } | InstKind::Fence { .. } => Ok(Idx::VOID),
        InstKind::CmpXchg { new, .. } => Ok(cmpxchg_type(pool, ty(&new.ty)?)),
        InstKind::AtomicRmw { dst, .. } => atomicrmw_type(pool, ty(&dst.ty)?),
        InstKind::GetElementPtr {
            elem_ty,
            src,
            indices,
            ..
        } => {
            let elem = ty(elem_ty)?;
            let addr_space = pool.pointer_parts(ty(&src.ty)?).map_or(0, |(_, space)| space);
            gep_type(pool, elem, indices, addr_space)
        }
        InstKind::Cast { to, .. } => ty(to),
        InstKind::ICmp { x, .. } => icmp_type(pool, ty(&x.ty)?),
        InstKind::FCmp { x, .. } => fcmp_type(pool, ty(&x.ty)?),
        InstKind::Phi { ty: phi_ty, .. } => ty(phi_ty),
        InstKind::Select { x, .. } => ty(&x.ty),
        InstKind::Call { ret, .. } => Ok(call_type(pool, ty(ret)?)),
        InstKind::VaArg { arg_ty, .. } => ty(arg_ty),
        InstKind::LandingPad { result_ty, .. } => ty(result_ty),
        InstKind::CatchPad { .. } | InstKind::CleanupPad { .. } => Ok(Idx::TOKEN),
        InstKind::Unsupported { opcode } => Err(ResolveError::unsupported(opcode)),
    }
}

/// Result type of a terminator. Only `invoke` (like `call`) and
/// `catchswitch` (a token) produce values.
pub fn derive_term_type(resolver: &dyn TypeResolver, kind: &TermKind) -> Result<Idx, ResolveError> {
    match kind {
        TermKind::Invoke { ret, .. } => Ok(call_type(resolver.pool(), resolve(resolver, ret)?)),
        TermKind::CatchSwitch { .. } => Ok(Idx::TOKEN),
        TermKind::Unsupported { opcode } => Err(ResolveError::unsupported(opcode)),
        TermKind::Ret { .. }
        | TermKind::Br { .. }
        | TermKind::CondBr { .. }
        | TermKind::Switch { .. }
        | TermKind::IndirectBr { .. }
        | TermKind::Resume { .. }
        | TermKind::CatchRet { .. }
        | TermKind::CleanupRet { .. }
        | TermKind::Unreachable => Ok(Idx::VOID),
    }
}

/// Element type of the vector operand of `extractelement`.
pub fn extract_element_type(pool: &TypePool, vector: Idx) -> Result<Idx, ResolveError> {
    pool.vector_parts(vector)
        .map(|(_, elem)| elem)
        .ok_or_else(|| shape_error(pool, Opcode::ExtractElement, "vector type", vector))
}

pub fn insert_element_type(pool: &TypePool, vector: Idx) -> Result<Idx, ResolveError> {
    match pool.vector_parts(vector) {
        Some(_) => Ok(vector),
        None => Err(shape_error(pool, Opcode::InsertElement, "vector type", vector)),
    }
}

/// `<mask_len x elem(x)>`.
pub fn shuffle_type(pool: &TypePool, x: Idx, mask: Idx) -> Result<Idx, ResolveError> {
    let opcode = Opcode::ShuffleVector;
    let (_, elem) = pool
        .vector_parts(x)
        .ok_or_else(|| shape_error(pool, opcode, "vector type", x))?;
    let (len, _) = pool
        .vector_parts(mask)
        .ok_or_else(|| shape_error(pool, opcode, "vector mask type", mask))?;
    Ok(pool.vector(len, elem))
}

/// `{ new, i1 }`: the loaded value and a success flag.
pub fn cmpxchg_type(pool: &TypePool, new: Idx) -> Idx {
    pool.structure(&[new, Idx::I1], false)
}

/// The pointee of the destination pointer.
pub fn atomicrmw_type(pool: &TypePool, dst: Idx) -> Result<Idx, ResolveError> {
    pool.pointer_parts(dst)
        .map(|(elem, _)| elem)
        .ok_or_else(|| shape_error(pool, Opcode::AtomicRmw, "pointer type", dst))
}

/// `i1` for an integer or pointer operand, `<n x i1>` for a vector of `n`.
pub fn icmp_type(pool: &TypePool, operand: Idx) -> Result<Idx, ResolveError> {
    match pool.get(operand) {
        TypeData::Int { .. } | TypeData::Pointer { .. } => Ok(Idx::I1),
        TypeData::Vector { len, .. } => Ok(pool.vector(len, Idx::I1)),
        _ => Err(shape_error(
            pool,
            Opcode::ICmp,
            "integer, pointer or vector type",
            operand,
        )),
    }
}

/// `i1` for a floating-point operand, `<n x i1>` for a vector of `n`.
pub fn fcmp_type(pool: &TypePool, operand: Idx) -> Result<Idx, ResolveError> {
    match pool.get(operand) {
        TypeData::Float(_) => Ok(Idx::I1),
        TypeData::Vector { len, .. } => Ok(pool.vector(len, Idx::I1)),
        _ => Err(shape_error(
            pool,
            Opcode::FCmp,
            "floating-point or vector type",
            operand,
        )),
    }
}

/// Result type of a call written with `declared` as its type.
///
/// The declared type is either the return type itself or the callee's
/// function type, as variadic calls write it. Any other type, including a
/// pointer to a function, is the return type.
pub fn call_type(pool: &TypePool, declared: Idx) -> Idx {
    pool.func_ret(declared).unwrap_or(declared)
}

#[cfg(test)]
mod tests;
