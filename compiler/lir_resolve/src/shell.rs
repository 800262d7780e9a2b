//! Shell construction, the first resolution phase.
//!
//! Builds every parameter, block, instruction shell and terminator shell of
//! a function without linking any operand, and registers each identified
//! entity in the locals table. Afterwards every local the body can name is
//! known, so operands may be linked in any order.

use lir_ast::{FuncDef, LocalIdent, Opcode};
use lir_ir::{Block, Function, Inst, Param, ParamId, Term};
use lir_types::Idx;

use crate::derive::{derive_inst_type, derive_term_type};
use crate::error::ResolveError;
use crate::ids::IdCounter;
use crate::locals::{Local, LocalsTable};
use crate::resolver::{resolve, TypeResolver};

/// Result types of one block's shells, derived ahead of numbering.
struct BlockTypes {
    insts: Vec<Idx>,
    term: Idx,
}

/// Build the shells of `def` and the table of its locals.
pub(crate) fn build_shells(
    def: &FuncDef,
    resolver: &dyn TypeResolver,
) -> Result<(Function, LocalsTable), ResolveError> {
    // Types come first: whether an instruction is numbered depends on
    // whether it produces a value (a `call` may return `void`).
    let ret = resolve(resolver, &def.ret)?;
    let param_tys = def
        .params
        .iter()
        .map(|param| resolve(resolver, &param.ty))
        .collect::<Result<Vec<_>, _>>()?;
    let block_tys = def
        .blocks
        .iter()
        .map(|block| {
            let insts = block
                .insts
                .iter()
                .map(|inst| derive_inst_type(resolver, &inst.kind))
                .collect::<Result<Vec<_>, _>>()?;
            let term = derive_term_type(resolver, &block.term.kind)?;
            Ok(BlockTypes { insts, term })
        })
        .collect::<Result<Vec<_>, ResolveError>>()?;

    let mut ids = IdCounter::for_function(def);
    let mut func = Function::new(def.name.clone(), ret);
    let mut locals = LocalsTable::new();

    for (param, ty) in def.params.iter().zip(param_tys) {
        let ident = ids.name(param.name.as_ref())?;
        let id = ParamId::from_index(func.params.len());
        locals.insert(ident.clone(), Local::Param(id))?;
        func.params.push(Param { ident, ty });
    }

    for (node, tys) in def.blocks.iter().zip(block_tys) {
        let id = func.next_block_id();
        let ident = ids.name(node.name.as_ref())?;
        locals.insert(ident.clone(), Local::Block(id))?;

        let mut insts = Vec::with_capacity(node.insts.len());
        for (inst, ty) in node.insts.iter().zip(tys.insts) {
            let opcode = inst
                .kind
                .opcode()
                .ok_or_else(|| ResolveError::unsupported(inst.kind.mnemonic()))?;
            let ident = identify(&mut ids, inst.name.as_ref(), opcode, ty)?;
            let inst_id = func.alloc_inst(Inst::shell(ident.clone(), opcode, ty));
            if let Some(ident) = ident {
                locals.insert(ident, Local::Inst(inst_id))?;
            }
            tracing::trace!(inst = inst_id.raw(), %opcode, ty = ty.raw(), "built shell");
            insts.push(inst_id);
        }

        let opcode = node
            .term
            .kind
            .opcode()
            .ok_or_else(|| ResolveError::unsupported(node.term.kind.mnemonic()))?;
        let term_ident = identify(&mut ids, node.term.name.as_ref(), opcode, tys.term)?;
        if let Some(term_ident) = &term_ident {
            locals.insert(term_ident.clone(), Local::Term(id))?;
        }

        func.push_block(Block {
            id,
            ident,
            insts,
            term: Term::shell(term_ident, opcode, tys.term),
        });
    }

    Ok((func, locals))
}

/// Name a shell. A written name on a shell that yields no value could
/// never be referenced and is rejected.
fn identify(
    ids: &mut IdCounter,
    explicit: Option<&LocalIdent>,
    opcode: Opcode,
    ty: Idx,
) -> Result<Option<LocalIdent>, ResolveError> {
    if ty.is_void() {
        if let Some(ident) = explicit {
            return Err(ResolveError::NamedVoidValue {
                ident: ident.clone(),
                opcode,
            });
        }
    }
    ids.assign(explicit, !ty.is_void())
}
