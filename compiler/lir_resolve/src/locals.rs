//! Per-function table of local identifiers.
//!
//! Built while shells are created and read-only afterwards. Entries are
//! `Copy` handles into the function's arenas, so any entity may refer to any
//! other regardless of textual order.

use lir_ast::LocalIdent;
use lir_ir::{BlockId, InstId, ParamId, ValueKind};
use rustc_hash::FxHashMap;

use crate::error::{LocalKind, ResolveError};

/// What a local identifier denotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Local {
    Param(ParamId),
    Block(BlockId),
    Inst(InstId),
    /// Result of the value-producing terminator of a block.
    Term(BlockId),
}

impl Local {
    pub fn kind(self) -> LocalKind {
        match self {
            Local::Param(_) => LocalKind::Param,
            Local::Block(_) => LocalKind::Block,
            Local::Inst(_) | Local::Term(_) => LocalKind::Value,
        }
    }
}

/// Identifier → entity map for one function.
#[derive(Clone, Debug, Default)]
pub struct LocalsTable {
    map: FxHashMap<LocalIdent, Local>,
}

impl LocalsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `ident`. Each identifier may be defined once per function.
    pub fn insert(&mut self, ident: LocalIdent, local: Local) -> Result<(), ResolveError> {
        use std::collections::hash_map::Entry;

        match self.map.entry(ident) {
            Entry::Occupied(entry) => Err(ResolveError::DuplicateDefinition {
                ident: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                tracing::trace!(ident = %entry.key(), ?local, "registered local");
                entry.insert(local);
                Ok(())
            }
        }
    }

    pub fn get(&self, ident: &LocalIdent) -> Result<Local, ResolveError> {
        self.map
            .get(ident)
            .copied()
            .ok_or_else(|| ResolveError::Unresolved {
                ident: ident.clone(),
            })
    }

    /// Look up an operand: a parameter or an instruction/terminator result.
    pub fn value(&self, ident: &LocalIdent) -> Result<ValueKind, ResolveError> {
        match self.get(ident)? {
            Local::Param(id) => Ok(ValueKind::Param(id)),
            Local::Inst(id) => Ok(ValueKind::Inst(id)),
            Local::Term(block) => Ok(ValueKind::TermResult(block)),
            Local::Block(_) => Err(ResolveError::KindMismatch {
                ident: ident.clone(),
                expected: LocalKind::Value,
                found: LocalKind::Block,
            }),
        }
    }

    /// Look up a branch target or phi predecessor.
    pub fn block(&self, ident: &LocalIdent) -> Result<BlockId, ResolveError> {
        match self.get(ident)? {
            Local::Block(id) => Ok(id),
            other => Err(ResolveError::KindMismatch {
                ident: ident.clone(),
                expected: LocalKind::Block,
                found: other.kind(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
