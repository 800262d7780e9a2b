//! Functions and basic blocks.

use lir_ast::LocalIdent;
use lir_types::Idx;

use crate::ids::{BlockId, InstId, ParamId};
use crate::inst::{Inst, Term};
use crate::value::ValueKind;

/// A function parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    pub ident: LocalIdent,
    pub ty: Idx,
}

/// A basic block.
///
/// Instructions are owned by the function's arena; the block lists them in
/// execution order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub id: BlockId,
    pub ident: LocalIdent,
    pub insts: Vec<InstId>,
    pub term: Term,
}

/// A function body.
///
/// Owns every block and, through `insts`, every instruction. Operands refer
/// to other entities by arena handle only.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    /// Global name, without the `@` prefix.
    pub name: String,
    pub ret: Idx,
    pub params: Vec<Param>,
    /// Blocks in definition order. `blocks[0]` is the entry.
    pub blocks: Vec<Block>,
    /// Instruction arena, indexed by [`InstId::index`].
    pub insts: Vec<Inst>,
}

impl Function {
    /// Create an empty function.
    pub fn new(name: String, ret: Idx) -> Self {
        Self {
            name,
            ret,
            params: Vec::new(),
            blocks: Vec::new(),
            insts: Vec::new(),
        }
    }

    /// Add an instruction to the arena without placing it in a block.
    pub fn alloc_inst(&mut self, inst: Inst) -> InstId {
        let id = InstId::from_index(self.insts.len());
        self.insts.push(inst);
        id
    }

    /// Append a block. `block.id` must equal the next sequential index.
    ///
    /// # Panics
    ///
    /// Debug-panics if `block.id` does not match the expected index.
    pub fn push_block(&mut self, block: Block) {
        debug_assert_eq!(
            block.id,
            self.next_block_id(),
            "block ID {} does not match expected index {}",
            block.id.raw(),
            self.blocks.len(),
        );
        self.blocks.push(block);
    }

    /// The [`BlockId`] the next [`push_block`](Self::push_block) will use.
    pub fn next_block_id(&self) -> BlockId {
        BlockId::from_index(self.blocks.len())
    }

    #[inline]
    pub fn inst(&self, id: InstId) -> &Inst {
        &self.insts[id.index()]
    }

    #[inline]
    pub fn inst_mut(&mut self, id: InstId) -> &mut Inst {
        &mut self.insts[id.index()]
    }

    #[inline]
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    #[inline]
    pub fn param(&self, id: ParamId) -> &Param {
        &self.params[id.index()]
    }

    /// The entry block, if the function has a body.
    pub fn entry(&self) -> Option<&Block> {
        self.blocks.first()
    }

    /// Find a block by its label.
    pub fn find_block(&self, ident: &LocalIdent) -> Option<BlockId> {
        self.blocks.iter().find(|b| &b.ident == ident).map(|b| b.id)
    }

    /// Find a value-producing instruction by its result name.
    pub fn find_inst(&self, ident: &LocalIdent) -> Option<InstId> {
        self.insts
            .iter()
            .position(|inst| inst.ident.as_ref() == Some(ident))
            .map(InstId::from_index)
    }

    /// The type of a local operand. `None` for globals and constants, whose
    /// type lives on the operand itself.
    pub fn local_type(&self, kind: &ValueKind) -> Option<Idx> {
        match kind {
            ValueKind::Param(id) => Some(self.param(*id).ty),
            ValueKind::Inst(id) => Some(self.inst(*id).ty),
            ValueKind::TermResult(block) => Some(self.block(*block).term.ty),
            ValueKind::Global(_) | ValueKind::Const(_) => None,
        }
    }

    /// Whether every instruction and terminator has its operands.
    pub fn is_linked(&self) -> bool {
        self.insts.iter().all(Inst::is_linked) && self.blocks.iter().all(|b| b.term.is_linked())
    }
}
