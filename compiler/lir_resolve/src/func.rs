//! Local resolution of one function.
//!
//! [`FuncResolver`] is an explicit state machine over [`Phase`]:
//!
//! ```text
//! Unindexed --index--> Indexed --link_instructions--> InstructionsLinked
//!           --link_terminators--> TerminatorsLinked --finish--> Function
//! ```
//!
//! Indexing builds every shell and the locals table. Both linking walks then
//! see every local of the function, so forward references (phis, branches to
//! later blocks) resolve exactly like backward ones. Any error moves the
//! resolver to [`Phase::Failed`]; a failed resolver never yields a function.

use lir_ast::FuncDef;
use lir_ir::{Function, InstBody, InstId, TermBody};
use lir_types::Idx;
use tracing::{debug, trace};

use crate::error::ResolveError;
use crate::link::{InstLinker, LinkContext};
use crate::locals::LocalsTable;
use crate::resolver::TypeResolver;
use crate::shell::build_shells;

/// Resolution progress of a [`FuncResolver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Unindexed,
    /// Shells built, locals registered.
    Indexed,
    InstructionsLinked,
    TerminatorsLinked,
    /// A phase failed; nothing further can run.
    Failed,
}

/// Resolves one function definition.
pub struct FuncResolver<'a> {
    def: &'a FuncDef,
    resolver: &'a dyn TypeResolver,
    linker: &'a dyn InstLinker,
    func: Function,
    locals: LocalsTable,
    phase: Phase,
}

impl<'a> FuncResolver<'a> {
    pub fn new(def: &'a FuncDef, resolver: &'a dyn TypeResolver, linker: &'a dyn InstLinker) -> Self {
        Self {
            def,
            resolver,
            linker,
            func: Function::new(def.name.clone(), Idx::VOID),
            locals: LocalsTable::new(),
            phase: Phase::Unindexed,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The function as built so far. Shells exist from [`Phase::Indexed`].
    pub fn func(&self) -> &Function {
        &self.func
    }

    pub fn locals(&self) -> &LocalsTable {
        &self.locals
    }

    /// Build every shell and register every local.
    pub fn index(&mut self) -> Result<(), ResolveError> {
        self.expect(Phase::Unindexed)?;
        let built = build_shells(self.def, self.resolver);
        let (func, locals) = self.check(built)?;
        debug!(
            func = %self.def.name,
            blocks = func.blocks.len(),
            insts = func.insts.len(),
            locals = locals.len(),
            "indexed function"
        );
        self.func = func;
        self.locals = locals;
        self.phase = Phase::Indexed;
        Ok(())
    }

    /// Link the operands of every non-terminator instruction.
    pub fn link_instructions(&mut self) -> Result<(), ResolveError> {
        self.expect(Phase::Indexed)?;
        let bodies = self.inst_bodies();
        for (id, body) in self.check(bodies)? {
            self.func.inst_mut(id).body = Some(body);
        }
        debug!(func = %self.def.name, "linked instructions");
        self.phase = Phase::InstructionsLinked;
        Ok(())
    }

    /// Link the operands of every terminator.
    pub fn link_terminators(&mut self) -> Result<(), ResolveError> {
        self.expect(Phase::InstructionsLinked)?;
        let bodies = self.term_bodies();
        let bodies = self.check(bodies)?;
        for (block, body) in self.func.blocks.iter_mut().zip(bodies) {
            block.term.body = Some(body);
        }
        debug!(func = %self.def.name, "linked terminators");
        self.phase = Phase::TerminatorsLinked;
        Ok(())
    }

    /// Hand back the linked function, dropping the locals table.
    pub fn finish(self) -> Result<Function, ResolveError> {
        if self.phase != Phase::TerminatorsLinked {
            return Err(ResolveError::PhaseOrder {
                expected: Phase::TerminatorsLinked,
                found: self.phase,
            });
        }
        debug_assert!(self.func.is_linked());
        Ok(self.func)
    }

    fn expect(&self, expected: Phase) -> Result<(), ResolveError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(ResolveError::PhaseOrder {
                expected,
                found: self.phase,
            })
        }
    }

    /// Poison the resolver if `result` is an error.
    fn check<T>(&mut self, result: Result<T, ResolveError>) -> Result<T, ResolveError> {
        if let Err(err) = &result {
            debug!(func = %self.def.name, phase = ?self.phase, %err, "resolution failed");
            self.phase = Phase::Failed;
        }
        result
    }

    fn inst_bodies(&self) -> Result<Vec<(InstId, InstBody)>, ResolveError> {
        let cx = LinkContext::new(&self.func, &self.locals, self.resolver);
        let mut bodies = Vec::with_capacity(self.func.insts.len());
        for (block, node) in self.func.blocks.iter().zip(&self.def.blocks) {
            for (&id, inst) in block.insts.iter().zip(&node.insts) {
                let shell = self.func.inst(id);
                trace!(inst = id.raw(), opcode = %shell.opcode, "linking instruction");
                bodies.push((id, self.linker.link_inst(&cx, shell, &inst.kind)?));
            }
        }
        Ok(bodies)
    }

    fn term_bodies(&self) -> Result<Vec<TermBody>, ResolveError> {
        let cx = LinkContext::new(&self.func, &self.locals, self.resolver);
        self.func
            .blocks
            .iter()
            .zip(&self.def.blocks)
            .map(|(block, node)| {
                trace!(block = block.id.raw(), opcode = %block.term.opcode, "linking terminator");
                self.linker.link_term(&cx, &block.term, &node.term.kind)
            })
            .collect()
    }
}

/// Resolve `def` into a fully linked [`Function`].
#[tracing::instrument(level = "debug", skip_all, fields(func = %def.name))]
pub fn resolve_function(
    def: &FuncDef,
    resolver: &dyn TypeResolver,
    linker: &dyn InstLinker,
) -> Result<Function, ResolveError> {
    let mut state = FuncResolver::new(def, resolver, linker);
    state.index()?;
    state.link_instructions()?;
    state.link_terminators()?;
    state.finish()
}

#[cfg(test)]
mod tests;
