//! Positional identifier assignment.
//!
//! Unnamed parameters, blocks and value-producing instructions are numbered
//! in textual order: parameters first, then for each block the block label,
//! its value-producing instructions, and finally its terminator if that
//! yields a value. Explicit names are kept as written.
//!
//! The counter never hands out a number that the function spells explicitly
//! anywhere (the explicit ids are collected up front), and every explicit
//! `%n` moves the counter past `n`. Assigned ids therefore cannot collide
//! with explicit numeric names, even ones defined later in the body.
//!
//! Once `%4294967295` has been spelled or handed out, no number is left;
//! the next unnamed value fails with
//! [`ResolveError::IdentifierSpaceExhausted`].

use lir_ast::{FuncDef, LocalIdent};
use rustc_hash::FxHashSet;

use crate::error::ResolveError;

/// Numbers unnamed locals of one function.
#[derive(Clone, Debug)]
pub struct IdCounter {
    /// `None` once every `u32` has been passed.
    next: Option<u32>,
    reserved: FxHashSet<u32>,
}

impl Default for IdCounter {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}

impl IdCounter {
    /// A counter that skips every id in `reserved`.
    pub fn new(reserved: impl IntoIterator<Item = u32>) -> Self {
        Self {
            next: Some(0),
            reserved: reserved.into_iter().collect(),
        }
    }

    /// A counter primed with every explicit numeric name in `def`.
    pub fn for_function(def: &FuncDef) -> Self {
        Self::new(explicit_ids(def))
    }

    /// Identify an entity that always has an identity (parameter, block).
    pub fn name(&mut self, explicit: Option<&LocalIdent>) -> Result<LocalIdent, ResolveError> {
        match explicit {
            Some(ident) => {
                if let Some(n) = ident.as_id() {
                    self.next = match (self.next, n.checked_add(1)) {
                        (Some(next), Some(after)) => Some(next.max(after)),
                        _ => None,
                    };
                }
                Ok(ident.clone())
            }
            None => self.fresh().map(LocalIdent::Id),
        }
    }

    /// Identify an instruction or terminator. Unnamed entities that produce
    /// no value get no identifier and consume no number.
    pub fn assign(
        &mut self,
        explicit: Option<&LocalIdent>,
        produces_value: bool,
    ) -> Result<Option<LocalIdent>, ResolveError> {
        if explicit.is_none() && !produces_value {
            return Ok(None);
        }
        self.name(explicit).map(Some)
    }

    /// The number the next unnamed value would receive, or `None` if the
    /// numbers are used up.
    pub fn peek(&self) -> Option<u32> {
        let mut next = self.next?;
        while self.reserved.contains(&next) {
            next = next.checked_add(1)?;
        }
        Some(next)
    }

    fn fresh(&mut self) -> Result<u32, ResolveError> {
        let id = self.peek().ok_or(ResolveError::IdentifierSpaceExhausted)?;
        self.next = id.checked_add(1);
        tracing::trace!(id, "assigned local id");
        Ok(id)
    }
}

/// One entity awaiting an identifier, in assignment order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub explicit: Option<LocalIdent>,
    pub produces_value: bool,
}

impl Slot {
    pub fn named(ident: impl Into<LocalIdent>) -> Self {
        Self {
            explicit: Some(ident.into()),
            produces_value: true,
        }
    }

    pub fn value() -> Self {
        Self {
            explicit: None,
            produces_value: true,
        }
    }

    pub fn void() -> Self {
        Self {
            explicit: None,
            produces_value: false,
        }
    }
}

/// Assign identifiers to an ordered list of slots.
///
/// The result has one entry per slot: the explicit name, a fresh id, or
/// `None` for an unnamed slot that produces no value.
pub fn assign_ids(slots: &[Slot]) -> Result<Vec<Option<LocalIdent>>, ResolveError> {
    let mut counter = IdCounter::new(slots.iter().filter_map(|s| s.explicit.as_ref()?.as_id()));
    slots
        .iter()
        .map(|slot| counter.assign(slot.explicit.as_ref(), slot.produces_value))
        .collect()
}

/// Every explicit numeric name defined in `def`.
pub fn explicit_ids(def: &FuncDef) -> FxHashSet<u32> {
    let params = def.params.iter().map(|p| p.name.as_ref());
    let blocks = def.blocks.iter().flat_map(|block| {
        std::iter::once(block.name.as_ref())
            .chain(block.insts.iter().map(|inst| inst.name.as_ref()))
            .chain(std::iter::once(block.term.name.as_ref()))
    });
    params
        .chain(blocks)
        .filter_map(|name| name?.as_id())
        .collect()
}
