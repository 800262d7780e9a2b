//! Linked IR graph.
//!
//! The output of local resolution:
//!
//! - **[`Function`]**: parameters, blocks, and the instruction arena
//! - **[`Block`]**: label, ordered instruction handles, one terminator
//! - **[`Inst`]** / **[`Term`]**: identity, opcode, result type, and the
//!   linked operand body
//! - **[`Value`]**: a typed operand referring to a parameter, instruction,
//!   terminator result, global, or constant
//!
//! Cross references use the `Copy` handles [`BlockId`], [`InstId`] and
//! [`ParamId`], so a phi may name a value defined further down the function
//! without any ownership edge.

mod function;
mod ids;
mod inst;
mod value;

pub use function::{Block, Function, Param};
pub use ids::{BlockId, InstId, ParamId};
pub use inst::{Clause, Inst, InstBody, Term, TermBody};
pub use value::{Value, ValueKind};
