//! Parsed syntax tree for textual IR functions.
//!
//! The grammar and lexer live elsewhere; this crate is the shape they
//! produce. A [`FuncDef`] exposes, in source order, its parameters and blocks,
//! and each [`BlockNode`] its instructions plus one terminator. Every node
//! carries its declared types as unresolved [`TypeRef`]s.
//!
//! Names are optional throughout: unnamed parameters, blocks and values are
//! numbered by the resolver.

mod func;
mod ident;
mod inst;
pub mod ops;
mod types;
mod value;

pub use func::{BlockNode, FuncDef, Param};
pub use ident::LocalIdent;
pub use inst::{Clause, InstKind, InstNode, TermKind, TermNode};
pub use ops::Opcode;
pub use types::TypeRef;
pub use value::{Constant, TypedValue, ValueRef};
