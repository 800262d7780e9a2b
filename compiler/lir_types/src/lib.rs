//! Semantic types for the LIR local resolver.
//!
//! This crate provides:
//!
//! - **[`Idx`]**: a 32-bit handle to an interned type. Primitive types
//!   (`void`, `i1`..`i64`, `half`/`float`/`double`, `label`, `token`,
//!   `metadata`) have fixed indices.
//! - **[`TypeData`]**: the structure of one type (integer, float, pointer,
//!   vector, array, struct, function, identified struct).
//! - **[`TypePool`]**: the hash-consed store. Interning the same structure
//!   twice returns the same `Idx`, so type comparison is index comparison.
//!
//! The pool is internally synchronized; a single pool can back the
//! resolution of many functions running on different threads.

mod data;
mod idx;
mod pool;

pub use data::{FloatKind, NamedId, StructBody, TypeData, TypeList};
pub use idx::Idx;
pub use pool::{TypePool, TypePoolError};
