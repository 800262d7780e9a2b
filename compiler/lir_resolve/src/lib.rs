//! Local resolution of textual IR functions.
//!
//! Turns a parsed function definition ([`lir_ast::FuncDef`]) into a fully
//! linked [`lir_ir::Function`]. The text may use a value, block or parameter
//! before defining it and may leave entities unnamed, so resolution runs in
//! two phases:
//!
//! 1. **Index**: derive every shell's result type, number unnamed entities,
//!    build the shells, and register every local in a per-function table.
//! 2. **Link**: revisit instructions, then terminators, and turn written
//!    operands into references to the entities registered in phase one.
//!
//! # Modules
//!
//! - [`ids`]: positional numbering of unnamed locals
//! - [`derive`] / [`indexing`]: result-type derivation per opcode
//! - [`locals`]: the per-function identifier table
//! - [`link`]: operand linking ([`InstLinker`], [`StandardLinker`])
//! - [`func`]: the per-function state machine ([`FuncResolver`])
//! - [`resolver`]: module-level type resolution ([`TypeResolver`],
//!   [`ModuleTypes`])
//!
//! # Tracing
//!
//! Phase transitions log at `debug`, individual shells and identifier
//! assignments at `trace`. Call [`init_tracing`] and set `RUST_LOG`, e.g.
//! `RUST_LOG=lir_resolve=debug`.

pub mod derive;
mod driver;
mod error;
pub mod func;
pub mod ids;
pub mod indexing;
pub mod link;
pub mod locals;
pub mod resolver;
mod shell;

#[cfg(test)]
mod test_helpers;

pub use driver::{resolve_functions, ResolveOptions};
pub use error::{FunctionError, LocalKind, ResolveError};
pub use func::{resolve_function, FuncResolver, Phase};
pub use link::{InstLinker, LinkContext, StandardLinker};
pub use locals::{Local, LocalsTable};
pub use resolver::{ModuleTypes, TypeResolveError, TypeResolver};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
