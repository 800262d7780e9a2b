//! Resolution of many functions.

use lir_ast::FuncDef;
use lir_ir::Function;
use rayon::prelude::*;

use crate::error::FunctionError;
use crate::func::resolve_function;
use crate::link::InstLinker;
use crate::resolver::TypeResolver;

/// Driver settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Resolve functions on the rayon thread pool.
    pub parallel: bool,
}

impl ResolveOptions {
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Resolve every definition independently.
///
/// Results are in input order. A failure in one function does not affect
/// the others.
pub fn resolve_functions(
    defs: &[FuncDef],
    resolver: &(dyn TypeResolver + Sync),
    linker: &(dyn InstLinker + Sync),
    options: &ResolveOptions,
) -> Vec<Result<Function, FunctionError>> {
    tracing::debug!(count = defs.len(), parallel = options.parallel, "resolving functions");
    let resolve_one = |def: &FuncDef| {
        resolve_function(def, resolver, linker).map_err(|source| FunctionError {
            func: def.name.clone(),
            source,
        })
    };
    if options.parallel {
        defs.par_iter().map(resolve_one).collect()
    } else {
        defs.iter().map(resolve_one).collect()
    }
}
