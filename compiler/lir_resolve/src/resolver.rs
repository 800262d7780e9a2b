//! Module-level type resolution.
//!
//! Resolution of one function needs to turn written types into pool types,
//! including named types declared at module level. That knowledge belongs to
//! the module, so it is injected through [`TypeResolver`]. [`ModuleTypes`] is
//! the reference implementation: a pool plus the module's identified structs.

use lir_ast::TypeRef;
use lir_types::{Idx, StructBody, TypeList, TypePool};

use crate::error::ResolveError;

/// Failure reported by a [`TypeResolver`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeResolveError {
    #[error("unknown named type `%{name}`")]
    UnknownNamedType { name: String },
    #[error("invalid type: {reason}")]
    Invalid { reason: String },
}

/// Maps written types to semantic types.
pub trait TypeResolver {
    /// The pool that resolved types (and types derived from them) live in.
    fn pool(&self) -> &TypePool;

    /// Resolve a written type.
    fn resolve_type(&self, ty: &TypeRef) -> Result<Idx, TypeResolveError>;
}

/// Resolve through `resolver`, tagging failures with the offending type.
pub(crate) fn resolve(resolver: &dyn TypeResolver, ty: &TypeRef) -> Result<Idx, ResolveError> {
    resolver
        .resolve_type(ty)
        .map_err(|source| ResolveError::TypeResolution {
            ty: ty.to_string(),
            source,
        })
}

/// The types of one module: a pool and its identified structs.
#[derive(Default)]
pub struct ModuleTypes {
    pool: TypePool,
}

impl ModuleTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing pool.
    pub fn with_pool(pool: TypePool) -> Self {
        Self { pool }
    }

    /// Declare an identified struct (opaque until defined).
    pub fn declare(&self, name: &str) -> Idx {
        self.pool.declare_named(name)
    }

    /// Give a declared identified struct its body.
    ///
    /// Fields may refer to the struct itself, e.g. `%list = type { i32,
    /// %list* }`.
    pub fn define_body(&self, ty: Idx, fields: &[TypeRef], packed: bool) -> Result<(), TypeResolveError> {
        let fields = fields
            .iter()
            .map(|field| self.resolve_type(field))
            .collect::<Result<TypeList, _>>()?;
        self.pool
            .define_named(ty, StructBody { fields, packed })
            .map_err(|err| TypeResolveError::Invalid {
                reason: err.to_string(),
            })
    }

    /// Declare an identified struct and give it a body.
    pub fn define(&self, name: &str, fields: &[TypeRef], packed: bool) -> Result<Idx, TypeResolveError> {
        let ty = self.declare(name);
        self.define_body(ty, fields, packed)?;
        tracing::trace!(name, ty = ty.raw(), "defined identified struct");
        Ok(ty)
    }
}

impl TypeResolver for ModuleTypes {
    fn pool(&self) -> &TypePool {
        &self.pool
    }

    fn resolve_type(&self, ty: &TypeRef) -> Result<Idx, TypeResolveError> {
        let pool = &self.pool;
        let idx = match ty {
            TypeRef::Void => Idx::VOID,
            TypeRef::Int(bits) => {
                if *bits == 0 {
                    return Err(TypeResolveError::Invalid {
                        reason: "integer width must be non-zero".to_owned(),
                    });
                }
                pool.int(*bits)
            }
            TypeRef::Float(kind) => pool.float(*kind),
            TypeRef::Label => Idx::LABEL,
            TypeRef::Token => Idx::TOKEN,
            TypeRef::Metadata => Idx::METADATA,
            TypeRef::Pointer { elem, addr_space } => {
                pool.pointer_in(self.resolve_type(elem)?, *addr_space)
            }
            TypeRef::Vector { len, elem } => {
                if *len == 0 {
                    return Err(TypeResolveError::Invalid {
                        reason: "vector length must be non-zero".to_owned(),
                    });
                }
                pool.vector(*len, self.resolve_type(elem)?)
            }
            TypeRef::Array { len, elem } => pool.array(*len, self.resolve_type(elem)?),
            TypeRef::Struct { fields, packed } => {
                let fields = fields
                    .iter()
                    .map(|field| self.resolve_type(field))
                    .collect::<Result<Vec<_>, _>>()?;
                pool.structure(&fields, *packed)
            }
            TypeRef::Func {
                ret,
                params,
                variadic,
            } => {
                let ret = self.resolve_type(ret)?;
                let params = params
                    .iter()
                    .map(|param| self.resolve_type(param))
                    .collect::<Result<Vec<_>, _>>()?;
                pool.function(ret, &params, *variadic)
            }
            TypeRef::Named(name) => {
                pool.lookup_named(name)
                    .ok_or_else(|| TypeResolveError::UnknownNamedType { name: name.clone() })?
            }
        };
        Ok(idx)
    }
}
