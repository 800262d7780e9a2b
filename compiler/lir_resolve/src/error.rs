//! Resolution failures.
//!
//! Every failure is fatal for the function being resolved: no partially
//! linked function is ever handed back. Variants carry the identifier,
//! opcode, and expected/found type or kind needed for a precise diagnostic.

use std::fmt;

use lir_ast::{LocalIdent, Opcode};

use crate::func::Phase;
use crate::resolver::TypeResolveError;

/// Category of a local, used in kind-mismatch diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LocalKind {
    Param,
    Block,
    /// Result of an instruction or value-producing terminator.
    Value,
}

impl fmt::Display for LocalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LocalKind::Param => "function parameter",
            LocalKind::Block => "basic block",
            LocalKind::Value => "instruction result",
        })
    }
}

/// A function-scoped resolution failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Opcode or node kind outside the supported set.
    #[error("support for `{opcode}` not yet implemented")]
    Unsupported { opcode: String },

    /// A declared type could not be mapped to a semantic type.
    #[error("unable to resolve type `{ty}`")]
    TypeResolution {
        ty: String,
        source: TypeResolveError,
    },

    /// An operand's type does not have the shape its opcode requires.
    #[error("invalid operand type for `{opcode}`; expected {expected}, got `{found}`")]
    TypeShape {
        opcode: Opcode,
        expected: &'static str,
        found: String,
    },

    /// A structure was indexed by something other than an integer literal.
    #[error("invalid structure index in `{opcode}`; expected integer constant, got `{index}`")]
    NonConstantStructIndex { opcode: Opcode, index: String },

    /// A structure field index past the last field.
    #[error("index {index} out of range for `{ty}` in `{opcode}`")]
    IndexOutOfRange {
        opcode: Opcode,
        index: i64,
        ty: String,
    },

    /// A non-leading index tried to step through a pointer.
    #[error("unable to index into element of pointer type `{ty}` in `{opcode}`")]
    IndexThroughPointer { opcode: Opcode, ty: String },

    /// A reference to a local that no entity defines.
    #[error("unable to locate local identifier `{ident}`")]
    Unresolved { ident: LocalIdent },

    /// An unnamed value needs a number but every `u32` is taken.
    #[error("no local identifier left to number an unnamed value")]
    IdentifierSpaceExhausted,

    /// Two entities claim the same identifier.
    #[error("local identifier `{ident}` already defined")]
    DuplicateDefinition { ident: LocalIdent },

    /// A name given to an instruction that yields no value.
    #[error("`{opcode}` produces no value and cannot be named `{ident}`")]
    NamedVoidValue { ident: LocalIdent, opcode: Opcode },

    /// A name bound to the wrong category of entity.
    #[error("invalid reference to `{ident}`; expected {expected}, found {found}")]
    KindMismatch {
        ident: LocalIdent,
        expected: LocalKind,
        found: LocalKind,
    },

    /// A resolution phase was run out of order or after a failure.
    #[error("resolution phase out of order; expected {expected:?}, found {found:?}")]
    PhaseOrder { expected: Phase, found: Phase },
}

impl ResolveError {
    pub(crate) fn unsupported(opcode: &str) -> Self {
        ResolveError::Unsupported {
            opcode: opcode.to_owned(),
        }
    }
}

/// A [`ResolveError`] tagged with the function it aborted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("in function `@{func}`: {source}")]
pub struct FunctionError {
    pub func: String,
    pub source: ResolveError,
}
