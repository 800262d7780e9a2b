//! Structural type data stored in the pool.

use smallvec::SmallVec;

use crate::Idx;

/// Inline storage for struct fields and function parameters.
pub type TypeList = SmallVec<[Idx; 4]>;

/// Floating-point kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FloatKind {
    Half,
    BFloat,
    Float,
    Double,
    X86Fp80,
    Fp128,
    PpcFp128,
}

impl FloatKind {
    /// The textual spelling of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            FloatKind::Half => "half",
            FloatKind::BFloat => "bfloat",
            FloatKind::Float => "float",
            FloatKind::Double => "double",
            FloatKind::X86Fp80 => "x86_fp80",
            FloatKind::Fp128 => "fp128",
            FloatKind::PpcFp128 => "ppc_fp128",
        }
    }
}

/// Identity of an identified (named) struct type.
///
/// Identified structs are nominal: two declarations with the same body are
/// still distinct types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct NamedId(u32);

impl NamedId {
    #[inline]
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The structure of a single interned type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeData {
    Void,
    Int {
        bits: u32,
    },
    Float(FloatKind),
    Label,
    Token,
    Metadata,
    Pointer {
        elem: Idx,
        addr_space: u32,
    },
    Vector {
        len: u64,
        elem: Idx,
    },
    Array {
        len: u64,
        elem: Idx,
    },
    /// Literal (structural) struct.
    Struct {
        fields: TypeList,
        packed: bool,
    },
    Func {
        ret: Idx,
        params: TypeList,
        variadic: bool,
    },
    /// Identified struct; its body lives in the pool's named table.
    Named(NamedId),
}

/// Body of a struct type, shared by literal and identified structs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructBody {
    pub fields: TypeList,
    pub packed: bool,
}

/// An identified struct declaration. `body` is `None` while opaque.
#[derive(Clone, Debug)]
pub(crate) struct NamedStruct {
    pub(crate) name: String,
    pub(crate) body: Option<StructBody>,
}
