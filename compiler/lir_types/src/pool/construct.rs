//! Type construction helpers for the pool.

use crate::data::{FloatKind, TypeData, TypeList};
use crate::{Idx, TypePool};

impl TypePool {
    /// Create an integer type `iN`.
    pub fn int(&self, bits: u32) -> Idx {
        self.intern(TypeData::Int { bits })
    }

    /// Create a floating-point type.
    pub fn float(&self, kind: FloatKind) -> Idx {
        self.intern(TypeData::Float(kind))
    }

    /// Create a pointer type `elem*` in the default address space.
    pub fn pointer(&self, elem: Idx) -> Idx {
        self.pointer_in(elem, 0)
    }

    /// Create a pointer type `elem addrspace(n)*`.
    pub fn pointer_in(&self, elem: Idx, addr_space: u32) -> Idx {
        self.intern(TypeData::Pointer { elem, addr_space })
    }

    /// Create a vector type `<len x elem>`.
    pub fn vector(&self, len: u64, elem: Idx) -> Idx {
        self.intern(TypeData::Vector { len, elem })
    }

    /// Create an array type `[len x elem]`.
    pub fn array(&self, len: u64, elem: Idx) -> Idx {
        self.intern(TypeData::Array { len, elem })
    }

    /// Create a literal struct type `{ fields... }`.
    pub fn structure(&self, fields: &[Idx], packed: bool) -> Idx {
        self.intern(TypeData::Struct {
            fields: TypeList::from_slice(fields),
            packed,
        })
    }

    /// Create a function type `ret (params...)`.
    pub fn function(&self, ret: Idx, params: &[Idx], variadic: bool) -> Idx {
        self.intern(TypeData::Func {
            ret,
            params: TypeList::from_slice(params),
            variadic,
        })
    }
}
