//! Type index handle.
//!
//! `Idx` is the canonical semantic type representation. All types live in a
//! [`TypePool`](crate::TypePool) and are referenced by their 32-bit index.
//!
//! # Design
//!
//! - Primitive types have fixed indices (0-11) for O(1) access
//! - Structural types are hash-consed, so type equality is index equality
//! - `Copy`, lightweight passing

use std::fmt;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Primitive Types (indices 0-11) ===
    // Pre-interned at pool creation.

    /// The `void` type.
    pub const VOID: Self = Self(0);
    /// The `i1` type (boolean).
    pub const I1: Self = Self(1);
    /// The `i8` type.
    pub const I8: Self = Self(2);
    /// The `i16` type.
    pub const I16: Self = Self(3);
    /// The `i32` type.
    pub const I32: Self = Self(4);
    /// The `i64` type.
    pub const I64: Self = Self(5);
    /// The `half` type (16-bit float).
    pub const HALF: Self = Self(6);
    /// The `float` type (32-bit float).
    pub const FLOAT: Self = Self(7);
    /// The `double` type (64-bit float).
    pub const DOUBLE: Self = Self(8);
    /// The `label` type (basic blocks).
    pub const LABEL: Self = Self(9);
    /// The `token` type (EH pads, `catchswitch`).
    pub const TOKEN: Self = Self(10);
    /// The `metadata` type.
    pub const METADATA: Self = Self(11);

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 12;

    /// Create an index from a raw u32 value.
    ///
    /// The caller must ensure the index is valid in the pool it is used with.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as `usize` (for indexing into `Vec`s).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a pre-interned primitive type.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }

    /// Check if this is the `void` type.
    #[inline]
    pub const fn is_void(self) -> bool {
        self.0 == Self::VOID.0
    }

    /// Get the textual name for primitive types.
    ///
    /// Returns `None` for dynamic types, which need a pool to render.
    #[inline]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("void"),
            1 => Some("i1"),
            2 => Some("i8"),
            3 => Some("i16"),
            4 => Some("i32"),
            5 => Some("i64"),
            6 => Some("half"),
            7 => Some("float"),
            8 => Some("double"),
            9 => Some("label"),
            10 => Some("token"),
            11 => Some("metadata"),
            _ => None,
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Idx({name})"),
            None => write!(f, "Idx({})", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Idx;

    #[test]
    fn primitive_names() {
        assert_eq!(Idx::VOID.name(), Some("void"));
        assert_eq!(Idx::I1.name(), Some("i1"));
        assert_eq!(Idx::TOKEN.name(), Some("token"));
        assert_eq!(Idx::from_raw(40).name(), None);
    }

    #[test]
    fn primitive_range() {
        assert!(Idx::METADATA.is_primitive());
        assert!(!Idx::from_raw(Idx::PRIMITIVE_COUNT).is_primitive());
        assert!(Idx::VOID.is_void());
        assert!(!Idx::I8.is_void());
    }

    #[test]
    fn debug_uses_names() {
        assert_eq!(format!("{:?}", Idx::I32), "Idx(i32)");
        assert_eq!(format!("{:?}", Idx::from_raw(99)), "Idx(99)");
    }
}
