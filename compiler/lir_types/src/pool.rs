//! Hash-consed type pool.
//!
//! Every semantic type is interned once and referenced by [`Idx`]. Interning
//! goes through a `RwLock` so functions of one module can be resolved on
//! separate threads against a shared pool.

mod construct;
mod format;

use std::fmt;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::data::{FloatKind, NamedId, NamedStruct, StructBody, TypeData};
use crate::Idx;

/// Error raised by identified-struct bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypePoolError {
    /// The index does not denote an identified struct.
    NotNamed { ty: Idx },
    /// The identified struct already has a body.
    BodyAlreadyDefined { name: String },
}

impl fmt::Display for TypePoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypePoolError::NotNamed { ty } => {
                write!(f, "type {ty:?} is not an identified struct")
            }
            TypePoolError::BodyAlreadyDefined { name } => {
                write!(f, "body of identified struct `%{name}` already defined")
            }
        }
    }
}

impl std::error::Error for TypePoolError {}

pub(crate) struct PoolInner {
    pub(crate) items: Vec<TypeData>,
    map: FxHashMap<TypeData, Idx>,
    pub(crate) named: Vec<NamedStruct>,
    named_by_name: FxHashMap<String, Idx>,
}

impl PoolInner {
    fn with_primitives() -> Self {
        let mut inner = Self {
            items: Vec::with_capacity(64),
            map: FxHashMap::default(),
            named: Vec::new(),
            named_by_name: FxHashMap::default(),
        };

        // Order must match the `Idx` constants.
        let primitives = [
            TypeData::Void,                   // 0 = Idx::VOID
            TypeData::Int { bits: 1 },        // 1 = Idx::I1
            TypeData::Int { bits: 8 },        // 2 = Idx::I8
            TypeData::Int { bits: 16 },       // 3 = Idx::I16
            TypeData::Int { bits: 32 },       // 4 = Idx::I32
            TypeData::Int { bits: 64 },       // 5 = Idx::I64
            TypeData::Float(FloatKind::Half), // 6 = Idx::HALF
            TypeData::Float(FloatKind::Float), // 7 = Idx::FLOAT
            TypeData::Float(FloatKind::Double), // 8 = Idx::DOUBLE
            TypeData::Label,                  // 9 = Idx::LABEL
            TypeData::Token,                  // 10 = Idx::TOKEN
            TypeData::Metadata,               // 11 = Idx::METADATA
        ];
        for data in primitives {
            inner.push(data);
        }
        debug_assert_eq!(inner.items.len(), Idx::PRIMITIVE_COUNT as usize);
        inner
    }

    fn push(&mut self, data: TypeData) -> Idx {
        let idx = Idx::from_raw(
            u32::try_from(self.items.len())
                .unwrap_or_else(|_| panic!("type count exceeds u32::MAX")),
        );
        self.items.push(data.clone());
        self.map.insert(data, idx);
        idx
    }

    pub(crate) fn data(&self, idx: Idx) -> &TypeData {
        debug_assert!(
            idx.index() < self.items.len(),
            "Idx {} out of bounds (have {} types)",
            idx.raw(),
            self.items.len(),
        );
        &self.items[idx.index()]
    }

    pub(crate) fn struct_body(&self, idx: Idx) -> Option<StructBody> {
        match self.data(idx) {
            TypeData::Struct { fields, packed } => Some(StructBody {
                fields: fields.clone(),
                packed: *packed,
            }),
            TypeData::Named(id) => self.named[id.index()].body.clone(),
            _ => None,
        }
    }
}

/// The semantic type pool.
///
/// Structural types are deduplicated: interning the same [`TypeData`] twice
/// yields the same [`Idx`]. Identified structs are nominal and are created
/// through [`declare_named`](Self::declare_named).
pub struct TypePool {
    inner: RwLock<PoolInner>,
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}

impl TypePool {
    /// Create a pool with the primitive types pre-interned.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(PoolInner::with_primitives()),
        }
    }

    /// Intern a type, returning the existing index if it is already present.
    pub fn intern(&self, data: TypeData) -> Idx {
        {
            let guard = self.inner.read();
            if let Some(&idx) = guard.map.get(&data) {
                return idx;
            }
        }

        let mut guard = self.inner.write();
        // Another writer may have raced us between the two locks.
        if let Some(&idx) = guard.map.get(&data) {
            return idx;
        }
        guard.push(data)
    }

    /// Get a copy of the structure of a type.
    pub fn get(&self, idx: Idx) -> TypeData {
        self.inner.read().data(idx).clone()
    }

    /// Number of interned types, including primitives.
    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    /// Always `false`: primitives are pre-interned.
    pub fn is_empty(&self) -> bool {
        false
    }

    // === Identified structs ===

    /// Declare an identified struct, or return the existing declaration.
    ///
    /// The new struct is opaque until [`define_named`](Self::define_named)
    /// gives it a body.
    pub fn declare_named(&self, name: &str) -> Idx {
        if let Some(&idx) = self.inner.read().named_by_name.get(name) {
            return idx;
        }

        let mut guard = self.inner.write();
        if let Some(&idx) = guard.named_by_name.get(name) {
            return idx;
        }
        let id = NamedId::new(
            u32::try_from(guard.named.len())
                .unwrap_or_else(|_| panic!("named type count exceeds u32::MAX")),
        );
        guard.named.push(NamedStruct {
            name: name.to_owned(),
            body: None,
        });
        let idx = guard.push(TypeData::Named(id));
        guard.named_by_name.insert(name.to_owned(), idx);
        idx
    }

    /// Look up a previously declared identified struct by name.
    pub fn lookup_named(&self, name: &str) -> Option<Idx> {
        self.inner.read().named_by_name.get(name).copied()
    }

    /// Set the body of an identified struct. A body can only be set once.
    pub fn define_named(&self, ty: Idx, body: StructBody) -> Result<(), TypePoolError> {
        let mut guard = self.inner.write();
        let TypeData::Named(id) = *guard.data(ty) else {
            return Err(TypePoolError::NotNamed { ty });
        };
        let named = &mut guard.named[id.index()];
        if named.body.is_some() {
            return Err(TypePoolError::BodyAlreadyDefined {
                name: named.name.clone(),
            });
        }
        named.body = Some(body);
        Ok(())
    }

    /// The name of an identified struct.
    pub fn named_name(&self, ty: Idx) -> Option<String> {
        let guard = self.inner.read();
        match guard.data(ty) {
            TypeData::Named(id) => Some(guard.named[id.index()].name.clone()),
            _ => None,
        }
    }

    // === Queries ===

    /// The body of a literal struct, or of an identified struct with a body.
    pub fn struct_body(&self, ty: Idx) -> Option<StructBody> {
        self.inner.read().struct_body(ty)
    }

    /// `(len, elem)` of a vector type.
    pub fn vector_parts(&self, ty: Idx) -> Option<(u64, Idx)> {
        match self.get(ty) {
            TypeData::Vector { len, elem } => Some((len, elem)),
            _ => None,
        }
    }

    /// `(elem, addr_space)` of a pointer type.
    pub fn pointer_parts(&self, ty: Idx) -> Option<(Idx, u32)> {
        match self.get(ty) {
            TypeData::Pointer { elem, addr_space } => Some((elem, addr_space)),
            _ => None,
        }
    }

    /// Return type of a function type.
    pub fn func_ret(&self, ty: Idx) -> Option<Idx> {
        match self.get(ty) {
            TypeData::Func { ret, .. } => Some(ret),
            _ => None,
        }
    }

    pub fn is_int(&self, ty: Idx) -> bool {
        matches!(self.get(ty), TypeData::Int { .. })
    }

    pub fn is_float(&self, ty: Idx) -> bool {
        matches!(self.get(ty), TypeData::Float(_))
    }

    pub fn is_pointer(&self, ty: Idx) -> bool {
        matches!(self.get(ty), TypeData::Pointer { .. })
    }
}
