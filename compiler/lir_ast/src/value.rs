//! Value syntax: operand references and constants.

use std::fmt;

use crate::{LocalIdent, TypeRef};

/// A constant operand.
///
/// Float constants are stored as raw bits so that constants stay `Eq`/`Hash`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constant {
    Int(i64),
    Bool(bool),
    Float(u64),
    Null,
    /// The `none` token.
    None,
    Undef,
    Poison,
    ZeroInitializer,
    Vector(Vec<Constant>),
    Array(Vec<Constant>),
    Struct(Vec<Constant>),
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Int(v) => write!(f, "{v}"),
            Constant::Bool(v) => write!(f, "{v}"),
            Constant::Float(bits) => write!(f, "0x{bits:016X}"),
            Constant::Null => f.write_str("null"),
            Constant::None => f.write_str("none"),
            Constant::Undef => f.write_str("undef"),
            Constant::Poison => f.write_str("poison"),
            Constant::ZeroInitializer => f.write_str("zeroinitializer"),
            Constant::Vector(elems) => write_elems(f, "<", elems, ">"),
            Constant::Array(elems) => write_elems(f, "[", elems, "]"),
            Constant::Struct(elems) => write_elems(f, "{ ", elems, " }"),
        }
    }
}

fn write_elems(f: &mut fmt::Formatter<'_>, open: &str, elems: &[Constant], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, elem) in elems.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{elem}")?;
    }
    f.write_str(close)
}

/// An operand reference: a local (`%x`), a global (`@g`) or a constant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueRef {
    Local(LocalIdent),
    Global(String),
    Const(Constant),
}

impl ValueRef {
    pub fn local(ident: impl Into<LocalIdent>) -> Self {
        ValueRef::Local(ident.into())
    }

    pub fn global(name: &str) -> Self {
        ValueRef::Global(name.to_owned())
    }

    pub fn int(v: i64) -> Self {
        ValueRef::Const(Constant::Int(v))
    }

    /// The integer literal, if this operand is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ValueRef::Const(Constant::Int(v)) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueRef::Local(ident) => write!(f, "{ident}"),
            ValueRef::Global(name) => write!(f, "@{name}"),
            ValueRef::Const(c) => write!(f, "{c}"),
        }
    }
}

/// An operand together with its written type, e.g. `i32 %x`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypedValue {
    pub ty: TypeRef,
    pub value: ValueRef,
}

impl TypedValue {
    pub fn new(ty: TypeRef, value: ValueRef) -> Self {
        Self { ty, value }
    }

    pub fn local(ty: TypeRef, ident: impl Into<LocalIdent>) -> Self {
        Self::new(ty, ValueRef::local(ident))
    }

    pub fn global(ty: TypeRef, name: &str) -> Self {
        Self::new(ty, ValueRef::global(name))
    }

    pub fn int(ty: TypeRef, v: i64) -> Self {
        Self::new(ty, ValueRef::int(v))
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.value)
    }
}
