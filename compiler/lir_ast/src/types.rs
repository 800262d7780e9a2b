//! Type syntax.

use std::fmt;

use lir_types::FloatKind;

/// A type as written in the source, before resolution.
///
/// Named types (`%T`) are left as names; mapping them to semantic types is
/// the job of the module-level resolver.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeRef {
    Void,
    Int(u32),
    Float(FloatKind),
    Label,
    Token,
    Metadata,
    Pointer {
        elem: Box<TypeRef>,
        addr_space: u32,
    },
    Vector {
        len: u64,
        elem: Box<TypeRef>,
    },
    Array {
        len: u64,
        elem: Box<TypeRef>,
    },
    Struct {
        fields: Vec<TypeRef>,
        packed: bool,
    },
    Func {
        ret: Box<TypeRef>,
        params: Vec<TypeRef>,
        variadic: bool,
    },
    Named(String),
}

impl TypeRef {
    pub fn int(bits: u32) -> Self {
        TypeRef::Int(bits)
    }

    pub fn float() -> Self {
        TypeRef::Float(FloatKind::Float)
    }

    pub fn double() -> Self {
        TypeRef::Float(FloatKind::Double)
    }

    pub fn ptr(elem: TypeRef) -> Self {
        TypeRef::Pointer {
            elem: Box::new(elem),
            addr_space: 0,
        }
    }

    pub fn vector(len: u64, elem: TypeRef) -> Self {
        TypeRef::Vector {
            len,
            elem: Box::new(elem),
        }
    }

    pub fn array(len: u64, elem: TypeRef) -> Self {
        TypeRef::Array {
            len,
            elem: Box::new(elem),
        }
    }

    pub fn structure(fields: Vec<TypeRef>) -> Self {
        TypeRef::Struct {
            fields,
            packed: false,
        }
    }

    pub fn func(ret: TypeRef, params: Vec<TypeRef>, variadic: bool) -> Self {
        TypeRef::Func {
            ret: Box::new(ret),
            params,
            variadic,
        }
    }

    pub fn named(name: &str) -> Self {
        TypeRef::Named(name.to_owned())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Void => f.write_str("void"),
            TypeRef::Int(bits) => write!(f, "i{bits}"),
            TypeRef::Float(kind) => f.write_str(kind.as_str()),
            TypeRef::Label => f.write_str("label"),
            TypeRef::Token => f.write_str("token"),
            TypeRef::Metadata => f.write_str("metadata"),
            TypeRef::Pointer { elem, addr_space } => {
                if *addr_space == 0 {
                    write!(f, "{elem}*")
                } else {
                    write!(f, "{elem} addrspace({addr_space})*")
                }
            }
            TypeRef::Vector { len, elem } => write!(f, "<{len} x {elem}>"),
            TypeRef::Array { len, elem } => write!(f, "[{len} x {elem}]"),
            TypeRef::Struct { fields, packed } => {
                let (open, close) = if *packed { ("<{", "}>") } else { ("{", "}") };
                if fields.is_empty() {
                    return write!(f, "{open}{close}");
                }
                write!(f, "{open} ")?;
                write_list(f, fields)?;
                write!(f, " {close}")
            }
            TypeRef::Func {
                ret,
                params,
                variadic,
            } => {
                write!(f, "{ret} (")?;
                write_list(f, params)?;
                if *variadic {
                    if !params.is_empty() {
                        f.write_str(", ")?;
                    }
                    f.write_str("...")?;
                }
                f.write_str(")")
            }
            TypeRef::Named(name) => write!(f, "%{name}"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[TypeRef]) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}
