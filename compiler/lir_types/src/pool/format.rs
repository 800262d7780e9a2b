//! Textual rendering of pool types, used in diagnostics.

use std::fmt::Write;

use crate::data::TypeData;
use crate::pool::PoolInner;
use crate::{Idx, TypePool};

impl TypePool {
    /// Render a type in assembly syntax, e.g. `<4 x i1>` or `{ i32, i8* }`.
    ///
    /// Identified structs render as `%name` and are never expanded, so
    /// recursive types terminate.
    pub fn display(&self, idx: Idx) -> String {
        let guard = self.inner.read();
        let mut out = String::new();
        write_type(&guard, idx, &mut out);
        out
    }
}

fn write_type(pool: &PoolInner, idx: Idx, out: &mut String) {
    if let Some(name) = idx.name() {
        out.push_str(name);
        return;
    }
    match pool.data(idx) {
        TypeData::Void => out.push_str("void"),
        TypeData::Int { bits } => {
            let _ = write!(out, "i{bits}");
        }
        TypeData::Float(kind) => out.push_str(kind.as_str()),
        TypeData::Label => out.push_str("label"),
        TypeData::Token => out.push_str("token"),
        TypeData::Metadata => out.push_str("metadata"),
        TypeData::Pointer { elem, addr_space } => {
            write_type(pool, *elem, out);
            if *addr_space != 0 {
                let _ = write!(out, " addrspace({addr_space})");
            }
            out.push('*');
        }
        TypeData::Vector { len, elem } => {
            let _ = write!(out, "<{len} x ");
            write_type(pool, *elem, out);
            out.push('>');
        }
        TypeData::Array { len, elem } => {
            let _ = write!(out, "[{len} x ");
            write_type(pool, *elem, out);
            out.push(']');
        }
        TypeData::Struct { fields, packed } => write_struct(pool, fields, *packed, out),
        TypeData::Func {
            ret,
            params,
            variadic,
        } => {
            write_type(pool, *ret, out);
            out.push_str(" (");
            for (i, &param) in params.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_type(pool, param, out);
            }
            if *variadic {
                if !params.is_empty() {
                    out.push_str(", ");
                }
                out.push_str("...");
            }
            out.push(')');
        }
        TypeData::Named(id) => {
            out.push('%');
            out.push_str(&pool.named[id.index()].name);
        }
    }
}

fn write_struct(pool: &PoolInner, fields: &[Idx], packed: bool, out: &mut String) {
    if packed {
        out.push('<');
    }
    if fields.is_empty() {
        out.push_str("{}");
    } else {
        out.push_str("{ ");
        for (i, &field) in fields.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_type(pool, field, out);
        }
        out.push_str(" }");
    }
    if packed {
        out.push('>');
    }
}
