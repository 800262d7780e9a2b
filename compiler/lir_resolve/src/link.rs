//! Operand linking, the second half of opcode dispatch.
//!
//! Once every shell exists, each instruction and terminator is revisited
//! and its written operands are turned into [`Value`]s and [`BlockId`]s.
//! How that happens per opcode is pluggable through [`InstLinker`];
//! [`StandardLinker`] covers every supported opcode.

use lir_ast::{Clause as ClauseNode, InstKind, LocalIdent, TermKind, TypeRef, TypedValue, ValueRef};
use lir_ir::{BlockId, Clause, Function, Inst, InstBody, Term, TermBody, Value, ValueKind};
use lir_types::{Idx, TypePool};

use crate::error::ResolveError;
use crate::locals::LocalsTable;
use crate::resolver::{resolve, TypeResolver};

/// Read-only view of a function whose shells are all built.
pub struct LinkContext<'a> {
    func: &'a Function,
    locals: &'a LocalsTable,
    resolver: &'a dyn TypeResolver,
}

impl<'a> LinkContext<'a> {
    pub(crate) fn new(func: &'a Function, locals: &'a LocalsTable, resolver: &'a dyn TypeResolver) -> Self {
        Self {
            func,
            locals,
            resolver,
        }
    }

    /// The function being linked. Every shell is present; bodies are not.
    pub fn func(&self) -> &Function {
        self.func
    }

    pub fn pool(&self) -> &TypePool {
        self.resolver.pool()
    }

    pub fn resolve_type(&self, ty: &TypeRef) -> Result<Idx, ResolveError> {
        resolve(self.resolver, ty)
    }

    /// Link an operand written with its type.
    pub fn value(&self, operand: &TypedValue) -> Result<Value, ResolveError> {
        let ty = self.resolve_type(&operand.ty)?;
        self.untyped_value(ty, &operand.value)
    }

    /// Link an operand whose type is implied by context.
    ///
    /// Locals take the type of the entity they name; globals and constants
    /// take `ty`.
    pub fn untyped_value(&self, ty: Idx, operand: &ValueRef) -> Result<Value, ResolveError> {
        let value = match operand {
            ValueRef::Local(ident) => {
                let kind = self.locals.value(ident)?;
                let ty = self.func.local_type(&kind).unwrap_or(ty);
                Value::new(ty, kind)
            }
            ValueRef::Global(name) => Value::new(ty, ValueKind::Global(name.clone())),
            ValueRef::Const(c) => Value::new(ty, ValueKind::Const(c.clone())),
        };
        Ok(value)
    }

    /// Link a branch target or phi predecessor.
    pub fn block(&self, ident: &LocalIdent) -> Result<BlockId, ResolveError> {
        self.locals.block(ident)
    }

    fn values(&self, operands: &[TypedValue]) -> Result<Vec<Value>, ResolveError> {
        operands.iter().map(|operand| self.value(operand)).collect()
    }

    fn blocks(&self, idents: &[LocalIdent]) -> Result<Vec<BlockId>, ResolveError> {
        idents.iter().map(|ident| self.block(ident)).collect()
    }

    fn token(&self, operand: &ValueRef) -> Result<Value, ResolveError> {
        self.untyped_value(Idx::TOKEN, operand)
    }

    /// The callee of a `call` or `invoke`, typed as a pointer to the callee's
    /// function type.
    ///
    /// `declared` is either the full function type or only the return type,
    /// in which case the function type is rebuilt from the arguments.
    fn callee(&self, declared: &TypeRef, callee: &ValueRef, args: &[Value]) -> Result<Value, ResolveError> {
        let pool = self.pool();
        let declared = self.resolve_type(declared)?;
        let func_ty = if pool.func_ret(declared).is_some() {
            declared
        } else {
            let params: Vec<Idx> = args.iter().map(|arg| arg.ty).collect();
            pool.function(declared, &params, false)
        };
        self.untyped_value(pool.pointer(func_ty), callee)
    }
}

/// Produces the linked body of a shell.
pub trait InstLinker {
    fn link_inst(&self, cx: &LinkContext<'_>, shell: &Inst, node: &InstKind) -> Result<InstBody, ResolveError>;

    fn link_term(&self, cx: &LinkContext<'_>, shell: &Term, node: &TermKind) -> Result<TermBody, ResolveError>;
}

/// Links every supported opcode.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardLinker;

impl InstLinker for StandardLinker {
    fn link_inst(&self, cx: &LinkContext<'_>, shell: &Inst, node: &InstKind) -> Result<InstBody, ResolveError> {
        let body = match node {
            InstKind::Binary { op, x, y } => {
                let x_ty = cx.resolve_type(&x.ty)?;
                InstBody::Binary {
                    op: *op,
                    x: cx.untyped_value(x_ty, &x.value)?,
                    y: cx.untyped_value(x_ty, y)?,
                }
            }
            InstKind::ExtractElement { x, index } => InstBody::ExtractElement {
                x: cx.value(x)?,
                index: cx.value(index)?,
            },
            InstKind::InsertElement { x, elem, index } => InstBody::InsertElement {
                x: cx.value(x)?,
                elem: cx.value(elem)?,
                index: cx.value(index)?,
            },
            InstKind::ShuffleVector { x, y, mask } => InstBody::ShuffleVector {
                x: cx.value(x)?,
                y: cx.value(y)?,
                mask: cx.value(mask)?,
            },
            InstKind::ExtractValue { x, indices } => InstBody::ExtractValue {
                x: cx.value(x)?,
                indices: indices.clone(),
            },
            InstKind::InsertValue { x, elem, indices } => InstBody::InsertValue {
                x: cx.value(x)?,
                elem: cx.value(elem)?,
                indices: indices.clone(),
            },
            InstKind::Alloca { elem_ty, count, .. } => InstBody::Alloca {
                elem_ty: cx.resolve_type(elem_ty)?,
                count: count.as_ref().map(|count| cx.value(count)).transpose()?,
            },
            InstKind::Load {
                elem_ty,
                src,
                volatile,
            } => InstBody::Load {
                elem_ty: cx.resolve_type(elem_ty)?,
                src: cx.value(src)?,
                volatile: *volatile,
            },
            InstKind::Store { src, dst, volatile } => InstBody::Store {
                src: cx.value(src)?,
                dst: cx.value(dst)?,
                volatile: *volatile,
            },
            InstKind::Fence { ordering } => InstBody::Fence {
                ordering: *ordering,
            },
            InstKind::CmpXchg {
                ptr,
                cmp,
                new,
                success,
                failure,
            } => InstBody::CmpXchg {
                ptr: cx.value(ptr)?,
                cmp: cx.value(cmp)?,
                new: cx.value(new)?,
                success: *success,
                failure: *failure,
            },
            InstKind::AtomicRmw {
                op,
                dst,
                x,
                ordering,
            } => InstBody::AtomicRmw {
                op: *op,
                dst: cx.value(dst)?,
                x: cx.value(x)?,
                ordering: *ordering,
            },
            InstKind::GetElementPtr {
                elem_ty,
                src,
                indices,
                in_bounds,
            } => InstBody::GetElementPtr {
                elem_ty: cx.resolve_type(elem_ty)?,
                src: cx.value(src)?,
                indices: cx.values(indices)?,
                in_bounds: *in_bounds,
            },
            InstKind::Cast { op, from, .. } => InstBody::Cast {
                op: *op,
                from: cx.value(from)?,
            },
            InstKind::ICmp { pred, x, y } => {
                let x_ty = cx.resolve_type(&x.ty)?;
                InstBody::ICmp {
                    pred: *pred,
                    x: cx.untyped_value(x_ty, &x.value)?,
                    y: cx.untyped_value(x_ty, y)?,
                }
            }
            InstKind::FCmp { pred, x, y } => {
                let x_ty = cx.resolve_type(&x.ty)?;
                InstBody::FCmp {
                    pred: *pred,
                    x: cx.untyped_value(x_ty, &x.value)?,
                    y: cx.untyped_value(x_ty, y)?,
                }
            }
            InstKind::Phi { incoming, .. } => InstBody::Phi {
                incoming: incoming
                    .iter()
                    .map(|(value, pred)| Ok((cx.untyped_value(shell.ty, value)?, cx.block(pred)?)))
                    .collect::<Result<_, ResolveError>>()?,
            },
            InstKind::Select { cond, x, y } => InstBody::Select {
                cond: cx.value(cond)?,
                x: cx.value(x)?,
                y: cx.value(y)?,
            },
            InstKind::Call {
                ret,
                callee,
                args,
                tail,
            } => {
                let args = cx.values(args)?;
                InstBody::Call {
                    callee: cx.callee(ret, callee, &args)?,
                    args,
                    tail: *tail,
                }
            }
            InstKind::VaArg { list, .. } => InstBody::VaArg {
                list: cx.value(list)?,
            },
            InstKind::LandingPad { cleanup, clauses, .. } => InstBody::LandingPad {
                cleanup: *cleanup,
                clauses: clauses
                    .iter()
                    .map(|clause| match clause {
                        ClauseNode::Catch(v) => cx.value(v).map(Clause::Catch),
                        ClauseNode::Filter(v) => cx.value(v).map(Clause::Filter),
                    })
                    .collect::<Result<_, _>>()?,
            },
            InstKind::CatchPad { within, args } => InstBody::CatchPad {
                within: cx.token(within)?,
                args: cx.values(args)?,
            },
            InstKind::CleanupPad { within, args } => InstBody::CleanupPad {
                within: cx.token(within)?,
                args: cx.values(args)?,
            },
            InstKind::Unsupported { opcode } => return Err(ResolveError::unsupported(opcode)),
        };
        Ok(body)
    }

    fn link_term(&self, cx: &LinkContext<'_>, _shell: &Term, node: &TermKind) -> Result<TermBody, ResolveError> {
        let body = match node {
            TermKind::Ret { value } => TermBody::Ret {
                value: value.as_ref().map(|v| cx.value(v)).transpose()?,
            },
            TermKind::Br { target } => TermBody::Br {
                target: cx.block(target)?,
            },
            TermKind::CondBr {
                cond,
                then_target,
                else_target,
            } => TermBody::CondBr {
                cond: cx.value(cond)?,
                then_block: cx.block(then_target)?,
                else_block: cx.block(else_target)?,
            },
            TermKind::Switch { x, default, cases } => TermBody::Switch {
                x: cx.value(x)?,
                default: cx.block(default)?,
                cases: cases
                    .iter()
                    .map(|(value, target)| Ok((cx.value(value)?, cx.block(target)?)))
                    .collect::<Result<_, ResolveError>>()?,
            },
            TermKind::IndirectBr { addr, targets } => TermBody::IndirectBr {
                addr: cx.value(addr)?,
                targets: cx.blocks(targets)?,
            },
            TermKind::Invoke {
                ret,
                callee,
                args,
                normal,
                unwind,
            } => {
                let args = cx.values(args)?;
                TermBody::Invoke {
                    callee: cx.callee(ret, callee, &args)?,
                    args,
                    normal: cx.block(normal)?,
                    unwind: cx.block(unwind)?,
                }
            }
            TermKind::Resume { x } => TermBody::Resume { x: cx.value(x)? },
            TermKind::CatchSwitch {
                within,
                handlers,
                unwind,
            } => TermBody::CatchSwitch {
                within: cx.token(within)?,
                handlers: cx.blocks(handlers)?,
                unwind: unwind.as_ref().map(|b| cx.block(b)).transpose()?,
            },
            TermKind::CatchRet { from, to } => TermBody::CatchRet {
                from: cx.token(from)?,
                to: cx.block(to)?,
            },
            TermKind::CleanupRet { from, unwind } => TermBody::CleanupRet {
                from: cx.token(from)?,
                unwind: unwind.as_ref().map(|b| cx.block(b)).transpose()?,
            },
            TermKind::Unreachable => TermBody::Unreachable,
            TermKind::Unsupported { opcode } => return Err(ResolveError::unsupported(opcode)),
        };
        Ok(body)
    }
}
