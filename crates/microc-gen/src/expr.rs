//! Expression lowering.

use crate::error::{CodeGenError, Result};
use crate::types::IrType;
use crate::{Generator, Value};
use microc_par::{BinOp, CallExpr, Expr};

impl<'a> Generator<'a> {
    /// Lowers an expression to a [`Value`].
    ///
    /// Identifiers resolve through the scope stack and load from their
    /// slot; literals emit immediates; strings emit their pooled global
    /// name.
    pub(crate) fn emit_expr(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Int(v) => Ok(Value {
                repr: v.to_string(),
                ty: IrType::L,
            }),
            Expr::Float(v) => Ok(Value {
                repr: format!("d_{}", v),
                ty: IrType::D,
            }),
            Expr::Str(bytes) => {
                let name = self.pool.intern(bytes);
                Ok(Value {
                    repr: name,
                    ty: IrType::L,
                })
            }
            Expr::Ident(name) => {
                let Some(binding) = self.scopes.resolve(name).cloned() else {
                    return Err(self.fatal(CodeGenError::UnresolvedIdentifier(name.clone())));
                };
                let t = self.fresh_temp();
                self.inst(format!(
                    "{} ={} {} {}",
                    t,
                    binding.ty,
                    binding.ty.load_instr(),
                    binding.addr
                ));
                Ok(Value {
                    repr: t,
                    ty: binding.ty,
                })
            }
            Expr::Call(call) => {
                let value = self.lower_call(call, true)?;
                value.ok_or_else(|| {
                    self.fatal(CodeGenError::TypeMismatch(format!(
                        "call to '{}' yields no value",
                        call.name
                    )))
                })
            }
            Expr::Binary { op, lhs, rhs } => self.emit_binary(*op, lhs, rhs),
        }
    }

    /// Lowers a binary operation. Operands are evaluated in source
    /// order and must share an IR type; arithmetic results take the
    /// left operand's type, comparisons always produce `w`.
    fn emit_binary(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr) -> Result<Value> {
        if op == BinOp::Assign {
            return Err(self.fatal(CodeGenError::UnsupportedOperator("=")));
        }

        let l = self.emit_expr(lhs)?;
        let r = self.emit_expr(rhs)?;

        if l.ty != r.ty {
            return Err(self.fatal(CodeGenError::TypeMismatch(format!(
                "operands of '{}' have types {} and {}",
                op.as_str(),
                l.ty,
                r.ty
            ))));
        }

        let t = self.fresh_temp();
        match op {
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Rem => {
                if op == BinOp::Rem && l.ty.is_float() {
                    return Err(self.fatal(CodeGenError::TypeMismatch(
                        "operator '%' requires integer operands".to_string(),
                    )));
                }
                let mnemonic = match op {
                    BinOp::Add => "add",
                    BinOp::Sub => "sub",
                    BinOp::Mul => "mul",
                    BinOp::Div => "div",
                    _ => "rem",
                };
                self.inst(format!("{} ={} {} {}, {}", t, l.ty, mnemonic, l.repr, r.repr));
                Ok(Value { repr: t, ty: l.ty })
            }
            _ => {
                // Comparisons: the backend's mnemonic is c<base><type>,
                // with signed orderings on the integer types.
                let base = match (op, l.ty.is_float()) {
                    (BinOp::Eq, _) => "eq",
                    (BinOp::Ne, _) => "ne",
                    (BinOp::Lt, false) => "slt",
                    (BinOp::Le, false) => "sle",
                    (BinOp::Gt, false) => "sgt",
                    (BinOp::Ge, false) => "sge",
                    (BinOp::Lt, true) => "lt",
                    (BinOp::Le, true) => "le",
                    (BinOp::Gt, true) => "gt",
                    _ => "ge",
                };
                self.inst(format!("{} =w c{}{} {}, {}", t, base, l.ty, l.repr, r.repr));
                Ok(Value {
                    repr: t,
                    ty: IrType::W,
                })
            }
        }
    }

    /// Lowers a function call.
    ///
    /// Arguments are evaluated left to right and annotated with the
    /// callee's declared parameter types; variadic tail arguments use
    /// their own inferred type, and the variadic boundary is marked with
    /// `...` in the call. An unknown callee produces a warning and is
    /// assumed to return `l`.
    ///
    /// Returns the result value, or `None` for a statement-position call
    /// to a function with no return value.
    pub(crate) fn lower_call(&mut self, call: &CallExpr, want_result: bool) -> Result<Option<Value>> {
        let sig = self.lookup_func(&call.name);
        if sig.is_none() {
            self.warn(format!("call to unknown function '{}'", call.name));
        }

        let mut lowered = Vec::new();
        for (i, arg) in call.args.iter().enumerate() {
            let value = self.emit_expr(arg)?;

            if let Some(sig) = &sig {
                if i < sig.param_types.len() {
                    let expected = self.value_type(sig.param_types[i].as_deref())?;
                    if value.ty != expected {
                        return Err(self.fatal(CodeGenError::TypeMismatch(format!(
                            "argument {} of call to '{}' is {} but the parameter is {}",
                            i + 1,
                            call.name,
                            value.ty,
                            expected
                        ))));
                    }
                }
            }

            lowered.push(value);
        }

        let fixed = sig.as_ref().map(|s| s.param_types.len()).unwrap_or(0);
        let variadic = sig.as_ref().map(|s| s.variadic).unwrap_or(false);

        let mut parts = Vec::new();
        for (i, value) in lowered.iter().enumerate() {
            if variadic && i == fixed {
                parts.push("...".to_string());
            }
            parts.push(format!("{} {}", value.ty, value.repr));
        }
        if variadic && lowered.len() <= fixed {
            parts.push("...".to_string());
        }
        let args_text = parts.join(", ");

        let ret = match &sig {
            Some(sig) => self.return_type(&sig.return_type)?,
            None => Some(IrType::L),
        };

        match ret {
            Some(ty) => {
                let t = self.fresh_temp();
                self.inst(format!("{} ={} call ${}({})", t, ty, call.name, args_text));
                Ok(Some(Value { repr: t, ty }))
            }
            None if want_result => {
                // Calling a void function for its value: bind an `l`
                // result, the default integer kind.
                let t = self.fresh_temp();
                self.inst(format!("{} =l call ${}({})", t, call.name, args_text));
                Ok(Some(Value {
                    repr: t,
                    ty: IrType::L,
                }))
            }
            None => {
                self.inst(format!("call ${}({})", call.name, args_text));
                Ok(None)
            }
        }
    }
}
