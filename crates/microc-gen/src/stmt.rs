//! Statement and control-flow lowering.

use crate::error::{CodeGenError, Result};
use crate::scope::Binding;
use crate::Generator;
use microc_par::{Block, ElseBranch, IfStmt, Stmt};

impl<'a> Generator<'a> {
    /// Lowers a block: push a scope, lower each statement, pop.
    pub(crate) fn emit_block(&mut self, block: &Block) -> Result<()> {
        self.scopes.push();
        for stmt in &block.stmts {
            self.emit_stmt(stmt)?;
        }
        self.scopes.pop();
        Ok(())
    }

    fn emit_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::Block(block) => self.emit_block(block),

            // Imports are accepted syntactically but perform no loading.
            Stmt::Import(_) => Ok(()),

            Stmt::Return(None) => {
                self.term("ret".to_string());
                Ok(())
            }

            Stmt::Return(Some(expr)) => {
                let value = self.emit_expr(expr)?;
                self.term(format!("ret {}", value.repr));
                Ok(())
            }

            Stmt::Def { name, ty, value } => {
                let ty = self.value_type(Some(ty.as_str()))?;
                let slot = self.fresh_temp();
                self.inst(format!("{} =l {} {}", slot, ty.alloc_instr(), ty.size()));
                // Bind before evaluating the initialiser, as the scope
                // rules specify.
                self.scopes.bind(
                    name.clone(),
                    Binding {
                        addr: slot.clone(),
                        ty,
                    },
                );
                match value {
                    Some(expr) => {
                        let value = self.emit_expr(expr)?;
                        if value.ty != ty {
                            return Err(self.fatal(CodeGenError::TypeMismatch(format!(
                                "cannot initialise {} '{}' with a {} value",
                                ty, name, value.ty
                            ))));
                        }
                        self.inst(format!("{} {}, {}", ty.store_instr(), value.repr, slot));
                    }
                    None => {
                        self.inst(format!("{} {}, {}", ty.store_instr(), ty.zero(), slot));
                    }
                }
                Ok(())
            }

            Stmt::Assign { name, value } => {
                let Some(binding) = self.scopes.resolve(name).cloned() else {
                    return Err(self.fatal(CodeGenError::UnresolvedIdentifier(name.clone())));
                };
                let value = self.emit_expr(value)?;
                if value.ty != binding.ty {
                    return Err(self.fatal(CodeGenError::TypeMismatch(format!(
                        "cannot assign a {} value to {} '{}'",
                        value.ty, binding.ty, name
                    ))));
                }
                self.inst(format!(
                    "{} {}, {}",
                    binding.ty.store_instr(),
                    value.repr,
                    binding.addr
                ));
                Ok(())
            }

            Stmt::Call(call) => {
                self.lower_call(call, false)?;
                Ok(())
            }

            Stmt::If(if_stmt) => self.emit_if(if_stmt),
        }
    }

    /// Lowers an if/else-if/else chain.
    ///
    /// One continuation label is shared by the whole chain and emitted
    /// exactly once, here at the outermost arm. Each arm body jumps to
    /// it unless the body already ended its block (a `return`), and a
    /// chain without a terminal else jumps to it from the final false
    /// edge, so every block the chain opens is explicitly terminated.
    fn emit_if(&mut self, if_stmt: &IfStmt) -> Result<()> {
        let cont = self.fresh_label();
        self.emit_if_arm(if_stmt, &cont)?;
        self.label(&cont);
        Ok(())
    }

    fn emit_if_arm(&mut self, arm: &IfStmt, cont: &str) -> Result<()> {
        let cond = self.emit_expr(&arm.cond)?;
        let then_label = self.fresh_label();
        let next_label = self.fresh_label();

        self.term(format!("jnz {}, {}, {}", cond.repr, then_label, next_label));

        self.label(&then_label);
        self.emit_block(&arm.then_block)?;
        if !self.terminated {
            self.term(format!("jmp {}", cont));
        }

        self.label(&next_label);
        match &arm.else_branch {
            None => {
                // No else: the false edge still needs a terminator
                // before the continuation label opens the next block.
                self.term(format!("jmp {}", cont));
            }
            Some(ElseBranch::ElseIf(inner)) => self.emit_if_arm(inner, cont)?,
            Some(ElseBranch::Else(block)) => {
                self.emit_block(block)?;
                if !self.terminated {
                    self.term(format!("jmp {}", cont));
                }
            }
        }
        Ok(())
    }
}
