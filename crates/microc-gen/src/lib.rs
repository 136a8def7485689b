//! microc-gen - QBE IR code generation and backend driver.
//!
//! This crate lowers a parsed [`Program`] to textual SSA IR in the QBE
//! dialect and drives the external toolchain that turns the IR into a
//! native executable (`qbe` to assemble the IR, the system C compiler
//! driver to produce the binary).
//!
//! # Module structure
//!
//! - `types.rs`: IR base types and the source-type mapping
//! - `scope.rs`: scoped symbol table (slot address + storage kind)
//! - `pool.rs`: deduplicated string-literal pool
//! - `expr.rs`: expression lowering
//! - `stmt.rs`: statement and control-flow lowering
//! - `backend.rs`: `qbe` / `cc` subprocess invocation
//! - `error.rs`: error types
//!
//! # Lowering model
//!
//! Every named variable lives in a stack slot (`alloc4`/`alloc8`);
//! parameters are spilled into slots in the prologue so assigning to a
//! parameter works exactly like assigning to a local. Identifiers in
//! expression position load from their slot with a typed `load`.
//! Fresh `%tN` temporaries and `@lN` labels come from monotonic
//! counters that reset per emission and are never reused across
//! functions.

mod backend;
mod error;
mod expr;
mod pool;
mod scope;
mod stmt;
mod types;

pub use backend::backend_available;
pub use error::{CodeGenError, Result};
pub use types::IrType;

use indexmap::IndexMap;
use microc_par::{Block, Expr, FuncDef, Item, Program, Stmt};
use microc_util::{Handler, Span};
use pool::StringPool;
use scope::{Binding, ScopeStack};
use std::fs;
use std::path::Path;

/// Options for the full generate pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenOptions {
    /// Keep the `.qbe` and `.asm` intermediates after a successful
    /// build instead of removing them.
    pub keep_intermediates: bool,
}

/// A registered function signature, taken from its top-level
/// definition or forward declaration.
#[derive(Clone, Debug)]
pub(crate) struct FnSig {
    /// Declared type names of the non-variadic parameters.
    param_types: Vec<Option<String>>,
    /// Whether the parameter list ends with `...`.
    variadic: bool,
    /// Declared return type name.
    return_type: String,
}

impl FnSig {
    fn from_def(def: &FuncDef) -> Self {
        Self {
            param_types: def
                .params
                .iter()
                .filter(|p| !p.is_variadic)
                .map(|p| p.ty.clone())
                .collect(),
            variadic: def.params.iter().any(|p| p.is_variadic),
            return_type: def.return_type.clone(),
        }
    }
}

/// An emitted value: its IR spelling and base type.
#[derive(Clone, Debug)]
pub(crate) struct Value {
    pub repr: String,
    pub ty: IrType,
}

/// The IR emitter.
///
/// All mutable state (scope stack, function table, string pool, fresh
/// name counters) lives exactly for one [`emit_module`] call.
///
/// [`emit_module`]: Generator::emit_module
pub struct Generator<'a> {
    handler: &'a Handler,
    buf: String,
    pub(crate) scopes: ScopeStack,
    funcs: IndexMap<String, FnSig>,
    pub(crate) pool: StringPool,
    next_temp: u32,
    next_label: u32,
    /// True when the last emitted instruction ended its basic block.
    pub(crate) terminated: bool,
}

impl<'a> Generator<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        Self {
            handler,
            buf: String::new(),
            scopes: ScopeStack::new(),
            funcs: IndexMap::new(),
            pool: StringPool::new(),
            next_temp: 0,
            next_label: 0,
            terminated: false,
        }
    }

    /// Lowers a program to QBE IR text.
    ///
    /// The first pass interns every string literal (pre-order, so pool
    /// order is first-encounter order) and registers every top-level
    /// function; the second pass emits the `data` section and then each
    /// function definition. Declarations emit nothing.
    pub fn emit_module(&mut self, program: &Program) -> Result<String> {
        self.reset();

        for item in &program.items {
            if let Item::Func(func) = item {
                self.funcs.insert(func.name.clone(), FnSig::from_def(func));
                if let Some(body) = &func.body {
                    self.collect_strings_block(body);
                }
            }
        }

        let mut data = String::new();
        for (bytes, name) in self.pool.iter() {
            data.push_str(&format!("data {} = {{ ", name));
            for &b in bytes {
                data.push_str(&format!("b {}, ", b));
            }
            data.push_str("b 0 }\n");
        }
        if !data.is_empty() {
            data.push('\n');
        }
        self.buf.push_str(&data);

        for item in &program.items {
            if let Item::Func(func) = item {
                if let Some(body) = &func.body {
                    self.emit_function(func, body)?;
                }
            }
        }

        Ok(std::mem::take(&mut self.buf))
    }

    /// Emits one function definition.
    fn emit_function(&mut self, func: &FuncDef, body: &Block) -> Result<()> {
        let ret_ty = self.return_type(&func.return_type)?;

        let mut params = Vec::new();
        for (i, param) in func.params.iter().enumerate() {
            if param.is_variadic {
                params.push("...".to_string());
            } else {
                let ty = self.value_type(param.ty.as_deref())?;
                params.push(format!("{} %p{}", ty, i));
            }
        }

        let export = if func.name == "main" { "export " } else { "" };
        match ret_ty {
            Some(ty) => self.buf.push_str(&format!(
                "{}function {} ${}({}) {{\n",
                export,
                ty,
                func.name,
                params.join(", ")
            )),
            None => self.buf.push_str(&format!(
                "{}function ${}({}) {{\n",
                export,
                func.name,
                params.join(", ")
            )),
        }
        self.label("@start");

        self.scopes.push();

        for (i, param) in func.params.iter().enumerate() {
            if param.is_variadic {
                continue;
            }
            let Some(name) = &param.name else { continue };
            let ty = self.value_type(param.ty.as_deref())?;
            let slot = self.fresh_temp();
            self.inst(format!("{} =l {} {}", slot, ty.alloc_instr(), ty.size()));
            self.inst(format!("{} %p{}, {}", ty.store_instr(), i, slot));
            self.scopes.bind(name.clone(), Binding { addr: slot, ty });
        }

        self.emit_block(body)?;

        if !self.terminated {
            match ret_ty {
                Some(ty) => self.term(format!("ret {}", ty.zero())),
                None => self.term("ret".to_string()),
            }
        }

        self.scopes.pop();
        self.buf.push_str("}\n\n");
        Ok(())
    }

    // =========================================================================
    // String pooling pass
    // =========================================================================

    fn collect_strings_block(&mut self, block: &Block) {
        for stmt in &block.stmts {
            self.collect_strings_stmt(stmt);
        }
    }

    fn collect_strings_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(block) => self.collect_strings_block(block),
            Stmt::Return(Some(expr)) => self.collect_strings_expr(expr),
            Stmt::Return(None) => {}
            Stmt::Def { value, .. } => {
                if let Some(expr) = value {
                    self.collect_strings_expr(expr);
                }
            }
            Stmt::Assign { value, .. } => self.collect_strings_expr(value),
            Stmt::Call(call) => {
                for arg in &call.args {
                    self.collect_strings_expr(arg);
                }
            }
            Stmt::If(if_stmt) => self.collect_strings_if(if_stmt),
            Stmt::Import(_) => {}
        }
    }

    fn collect_strings_if(&mut self, if_stmt: &microc_par::IfStmt) {
        self.collect_strings_expr(&if_stmt.cond);
        self.collect_strings_block(&if_stmt.then_block);
        match &if_stmt.else_branch {
            None => {}
            Some(microc_par::ElseBranch::ElseIf(inner)) => self.collect_strings_if(inner),
            Some(microc_par::ElseBranch::Else(block)) => self.collect_strings_block(block),
        }
    }

    fn collect_strings_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Str(bytes) => {
                self.pool.intern(bytes);
            }
            Expr::Binary { lhs, rhs, .. } => {
                self.collect_strings_expr(lhs);
                self.collect_strings_expr(rhs);
            }
            Expr::Call(call) => {
                for arg in &call.args {
                    self.collect_strings_expr(arg);
                }
            }
            Expr::Ident(_) | Expr::Int(_) | Expr::Float(_) => {}
        }
    }

    // =========================================================================
    // Emission helpers
    // =========================================================================

    fn reset(&mut self) {
        self.buf.clear();
        self.scopes = ScopeStack::new();
        self.funcs.clear();
        self.pool = StringPool::new();
        self.next_temp = 0;
        self.next_label = 0;
        self.terminated = false;
    }

    /// A fresh `%tN` temporary.
    pub(crate) fn fresh_temp(&mut self) -> String {
        let t = format!("%t{}", self.next_temp);
        self.next_temp += 1;
        t
    }

    /// A fresh `@lN` label.
    pub(crate) fn fresh_label(&mut self) -> String {
        let l = format!("@l{}", self.next_label);
        self.next_label += 1;
        l
    }

    /// Emits a regular instruction line.
    pub(crate) fn inst(&mut self, text: String) {
        self.buf.push('\t');
        self.buf.push_str(&text);
        self.buf.push('\n');
        self.terminated = false;
    }

    /// Emits a block-terminating instruction (`ret`, `jmp`, `jnz`).
    pub(crate) fn term(&mut self, text: String) {
        self.buf.push('\t');
        self.buf.push_str(&text);
        self.buf.push('\n');
        self.terminated = true;
    }

    /// Emits a basic-block label, opening a new (unterminated) block.
    pub(crate) fn label(&mut self, name: &str) {
        self.buf.push_str(name);
        self.buf.push('\n');
        self.terminated = false;
    }

    /// Maps a declared value type name to its IR type; `None` (the
    /// variadic sentinel or an inferred argument) defaults to `l`.
    pub(crate) fn value_type(&self, name: Option<&str>) -> Result<IrType> {
        match name {
            None => Ok(IrType::L),
            Some(name) => IrType::from_name(name)
                .ok_or_else(|| self.fatal(CodeGenError::UnknownType(name.to_string()))),
        }
    }

    /// Maps a declared return type name; `void` has no IR type.
    pub(crate) fn return_type(&self, name: &str) -> Result<Option<IrType>> {
        if name == "void" {
            Ok(None)
        } else {
            self.value_type(Some(name)).map(Some)
        }
    }

    /// Routes a fatal semantic error through the diagnostic sink and
    /// hands the error back for propagation. Emitter-stage errors carry
    /// no source position.
    pub(crate) fn fatal(&self, error: CodeGenError) -> CodeGenError {
        self.handler.fatal(error.to_string(), Span::DUMMY);
        error
    }

    /// Emits a warning through the diagnostic sink.
    pub(crate) fn warn(&self, message: String) {
        self.handler.warning(message, Span::DUMMY);
    }

    pub(crate) fn lookup_func(&self, name: &str) -> Option<FnSig> {
        self.funcs.get(name).cloned()
    }
}

/// Compiles a program to a native executable at `output`.
///
/// Writes `{output}.qbe`, assembles it with `qbe` to `{output}.asm`,
/// links with `cc`, and removes the intermediates on success. On a
/// backend or linker failure the intermediates are left behind for
/// inspection and no output file is produced.
pub fn generate(
    program: &Program,
    output: &Path,
    handler: &Handler,
    options: GenOptions,
) -> Result<()> {
    let mut generator = Generator::new(handler);
    let ir = generator.emit_module(program)?;

    let qbe_path = output.with_extension("qbe");
    let asm_path = output.with_extension("asm");

    fs::write(&qbe_path, &ir).map_err(|source| CodeGenError::Io {
        path: qbe_path.clone(),
        source,
    })?;

    backend::assemble(&qbe_path, &asm_path)?;
    backend::link(&asm_path, output)?;

    if !options.keep_intermediates {
        let _ = fs::remove_file(&qbe_path);
        let _ = fs::remove_file(&asm_path);
    }

    Ok(())
}

/// Lowers a program to IR text and writes it to `{output}.qbe` without
/// invoking the backend.
pub fn generate_ir_only(program: &Program, output: &Path, handler: &Handler) -> Result<()> {
    let mut generator = Generator::new(handler);
    let ir = generator.emit_module(program)?;
    let qbe_path = output.with_extension("qbe");
    fs::write(&qbe_path, &ir).map_err(|source| CodeGenError::Io {
        path: qbe_path.clone(),
        source,
    })?;
    Ok(())
}
