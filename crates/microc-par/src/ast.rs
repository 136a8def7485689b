//! microc-par - AST node definitions.
//!
//! The AST is a closed set of owned nodes: a [`Program`] exclusively
//! owns its items, each item its children, so dropping the program
//! releases the whole tree. Nodes carry no source positions; the parser
//! reports diagnostics while it still has the tokens in hand, and the
//! emitter reports semantic errors without positions.
//!
//! All nodes implement structural equality, which backs the
//! print-and-reparse round-trip test.

/// AST root: the ordered top-level items of one source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub items: Vec<Item>,
}

/// A top-level item. Only function definitions/declarations and imports
/// may appear at the top level.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Func(FuncDef),
    Import(Import),
}

/// Function definition or forward declaration.
///
/// A declaration (`int f(int a);`) has `body: None` and
/// `is_declaration: true`; a definition owns its body block.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub name: String,
    pub return_type: String,
    pub params: Vec<Param>,
    pub body: Option<Block>,
    pub is_declaration: bool,
}

/// A single parameter.
///
/// The variadic marker `...` is represented as a parameter with no name
/// and no type; it is always last in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Option<String>,
    pub ty: Option<String>,
    pub is_variadic: bool,
}

impl Param {
    /// A named, typed parameter.
    pub fn named(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ty: Some(ty.into()),
            is_variadic: false,
        }
    }

    /// The trailing variadic marker.
    pub fn variadic() -> Self {
        Self {
            name: None,
            ty: None,
            is_variadic: true,
        }
    }
}

/// An import statement; the dotted module name is stored joined, e.g.
/// `"std.io"`. The emitter ignores imports.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub module: String,
}

/// An ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A nested block with its own scope.
    Block(Block),
    /// `return e;` or `return;`.
    Return(Option<Expr>),
    /// Definition `T x = e;`. The value-less form is reserved: the
    /// parser currently requires `=`, but the emitter zero-initialises
    /// when the value is absent.
    Def {
        name: String,
        ty: String,
        value: Option<Expr>,
    },
    /// Reassignment `x = e;`; `x` must resolve in an enclosing scope.
    Assign { name: String, value: Expr },
    /// A call in statement position.
    Call(CallExpr),
    If(IfStmt),
    Import(Import),
}

/// An `if` with optional else branch.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub cond: Expr,
    pub then_block: Block,
    pub else_branch: Option<ElseBranch>,
}

/// The else branch of an [`IfStmt`]: either another `if` (an
/// `else if` chain) or a terminal `else` block.
#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    ElseIf(Box<IfStmt>),
    Else(Block),
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call(CallExpr),
    Ident(String),
    Int(i64),
    Float(f64),
    /// Cooked string literal bytes.
    Str(Vec<u8>),
}

/// A function call, in expression or statement position.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub name: String,
    pub args: Vec<Expr>,
}

/// Binary operators, in the order of the precedence table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    /// `=` nested inside an expression; accepted by the grammar with the
    /// lowest precedence, rejected later by the emitter.
    Assign,
}

impl BinOp {
    /// Source spelling of the operator.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Assign => "=",
        }
    }
}
