//! AST node definitions.
//!
//! Nodes fall into four families: declarations, statements,
//! expressions, and locations/types. Every node carries the 1-based
//! source line it started on; the checker later decorates expressions
//! with types in its own tree, leaving these nodes purely syntactic.

use micac_util::Symbol;

/// AST root - a source file is a list of statements.
pub type Program = Vec<Stmt>;

/// A statement (declarations included; Mica allows them anywhere a
/// statement is allowed).
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Const(ConstDecl),
    Var(VarDecl),
    Func(FuncDecl),
    Assign(Assignment),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return(ReturnStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Print(PrintStmt),
}

impl Stmt {
    /// The line the statement starts on.
    pub fn line(&self) -> u32 {
        match self {
            Stmt::Const(s) => s.line,
            Stmt::Var(s) => s.line,
            Stmt::Func(s) => s.line,
            Stmt::Assign(s) => s.line,
            Stmt::If(s) => s.line,
            Stmt::While(s) => s.line,
            Stmt::For(s) => s.line,
            Stmt::Return(s) => s.line,
            Stmt::Break(s) => s.line,
            Stmt::Continue(s) => s.line,
            Stmt::Print(s) => s.line,
        }
    }
}

/// `const name = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: Symbol,
    pub value: Expr,
    pub line: u32,
}

/// `var name type;` or `var name type = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Symbol,
    pub datatype: SimpleType,
    pub value: Option<Expr>,
    pub line: u32,
}

/// `func name(args) type { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: Symbol,
    pub args: Vec<FuncArg>,
    pub return_type: SimpleType,
    pub body: Vec<Stmt>,
    pub line: u32,
}

/// A single `name type` parameter in a function head.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncArg {
    pub name: Symbol,
    pub datatype: SimpleType,
    pub line: u32,
}

/// `loc = value;` - augmented assignments and `++`/`--` desugar to
/// this at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: SimpleLoc,
    pub value: Expr,
    pub line: u32,
}

/// `if cond { then } else { else }` - the else block is empty when
/// absent.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_block: Vec<Stmt>,
    pub else_block: Vec<Stmt>,
    pub line: u32,
}

/// `while cond { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub line: u32,
}

/// `for init cond; step { body }` (parens around the header optional).
/// `init` and `step` are full statements, semicolons included.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Box<Stmt>,
    pub condition: Expr,
    pub step: Box<Stmt>,
    pub body: Vec<Stmt>,
    pub line: u32,
}

/// `return;` or `return value;`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub line: u32,
}

/// `break;`
#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub line: u32,
}

/// `continue;`
#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStmt {
    pub line: u32,
}

/// `print value;`
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub value: Expr,
    pub line: u32,
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntLit(IntLit),
    FloatLit(FloatLit),
    CharLit(CharLit),
    BoolLit(BoolLit),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Read(ReadLoc),
    Call(CallExpr),
}

impl Expr {
    /// The line the expression starts on.
    pub fn line(&self) -> u32 {
        match self {
            Expr::IntLit(e) => e.line,
            Expr::FloatLit(e) => e.line,
            Expr::CharLit(e) => e.line,
            Expr::BoolLit(e) => e.line,
            Expr::Binary(e) => e.line,
            Expr::Unary(e) => e.line,
            Expr::Read(e) => e.line,
            Expr::Call(e) => e.line,
        }
    }
}

/// Integer literal, already converted from its source base.
#[derive(Debug, Clone, PartialEq)]
pub struct IntLit {
    pub value: i64,
    pub line: u32,
}

/// Float literal.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatLit {
    pub value: f64,
    pub line: u32,
}

/// Character literal; the value is the byte, escapes already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct CharLit {
    pub value: u8,
    pub line: u32,
}

/// `true` / `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoolLit {
    pub value: bool,
    pub line: u32,
}

/// `lhs op rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: BinOp,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    pub line: u32,
}

/// `op operand`
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnOp,
    pub operand: Box<Expr>,
    pub line: u32,
}

/// A location used as an r-value. Every bare identifier read is
/// wrapped in one of these; assignment targets use [`SimpleLoc`]
/// directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadLoc {
    pub loc: SimpleLoc,
    pub line: u32,
}

/// `callee(args...)`
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: SimpleLoc,
    pub args: Vec<Expr>,
    pub line: u32,
}

/// A named storage location.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleLoc {
    pub name: Symbol,
    pub line: u32,
}

/// A type written as a name (`int`, `float`, `char`, `bool`, `void`).
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleType {
    pub name: Symbol,
    pub line: u32,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    NotEq,
    And,
    Or,
}

impl BinOp {
    /// The source spelling, used in diagnostics and in `CMP?` operands.
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::LtEq => "<=",
            BinOp::GtEq => ">=",
            BinOp::EqEq => "==",
            BinOp::NotEq => "!=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }

    /// Relational operators are non-associative in the grammar.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Lt | BinOp::Gt | BinOp::LtEq | BinOp::GtEq | BinOp::EqEq | BinOp::NotEq
        )
    }
}

/// Unary (prefix) operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    Pos,
    Neg,
    Not,
}

impl UnOp {
    /// The source spelling, used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            UnOp::Pos => "+",
            UnOp::Neg => "-",
            UnOp::Not => "!",
        }
    }
}
