//! The decorated tree the checker produces.
//!
//! Same shape as the syntactic AST, but every expression carries its
//! resolved [`Type`], declarations carry the scope they landed in, and
//! locations/types have been resolved away to plain names. The IR
//! generator consumes this tree and nothing else.

use micac_par::ast::{BinOp, UnOp};
use micac_util::Symbol;

use crate::scope::ScopeKind;
use crate::types::Type;

/// Decorated program.
pub type Program = Vec<Stmt>;

/// A checked statement.
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

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: Symbol,
    /// Inferred from the initialiser literal's type.
    pub ty: Type,
    pub value: Expr,
    pub scope: ScopeKind,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Symbol,
    pub ty: Type,
    pub value: Option<Expr>,
    pub scope: ScopeKind,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: Symbol,
    pub params: Vec<Param>,
    pub return_type: Type,
    pub body: Vec<Stmt>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Symbol,
    pub ty: Type,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: Symbol,
    pub value: Expr,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_block: Vec<Stmt>,
    pub else_block: Vec<Stmt>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Box<Stmt>,
    pub condition: Expr,
    pub step: Box<Stmt>,
    pub body: Vec<Stmt>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    /// `None` for `return;`, which has type `void`.
    pub value: Option<Expr>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStmt {
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub value: Expr,
    pub line: u32,
}

/// A checked expression: the node plus its resolved type.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Type,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    IntLit(i64),
    FloatLit(f64),
    CharLit(u8),
    BoolLit(bool),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    /// Reading a variable or constant.
    Load {
        name: Symbol,
    },
    Call {
        callee: Symbol,
        args: Vec<Expr>,
    },
}
