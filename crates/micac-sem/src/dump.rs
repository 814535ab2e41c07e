//! Indented dump of the decorated tree, used by `check --show-types`.
//!
//! Same layout as the parser's AST dump, with each typed node carrying
//! a trailing `type:` annotation.

use std::fmt::Write;

use crate::hir::*;

const INDENT: usize = 4;

/// Renders a checked program as an indented tree, one node per line,
/// with decorated types.
pub fn dump_typed(program: &Program) -> String {
    let mut out = String::new();
    for stmt in program {
        dump_stmt(&mut out, stmt, 0);
    }
    out
}

fn node(out: &mut String, line: u32, depth: usize, label: &str) {
    let _ = writeln!(out, "{}: {}{}", line, " ".repeat(INDENT * depth), label);
}

fn dump_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    match stmt {
        Stmt::Const(decl) => {
            node(
                out,
                decl.line,
                depth,
                &format!("ConstDecl {} ({}) type: {}", decl.name, decl.scope, decl.ty),
            );
            dump_expr(out, &decl.value, depth + 1);
        }
        Stmt::Var(decl) => {
            node(
                out,
                decl.line,
                depth,
                &format!("VarDecl {} ({}) type: {}", decl.name, decl.scope, decl.ty),
            );
            if let Some(value) = &decl.value {
                dump_expr(out, value, depth + 1);
            }
        }
        Stmt::Func(decl) => {
            node(
                out,
                decl.line,
                depth,
                &format!("FuncDecl {} type: {}", decl.name, decl.return_type),
            );
            for param in &decl.params {
                node(
                    out,
                    param.line,
                    depth + 1,
                    &format!("FuncArg {} type: {}", param.name, param.ty),
                );
            }
            for stmt in &decl.body {
                dump_stmt(out, stmt, depth + 1);
            }
        }
        Stmt::Assign(assign) => {
            node(out, assign.line, depth, &format!("Assignment {}", assign.name));
            dump_expr(out, &assign.value, depth + 1);
        }
        Stmt::If(s) => {
            node(out, s.line, depth, "IfStmt");
            dump_expr(out, &s.condition, depth + 1);
            for stmt in &s.then_block {
                dump_stmt(out, stmt, depth + 1);
            }
            if !s.else_block.is_empty() {
                node(out, s.line, depth, "Else");
                for stmt in &s.else_block {
                    dump_stmt(out, stmt, depth + 1);
                }
            }
        }
        Stmt::While(s) => {
            node(out, s.line, depth, "WhileStmt");
            dump_expr(out, &s.condition, depth + 1);
            for stmt in &s.body {
                dump_stmt(out, stmt, depth + 1);
            }
        }
        Stmt::For(s) => {
            node(out, s.line, depth, "ForStmt");
            dump_stmt(out, &s.init, depth + 1);
            dump_expr(out, &s.condition, depth + 1);
            dump_stmt(out, &s.step, depth + 1);
            for stmt in &s.body {
                dump_stmt(out, stmt, depth + 1);
            }
        }
        Stmt::Return(s) => {
            node(out, s.line, depth, "ReturnStmt");
            if let Some(value) = &s.value {
                dump_expr(out, value, depth + 1);
            }
        }
        Stmt::Break(s) => node(out, s.line, depth, "BreakStmt"),
        Stmt::Continue(s) => node(out, s.line, depth, "ContinueStmt"),
        Stmt::Print(s) => {
            node(out, s.line, depth, "PrintStmt");
            dump_expr(out, &s.value, depth + 1);
        }
    }
}

fn dump_expr(out: &mut String, expr: &Expr, depth: usize) {
    let label = match &expr.kind {
        ExprKind::IntLit(value) => format!("IntLit {}", value),
        ExprKind::FloatLit(value) => format!("FloatLit {:?}", value),
        ExprKind::CharLit(value) => format!("CharLit {}", value),
        ExprKind::BoolLit(value) => format!("BoolLit {}", value),
        ExprKind::Binary { op, .. } => format!("BinOp {}", op.as_str()),
        ExprKind::Unary { op, .. } => format!("UnaryOp {}", op.as_str()),
        ExprKind::Load { name } => format!("ReadLoc {}", name),
        ExprKind::Call { callee, .. } => format!("Call {}", callee),
    };
    node(out, expr.line, depth, &format!("{} type: {}", label, expr.ty));

    match &expr.kind {
        ExprKind::Binary { lhs, rhs, .. } => {
            dump_expr(out, lhs, depth + 1);
            dump_expr(out, rhs, depth + 1);
        }
        ExprKind::Unary { operand, .. } => dump_expr(out, operand, depth + 1),
        ExprKind::Call { args, .. } => {
            for arg in args {
                dump_expr(out, arg, depth + 1);
            }
        }
        _ => {}
    }
}
