//! Indented AST dump, used by the `parse` debugging entry point.
//!
//! Each node prints as `line: <indent>Label`, children one level
//! deeper, in parse order.

use std::fmt::Write;

use crate::ast::*;

const INDENT: usize = 4;

/// Renders a program as an indented tree, one node per line.
pub fn dump_program(program: &Program) -> String {
    let mut out = String::new();
    for stmt in program {
        dump_stmt(&mut out, stmt, 0);
    }
    out
}

fn node(out: &mut String, line: u32, depth: usize, label: &str) {
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}: {}{}", line, " ".repeat(INDENT * depth), label);
}

fn dump_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    match stmt {
        Stmt::Const(decl) => {
            node(out, decl.line, depth, &format!("ConstDecl {}", decl.name));
            dump_expr(out, &decl.value, depth + 1);
        }
        Stmt::Var(decl) => {
            node(
                out,
                decl.line,
                depth,
                &format!("VarDecl {} {}", decl.name, decl.datatype.name),
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
                &format!("FuncDecl {} {}", decl.name, decl.return_type.name),
            );
            for arg in &decl.args {
                node(
                    out,
                    arg.line,
                    depth + 1,
                    &format!("FuncArg {} {}", arg.name, arg.datatype.name),
                );
            }
            for stmt in &decl.body {
                dump_stmt(out, stmt, depth + 1);
            }
        }
        Stmt::Assign(assign) => {
            node(
                out,
                assign.line,
                depth,
                &format!("Assignment {}", assign.target.name),
            );
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
    match expr {
        Expr::IntLit(e) => node(out, e.line, depth, &format!("IntLit {}", e.value)),
        Expr::FloatLit(e) => node(out, e.line, depth, &format!("FloatLit {:?}", e.value)),
        Expr::CharLit(e) => node(out, e.line, depth, &format!("CharLit {}", e.value)),
        Expr::BoolLit(e) => node(out, e.line, depth, &format!("BoolLit {}", e.value)),
        Expr::Binary(e) => {
            node(out, e.line, depth, &format!("BinOp {}", e.op.as_str()));
            dump_expr(out, &e.lhs, depth + 1);
            dump_expr(out, &e.rhs, depth + 1);
        }
        Expr::Unary(e) => {
            node(out, e.line, depth, &format!("UnaryOp {}", e.op.as_str()));
            dump_expr(out, &e.operand, depth + 1);
        }
        Expr::Read(e) => node(out, e.line, depth, &format!("ReadLoc {}", e.loc.name)),
        Expr::Call(e) => {
            node(out, e.line, depth, &format!("Call {}", e.callee.name));
            for arg in &e.args {
                dump_expr(out, arg, depth + 1);
            }
        }
    }
}
