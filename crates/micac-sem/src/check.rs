//! The checker: name resolution, type propagation, validation.

use micac_par::ast;
use micac_util::Handler;

use crate::hir;
use crate::scope::{ScopeKind, SymbolInfo, SymbolTable};
use crate::types::{binary_op_type, unary_op_type, Type};

/// Checks a parsed program, reporting diagnostics to `handler`, and
/// returns the decorated tree.
///
/// The tree comes back even when diagnostics were reported - its
/// expressions then carry `Type::Error` where checking failed - so
/// debugging dumps always have something to show. The driver gates IR
/// generation on `handler.any_reported()`.
pub fn check_program(program: &ast::Program, handler: &Handler) -> hir::Program {
    let mut checker = Checker::new(handler);
    program.iter().map(|stmt| checker.check_stmt(stmt)).collect()
}

/// Record of the function whose body is being checked, for `return`
/// validation.
struct FunctionCtx {
    return_type: Type,
}

struct Checker<'a> {
    symbols: SymbolTable,
    handler: &'a Handler,
    function: Option<FunctionCtx>,
    loop_depth: u32,
}

/// How a location is being used; writes to non-writeable symbols are
/// rejected.
#[derive(Clone, Copy, PartialEq)]
enum Usage {
    Read,
    Write,
}

impl<'a> Checker<'a> {
    fn new(handler: &'a Handler) -> Self {
        Self {
            symbols: SymbolTable::new(),
            handler,
            function: None,
            loop_depth: 0,
        }
    }

    // =========================================================================
    // Statements and declarations
    // =========================================================================

    fn check_stmt(&mut self, stmt: &ast::Stmt) -> hir::Stmt {
        match stmt {
            ast::Stmt::Const(decl) => hir::Stmt::Const(self.check_const(decl)),
            ast::Stmt::Var(decl) => hir::Stmt::Var(self.check_var(decl)),
            ast::Stmt::Func(decl) => hir::Stmt::Func(self.check_func(decl)),
            ast::Stmt::Assign(assign) => hir::Stmt::Assign(self.check_assign(assign)),
            ast::Stmt::If(s) => hir::Stmt::If(self.check_if(s)),
            ast::Stmt::While(s) => hir::Stmt::While(self.check_while(s)),
            ast::Stmt::For(s) => hir::Stmt::For(self.check_for(s)),
            ast::Stmt::Return(s) => hir::Stmt::Return(self.check_return(s)),
            ast::Stmt::Break(s) => {
                if self.loop_depth == 0 {
                    self.handler
                        .report(s.line, "TypeError: break outside a loop");
                }
                hir::Stmt::Break(hir::BreakStmt { line: s.line })
            }
            ast::Stmt::Continue(s) => {
                if self.loop_depth == 0 {
                    self.handler
                        .report(s.line, "TypeError: continue outside a loop");
                }
                hir::Stmt::Continue(hir::ContinueStmt { line: s.line })
            }
            ast::Stmt::Print(s) => hir::Stmt::Print(hir::PrintStmt {
                value: self.check_expr(&s.value),
                line: s.line,
            }),
        }
    }

    /// A constant takes its type from the initialiser.
    fn check_const(&mut self, decl: &ast::ConstDecl) -> hir::ConstDecl {
        let value = self.check_expr(&decl.value);
        let ty = value.ty;
        let scope = self.declare(
            decl.line,
            "constant",
            SymbolInfo::value(decl.name, ty, false),
        );
        hir::ConstDecl {
            name: decl.name,
            ty,
            value,
            scope,
            line: decl.line,
        }
    }

    fn check_var(&mut self, decl: &ast::VarDecl) -> hir::VarDecl {
        let ty = self.check_type(&decl.datatype);
        let value = decl.value.as_ref().map(|v| self.check_expr(v));

        if let Some(value) = &value {
            if !ty.is_error() && !value.ty.is_error() && value.ty != ty {
                self.handler.report(
                    decl.line,
                    format!(
                        "TypeError: assigning type {} to \"{}\" of type {}",
                        value.ty, decl.name, ty
                    ),
                );
            }
        }

        let scope = self.declare(decl.line, "variable", SymbolInfo::value(decl.name, ty, true));
        hir::VarDecl {
            name: decl.name,
            ty,
            value,
            scope,
            line: decl.line,
        }
    }

    /// The function symbol is defined before its body is checked, so
    /// recursive calls resolve. Parameters live in the same frame as
    /// the body's declarations.
    fn check_func(&mut self, decl: &ast::FuncDecl) -> hir::FuncDecl {
        let return_type = self.check_type(&decl.return_type);
        let params: Vec<hir::Param> = decl
            .args
            .iter()
            .map(|arg| hir::Param {
                name: arg.name,
                ty: self.check_type(&arg.datatype),
                line: arg.line,
            })
            .collect();

        let param_info = params.iter().map(|p| (p.name, p.ty)).collect();
        self.declare(
            decl.line,
            "function",
            SymbolInfo::function(decl.name, return_type, param_info),
        );

        self.symbols.push_scope();
        for param in &params {
            self.declare(
                param.line,
                "variable",
                SymbolInfo::value(param.name, param.ty, true),
            );
        }

        let enclosing = self.function.replace(FunctionCtx { return_type });
        let enclosing_loops = std::mem::replace(&mut self.loop_depth, 0);

        let body = decl
            .body
            .iter()
            .map(|stmt| self.check_stmt(stmt))
            .collect();

        self.loop_depth = enclosing_loops;
        self.function = enclosing;
        self.symbols.pop_scope();

        hir::FuncDecl {
            name: decl.name,
            params,
            return_type,
            body,
            line: decl.line,
        }
    }

    fn check_assign(&mut self, assign: &ast::Assignment) -> hir::Assignment {
        let target_ty = self.resolve_location(&assign.target, Usage::Write);
        let value = self.check_expr(&assign.value);

        if !target_ty.is_error() && !value.ty.is_error() && target_ty != value.ty {
            self.handler.report(
                assign.line,
                format!(
                    "TypeError: assigning type {} to \"{}\" of type {}",
                    value.ty, assign.target.name, target_ty
                ),
            );
        }

        hir::Assignment {
            name: assign.target.name,
            value,
            line: assign.line,
        }
    }

    fn check_if(&mut self, s: &ast::IfStmt) -> hir::IfStmt {
        let condition = self.check_condition(&s.condition, s.line, "if");
        let then_block = self.check_block(&s.then_block);
        let else_block = self.check_block(&s.else_block);
        hir::IfStmt {
            condition,
            then_block,
            else_block,
            line: s.line,
        }
    }

    fn check_while(&mut self, s: &ast::WhileStmt) -> hir::WhileStmt {
        let condition = self.check_condition(&s.condition, s.line, "while");
        self.loop_depth += 1;
        let body = self.check_block(&s.body);
        self.loop_depth -= 1;
        hir::WhileStmt {
            condition,
            body,
            line: s.line,
        }
    }

    /// The whole `for` construct shares one frame, so a declaration in
    /// the init is visible to the condition, step and body but not
    /// outside; the body additionally gets its own frame.
    fn check_for(&mut self, s: &ast::ForStmt) -> hir::ForStmt {
        self.symbols.push_scope();

        let init = Box::new(self.check_stmt(&s.init));
        let condition = self.check_condition(&s.condition, s.line, "for");
        let step = Box::new(self.check_stmt(&s.step));

        self.loop_depth += 1;
        let body = self.check_block(&s.body);
        self.loop_depth -= 1;

        self.symbols.pop_scope();

        hir::ForStmt {
            init,
            condition,
            step,
            body,
            line: s.line,
        }
    }

    fn check_return(&mut self, s: &ast::ReturnStmt) -> hir::ReturnStmt {
        let value = s.value.as_ref().map(|v| self.check_expr(v));
        let ty = value.as_ref().map(|v| v.ty).unwrap_or(Type::Void);

        match &self.function {
            Some(ctx) => {
                if !ty.is_error() && ty != ctx.return_type {
                    self.handler.report(
                        s.line,
                        format!(
                            "TypeError: returning {} instead of {}",
                            ty, ctx.return_type
                        ),
                    );
                }
            }
            None => {
                self.handler
                    .report(s.line, "TypeError: returning outside a function.");
            }
        }

        hir::ReturnStmt {
            value,
            line: s.line,
        }
    }

    /// Checks a block in its own scope frame. The pop is unconditional:
    /// nothing in here returns early.
    fn check_block(&mut self, stmts: &[ast::Stmt]) -> Vec<hir::Stmt> {
        self.symbols.push_scope();
        let checked = stmts.iter().map(|stmt| self.check_stmt(stmt)).collect();
        self.symbols.pop_scope();
        checked
    }

    fn check_condition(&mut self, cond: &ast::Expr, line: u32, keyword: &str) -> hir::Expr {
        let condition = self.check_expr(cond);
        if !condition.ty.is_error() && condition.ty != Type::Bool {
            self.handler.report(
                line,
                format!("TypeError: {}-statement condition is not a boolean", keyword),
            );
        }
        condition
    }

    /// Defines a name in the current frame, rejecting builtin type
    /// names and same-frame redefinition. Returns the scope the
    /// declaration landed in either way, for the decorated tree.
    fn declare(&mut self, line: u32, kind: &str, info: SymbolInfo) -> ScopeKind {
        let scope = self.symbols.current_scope();
        let name = info.name;

        if Type::is_builtin_name(name.as_str()) {
            self.handler.report(
                line,
                format!("NameError: cannot declare variable with name {}", name),
            );
            return scope;
        }

        if !self.symbols.define(info) {
            self.handler.report(
                line,
                format!("NameError: {} \"{}\" already defined.", kind, name),
            );
        }
        scope
    }

    /// Resolves a type name; unknown names poison to `Error`.
    fn check_type(&mut self, datatype: &ast::SimpleType) -> Type {
        match Type::from_name(datatype.name.as_str()) {
            Some(ty) => ty,
            None => {
                self.handler.report(
                    datatype.line,
                    format!("TypeError: unknown type \"{}\"", datatype.name),
                );
                Type::Error
            }
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn check_expr(&mut self, expr: &ast::Expr) -> hir::Expr {
        match expr {
            ast::Expr::IntLit(e) => typed(hir::ExprKind::IntLit(e.value), Type::Int, e.line),
            ast::Expr::FloatLit(e) => typed(hir::ExprKind::FloatLit(e.value), Type::Float, e.line),
            ast::Expr::CharLit(e) => typed(hir::ExprKind::CharLit(e.value), Type::Char, e.line),
            ast::Expr::BoolLit(e) => typed(hir::ExprKind::BoolLit(e.value), Type::Bool, e.line),
            ast::Expr::Binary(e) => {
                let lhs = self.check_expr(&e.lhs);
                let rhs = self.check_expr(&e.rhs);
                let ty = binary_op_type(lhs.ty, e.op, rhs.ty);
                if ty.is_error() && !lhs.ty.is_error() && !rhs.ty.is_error() {
                    self.handler.report(
                        e.line,
                        format!(
                            "TypeError: performing \"{}\" on {} and {}",
                            e.op.as_str(),
                            lhs.ty,
                            rhs.ty
                        ),
                    );
                }
                typed(
                    hir::ExprKind::Binary {
                        op: e.op,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    },
                    ty,
                    e.line,
                )
            }
            ast::Expr::Unary(e) => {
                let operand = self.check_expr(&e.operand);
                let ty = unary_op_type(e.op, operand.ty);
                if ty.is_error() && !operand.ty.is_error() {
                    self.handler.report(
                        e.line,
                        format!("TypeError: performing \"{}\" on {}", e.op.as_str(), operand.ty),
                    );
                }
                typed(
                    hir::ExprKind::Unary {
                        op: e.op,
                        operand: Box::new(operand),
                    },
                    ty,
                    e.line,
                )
            }
            ast::Expr::Read(e) => {
                let ty = self.resolve_location(&e.loc, Usage::Read);
                typed(hir::ExprKind::Load { name: e.loc.name }, ty, e.line)
            }
            ast::Expr::Call(e) => self.check_call(e),
        }
    }

    fn check_call(&mut self, call: &ast::CallExpr) -> hir::Expr {
        let args: Vec<hir::Expr> = call.args.iter().map(|a| self.check_expr(a)).collect();
        let name = call.callee.name;

        let ty = match self.symbols.lookup(name) {
            None => {
                self.handler.report(
                    call.callee.line,
                    format!("NameError: symbol \"{}\" undefined.", name),
                );
                Type::Error
            }
            Some(info) => {
                if !info.callable {
                    self.handler
                        .report(call.line, format!("TypeError: \"{}\" is not callable.", name));
                    Type::Error
                } else if info.params.len() != args.len() {
                    let expected = info.params.len();
                    self.handler.report(
                        call.line,
                        format!(
                            "TypeError: {}() takes {} argument{} but {} given",
                            name,
                            expected,
                            if expected == 1 { "" } else { "s" },
                            args.len()
                        ),
                    );
                    Type::Error
                } else if info
                    .params
                    .iter()
                    .zip(&args)
                    .any(|((_, pt), arg)| !pt.is_error() && !arg.ty.is_error() && *pt != arg.ty)
                {
                    let expected = join_types(info.params.iter().map(|(_, ty)| *ty));
                    let got = join_types(args.iter().map(|arg| arg.ty));
                    self.handler.report(
                        call.line,
                        format!("TypeError: {}() expecting ({}), got ({})", name, expected, got),
                    );
                    Type::Error
                } else if args.iter().any(|arg| arg.ty.is_error()) {
                    // A poisoned argument silently poisons the call.
                    Type::Error
                } else {
                    info.ty
                }
            }
        };

        typed(
            hir::ExprKind::Call { callee: name, args },
            ty,
            call.line,
        )
    }

    /// Looks a location up and enforces writability. Unresolved names
    /// poison to `Error`.
    fn resolve_location(&mut self, loc: &ast::SimpleLoc, usage: Usage) -> Type {
        match self.symbols.lookup(loc.name) {
            Some(info) => {
                if usage == Usage::Write && !info.writeable {
                    self.handler.report(
                        loc.line,
                        format!("TypeError: cannot assign to constant \"{}\"", loc.name),
                    );
                }
                info.ty
            }
            None => {
                self.handler.report(
                    loc.line,
                    format!("NameError: symbol \"{}\" undefined.", loc.name),
                );
                Type::Error
            }
        }
    }
}

fn typed(kind: hir::ExprKind, ty: Type, line: u32) -> hir::Expr {
    hir::Expr { kind, ty, line }
}

fn join_types(types: impl Iterator<Item = Type>) -> String {
    types
        .map(|ty| ty.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
