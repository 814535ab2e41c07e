//! Lowering from the checked tree to per-procedure instruction lists.
//!
//! A post-order walk: operands are lowered before the instruction that
//! consumes them, and each expression's result register is simply the
//! walk's return value. Register and label counters are fields on the
//! per-procedure builder and reset for every procedure, so registers
//! form the gap-free SSA sequence `R1..Rk` per procedure and labels
//! the sequence `B1..Bm`.
//!
//! Loop lowering: `break` branches to the loop's end label. In a
//! `while`, `continue` branches back to the head; in a `for` (which
//! desugars to `init; while cond { body; step }`) it branches to a
//! dedicated step label placed before the step statement, so the step
//! is never skipped.

use micac_sem::{hir, ScopeKind, Type};
use micac_util::{symbol, Symbol};

use crate::inst::{Inst, Label, Literal, Reg, TypeSuffix};
use crate::proc::Procedure;

/// Lowers a checked program into its procedures: `_init` first, then
/// every `func` in source order.
pub fn generate(program: &hir::Program) -> Vec<Procedure> {
    let mut gen = Generator { procs: Vec::new() };

    let mut init = ProcBuilder::new(
        symbol::SYM_INIT,
        Vec::new(),
        Vec::new(),
        Type::Void,
        true,
    );
    for stmt in program {
        gen.lower_stmt(stmt, &mut init);
    }

    let mut procs = vec![init.finish()];
    procs.append(&mut gen.procs);
    procs
}

/// Targets a `break` or `continue` may branch to in the innermost
/// enclosing loop.
struct LoopCtx {
    break_label: Label,
    continue_label: Label,
}

/// Accumulates finished procedures while the walk is inside `_init` or
/// some function body.
struct Generator {
    procs: Vec<Procedure>,
}

/// Builder for one procedure's instruction list, owning the SSA
/// register counter and the label counter.
struct ProcBuilder {
    name: Symbol,
    param_names: Vec<Symbol>,
    param_types: Vec<Type>,
    return_type: Type,
    code: Vec<Inst>,
    registers: u32,
    labels: u32,
    loops: Vec<LoopCtx>,
    is_init: bool,
}

impl ProcBuilder {
    fn new(
        name: Symbol,
        param_names: Vec<Symbol>,
        param_types: Vec<Type>,
        return_type: Type,
        is_init: bool,
    ) -> Self {
        Self {
            name,
            param_names,
            param_types,
            return_type,
            code: Vec::new(),
            registers: 0,
            labels: 0,
            loops: Vec::new(),
            is_init,
        }
    }

    fn new_register(&mut self) -> Reg {
        self.registers += 1;
        Reg(self.registers)
    }

    fn new_label(&mut self) -> Label {
        self.labels += 1;
        Label(self.labels)
    }

    fn emit(&mut self, inst: Inst) {
        self.code.push(inst);
    }

    /// Closes the procedure. A `void` function whose stream does not
    /// already end in `RET` gets a bare one appended; `_init` is left
    /// as-is for the downstream generator to wrap.
    fn finish(mut self) -> Procedure {
        if !self.is_init
            && self.return_type == Type::Void
            && !matches!(self.code.last(), Some(Inst::Ret(_)))
        {
            self.emit(Inst::Ret(None));
        }
        Procedure {
            name: self.name,
            param_names: self.param_names,
            param_types: self.param_types,
            return_type: self.return_type,
            code: self.code,
        }
    }
}

impl Generator {
    fn lower_stmt(&mut self, stmt: &hir::Stmt, b: &mut ProcBuilder) {
        match stmt {
            hir::Stmt::Const(decl) => {
                let value = self.lower_expr(&decl.value, b);
                emit_declare(b, decl.ty, decl.name, decl.scope);
                b.emit(Inst::Store(
                    TypeSuffix::from_type(decl.value.ty),
                    value,
                    decl.name,
                ));
            }
            hir::Stmt::Var(decl) => {
                let value = decl.value.as_ref().map(|v| (self.lower_expr(v, b), v.ty));
                emit_declare(b, decl.ty, decl.name, decl.scope);
                if let Some((reg, ty)) = value {
                    b.emit(Inst::Store(TypeSuffix::from_type(ty), reg, decl.name));
                }
            }
            hir::Stmt::Func(decl) => self.lower_function(decl),
            hir::Stmt::Assign(assign) => {
                let value = self.lower_expr(&assign.value, b);
                b.emit(Inst::Store(
                    TypeSuffix::from_type(assign.value.ty),
                    value,
                    assign.name,
                ));
            }
            hir::Stmt::If(s) => self.lower_if(s, b),
            hir::Stmt::While(s) => self.lower_while(s, b),
            hir::Stmt::For(s) => self.lower_for(s, b),
            hir::Stmt::Return(s) => {
                let value = s.value.as_ref().map(|v| self.lower_expr(v, b));
                b.emit(Inst::Ret(value));
            }
            hir::Stmt::Break(_) => {
                // The checker rejects break outside a loop.
                if let Some(ctx) = b.loops.last() {
                    let label = ctx.break_label;
                    b.emit(Inst::Branch(label));
                }
            }
            hir::Stmt::Continue(_) => {
                if let Some(ctx) = b.loops.last() {
                    let label = ctx.continue_label;
                    b.emit(Inst::Branch(label));
                }
            }
            hir::Stmt::Print(s) => {
                let value = self.lower_expr(&s.value, b);
                b.emit(Inst::Print(TypeSuffix::from_type(s.value.ty), value));
            }
        }
    }

    /// `CBRANCH cond then else; then-block; BRANCH end; else-block;
    /// BRANCH end; end` - both arms jump forward to the shared end
    /// label, the else arm possibly empty.
    fn lower_if(&mut self, s: &hir::IfStmt, b: &mut ProcBuilder) {
        let condition = self.lower_expr(&s.condition, b);
        let l_then = b.new_label();
        let l_else = b.new_label();
        let l_end = b.new_label();

        b.emit(Inst::CBranch(condition, l_then, l_else));
        b.emit(Inst::Label(l_then));
        for stmt in &s.then_block {
            self.lower_stmt(stmt, b);
        }
        b.emit(Inst::Branch(l_end));
        b.emit(Inst::Label(l_else));
        for stmt in &s.else_block {
            self.lower_stmt(stmt, b);
        }
        b.emit(Inst::Branch(l_end));
        b.emit(Inst::Label(l_end));
    }

    /// `BRANCH head; head: cond; CBRANCH cond body end; body: ...;
    /// BRANCH head; end` - the back-edge re-evaluates the condition.
    fn lower_while(&mut self, s: &hir::WhileStmt, b: &mut ProcBuilder) {
        let l_head = b.new_label();
        let l_body = b.new_label();
        let l_end = b.new_label();

        b.emit(Inst::Branch(l_head));
        b.emit(Inst::Label(l_head));
        let condition = self.lower_expr(&s.condition, b);
        b.emit(Inst::CBranch(condition, l_body, l_end));

        b.emit(Inst::Label(l_body));
        b.loops.push(LoopCtx {
            break_label: l_end,
            continue_label: l_head,
        });
        for stmt in &s.body {
            self.lower_stmt(stmt, b);
        }
        b.loops.pop();
        b.emit(Inst::Branch(l_head));
        b.emit(Inst::Label(l_end));
    }

    /// Desugars to `init; while cond { body; step }`, with a step
    /// label between body and step as the `continue` target.
    fn lower_for(&mut self, s: &hir::ForStmt, b: &mut ProcBuilder) {
        self.lower_stmt(&s.init, b);

        let l_head = b.new_label();
        let l_body = b.new_label();
        let l_step = b.new_label();
        let l_end = b.new_label();

        b.emit(Inst::Branch(l_head));
        b.emit(Inst::Label(l_head));
        let condition = self.lower_expr(&s.condition, b);
        b.emit(Inst::CBranch(condition, l_body, l_end));

        b.emit(Inst::Label(l_body));
        b.loops.push(LoopCtx {
            break_label: l_end,
            continue_label: l_step,
        });
        for stmt in &s.body {
            self.lower_stmt(stmt, b);
        }
        b.loops.pop();

        b.emit(Inst::Label(l_step));
        self.lower_stmt(&s.step, b);
        b.emit(Inst::Branch(l_head));
        b.emit(Inst::Label(l_end));
    }

    /// Opens a fresh procedure. Parameters arrive in `R1..Rn` and are
    /// spilled to stack slots up front; the body then loads them like
    /// any other local.
    fn lower_function(&mut self, decl: &hir::FuncDecl) {
        let mut b = ProcBuilder::new(
            decl.name,
            decl.params.iter().map(|p| p.name).collect(),
            decl.params.iter().map(|p| p.ty).collect(),
            decl.return_type,
            false,
        );

        for param in &decl.params {
            let suffix = TypeSuffix::from_type(param.ty);
            b.emit(Inst::Alloc(suffix, param.name));
            let incoming = b.new_register();
            b.emit(Inst::Store(suffix, incoming, param.name));
        }

        for stmt in &decl.body {
            self.lower_stmt(stmt, &mut b);
        }

        self.procs.push(b.finish());
    }

    fn lower_expr(&mut self, expr: &hir::Expr, b: &mut ProcBuilder) -> Reg {
        match &expr.kind {
            hir::ExprKind::IntLit(value) => {
                let target = b.new_register();
                b.emit(Inst::Mov(TypeSuffix::I, Literal::Int(*value), target));
                target
            }
            hir::ExprKind::FloatLit(value) => {
                let target = b.new_register();
                b.emit(Inst::Mov(TypeSuffix::F, Literal::Float(*value), target));
                target
            }
            hir::ExprKind::CharLit(value) => {
                let target = b.new_register();
                b.emit(Inst::Mov(TypeSuffix::B, Literal::Int(*value as i64), target));
                target
            }
            hir::ExprKind::BoolLit(value) => {
                let target = b.new_register();
                b.emit(Inst::Mov(
                    TypeSuffix::I,
                    Literal::Int(if *value { 1 } else { 0 }),
                    target,
                ));
                target
            }
            hir::ExprKind::Binary { op, lhs, rhs } => {
                let r1 = self.lower_expr(lhs, b);
                let r2 = self.lower_expr(rhs, b);
                let target = b.new_register();
                b.emit(binary_inst(*op, expr.ty, lhs.ty, r1, r2, target));
                target
            }
            hir::ExprKind::Unary { op, operand } => self.lower_unary(*op, operand, expr.ty, b),
            hir::ExprKind::Load { name } => {
                let target = b.new_register();
                b.emit(Inst::Load(TypeSuffix::from_type(expr.ty), *name, target));
                target
            }
            hir::ExprKind::Call { callee, args } => {
                let arg_regs: Vec<Reg> = args.iter().map(|arg| self.lower_expr(arg, b)).collect();
                let target = b.new_register();
                b.emit(Inst::Call(*callee, arg_regs, target));
                target
            }
        }
    }

    /// `-x` materialises a zero and subtracts; `!x` materialises a one
    /// and subtracts; `+x` reuses the operand's register outright.
    fn lower_unary(
        &mut self,
        op: micac_par::ast::UnOp,
        operand: &hir::Expr,
        ty: Type,
        b: &mut ProcBuilder,
    ) -> Reg {
        use micac_par::ast::UnOp;

        let value = self.lower_expr(operand, b);
        match op {
            UnOp::Pos => value,
            UnOp::Neg => {
                let suffix = TypeSuffix::from_type(ty);
                let zero = b.new_register();
                let payload = match suffix {
                    TypeSuffix::F => Literal::Float(0.0),
                    _ => Literal::Int(0),
                };
                b.emit(Inst::Mov(suffix, payload, zero));
                let target = b.new_register();
                b.emit(Inst::Sub(suffix, zero, value, target));
                target
            }
            UnOp::Not => {
                let one = b.new_register();
                b.emit(Inst::Mov(TypeSuffix::I, Literal::Int(1), one));
                let target = b.new_register();
                b.emit(Inst::Sub(TypeSuffix::I, one, value, target));
                target
            }
        }
    }
}

/// Globals declare with `VAR?`, locals stack-allocate with `ALLOC?`.
fn emit_declare(b: &mut ProcBuilder, ty: Type, name: Symbol, scope: ScopeKind) {
    let suffix = TypeSuffix::from_type(ty);
    match scope {
        ScopeKind::Global => b.emit(Inst::Var(suffix, name)),
        ScopeKind::Local => b.emit(Inst::Alloc(suffix, name)),
    }
}

/// Picks the instruction for a binary operator. Arithmetic takes its
/// suffix from the result type, comparisons from the operand type
/// (their result is always boolean), `&&`/`||` lower to the bitwise
/// surrogates.
fn binary_inst(
    op: micac_par::ast::BinOp,
    result_ty: Type,
    operand_ty: Type,
    r1: Reg,
    r2: Reg,
    target: Reg,
) -> Inst {
    use micac_par::ast::BinOp;

    match op {
        BinOp::Add => Inst::Add(TypeSuffix::from_type(result_ty), r1, r2, target),
        BinOp::Sub => Inst::Sub(TypeSuffix::from_type(result_ty), r1, r2, target),
        BinOp::Mul => Inst::Mul(TypeSuffix::from_type(result_ty), r1, r2, target),
        BinOp::Div => Inst::Div(TypeSuffix::from_type(result_ty), r1, r2, target),
        BinOp::Lt | BinOp::Gt | BinOp::LtEq | BinOp::GtEq | BinOp::EqEq | BinOp::NotEq => {
            Inst::Cmp(TypeSuffix::from_type(operand_ty), op.as_str(), r1, r2, target)
        }
        BinOp::And => Inst::And(r1, r2, target),
        BinOp::Or => Inst::Or(r1, r2, target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use micac_par::parse;
    use micac_sem::check_program;
    use micac_util::Handler;

    /// Runs the full front end and lowers; the source must be clean.
    fn ircode(source: &str) -> Vec<Procedure> {
        let handler = Handler::new();
        let ast = parse(source, &handler);
        let checked = check_program(&ast, &handler);
        assert!(
            !handler.any_reported(),
            "test source has diagnostics: {:?}",
            handler.diagnostics()
        );
        generate(&checked)
    }

    fn init_code(source: &str) -> Vec<String> {
        let procs = ircode(source);
        procs[0].code.iter().map(|inst| inst.to_string()).collect()
    }

    /// Registers in each procedure must form a gap-free sequence, each
    /// produced once. Parameters occupy R1..Rn, so instruction targets
    /// start at Rn+1.
    fn assert_ssa(procs: &[Procedure]) {
        for proc in procs {
            let params = proc.param_names.len() as u32;
            let targets: Vec<u32> = proc.code.iter().filter_map(|i| i.target()).map(|r| r.0).collect();
            let expected: Vec<u32> = (params + 1..params + 1 + targets.len() as u32).collect();
            assert_eq!(targets, expected, "SSA violation in {}", proc.name);
        }
    }

    /// Every branched-to label must appear exactly once as a LABEL in
    /// the same procedure.
    fn assert_labels_resolve(procs: &[Procedure]) {
        for proc in procs {
            let defined: Vec<Label> = proc
                .code
                .iter()
                .filter_map(|inst| match inst {
                    Inst::Label(l) => Some(*l),
                    _ => None,
                })
                .collect();
            for inst in &proc.code {
                let used: Vec<Label> = match inst {
                    Inst::Branch(l) => vec![*l],
                    Inst::CBranch(_, t, f) => vec![*t, *f],
                    _ => vec![],
                };
                for label in used {
                    assert_eq!(
                        defined.iter().filter(|d| **d == label).count(),
                        1,
                        "label {} unresolved in {}",
                        label,
                        proc.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_print_literal() {
        assert_eq!(init_code("print 3;"), vec!["('MOVI', 3, 'R1')", "('PRINTI', 'R1')"]);
    }

    #[test]
    fn test_print_each_literal_kind() {
        assert_eq!(
            init_code("print 3;\nprint 3.5;\nprint 'a';"),
            vec![
                "('MOVI', 3, 'R1')",
                "('PRINTI', 'R1')",
                "('MOVF', 3.5, 'R2')",
                "('PRINTF', 'R2')",
                "('MOVB', 97, 'R3')",
                "('PRINTB', 'R3')",
            ]
        );
    }

    #[test]
    fn test_binary_operations_in_evaluation_order() {
        assert_eq!(
            init_code("print (3 + 4*5 - 6) / 7;"),
            vec![
                "('MOVI', 3, 'R1')",
                "('MOVI', 4, 'R2')",
                "('MOVI', 5, 'R3')",
                "('MULI', 'R2', 'R3', 'R4')",
                "('ADDI', 'R1', 'R4', 'R5')",
                "('MOVI', 6, 'R6')",
                "('SUBI', 'R5', 'R6', 'R7')",
                "('MOVI', 7, 'R8')",
                "('DIVI', 'R7', 'R8', 'R9')",
                "('PRINTI', 'R9')",
            ]
        );
    }

    #[test]
    fn test_unary_operations() {
        assert_eq!(
            init_code("print -(1+2);\nprint +(3+4);"),
            vec![
                "('MOVI', 1, 'R1')",
                "('MOVI', 2, 'R2')",
                "('ADDI', 'R1', 'R2', 'R3')",
                "('MOVI', 0, 'R4')",
                "('SUBI', 'R4', 'R3', 'R5')",
                "('PRINTI', 'R5')",
                "('MOVI', 3, 'R6')",
                "('MOVI', 4, 'R7')",
                "('ADDI', 'R6', 'R7', 'R8')",
                "('PRINTI', 'R8')",
            ]
        );
    }

    #[test]
    fn test_unary_negation_of_float() {
        assert_eq!(
            init_code("print -(5.0+6.0);"),
            vec![
                "('MOVF', 5.0, 'R1')",
                "('MOVF', 6.0, 'R2')",
                "('ADDF', 'R1', 'R2', 'R3')",
                "('MOVF', 0.0, 'R4')",
                "('SUBF', 'R4', 'R3', 'R5')",
                "('PRINTF', 'R5')",
            ]
        );
    }

    #[test]
    fn test_not_lowering() {
        assert_eq!(
            init_code("print !true;"),
            vec![
                "('MOVI', 1, 'R1')",
                "('MOVI', 1, 'R2')",
                "('SUBI', 'R2', 'R1', 'R3')",
                "('PRINTI', 'R3')",
            ]
        );
    }

    #[test]
    fn test_constant_declaration() {
        assert_eq!(
            init_code("const pi = 3.14159;\nprint pi;"),
            vec![
                "('MOVF', 3.14159, 'R1')",
                "('VARF', 'pi')",
                "('STOREF', 'R1', 'pi')",
                "('LOADF', 'pi', 'R2')",
                "('PRINTF', 'R2')",
            ]
        );
    }

    #[test]
    fn test_variable_declarations_and_assignment() {
        assert_eq!(
            init_code("var x int = 42;\nvar y int;\ny = x + 10;"),
            vec![
                "('MOVI', 42, 'R1')",
                "('VARI', 'x')",
                "('STOREI', 'R1', 'x')",
                "('VARI', 'y')",
                "('LOADI', 'x', 'R2')",
                "('MOVI', 10, 'R3')",
                "('ADDI', 'R2', 'R3', 'R4')",
                "('STOREI', 'R4', 'y')",
            ]
        );
    }

    #[test]
    fn test_char_variables_lower_through_bytes() {
        assert_eq!(
            init_code("var a char = 'a';\nvar b char;\nb = a;"),
            vec![
                "('MOVB', 97, 'R1')",
                "('VARB', 'a')",
                "('STOREB', 'R1', 'a')",
                "('VARB', 'b')",
                "('LOADB', 'a', 'R2')",
                "('STOREB', 'R2', 'b')",
            ]
        );
    }

    #[test]
    fn test_booleans_lower_as_integers() {
        assert_eq!(
            init_code("const x = true;\nvar y bool = false;"),
            vec![
                "('MOVI', 1, 'R1')",
                "('VARI', 'x')",
                "('STOREI', 'R1', 'x')",
                "('MOVI', 0, 'R2')",
                "('VARI', 'y')",
                "('STOREI', 'R2', 'y')",
            ]
        );
    }

    #[test]
    fn test_comparisons_and_logic() {
        assert_eq!(
            init_code("print 3 < 4;\nprint (3.0 > 6.0) || (5 >= 2);"),
            vec![
                "('MOVI', 3, 'R1')",
                "('MOVI', 4, 'R2')",
                "('CMPI', '<', 'R1', 'R2', 'R3')",
                "('PRINTI', 'R3')",
                "('MOVF', 3.0, 'R4')",
                "('MOVF', 6.0, 'R5')",
                "('CMPF', '>', 'R4', 'R5', 'R6')",
                "('MOVI', 5, 'R7')",
                "('MOVI', 2, 'R8')",
                "('CMPI', '>=', 'R7', 'R8', 'R9')",
                "('OR', 'R6', 'R9', 'R10')",
                "('PRINTI', 'R10')",
            ]
        );
    }

    #[test]
    fn test_if_else_shape() {
        assert_eq!(
            init_code("var a int;\nif 3 < 4 { a = 1; } else { a = 2; }"),
            vec![
                "('VARI', 'a')",
                "('MOVI', 3, 'R1')",
                "('MOVI', 4, 'R2')",
                "('CMPI', '<', 'R1', 'R2', 'R3')",
                "('CBRANCH', 'R3', 'B1', 'B2')",
                "('LABEL', 'B1')",
                "('MOVI', 1, 'R4')",
                "('STOREI', 'R4', 'a')",
                "('BRANCH', 'B3')",
                "('LABEL', 'B2')",
                "('MOVI', 2, 'R5')",
                "('STOREI', 'R5', 'a')",
                "('BRANCH', 'B3')",
                "('LABEL', 'B3')",
            ]
        );
    }

    #[test]
    fn test_while_shape() {
        assert_eq!(
            init_code("var a int = 10;\nwhile a > 0 { a = a - 1; }"),
            vec![
                "('MOVI', 10, 'R1')",
                "('VARI', 'a')",
                "('STOREI', 'R1', 'a')",
                "('BRANCH', 'B1')",
                "('LABEL', 'B1')",
                "('LOADI', 'a', 'R2')",
                "('MOVI', 0, 'R3')",
                "('CMPI', '>', 'R2', 'R3', 'R4')",
                "('CBRANCH', 'R4', 'B2', 'B3')",
                "('LABEL', 'B2')",
                "('LOADI', 'a', 'R5')",
                "('MOVI', 1, 'R6')",
                "('SUBI', 'R5', 'R6', 'R7')",
                "('STOREI', 'R7', 'a')",
                "('BRANCH', 'B1')",
                "('LABEL', 'B3')",
            ]
        );
    }

    #[test]
    fn test_function_prologue_and_return() {
        let procs = ircode("func add(x int, y int) int {\n    return x + y;\n}");
        assert_eq!(procs.len(), 2);

        assert_eq!(procs[0].name.as_str(), "_init");
        assert!(procs[0].code.is_empty());

        let add = &procs[1];
        assert_eq!(add.header(), "proc add(x int, y int) int");
        let code: Vec<String> = add.code.iter().map(|i| i.to_string()).collect();
        assert_eq!(
            code,
            vec![
                "('ALLOCI', 'x')",
                "('STOREI', 'R1', 'x')",
                "('ALLOCI', 'y')",
                "('STOREI', 'R2', 'y')",
                "('LOADI', 'x', 'R3')",
                "('LOADI', 'y', 'R4')",
                "('ADDI', 'R3', 'R4', 'R5')",
                "('RET', 'R5')",
            ]
        );
    }

    #[test]
    fn test_void_function_gets_bare_ret() {
        let procs = ircode("func hello() void {\n    print 1;\n}");
        let code: Vec<String> = procs[1].code.iter().map(|i| i.to_string()).collect();
        assert_eq!(
            code,
            vec!["('MOVI', 1, 'R1')", "('PRINTI', 'R1')", "('RET',)"]
        );
    }

    #[test]
    fn test_explicit_void_return_not_duplicated() {
        let procs = ircode("func hello() void {\n    return;\n}");
        let code: Vec<String> = procs[1].code.iter().map(|i| i.to_string()).collect();
        assert_eq!(code, vec!["('RET',)"]);
    }

    #[test]
    fn test_call_lowering() {
        let procs = ircode(
            "func add(x int, y int) int {\n    return x + y;\n}\nprint add(1, 2);",
        );
        let init: Vec<String> = procs[0].code.iter().map(|i| i.to_string()).collect();
        assert_eq!(
            init,
            vec![
                "('MOVI', 1, 'R1')",
                "('MOVI', 2, 'R2')",
                "('CALL', 'add', 'R1', 'R2', 'R3')",
                "('PRINTI', 'R3')",
            ]
        );
    }

    #[test]
    fn test_locals_alloc_inside_functions() {
        let procs = ircode("func f() int {\n    var a int = 1;\n    return a;\n}");
        let code: Vec<String> = procs[1].code.iter().map(|i| i.to_string()).collect();
        assert_eq!(
            code,
            vec![
                "('MOVI', 1, 'R1')",
                "('ALLOCI', 'a')",
                "('STOREI', 'R1', 'a')",
                "('LOADI', 'a', 'R2')",
                "('RET', 'R2')",
            ]
        );
    }

    #[test]
    fn test_functions_not_embedded_in_init() {
        let procs = ircode("print 1;\nfunc f() void {\n}\nprint 2;");
        assert_eq!(procs.len(), 2);
        let init: Vec<String> = procs[0].code.iter().map(|i| i.to_string()).collect();
        assert_eq!(
            init,
            vec![
                "('MOVI', 1, 'R1')",
                "('PRINTI', 'R1')",
                "('MOVI', 2, 'R2')",
                "('PRINTI', 'R2')",
            ]
        );
    }

    #[test]
    fn test_for_loop_continue_targets_step() {
        let procs = ircode(
            "var total int = 0;\n\
             for var i int = 0; i < 10; i += 1; {\n\
                 if i == 5 { continue; }\n\
                 if i == 8 { break; }\n\
                 total += i;\n\
             }",
        );
        let init: Vec<String> = procs[0].code.iter().map(|i| i.to_string()).collect();

        // for-loop labels: B1 head, B2 body, B3 step, B4 end.
        assert!(init.contains(&"('LABEL', 'B3')".to_string()));
        // continue inside the first if branches to the step label.
        assert!(init.contains(&"('BRANCH', 'B3')".to_string()));
        // break inside the second if branches to the end label.
        assert!(init.contains(&"('BRANCH', 'B4')".to_string()));
        // back-edge to the head.
        assert!(init.contains(&"('BRANCH', 'B1')".to_string()));

        assert_ssa(&procs);
        assert_labels_resolve(&procs);
    }

    #[test]
    fn test_while_continue_targets_head() {
        let procs = ircode(
            "var a int = 0;\nwhile a < 10 {\n    a += 1;\n    if a == 3 { continue; }\n    print a;\n}",
        );
        let init: Vec<String> = procs[0].code.iter().map(|i| i.to_string()).collect();
        // while labels: B1 head, B2 body, B3 end; continue goes to B1.
        let head_branches = init.iter().filter(|s| *s == "('BRANCH', 'B1')").count();
        // One from loop entry, one from the back-edge, one from continue.
        assert_eq!(head_branches, 3);
        assert_labels_resolve(&procs);
    }

    #[test]
    fn test_ssa_and_labels_on_larger_program() {
        let procs = ircode(
            "const limit = 10;\n\
             var sum int = 0;\n\
             func square(n int) int {\n\
                 return n * n;\n\
             }\n\
             for var i int = 0; i < limit; i += 1; {\n\
                 if square(i) > 20 {\n\
                     sum += square(i);\n\
                 } else {\n\
                     sum += i;\n\
                 }\n\
             }\n\
             while sum > 0 {\n\
                 sum -= 1;\n\
             }\n\
             print sum;",
        );
        assert_ssa(&procs);
        assert_labels_resolve(&procs);
    }

    #[test]
    fn test_register_counter_resets_per_procedure() {
        let procs = ircode(
            "print 1;\nfunc f() int {\n    return 2;\n}\nfunc g() int {\n    return 3;\n}",
        );
        // Every procedure starts its registers at R1.
        for proc in &procs {
            let first = proc.code.iter().filter_map(|i| i.target()).next();
            if let Some(reg) = first {
                assert_eq!(reg, Reg(1), "in {}", proc.name);
            }
        }
    }
}
