//! Statement parsing - declarations, assignment, control flow.

use micac_lex::TokenKind;

use crate::ast::*;
use crate::{ParseResult, Parser};

impl<'a> Parser<'a> {
    /// Parses a single statement.
    pub(crate) fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        match self.current_kind() {
            TokenKind::Const => self.parse_const(),
            TokenKind::Var => self.parse_var(),
            TokenKind::Print => self.parse_print(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Func => self.parse_func(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => {
                let line = self.current_line();
                self.advance();
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Break(BreakStmt { line }))
            }
            TokenKind::Continue => {
                let line = self.current_line();
                self.advance();
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Continue(ContinueStmt { line }))
            }
            TokenKind::Ident => self.parse_assignment(),
            _ => Err(self.syntax_error()),
        }
    }

    /// Parses `{ stmt* }`.
    pub(crate) fn parse_block(&mut self) -> ParseResult<Vec<Stmt>> {
        self.expect(TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(stmts)
    }

    /// Parses a datatype, written as a bare identifier.
    fn parse_type(&mut self) -> ParseResult<SimpleType> {
        let token = self.expect(TokenKind::Ident)?;
        Ok(SimpleType {
            name: token.text,
            line: token.line,
        })
    }

    /// `loc = expr ;` plus the augmented forms. `x op= e` desugars to
    /// `x = (read x) op e`; `x++`/`x--` desugar with an integer 1.
    fn parse_assignment(&mut self) -> ParseResult<Stmt> {
        let token = self.expect(TokenKind::Ident)?;
        let target = SimpleLoc {
            name: token.text,
            line: token.line,
        };
        let line = token.line;

        let aug = match self.current_kind() {
            TokenKind::PlusEq => Some(BinOp::Add),
            TokenKind::MinusEq => Some(BinOp::Sub),
            TokenKind::StarEq => Some(BinOp::Mul),
            TokenKind::SlashEq => Some(BinOp::Div),
            _ => None,
        };

        let value = if let Some(op) = aug {
            self.advance();
            let rhs = self.parse_expr()?;
            desugared_binary(op, &target, rhs, line)
        } else if self.match_token(TokenKind::PlusPlus) {
            desugared_binary(BinOp::Add, &target, one(line), line)
        } else if self.match_token(TokenKind::MinusMinus) {
            desugared_binary(BinOp::Sub, &target, one(line), line)
        } else {
            self.expect(TokenKind::Eq)?;
            self.parse_expr()?
        };

        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Assign(Assignment {
            target,
            value,
            line,
        }))
    }

    /// `const ID = expr ;`
    fn parse_const(&mut self) -> ParseResult<Stmt> {
        let line = self.current_line();
        self.expect(TokenKind::Const)?;
        let name = self.expect(TokenKind::Ident)?.text;
        self.expect(TokenKind::Eq)?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Const(ConstDecl { name, value, line }))
    }

    /// `var ID type (= expr)? ;`
    fn parse_var(&mut self) -> ParseResult<Stmt> {
        let line = self.current_line();
        self.expect(TokenKind::Var)?;
        let name = self.expect(TokenKind::Ident)?.text;
        let datatype = self.parse_type()?;
        let value = if self.match_token(TokenKind::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Var(VarDecl {
            name,
            datatype,
            value,
            line,
        }))
    }

    /// `print expr ;`
    fn parse_print(&mut self) -> ParseResult<Stmt> {
        let line = self.current_line();
        self.expect(TokenKind::Print)?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Print(PrintStmt { value, line }))
    }

    /// `if expr { ... } (else { ... })?`
    fn parse_if(&mut self) -> ParseResult<Stmt> {
        let line = self.current_line();
        self.expect(TokenKind::If)?;
        let condition = self.parse_expr()?;
        let then_block = self.parse_block()?;
        let else_block = if self.match_token(TokenKind::Else) {
            self.parse_block()?
        } else {
            Vec::new()
        };
        Ok(Stmt::If(IfStmt {
            condition,
            then_block,
            else_block,
            line,
        }))
    }

    /// `while expr { ... }`
    fn parse_while(&mut self) -> ParseResult<Stmt> {
        let line = self.current_line();
        self.expect(TokenKind::While)?;
        let condition = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::While(WhileStmt {
            condition,
            body,
            line,
        }))
    }

    /// `for ['('] stmt expr ; stmt [')'] { ... }`
    ///
    /// The init and step are full statements, trailing semicolons
    /// included. Parens around the header come in pairs or not at all.
    fn parse_for(&mut self) -> ParseResult<Stmt> {
        let line = self.current_line();
        self.expect(TokenKind::For)?;
        let parens = self.match_token(TokenKind::LParen);

        let init = self.parse_stmt()?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        let step = self.parse_stmt()?;

        if parens {
            self.expect(TokenKind::RParen)?;
        }
        let body = self.parse_block()?;

        Ok(Stmt::For(ForStmt {
            init: Box::new(init),
            condition,
            step: Box::new(step),
            body,
            line,
        }))
    }

    /// `func ID ( args? ) type { ... }`
    fn parse_func(&mut self) -> ParseResult<Stmt> {
        let line = self.current_line();
        self.expect(TokenKind::Func)?;
        let name = self.expect(TokenKind::Ident)?.text;

        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let arg_name = self.expect(TokenKind::Ident)?;
                let datatype = self.parse_type()?;
                args.push(FuncArg {
                    name: arg_name.text,
                    datatype,
                    line: arg_name.line,
                });
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        let return_type = self.parse_type()?;
        let body = self.parse_block()?;

        Ok(Stmt::Func(FuncDecl {
            name,
            args,
            return_type,
            body,
            line,
        }))
    }

    /// `return ;` or `return expr ;`
    fn parse_return(&mut self) -> ParseResult<Stmt> {
        let line = self.current_line();
        self.expect(TokenKind::Return)?;
        let value = if self.match_token(TokenKind::Semicolon) {
            None
        } else {
            let value = self.parse_expr()?;
            self.expect(TokenKind::Semicolon)?;
            Some(value)
        };
        Ok(Stmt::Return(ReturnStmt { value, line }))
    }
}

fn one(line: u32) -> Expr {
    Expr::IntLit(IntLit { value: 1, line })
}

fn desugared_binary(op: BinOp, target: &SimpleLoc, rhs: Expr, line: u32) -> Expr {
    Expr::Binary(BinaryExpr {
        op,
        lhs: Box::new(Expr::Read(ReadLoc {
            loc: target.clone(),
            line,
        })),
        rhs: Box::new(rhs),
        line,
    })
}
