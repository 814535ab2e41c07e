//! Expression parsing using Pratt parsing (top-down operator
//! precedence).
//!
//! # Operator precedence (lowest to highest)
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | 1 | `\|\|` | Left |
//! | 2 | `&&` | Left |
//! | 3 | `<`, `>`, `<=`, `>=`, `==`, `!=` | Non-associative |
//! | 4 | `+`, `-` | Left |
//! | 5 | `*`, `/` | Left |
//! | 6 | unary `+`, `-`, `!` | Prefix |
//!
//! Chaining relational operators (`a == b >= c`) is a syntax error.

use micac_lex::TokenKind;

use crate::ast::*;
use crate::{ParseResult, Parser};

/// Binding power levels. Higher numbers bind tighter.
pub(crate) mod bp {
    /// Minimum binding power (start of expression).
    pub const MIN: u8 = 0;

    /// Logical OR: `||`
    pub const LOGICAL_OR: u8 = 2;

    /// Logical AND: `&&`
    pub const LOGICAL_AND: u8 = 4;

    /// Comparison: `==`, `!=`, `<`, `<=`, `>`, `>=`
    pub const COMPARISON: u8 = 6;

    /// Additive: `+`, `-`
    pub const ADDITIVE: u8 = 8;

    /// Multiplicative: `*`, `/`
    pub const MULTIPLICATIVE: u8 = 10;

    /// Prefix operators: unary `+`, `-`, `!`
    pub const PREFIX: u8 = 12;
}

/// The infix operator a token starts, if any.
fn binop_for(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::OrOr => Some(BinOp::Or),
        TokenKind::AndAnd => Some(BinOp::And),
        TokenKind::Lt => Some(BinOp::Lt),
        TokenKind::Gt => Some(BinOp::Gt),
        TokenKind::LtEq => Some(BinOp::LtEq),
        TokenKind::GtEq => Some(BinOp::GtEq),
        TokenKind::EqEq => Some(BinOp::EqEq),
        TokenKind::NotEq => Some(BinOp::NotEq),
        TokenKind::Plus => Some(BinOp::Add),
        TokenKind::Minus => Some(BinOp::Sub),
        TokenKind::Star => Some(BinOp::Mul),
        TokenKind::Slash => Some(BinOp::Div),
        _ => None,
    }
}

/// Left binding power of an infix operator.
fn left_bp(op: BinOp) -> u8 {
    match op {
        BinOp::Or => bp::LOGICAL_OR,
        BinOp::And => bp::LOGICAL_AND,
        BinOp::Lt | BinOp::Gt | BinOp::LtEq | BinOp::GtEq | BinOp::EqEq | BinOp::NotEq => {
            bp::COMPARISON
        }
        BinOp::Add | BinOp::Sub => bp::ADDITIVE,
        BinOp::Mul | BinOp::Div => bp::MULTIPLICATIVE,
    }
}

impl<'a> Parser<'a> {
    /// Parses a complete expression.
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_expr_bp(bp::MIN)
    }

    /// Pratt parser core: parses an expression consuming only infix
    /// operators whose left binding power is at least `min_bp`.
    ///
    /// All levels are left-associative (right side parsed with
    /// `left_bp + 1`) except the comparison level, which rejects a
    /// comparison operand that is itself a comparison.
    fn parse_expr_bp(&mut self, min_bp: u8) -> ParseResult<Expr> {
        let mut lhs = self.parse_prefix()?;
        let mut lhs_is_comparison = false;

        loop {
            let Some(op) = binop_for(self.current_kind()) else {
                break;
            };
            let lbp = left_bp(op);
            if lbp < min_bp {
                break;
            }

            if op.is_comparison() && lhs_is_comparison {
                return Err(match self.current() {
                    Some(token) => self.syntax_error_at(token),
                    None => self.syntax_error(),
                });
            }

            let line = self.current_line();
            self.advance();
            let rhs = self.parse_expr_bp(lbp + 1)?;

            lhs_is_comparison = op.is_comparison();
            lhs = Expr::Binary(BinaryExpr {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                line,
            });
        }

        Ok(lhs)
    }

    /// Parses a prefix expression: a unary operator applied to a
    /// prefix expression, or a primary.
    fn parse_prefix(&mut self) -> ParseResult<Expr> {
        let unop = match self.current_kind() {
            TokenKind::Plus => Some(UnOp::Pos),
            TokenKind::Minus => Some(UnOp::Neg),
            TokenKind::Not => Some(UnOp::Not),
            _ => None,
        };

        if let Some(op) = unop {
            let line = self.current_line();
            self.advance();
            let operand = self.parse_expr_bp(bp::PREFIX)?;
            return Ok(Expr::Unary(UnaryExpr {
                op,
                operand: Box::new(operand),
                line,
            }));
        }

        self.parse_primary()
    }

    /// Parses a primary: a literal, a parenthesised expression, a
    /// call, or a location read.
    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = match self.current() {
            Some(token) => token,
            None => return Err(self.syntax_error()),
        };

        match token.kind {
            TokenKind::Int => {
                let value = self.int_value(token)?;
                self.advance();
                Ok(Expr::IntLit(IntLit {
                    value,
                    line: token.line,
                }))
            }
            TokenKind::Float => {
                let value = self.float_value(token)?;
                self.advance();
                Ok(Expr::FloatLit(FloatLit {
                    value,
                    line: token.line,
                }))
            }
            TokenKind::Char => {
                let value = self.char_value(token)?;
                self.advance();
                Ok(Expr::CharLit(CharLit {
                    value,
                    line: token.line,
                }))
            }
            TokenKind::True | TokenKind::False => {
                self.advance();
                Ok(Expr::BoolLit(BoolLit {
                    value: token.kind == TokenKind::True,
                    line: token.line,
                }))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ident => {
                self.advance();
                let loc = SimpleLoc {
                    name: token.text,
                    line: token.line,
                };
                if self.check(TokenKind::LParen) {
                    self.parse_call(loc)
                } else {
                    Ok(Expr::Read(ReadLoc {
                        line: loc.line,
                        loc,
                    }))
                }
            }
            _ => Err(self.syntax_error()),
        }
    }

    /// Parses `callee(arg, arg, ...)` with the callee already consumed.
    fn parse_call(&mut self, callee: SimpleLoc) -> ParseResult<Expr> {
        let line = callee.line;
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        Ok(Expr::Call(CallExpr { callee, args, line }))
    }

    // =========================================================================
    // Literal conversion
    // =========================================================================

    /// Converts an integer token's text, honouring base prefixes. An
    /// out-of-range literal is a syntax error at that token.
    fn int_value(&self, token: micac_lex::Token) -> ParseResult<i64> {
        let text = token.text.as_str();
        let parsed = match text.as_bytes() {
            [b'0', b'x' | b'X', ..] => i64::from_str_radix(&text[2..], 16),
            [b'0', b'o' | b'O', ..] => i64::from_str_radix(&text[2..], 8),
            [b'0', b'b' | b'B', ..] => i64::from_str_radix(&text[2..], 2),
            _ => text.parse::<i64>(),
        };
        parsed.map_err(|_| self.syntax_error_at(token))
    }

    /// Converts a float token's text.
    fn float_value(&self, token: micac_lex::Token) -> ParseResult<f64> {
        token
            .text
            .as_str()
            .parse::<f64>()
            .map_err(|_| self.syntax_error_at(token))
    }

    /// Decodes a character token (quotes included in the text) to its
    /// byte value.
    fn char_value(&self, token: micac_lex::Token) -> ParseResult<u8> {
        let text = token.text.as_str();
        let body = &text[1..text.len() - 1];

        let mut chars = body.chars();
        let value = match (chars.next(), chars.as_str()) {
            (Some('\\'), rest) => match rest {
                "n" => Some(b'\n'),
                "\\" => Some(b'\\'),
                "'" => Some(b'\''),
                _ => {
                    // \xhh - the lexer has validated the digits.
                    rest.strip_prefix('x')
                        .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                }
            },
            (Some(c), "") if c.is_ascii() => Some(c as u8),
            _ => None,
        };

        value.ok_or_else(|| self.syntax_error_at(token))
    }
}
