//! micac-par - Parser
//!
//! Turns the token stream into an AST: recursive descent for
//! statements, Pratt parsing (top-down operator precedence) for
//! expressions.
//!
//! On a syntax error the parser reports
//! `Syntax error in input at token '...'` (or `Syntax error at EOF`)
//! through the error sink and stops; there is no resynchronisation.
//! The statements parsed before the error are still returned so
//! debugging dumps can show them, but the driver gates later phases on
//! the sink.
//!
//! Two constructs desugar at parse time, so later phases never see
//! them:
//!
//! - `x op= e` becomes `x = (read x) op e`
//! - `x++` / `x--` become `x = (read x) + 1` / `x = (read x) - 1`

pub mod ast;
mod dump;
mod expr;
mod stmt;

pub use dump::dump_program;

use micac_lex::{Lexer, Token, TokenKind};
use micac_util::Handler;
use thiserror::Error;

use crate::ast::Program;

/// Sentinel for an already-reported syntax error; unwinds the parse
/// via `?` without carrying a payload.
#[derive(Debug, Error)]
#[error("syntax error")]
pub struct SyntaxError;

pub(crate) type ParseResult<T> = Result<T, SyntaxError>;

/// Lex and parse `source` in one step.
pub fn parse(source: &str, handler: &Handler) -> Program {
    let tokens = Lexer::new(source, handler).tokenize();
    Parser::new(tokens, handler).parse_program()
}

/// Token-stream parser.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    handler: &'a Handler,

    /// Line reported for a syntax error at end of input.
    last_line: u32,
}

impl<'a> Parser<'a> {
    /// Creates a parser over an already-lexed token stream.
    pub fn new(tokens: Vec<Token>, handler: &'a Handler) -> Self {
        let last_line = tokens.last().map(|t| t.line).unwrap_or(1);
        Self {
            tokens,
            pos: 0,
            handler,
            last_line,
        }
    }

    /// Parses a whole program. Stops at the first syntax error.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Vec::new();
        while !self.is_at_end() {
            match self.parse_stmt() {
                Ok(stmt) => program.push(stmt),
                Err(SyntaxError) => break,
            }
        }
        program
    }

    // =========================================================================
    // Token stream helpers
    // =========================================================================

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn current(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    /// The current token's kind, or `Eof` past the end.
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().map(|t| t.kind).unwrap_or(TokenKind::Eof)
    }

    pub(crate) fn current_line(&self) -> u32 {
        self.current().map(|t| t.line).unwrap_or(self.last_line)
    }

    /// Consumes and returns the current token.
    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.current();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consumes the current token when it has the given kind.
    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes a token of the given kind or reports a syntax error.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            // check() guarantees a current token.
            Ok(self.advance().ok_or(SyntaxError)?)
        } else {
            Err(self.syntax_error())
        }
    }

    // =========================================================================
    // Error reporting
    // =========================================================================

    /// Reports a syntax error at the current token (or EOF) and
    /// returns the sentinel.
    pub(crate) fn syntax_error(&self) -> SyntaxError {
        match self.current() {
            Some(token) => self.syntax_error_at(token),
            None => {
                self.handler.report(self.last_line, "Syntax error at EOF");
                SyntaxError
            }
        }
    }

    /// Reports a syntax error naming a specific token.
    pub(crate) fn syntax_error_at(&self, token: Token) -> SyntaxError {
        self.handler.report(
            token.line,
            format!("Syntax error in input at token '{}'", token.text),
        );
        SyntaxError
    }
}
