//! micac-lex - Lexical Analyzer
//!
//! Transforms Mica source text into a stream of [`Token`]s. Each token
//! carries a kind tag, the matched text (interned) and the 1-based line
//! of its first character.
//!
//! The lexer never stops on bad input: illegal bytes, unterminated
//! character literals and unterminated block comments are reported to
//! the [`Handler`](micac_util::Handler) and scanning resumes at the
//! next byte, so one malformed token yields one diagnostic rather than
//! a cascade.

mod cursor;
mod lexer;
mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{Token, TokenKind};
