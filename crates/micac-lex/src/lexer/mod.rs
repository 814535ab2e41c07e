//! Core lexer: token dispatch and the scanning loop.
//!
//! The per-category scanning methods live in sibling modules
//! (`ident`, `number`, `charlit`, `comment`, `operator`); they are all
//! `impl Lexer` blocks so the lexer reads as one state machine split by
//! concern.

mod charlit;
mod comment;
mod ident;
mod number;
mod operator;

use micac_util::{Handler, Symbol};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Lexer for Mica source text.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) handler: &'a Handler,

    /// Byte offset of the current token's first character.
    pub(crate) token_start: usize,

    /// Line of the current token's first character.
    pub(crate) token_line: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over `source`, reporting errors to `handler`.
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_line: 1,
        }
    }

    /// Returns the next token, or a `TokenKind::Eof` token at end of
    /// input.
    ///
    /// Malformed input (illegal bytes, broken character literals)
    /// produces a diagnostic and no token; scanning continues with the
    /// following bytes.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace_and_comments();

            self.token_start = self.cursor.position();
            self.token_line = self.cursor.line();

            if self.cursor.is_at_end() {
                return self.make_token(TokenKind::Eof);
            }

            let kind = match self.cursor.current_char() {
                '(' => {
                    self.cursor.advance();
                    Some(TokenKind::LParen)
                }
                ')' => {
                    self.cursor.advance();
                    Some(TokenKind::RParen)
                }
                '{' => {
                    self.cursor.advance();
                    Some(TokenKind::LBrace)
                }
                '}' => {
                    self.cursor.advance();
                    Some(TokenKind::RBrace)
                }
                ';' => {
                    self.cursor.advance();
                    Some(TokenKind::Semicolon)
                }
                ',' => {
                    self.cursor.advance();
                    Some(TokenKind::Comma)
                }
                '+' => Some(self.lex_plus()),
                '-' => Some(self.lex_minus()),
                '*' => Some(self.lex_star()),
                '/' => Some(self.lex_slash()),
                '=' => Some(self.lex_equals()),
                '!' => Some(self.lex_bang()),
                '<' => Some(self.lex_less()),
                '>' => Some(self.lex_greater()),
                '&' => self.lex_ampersand(),
                '|' => self.lex_pipe(),
                '\'' => self.lex_char(),
                '.' if self.cursor.peek_char(1).is_ascii_digit() => Some(self.lex_number()),
                c if c.is_ascii_digit() => Some(self.lex_number()),
                c if c.is_ascii_alphabetic() || c == '_' => Some(self.lex_ident()),
                c => {
                    self.report_error(format!("Illegal character {:?}", c));
                    self.cursor.advance();
                    None
                }
            };

            if let Some(kind) = kind {
                return self.make_token(kind);
            }
        }
    }

    /// Drains the whole input into a token vector, excluding the final
    /// EOF marker.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if token.kind == TokenKind::Eof {
                return tokens;
            }
            tokens.push(token);
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            text: Symbol::intern(self.cursor.slice_from(self.token_start)),
            line: self.token_line,
        }
    }

    /// Reports a lexical error at the current token's line.
    pub(crate) fn report_error(&self, message: String) {
        self.handler.report(self.token_line, message);
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use micac_util::Handler;

    fn lex(source: &str) -> Vec<Token> {
        let handler = Handler::new();
        Lexer::new(source, &handler).tokenize()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(
            kinds("+ - * / = ; ( ) { } ,"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Eq,
                TokenKind::Semicolon,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Comma,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("const var print if else while for func return break continue true false"),
            vec![
                TokenKind::Const,
                TokenKind::Var,
                TokenKind::Print,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::For,
                TokenKind::Func,
                TokenKind::Return,
                TokenKind::Break,
                TokenKind::Continue,
                TokenKind::True,
                TokenKind::False,
            ]
        );
    }

    #[test]
    fn test_tricky_identifiers_are_not_keywords() {
        let tokens = lex("print_er variable constant");
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Ident));
        assert_eq!(tokens[0].text.as_str(), "print_er");
        assert_eq!(tokens[1].text.as_str(), "variable");
        assert_eq!(tokens[2].text.as_str(), "constant");
    }

    #[test]
    fn test_longest_match_for_operators() {
        assert_eq!(
            kinds("< > <= >= == != && || ! += -= *= /= ++ --"),
            vec![
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Not,
                TokenKind::PlusEq,
                TokenKind::MinusEq,
                TokenKind::StarEq,
                TokenKind::SlashEq,
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
            ]
        );
    }

    #[test]
    fn test_eq_eq_never_splits() {
        assert_eq!(kinds("a == b"), vec![
            TokenKind::Ident,
            TokenKind::EqEq,
            TokenKind::Ident,
        ]);
    }

    #[test]
    fn test_line_numbers() {
        let tokens = lex("a\nb\n\nc");
        let lines: Vec<u32> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 2, 4]);
    }

    #[test]
    fn test_newlines_inside_block_comments_count() {
        let tokens = lex("a /* one\ntwo\nthree */ b");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn test_illegal_character_is_reported_and_skipped() {
        let handler = Handler::new();
        let tokens = Lexer::new("a $ b", &handler).tokenize();
        assert_eq!(tokens.len(), 2);
        assert!(handler.any_reported());
        assert_eq!(
            handler.diagnostics()[0].message,
            "Illegal character '$'"
        );
    }

    #[test]
    fn test_lexing_continues_after_errors() {
        let handler = Handler::new();
        let tokens = Lexer::new("@ # x", &handler).tokenize();
        assert_eq!(handler.error_count(), 2);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text.as_str(), "x");
    }
}
