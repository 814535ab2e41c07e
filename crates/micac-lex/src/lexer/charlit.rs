//! Character literal lexing.
//!
//! A character literal is a single-quoted single character, one of the
//! escapes `\n`, `\\`, `\'`, or a two-hex-digit byte `\xhh`. Anything
//! else after an opening quote is an unterminated character constant:
//! the quote and the character after it are consumed, reported, and
//! scanning resumes.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a character literal. Returns `None` (no token) when the
    /// opening quote does not begin a valid literal.
    pub(crate) fn lex_char(&mut self) -> Option<TokenKind> {
        let start_cursor = self.cursor.clone();
        self.cursor.advance(); // opening quote

        if self.scan_char_body() && self.cursor.match_char('\'') {
            return Some(TokenKind::Char);
        }

        // Mirror the failure consumption of the reference scanner: the
        // quote plus the one character after it.
        self.cursor = start_cursor;
        self.cursor.advance();
        if !self.cursor.is_at_end() {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(self.token_start);
        self.report_error(format!("Unterminated character {:?}", text));
        None
    }

    /// Consumes the character between the quotes. True when it was a
    /// valid single character or escape.
    fn scan_char_body(&mut self) -> bool {
        match self.cursor.current_char() {
            '\0' if self.cursor.is_at_end() => false,
            '\\' => {
                self.cursor.advance();
                match self.cursor.current_char() {
                    'n' | '\\' | '\'' => {
                        self.cursor.advance();
                        true
                    }
                    'x' => {
                        self.cursor.advance();
                        for _ in 0..2 {
                            let c = self.cursor.current_char();
                            if !(c.is_ascii_digit() || ('a'..='f').contains(&c)) {
                                return false;
                            }
                            self.cursor.advance();
                        }
                        true
                    }
                    _ => false,
                }
            }
            '\n' => false,
            '\'' => false,
            _ => {
                self.cursor.advance();
                true
            }
        }
    }
}
