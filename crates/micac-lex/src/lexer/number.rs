//! Number literal lexing.
//!
//! Integers are decimal or prefixed (`0x`, `0o`, `0b`). Floats are any
//! of `d.d`, `d.`, `.d`, or scientific `d[.d]e[+-]d`. The lexer only
//! classifies and slices; numeric conversion happens in the parser.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an integer or float literal starting at the current
    /// character (a digit, or a dot with a digit after it).
    pub(crate) fn lex_number(&mut self) -> TokenKind {
        // Leading-dot float: .5
        if self.cursor.current_char() == '.' {
            self.cursor.advance();
            self.eat_digits();
            self.maybe_exponent();
            return TokenKind::Float;
        }

        // Prefixed integer: 0x1f, 0o17, 0b101
        if self.cursor.current_char() == '0' {
            let base = match self.cursor.peek_char(1) {
                'x' | 'X' => Some(16),
                'o' | 'O' => Some(8),
                'b' | 'B' => Some(2),
                _ => None,
            };
            if let Some(base) = base {
                if self.cursor.peek_char(2).is_digit(base) {
                    self.cursor.advance();
                    self.cursor.advance();
                    while self.cursor.current_char().is_digit(base) {
                        self.cursor.advance();
                    }
                    return TokenKind::Int;
                }
            }
        }

        self.eat_digits();

        let mut is_float = false;
        if self.cursor.current_char() == '.' {
            is_float = true;
            self.cursor.advance();
            self.eat_digits();
        }
        if self.maybe_exponent() {
            is_float = true;
        }

        if is_float {
            TokenKind::Float
        } else {
            TokenKind::Int
        }
    }

    fn eat_digits(&mut self) {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
    }

    /// Consumes an exponent when one actually follows: `e`/`E`, an
    /// optional sign, and at least one digit. `1.23e` on its own lexes
    /// as the float `1.23` followed by the identifier `e`.
    fn maybe_exponent(&mut self) -> bool {
        let c = self.cursor.current_char();
        if c != 'e' && c != 'E' {
            return false;
        }
        let after = self.cursor.peek_char(1);
        let signed = after == '+' || after == '-';
        let digit_at = if signed { 2 } else { 1 };
        if !self.cursor.peek_char(digit_at).is_ascii_digit() {
            return false;
        }

        self.cursor.advance();
        if signed {
            self.cursor.advance();
        }
        self.eat_digits();
        true
    }
}
