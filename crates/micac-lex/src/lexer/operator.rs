//! Operator and punctuation lexing.
//!
//! Two-character operators are tried before their one-character
//! prefixes, so `==` never lexes as two `=` and `++` never as two `+`.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Handles: `+`, `+=`, `++`
    pub(crate) fn lex_plus(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::PlusEq
        } else if self.cursor.match_char('+') {
            TokenKind::PlusPlus
        } else {
            TokenKind::Plus
        }
    }

    /// Handles: `-`, `-=`, `--`
    pub(crate) fn lex_minus(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::MinusEq
        } else if self.cursor.match_char('-') {
            TokenKind::MinusMinus
        } else {
            TokenKind::Minus
        }
    }

    /// Handles: `*`, `*=`
    pub(crate) fn lex_star(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::StarEq
        } else {
            TokenKind::Star
        }
    }

    /// Handles: `/`, `/=`. Comments are consumed earlier, by the
    /// whitespace skipper.
    pub(crate) fn lex_slash(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::SlashEq
        } else {
            TokenKind::Slash
        }
    }

    /// Handles: `=`, `==`
    pub(crate) fn lex_equals(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::EqEq
        } else {
            TokenKind::Eq
        }
    }

    /// Handles: `!`, `!=`
    pub(crate) fn lex_bang(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::NotEq
        } else {
            TokenKind::Not
        }
    }

    /// Handles: `<`, `<=`
    pub(crate) fn lex_less(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::LtEq
        } else {
            TokenKind::Lt
        }
    }

    /// Handles: `>`, `>=`
    pub(crate) fn lex_greater(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::GtEq
        } else {
            TokenKind::Gt
        }
    }

    /// Handles: `&&`. A lone `&` is an illegal character.
    pub(crate) fn lex_ampersand(&mut self) -> Option<TokenKind> {
        self.cursor.advance();
        if self.cursor.match_char('&') {
            Some(TokenKind::AndAnd)
        } else {
            self.report_error("Illegal character '&'".to_string());
            None
        }
    }

    /// Handles: `||`. A lone `|` is an illegal character.
    pub(crate) fn lex_pipe(&mut self) -> Option<TokenKind> {
        self.cursor.advance();
        if self.cursor.match_char('|') {
            Some(TokenKind::OrOr)
        } else {
            self.report_error("Illegal character '|'".to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Lexer, TokenKind};
    use micac_util::Handler;

    #[test]
    fn test_lone_ampersand_reported() {
        let handler = Handler::new();
        let tokens = Lexer::new("a & b", &handler).tokenize();
        assert_eq!(tokens.len(), 2);
        assert_eq!(handler.diagnostics()[0].message, "Illegal character '&'");
    }

    #[test]
    fn test_augmented_before_plain() {
        let handler = Handler::new();
        let tokens = Lexer::new("x+=1", &handler).tokenize();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Ident, TokenKind::PlusEq, TokenKind::Int]);
    }
}
