//! Identifier and keyword lexing.

use crate::token::{keyword_from_ident, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an identifier, rewriting the kind when the matched text is
    /// a reserved keyword.
    ///
    /// Identifiers start with a letter or underscore and continue with
    /// letters, digits or underscores.
    pub(crate) fn lex_ident(&mut self) -> TokenKind {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        keyword_from_ident(text).unwrap_or(TokenKind::Ident)
    }
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
