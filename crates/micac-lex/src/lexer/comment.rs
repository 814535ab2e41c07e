//! Whitespace and comment skipping.

use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Skips whitespace and comments before the next token.
    ///
    /// Newlines advance the line counter (the cursor does this), so a
    /// token after a multi-line comment still reports the right line.
    pub(crate) fn skip_whitespace_and_comments(&mut self) {
        loop {
            if self.cursor.is_at_end() {
                return;
            }

            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.cursor.advance();
                }
                '/' => {
                    let next = self.cursor.peek_char(1);
                    if next == '/' {
                        self.skip_line_comment();
                    } else if next == '*' {
                        self.skip_block_comment();
                    } else {
                        return;
                    }
                }
                _ => return,
            }
        }
    }

    /// Skips `// ...` to end of line. The newline itself is left for
    /// the whitespace loop.
    fn skip_line_comment(&mut self) {
        self.cursor.advance();
        self.cursor.advance();

        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
    }

    /// Skips `/* ... */`. Block comments do not nest. Reaching end of
    /// input first reports `Unterminated comment` at the line the
    /// comment opened on.
    fn skip_block_comment(&mut self) {
        let open_line = self.cursor.line();
        self.cursor.advance();
        self.cursor.advance();

        while !self.cursor.is_at_end() {
            if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                self.cursor.advance();
                self.cursor.advance();
                return;
            }
            self.cursor.advance();
        }

        self.handler.report(open_line, "Unterminated comment");
    }
}

#[cfg(test)]
mod tests {
    use crate::{Lexer, TokenKind};
    use micac_util::Handler;

    #[test]
    fn test_line_comment_skipped() {
        let handler = Handler::new();
        let tokens = Lexer::new("// nothing here\nx", &handler).tokenize();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn test_block_comment_skipped() {
        let handler = Handler::new();
        let tokens = Lexer::new("/* a + b */ 42", &handler).tokenize();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert!(!handler.any_reported());
    }

    #[test]
    fn test_block_comments_do_not_nest() {
        let handler = Handler::new();
        // The first */ closes the comment; the trailing */ is then
        // a stray star and slash.
        let tokens = Lexer::new("/* outer /* inner */ x", &handler).tokenize();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text.as_str(), "x");
    }

    #[test]
    fn test_unterminated_comment_reported() {
        let handler = Handler::new();
        let tokens = Lexer::new("x\n/* never closed", &handler).tokenize();
        assert_eq!(tokens.len(), 1);
        assert_eq!(handler.error_count(), 1);
        let diag = &handler.diagnostics()[0];
        assert_eq!(diag.line, 2);
        assert_eq!(diag.message, "Unterminated comment");
    }
}
