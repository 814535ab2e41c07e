//! Character cursor over the source text.
//!
//! The cursor owns position and line tracking so the lexer proper only
//! deals in characters. Lines are 1-based and advance on every newline
//! consumed, including newlines inside skipped comments.

/// Cursor for source traversal.
#[derive(Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
        }
    }

    /// The character under the cursor, or `'\0'` at end of input.
    pub fn current_char(&self) -> char {
        self.source[self.position..].chars().next().unwrap_or('\0')
    }

    /// The character `n` positions ahead (`peek_char(0)` is the current
    /// character), or `'\0'` past the end.
    pub fn peek_char(&self, n: usize) -> char {
        self.source[self.position..].chars().nth(n).unwrap_or('\0')
    }

    /// Consumes the current character, updating the line counter.
    pub fn advance(&mut self) {
        if let Some(c) = self.source[self.position..].chars().next() {
            self.position += c.len_utf8();
            if c == '\n' {
                self.line += 1;
            }
        }
    }

    /// Consumes the current character if it equals `expected`.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// True when the whole input has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current 1-based line number.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The source text between `start` and the current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_tracks_lines() {
        let mut cursor = Cursor::new("a\nb\nc");
        assert_eq!(cursor.line(), 1);
        cursor.advance(); // a
        cursor.advance(); // \n
        assert_eq!(cursor.line(), 2);
        cursor.advance(); // b
        cursor.advance(); // \n
        assert_eq!(cursor.line(), 3);
        assert_eq!(cursor.current_char(), 'c');
    }

    #[test]
    fn test_peek_does_not_consume() {
        let cursor = Cursor::new("xyz");
        assert_eq!(cursor.peek_char(0), 'x');
        assert_eq!(cursor.peek_char(2), 'z');
        assert_eq!(cursor.peek_char(3), '\0');
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_slice_from() {
        let mut cursor = Cursor::new("hello world");
        let start = cursor.position();
        for _ in 0..5 {
            cursor.advance();
        }
        assert_eq!(cursor.slice_from(start), "hello");
    }
}
