//! Whitespace and comment skipping.

use crate::Lexer;
use microc_util::Span;

/// C-locale whitespace: space, tab, newline, carriage return, vertical
/// tab, and form feed.
#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

impl<'a> Lexer<'a> {
    /// Skips whitespace and comments before the next token.
    pub(crate) fn skip_whitespace_and_comments(&mut self) {
        loop {
            let b = self.cursor.current();
            if is_space(b) {
                self.cursor.advance();
                continue;
            }
            if b == b'/' && self.cursor.peek(1) == b'/' {
                self.skip_line_comment();
                continue;
            }
            if b == b'/' && self.cursor.peek(1) == b'*' {
                self.skip_block_comment();
                continue;
            }
            break;
        }
    }

    /// Skips a line comment (from `//` to end of line).
    fn skip_line_comment(&mut self) {
        self.cursor.advance();
        self.cursor.advance();
        while !self.cursor.is_at_end() && self.cursor.current() != b'\n' {
            self.cursor.advance();
        }
    }

    /// Skips a block comment. Block comments do not nest.
    ///
    /// An unterminated block comment is a fatal diagnostic reported at
    /// the position of the opening `/*`.
    fn skip_block_comment(&mut self) {
        let start = self.cursor.position();
        let line = self.cursor.line();
        let column = self.cursor.column();
        self.cursor.advance();
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() {
                self.report_error_at(
                    "unterminated block comment",
                    Span::new(start, self.cursor.position(), line, column),
                );
                return;
            }
            if self.cursor.current() == b'*' && self.cursor.peek(1) == b'/' {
                self.cursor.advance();
                self.cursor.advance();
                return;
            }
            self.cursor.advance();
        }
    }
}
