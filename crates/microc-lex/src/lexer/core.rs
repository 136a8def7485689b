//! Core lexer implementation.
//!
//! This module contains the main Lexer struct and the per-byte dispatch.

use microc_util::{Handler, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind, TokenValue};

/// Lexer for Micro source code.
///
/// The lexer transforms a source buffer into a stream of tokens. It
/// handles whitespace, comments, identifiers, keywords, operators, and
/// literals.
///
/// # Example
///
/// ```
/// use microc_lex::{Lexer, TokenKind};
/// use microc_util::Handler;
///
/// let handler = Handler::silent();
/// let mut lexer = Lexer::new(b"return 0;", &handler);
/// assert!(matches!(lexer.next_token().kind, TokenKind::Keyword(_)));
/// assert_eq!(lexer.next_token().kind, TokenKind::IntLit);
/// ```
pub struct Lexer<'a> {
    /// Byte cursor for source traversal.
    pub(crate) cursor: Cursor<'a>,

    /// Diagnostic handler for error reporting.
    pub(crate) handler: &'a Handler,

    /// Starting byte offset of the current token.
    pub(crate) token_start: usize,

    /// Line where the current token starts (1-based).
    pub(crate) token_start_line: u32,

    /// Column where the current token starts (1-based).
    pub(crate) token_start_column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source buffer.
    pub fn new(source: &'a [u8], handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Returns the next token from the source.
    ///
    /// Skips whitespace and comments, then dispatches on the first byte
    /// of the token. At end of input this returns `Eof` forever.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Token::new(
                TokenKind::Eof,
                Span::point(self.token_start, self.token_start_line, self.token_start_column),
            );
        }

        match self.cursor.current() {
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'{' => self.single(TokenKind::LBrace),
            b'}' => self.single(TokenKind::RBrace),
            b';' => self.single(TokenKind::Semi),
            b',' => self.single(TokenKind::Comma),
            b'+' => self.single(TokenKind::Plus),
            b'-' => self.single(TokenKind::Minus),
            b'*' => self.single(TokenKind::Star),
            b'/' => self.single(TokenKind::Slash),
            b'%' => self.single(TokenKind::Percent),
            b'=' => self.lex_equals(),
            b'!' => self.lex_bang(),
            b'<' => self.lex_less(),
            b'>' => self.lex_greater(),
            b'.' => self.lex_dot(),
            b'"' => self.lex_string(),
            b'\'' => self.lex_char(),
            b if b.is_ascii_digit() => self.lex_number(),
            b if b.is_ascii_alphabetic() || b == b'_' => self.lex_identifier(),
            b => {
                self.cursor.advance();
                self.report_error(format!("unexpected character '{}'", b as char));
                self.make(TokenKind::Error)
            }
        }
    }

    /// Consumes one byte and produces a token of the given kind.
    pub(crate) fn single(&mut self, kind: TokenKind) -> Token {
        self.cursor.advance();
        self.make(kind)
    }

    /// Builds a payload-less token spanning from the token start to the
    /// current cursor position.
    pub(crate) fn make(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.token_span())
    }

    /// Builds a token with a literal payload.
    pub(crate) fn make_value(&self, kind: TokenKind, value: TokenValue) -> Token {
        Token::with_value(kind, value, self.token_span())
    }

    /// The span of the token currently being lexed.
    pub(crate) fn token_span(&self) -> Span {
        Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        )
    }

    /// Reports a fatal lexical error at the start of the current token.
    pub(crate) fn report_error(&self, message: String) {
        self.handler.fatal(message, self.token_span());
    }

    /// Reports a fatal lexical error at an explicit span.
    pub(crate) fn report_error_at(&self, message: &str, span: Span) {
        self.handler.fatal(message, span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Kw;

    fn lex_all(source: &[u8]) -> Vec<Token> {
        let handler = Handler::silent();
        crate::tokenize(source, &handler)
    }

    fn kinds(source: &[u8]) -> Vec<TokenKind> {
        lex_all(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            kinds(b"( ) { } ; , ."),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Semi,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_and_idents() {
        assert_eq!(
            kinds(b"int main"),
            vec![
                TokenKind::Keyword(Kw::Int),
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions_are_one_based() {
        let tokens = lex_all(b"int x");
        assert_eq!(tokens[0].span.line, 1);
        assert_eq!(tokens[0].span.column, 1);
        assert_eq!(tokens[1].span.column, 5);
    }

    #[test]
    fn test_position_after_newline() {
        let tokens = lex_all(b"int\nx");
        assert_eq!(tokens[1].span.line, 2);
        assert_eq!(tokens[1].span.column, 1);
    }

    #[test]
    fn test_byte_offsets() {
        let source = b"a = 1;";
        let tokens = lex_all(source);
        assert_eq!(tokens[0].span.start, 0);
        assert_eq!(tokens[1].span.start, 2);
        assert_eq!(tokens[2].span.start, 4);
        assert_eq!(tokens[3].span.start, 5);
    }

    #[test]
    fn test_unknown_byte_is_error_token() {
        let handler = Handler::silent();
        let tokens = crate::tokenize(b"int @ x", &handler);
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert!(handler.has_errors());
        // Lexing continues past the bad byte.
        assert_eq!(tokens[2].kind, TokenKind::Ident);
    }

    #[test]
    fn test_eof_is_sticky() {
        let handler = Handler::silent();
        let mut lexer = Lexer::new(b"", &handler);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}
