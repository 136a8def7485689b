//! Multi-byte operator resolution.
//!
//! Dispatch is per leading byte with lookahead, so multi-character
//! operators always win over their one-character prefixes: `==` can
//! never lex as two `=` tokens.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes `=` or `==`.
    pub(crate) fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::Eq)
        } else {
            self.make(TokenKind::Assign)
        }
    }

    /// Lexes `!=`. A lone `!` is not an operator in Micro.
    pub(crate) fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::Ne)
        } else {
            self.report_error("unexpected character '!'".to_string());
            self.make(TokenKind::Error)
        }
    }

    /// Lexes `<` or `<=`.
    pub(crate) fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::Le)
        } else {
            self.make(TokenKind::Lt)
        }
    }

    /// Lexes `>` or `>=`.
    pub(crate) fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_byte(b'=') {
            self.make(TokenKind::Ge)
        } else {
            self.make(TokenKind::Gt)
        }
    }

    /// Lexes `.` or the ellipsis `...`.
    pub(crate) fn lex_dot(&mut self) -> Token {
        if self.cursor.peek(1) == b'.' && self.cursor.peek(2) == b'.' {
            self.cursor.advance();
            self.cursor.advance();
            self.cursor.advance();
            self.make(TokenKind::Ellipsis)
        } else {
            self.single(TokenKind::Dot)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::token::TokenKind;
    use microc_util::Handler;

    fn kinds(source: &[u8]) -> Vec<TokenKind> {
        let handler = Handler::silent();
        crate::tokenize(source, &handler)
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_multi_char_operators_win() {
        assert_eq!(kinds(b"=="), vec![TokenKind::Eq, TokenKind::Eof]);
        assert_eq!(kinds(b"!="), vec![TokenKind::Ne, TokenKind::Eof]);
        assert_eq!(kinds(b"<="), vec![TokenKind::Le, TokenKind::Eof]);
        assert_eq!(kinds(b">="), vec![TokenKind::Ge, TokenKind::Eof]);
    }

    #[test]
    fn test_single_char_operators() {
        assert_eq!(
            kinds(b"= < > + - * / %"),
            vec![
                TokenKind::Assign,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_equality_chain_splits_greedily() {
        // === lexes as == then =.
        assert_eq!(
            kinds(b"==="),
            vec![TokenKind::Eq, TokenKind::Assign, TokenKind::Eof]
        );
    }

    #[test]
    fn test_ellipsis() {
        assert_eq!(kinds(b"..."), vec![TokenKind::Ellipsis, TokenKind::Eof]);
    }

    #[test]
    fn test_two_dots_are_two_tokens() {
        assert_eq!(
            kinds(b".."),
            vec![TokenKind::Dot, TokenKind::Dot, TokenKind::Eof]
        );
    }

    #[test]
    fn test_lone_bang_is_error() {
        let handler = Handler::silent();
        let tokens = crate::tokenize(b"!", &handler);
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert!(handler.has_errors());
    }
}
