//! Number literal lexing.
//!
//! Micro numbers are decimal only: a digit run, optionally followed by a
//! single `.` and a further digit run, which makes the literal a float.
//! A second `.` terminates the literal without being consumed, so
//! `1.2.3` lexes as the float `1.2` followed by `.` and `3`.

use crate::token::{Token, TokenKind, TokenValue};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an integer or floating-point literal.
    pub(crate) fn lex_number(&mut self) -> Token {
        while self.cursor.current().is_ascii_digit() {
            self.cursor.advance();
        }

        let is_float =
            self.cursor.current() == b'.' && self.cursor.peek(1).is_ascii_digit();

        if is_float {
            self.cursor.advance();
            while self.cursor.current().is_ascii_digit() {
                self.cursor.advance();
            }

            let text = String::from_utf8_lossy(self.cursor.slice_from(self.token_start));
            match text.parse::<f64>() {
                Ok(value) => self.make_value(TokenKind::FloatLit, TokenValue::Float(value)),
                Err(e) => {
                    self.report_error(format!("invalid float literal '{}': {}", text, e));
                    self.make_value(TokenKind::FloatLit, TokenValue::Float(0.0))
                }
            }
        } else {
            let text = String::from_utf8_lossy(self.cursor.slice_from(self.token_start));
            match text.parse::<i64>() {
                Ok(value) => self.make_value(TokenKind::IntLit, TokenValue::Int(value)),
                Err(e) => {
                    self.report_error(format!("integer literal overflow: {}", e));
                    self.make_value(TokenKind::IntLit, TokenValue::Int(0))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::token::{TokenKind, TokenValue};
    use microc_util::Handler;

    fn first(source: &[u8]) -> crate::Token {
        let handler = Handler::silent();
        crate::tokenize(source, &handler).remove(0)
    }

    #[test]
    fn test_integer() {
        let token = first(b"42");
        assert_eq!(token.kind, TokenKind::IntLit);
        assert_eq!(token.value, TokenValue::Int(42));
    }

    #[test]
    fn test_zero() {
        let token = first(b"0");
        assert_eq!(token.value, TokenValue::Int(0));
    }

    #[test]
    fn test_float() {
        let token = first(b"3.25");
        assert_eq!(token.kind, TokenKind::FloatLit);
        assert_eq!(token.value, TokenValue::Float(3.25));
    }

    #[test]
    fn test_second_dot_terminates() {
        let handler = Handler::silent();
        let tokens = crate::tokenize(b"1.2.3", &handler);
        assert_eq!(tokens[0].kind, TokenKind::FloatLit);
        assert_eq!(tokens[0].value, TokenValue::Float(1.2));
        assert_eq!(tokens[1].kind, TokenKind::Dot);
        assert_eq!(tokens[2].kind, TokenKind::IntLit);
    }

    #[test]
    fn test_trailing_dot_is_not_a_float() {
        let handler = Handler::silent();
        let tokens = crate::tokenize(b"3.", &handler);
        assert_eq!(tokens[0].kind, TokenKind::IntLit);
        assert_eq!(tokens[1].kind, TokenKind::Dot);
    }

    #[test]
    fn test_integer_overflow_reported() {
        let handler = Handler::silent();
        let tokens = crate::tokenize(b"99999999999999999999", &handler);
        assert_eq!(tokens[0].kind, TokenKind::IntLit);
        assert!(handler.has_errors());
    }

    #[test]
    fn test_number_lexeme_matches_source() {
        let source = b"123 4.5";
        let handler = Handler::silent();
        let tokens = crate::tokenize(source, &handler);
        assert_eq!(tokens[0].lexeme(source), b"123");
        assert_eq!(tokens[1].lexeme(source), b"4.5");
    }
}
