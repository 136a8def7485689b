//! String and character literal lexing.
//!
//! Both literal forms share the same escape grammar and cook down to raw
//! bytes. A string token owns its cooked bytes; the lexeme slice still
//! covers the quoted source text.

use crate::token::{Token, TokenKind, TokenValue};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a string literal into its cooked byte sequence.
    ///
    /// An unterminated string is a fatal diagnostic reported at the
    /// opening quote.
    pub(crate) fn lex_string(&mut self) -> Token {
        self.cursor.advance();

        let mut cooked = Vec::new();

        loop {
            if self.cursor.is_at_end() || self.cursor.current() == b'\n' {
                self.report_error("unterminated string literal".to_string());
                break;
            }

            let b = self.cursor.current();

            if b == b'"' {
                self.cursor.advance();
                break;
            }

            if b == b'\\' {
                self.cursor.advance();
                cooked.push(self.lex_escape());
            } else {
                cooked.push(b);
                self.cursor.advance();
            }
        }

        self.make_value(TokenKind::StrLit, TokenValue::Bytes(cooked))
    }

    /// Lexes a character literal; the payload is the byte value.
    pub(crate) fn lex_char(&mut self) -> Token {
        self.cursor.advance();

        if self.cursor.is_at_end() {
            self.report_error("unterminated character literal".to_string());
            return self.make_value(TokenKind::CharLit, TokenValue::Int(0));
        }

        let value = if self.cursor.current() == b'\\' {
            self.cursor.advance();
            self.lex_escape()
        } else {
            let b = self.cursor.current();
            if b == b'\'' || b == b'\n' {
                self.report_error("empty character literal".to_string());
                self.cursor.match_byte(b'\'');
                return self.make_value(TokenKind::CharLit, TokenValue::Int(0));
            }
            self.cursor.advance();
            b
        };

        if !self.cursor.match_byte(b'\'') {
            self.report_error("unterminated character literal".to_string());
        }

        self.make_value(TokenKind::CharLit, TokenValue::Int(value as i64))
    }

    /// Cooks one escape sequence to a byte. The leading backslash has
    /// already been consumed.
    ///
    /// Handles `\n \t \r \\ \' \" \? \a \b \f \v`, octal escapes of up
    /// to three digits, and greedy hex escapes `\xHH...` (low byte
    /// kept). An unknown escape yields the literal character after the
    /// backslash.
    pub(crate) fn lex_escape(&mut self) -> u8 {
        if self.cursor.is_at_end() {
            self.report_error("unterminated escape sequence".to_string());
            return 0;
        }

        let b = self.cursor.current();
        self.cursor.advance();

        match b {
            b'n' => b'\n',
            b't' => b'\t',
            b'r' => b'\r',
            b'\\' => b'\\',
            b'\'' => b'\'',
            b'"' => b'"',
            b'?' => b'?',
            b'a' => 0x07,
            b'b' => 0x08,
            b'f' => 0x0C,
            b'v' => 0x0B,
            b'0'..=b'7' => {
                let mut value = (b - b'0') as u32;
                let mut digits = 1;
                while digits < 3 && matches!(self.cursor.current(), b'0'..=b'7') {
                    value = value * 8 + (self.cursor.current() - b'0') as u32;
                    self.cursor.advance();
                    digits += 1;
                }
                (value & 0xFF) as u8
            }
            b'x' => {
                let mut value = 0u32;
                let mut digits = 0;
                while self.cursor.current().is_ascii_hexdigit() {
                    let d = (self.cursor.current() as char).to_digit(16).unwrap_or(0);
                    value = value.wrapping_mul(16).wrapping_add(d);
                    self.cursor.advance();
                    digits += 1;
                }
                if digits == 0 {
                    // No digits after \x: fall back to the literal 'x'.
                    b'x'
                } else {
                    (value & 0xFF) as u8
                }
            }
            other => other,
        }
    }
}
