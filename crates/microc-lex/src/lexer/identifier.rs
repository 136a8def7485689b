//! Identifier and keyword lexing.

use crate::token::{Kw, Token, TokenKind, TokenValue};
use crate::Lexer;

#[inline]
fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl<'a> Lexer<'a> {
    /// Lexes an identifier, keyword, or boolean literal.
    ///
    /// Identifiers start with a letter or underscore, followed by
    /// alphanumerics or underscores. The matched text is looked up in
    /// the keyword table; `true` and `false` become boolean literals
    /// with payload 1 and 0.
    pub(crate) fn lex_identifier(&mut self) -> Token {
        while is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);

        match text {
            b"true" => self.make_value(TokenKind::BoolLit, TokenValue::Int(1)),
            b"false" => self.make_value(TokenKind::BoolLit, TokenValue::Int(0)),
            _ => match Kw::from_ident(text) {
                Some(kw) => self.make(TokenKind::Keyword(kw)),
                None => self.make(TokenKind::Ident),
            },
        }
    }
}
