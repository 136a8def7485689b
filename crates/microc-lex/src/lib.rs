//! microc-lex - Lexical analysis for Micro source code.
//!
//! The lexer turns a byte buffer into a stream of [`Token`]s with exact
//! source positions. It is byte-oriented throughout: escape sequences in
//! string and character literals cook down to raw bytes (`\xFF` is the
//! single byte 0xFF), and the lexeme of every token is a slice of the
//! original buffer addressed through its [`Span`](microc_util::Span).
//!
//! Scanning never panics and never throws; problems are reported through
//! the shared diagnostic [`Handler`](microc_util::Handler) and surface as
//! `TokenKind::Error` tokens, leaving the decision to stop to the driver.

pub mod cursor;
mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{Kw, Token, TokenKind, TokenValue};

use microc_util::Handler;

/// Lexes an entire source buffer into a materialised token vector.
///
/// The returned vector always ends with a single `Eof` token, which is
/// the shape the parser expects.
pub fn tokenize(source: &[u8], handler: &Handler) -> Vec<Token> {
    let mut lexer = Lexer::new(source, handler);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    tokens
}
