//! microc-par - Recursive-descent parser for the Micro language.
//!
//! The parser consumes the materialised token vector produced by
//! `microc-lex` (terminated by `Eof`) and builds a [`Program`] AST, or
//! returns `None` on failure.
//!
//! Error handling uses a sticky flag threaded through the parser value:
//! the first diagnostic latches `had_error`, after which every subparse
//! short-circuits and returns `None`. Partially built nodes are simply
//! dropped. The parser never panics.

pub mod ast;
mod expr;
mod items;
mod stmt;

pub use ast::*;

use microc_lex::{Token, TokenKind};
use microc_util::Handler;

/// Parser over a lexed token stream.
///
/// The source buffer is carried alongside the tokens so identifier and
/// keyword text can be recovered from lexeme slices; the caller must
/// keep both alive for the duration of the parse.
///
/// # Example
///
/// ```
/// use microc_lex::tokenize;
/// use microc_par::Parser;
/// use microc_util::Handler;
///
/// let source = b"int main() { return 0; }";
/// let handler = Handler::silent();
/// let tokens = tokenize(source, &handler);
/// let program = Parser::new(source, &tokens, &handler).parse();
/// assert!(program.is_some());
/// ```
pub struct Parser<'a> {
    /// The original source buffer (for lexeme extraction).
    source: &'a [u8],

    /// Token stream, terminated by `Eof`.
    tokens: &'a [Token],

    /// Current position in the token stream.
    position: usize,

    /// Diagnostic handler.
    handler: &'a Handler,

    /// Sticky error flag; once set, every subparse returns `None`.
    had_error: bool,
}

impl<'a> Parser<'a> {
    /// Creates a new parser over a token stream.
    pub fn new(source: &'a [u8], tokens: &'a [Token], handler: &'a Handler) -> Self {
        Self {
            source,
            tokens,
            position: 0,
            handler,
            had_error: false,
        }
    }

    /// Parses a complete program.
    ///
    /// Only function definitions/declarations and imports may appear at
    /// the top level; anything else is a fatal parse error.
    pub fn parse(&mut self) -> Option<Program> {
        if self.tokens.is_empty() {
            return Some(Program::default());
        }

        let mut items = Vec::new();

        while self.kind() != TokenKind::Eof {
            if self.had_error {
                return None;
            }
            let item = self.parse_item()?;
            items.push(item);
        }

        if self.had_error {
            return None;
        }

        Some(Program { items })
    }

    // =========================================================================
    // Token stream helpers
    // =========================================================================

    /// The current token. The stream is `Eof`-terminated, so walking off
    /// the end keeps yielding the final `Eof`.
    pub(crate) fn current(&self) -> &'a Token {
        let idx = self.position.min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// Kind of the current token.
    pub(crate) fn kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Kind of the token `offset` positions ahead.
    pub(crate) fn peek_kind(&self, offset: usize) -> TokenKind {
        let idx = (self.position + offset).min(self.tokens.len() - 1);
        self.tokens[idx].kind
    }

    /// Advances past the current token.
    pub(crate) fn bump(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Returns true if the current token has the given kind.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Consumes the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes a token of the given kind or reports `message`.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> Option<()> {
        if self.eat(kind) {
            Some(())
        } else {
            self.error(message);
            None
        }
    }

    /// Reports a fatal parse error at the current token and latches the
    /// sticky flag. Only the first error is reported.
    pub(crate) fn error(&mut self, message: &str) {
        if !self.had_error {
            self.handler.fatal(message, self.current().span);
            self.had_error = true;
        }
    }

    /// Returns `None` if the sticky error flag is set.
    pub(crate) fn guard(&self) -> Option<()> {
        if self.had_error {
            None
        } else {
            Some(())
        }
    }

    /// The text of a token's lexeme, as an owned string.
    pub(crate) fn token_text(&self, token: &Token) -> String {
        String::from_utf8_lossy(token.lexeme(self.source)).into_owned()
    }
}
