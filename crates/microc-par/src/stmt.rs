//! Statement parsing - blocks, return, definitions, assignments, calls,
//! if/else chains, and imports in statement position.

use crate::ast::*;
use crate::Parser;
use microc_lex::{Kw, TokenKind};

impl<'a> Parser<'a> {
    /// Parses a single statement.
    pub(crate) fn parse_statement(&mut self) -> Option<Stmt> {
        self.guard()?;

        match self.kind() {
            TokenKind::LBrace => {
                let block = self.parse_block()?;
                Some(Stmt::Block(block))
            }
            TokenKind::Keyword(Kw::Return) => self.parse_return(),
            TokenKind::Keyword(Kw::Import) => {
                let import = self.parse_import()?;
                Some(Stmt::Import(import))
            }
            TokenKind::Keyword(Kw::If) => {
                let if_stmt = self.parse_if()?;
                Some(Stmt::If(if_stmt))
            }
            TokenKind::Keyword(kw) if kw.is_type() => self.parse_definition(kw),
            TokenKind::Ident => self.parse_ident_statement(),
            _ => {
                self.error("unknown statement");
                None
            }
        }
    }

    /// Parses a brace-delimited block.
    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        self.guard()?;
        self.expect(TokenKind::LBrace, "expected '{' to open block")?;

        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            let stmt = self.parse_statement()?;
            stmts.push(stmt);
        }

        self.expect(TokenKind::RBrace, "expected '}' to close block")?;
        Some(Block { stmts })
    }

    /// Parses `return expr? ;`.
    fn parse_return(&mut self) -> Option<Stmt> {
        self.bump();

        let value = if self.check(TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expression(0)?)
        };

        self.expect(TokenKind::Semi, "expected ';' after return statement")?;
        Some(Stmt::Return(value))
    }

    /// Parses a definition statement `T x = e;`.
    ///
    /// The value-less form `T x;` stays reserved; the front-end requires
    /// the initialiser.
    fn parse_definition(&mut self, kw: Kw) -> Option<Stmt> {
        self.bump();
        let ty = kw.as_str().to_string();

        if !self.check(TokenKind::Ident) {
            self.error("expected identifier after type");
            return None;
        }
        let name = self.token_text(self.current());
        self.bump();

        if !self.eat(TokenKind::Assign) {
            self.error("expected '=' or '(' after identifier");
            return None;
        }

        let value = self.parse_expression(0)?;
        self.expect(TokenKind::Semi, "expected ';' after definition")?;

        Some(Stmt::Def {
            name,
            ty,
            value: Some(value),
        })
    }

    /// Parses a statement that begins with an identifier: either a call
    /// statement or a reassignment.
    fn parse_ident_statement(&mut self) -> Option<Stmt> {
        if self.peek_kind(1) == TokenKind::LParen {
            let call = self.parse_call()?;
            self.expect(TokenKind::Semi, "expected ';' after function call")?;
            return Some(Stmt::Call(call));
        }

        let name = self.token_text(self.current());
        self.bump();

        if !self.eat(TokenKind::Assign) {
            self.error("expected '=' or '(' after identifier");
            return None;
        }

        let value = self.parse_expression(0)?;
        self.expect(TokenKind::Semi, "expected ';' after assignment")?;

        Some(Stmt::Assign { name, value })
    }

    /// Parses an `if` statement and its else-if/else chain.
    ///
    /// `else if` nests another [`IfStmt`] in the else branch; a bare
    /// `else` terminates the chain with a block.
    pub(crate) fn parse_if(&mut self) -> Option<IfStmt> {
        self.guard()?;
        self.expect(TokenKind::Keyword(Kw::If), "expected 'if' keyword")?;
        self.expect(TokenKind::LParen, "expected '(' after 'if'")?;

        let cond = self.parse_expression(0)?;

        self.expect(TokenKind::RParen, "expected ')' after condition")?;

        if !self.check(TokenKind::LBrace) {
            self.error("expected '{' for if body");
            return None;
        }
        let then_block = self.parse_block()?;

        let else_branch = if self.eat(TokenKind::Keyword(Kw::Else)) {
            if self.check(TokenKind::Keyword(Kw::If)) {
                Some(ElseBranch::ElseIf(Box::new(self.parse_if()?)))
            } else if self.check(TokenKind::LBrace) {
                Some(ElseBranch::Else(self.parse_block()?))
            } else {
                self.error("expected 'if' or '{' after 'else'");
                return None;
            }
        } else {
            None
        };

        Some(IfStmt {
            cond,
            then_block,
            else_branch,
        })
    }
}
