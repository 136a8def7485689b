//! Item parsing - top-level function definitions, declarations, and
//! imports.

use crate::ast::*;
use crate::Parser;
use microc_lex::{Kw, TokenKind};

impl<'a> Parser<'a> {
    /// Parses a single top-level item.
    ///
    /// Anything that is not a function definition/declaration or an
    /// import is still parsed as a statement so the diagnostic lands on
    /// the right token, then rejected.
    pub(crate) fn parse_item(&mut self) -> Option<Item> {
        self.guard()?;

        match self.kind() {
            TokenKind::Keyword(Kw::Import) => {
                let import = self.parse_import()?;
                Some(Item::Import(import))
            }
            TokenKind::Keyword(kw)
                if kw.is_type()
                    && self.peek_kind(1) == TokenKind::Ident
                    && self.peek_kind(2) == TokenKind::LParen =>
            {
                let func = self.parse_func_def()?;
                Some(Item::Func(func))
            }
            _ => {
                let _stmt = self.parse_statement()?;
                self.error("only function definitions and imports are allowed at top level");
                None
            }
        }
    }

    /// Parses a function definition or forward declaration:
    /// `TYPE IDENT "(" params? ")" ( ";" | block )`.
    pub(crate) fn parse_func_def(&mut self) -> Option<FuncDef> {
        self.guard()?;

        let return_type = match self.kind() {
            TokenKind::Keyword(kw) if kw.is_type() => {
                self.bump();
                kw.as_str().to_string()
            }
            _ => {
                self.error("expected return type for function definition");
                return None;
            }
        };

        if !self.check(TokenKind::Ident) {
            self.error("expected function name");
            return None;
        }
        let name = self.token_text(self.current());
        self.bump();

        let params = self.parse_param_list()?;

        if self.eat(TokenKind::Semi) {
            return Some(FuncDef {
                name,
                return_type,
                params,
                body: None,
                is_declaration: true,
            });
        }

        if !self.check(TokenKind::LBrace) {
            self.error("expected '{' for function body");
            return None;
        }
        let body = self.parse_block()?;

        Some(FuncDef {
            name,
            return_type,
            params,
            body: Some(body),
            is_declaration: false,
        })
    }

    /// Parses a parenthesised parameter list.
    ///
    /// `...` may only appear as the final element; a `,` after it is a
    /// fatal parse error.
    pub(crate) fn parse_param_list(&mut self) -> Option<Vec<Param>> {
        self.expect(TokenKind::LParen, "expected '(' for parameter list")?;

        let mut params = Vec::new();

        while !self.check(TokenKind::RParen) {
            if self.eat(TokenKind::Ellipsis) {
                params.push(Param::variadic());
                if self.check(TokenKind::Comma) {
                    self.error("variadic parameter must be the last in the list");
                    return None;
                }
                break;
            }

            let ty = match self.kind() {
                TokenKind::Keyword(kw) if kw.is_type() => {
                    self.bump();
                    kw.as_str().to_string()
                }
                _ => {
                    self.error("expected type in parameter list");
                    return None;
                }
            };

            if !self.check(TokenKind::Ident) {
                self.error("expected identifier in parameter list");
                return None;
            }
            let name = self.token_text(self.current());
            self.bump();

            params.push(Param::named(name, ty));

            if self.eat(TokenKind::Comma) {
                continue;
            }
            if !self.check(TokenKind::RParen) {
                self.error("expected ',' or ')' in parameter list");
                return None;
            }
        }

        self.expect(TokenKind::RParen, "expected ')' to close parameter list")?;
        Some(params)
    }

    /// Parses `import dotted.module.name ;`.
    pub(crate) fn parse_import(&mut self) -> Option<Import> {
        self.guard()?;
        self.expect(TokenKind::Keyword(Kw::Import), "expected 'import'")?;

        if !self.check(TokenKind::Ident) {
            self.error("expected module name after import statement");
            return None;
        }
        let mut module = self.token_text(self.current());
        self.bump();

        while self.check(TokenKind::Dot) && self.peek_kind(1) == TokenKind::Ident {
            self.bump();
            module.push('.');
            module.push_str(&self.token_text(self.current()));
            self.bump();
        }

        self.expect(TokenKind::Semi, "expected ';' after import statement")?;
        Some(Import { module })
    }
}
