//! Expression parsing by precedence climbing.
//!
//! All binary operators are left-associative. Precedence levels, higher
//! binds tighter:
//!
//! | Level | Operators |
//! |-------|-----------|
//! | 3 | `*` `/` `%` |
//! | 2 | `+` `-` |
//! | 1 | `==` `!=` `<` `>` `<=` `>=` |
//! | 0 | `=` |
//!
//! A factor is a numeric/float/string literal, an identifier (reparsed
//! as a call when immediately followed by `(`), or a parenthesised
//! expression.

use crate::ast::*;
use crate::Parser;
use microc_lex::TokenKind;

/// Maps a token to its binary operator and precedence level.
fn binary_op(kind: TokenKind) -> Option<(BinOp, u8)> {
    match kind {
        TokenKind::Star => Some((BinOp::Mul, 3)),
        TokenKind::Slash => Some((BinOp::Div, 3)),
        TokenKind::Percent => Some((BinOp::Rem, 3)),
        TokenKind::Plus => Some((BinOp::Add, 2)),
        TokenKind::Minus => Some((BinOp::Sub, 2)),
        TokenKind::Eq => Some((BinOp::Eq, 1)),
        TokenKind::Ne => Some((BinOp::Ne, 1)),
        TokenKind::Lt => Some((BinOp::Lt, 1)),
        TokenKind::Gt => Some((BinOp::Gt, 1)),
        TokenKind::Le => Some((BinOp::Le, 1)),
        TokenKind::Ge => Some((BinOp::Ge, 1)),
        TokenKind::Assign => Some((BinOp::Assign, 0)),
        _ => None,
    }
}

impl<'a> Parser<'a> {
    /// Parses an expression with the precedence-climbing algorithm.
    ///
    /// `min_level` is the lowest operator precedence this call will
    /// consume; the recursive call for the right operand passes
    /// `level + 1`, which makes every operator left-associative.
    pub(crate) fn parse_expression(&mut self, min_level: u8) -> Option<Expr> {
        self.guard()?;

        let mut lhs = self.parse_factor()?;

        loop {
            let Some((op, level)) = binary_op(self.kind()) else {
                break;
            };
            if level < min_level {
                break;
            }

            self.bump();
            let rhs = self.parse_expression(level + 1)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }

        Some(lhs)
    }

    /// Parses a factor (primary expression).
    pub(crate) fn parse_factor(&mut self) -> Option<Expr> {
        self.guard()?;

        match self.kind() {
            TokenKind::IntLit => {
                let value = self.current().int_value().unwrap_or(0);
                self.bump();
                Some(Expr::Int(value))
            }
            TokenKind::FloatLit => {
                let value = self.current().float_value().unwrap_or(0.0);
                self.bump();
                Some(Expr::Float(value))
            }
            TokenKind::StrLit => {
                let bytes = self.current().bytes_value().unwrap_or(b"").to_vec();
                self.bump();
                Some(Expr::Str(bytes))
            }
            TokenKind::Ident => {
                if self.peek_kind(1) == TokenKind::LParen {
                    return Some(Expr::Call(self.parse_call()?));
                }
                let name = self.token_text(self.current());
                self.bump();
                Some(Expr::Ident(name))
            }
            TokenKind::LParen => {
                self.bump();
                let expr = self.parse_expression(0)?;
                self.expect(TokenKind::RParen, "expected ')'")?;
                Some(expr)
            }
            _ => {
                self.error("expected number, string, identifier, or '('");
                None
            }
        }
    }

    /// Parses a function call: `IDENT "(" arg_list? ")"`.
    pub(crate) fn parse_call(&mut self) -> Option<CallExpr> {
        self.guard()?;

        if !self.check(TokenKind::Ident) {
            self.error("expected identifier for function call");
            return None;
        }
        let name = self.token_text(self.current());
        self.bump();

        self.expect(TokenKind::LParen, "expected '(' for function call")?;

        let mut args = Vec::new();
        while !self.check(TokenKind::RParen) {
            let arg = self.parse_expression(0)?;
            args.push(arg);

            if self.eat(TokenKind::Comma) {
                continue;
            }
            if !self.check(TokenKind::RParen) {
                self.error("expected ',' or ')' in argument list");
                return None;
            }
        }

        self.expect(TokenKind::RParen, "expected ')' to close argument list")?;
        Some(CallExpr { name, args })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::Parser;
    use microc_lex::tokenize;
    use microc_util::Handler;

    fn parse_expr(text: &str) -> Expr {
        let source = format!("int main() {{ return {}; }}", text);
        let handler = Handler::silent();
        let tokens = tokenize(source.as_bytes(), &handler);
        let program = Parser::new(source.as_bytes(), &tokens, &handler)
            .parse()
            .unwrap_or_else(|| panic!("parse failed for {:?}", text));
        match program.items.into_iter().next() {
            Some(Item::Func(f)) => match f.body.unwrap().stmts.into_iter().next() {
                Some(Stmt::Return(Some(expr))) => expr,
                other => panic!("expected return, got {:?}", other),
            },
            other => panic!("expected function, got {:?}", other),
        }
    }

    fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    #[test]
    fn test_literals() {
        assert_eq!(parse_expr("42"), Expr::Int(42));
        assert_eq!(parse_expr("3.5"), Expr::Float(3.5));
        assert_eq!(parse_expr("\"hi\""), Expr::Str(b"hi".to_vec()));
        assert_eq!(parse_expr("x"), Expr::Ident("x".to_string()));
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        // a + b * c parses as a + (b * c)
        assert_eq!(
            parse_expr("a + b * c"),
            binary(
                BinOp::Add,
                Expr::Ident("a".into()),
                binary(BinOp::Mul, Expr::Ident("b".into()), Expr::Ident("c".into())),
            )
        );
    }

    #[test]
    fn test_comparison_binds_looser_than_addition() {
        // a == b + c parses as a == (b + c)
        assert_eq!(
            parse_expr("a == b + c"),
            binary(
                BinOp::Eq,
                Expr::Ident("a".into()),
                binary(BinOp::Add, Expr::Ident("b".into()), Expr::Ident("c".into())),
            )
        );
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        // a - b - c parses as (a - b) - c
        assert_eq!(
            parse_expr("a - b - c"),
            binary(
                BinOp::Sub,
                binary(BinOp::Sub, Expr::Ident("a".into()), Expr::Ident("b".into())),
                Expr::Ident("c".into()),
            )
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(
            parse_expr("(a + b) * c"),
            binary(
                BinOp::Mul,
                binary(BinOp::Add, Expr::Ident("a".into()), Expr::Ident("b".into())),
                Expr::Ident("c".into()),
            )
        );
    }

    #[test]
    fn test_call_in_expression() {
        assert_eq!(
            parse_expr("add(1, 2) + 3"),
            binary(
                BinOp::Add,
                Expr::Call(CallExpr {
                    name: "add".into(),
                    args: vec![Expr::Int(1), Expr::Int(2)],
                }),
                Expr::Int(3),
            )
        );
    }

    #[test]
    fn test_nested_calls() {
        assert_eq!(
            parse_expr("f(g(1))"),
            Expr::Call(CallExpr {
                name: "f".into(),
                args: vec![Expr::Call(CallExpr {
                    name: "g".into(),
                    args: vec![Expr::Int(1)],
                })],
            })
        );
    }

    #[test]
    fn test_call_without_args() {
        assert_eq!(
            parse_expr("now()"),
            Expr::Call(CallExpr {
                name: "now".into(),
                args: vec![],
            })
        );
    }

    #[test]
    fn test_nested_assignment_parses() {
        // `=` is accepted by the grammar at the lowest level; the
        // emitter rejects it later.
        assert_eq!(
            parse_expr("a = 2"),
            binary(BinOp::Assign, Expr::Ident("a".into()), Expr::Int(2))
        );
    }

    #[test]
    fn test_mixed_precedence_chain() {
        // 2 + 3 * 4 == 14 parses as (2 + (3 * 4)) == 14
        assert_eq!(
            parse_expr("2 + 3 * 4 == 14"),
            binary(
                BinOp::Eq,
                binary(
                    BinOp::Add,
                    Expr::Int(2),
                    binary(BinOp::Mul, Expr::Int(3), Expr::Int(4)),
                ),
                Expr::Int(14),
            )
        );
    }

    #[test]
    fn test_unclosed_paren_is_error() {
        let source = b"int main() { return (1 + 2; }";
        let handler = Handler::silent();
        let tokens = tokenize(source, &handler);
        let program = Parser::new(source, &tokens, &handler).parse();
        assert!(program.is_none());
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn test_missing_operand_is_error() {
        let source = b"int main() { return 1 + ; }";
        let handler = Handler::silent();
        let tokens = tokenize(source, &handler);
        let program = Parser::new(source, &tokens, &handler).parse();
        assert!(program.is_none());
        assert_eq!(handler.error_count(), 1);
    }
}
