//! Expression parsing (Pratt / precedence climbing).
//!
//! `parse_expression(min)` parses one prefix form, then keeps folding infix
//! and postfix operators whose precedence is above `min`. Passing the
//! operator's own precedence for the right operand makes equal-precedence
//! chains group to the left; `=` passes `Lowest` so assignment groups to
//! the right.
//!
//! A line break ends an expression unless it follows an operator or sits
//! inside brackets.

use zylo_diagnostic::{Diagnostic, ErrorCode};
use zylo_ir::{Expr, ExprKind, Literal, Token, TokenKind, TokenSource, UnaryOp};

use crate::grammar::precedence::{binary_op, Precedence};
use crate::parser::Parser;

impl<S: TokenSource> Parser<'_, S> {
    pub(crate) fn parse_expression(&mut self, min: Precedence) -> Expr {
        let span = self.cursor.span();
        self.nested(|p| p.expression(min))
            .unwrap_or_else(|| Expr::error(span))
    }

    fn expression(&mut self, min: Precedence) -> Expr {
        if self.cursor.at(TokenKind::Newline) {
            self.cursor.advance();
        }
        let mut left = self.parse_prefix();

        let mut steps = 0usize;
        loop {
            let precedence = Precedence::of_infix(self.cursor.kind());
            if precedence <= min {
                break;
            }
            steps += 1;
            if steps > self.options.max_infix_steps {
                self.halt_with(ErrorCode::E1004, "too many iterations in expression");
                break;
            }
            left = self.parse_infix(left, precedence);
        }
        left
    }

    fn parse_prefix(&mut self) -> Expr {
        let start = self.cursor.span();
        let kind = match self.cursor.kind() {
            TokenKind::Ident => ExprKind::Ident(self.cursor.advance().lexeme),
            TokenKind::Number => {
                let token = self.cursor.advance();
                return self.number(token);
            }
            TokenKind::String => {
                let token = self.cursor.advance();
                match token.literal {
                    Some(Literal::Str(s)) => ExprKind::Str(s),
                    _ => ExprKind::Str(token.lexeme),
                }
            }
            TokenKind::True => {
                self.cursor.advance();
                ExprKind::Bool(true)
            }
            TokenKind::False => {
                self.cursor.advance();
                ExprKind::Bool(false)
            }
            TokenKind::Nil => {
                self.cursor.advance();
                ExprKind::Null
            }
            TokenKind::This => {
                self.cursor.advance();
                ExprKind::This
            }
            TokenKind::Super => {
                self.cursor.advance();
                ExprKind::Ident("super".to_string())
            }
            TokenKind::Minus | TokenKind::Bang | TokenKind::Plus => {
                let op = match self.cursor.advance().kind {
                    TokenKind::Minus => UnaryOp::Neg,
                    TokenKind::Bang => UnaryOp::Not,
                    _ => UnaryOp::Plus,
                };
                let operand = self.parse_expression(Precedence::Prefix);
                ExprKind::Prefix {
                    op,
                    operand: Box::new(operand),
                }
            }
            TokenKind::LParen => {
                self.cursor.advance();
                self.cursor.skip_newlines();
                let inner = self.parse_expression(Precedence::Lowest);
                self.cursor.skip_newlines();
                self.expect(TokenKind::RParen);
                return inner;
            }
            TokenKind::LBracket => {
                self.cursor.advance();
                let items = self.comma_separated(TokenKind::RBracket, "list literal", |p| {
                    p.list_item()
                });
                ExprKind::List(items)
            }
            TokenKind::LBrace => {
                self.cursor.advance();
                let pairs = self.comma_separated(TokenKind::RBrace, "hash literal", |p| {
                    let key = p.list_item()?;
                    p.expect(TokenKind::Colon)?;
                    p.cursor.skip_newlines();
                    let value = p.list_item()?;
                    Some((key, value))
                });
                ExprKind::Hash(pairs)
            }
            TokenKind::Error => {
                let token = self.cursor.advance();
                self.error(Diagnostic::new(
                    ErrorCode::E1003,
                    format!("invalid token '{}'", token.lexeme),
                    token.span,
                ));
                return Expr::error(token.span);
            }
            other => {
                self.error(Diagnostic::new(
                    ErrorCode::E1002,
                    format!("expected expression, got {}", other.describe()),
                    start,
                ));
                return Expr::error(start);
            }
        };
        Expr::new(kind, self.span_from(start))
    }

    /// A number token, falling back to its text when the lexer attached no
    /// value.
    fn number(&mut self, token: Token) -> Expr {
        let kind = match token.literal {
            Some(Literal::Int(n)) => Some(ExprKind::Int(n)),
            Some(Literal::Float(x)) => Some(ExprKind::Float(x)),
            _ if token.lexeme.contains('.') => token.lexeme.parse().ok().map(ExprKind::Float),
            _ => token.lexeme.parse().ok().map(ExprKind::Int),
        };
        match kind {
            Some(kind) => Expr::new(kind, token.span),
            None => {
                self.error(Diagnostic::new(
                    ErrorCode::E1003,
                    format!("invalid number literal '{}'", token.lexeme),
                    token.span,
                ));
                Expr::error(token.span)
            }
        }
    }

    fn parse_infix(&mut self, left: Expr, precedence: Precedence) -> Expr {
        let start = left.span;
        let op_token = self.cursor.advance();
        let kind = match op_token.kind {
            TokenKind::LParen => {
                let args = self.comma_separated(TokenKind::RParen, "arguments", |p| p.list_item());
                ExprKind::Call {
                    callee: Box::new(left),
                    args,
                }
            }
            TokenKind::LBracket => {
                self.cursor.skip_newlines();
                let index = self.parse_expression(Precedence::Lowest);
                self.cursor.skip_newlines();
                self.expect(TokenKind::RBracket);
                ExprKind::Index {
                    collection: Box::new(left),
                    index: Box::new(index),
                }
            }
            TokenKind::Dot => match self.expect_ident() {
                Some(property) => ExprKind::Member {
                    object: Box::new(left),
                    property,
                },
                None => return Expr::error(self.span_from(start)),
            },
            kind => {
                let Some(op) = binary_op(kind) else {
                    // Unreachable through `of_infix`, but recover anyway.
                    self.error_expected("operator");
                    return left;
                };
                let right_min = if kind == TokenKind::Eq {
                    Precedence::Lowest
                } else {
                    precedence
                };
                let right = self.parse_expression(right_min);
                ExprKind::Infix {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                }
            }
        };
        Expr::new(kind, self.span_from(start))
    }

    /// An element of a bracketed list; newlines around it are insignificant.
    fn list_item(&mut self) -> Option<Expr> {
        self.cursor.skip_newlines();
        let expr = self.parse_expression(Precedence::Lowest);
        self.cursor.skip_newlines();
        (!expr.is_error()).then_some(expr)
    }

    /// Items separated by commas up to `close`, which is consumed. A
    /// trailing comma is allowed.
    pub(crate) fn comma_separated<T>(
        &mut self,
        close: TokenKind,
        context: &str,
        mut item: impl FnMut(&mut Self) -> Option<T>,
    ) -> Vec<T> {
        let mut items = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.cursor.at(close)
                || self.cursor.at(TokenKind::Eof)
                || self.deadline_exceeded(context)
            {
                break;
            }
            let before = self.cursor.consumed();
            match item(self) {
                Some(value) => items.push(value),
                None if self.cursor.consumed() == before => break,
                None => {}
            }
            self.cursor.skip_newlines();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.cursor.skip_newlines();
        self.expect(close);
        items
    }
}
