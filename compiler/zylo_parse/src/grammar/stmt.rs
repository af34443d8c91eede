//! Statement parsing.
//!
//! Statements are dispatched on their leading keyword; anything else is an
//! expression statement. A rule that cannot build its node reports why and
//! returns `None`; the enclosing loop then guarantees progress.

use std::sync::Arc;

use tracing::trace;
use zylo_diagnostic::{Diagnostic, ErrorCode};
use zylo_ir::{
    Block, CatchClause, ClassDecl, ForInStmt, FuncDecl, IfStmt, Span, Stmt, StmtKind,
    TokenKind, TokenSource, TryStmt, VarStmt, WhileStmt,
};

use crate::grammar::precedence::Precedence;
use crate::parser::Parser;

impl<S: TokenSource> Parser<'_, S> {
    pub(crate) fn parse_statement(&mut self) -> Option<Stmt> {
        trace!(kind = ?self.cursor.kind(), span = ?self.cursor.span(), "statement");
        let start = self.cursor.span();
        let kind = match self.cursor.kind() {
            TokenKind::Var | TokenKind::Const => self.parse_var().map(StmtKind::Var),
            TokenKind::Func => self.parse_func().map(StmtKind::Func),
            TokenKind::Class => self.parse_class().map(StmtKind::Class),
            TokenKind::Return => Some(self.parse_return()),
            TokenKind::If => self.parse_if().map(StmtKind::If),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Try => self.parse_try(),
            TokenKind::Throw => {
                self.cursor.advance();
                Some(StmtKind::Throw(self.parse_expression(Precedence::Lowest)))
            }
            TokenKind::Break => {
                self.cursor.advance();
                Some(StmtKind::Break)
            }
            TokenKind::Continue => {
                self.cursor.advance();
                Some(StmtKind::Continue)
            }
            TokenKind::Import => {
                self.cursor.advance();
                self.expect_ident().map(StmtKind::Import)
            }
            TokenKind::LBrace => self.parse_block().map(StmtKind::Block),
            TokenKind::Elif => {
                self.error(Diagnostic::new(
                    ErrorCode::E1006,
                    "'elif' without a preceding 'if'",
                    start,
                ));
                self.cursor.advance();
                None
            }
            TokenKind::Else | TokenKind::Catch | TokenKind::Finally => {
                let what = self.cursor.kind().describe();
                self.error(Diagnostic::new(
                    ErrorCode::E1001,
                    format!("unexpected {what}"),
                    start,
                ));
                self.cursor.advance();
                None
            }
            _ => {
                let expr = self.parse_expression(Precedence::Lowest);
                (!expr.is_error()).then_some(StmtKind::Expr(expr))
            }
        };
        let kind = kind?;
        self.eat(TokenKind::Semicolon);
        Some(Stmt::new(kind, self.span_from(start)))
    }

    /// `{ statement* }`
    ///
    /// Reports and returns `None` when the opening brace is missing.
    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        self.cursor.skip_newlines();
        let open = self.expect(TokenKind::LBrace)?;
        self.nested(|p| p.block_body(open.span))
    }

    fn block_body(&mut self, start: Span) -> Block {
        let mut statements = Vec::new();
        let mut iterations = 0usize;

        loop {
            self.skip_separators();
            if self.cursor.at(TokenKind::RBrace)
                || self.cursor.at(TokenKind::Eof)
                || self.deadline_exceeded("block")
            {
                break;
            }
            iterations += 1;
            if iterations > self.options.max_block_statements {
                self.halt_with(ErrorCode::E1004, "too many iterations in block");
                break;
            }

            let before = self.cursor.consumed();
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.ensure_progress(before);
        }

        self.expect(TokenKind::RBrace);
        Block::new(statements, self.span_from(start))
    }

    /// `var NAME [: Type] [= value]` (also `const`).
    fn parse_var(&mut self) -> Option<VarStmt> {
        self.cursor.advance();
        let name = self.expect_ident()?;
        if self.eat(TokenKind::Colon) {
            self.parse_type_tag();
        }
        let value = self
            .eat(TokenKind::Eq)
            .then(|| self.parse_expression(Precedence::Lowest));
        Some(VarStmt { name, value })
    }

    /// `Name` or `Name<Type>`; recorded as text, never checked.
    fn parse_type_tag(&mut self) -> Option<String> {
        let name = self.expect_ident()?.name;
        if !self.eat(TokenKind::Lt) {
            return Some(name);
        }
        let inner = self.nested(Self::parse_type_tag)??;
        self.expect(TokenKind::Gt)?;
        Some(format!("{name}<{inner}>"))
    }

    /// `func NAME(p [: Type], ...) [[:] Type] { body }`
    fn parse_func(&mut self) -> Option<Arc<FuncDecl>> {
        let start = self.cursor.advance().span;
        let name = self.expect_ident()?;
        self.expect(TokenKind::LParen)?;
        let params = self.comma_separated(TokenKind::RParen, "parameters", |p| {
            let param = p.expect_ident()?;
            if p.eat(TokenKind::Colon) {
                p.parse_type_tag();
            }
            Some(param)
        });

        let return_type = if self.eat(TokenKind::Colon) || self.cursor.at(TokenKind::Ident) {
            self.parse_type_tag()
        } else {
            None
        };

        let body = self.parse_block()?;
        Some(Arc::new(FuncDecl {
            name,
            params,
            return_type,
            body,
            span: self.span_from(start),
        }))
    }

    fn parse_return(&mut self) -> StmtKind {
        self.cursor.advance();
        let ends_here = matches!(
            self.cursor.kind(),
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        );
        if ends_here {
            StmtKind::Return(None)
        } else {
            StmtKind::Return(Some(self.parse_expression(Precedence::Lowest)))
        }
    }

    /// `if cond { } [elif cond { } | else if cond { } | else { }]`
    ///
    /// Also entered at `elif`, which is the head of a nested `if`.
    fn parse_if(&mut self) -> Option<IfStmt> {
        self.cursor.advance();
        let condition = self.parse_expression(Precedence::Lowest);
        let consequence = self.parse_block()?;
        let alternative = self.parse_else();
        Some(IfStmt {
            condition,
            consequence,
            alternative,
        })
    }

    fn parse_else(&mut self) -> Option<Block> {
        self.skip_newline_before(&[TokenKind::Else, TokenKind::Elif]);
        let start = self.cursor.span();
        match self.cursor.kind() {
            TokenKind::Elif => self.else_if(start),
            TokenKind::Else => {
                self.cursor.advance();
                if self.cursor.at(TokenKind::If) {
                    self.else_if(start)
                } else {
                    self.parse_block()
                }
            }
            _ => None,
        }
    }

    /// The alternative of an else-if chain: a block holding the nested `if`.
    fn else_if(&mut self, start: Span) -> Option<Block> {
        let nested = self.nested(Self::parse_if)??;
        let span = self.span_from(start);
        let stmt = Stmt::new(StmtKind::If(nested), span);
        Some(Block::new(vec![stmt], span))
    }

    fn parse_while(&mut self) -> Option<StmtKind> {
        self.cursor.advance();
        let condition = self.parse_expression(Precedence::Lowest);
        let body = self.parse_block()?;
        Some(StmtKind::While(WhileStmt { condition, body }))
    }

    /// `for NAME in iterable { body }`
    fn parse_for(&mut self) -> Option<StmtKind> {
        self.cursor.advance();
        let var = self.expect_ident()?;
        self.expect(TokenKind::In)?;
        let iterable = self.parse_expression(Precedence::Lowest);
        let body = self.parse_block()?;
        Some(StmtKind::ForIn(ForInStmt {
            var,
            iterable,
            body,
        }))
    }

    /// `try { } [catch [(] [NAME] [)] { }] [finally { }]`
    fn parse_try(&mut self) -> Option<StmtKind> {
        self.cursor.advance();
        let body = self.parse_block()?;

        self.skip_newline_before(&[TokenKind::Catch, TokenKind::Finally]);
        let catch = if self.eat(TokenKind::Catch) {
            let param = if self.eat(TokenKind::LParen) {
                let param = self
                    .cursor
                    .at(TokenKind::Ident)
                    .then(|| self.expect_ident())
                    .flatten();
                self.expect(TokenKind::RParen);
                param
            } else if self.cursor.at(TokenKind::Ident) {
                self.expect_ident()
            } else {
                None
            };
            self.parse_block()
                .map(|body| CatchClause { param, body })
        } else {
            None
        };

        self.skip_newline_before(&[TokenKind::Finally]);
        let finally = if self.eat(TokenKind::Finally) {
            self.parse_block()
        } else {
            None
        };

        Some(StmtKind::Try(TryStmt {
            body,
            catch,
            finally,
        }))
    }

    /// `class NAME { (var ... | func ...)* }`
    fn parse_class(&mut self) -> Option<Arc<ClassDecl>> {
        let start = self.cursor.advance().span;
        let name = self.expect_ident()?;
        self.cursor.skip_newlines();
        self.expect(TokenKind::LBrace)?;

        let mut attributes = Vec::new();
        let mut methods: Vec<Arc<FuncDecl>> = Vec::new();
        let mut iterations = 0usize;
        loop {
            self.skip_separators();
            if self.cursor.at(TokenKind::RBrace)
                || self.cursor.at(TokenKind::Eof)
                || self.deadline_exceeded("class body")
            {
                break;
            }
            iterations += 1;
            if iterations > self.options.max_block_statements {
                self.halt_with(ErrorCode::E1004, "too many iterations in class body");
                break;
            }

            match self.cursor.kind() {
                TokenKind::Var | TokenKind::Const => {
                    if let Some(attr) = self.parse_var() {
                        attributes.push(attr);
                    }
                }
                TokenKind::Func => {
                    if let Some(method) = self.nested(Self::parse_func).flatten() {
                        methods.push(method);
                    }
                }
                other => {
                    let span = self.cursor.span();
                    self.error(Diagnostic::new(
                        ErrorCode::E1001,
                        format!("unexpected {} in class body", other.describe()),
                        span,
                    ));
                    self.cursor.advance();
                }
            }
            self.eat(TokenKind::Semicolon);
        }
        self.expect(TokenKind::RBrace);

        let init = methods.iter().find(|m| m.name.name == "init").cloned();
        Some(Arc::new(ClassDecl {
            name,
            attributes,
            methods,
            init,
            span: self.span_from(start),
        }))
    }
}
