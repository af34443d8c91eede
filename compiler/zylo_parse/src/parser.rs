//! Parser state and the recovery machinery shared by the grammar rules.

use std::time::Instant;

use tracing::{debug, warn};
use zylo_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use zylo_ir::{Ident, Program, Span, Token, TokenKind, TokenSource};

use crate::cursor::Cursor;
use crate::{ParseOptions, ParseOutput};

pub(crate) struct Parser<'o, S> {
    pub(crate) cursor: Cursor<S>,
    pub(crate) options: &'o ParseOptions,
    diagnostics: DiagnosticQueue,
    depth: usize,
    /// A terminal diagnostic has been recorded; later halts stay silent.
    halt_reported: bool,
}

impl<'o, S: TokenSource> Parser<'o, S> {
    pub(crate) fn new(source: S, options: &'o ParseOptions) -> Self {
        let deadline = Instant::now().checked_add(options.deadline);
        Parser {
            cursor: Cursor::new(source, deadline),
            options,
            diagnostics: DiagnosticQueue::with_config(options.diagnostics.clone()),
            depth: 0,
            halt_reported: false,
        }
    }

    pub(crate) fn parse_program(mut self) -> ParseOutput {
        debug!("parse start");
        let mut statements = Vec::new();
        let mut iterations = 0usize;

        loop {
            self.skip_separators();
            if self.cursor.at(TokenKind::Eof) || self.deadline_exceeded("program") {
                break;
            }
            iterations += 1;
            if iterations > self.options.max_statements {
                self.halt_with(ErrorCode::E1004, "too many iterations in program");
                break;
            }

            let before = self.cursor.consumed();
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.ensure_progress(before);
        }

        // The cursor halts on its own when the deadline passes mid-newline-run.
        if self.cursor.is_halted() {
            self.deadline_exceeded("program");
        }

        let program = Program::new(statements);
        let diagnostics = self.diagnostics.into_vec();
        debug!(
            statements = program.statements.len(),
            diagnostics = diagnostics.len(),
            "parse end"
        );
        ParseOutput {
            program,
            diagnostics,
        }
    }

    // Diagnostics

    /// Record a recoverable error. Ignored once the parse has halted.
    pub(crate) fn error(&mut self, diag: Diagnostic) {
        if self.cursor.is_halted() {
            return;
        }
        self.diagnostics.push(diag);
        if self.diagnostics.limit_reached() {
            warn!(limit = self.options.diagnostics.error_limit, "diagnostic limit reached");
            self.cursor.halt();
        }
    }

    /// Record `expected X, got <current>` at the current token.
    pub(crate) fn error_expected(&mut self, expected: &str) {
        let found = self.cursor.kind().describe();
        let span = self.cursor.span();
        self.error(Diagnostic::expected(expected, found, span));
    }

    /// Stop parsing with one terminal diagnostic.
    pub(crate) fn halt_with(&mut self, code: ErrorCode, message: impl Into<String>) {
        if !self.halt_reported {
            self.halt_reported = true;
            let message = message.into();
            warn!(%code, %message, "parse halted");
            self.diagnostics
                .push(Diagnostic::new(code, message, self.cursor.span()));
        }
        self.cursor.halt();
    }

    /// Check the wall-clock deadline, halting if it has passed.
    ///
    /// Also true once the parse has halted for any other reason.
    pub(crate) fn deadline_exceeded(&mut self, context: &str) -> bool {
        if self.cursor.deadline_passed() {
            let ms = self.options.deadline.as_millis();
            self.halt_with(
                ErrorCode::E1005,
                format!("timeout: parsing {context} exceeded {ms}ms"),
            );
            return true;
        }
        self.cursor.is_halted()
    }

    // Token helpers

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.cursor.at(kind) {
            self.cursor.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.cursor.at(kind) {
            Some(self.cursor.advance())
        } else {
            self.error_expected(kind.describe());
            None
        }
    }

    pub(crate) fn expect_ident(&mut self) -> Option<Ident> {
        let token = self.expect(TokenKind::Ident)?;
        Some(Ident::new(token.lexeme, token.span))
    }

    /// Newlines and stray semicolons between statements.
    pub(crate) fn skip_separators(&mut self) {
        while self.cursor.at(TokenKind::Newline) || self.cursor.at(TokenKind::Semicolon) {
            self.cursor.advance();
        }
    }

    /// Step over a single line break when the token after it is one of
    /// `continuations` (`}\nelse {`, `}\ncatch {`).
    pub(crate) fn skip_newline_before(&mut self, continuations: &[TokenKind]) {
        if self.cursor.at(TokenKind::Newline) && continuations.contains(&self.cursor.peek_kind()) {
            self.cursor.advance();
        }
    }

    /// Consume one token if nothing was consumed since `before`.
    pub(crate) fn ensure_progress(&mut self, before: u64) {
        if self.cursor.consumed() == before && !self.cursor.at(TokenKind::Eof) {
            self.cursor.advance();
        }
    }

    /// Span from `start` through the last consumed token.
    pub(crate) fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.prev_span())
    }

    /// Run `f` one nesting level deeper.
    ///
    /// Returns `None` (after halting) once `max_depth` is exceeded.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> Option<T> {
        if self.depth >= self.options.max_depth {
            let max = self.options.max_depth;
            self.halt_with(ErrorCode::E1004, format!("nesting deeper than {max} levels"));
            return None;
        }
        self.depth += 1;
        let result = zylo_stack::ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        Some(result)
    }
}
