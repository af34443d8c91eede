//! Token cursor over a pulled token stream.
//!
//! Holds two tokens (current and peek) and pulls the next one from the
//! [`TokenSource`] on every advance. Runs of `Newline` tokens are collapsed
//! to one, so a single token of lookahead can see past a line break.
//!
//! Once halted the cursor yields `Eof` forever. The parser halts it when a
//! ceiling or the deadline is hit, which unwinds every loop with whatever
//! tree has been built so far.

use std::time::Instant;

use tracing::trace;
use zylo_ir::{Span, Token, TokenKind, TokenSource};

pub(crate) struct Cursor<S> {
    source: S,
    current: Token,
    peek: Token,
    prev_span: Span,
    /// Tokens consumed so far; compared before/after to detect progress.
    consumed: u64,
    deadline: Option<Instant>,
    halted: bool,
    expired: bool,
}

impl<S: TokenSource> Cursor<S> {
    pub(crate) fn new(mut source: S, deadline: Option<Instant>) -> Self {
        let current = source.next_token();
        let peek = source.next_token();
        let mut cursor = Cursor {
            source,
            prev_span: Span::point(current.span.start_line, current.span.start_col),
            current,
            peek,
            consumed: 0,
            deadline,
            halted: false,
            expired: false,
        };
        cursor.collapse_newlines();
        cursor
    }

    #[inline]
    pub(crate) fn kind(&self) -> TokenKind {
        self.current.kind
    }

    #[inline]
    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek.kind
    }

    #[inline]
    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    #[inline]
    pub(crate) fn span(&self) -> Span {
        self.current.span
    }

    /// Span of the most recently consumed token.
    #[inline]
    pub(crate) fn prev_span(&self) -> Span {
        self.prev_span
    }

    #[inline]
    pub(crate) fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Consume the current token and return it.
    pub(crate) fn advance(&mut self) -> Token {
        let next = self.pull();
        let peek = std::mem::replace(&mut self.peek, next);
        let token = std::mem::replace(&mut self.current, peek);
        trace!(kind = ?token.kind, "advance");
        self.prev_span = token.span;
        self.consumed += 1;
        self.collapse_newlines();
        token
    }

    pub(crate) fn skip_newlines(&mut self) {
        while self.at(TokenKind::Newline) {
            self.advance();
        }
    }

    /// Stop reading the source; from now on only `Eof` is produced.
    pub(crate) fn halt(&mut self) {
        self.halted = true;
        let span = self.current.span;
        self.current = Token::eof(span);
        self.peek = Token::eof(span);
    }

    #[inline]
    pub(crate) fn is_halted(&self) -> bool {
        self.halted
    }

    /// Whether the wall-clock deadline has passed (sticky once true).
    pub(crate) fn deadline_passed(&mut self) -> bool {
        if !self.expired {
            self.expired = self.deadline.is_some_and(|d| Instant::now() >= d);
        }
        self.expired
    }

    fn pull(&mut self) -> Token {
        if self.halted {
            return Token::eof(self.current.span);
        }
        self.source.next_token()
    }

    fn collapse_newlines(&mut self) {
        while self.current.is(TokenKind::Newline) && self.peek.is(TokenKind::Newline) {
            // An endless run of newlines must still respect the deadline.
            if self.deadline_passed() {
                self.halt();
                return;
            }
            self.peek = self.pull();
        }
    }
}
