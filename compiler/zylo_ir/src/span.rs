//! Source location spans.
//!
//! Zylo diagnostics are reported by line and column, so spans carry both
//! endpoints in that form instead of byte offsets.

use std::fmt;

/// Source location span.
///
/// Lines and columns are 1-based; columns count characters, not bytes.
/// The end position is exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    /// Span for synthesized nodes with no source location.
    pub const DUMMY: Span = Span {
        start_line: 0,
        start_col: 0,
        end_line: 0,
        end_col: 0,
    };

    #[inline]
    pub const fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Span {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Zero-width span at a single position.
    #[inline]
    pub const fn point(line: u32, col: u32) -> Self {
        Span::new(line, col, line, col)
    }

    #[inline]
    pub fn is_dummy(&self) -> bool {
        *self == Span::DUMMY
    }

    /// Span from the start of `self` to the end of `other`.
    ///
    /// A dummy side is ignored so synthesized nodes don't drag a
    /// merged span back to `0:0`.
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        if self.is_dummy() {
            return other;
        }
        if other.is_dummy() {
            return self;
        }
        let (start_line, start_col) =
            (self.start_line, self.start_col).min((other.start_line, other.start_col));
        let (end_line, end_col) = (self.end_line, self.end_col).max((other.end_line, other.end_col));
        Span::new(start_line, start_col, end_line, end_col)
    }

    /// Start position as a comparable `(line, col)` pair.
    #[inline]
    pub fn start(&self) -> (u32, u32) {
        (self.start_line, self.start_col)
    }

    /// End position as a comparable `(line, col)` pair.
    #[inline]
    pub fn end(&self) -> (u32, u32) {
        (self.end_line, self.end_col)
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}..{}:{}",
            self.start_line, self.start_col, self.end_line, self.end_col
        )
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

#[cfg(test)]
mod tests;
