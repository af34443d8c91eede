//! The diagnostic record.

use std::fmt;

use zylo_ir::Span;

use crate::ErrorCode;

/// A single front-end error.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            code,
            message: message.into(),
            span,
        }
    }

    /// `expected X, got Y`
    pub fn expected(expected: impl fmt::Display, found: impl fmt::Display, span: Span) -> Self {
        Diagnostic::new(
            ErrorCode::E1001,
            format!("expected {expected}, got {found}"),
            span,
        )
    }
}

/// Renders as `line:col: message`.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span, self.message)
    }
}
