//! Error codes for front-end diagnostics.

use std::fmt;

/// Error codes, `E1xxx` for parser diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Invalid token from the lexer
    E1003,
    /// Iteration ceiling reached
    E1004,
    /// Parse deadline exceeded
    E1005,
    /// `elif` without a preceding `if`
    E1006,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
        }
    }

    /// Whether this code ends the pass early.
    pub fn is_terminal(self) -> bool {
        matches!(self, ErrorCode::E1004 | ErrorCode::E1005)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
