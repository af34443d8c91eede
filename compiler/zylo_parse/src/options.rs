//! Parser limits.

use std::time::Duration;

use zylo_diagnostic::DiagnosticConfig;

/// Termination guards for the parser.
///
/// Every ceiling, when hit, ends the parse with a terminal diagnostic and
/// returns the partial tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseOptions {
    /// Wall-clock budget for one parse.
    pub deadline: Duration,
    /// Top-level statements per program.
    pub max_statements: usize,
    /// Statements (or class members) per block.
    pub max_block_statements: usize,
    /// Infix operator steps per expression.
    pub max_infix_steps: usize,
    /// Nesting of expressions and blocks.
    pub max_depth: usize,
    pub diagnostics: DiagnosticConfig,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            deadline: Duration::from_secs(30),
            max_statements: 1000,
            max_block_statements: 100,
            max_infix_steps: 50,
            max_depth: 512,
            diagnostics: DiagnosticConfig::default(),
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    #[must_use]
    pub fn with_max_statements(mut self, max: usize) -> Self {
        self.max_statements = max;
        self
    }

    #[must_use]
    pub fn with_max_block_statements(mut self, max: usize) -> Self {
        self.max_block_statements = max;
        self
    }

    #[must_use]
    pub fn with_max_infix_steps(mut self, max: usize) -> Self {
        self.max_infix_steps = max;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max: usize) -> Self {
        self.max_depth = max;
        self
    }

    #[must_use]
    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.diagnostics.error_limit = limit;
        self
    }
}
