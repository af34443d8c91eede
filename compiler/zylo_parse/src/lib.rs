//! Parser for the Zylo scripting language.
//!
//! Recursive descent for statements, Pratt parsing for expressions. The
//! parser pulls tokens from any [`TokenSource`] and always produces a
//! [`Program`]; malformed input is reported through
//! [`ParseOutput::diagnostics`], never through a panic or `Err`.
//!
//! Termination is guaranteed for any token stream, including endless or
//! cyclic ones: a wall-clock deadline, per-loop iteration ceilings, a
//! nesting limit and the diagnostic cap each end the parse early with the
//! partial tree built so far. See [`ParseOptions`].

mod cursor;
mod grammar;
mod options;
mod parser;

use zylo_diagnostic::Diagnostic;
use zylo_ir::{Program, TokenSource};

pub use options::ParseOptions;

/// Result of parsing: the (possibly partial) program and its diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseOutput {
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Diagnostic messages in the order they were reported.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.message.clone()).collect()
    }
}

/// Parse a token stream with default options.
pub fn parse(tokens: impl TokenSource) -> ParseOutput {
    parse_with(tokens, &ParseOptions::default())
}

/// Parse a token stream with explicit limits.
pub fn parse_with(tokens: impl TokenSource, options: &ParseOptions) -> ParseOutput {
    parser::Parser::new(tokens, options).parse_program()
}

/// Lex and parse source text.
pub fn parse_source(source: &str) -> ParseOutput {
    parse(zylo_lexer::Lexer::new(source))
}

#[cfg(test)]
mod tests;
