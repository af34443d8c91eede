//! Command handlers for the `zylo` binary.
//!
//! Handlers take source text rather than paths wherever they can, so the
//! same code drives both the CLI and the integration tests. Shared helpers
//! (`read_file`, diagnostic rendering) live here in the module root.

mod debug;
mod run;

use std::io;

use thiserror::Error;
use zylo_eval::EvalError;
use zylo_parse::ParseOutput;

pub use debug::{lex_file, parse_file, render_tokens};
pub use run::{run_file, run_source};

/// Why a command failed. Each variant has already been reported or is
/// reported by its `Display`.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("cannot find file '{path}'")]
    NotFound { path: String },
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },
    #[error("'{path}' contains invalid UTF-8 data")]
    InvalidUtf8 { path: String },
    #[error("error reading '{path}': {source}")]
    Io { path: String, source: io::Error },
    #[error("{count} syntax error(s) in '{path}'")]
    Syntax { path: String, count: usize },
    #[error("error: {0}")]
    Runtime(#[from] EvalError),
}

impl CommandError {
    /// Syntax errors are printed as diagnostics before this is returned.
    pub fn is_reported(&self) -> bool {
        matches!(self, CommandError::Syntax { .. })
    }
}

pub(crate) fn read_file(path: &str) -> Result<String, CommandError> {
    std::fs::read_to_string(path).map_err(|err| {
        let path = path.to_string();
        match err.kind() {
            io::ErrorKind::NotFound => CommandError::NotFound { path },
            io::ErrorKind::PermissionDenied => CommandError::PermissionDenied { path },
            io::ErrorKind::InvalidData => CommandError::InvalidUtf8 { path },
            _ => CommandError::Io { path, source: err },
        }
    })
}

/// `file:line:col: message`, one entry per diagnostic.
pub fn render_diagnostics(path: &str, output: &ParseOutput) -> Vec<String> {
    output
        .diagnostics
        .iter()
        .map(|diag| format!("{path}:{diag}"))
        .collect()
}

/// Print diagnostics to stderr and turn them into an error.
pub(crate) fn report_syntax_errors(path: &str, output: &ParseOutput) -> Result<(), CommandError> {
    if !output.has_errors() {
        return Ok(());
    }
    for line in render_diagnostics(path, output) {
        eprintln!("{line}");
    }
    Err(CommandError::Syntax {
        path: path.to_string(),
        count: output.diagnostics.len(),
    })
}
