//! The `run` command: parse and evaluate a Zylo source file.

use tracing::debug;
use zylo_eval::{stdout_handler, Interpreter, SharedPrintHandler, Value};

use super::{read_file, report_syntax_errors, CommandError};

/// Run a Zylo source file with console input and output.
pub fn run_file(path: &str) -> Result<(), CommandError> {
    let source = read_file(path)?;
    run_source(path, &source, stdout_handler()).map(|_| ())
}

/// Parse and evaluate `source`, printing through `output`.
///
/// Nothing is evaluated when the parser reports errors.
pub fn run_source(
    path: &str,
    source: &str,
    output: SharedPrintHandler,
) -> Result<Value, CommandError> {
    let parsed = zylo_parse::parse_source(source);
    report_syntax_errors(path, &parsed)?;
    debug!(path, statements = parsed.program.statements.len(), "parsed");

    let mut interpreter = Interpreter::builder().print_handler(output).build();
    Ok(interpreter.run(&parsed.program)?)
}
