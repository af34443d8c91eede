//! Debug commands: `parse` and `lex` for inspecting the front end.

use zylo_ir::TokenKind;

use super::{read_file, report_syntax_errors, CommandError};

/// Parse a file and print its AST.
pub fn parse_file(path: &str) -> Result<(), CommandError> {
    let source = read_file(path)?;
    let parsed = zylo_parse::parse_source(&source);
    report_syntax_errors(path, &parsed)?;
    if !parsed.program.statements.is_empty() {
        println!("{}", parsed.program);
    }
    Ok(())
}

/// Lex a file and print one token per line.
pub fn lex_file(path: &str) -> Result<(), CommandError> {
    let source = read_file(path)?;
    for line in render_tokens(&source) {
        println!("{line}");
    }
    Ok(())
}

/// `line:col KIND 'lexeme'` for every token up to and including `Eof`.
pub fn render_tokens(source: &str) -> Vec<String> {
    zylo_lexer::lex(source)
        .iter()
        .map(|token| match token.kind {
            TokenKind::Newline => format!("{} {:?}", token.span, token.kind),
            _ => format!("{} {:?} '{}'", token.span, token.kind, token.lexeme),
        })
        .collect()
}
