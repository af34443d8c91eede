//! Tokenizer for Zylo source text.
//!
//! [`Lexer`] streams tokens through the [`TokenSource`] pull interface the
//! parser consumes; [`lex`] collects them eagerly into a [`TokenList`].
//!
//! The lexer never fails: malformed input becomes [`TokenKind::Error`]
//! tokens and the parser reports them.
//!
//! [`TokenSource`]: zylo_ir::TokenSource
//! [`TokenList`]: zylo_ir::TokenList
//! [`TokenKind::Error`]: zylo_ir::TokenKind::Error

mod escape;
mod lexer;
mod line_index;

pub use lexer::{lex, Lexer};
pub use line_index::LineIndex;
