//! Shared intermediate representation for Zylo.
//!
//! - [`Span`]: line/column source locations
//! - [`Token`], [`TokenKind`], [`TokenSource`]: the token stream contract
//!   between the lexer and the parser
//! - [`ast`]: the statement/expression tree produced by the parser
//! - [`visitor`]: read-only traversal for passes that consume the tree

pub mod ast;
mod span;
mod token;
pub mod visitor;

pub use ast::{
    BinaryOp, Block, CatchClause, ClassDecl, Expr, ExprKind, ForInStmt, FuncDecl, Ident, IfStmt,
    Program, Stmt, StmtKind, TryStmt, UnaryOp, VarStmt, WhileStmt,
};
pub use span::Span;
pub use token::{Literal, Token, TokenCursor, TokenKind, TokenList, TokenSource};
pub use visitor::Visitor;
