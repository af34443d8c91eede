//! Grammar rules, as `impl Parser` blocks split by syntactic category.

mod expr;
pub(crate) mod precedence;
mod stmt;
