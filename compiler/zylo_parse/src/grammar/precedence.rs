//! Binding power of infix operators.

use zylo_ir::{BinaryOp, TokenKind};

/// Operator precedence, lowest to highest.
///
/// Logical operators bind looser than equality and comparison, so
/// `a || b == c` is `a || (b == c)` and `a && b < c` is `a && (b < c)`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub(crate) enum Precedence {
    Lowest,
    /// `=` (right associative)
    Assign,
    /// `||`, `or`
    Or,
    /// `&&`, `and`
    And,
    /// `==`, `!=`
    Equality,
    /// `<`, `<=`, `>`, `>=`
    Comparison,
    /// `+`, `-`
    Sum,
    /// `*`, `/`, `%`
    Product,
    /// unary `-`, `!`, `+`
    Prefix,
    /// call `(`, member `.`, index `[`
    Postfix,
}

impl Precedence {
    /// Precedence of `kind` in infix position; `Lowest` if it isn't an
    /// infix operator.
    pub(crate) fn of_infix(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::Eq => Precedence::Assign,
            TokenKind::Or => Precedence::Or,
            TokenKind::And => Precedence::And,
            TokenKind::EqEq | TokenKind::BangEq => Precedence::Equality,
            TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq => {
                Precedence::Comparison
            }
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Precedence::Product,
            TokenKind::LParen | TokenKind::Dot | TokenKind::LBracket => Precedence::Postfix,
            _ => Precedence::Lowest,
        }
    }
}

/// Binary operator for an infix token.
pub(crate) fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Eq => BinaryOp::Assign,
        TokenKind::Or => BinaryOp::Or,
        TokenKind::And => BinaryOp::And,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::BangEq => BinaryOp::NotEq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        _ => return None,
    };
    Some(op)
}
