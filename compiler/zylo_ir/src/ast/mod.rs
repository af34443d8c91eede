//! Abstract syntax tree for Zylo programs.
//!
//! The node set is closed: statements are [`StmtKind`] variants and
//! expressions are [`ExprKind`] variants, so every consumer matches
//! exhaustively. Every node carries the span of the token that started it.
//!
//! Function and class declarations are behind `Arc` so the evaluator can
//! capture them in runtime values without cloning bodies.
//!
//! `Display` renders a fully parenthesized, single-line form of each node,
//! which is what parser tests compare against.

mod operators;

use std::fmt;
use std::sync::Arc;

use crate::Span;

pub use operators::{BinaryOp, UnaryOp};

/// Root of a parsed source file.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Program { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// A name together with where it was written.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Ident {
            name: name.into(),
            span,
        }
    }
}

/// A braced statement list.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(statements: Vec<Stmt>, span: Span) -> Self {
        Block { statements, span }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum StmtKind {
    Var(VarStmt),
    Func(Arc<FuncDecl>),
    Return(Option<Expr>),
    If(IfStmt),
    While(WhileStmt),
    ForIn(ForInStmt),
    Try(TryStmt),
    Throw(Expr),
    Break,
    Continue,
    Class(Arc<ClassDecl>),
    Block(Block),
    Expr(Expr),
    Import(Ident),
}

/// `var name [= value]`
#[derive(Clone, PartialEq, Debug)]
pub struct VarStmt {
    pub name: Ident,
    pub value: Option<Expr>,
}

/// `func name(params) [: Type] { body }`
#[derive(Clone, PartialEq, Debug)]
pub struct FuncDecl {
    pub name: Ident,
    pub params: Vec<Ident>,
    /// Annotation only; never checked.
    pub return_type: Option<String>,
    pub body: Block,
    pub span: Span,
}

/// `if cond { } [else { }]`
///
/// `elif` and `else if` chains are an `alternative` block holding a single
/// nested `If` statement.
#[derive(Clone, PartialEq, Debug)]
pub struct IfStmt {
    pub condition: Expr,
    pub consequence: Block,
    pub alternative: Option<Block>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Block,
}

/// `for var in iterable { body }`
#[derive(Clone, PartialEq, Debug)]
pub struct ForInStmt {
    pub var: Ident,
    pub iterable: Expr,
    pub body: Block,
}

#[derive(Clone, PartialEq, Debug)]
pub struct TryStmt {
    pub body: Block,
    pub catch: Option<CatchClause>,
    pub finally: Option<Block>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct CatchClause {
    pub param: Option<Ident>,
    pub body: Block,
}

/// `class Name { var ... func ... }`
#[derive(Clone, PartialEq, Debug)]
pub struct ClassDecl {
    pub name: Ident,
    pub attributes: Vec<VarStmt>,
    pub methods: Vec<Arc<FuncDecl>>,
    /// The method named `init`, if any (also present in `methods`).
    pub init: Option<Arc<FuncDecl>>,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Placeholder for a sub-expression the parser could not build.
    pub fn error(span: Span) -> Self {
        Expr::new(ExprKind::Error, span)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, ExprKind::Error)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
    This,
    Prefix {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// Binary operation; `op == Assign` is assignment to `left`.
    Infix {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Index {
        collection: Box<Expr>,
        index: Box<Expr>,
    },
    Member {
        object: Box<Expr>,
        property: Ident,
    },
    List(Vec<Expr>),
    /// Key/value pairs in source order.
    Hash(Vec<(Expr, Expr)>),
    /// Malformed input; evaluates to nothing.
    Error,
}

// Display

struct Joined<'a, T>(&'a [T], &'a str);

impl<T: fmt::Display> fmt::Display for Joined<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(self.1)?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Joined(&self.statements, "\n"))
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{ }");
        }
        write!(f, "{{ {} }}", Joined(&self.statements, " "))
    }
}

impl fmt::Display for VarStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "var {} = {value};", self.name),
            None => write!(f, "var {};", self.name),
        }
    }
}

impl fmt::Display for FuncDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "func {}({})", self.name, Joined(&self.params, ", "))?;
        if let Some(ty) = &self.return_type {
            write!(f, ": {ty}")?;
        }
        write!(f, " {}", self.body)
    }
}

impl fmt::Display for ClassDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {} {{", self.name)?;
        for attr in &self.attributes {
            write!(f, " {attr}")?;
        }
        for method in &self.methods {
            write!(f, " {method}")?;
        }
        f.write_str(" }")
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Var(var) => write!(f, "{var}"),
            StmtKind::Func(func) => write!(f, "{func}"),
            StmtKind::Return(Some(value)) => write!(f, "return {value};"),
            StmtKind::Return(None) => f.write_str("return;"),
            StmtKind::If(stmt) => {
                write!(f, "if {} {}", stmt.condition, stmt.consequence)?;
                if let Some(alt) = &stmt.alternative {
                    write!(f, " else {alt}")?;
                }
                Ok(())
            }
            StmtKind::While(stmt) => write!(f, "while {} {}", stmt.condition, stmt.body),
            StmtKind::ForIn(stmt) => {
                write!(f, "for {} in {} {}", stmt.var, stmt.iterable, stmt.body)
            }
            StmtKind::Try(stmt) => {
                write!(f, "try {}", stmt.body)?;
                if let Some(catch) = &stmt.catch {
                    match &catch.param {
                        Some(param) => write!(f, " catch ({param}) {}", catch.body)?,
                        None => write!(f, " catch {}", catch.body)?,
                    }
                }
                if let Some(finally) = &stmt.finally {
                    write!(f, " finally {finally}")?;
                }
                Ok(())
            }
            StmtKind::Throw(value) => write!(f, "throw {value};"),
            StmtKind::Break => f.write_str("break;"),
            StmtKind::Continue => f.write_str("continue;"),
            StmtKind::Class(class) => write!(f, "{class}"),
            StmtKind::Block(block) => write!(f, "{block}"),
            StmtKind::Expr(expr) => write!(f, "{expr};"),
            StmtKind::Import(module) => write!(f, "import {module}"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Ident(name) => f.write_str(name),
            ExprKind::Int(n) => write!(f, "{n}"),
            ExprKind::Float(x) => write!(f, "{x:?}"),
            ExprKind::Str(s) => write!(f, "\"{}\"", s.escape_debug()),
            ExprKind::Bool(b) => write!(f, "{b}"),
            ExprKind::Null => f.write_str("nil"),
            ExprKind::This => f.write_str("this"),
            ExprKind::Prefix { op, operand } => write!(f, "({op}{operand})"),
            ExprKind::Infix { op, left, right } => write!(f, "({left} {op} {right})"),
            ExprKind::Call { callee, args } => write!(f, "{callee}({})", Joined(args, ", ")),
            ExprKind::Index { collection, index } => write!(f, "({collection}[{index}])"),
            ExprKind::Member { object, property } => write!(f, "{object}.{property}"),
            ExprKind::List(items) => write!(f, "[{}]", Joined(items, ", ")),
            ExprKind::Hash(pairs) => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            ExprKind::Error => f.write_str("<error>"),
        }
    }
}

#[cfg(test)]
mod tests;
