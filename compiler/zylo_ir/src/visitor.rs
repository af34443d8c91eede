//! Read-only AST traversal.
//!
//! Override `visit_*` methods to act at specific nodes and call the matching
//! `walk_*` function to continue into children. The tree is never mutated.
//!
//! ```text
//! struct CountCalls { count: usize }
//!
//! impl<'ast> Visitor<'ast> for CountCalls {
//!     fn visit_expr(&mut self, expr: &'ast Expr) {
//!         if matches!(expr.kind, ExprKind::Call { .. }) {
//!             self.count += 1;
//!         }
//!         walk_expr(self, expr);
//!     }
//! }
//! ```

use crate::ast::{Block, ClassDecl, Expr, ExprKind, FuncDecl, Program, Stmt, StmtKind, VarStmt};

pub trait Visitor<'ast> {
    fn visit_program(&mut self, program: &'ast Program) {
        walk_program(self, program);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }

    fn visit_var(&mut self, var: &'ast VarStmt) {
        if let Some(value) = &var.value {
            self.visit_expr(value);
        }
    }

    fn visit_func(&mut self, func: &'ast FuncDecl) {
        self.visit_block(&func.body);
    }

    fn visit_class(&mut self, class: &'ast ClassDecl) {
        walk_class(self, class);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_program<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, program: &'ast Program) {
    for stmt in &program.statements {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, block: &'ast Block) {
    for stmt in &block.statements {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_class<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, class: &'ast ClassDecl) {
    for attr in &class.attributes {
        visitor.visit_var(attr);
    }
    for method in &class.methods {
        visitor.visit_func(method);
    }
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, stmt: &'ast Stmt) {
    match &stmt.kind {
        StmtKind::Var(var) => visitor.visit_var(var),
        StmtKind::Func(func) => visitor.visit_func(func),
        StmtKind::Return(value) => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        StmtKind::If(if_stmt) => {
            visitor.visit_expr(&if_stmt.condition);
            visitor.visit_block(&if_stmt.consequence);
            if let Some(alt) = &if_stmt.alternative {
                visitor.visit_block(alt);
            }
        }
        StmtKind::While(while_stmt) => {
            visitor.visit_expr(&while_stmt.condition);
            visitor.visit_block(&while_stmt.body);
        }
        StmtKind::ForIn(for_stmt) => {
            visitor.visit_expr(&for_stmt.iterable);
            visitor.visit_block(&for_stmt.body);
        }
        StmtKind::Try(try_stmt) => {
            visitor.visit_block(&try_stmt.body);
            if let Some(catch) = &try_stmt.catch {
                visitor.visit_block(&catch.body);
            }
            if let Some(finally) = &try_stmt.finally {
                visitor.visit_block(finally);
            }
        }
        StmtKind::Throw(value) | StmtKind::Expr(value) => visitor.visit_expr(value),
        StmtKind::Class(class) => visitor.visit_class(class),
        StmtKind::Block(block) => visitor.visit_block(block),
        StmtKind::Break | StmtKind::Continue | StmtKind::Import(_) => {}
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    match &expr.kind {
        ExprKind::Prefix { operand, .. } => visitor.visit_expr(operand),
        ExprKind::Infix { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        ExprKind::Call { callee, args } => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Index { collection, index } => {
            visitor.visit_expr(collection);
            visitor.visit_expr(index);
        }
        ExprKind::Member { object, .. } => visitor.visit_expr(object),
        ExprKind::List(items) => {
            for item in items {
                visitor.visit_expr(item);
            }
        }
        ExprKind::Hash(pairs) => {
            for (key, value) in pairs {
                visitor.visit_expr(key);
                visitor.visit_expr(value);
            }
        }
        ExprKind::Ident(_)
        | ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::Str(_)
        | ExprKind::Bool(_)
        | ExprKind::Null
        | ExprKind::This
        | ExprKind::Error => {}
    }
}

#[cfg(test)]
mod tests;
