use std::sync::Arc;

use super::*;
use crate::ast::{BinaryOp, Ident, IfStmt};
use crate::Span;

/// Collects identifier names in visit order.
#[derive(Default)]
struct Names(Vec<String>);

impl<'ast> Visitor<'ast> for Names {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        if let ExprKind::Ident(name) = &expr.kind {
            self.0.push(name.clone());
        }
        walk_expr(self, expr);
    }
}

fn ident(name: &str) -> Expr {
    Expr::new(ExprKind::Ident(name.to_string()), Span::DUMMY)
}

fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::new(StmtKind::Expr(expr), Span::DUMMY)
}

#[test]
fn test_walks_nested_statements_in_order() {
    let cond = Expr::new(
        ExprKind::Infix {
            op: BinaryOp::Lt,
            left: Box::new(ident("a")),
            right: Box::new(ident("b")),
        },
        Span::DUMMY,
    );
    let func = FuncDecl {
        name: Ident::new("f", Span::DUMMY),
        params: vec![],
        return_type: None,
        body: Block::new(vec![expr_stmt(ident("c"))], Span::DUMMY),
        span: Span::DUMMY,
    };
    let program = Program::new(vec![
        Stmt::new(
            StmtKind::If(IfStmt {
                condition: cond,
                consequence: Block::new(vec![expr_stmt(ident("d"))], Span::DUMMY),
                alternative: Some(Block::new(vec![expr_stmt(ident("e"))], Span::DUMMY)),
            }),
            Span::DUMMY,
        ),
        Stmt::new(StmtKind::Func(Arc::new(func)), Span::DUMMY),
    ]);

    let mut names = Names::default();
    names.visit_program(&program);
    assert_eq!(names.0, vec!["a", "b", "d", "e", "c"]);
}

#[test]
fn test_walks_class_members() {
    let class = ClassDecl {
        name: Ident::new("P", Span::DUMMY),
        attributes: vec![VarStmt {
            name: Ident::new("x", Span::DUMMY),
            value: Some(ident("default")),
        }],
        methods: vec![Arc::new(FuncDecl {
            name: Ident::new("m", Span::DUMMY),
            params: vec![],
            return_type: None,
            body: Block::new(vec![expr_stmt(ident("body"))], Span::DUMMY),
            span: Span::DUMMY,
        })],
        init: None,
        span: Span::DUMMY,
    };
    let program = Program::new(vec![Stmt::new(
        StmtKind::Class(Arc::new(class)),
        Span::DUMMY,
    )]);

    let mut names = Names::default();
    names.visit_program(&program);
    assert_eq!(names.0, vec!["default", "body"]);
}
