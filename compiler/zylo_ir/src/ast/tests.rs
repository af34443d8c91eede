use super::*;
use pretty_assertions::assert_eq;

fn ident(name: &str) -> Expr {
    Expr::new(ExprKind::Ident(name.to_string()), Span::DUMMY)
}

fn int(n: i64) -> Expr {
    Expr::new(ExprKind::Int(n), Span::DUMMY)
}

fn infix(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::new(
        ExprKind::Infix {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        Span::DUMMY,
    )
}

fn stmt(kind: StmtKind) -> Stmt {
    Stmt::new(kind, Span::DUMMY)
}

#[test]
fn test_display_nested_infix() {
    let expr = infix(
        BinaryOp::Add,
        int(1),
        infix(BinaryOp::Mul, int(2), int(3)),
    );
    assert_eq!(expr.to_string(), "(1 + (2 * 3))");
}

#[test]
fn test_display_literals() {
    let float = Expr::new(ExprKind::Float(3.0), Span::DUMMY);
    let string = Expr::new(ExprKind::Str("a\"b".into()), Span::DUMMY);
    assert_eq!(float.to_string(), "3.0");
    assert_eq!(string.to_string(), "\"a\\\"b\"");
    assert_eq!(Expr::new(ExprKind::Null, Span::DUMMY).to_string(), "nil");
}

#[test]
fn test_display_postfix_forms() {
    let member = Expr::new(
        ExprKind::Member {
            object: Box::new(ident("show")),
            property: Ident::new("log", Span::DUMMY),
        },
        Span::DUMMY,
    );
    let call = Expr::new(
        ExprKind::Call {
            callee: Box::new(member),
            args: vec![int(1), ident("x")],
        },
        Span::DUMMY,
    );
    assert_eq!(call.to_string(), "show.log(1, x)");

    let index = Expr::new(
        ExprKind::Index {
            collection: Box::new(ident("xs")),
            index: Box::new(int(0)),
        },
        Span::DUMMY,
    );
    assert_eq!(index.to_string(), "(xs[0])");
}

#[test]
fn test_display_statements() {
    let var = stmt(StmtKind::Var(VarStmt {
        name: Ident::new("x", Span::DUMMY),
        value: Some(int(5)),
    }));
    assert_eq!(var.to_string(), "var x = 5;");

    let body = Block::new(vec![stmt(StmtKind::Break)], Span::DUMMY);
    let while_stmt = stmt(StmtKind::While(WhileStmt {
        condition: Expr::new(ExprKind::Bool(true), Span::DUMMY),
        body,
    }));
    assert_eq!(while_stmt.to_string(), "while true { break; }");

    let func = stmt(StmtKind::Func(Arc::new(FuncDecl {
        name: Ident::new("f", Span::DUMMY),
        params: vec![Ident::new("a", Span::DUMMY), Ident::new("b", Span::DUMMY)],
        return_type: Some("Int".into()),
        body: Block::default(),
        span: Span::DUMMY,
    })));
    assert_eq!(func.to_string(), "func f(a, b): Int { }");
}

#[test]
fn test_display_try() {
    let try_stmt = stmt(StmtKind::Try(TryStmt {
        body: Block::new(vec![stmt(StmtKind::Throw(int(1)))], Span::DUMMY),
        catch: Some(CatchClause {
            param: Some(Ident::new("e", Span::DUMMY)),
            body: Block::default(),
        }),
        finally: Some(Block::default()),
    }));
    assert_eq!(
        try_stmt.to_string(),
        "try { throw 1; } catch (e) { } finally { }"
    );
}

#[test]
fn test_program_display_one_statement_per_line() {
    let program = Program::new(vec![
        stmt(StmtKind::Import(Ident::new("zyloruntime", Span::DUMMY))),
        stmt(StmtKind::Expr(ident("x"))),
    ]);
    assert_eq!(program.to_string(), "import zyloruntime\nx;");
}

#[test]
fn test_operator_classes() {
    assert!(BinaryOp::And.is_logical());
    assert!(!BinaryOp::Eq.is_logical());
    assert!(BinaryOp::GtEq.is_ordering());
    assert!(!BinaryOp::NotEq.is_ordering());
    assert_eq!(UnaryOp::Not.to_string(), "!");
}
