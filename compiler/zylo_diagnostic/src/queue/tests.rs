use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;
use zylo_ir::Span;

fn diag(line: u32, msg: &str) -> Diagnostic {
    Diagnostic::new(ErrorCode::E1001, msg, Span::point(line, 1))
}

#[test]
fn test_default_limit_is_100() {
    let mut queue = DiagnosticQueue::new();
    for i in 0..150 {
        queue.push(diag(i, &format!("error {i}")));
    }
    assert_eq!(queue.len(), 100);
    assert_eq!(queue.dropped(), 50);
    assert!(queue.limit_reached());
}

#[test]
fn test_unlimited_keeps_everything() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    for i in 0..300 {
        queue.push(diag(1, &format!("error {i}")));
    }
    assert_eq!(queue.len(), 300);
    assert!(!queue.limit_reached());
}

#[test]
fn test_exact_repeat_is_suppressed() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.push(diag(1, "expected ')', got end of file")));
    assert!(!queue.push(diag(1, "expected ')', got end of file")));
    assert!(queue.push(diag(2, "expected ')', got end of file")));
    assert_eq!(queue.len(), 2);
}

#[test]
fn test_order_preserved() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::default().with_error_limit(3));
    queue.push(diag(5, "b"));
    queue.push(diag(1, "a"));
    queue.push(diag(9, "c"));
    queue.push(diag(2, "dropped"));
    assert_eq!(queue.messages(), vec!["b", "a", "c"]);
    assert_eq!(queue.into_vec().len(), 3);
}
