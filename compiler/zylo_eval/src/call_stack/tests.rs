use pretty_assertions::assert_eq;

use super::*;
use crate::errors::{undefined_variable, EvalErrorKind};

fn frame(name: &str) -> CallFrame {
    CallFrame {
        name: name.to_string(),
        call_span: None,
    }
}

#[test]
fn test_push_pop_tracks_depth() {
    let mut stack = CallStack::new(10);
    assert!(stack.is_empty());
    assert!(stack.push(frame("a")).is_ok());
    assert!(stack.push(frame("b")).is_ok());
    assert_eq!(stack.depth(), 2);
    stack.pop();
    assert_eq!(stack.depth(), 1);
}

#[test]
fn test_push_past_limit_is_stack_overflow() {
    let mut stack = CallStack::new(2);
    assert!(stack.push(frame("a")).is_ok());
    assert!(stack.push(frame("b")).is_ok());
    let err = match stack.push(frame("c")) {
        Ok(()) => panic!("third frame should overflow"),
        Err(err) => err,
    };
    assert!(matches!(err.kind, EvalErrorKind::StackOverflow { depth: 2 }));
    assert_eq!(stack.depth(), 2);
}

#[test]
fn test_capture_is_innermost_first() {
    let mut stack = CallStack::new(10);
    assert!(stack.push(frame("outer")).is_ok());
    assert!(stack.push(frame("inner")).is_ok());
    let names: Vec<String> = stack.capture().into_iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["inner", "outer"]);
}

#[test]
fn test_attach_backtrace_keeps_innermost() {
    let mut stack = CallStack::new(10);
    assert!(stack.push(frame("outer")).is_ok());
    assert!(stack.push(frame("inner")).is_ok());
    let err = stack.attach_backtrace(undefined_variable("x"));
    stack.pop();
    let err = stack.attach_backtrace(err);
    assert_eq!(err.backtrace.len(), 2);
    assert_eq!(err.backtrace[0].name, "inner");
}

#[test]
fn test_attach_backtrace_at_top_level_is_empty() {
    let stack = CallStack::new(10);
    let err = stack.attach_backtrace(undefined_variable("x"));
    assert!(err.backtrace.is_empty());
}
