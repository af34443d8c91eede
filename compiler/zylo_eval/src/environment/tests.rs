use pretty_assertions::assert_eq;

use super::*;

fn int(value: &Option<Value>) -> Option<i64> {
    match value {
        Some(Value::Int(n)) => Some(*n),
        _ => None,
    }
}

#[test]
fn test_define_and_lookup() {
    let mut env = Environment::new();
    env.define("x", Value::Int(1));
    assert_eq!(int(&env.lookup("x")), Some(1));
    assert!(env.lookup("y").is_none());
}

#[test]
fn test_child_scope_sees_parent() {
    let mut env = Environment::new();
    env.define("x", Value::Int(1));
    let previous = env.push_scope();
    assert_eq!(int(&env.lookup("x")), Some(1));
    env.restore(previous);
    assert!(env.is_global());
}

#[test]
fn test_shadowing_is_scoped() {
    let mut env = Environment::new();
    env.define("x", Value::Int(1));
    let previous = env.push_scope();
    env.define("x", Value::Int(2));
    assert_eq!(int(&env.lookup("x")), Some(2));
    env.restore(previous);
    assert_eq!(int(&env.lookup("x")), Some(1));
}

#[test]
fn test_assign_updates_nearest_binding() {
    let mut env = Environment::new();
    env.define("x", Value::Int(1));
    let outer = env.push_scope();
    let middle = env.push_scope();
    assert_eq!(env.assign("x", Value::Int(5)), Ok(()));
    env.restore(middle);
    env.restore(outer);
    assert_eq!(int(&env.lookup("x")), Some(5));
}

#[test]
fn test_assign_undefined_fails() {
    let mut env = Environment::new();
    assert_eq!(env.assign("missing", Value::Null), Err(AssignError::Undefined));
}

#[test]
fn test_define_global_from_inner_scope() {
    let mut env = Environment::new();
    let previous = env.push_scope();
    env.define_global("g", Value::Int(9));
    env.restore(previous);
    assert_eq!(int(&env.lookup("g")), Some(9));
}

#[test]
fn test_captured_scope_outlives_exit() {
    let mut env = Environment::new();
    let previous = env.push_scope();
    env.define("captured", Value::Int(3));
    let captured = env.current().clone();
    env.restore(previous);

    assert!(env.lookup("captured").is_none());
    assert_eq!(int(&captured.borrow().lookup("captured")), Some(3));
}

#[test]
fn test_debug_lists_names_only() {
    let mut scope = Scope::new();
    scope.define("b", Value::Int(1));
    scope.define("a", Value::Int(2));
    assert_eq!(
        format!("{scope:?}"),
        "Scope { bindings: [\"a\", \"b\"], has_parent: false }"
    );
}
