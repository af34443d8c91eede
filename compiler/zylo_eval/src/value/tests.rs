use std::collections::BTreeMap;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::builtins::Builtin;

#[test]
fn test_truthiness() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(!Value::Int(0).is_truthy());
    assert!(!Value::from("").is_truthy());

    assert!(Value::Bool(true).is_truthy());
    assert!(Value::Int(-3).is_truthy());
    assert!(Value::from("0").is_truthy());
    assert!(Value::Float(0.0).is_truthy());
    assert!(Value::list(vec![]).is_truthy());
    assert!(Value::Builtin(Builtin::Len).is_truthy());
}

#[test]
fn test_display_scalars() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::Int(-42).to_string(), "-42");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    assert_eq!(Value::Float(3.0).to_string(), "3");
    assert_eq!(Value::from("hi").to_string(), "hi");
}

#[test]
fn test_display_containers() {
    let list = Value::list(vec![Value::Int(1), Value::from("a"), Value::Null]);
    assert_eq!(list.to_string(), "[1, a, null]");

    let mut entries = BTreeMap::new();
    entries.insert("b".to_string(), Value::Int(2));
    entries.insert("a".to_string(), Value::list(vec![]));
    assert_eq!(Value::hash(entries).to_string(), "{a: [], b: 2}");
}

#[test]
fn test_display_self_referential_list_terminates() {
    let list = Value::list(vec![]);
    if let Value::List(items) = &list {
        items.borrow_mut().push(list.clone());
    }
    assert_eq!(list.to_string(), "[[...]]");
}

#[test]
fn test_display_repeated_self_reference_is_linear() {
    let list = Value::list(vec![Value::Int(1)]);
    if let Value::List(items) = &list {
        items.borrow_mut().push(list.clone());
        items.borrow_mut().push(list.clone());
    }
    assert_eq!(list.to_string(), "[1, [...], [...]]");
}

#[test]
fn test_display_hash_cycle_through_list() {
    let hash = Value::hash(BTreeMap::new());
    let list = Value::list(vec![hash.clone()]);
    if let Value::Hash(entries) = &hash {
        entries.borrow_mut().insert("back".to_string(), list.clone());
    }
    assert_eq!(list.to_string(), "[{back: [...]}]");
}

#[test]
fn test_display_shared_child_is_not_a_cycle() {
    let child = Value::list(vec![Value::Int(7)]);
    let parent = Value::list(vec![child.clone(), child]);
    assert_eq!(parent.to_string(), "[[7], [7]]");
}

#[test]
fn test_display_callables() {
    assert_eq!(Value::Builtin(Builtin::Len).to_string(), "builtin len");
    let module = Value::Module(Rc::new(Module::new("show", [("log", Value::Builtin(Builtin::ShowLog))])));
    assert_eq!(module.to_string(), "module show");
}

#[test]
fn test_type_names() {
    assert_eq!(Value::Null.type_name(), "null");
    assert_eq!(Value::Int(1).type_name(), "integer");
    assert_eq!(Value::Float(1.0).type_name(), "float");
    assert_eq!(Value::from("s").type_name(), "string");
    assert_eq!(Value::list(vec![]).type_name(), "list");
    assert_eq!(Value::hash(BTreeMap::new()).type_name(), "hash");
}

#[test]
fn test_clone_aliases_list_storage() {
    let list = Value::list(vec![Value::Int(1)]);
    let alias = list.clone();
    if let Value::List(items) = &alias {
        items.borrow_mut().push(Value::Int(2));
    }
    assert_eq!(list.to_string(), "[1, 2]");
}

#[test]
fn test_deep_copy_detaches_nested_containers() {
    let inner = Value::list(vec![Value::Int(1)]);
    let outer = Value::list(vec![inner.clone()]);
    let copy = outer.deep_copy();

    if let Value::List(items) = &inner {
        items.borrow_mut().push(Value::Int(2));
    }
    assert_eq!(outer.to_string(), "[[1, 2]]");
    assert_eq!(copy.to_string(), "[[1]]");
}

#[test]
fn test_deep_copy_keeps_cycles() {
    let list = Value::list(vec![Value::Int(1)]);
    if let Value::List(items) = &list {
        items.borrow_mut().push(list.clone());
    }
    let copy = list.deep_copy();
    let (Value::List(original), Value::List(copied)) = (&list, &copy) else {
        panic!("deep copy of a list must be a list");
    };
    assert!(!Rc::ptr_eq(original, copied));
    let items = copied.borrow();
    let Value::List(inner) = &items[1] else {
        panic!("second element must be a list");
    };
    assert!(Rc::ptr_eq(inner, copied));
    drop(items);
    assert_eq!(copy.to_string(), "[1, [...]]");
}

#[test]
fn test_deep_copy_keeps_shared_children_shared() {
    let child = Value::list(vec![]);
    let mut entries = BTreeMap::new();
    entries.insert("a".to_string(), child.clone());
    entries.insert("b".to_string(), child);
    let copy = Value::hash(entries).deep_copy();
    let Value::Hash(copied) = &copy else {
        panic!("deep copy of a hash must be a hash");
    };
    let copied = copied.borrow();
    let (Some(Value::List(a)), Some(Value::List(b))) = (copied.get("a"), copied.get("b")) else {
        panic!("both entries must be lists");
    };
    assert!(Rc::ptr_eq(a, b));
}

#[test]
fn test_debug_is_compact() {
    assert_eq!(format!("{:?}", Value::Int(3)), "Int(3)");
    assert_eq!(format!("{:?}", Value::from("x")), "Str(\"x\")");
    assert_eq!(format!("{:?}", Value::list(vec![Value::Int(1)])), "<[1]>");
}
