//! Runtime values.
//!
//! Scalars are stored inline. Lists, hashes, instances and callables are
//! reference counted, so copies of a `Value` alias the same object: a list
//! passed to a function and mutated there is mutated for the caller too.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use zylo_ir::FuncDecl;

use crate::builtins::{Builtin, ListMethod};
use crate::environment::{LocalScope, Scope};

/// Shared, mutable list storage.
pub type ListRef = Rc<RefCell<Vec<Value>>>;
/// Shared, mutable hash storage. Keys stay sorted, which fixes display and
/// iteration order.
pub type HashRef = Rc<RefCell<BTreeMap<String, Value>>>;

/// Containers nested deeper than this display as `[...]` / `{...}`. A
/// container that contains itself prints that way at the point it recurs.
const MAX_DISPLAY_DEPTH: usize = 32;

#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    List(ListRef),
    Hash(HashRef),
    Function(Rc<Function>),
    Builtin(Builtin),
    /// A list method bound to its receiver (`xs.Append`).
    ListMethod(ListMethod, ListRef),
    Class(Rc<Class>),
    Instance(Rc<Instance>),
    BoundMethod(Rc<BoundMethod>),
    Module(Rc<Module>),
}

/// A user-defined function and the scope it closes over.
pub struct Function {
    pub decl: Arc<FuncDecl>,
    pub closure: LocalScope<Scope>,
}

impl Function {
    pub fn name(&self) -> &str {
        &self.decl.name.name
    }
}

pub struct Class {
    pub name: String,
    /// Attribute defaults in declaration order, evaluated once when the
    /// class statement runs.
    pub defaults: Vec<(String, Value)>,
    pub methods: FxHashMap<String, Arc<FuncDecl>>,
    pub init: Option<Arc<FuncDecl>>,
    /// Scope the class was declared in; methods close over it.
    pub closure: LocalScope<Scope>,
}

pub struct Instance {
    pub class: Rc<Class>,
    pub fields: RefCell<FxHashMap<String, Value>>,
}

impl Instance {
    /// A fresh instance whose fields are deep copies of the class defaults.
    pub fn new(class: &Rc<Class>) -> Self {
        let fields = class
            .defaults
            .iter()
            .map(|(name, value)| (name.clone(), value.deep_copy()))
            .collect();
        Instance {
            class: Rc::clone(class),
            fields: RefCell::new(fields),
        }
    }

    /// Field value, else the class method bound to this instance.
    pub fn member(self: &Rc<Self>, name: &str) -> Option<Value> {
        if let Some(field) = self.fields.borrow().get(name) {
            return Some(field.clone());
        }
        let method = self.class.methods.get(name)?;
        Some(Value::BoundMethod(Rc::new(BoundMethod {
            instance: Rc::clone(self),
            method: Arc::clone(method),
        })))
    }
}

pub struct BoundMethod {
    pub instance: Rc<Instance>,
    pub method: Arc<FuncDecl>,
}

/// A named bag of members (`show`, `read`, `zyloruntime`).
pub struct Module {
    pub name: String,
    pub members: BTreeMap<String, Value>,
}

impl Module {
    pub fn new(name: impl Into<String>, members: impl IntoIterator<Item = (&'static str, Value)>) -> Self {
        Module {
            name: name.into(),
            members: members
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }
}

impl Value {
    pub fn string(s: impl Into<String>) -> Value {
        Value::Str(Rc::from(s.into()))
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn hash(entries: BTreeMap<String, Value>) -> Value {
        Value::Hash(Rc::new(RefCell::new(entries)))
    }

    /// Null, `false`, `0` and `""` are false; everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Name of the value's kind, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Hash(_) => "hash",
            Value::Function(_) => "function",
            Value::Builtin(_) | Value::ListMethod(..) => "builtin",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
            Value::BoundMethod(_) => "bound method",
            Value::Module(_) => "module",
        }
    }

    /// Copy with fresh list and hash storage, recursively.
    ///
    /// Used for class attribute defaults so instances never share a
    /// container. Other reference kinds (instances, functions) are shared.
    /// A container reached twice is copied once, so cycles and shared
    /// children keep their shape in the copy.
    #[must_use]
    pub fn deep_copy(&self) -> Value {
        self.deep_copy_with(&mut FxHashMap::default())
    }

    fn deep_copy_with(&self, copied: &mut FxHashMap<*const (), Value>) -> Value {
        match self {
            Value::List(items) => {
                let key = Rc::as_ptr(items).cast::<()>();
                if let Some(copy) = copied.get(&key) {
                    return copy.clone();
                }
                let copy: ListRef = Rc::default();
                copied.insert(key, Value::List(Rc::clone(&copy)));
                let fresh = items
                    .borrow()
                    .iter()
                    .map(|item| item.deep_copy_with(copied))
                    .collect();
                *copy.borrow_mut() = fresh;
                Value::List(copy)
            }
            Value::Hash(entries) => {
                let key = Rc::as_ptr(entries).cast::<()>();
                if let Some(copy) = copied.get(&key) {
                    return copy.clone();
                }
                let copy: HashRef = Rc::default();
                copied.insert(key, Value::Hash(Rc::clone(&copy)));
                let fresh = entries
                    .borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.deep_copy_with(copied)))
                    .collect();
                *copy.borrow_mut() = fresh;
                Value::Hash(copy)
            }
            other => other.clone(),
        }
    }

    /// `open` holds the containers currently being printed, outermost first.
    fn write(&self, f: &mut fmt::Formatter<'_>, open: &mut Vec<*const ()>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                let ptr = Rc::as_ptr(items).cast::<()>();
                if open.len() >= MAX_DISPLAY_DEPTH || open.contains(&ptr) {
                    return f.write_str("[...]");
                }
                open.push(ptr);
                f.write_str("[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.write(f, open)?;
                }
                open.pop();
                f.write_str("]")
            }
            Value::Hash(entries) => {
                let ptr = Rc::as_ptr(entries).cast::<()>();
                if open.len() >= MAX_DISPLAY_DEPTH || open.contains(&ptr) {
                    return f.write_str("{...}");
                }
                open.push(ptr);
                f.write_str("{")?;
                for (i, (key, value)) in entries.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: ")?;
                    value.write(f, open)?;
                }
                open.pop();
                f.write_str("}")
            }
            Value::Function(func) => write!(f, "func {}", func.name()),
            Value::Builtin(builtin) => write!(f, "builtin {}", builtin.name()),
            Value::ListMethod(method, _) => write!(f, "builtin {}", method.name()),
            Value::Class(class) => write!(f, "class {}", class.name),
            Value::Instance(instance) => write!(f, "instance of {}", instance.class.name),
            Value::BoundMethod(bound) => write!(f, "bound method {}", bound.method.name),
            Value::Module(module) => write!(f, "module {}", module.name),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }
}

/// The user-facing rendering used by `show.log`, `string()` and string
/// concatenation.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, &mut Vec::new())
    }
}

// Debug goes through Display for reference kinds: following closures into
// their scopes would print the whole environment, and cycles would never end.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            other => write!(f, "<{other}>"),
        }
    }
}

#[cfg(test)]
mod tests;
