//! Lexical scopes.
//!
//! Scopes form a parent-linked chain. Closures hold on to the scope they were
//! created in, so scopes are shared (`LocalScope`) rather than owned by a
//! stack. The [`Environment`] only tracks which scope is current.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::value::Value;

/// Returned by [`Scope::assign`] when no scope in the chain binds the name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    Undefined,
}

/// Single-threaded shared cell used for scopes.
///
/// All scope allocations go through [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Bindings introduced by one block, call or loop body.
#[derive(Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    ///
    /// Redefining a name already bound here replaces it.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Resolve `name` through this scope and its ancestors.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        let mut next = self.parent.clone();
        while let Some(scope) = next {
            let scope = scope.borrow();
            if let Some(value) = scope.bindings.get(name) {
                return Some(value.clone());
            }
            next = scope.parent.clone();
        }
        None
    }

    /// Overwrite the nearest existing binding of `name`.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        let mut next = self.parent.clone();
        while let Some(scope) = next {
            let mut scope = scope.borrow_mut();
            if let Some(slot) = scope.bindings.get_mut(name) {
                *slot = value;
                return Ok(());
            }
            next = scope.parent.clone();
        }
        Err(AssignError::Undefined)
    }
}

// Bindings can hold closures over this very scope; print names only.
impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Scope")
            .field("bindings", &names)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// The interpreter's view of scoping: the global scope plus whichever scope
/// is currently active.
pub struct Environment {
    current: LocalScope<Scope>,
    global: LocalScope<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            current: global.clone(),
            global,
        }
    }

    pub fn current(&self) -> &LocalScope<Scope> {
        &self.current
    }

    pub fn global(&self) -> &LocalScope<Scope> {
        &self.global
    }

    /// Make `scope` current, returning the scope it replaces.
    pub fn enter(&mut self, scope: LocalScope<Scope>) -> LocalScope<Scope> {
        std::mem::replace(&mut self.current, scope)
    }

    /// Make a new child of the current scope current.
    pub fn push_scope(&mut self) -> LocalScope<Scope> {
        let child = LocalScope::new(Scope::with_parent(self.current.clone()));
        self.enter(child)
    }

    pub fn restore(&mut self, previous: LocalScope<Scope>) {
        self.current = previous;
    }

    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.current.borrow_mut().define(name, value);
    }

    pub fn define_global(&mut self, name: impl Into<String>, value: Value) {
        self.global.borrow_mut().define(name, value);
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.current.borrow().lookup(name)
    }

    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        self.current.borrow_mut().assign(name, value)
    }

    /// Whether the current scope is the global one.
    pub fn is_global(&self) -> bool {
        self.current.ptr_eq(&self.global)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

#[cfg(test)]
mod tests;
