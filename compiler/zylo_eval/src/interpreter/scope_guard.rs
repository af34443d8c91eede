//! Scope guard for the interpreter's environment.
//!
//! [`ScopedInterpreter`] restores the previous scope when dropped, so every
//! exit from a block or call, early `?` returns included, leaves the
//! environment as it found it.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::environment::{LocalScope, Scope};

/// Borrow of the interpreter with a different scope current.
///
/// Derefs to [`Interpreter`], so it is used exactly like the interpreter.
pub struct ScopedInterpreter<'a> {
    interpreter: &'a mut Interpreter,
    previous: Option<LocalScope<Scope>>,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.interpreter.env.restore(previous);
        }
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Enter a fresh child of the current scope until the guard drops.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_> {
        let previous = self.env.push_scope();
        ScopedInterpreter {
            interpreter: self,
            previous: Some(previous),
        }
    }

    /// Make `scope` current until the guard drops.
    ///
    /// Calls use this to run a body in a scope chained to the callee's
    /// closure rather than to the caller.
    pub fn scoped_in(&mut self, scope: LocalScope<Scope>) -> ScopedInterpreter<'_> {
        let previous = self.env.enter(scope);
        ScopedInterpreter {
            interpreter: self,
            previous: Some(previous),
        }
    }
}
