//! Calls: user functions, bound methods, class instantiation and builtins.

use std::rc::Rc;

use tracing::trace;
use zylo_ir::{FuncDecl, Span};

use super::{ArityPolicy, Interpreter, StmtFlow};
use crate::call_stack::CallFrame;
use crate::environment::{LocalScope, Scope};
use crate::errors::{arity_mismatch, not_callable, EvalErrorKind, EvalResult};
use crate::value::{Class, Instance, Value};

impl Interpreter {
    /// Call any callable value. Dispatch is purely by the value's kind.
    pub(crate) fn call_value(&mut self, callee: Value, args: Vec<Value>, span: Span) -> EvalResult {
        match callee {
            Value::Function(func) => self.invoke(&func.decl, func.closure.clone(), None, args, span),
            Value::BoundMethod(bound) => {
                let this = Value::Instance(Rc::clone(&bound.instance));
                let closure = bound.instance.class.closure.clone();
                self.invoke(&bound.method, closure, Some(this), args, span)
            }
            Value::Class(class) => self.instantiate(&class, args, span),
            Value::Builtin(builtin) => self.call_builtin(builtin, args, span),
            Value::ListMethod(method, list) => self.call_list_method(method, &list, args),
            other => Err(not_callable(&other)),
        }
    }

    /// Run `decl`'s body in a new scope chained to `closure`, with `this`
    /// and the parameters bound.
    fn invoke(
        &mut self,
        decl: &FuncDecl,
        closure: LocalScope<Scope>,
        this: Option<Value>,
        args: Vec<Value>,
        call_span: Span,
    ) -> EvalResult {
        let name = decl.name.name.as_str();
        if self.arity == ArityPolicy::Strict && args.len() != decl.params.len() {
            return Err(arity_mismatch(name, decl.params.len(), args.len()));
        }
        trace!(
            function = name,
            args = args.len(),
            depth = self.call_stack.depth(),
            "call"
        );

        let mut scope = Scope::with_parent(closure);
        if let Some(this) = this {
            scope.define("this", this);
        }
        // Missing arguments bind Null so they never resolve to an outer name.
        let mut args = args.into_iter();
        for param in &decl.params {
            scope.define(param.name.as_str(), args.next().unwrap_or_default());
        }

        self.call_stack.push(CallFrame {
            name: name.to_string(),
            call_span: Some(call_span),
        })?;
        let result = self
            .scoped_in(LocalScope::new(scope))
            .exec_statements(&decl.body.statements);
        let result = result.map_err(|err| self.call_stack.attach_backtrace(err));
        self.call_stack.pop();

        match result? {
            StmtFlow::Normal(value) | StmtFlow::Return(value) => Ok(value),
            StmtFlow::Break => Err(EvalErrorKind::BreakOutsideLoop.into()),
            StmtFlow::Continue => Err(EvalErrorKind::ContinueOutsideLoop.into()),
        }
    }

    /// New instance with its own copy of the class defaults, initialized by
    /// `init` when the class has one.
    fn instantiate(&mut self, class: &Rc<Class>, args: Vec<Value>, span: Span) -> EvalResult {
        trace!(class = %class.name, "instantiate");
        let instance = Rc::new(Instance::new(class));
        if let Some(init) = &class.init {
            let this = Value::Instance(Rc::clone(&instance));
            self.invoke(init, class.closure.clone(), Some(this), args, span)?;
        }
        Ok(Value::Instance(instance))
    }
}
