//! The tree-walking interpreter.
//!
//! Statements produce a [`StmtFlow`]; expressions produce a [`Value`]. Errors,
//! including values raised by `throw`, travel on the `Err` side and abort the
//! run unless a `try` intercepts them.

mod builder;
mod expressions;
mod function_call;
mod scope_guard;
mod statements;

use tracing::debug;
use zylo_ir::Program;

pub use builder::{ArityPolicy, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use scope_guard::ScopedInterpreter;

use crate::call_stack::CallStack;
use crate::environment::Environment;
use crate::errors::{EvalError, EvalErrorKind, EvalResult};
use crate::input::SharedInput;
use crate::print_handler::SharedPrintHandler;
use crate::value::Value;

/// How a statement finished.
#[derive(Clone, Debug)]
pub enum StmtFlow {
    /// Ran to completion, yielding the statement's value.
    Normal(Value),
    Break,
    Continue,
    Return(Value),
}

pub type ExecResult = Result<StmtFlow, EvalError>;

pub struct Interpreter {
    pub(crate) env: Environment,
    pub(crate) call_stack: CallStack,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) input: SharedInput,
    pub(crate) arity: ArityPolicy,
}

impl Interpreter {
    /// Interpreter writing to stdout and reading from stdin.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Execute `program` in the global scope, then call `main` if the program
    /// bound a zero-parameter function by that name.
    ///
    /// Returns the value of the last top-level statement, or `main`'s result
    /// when it ran.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, program: &Program) -> EvalResult {
        debug!(statements = program.statements.len(), "run start");
        let value = match self.exec_statements(&program.statements)? {
            StmtFlow::Normal(value) => value,
            StmtFlow::Break => return Err(EvalErrorKind::BreakOutsideLoop.into()),
            StmtFlow::Continue => return Err(EvalErrorKind::ContinueOutsideLoop.into()),
            StmtFlow::Return(_) => return Err(EvalErrorKind::ReturnOutsideFunction.into()),
        };

        let value = match self.env.lookup("main") {
            Some(Value::Function(main)) if main.decl.params.is_empty() => {
                debug!("calling main");
                let span = main.decl.span;
                self.call_value(Value::Function(main), Vec::new(), span)?
            }
            _ => value,
        };
        debug!("run end");
        Ok(value)
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Look a name up from the current scope.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.env.lookup(name)
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}
