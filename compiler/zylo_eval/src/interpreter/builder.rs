//! `InterpreterBuilder` for configuring output, input and call limits.

use super::Interpreter;
use crate::builtins;
use crate::call_stack::CallStack;
use crate::environment::Environment;
use crate::input::{stdin_input, SharedInput};
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// How user-defined calls treat argument counts that differ from the
/// parameter list. Builtins always check.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ArityPolicy {
    /// Extra arguments are ignored; missing parameters are bound to Null.
    #[default]
    Relaxed,
    /// Any mismatch is an `ArityMismatch` error.
    Strict,
}

/// Default limit on nested user-level calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    input: Option<SharedInput>,
    max_call_depth: usize,
    arity: ArityPolicy,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            print_handler: None,
            input: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            arity: ArityPolicy::default(),
        }
    }

    /// Where `show.log` output and input prompts go. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Where `read.*` and `getInput` read from. Defaults to stdin.
    #[must_use]
    pub fn input(mut self, input: SharedInput) -> Self {
        self.input = Some(input);
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn arity(mut self, policy: ArityPolicy) -> Self {
        self.arity = policy;
        self
    }

    pub fn build(self) -> Interpreter {
        let mut env = Environment::new();
        builtins::register(&mut env);
        Interpreter {
            env,
            call_stack: CallStack::new(self.max_call_depth),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            input: self.input.unwrap_or_else(stdin_input),
            arity: self.arity,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
