//! Zylo Eval - tree-walking interpreter for Zylo programs.
//!
//! # Architecture
//!
//! - [`Value`]: the dynamic value model; containers and objects are shared
//!   by reference
//! - [`Environment`]: parent-linked lexical scopes; closures keep their
//!   defining scope alive
//! - [`evaluate_binary`] / [`evaluate_unary`]: operator semantics
//! - [`Builtin`]: the native standard library bound into every interpreter
//! - [`Interpreter`]: statement execution with explicit [`StmtFlow`]
//!
//! ```text
//! let output = zylo_parse::parse_source(source);
//! let mut interpreter = Interpreter::builder().print_handler(buffer_handler()).build();
//! interpreter.run(&output.program)?;
//! ```

mod builtins;
mod call_stack;
mod environment;
pub mod errors;
mod input;
pub mod interpreter;
mod operators;
mod print_handler;
mod value;

pub use builtins::{Builtin, ListMethod};
pub use call_stack::{CallFrame, CallStack};
pub use environment::{AssignError, Environment, LocalScope, Scope};
pub use errors::{BacktraceFrame, EvalError, EvalErrorKind, EvalResult};
pub use input::{scripted_input, stdin_input, InputSource, SharedInput};
pub use interpreter::{
    ArityPolicy, ExecResult, Interpreter, InterpreterBuilder, ScopedInterpreter, StmtFlow,
};
pub use operators::{evaluate_binary, evaluate_unary, values_equal};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use value::{BoundMethod, Class, Function, HashRef, Instance, ListRef, Module, Value};
