//! Evaluation errors.
//!
//! Evaluation is fail-fast: the first error aborts the run and is returned
//! from [`Interpreter::run`](crate::Interpreter::run). A value raised by
//! `throw` travels the same channel as [`EvalErrorKind::Uncaught`] so `?`
//! carries it out of expressions and calls until a `try` intercepts it.

use thiserror::Error;
use zylo_ir::Span;

use crate::value::Value;

#[derive(Clone, Debug, Error)]
pub enum EvalErrorKind {
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },

    #[error("undefined property '{property}' on {type_name}")]
    UndefinedProperty {
        property: String,
        type_name: &'static str,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },

    #[error("type mismatch: {left} {op} {right}")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("invalid operand for unary '{op}': {operand}")]
    InvalidUnary {
        op: &'static str,
        operand: &'static str,
    },

    #[error("{type_name} is not callable")]
    NotCallable { type_name: &'static str },

    #[error("{name}() expects {expected} argument{}, got {got}", plural(*expected))]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("{message}")]
    BuiltinArgument { name: &'static str, message: String },

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("cannot index {collection} with {index}")]
    InvalidIndex {
        collection: &'static str,
        index: &'static str,
    },

    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    #[error("hash keys must be strings, got {type_name}")]
    HashKeyNotString { type_name: &'static str },

    #[error("{type_name} is not iterable")]
    NotIterable { type_name: &'static str },

    #[error("invalid assignment target")]
    InvalidAssignTarget,

    #[error("'this' used outside of a method")]
    ThisOutsideMethod,

    #[error("module not found: {name}")]
    ModuleNotFound { name: String },

    #[error("'break' outside of a loop")]
    BreakOutsideLoop,

    #[error("'continue' outside of a loop")]
    ContinueOutsideLoop,

    #[error("'return' outside of a function")]
    ReturnOutsideFunction,

    #[error("maximum call depth of {depth} exceeded")]
    StackOverflow { depth: usize },

    #[error("uncaught exception: {0}")]
    Uncaught(Value),
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// An evaluation error and, when known, the innermost expression it came from.
#[derive(Clone, Debug, Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
    /// Calls active when the error was raised, innermost first. Empty for
    /// errors raised at the top level.
    pub backtrace: Vec<BacktraceFrame>,
}

/// One call in an error backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub name: String,
    /// Where the call was made.
    pub call_span: Option<Span>,
}

pub type EvalResult<T = Value> = Result<T, EvalError>;

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            span: None,
            backtrace: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: Vec<BacktraceFrame>) -> Self {
        self.backtrace = backtrace;
        self
    }

    /// Attach `span` unless a more precise one is already set.
    #[must_use]
    pub(crate) fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    /// Whether a `try` may intercept this error.
    ///
    /// Exhausting the call stack is not recoverable from script code.
    pub fn is_catchable(&self) -> bool {
        !matches!(self.kind, EvalErrorKind::StackOverflow { .. })
    }

    /// The value a `catch` parameter binds: the thrown value itself, or the
    /// error message for runtime errors.
    pub fn caught_value(&self) -> Value {
        match &self.kind {
            EvalErrorKind::Uncaught(value) => value.clone(),
            other => Value::string(other.to_string()),
        }
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

// Factories

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    }
    .into()
}

#[cold]
pub fn undefined_property(property: &str, type_name: &'static str) -> EvalError {
    EvalErrorKind::UndefinedProperty {
        property: property.to_string(),
        type_name,
    }
    .into()
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalErrorKind::DivisionByZero.into()
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalErrorKind::ModuloByZero.into()
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalErrorKind::IntegerOverflow { operation }.into()
}

#[cold]
pub fn type_mismatch(op: &'static str, left: &Value, right: &Value) -> EvalError {
    EvalErrorKind::TypeMismatch {
        op,
        left: left.type_name(),
        right: right.type_name(),
    }
    .into()
}

#[cold]
pub fn invalid_unary(op: &'static str, operand: &Value) -> EvalError {
    EvalErrorKind::InvalidUnary {
        op,
        operand: operand.type_name(),
    }
    .into()
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalErrorKind::NotCallable {
        type_name: value.type_name(),
    }
    .into()
}

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    }
    .into()
}

#[cold]
pub fn builtin_argument(name: &'static str, message: impl Into<String>) -> EvalError {
    EvalErrorKind::BuiltinArgument {
        name,
        message: message.into(),
    }
    .into()
}

/// `"<name>() expects exactly N argument(s)"`.
#[cold]
pub fn builtin_arity(name: &'static str, expected: usize) -> EvalError {
    builtin_argument(
        name,
        format!("{name}() expects exactly {expected} argument{}", plural(expected)),
    )
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalErrorKind::IndexOutOfBounds { index, len }.into()
}

#[cold]
pub fn invalid_index(collection: &Value, index: &Value) -> EvalError {
    EvalErrorKind::InvalidIndex {
        collection: collection.type_name(),
        index: index.type_name(),
    }
    .into()
}

#[cold]
pub fn key_not_found(key: &str) -> EvalError {
    EvalErrorKind::KeyNotFound {
        key: key.to_string(),
    }
    .into()
}

#[cold]
pub fn hash_key_not_string(key: &Value) -> EvalError {
    EvalErrorKind::HashKeyNotString {
        type_name: key.type_name(),
    }
    .into()
}

#[cold]
pub fn not_iterable(value: &Value) -> EvalError {
    EvalErrorKind::NotIterable {
        type_name: value.type_name(),
    }
    .into()
}

#[cold]
pub fn invalid_assign_target() -> EvalError {
    EvalErrorKind::InvalidAssignTarget.into()
}

#[cold]
pub fn this_outside_method() -> EvalError {
    EvalErrorKind::ThisOutsideMethod.into()
}

#[cold]
pub fn module_not_found(name: &str) -> EvalError {
    EvalErrorKind::ModuleNotFound {
        name: name.to_string(),
    }
    .into()
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalErrorKind::StackOverflow { depth }.into()
}

/// A `throw` that no `try` has intercepted (yet).
pub fn thrown(value: Value) -> EvalError {
    EvalErrorKind::Uncaught(value).into()
}
