//! Native functions bound in every interpreter's global scope.

use std::rc::Rc;

use zylo_ir::{BinaryOp, Span};

use crate::environment::Environment;
use crate::errors::{builtin_argument, builtin_arity, index_out_of_bounds, EvalResult};
use crate::operators::evaluate_binary;
use crate::value::{ListRef, Module, Value};
use crate::Interpreter;

/// Native functions. Dotted names are members of the `show`, `read` and
/// `zyloruntime` modules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    ShowLog,
    ReadLine,
    ReadInt,
    GetInput,
    String,
    Len,
    Split,
    RuntimeSplit,
    ToNumber,
    Add,
    Subtract,
    Multiply,
    Divide,
    Try,
}

impl Builtin {
    pub fn name(self) -> &'static str {
        match self {
            Builtin::ShowLog => "show.log",
            Builtin::ReadLine => "read.line",
            Builtin::ReadInt => "read.int",
            Builtin::GetInput => "getInput",
            Builtin::String => "string",
            Builtin::Len => "len",
            Builtin::Split => "split",
            Builtin::RuntimeSplit => "zyloruntime.Split",
            Builtin::ToNumber => "to_number",
            Builtin::Add => "add",
            Builtin::Subtract => "subtract",
            Builtin::Multiply => "multiply",
            Builtin::Divide => "divide",
            Builtin::Try => "try",
        }
    }

    /// Exact argument count, or `None` for variadic builtins.
    ///
    /// The input builtins take no arguments but ignore any they are given.
    pub fn arity(self) -> Option<usize> {
        match self {
            Builtin::ShowLog | Builtin::ReadLine | Builtin::ReadInt | Builtin::GetInput => None,
            Builtin::String | Builtin::Len | Builtin::ToNumber => Some(1),
            Builtin::Split
            | Builtin::RuntimeSplit
            | Builtin::Add
            | Builtin::Subtract
            | Builtin::Multiply
            | Builtin::Divide
            | Builtin::Try => Some(2),
        }
    }
}

/// Methods reachable through member access on a List.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListMethod {
    Get,
    Append,
    Len,
}

impl ListMethod {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Get" => Some(ListMethod::Get),
            "Append" => Some(ListMethod::Append),
            "Len" => Some(ListMethod::Len),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ListMethod::Get => "List.Get",
            ListMethod::Append => "List.Append",
            ListMethod::Len => "List.Len",
        }
    }
}

/// Bind the standard library into the global scope.
pub fn register(env: &mut Environment) {
    env.define_global(
        "show",
        Value::Module(Rc::new(Module::new("show", [("log", Value::Builtin(Builtin::ShowLog))]))),
    );
    env.define_global(
        "read",
        Value::Module(Rc::new(Module::new(
            "read",
            [
                ("line", Value::Builtin(Builtin::ReadLine)),
                ("int", Value::Builtin(Builtin::ReadInt)),
            ],
        ))),
    );
    for builtin in [
        Builtin::String,
        Builtin::Len,
        Builtin::Split,
        Builtin::ToNumber,
        Builtin::Add,
        Builtin::Subtract,
        Builtin::Multiply,
        Builtin::Divide,
        Builtin::Try,
        Builtin::GetInput,
    ] {
        env.define_global(builtin.name(), Value::Builtin(builtin));
    }
    env.define_global("null", Value::Null);
}

/// The module `import zyloruntime` binds.
pub fn runtime_module() -> Value {
    Value::Module(Rc::new(Module::new(
        "zyloruntime",
        [("Split", Value::Builtin(Builtin::RuntimeSplit))],
    )))
}

const PROMPT: &str = "> ";

impl Interpreter {
    pub(crate) fn call_builtin(
        &mut self,
        builtin: Builtin,
        args: Vec<Value>,
        span: Span,
    ) -> EvalResult {
        let name = builtin.name();
        if let Some(expected) = builtin.arity() {
            if args.len() != expected {
                return Err(builtin_arity(name, expected));
            }
        }

        match builtin {
            Builtin::ShowLog => {
                let line = args
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                self.print_handler.println(&line);
                Ok(Value::Null)
            }
            Builtin::ReadLine | Builtin::GetInput => {
                self.print_handler.print(PROMPT);
                let line = self.input.read_line().unwrap_or_default();
                Ok(Value::string(line.trim()))
            }
            Builtin::ReadInt => loop {
                self.print_handler.print(PROMPT);
                let Some(line) = self.input.read_line() else {
                    return Ok(Value::Int(0));
                };
                match line.trim().parse::<i64>() {
                    Ok(n) => return Ok(Value::Int(n)),
                    Err(_) => self
                        .print_handler
                        .println("invalid number, please try again"),
                }
            },
            Builtin::String => Ok(match &args[0] {
                Value::Str(_) => args[0].clone(),
                other => Value::string(other.to_string()),
            }),
            Builtin::Len => length(&args[0]),
            Builtin::Split | Builtin::RuntimeSplit => split(name, &args[0], &args[1]),
            Builtin::ToNumber => to_number(&args[0]),
            Builtin::Add => evaluate_binary(BinaryOp::Add, &args[0], &args[1]),
            Builtin::Subtract => evaluate_binary(BinaryOp::Sub, &args[0], &args[1]),
            Builtin::Multiply => evaluate_binary(BinaryOp::Mul, &args[0], &args[1]),
            Builtin::Divide => evaluate_binary(BinaryOp::Div, &args[0], &args[1]),
            Builtin::Try => {
                let mut args = args.into_iter();
                let body = args.next().unwrap_or_default();
                let handler = args.next().unwrap_or_default();
                match self.call_value(body, Vec::new(), span) {
                    Ok(value) => Ok(value),
                    Err(err) if err.is_catchable() => {
                        self.call_value(handler, vec![err.caught_value()], span)?;
                        Ok(Value::Null)
                    }
                    Err(err) => Err(err),
                }
            }
        }
    }

    pub(crate) fn call_list_method(
        &mut self,
        method: ListMethod,
        list: &ListRef,
        args: Vec<Value>,
    ) -> EvalResult {
        let name = method.name();
        match method {
            ListMethod::Get => {
                let [index] = args.as_slice() else {
                    return Err(builtin_arity(name, 1));
                };
                let Value::Int(index) = index else {
                    return Err(builtin_argument(name, "List.Get() index must be integer"));
                };
                let items = list.borrow();
                usize::try_from(*index)
                    .ok()
                    .and_then(|i| items.get(i))
                    .cloned()
                    .ok_or_else(|| index_out_of_bounds(*index, items.len()))
            }
            ListMethod::Append => {
                let mut args = args.into_iter();
                match (args.next(), args.next()) {
                    (Some(value), None) => {
                        list.borrow_mut().push(value);
                        Ok(Value::Null)
                    }
                    _ => Err(builtin_arity(name, 1)),
                }
            }
            ListMethod::Len => Ok(Value::Int(len_to_int(list.borrow().len()))),
        }
    }
}

fn len_to_int(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

fn length(value: &Value) -> EvalResult {
    let len = match value {
        Value::List(items) => items.borrow().len(),
        Value::Str(s) => s.chars().count(),
        Value::Hash(entries) => entries.borrow().len(),
        other => {
            return Err(builtin_argument(
                "len",
                format!("len() not supported for {}", other.type_name()),
            ))
        }
    };
    Ok(Value::Int(len_to_int(len)))
}

fn split(name: &'static str, text: &Value, sep: &Value) -> EvalResult {
    let Value::Str(text) = text else {
        return Err(builtin_argument(
            name,
            format!("first argument to {name}() must be string"),
        ));
    };
    let Value::Str(sep) = sep else {
        return Err(builtin_argument(
            name,
            format!("second argument to {name}() must be string"),
        ));
    };
    let parts: Vec<Value> = if sep.is_empty() {
        text.chars().map(|c| Value::string(c.to_string())).collect()
    } else {
        text.split(&**sep).map(Value::from).collect()
    };
    Ok(Value::list(parts))
}

/// Numbers always come back as Float, so `"42"` becomes `42.0`.
fn to_number(value: &Value) -> EvalResult {
    let Value::Str(text) = value else {
        return Err(builtin_argument(
            "to_number",
            "argument to to_number() must be string",
        ));
    };
    Ok(text.trim().parse::<f64>().map_or(Value::Null, Value::Float))
}
