//! Expression evaluation.

use std::collections::BTreeMap;
use std::rc::Rc;

use zylo_ir::{BinaryOp, Expr, ExprKind, Ident};
use zylo_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::builtins::ListMethod;
use crate::errors::{
    hash_key_not_string, index_out_of_bounds, invalid_assign_target, invalid_index, key_not_found,
    this_outside_method, undefined_property, undefined_variable, EvalResult,
};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::value::Value;

impl Interpreter {
    /// Evaluate `expr`, tagging errors that have no location yet with its span.
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_kind(expr)).map_err(|err| err.or_span(expr.span))
    }

    fn eval_expr_kind(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Ident(name) => self.env.lookup(name).ok_or_else(|| undefined_variable(name)),
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Float(x) => Ok(Value::Float(*x)),
            ExprKind::Str(s) => Ok(Value::from(s.as_str())),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Null | ExprKind::Error => Ok(Value::Null),
            ExprKind::This => self.env.lookup("this").ok_or_else(this_outside_method),
            ExprKind::Prefix { op, operand } => {
                let operand = self.eval_expr(operand)?;
                evaluate_unary(*op, &operand)
            }
            ExprKind::Infix {
                op: BinaryOp::Assign,
                left,
                right,
            } => self.eval_assign(left, right),
            ExprKind::Infix { op, left, right } if op.is_logical() => {
                self.eval_logical(*op, left, right)
            }
            ExprKind::Infix { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                evaluate_binary(*op, &left, &right)
            }
            ExprKind::Call { callee, args } => {
                let callee = self.eval_expr(callee)?;
                let args = self.eval_args(args)?;
                self.call_value(callee, args, expr.span)
            }
            ExprKind::Index { collection, index } => {
                let collection = self.eval_expr(collection)?;
                let index = self.eval_expr(index)?;
                index_value(&collection, &index)
            }
            ExprKind::Member { object, property } => {
                let object = self.eval_expr(object)?;
                member(&object, property)
            }
            ExprKind::List(items) => Ok(Value::list(self.eval_args(items)?)),
            ExprKind::Hash(pairs) => {
                let mut entries = BTreeMap::new();
                for (key, value) in pairs {
                    let key_value = self.eval_expr(key)?;
                    let Value::Str(name) = key_value else {
                        return Err(hash_key_not_string(&key_value).with_span(key.span));
                    };
                    let value = self.eval_expr(value)?;
                    entries.insert(name.to_string(), value);
                }
                Ok(Value::hash(entries))
            }
        }
    }

    pub(crate) fn eval_args(&mut self, args: &[Expr]) -> EvalResult<Vec<Value>> {
        args.iter().map(|arg| self.eval_expr(arg)).collect()
    }

    /// `&&` and `||` short-circuit and always yield a Boolean.
    fn eval_logical(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> EvalResult {
        let left = self.eval_expr(left)?.is_truthy();
        let result = match op {
            BinaryOp::And if !left => false,
            BinaryOp::Or if left => true,
            _ => self.eval_expr(right)?.is_truthy(),
        };
        Ok(Value::Bool(result))
    }

    /// Store into a variable, instance field, list slot or hash entry.
    /// Yields the assigned value.
    fn eval_assign(&mut self, target: &Expr, value: &Expr) -> EvalResult {
        match &target.kind {
            ExprKind::Ident(name) => {
                let value = self.eval_expr(value)?;
                self.env
                    .assign(name, value.clone())
                    .map_err(|_| undefined_variable(name).with_span(target.span))?;
                Ok(value)
            }
            ExprKind::Member { object, property } => {
                let object = self.eval_expr(object)?;
                let Value::Instance(instance) = object else {
                    return Err(invalid_assign_target().with_span(target.span));
                };
                let value = self.eval_expr(value)?;
                instance
                    .fields
                    .borrow_mut()
                    .insert(property.name.clone(), value.clone());
                Ok(value)
            }
            ExprKind::Index { collection, index } => {
                let collection = self.eval_expr(collection)?;
                let index = self.eval_expr(index)?;
                let value = self.eval_expr(value)?;
                store_index(&collection, &index, value.clone())
                    .map_err(|err| err.or_span(target.span))?;
                Ok(value)
            }
            _ => Err(invalid_assign_target().with_span(target.span)),
        }
    }
}

fn index_value(collection: &Value, index: &Value) -> EvalResult {
    match (collection, index) {
        (Value::List(items), Value::Int(i)) => {
            let items = items.borrow();
            usize::try_from(*i)
                .ok()
                .and_then(|slot| items.get(slot))
                .cloned()
                .ok_or_else(|| index_out_of_bounds(*i, items.len()))
        }
        (Value::Str(s), Value::Int(i)) => usize::try_from(*i)
            .ok()
            .and_then(|slot| s.chars().nth(slot))
            .map(|c| Value::string(c.to_string()))
            .ok_or_else(|| index_out_of_bounds(*i, s.chars().count())),
        (Value::Hash(entries), Value::Str(key)) => entries
            .borrow()
            .get(&**key)
            .cloned()
            .ok_or_else(|| key_not_found(key)),
        (Value::Hash(_), key) => Err(hash_key_not_string(key)),
        _ => Err(invalid_index(collection, index)),
    }
}

fn store_index(collection: &Value, index: &Value, value: Value) -> EvalResult<()> {
    match (collection, index) {
        (Value::List(items), Value::Int(i)) => {
            let mut items = items.borrow_mut();
            let len = items.len();
            let slot = usize::try_from(*i)
                .ok()
                .and_then(|slot| items.get_mut(slot))
                .ok_or_else(|| index_out_of_bounds(*i, len))?;
            *slot = value;
            Ok(())
        }
        (Value::List(_), _) => Err(invalid_index(collection, index)),
        (Value::Hash(entries), Value::Str(key)) => {
            entries.borrow_mut().insert(key.to_string(), value);
            Ok(())
        }
        (Value::Hash(_), key) => Err(hash_key_not_string(key)),
        _ => Err(invalid_assign_target()),
    }
}

/// `object.property` for modules, list methods and instance members.
fn member(object: &Value, property: &Ident) -> EvalResult {
    let name = property.name.as_str();
    let found = match object {
        Value::Module(module) => module.members.get(name).cloned(),
        Value::List(items) => {
            ListMethod::from_name(name).map(|method| Value::ListMethod(method, Rc::clone(items)))
        }
        Value::Instance(instance) => instance.member(name),
        _ => None,
    };
    found.ok_or_else(|| undefined_property(name, object.type_name()).with_span(property.span))
}
