//! Statement execution.

use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, trace};
use zylo_ir::{
    Block, ClassDecl, ForInStmt, FuncDecl, Ident, IfStmt, Stmt, StmtKind, TryStmt, WhileStmt,
};
use zylo_stack::ensure_sufficient_stack;

use super::{ExecResult, Interpreter, StmtFlow};
use crate::builtins::runtime_module;
use crate::errors::{module_not_found, not_iterable, thrown, EvalError};
use crate::value::{Class, Function, Value};

const RUNTIME_MODULE: &str = "zyloruntime";

impl Interpreter {
    /// Run `statements` in the current scope, stopping at the first one that
    /// does not complete normally.
    ///
    /// A normal result carries the value of the last statement.
    pub(crate) fn exec_statements(&mut self, statements: &[Stmt]) -> ExecResult {
        let mut last = Value::Null;
        for stmt in statements {
            match self.exec_stmt(stmt)? {
                StmtFlow::Normal(value) => last = value,
                flow => return Ok(flow),
            }
        }
        Ok(StmtFlow::Normal(last))
    }

    /// Run a braced block in a fresh child scope.
    pub(crate) fn exec_block(&mut self, block: &Block) -> ExecResult {
        self.scoped().exec_statements(&block.statements)
    }

    pub(crate) fn exec_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        ensure_sufficient_stack(|| self.exec_stmt_kind(stmt)).map_err(|err| err.or_span(stmt.span))
    }

    fn exec_stmt_kind(&mut self, stmt: &Stmt) -> ExecResult {
        match &stmt.kind {
            StmtKind::Var(var) => {
                let value = match &var.value {
                    Some(init) => self.eval_expr(init)?,
                    None => Value::Null,
                };
                self.env.define(var.name.name.as_str(), value);
                Ok(StmtFlow::Normal(Value::Null))
            }
            StmtKind::Func(decl) => {
                self.define_function(decl);
                Ok(StmtFlow::Normal(Value::Null))
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Null,
                };
                Ok(StmtFlow::Return(value))
            }
            StmtKind::If(stmt) => self.exec_if(stmt),
            StmtKind::While(stmt) => self.exec_while(stmt),
            StmtKind::ForIn(stmt) => self.exec_for_in(stmt),
            StmtKind::Try(stmt) => self.exec_try(stmt),
            StmtKind::Throw(value) => {
                let value = self.eval_expr(value)?;
                Err(thrown(value).with_span(stmt.span))
            }
            StmtKind::Break => Ok(StmtFlow::Break),
            StmtKind::Continue => Ok(StmtFlow::Continue),
            StmtKind::Class(decl) => {
                self.exec_class(decl)?;
                Ok(StmtFlow::Normal(Value::Null))
            }
            StmtKind::Block(block) => self.exec_block(block),
            StmtKind::Expr(expr) => Ok(StmtFlow::Normal(self.eval_expr(expr)?)),
            StmtKind::Import(module) => {
                self.exec_import(module)?;
                Ok(StmtFlow::Normal(Value::Null))
            }
        }
    }

    fn define_function(&mut self, decl: &Arc<FuncDecl>) {
        let function = Function {
            decl: Arc::clone(decl),
            closure: self.env.current().clone(),
        };
        self.env
            .define(decl.name.name.as_str(), Value::Function(Rc::new(function)));
    }

    // Branch and loop bodies run in the enclosing scope, so their writes
    // persist across iterations and after the loop.

    fn exec_if(&mut self, stmt: &IfStmt) -> ExecResult {
        if self.eval_expr(&stmt.condition)?.is_truthy() {
            self.exec_statements(&stmt.consequence.statements)
        } else if let Some(alternative) = &stmt.alternative {
            self.exec_statements(&alternative.statements)
        } else {
            Ok(StmtFlow::Normal(Value::Null))
        }
    }

    fn exec_while(&mut self, stmt: &WhileStmt) -> ExecResult {
        while self.eval_expr(&stmt.condition)?.is_truthy() {
            match self.exec_statements(&stmt.body.statements)? {
                StmtFlow::Break => break,
                ret @ StmtFlow::Return(_) => return Ok(ret),
                StmtFlow::Normal(_) | StmtFlow::Continue => {}
            }
        }
        Ok(StmtFlow::Normal(Value::Null))
    }

    fn exec_for_in(&mut self, stmt: &ForInStmt) -> ExecResult {
        let iterable = self.eval_expr(&stmt.iterable)?;
        let items: Vec<Value> = match &iterable {
            // A snapshot: appending inside the body does not extend the loop.
            Value::List(items) => items.borrow().clone(),
            Value::Str(s) => s.chars().map(|c| Value::string(c.to_string())).collect(),
            Value::Hash(entries) => entries.borrow().keys().map(|k| Value::from(k.as_str())).collect(),
            other => return Err(not_iterable(other).with_span(stmt.iterable.span)),
        };

        for item in items {
            self.env.define(stmt.var.name.as_str(), item);
            match self.exec_statements(&stmt.body.statements)? {
                StmtFlow::Break => break,
                ret @ StmtFlow::Return(_) => return Ok(ret),
                StmtFlow::Normal(_) | StmtFlow::Continue => {}
            }
        }
        Ok(StmtFlow::Normal(Value::Null))
    }

    fn exec_try(&mut self, stmt: &TryStmt) -> ExecResult {
        let outcome = match (self.exec_block(&stmt.body), &stmt.catch) {
            (Err(err), Some(catch)) if err.is_catchable() => {
                debug!(error = %err, "caught");
                let caught = err.caught_value();
                let mut scoped = self.scoped();
                if let Some(param) = &catch.param {
                    scoped.env.define(param.name.as_str(), caught);
                }
                scoped.exec_statements(&catch.body.statements)
            }
            (outcome, _) => outcome,
        };

        let Some(finally) = &stmt.finally else {
            return outcome;
        };
        // A finally that breaks, returns or raises replaces the pending outcome.
        match self.exec_block(finally)? {
            StmtFlow::Normal(_) => outcome,
            flow => Ok(flow),
        }
    }

    fn exec_class(&mut self, decl: &ClassDecl) -> Result<(), EvalError> {
        let mut defaults = Vec::with_capacity(decl.attributes.len());
        for attr in &decl.attributes {
            let value = match &attr.value {
                Some(init) => self.eval_expr(init)?,
                None => Value::Null,
            };
            defaults.push((attr.name.name.clone(), value));
        }
        let methods = decl
            .methods
            .iter()
            .map(|method| (method.name.name.clone(), Arc::clone(method)))
            .collect();

        trace!(
            class = %decl.name,
            attributes = defaults.len(),
            methods = decl.methods.len(),
            "define class"
        );
        let class = Class {
            name: decl.name.name.clone(),
            defaults,
            methods,
            init: decl.init.clone(),
            closure: self.env.current().clone(),
        };
        self.env
            .define(decl.name.name.as_str(), Value::Class(Rc::new(class)));
        Ok(())
    }

    /// Bind a module. Importing a name that is already bound does nothing.
    fn exec_import(&mut self, module: &Ident) -> Result<(), EvalError> {
        if self.env.lookup(&module.name).is_some() {
            debug!(module = %module, "already imported");
            return Ok(());
        }
        if module.name != RUNTIME_MODULE {
            return Err(module_not_found(&module.name).with_span(module.span));
        }
        debug!(module = %module, "import");
        self.env.define(RUNTIME_MODULE, runtime_module());
        Ok(())
    }
}
