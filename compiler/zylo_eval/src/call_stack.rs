//! Live call frames: the recursion limit and error backtraces.

use zylo_ir::Span;

use crate::errors::{stack_overflow, BacktraceFrame, EvalError};

#[derive(Clone, Debug)]
pub struct CallFrame {
    pub name: String,
    /// Where the call was made, not where the callee was declared.
    pub call_span: Option<Span>,
}

/// Frames for the user-level calls currently executing.
///
/// Builtins do not push frames. The depth check is part of [`push`], so a
/// frame that would exceed the limit is never recorded.
///
/// [`push`]: CallStack::push
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(stack_overflow(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot of the live frames, most recent call first.
    pub fn capture(&self) -> Vec<BacktraceFrame> {
        self.frames
            .iter()
            .rev()
            .map(|frame| BacktraceFrame {
                name: frame.name.clone(),
                call_span: frame.call_span,
            })
            .collect()
    }

    /// Give `err` a backtrace unless an inner call already gave it one.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if !err.backtrace.is_empty() || self.frames.is_empty() {
            return err;
        }
        let backtrace = self.capture();
        err.with_backtrace(backtrace)
    }
}

#[cfg(test)]
mod tests;
