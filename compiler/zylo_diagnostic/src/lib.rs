//! Diagnostics for Zylo front-end passes.
//!
//! Parse errors are values, not `Result::Err`: passes push [`Diagnostic`]s
//! into a [`DiagnosticQueue`] and keep going, and the queue caps how many
//! are retained.

mod diagnostic;
mod error_code;
mod queue;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
