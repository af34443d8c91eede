//! Parser tests.
//!
//! - `parser`: statements, expressions, precedence and error recovery
//! - `limits`: termination on endless and adversarial token streams
