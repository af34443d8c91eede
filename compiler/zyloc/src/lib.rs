//! Zylo command-line driver.
//!
//! The binary in `main.rs` only matches arguments; each command lives in
//! [`commands`] and reports failures through [`CommandError`] so the exit
//! code is decided in one place.

pub mod commands;
mod tracing_setup;

pub use commands::CommandError;
pub use tracing_setup::init_tracing;
