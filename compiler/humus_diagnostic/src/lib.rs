//! Diagnostic system for reporting front-end failures.
//!
//! Every diagnostic carries:
//! - an error code, so messages can be searched
//! - a message saying what went wrong
//! - a primary label saying where (line and column in the source)
//! - notes with further context

mod diagnostic;
pub mod emitter;
mod engine;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use engine::{failure_diagnostic, grammar_diagnostic, run_error_diagnostic};
pub use error_code::ErrorCode;
