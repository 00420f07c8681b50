//! Error codes for all front-end diagnostics.
//!
//! The first digit names the phase that raised the error.

use std::fmt;

/// Error codes for all front-end diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: token grammar
/// - E1xxx: syntax grammar
/// - E2xxx: lowering
/// - E9xxx: grammar configuration and engine limits
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Input the token grammar cannot read
    E0001,
    /// Unexpected token
    E1001,
    /// Unexpected end of input
    E1002,
    /// Program cannot be lowered
    E2001,
    /// Grammar configuration fault
    E9001,
    /// Dispatch limit exceeded
    E9002,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 6] = [
        ErrorCode::E0001,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E2001,
        ErrorCode::E9001,
        ErrorCode::E9002,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// One-line summary, as printed by `--explain`-style listings.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "lexical error",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "unexpected end of input",
            ErrorCode::E2001 => "lowering error",
            ErrorCode::E9001 => "grammar configuration error",
            ErrorCode::E9002 => "dispatch limit exceeded",
        }
    }

    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Errors caused by the toolchain rather than by the program.
    pub fn is_internal_error(&self) -> bool {
        self.as_str().starts_with("E9")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
