//! Parse error types.

use humus_diagnostic::{
    failure_diagnostic, grammar_diagnostic, run_error_diagnostic, Diagnostic, ErrorCode,
};
use humus_ir::Value;
use humus_lexer::LexError;
use humus_peg::{Failure, GrammarError, RunError};
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    /// The token stream stalled on text no token rule accepts.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The tokens do not form the requested construct.
    #[error("{0}")]
    Syntax(Failure<Value>),

    #[error(transparent)]
    Halted(#[from] RunError),

    #[error("the event loop went idle before the parse finished")]
    Incomplete,

    /// A reduction produced the wrong kind of value for the entry point.
    #[error("parse produced {found} where {expected} was expected")]
    Unreduced {
        expected: &'static str,
        found: String,
    },
}

impl ParseError {
    /// Syntax failure because the input ran out.
    pub fn is_unexpected_end(&self) -> bool {
        matches!(self, ParseError::Syntax(failure) if failure.furthest.is_end())
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ParseError::Grammar(error) => grammar_diagnostic(error),
            ParseError::Lex(error) => error.to_diagnostic(),
            ParseError::Syntax(failure) => {
                let code = if self.is_unexpected_end() {
                    ErrorCode::E1002
                } else {
                    ErrorCode::E1001
                };
                failure_diagnostic(code, failure)
            }
            ParseError::Halted(error) => run_error_diagnostic(error),
            ParseError::Incomplete | ParseError::Unreduced { .. } => {
                Diagnostic::error(ErrorCode::E9001).with_message(self.to_string())
            }
        }
    }
}
