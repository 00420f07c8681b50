//! Diagnostics for matching-engine outcomes.
//!
//! Both grammar layers report failures the same way: the message says what
//! was expected and what was found, and the primary label sits at the
//! furthest point the match reached.

use humus_peg::{Failure, GrammarError, MatchValue, RunError};

use crate::{Diagnostic, ErrorCode};

/// Diagnostic for a match failure.
///
/// Positions of token-layer cursors carry the row and column of the token in
/// the source, so the label lands on the source character either way.
pub fn failure_diagnostic<V: MatchValue>(code: ErrorCode, failure: &Failure<V>) -> Diagnostic {
    let at = failure.furthest.position();
    let expected = failure.expected_description();
    Diagnostic::error(code)
        .with_message(format!("{expected}, found {}", failure.found()))
        .with_label(at, 1, expected)
}

/// Diagnostic for an event loop that stopped before answering.
pub fn run_error_diagnostic(error: &RunError) -> Diagnostic {
    match error {
        RunError::Grammar(grammar) => grammar_diagnostic(grammar),
        RunError::DispatchLimit { limit } => Diagnostic::error(ErrorCode::E9002)
            .with_message(error.to_string())
            .with_note(format!("raise the limit above {limit} or split the input")),
    }
}

pub fn grammar_diagnostic(error: &GrammarError) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9001)
        .with_message(error.to_string())
        .with_note("this is a fault in the grammar, not in the program")
}
