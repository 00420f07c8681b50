//! Lowering errors.

use humus_diagnostic::{Diagnostic, ErrorCode};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// A number literal whose digits are not valid in its radix, or whose
    /// value does not fit 64 bits.
    #[error("invalid number literal `{literal}`")]
    InvalidNumber { literal: String },
}

impl CodegenError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(ErrorCode::E2001).with_message(self.to_string());
        match self {
            CodegenError::InvalidNumber { .. } => diag.with_note(
                "digits must be valid in the radix (2 to 36) and the value must fit 64 bits",
            ),
        }
    }
}
