//! Grammar configuration faults and event-loop errors.
//!
//! Ordinary match failures are *not* errors; they travel as
//! [`Failure`](crate::Failure) messages. The types here cover the setup-time
//! mistakes that must fail loudly instead.

use thiserror::Error;

/// A mistake in how a grammar was put together.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A rule was matched but never defined.
    #[error("rule `{0}` is referenced but was never defined")]
    Undefined(String),

    /// [`Namespace::seal`](crate::Namespace::seal) found rules that were
    /// looked up but never defined.
    #[error("rules referenced but never defined: {}", .0.join(", "))]
    Unresolved(Vec<String>),

    /// A rule was matched after the namespace that owns it was dropped.
    #[error("rule `{0}` outlived the namespace that defined it")]
    Detached(String),

    /// A rule name was defined twice.
    #[error("rule `{0}` is already defined")]
    Redefined(String),

    /// The namespace was changed after matching began.
    #[error("cannot {action} rule `{name}`: the grammar is sealed once matching begins")]
    Sealed { name: String, action: &'static str },

    /// A transform could not make sense of the value its rule produced.
    #[error("transform for rule `{rule}` failed: {source}")]
    Transform {
        rule: String,
        #[source]
        source: TransformError,
    },
}

/// Raised by a semantic transform that received a value it cannot rewrite.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransformError {
    message: String,
}

impl TransformError {
    /// Create a transform error with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        TransformError {
            message: message.into(),
        }
    }

    /// The message given at construction.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Why an [`EventLoop::run`](crate::EventLoop::run) stopped early.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RunError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error("event loop exceeded its dispatch limit of {limit} messages")]
    DispatchLimit { limit: u64 },
}
