//! Token grammar for Humus.
//!
//! A [`Lexer`] owns the character-level grammar. It can match any of its
//! rules directly (`tokens` reads a whole source into a token list) or serve
//! as the lower layer of the syntax grammar through [`Lexer::stream`], a
//! derived stream whose elements are [`Token`]s.
//!
//! Patterns borrow their rules from the lexer's namespace, so a stream is
//! only usable while the lexer that made it is alive.

mod grammar;
mod reduce;

use humus_diagnostic::{failure_diagnostic, run_error_diagnostic, Diagnostic, ErrorCode};
use humus_ir::{Token, Value};
use humus_peg::{
    input, EventLoopConfig, Failure, GrammarError, Namespace, Pattern, Position, RunError, Stream,
};
use thiserror::Error;
use tracing::debug;

/// A token and where it starts.
///
/// `position.offset` is the token's index in the stream; `row` and `col`
/// locate its first character in the source.
#[derive(Clone, Debug, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub position: Position,
}

#[derive(Clone, Debug, Error)]
pub enum LexError {
    /// The source has text no token rule accepts.
    #[error("{0}")]
    Stalled(Failure<Value>),

    #[error(transparent)]
    Halted(#[from] RunError),

    /// A lexeme reduced to something other than a token.
    #[error("token grammar produced {found} at {position}")]
    Unreduced { position: Position, found: String },
}

impl LexError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            LexError::Stalled(failure) => failure_diagnostic(ErrorCode::E0001, failure)
                .with_note("no token can start here"),
            LexError::Halted(error) => run_error_diagnostic(error),
            LexError::Unreduced { position, .. } => Diagnostic::error(ErrorCode::E9001)
                .with_message(self.to_string())
                .with_label(*position, 1, "unreduced lexeme"),
        }
    }
}

/// The Humus token grammar with its reductions installed.
#[derive(Debug)]
pub struct Lexer {
    grammar: Namespace<Value>,
    config: EventLoopConfig,
}

impl Lexer {
    pub fn new() -> Result<Self, GrammarError> {
        let mut grammar = Namespace::new();
        grammar::define(&mut grammar)?;
        reduce::install(&mut grammar)?;
        grammar.seal()?;
        debug!(rules = grammar.names().len(), "token grammar ready");
        Ok(Lexer {
            grammar,
            config: EventLoopConfig::default(),
        })
    }

    #[must_use]
    pub fn with_config(mut self, config: EventLoopConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> EventLoopConfig {
        self.config
    }

    pub fn grammar(&self) -> &Namespace<Value> {
        &self.grammar
    }

    /// Pattern for one of the token rules, e.g. `"tokens"` or `"number"`.
    pub fn rule(&self, name: &str) -> Pattern<Value> {
        self.grammar.lookup(name)
    }

    /// Derived stream of tokens over `source`.
    ///
    /// Whitespace and comments before each token are skipped, so token
    /// positions point at the token text itself. Trailing trivia ends the
    /// stream; any other unreadable text ends it with a stall.
    pub fn stream(&self, source: &str) -> Stream<Value> {
        input::from_peg_skipping(
            input::from_str(source),
            Some(self.grammar.lookup("_")),
            self.grammar.lookup("lexeme"),
        )
    }

    /// Read all of `source` into tokens.
    pub fn tokenize(&self, source: &str) -> Result<Vec<SpannedToken>, LexError> {
        let cursors = input::collect(&self.stream(source), self.config)?;
        let mut tokens = Vec::with_capacity(cursors.len());
        for cursor in cursors {
            if let Some(stall) = cursor.stall() {
                return Err(LexError::Stalled(stall.clone()));
            }
            let Some(value) = cursor.token() else {
                break;
            };
            match value {
                Value::Token(token) => tokens.push(SpannedToken {
                    token: token.clone(),
                    position: cursor.position(),
                }),
                other => {
                    return Err(LexError::Unreduced {
                        position: cursor.position(),
                        found: other.to_string(),
                    })
                }
            }
        }
        debug!(tokens = tokens.len(), "tokenized");
        Ok(tokens)
    }
}
