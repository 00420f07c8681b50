//! Actor-based Parsing Expression Grammar engine.
//!
//! Grammars are built from [`Pattern`]s and named rules in a [`Namespace`].
//! Matching runs on a single-threaded [`EventLoop`]: each pattern is an actor
//! that receives a [`Request`] and answers with a [`Success`] or a
//! [`Failure`]. Calls between patterns are queued messages, so grammar depth
//! and repetition length are bounded by memory, not by the native stack.
//!
//! Inputs are [`Stream`]s of [`Cursor`]s. A stream can be built over a string,
//! over a list of values, or over another grammar ([`input::from_peg`]), which
//! is how a token grammar feeds a syntax grammar.
//!
//! ```text
//! let mut ns = Namespace::<Value>::new();
//! ns.define("digits", one_or_more(predicate(|v: &Value| v.as_char().is_some_and(|c| c.is_ascii_digit()))))?;
//! let parsed = Parser::new(ns.lookup("digits")).parse(&input::from_str("42"))?;
//! ```

mod actor;
mod combinator;
mod cursor;
mod driver;
mod error;
pub mod input;
mod namespace;
mod protocol;
mod stack;
mod trail;
mod value;

pub use actor::{Actor, Behavior, EventLoop, EventLoopConfig, RunStats};
pub use combinator::{
    any, choice, end, not, one_or_more, optional, predicate, predicate_labeled, sequence,
    terminal, zero_or_more, Combinator, Pattern, TokenTest,
};
pub use cursor::{Cursor, Position, Span, Stream};
pub use driver::{start, ParseError, Parser};
pub use error::{GrammarError, RunError, TransformError};
pub use namespace::{Namespace, RuleRef, TransformFn};
pub use protocol::{Expected, Failure, Request, Success};
pub use stack::ensure_sufficient_stack;
pub use value::{MatchValue, Value};
