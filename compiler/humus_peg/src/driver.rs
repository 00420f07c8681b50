//! Running a pattern against an input.
//!
//! [`start`] is the asynchronous form: it returns a matcher actor to which a
//! stream (or anything else) delivers the first cursor. [`Parser`] wraps that
//! in an event loop and hands back the outcome directly.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use crate::actor::{Actor, EventLoop, EventLoopConfig};
use crate::combinator::Pattern;
use crate::cursor::{Cursor, Stream};
use crate::error::RunError;
use crate::protocol::{Failure, Request, Success};
use crate::value::MatchValue;

/// One-shot matcher: on receiving a cursor it matches `pattern` there and
/// forwards the outcome to `ok` or `fail`.
///
/// Sending the matcher to a stream starts the parse at the stream's first
/// cursor.
pub fn start<V: MatchValue>(
    pattern: Pattern<V>,
    ok: Actor<Success<V>>,
    fail: Actor<Failure<V>>,
) -> Actor<Cursor<V>> {
    Actor::from_fn(move |sponsor: &mut EventLoop, input: Cursor<V>| {
        pattern.send(sponsor, Request::new(input, ok.clone(), fail.clone()));
    })
}

/// Why [`Parser::parse`] produced no match.
#[derive(Clone, Debug, Error)]
pub enum ParseError<V: MatchValue> {
    /// The pattern did not match.
    #[error("{0}")]
    Failed(Failure<V>),

    /// A configuration fault or the dispatch limit stopped the event loop.
    #[error(transparent)]
    Halted(#[from] RunError),

    /// The event loop went idle without the pattern answering.
    #[error("the event loop went idle before the match finished")]
    Incomplete,
}

type Outcome<V> = Rc<RefCell<Option<Result<Success<V>, Failure<V>>>>>;

/// Synchronous front end to [`start`].
#[derive(Clone, Debug)]
pub struct Parser<V: 'static> {
    pattern: Pattern<V>,
    config: EventLoopConfig,
}

impl<V: MatchValue> Parser<V> {
    pub fn new(pattern: Pattern<V>) -> Self {
        Parser {
            pattern,
            config: EventLoopConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EventLoopConfig) -> Self {
        self.config = config;
        self
    }

    /// Match at the first cursor of `stream`.
    pub fn parse(&self, stream: &Stream<V>) -> Result<Success<V>, ParseError<V>> {
        self.run(|sponsor, matcher| sponsor.send(stream, matcher))
    }

    /// Match at `cursor`.
    pub fn parse_at(&self, cursor: Cursor<V>) -> Result<Success<V>, ParseError<V>> {
        self.run(|sponsor, matcher| sponsor.send(&matcher, cursor))
    }

    fn run<F>(&self, begin: F) -> Result<Success<V>, ParseError<V>>
    where
        F: FnOnce(&mut EventLoop, Actor<Cursor<V>>),
    {
        let outcome: Outcome<V> = Rc::new(RefCell::new(None));
        let ok = {
            let outcome = Rc::clone(&outcome);
            Actor::from_fn(move |_: &mut EventLoop, success: Success<V>| {
                *outcome.borrow_mut() = Some(Ok(success));
            })
        };
        let fail = {
            let outcome = Rc::clone(&outcome);
            Actor::from_fn(move |_: &mut EventLoop, failure: Failure<V>| {
                *outcome.borrow_mut() = Some(Err(failure));
            })
        };

        let mut sponsor = EventLoop::with_config(self.config);
        begin(&mut sponsor, start(self.pattern.clone(), ok, fail));
        let stats = sponsor.run()?;

        let result = outcome.borrow_mut().take();
        match result {
            Some(Ok(success)) => {
                debug!(dispatched = stats.dispatched, span = %success.span(), "match succeeded");
                Ok(success)
            }
            Some(Err(failure)) => {
                debug!(dispatched = stats.dispatched, furthest = %failure.furthest.position(), "match failed");
                Err(ParseError::Failed(failure))
            }
            None => Err(ParseError::Incomplete),
        }
    }
}
