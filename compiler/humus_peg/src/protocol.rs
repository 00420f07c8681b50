//! Messages exchanged by every pattern actor.
//!
//! A pattern receives one [`Request`] and answers it exactly once, sending a
//! [`Success`] to `ok` or a [`Failure`] to `fail`.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use smallvec::{smallvec, SmallVec};

use crate::actor::Actor;
use crate::cursor::{Cursor, Span};
use crate::value::MatchValue;

/// Ask a pattern to match at `input`.
pub struct Request<V: 'static> {
    pub input: Cursor<V>,
    pub ok: Actor<Success<V>>,
    pub fail: Actor<Failure<V>>,
}

impl<V: 'static> Request<V> {
    pub fn new(input: Cursor<V>, ok: Actor<Success<V>>, fail: Actor<Failure<V>>) -> Self {
        Request { input, ok, fail }
    }
}

impl<V: 'static> Clone for Request<V> {
    fn clone(&self) -> Self {
        Request {
            input: self.input.clone(),
            ok: self.ok.clone(),
            fail: self.fail.clone(),
        }
    }
}

/// A successful match: `start..end` was consumed and produced `value`.
#[derive(Clone, Debug)]
pub struct Success<V: 'static> {
    pub start: Cursor<V>,
    pub end: Cursor<V>,
    pub value: V,
}

impl<V: 'static> Success<V> {
    pub fn span(&self) -> Span {
        Span::new(self.start.position(), self.end.position())
    }

    /// Number of tokens consumed.
    pub fn consumed(&self) -> usize {
        self.end.offset().saturating_sub(self.start.offset())
    }
}

/// Something a failing pattern was looking for.
#[derive(Clone, Debug, PartialEq)]
pub enum Expected<V> {
    Token(V),
    Label(Cow<'static, str>),
    Rule(Rc<str>),
    AnyToken,
    EndOfInput,
}

impl<V: MatchValue> Expected<V> {
    pub fn describe(&self) -> String {
        match self {
            Expected::Token(v) => v.describe(),
            Expected::Label(label) => label.to_string(),
            Expected::Rule(name) => name.to_string(),
            Expected::AnyToken => "any token".to_owned(),
            Expected::EndOfInput => "end of input".to_owned(),
        }
    }
}

type ExpectedSet<V> = SmallVec<[Expected<V>; 2]>;

/// A failed match.
///
/// `position` is always where the failing pattern started. `furthest` is the
/// deepest cursor any primitive beneath it failed at, with `expected` listing
/// what would have been accepted there.
#[derive(Clone)]
pub struct Failure<V: 'static> {
    pub position: Cursor<V>,
    pub furthest: Cursor<V>,
    pub expected: ExpectedSet<V>,
}

impl<V: MatchValue> Failure<V> {
    /// Failure of a primitive at `position`.
    pub fn new(position: Cursor<V>, expected: Expected<V>) -> Self {
        Failure {
            furthest: position.clone(),
            position,
            expected: smallvec![expected],
        }
    }

    /// Failure without any recorded expectation.
    pub fn unexpected(position: Cursor<V>) -> Self {
        Failure {
            furthest: position.clone(),
            position,
            expected: SmallVec::new(),
        }
    }

    /// Move the reported position back to `start`, keeping the furthest
    /// point reached.
    #[must_use]
    pub fn at(mut self, start: Cursor<V>) -> Self {
        self.position = start;
        self
    }

    /// Combine with another failure of the same caller: the further one
    /// wins, and expectations at the same furthest offset are unioned.
    #[must_use]
    pub fn merge(mut self, other: Failure<V>) -> Self {
        let (ours, theirs) = (self.furthest.offset(), other.furthest.offset());
        if theirs > ours {
            self.furthest = other.furthest;
            self.expected = other.expected;
        } else if theirs == ours {
            for expected in other.expected {
                if !self.expected.contains(&expected) {
                    self.expected.push(expected);
                }
            }
        }
        self
    }

    /// A rule that failed without getting past its own start is reported by
    /// name instead of by the primitives inside it.
    #[must_use]
    pub fn relabel(mut self, rule: &Rc<str>) -> Self {
        if self.furthest.offset() == self.position.offset() {
            self.expected = smallvec![Expected::Rule(Rc::clone(rule))];
        }
        self
    }

    /// "expected a, b or c"
    pub fn expected_description(&self) -> String {
        let mut items: Vec<String> = self.expected.iter().map(Expected::describe).collect();
        items.dedup();
        match items.len() {
            0 => "unexpected input".to_owned(),
            1 => format!("expected {}", items[0]),
            n => {
                let head = items[..n - 1].join(", ");
                format!("expected {head} or {}", items[n - 1])
            }
        }
    }

    /// What was found at the furthest failure point.
    pub fn found(&self) -> String {
        match self.furthest.token() {
            Some(token) => token.describe(),
            None => "end of input".to_owned(),
        }
    }
}

impl<V: fmt::Debug + 'static> fmt::Debug for Failure<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("position", &self.position.position())
            .field("furthest", &self.furthest.position())
            .field("expected", &self.expected)
            .finish()
    }
}

impl<V: MatchValue> fmt::Display for Failure<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}, found {}",
            self.expected_description(),
            self.furthest.position(),
            self.found()
        )
    }
}

#[cfg(test)]
mod tests;
