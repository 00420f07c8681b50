//! Immutable positions over an input stream.
//!
//! A [`Cursor`] is a snapshot: the token at some offset plus the stream that
//! yields the next cursor. Advancing never changes a cursor; it asks the
//! stream for a new one. Holding on to an old cursor is how combinators
//! backtrack.

use std::fmt;
use std::rc::Rc;

use crate::actor::{Actor, EventLoop};
use crate::protocol::Failure;

/// Actor answering a customer with the cursor it stands for.
pub type Stream<V> = Actor<Actor<Cursor<V>>>;

/// Offset plus derived row and column, all zero-based.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub offset: usize,
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Start of any input.
    pub const START: Position = Position {
        offset: 0,
        row: 0,
        col: 0,
    };

    #[inline]
    pub const fn new(offset: usize, row: usize, col: usize) -> Self {
        Position { offset, row, col }
    }

    /// Position following character `c`. Only `'\n'` starts a new row.
    #[inline]
    #[must_use]
    pub const fn after(self, c: char) -> Self {
        if c == '\n' {
            Position {
                offset: self.offset + 1,
                row: self.row + 1,
                col: 0,
            }
        } else {
            Position {
                offset: self.offset + 1,
                row: self.row,
                col: self.col + 1,
            }
        }
    }
}

/// Renders as one-based `line:column`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.col + 1)
    }
}

/// Consumed region between two positions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Number of tokens covered.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

struct Head<V: 'static> {
    token: V,
    rest: Stream<V>,
}

/// Snapshot of a stream at one position.
pub struct Cursor<V: 'static> {
    position: Position,
    head: Option<Rc<Head<V>>>,
    stall: Option<Rc<Failure<V>>>,
}

impl<V: 'static> Cursor<V> {
    /// Cursor at `position` holding `token`; `rest` yields the next cursor.
    pub fn new(position: Position, token: V, rest: Stream<V>) -> Self {
        Cursor {
            position,
            head: Some(Rc::new(Head { token, rest })),
            stall: None,
        }
    }

    /// End-of-input cursor.
    pub fn end(position: Position) -> Self {
        Cursor {
            position,
            head: None,
            stall: None,
        }
    }

    /// End-of-stream cursor for a derived stream whose token pattern failed
    /// before the layer below ran out of input.
    pub fn stalled(position: Position, failure: Failure<V>) -> Self {
        Cursor {
            position,
            head: None,
            stall: Some(Rc::new(failure)),
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.position.offset
    }

    /// Token at this position, `None` at end of input.
    #[inline]
    pub fn token(&self) -> Option<&V> {
        self.head.as_deref().map(|head| &head.token)
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.head.is_none()
    }

    /// The lower-layer failure that ended a derived stream early, if any.
    pub fn stall(&self) -> Option<&Failure<V>> {
        self.stall.as_deref()
    }

    /// Ask the stream for the following cursor; it is delivered to
    /// `customer`. Returns `false` (sending nothing) at end of input.
    pub fn advance(&self, sponsor: &mut EventLoop, customer: Actor<Cursor<V>>) -> bool {
        match &self.head {
            Some(head) => {
                sponsor.send(&head.rest, customer);
                true
            }
            None => false,
        }
    }
}

impl<V: 'static> Clone for Cursor<V> {
    fn clone(&self) -> Self {
        Cursor {
            position: self.position,
            head: self.head.clone(),
            stall: self.stall.clone(),
        }
    }
}

impl<V: fmt::Debug + 'static> fmt::Debug for Cursor<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Cursor");
        s.field("position", &self.position).field("token", &self.token());
        if self.stall.is_some() {
            s.field("stalled", &true);
        }
        s.finish()
    }
}

#[cfg(test)]
mod tests;
