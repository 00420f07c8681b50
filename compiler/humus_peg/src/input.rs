//! Input stream constructors.
//!
//! All streams speak the same contract: send one a customer and it replies
//! with the [`Cursor`] it stands for. Consumers cannot tell a character
//! stream from a stream of tokens produced by another grammar.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::actor::{Actor, Behavior, EventLoop, EventLoopConfig};
use crate::combinator::Pattern;
use crate::cursor::{Cursor, Position, Stream};
use crate::error::RunError;
use crate::protocol::{Failure, Request, Success};
use crate::stack::ensure_sufficient_stack;
use crate::value::MatchValue;

struct CharSource {
    chars: Rc<[char]>,
    index: usize,
    position: Position,
}

impl<V: MatchValue + From<char>> Behavior<Actor<Cursor<V>>> for CharSource {
    fn receive(&self, sponsor: &mut EventLoop, customer: Actor<Cursor<V>>) {
        let cursor = match self.chars.get(self.index) {
            Some(&c) => {
                let rest = Actor::new(CharSource {
                    chars: Rc::clone(&self.chars),
                    index: self.index + 1,
                    position: self.position.after(c),
                });
                Cursor::new(self.position, V::from(c), rest)
            }
            None => Cursor::end(self.position),
        };
        sponsor.send(&customer, cursor);
    }
}

/// Character stream over `text`.
pub fn from_str<V: MatchValue + From<char>>(text: &str) -> Stream<V> {
    Actor::new(CharSource {
        chars: text.chars().collect(),
        index: 0,
        position: Position::START,
    })
}

struct ValueSource<V: 'static> {
    values: Rc<[V]>,
    index: usize,
}

impl<V: MatchValue> Behavior<Actor<Cursor<V>>> for ValueSource<V> {
    fn receive(&self, sponsor: &mut EventLoop, customer: Actor<Cursor<V>>) {
        let position = Position::new(self.index, 0, self.index);
        let cursor = match self.values.get(self.index) {
            Some(value) => {
                let rest = Actor::new(ValueSource {
                    values: Rc::clone(&self.values),
                    index: self.index + 1,
                });
                Cursor::new(position, value.clone(), rest)
            }
            None => Cursor::end(position),
        };
        sponsor.send(&customer, cursor);
    }
}

/// Stream over already materialized tokens, such as the list value of a
/// successful match. Token `i` sits at offset and column `i` of row 0.
pub fn from_values<V: MatchValue>(values: impl IntoIterator<Item = V>) -> Stream<V> {
    Actor::new(ValueSource {
        values: values.into_iter().collect(),
        index: 0,
    })
}

/// Stream that always answers with `cursor`.
pub fn from_cursor<V: MatchValue>(cursor: Cursor<V>) -> Stream<V> {
    Actor::from_fn(move |sponsor: &mut EventLoop, customer: Actor<Cursor<V>>| {
        sponsor.send(&customer, cursor.clone());
    })
}

enum Memo<V: 'static> {
    Idle,
    Pending(Vec<Actor<Cursor<V>>>),
    Ready(Cursor<V>),
}

/// Memo slot of one derived-stream position.
///
/// A ready cursor owns the next position's source, which owns the one after,
/// so dropping the first memo of a long stream drops the whole chain.
struct MemoCell<V: 'static>(RefCell<Memo<V>>);

impl<V: 'static> Drop for MemoCell<V> {
    fn drop(&mut self) {
        let memo = std::mem::replace(self.0.get_mut(), Memo::Idle);
        ensure_sufficient_stack(move || drop(memo));
    }
}

enum Base<V: 'static> {
    Stream(Stream<V>),
    Cursor(Cursor<V>),
}

struct TokenState<V: 'static> {
    base: Base<V>,
    skip: Option<Pattern<V>>,
    pattern: Pattern<V>,
    index: usize,
    memo: MemoCell<V>,
}

/// Derived stream position; answers with the cursor of token `index`.
struct TokenSource<V: 'static>(Rc<TokenState<V>>);

impl<V: MatchValue> TokenSource<V> {
    fn actor(state: TokenState<V>) -> Stream<V> {
        Actor::new(TokenSource(Rc::new(state)))
    }
}

impl<V: MatchValue> Behavior<Actor<Cursor<V>>> for TokenSource<V> {
    fn receive(&self, sponsor: &mut EventLoop, customer: Actor<Cursor<V>>) {
        let state = &self.0;
        {
            let mut memo = state.memo.0.borrow_mut();
            if let Memo::Ready(cursor) = &*memo {
                let cursor = cursor.clone();
                drop(memo);
                sponsor.send(&customer, cursor);
                return;
            }
            if let Memo::Pending(waiting) = &mut *memo {
                waiting.push(customer);
                return;
            }
            *memo = Memo::Pending(vec![customer]);
        }
        match &state.base {
            Base::Cursor(cursor) => TokenState::skip(state, sponsor, cursor.clone()),
            Base::Stream(stream) => {
                let state = Rc::clone(state);
                let customer = Actor::from_fn(move |sponsor: &mut EventLoop, cursor: Cursor<V>| {
                    TokenState::skip(&state, sponsor, cursor);
                });
                sponsor.send(stream, customer);
            }
        }
    }
}

impl<V: MatchValue> TokenState<V> {
    /// Step over trivia before the token, if a skip pattern is set.
    fn skip(state: &Rc<Self>, sponsor: &mut EventLoop, at: Cursor<V>) {
        let Some(skip) = &state.skip else {
            Self::lex(state, sponsor, at);
            return;
        };
        let after = Rc::clone(state);
        let ok = Actor::from_fn(move |sponsor: &mut EventLoop, success: Success<V>| {
            Self::lex(&after, sponsor, success.end);
        });
        let stay = Rc::clone(state);
        let here = at.clone();
        let fail = Actor::from_fn(move |sponsor: &mut EventLoop, _: Failure<V>| {
            Self::lex(&stay, sponsor, here.clone());
        });
        skip.send(sponsor, Request::new(at, ok, fail));
    }

    fn lex(state: &Rc<Self>, sponsor: &mut EventLoop, at: Cursor<V>) {
        let matched = Rc::clone(state);
        let here = at.clone();
        let ok = Actor::from_fn(move |sponsor: &mut EventLoop, success: Success<V>| {
            let cursor = if success.consumed() == 0 {
                Cursor::end(matched.position(&here))
            } else {
                let position = matched.position(&success.start);
                let rest = TokenSource::actor(TokenState {
                    base: Base::Cursor(success.end),
                    skip: matched.skip.clone(),
                    pattern: matched.pattern.clone(),
                    index: matched.index + 1,
                    memo: MemoCell(RefCell::new(Memo::Idle)),
                });
                Cursor::new(position, success.value, rest)
            };
            matched.resolve(sponsor, cursor);
        });
        let failed = Rc::clone(state);
        let here = at.clone();
        let fail = Actor::from_fn(move |sponsor: &mut EventLoop, failure: Failure<V>| {
            let position = failed.position(&here);
            let cursor = if let Some(lower) = here.stall() {
                Cursor::stalled(position, lower.clone())
            } else if here.is_end() {
                Cursor::end(position)
            } else {
                trace!(at = %here.position(), token = failed.index, "derived stream stalled");
                Cursor::stalled(position, failure)
            };
            failed.resolve(sponsor, cursor);
        });
        state.pattern.send(sponsor, Request::new(at, ok, fail));
    }

    /// Token offset, with the row and column of `below` in the layer below.
    fn position(&self, below: &Cursor<V>) -> Position {
        let below = below.position();
        Position::new(self.index, below.row, below.col)
    }

    fn resolve(&self, sponsor: &mut EventLoop, cursor: Cursor<V>) {
        let previous = std::mem::replace(&mut *self.memo.0.borrow_mut(), Memo::Ready(cursor.clone()));
        if let Memo::Pending(waiting) = previous {
            for customer in waiting {
                sponsor.send(&customer, cursor.clone());
            }
        }
    }
}

/// Derived stream: token `i` is the value of the `i`-th successive match of
/// `pattern` over `source`.
///
/// The stream ends where `pattern` fails at the end of `source` or matches
/// without consuming anything. If `pattern` fails anywhere else, the stream
/// ends early with a stalled cursor carrying that failure.
pub fn from_peg<V: MatchValue>(source: Stream<V>, pattern: Pattern<V>) -> Stream<V> {
    from_peg_skipping(source, None, pattern)
}

/// Like [`from_peg`], first stepping over whatever `skip` matches before
/// each token. Token positions then point past the skipped input.
pub fn from_peg_skipping<V: MatchValue>(
    source: Stream<V>,
    skip: Option<Pattern<V>>,
    pattern: Pattern<V>,
) -> Stream<V> {
    TokenSource::actor(TokenState {
        base: Base::Stream(source),
        skip,
        pattern,
        index: 0,
        memo: MemoCell(RefCell::new(Memo::Idle)),
    })
}

struct Walker<V: 'static> {
    seen: Rc<RefCell<Vec<Cursor<V>>>>,
}

impl<V: MatchValue> Behavior<Cursor<V>> for Walker<V> {
    fn receive(&self, sponsor: &mut EventLoop, cursor: Cursor<V>) {
        self.seen.borrow_mut().push(cursor.clone());
        let next = Actor::new(Walker {
            seen: Rc::clone(&self.seen),
        });
        cursor.advance(sponsor, next);
    }
}

/// Walk `stream` to its end. Returns every cursor in order; the last one is
/// the end cursor.
pub fn collect<V: MatchValue>(
    stream: &Stream<V>,
    config: EventLoopConfig,
) -> Result<Vec<Cursor<V>>, RunError> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut sponsor = EventLoop::with_config(config);
    sponsor.send(
        stream,
        Actor::new(Walker {
            seen: Rc::clone(&seen),
        }),
    );
    sponsor.run()?;
    Ok(seen.take())
}

#[cfg(test)]
mod tests;
