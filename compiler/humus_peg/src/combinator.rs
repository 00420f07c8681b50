//! The grammar algebra.
//!
//! A [`Pattern`] is a shared handle to one [`Combinator`] node. Every node is
//! an actor that accepts a [`Request`] and answers it exactly once. Composite
//! nodes never call their children directly; they send them requests whose
//! `ok`/`fail` continuations are small frame actors carrying the state of the
//! match in progress.
//!
//! | constructor | consumes | value |
//! |---|---|---|
//! | [`terminal`] | one token equal to the given value | the token |
//! | [`predicate`] | one token passing a test | the token |
//! | [`any`] | one token | the token |
//! | [`end`] | nothing, only at end of input | nothing |
//! | [`sequence`] | each child in turn | list of child values |
//! | [`choice`] | the first child that matches | that child's value |
//! | [`zero_or_more`] / [`one_or_more`] | the child, repeatedly | list |
//! | [`optional`] | the child, if it matches | list of zero or one |
//! | [`not`] | nothing, only if the child fails | nothing |

use std::borrow::Cow;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::actor::{Actor, Behavior, EventLoop};
use crate::cursor::Cursor;
use crate::namespace::RuleRef;
use crate::protocol::{Expected, Failure, Request, Success};
use crate::trail::Trail;
use crate::value::MatchValue;

/// Token test used by [`predicate`].
pub type TokenTest<V> = dyn Fn(&V) -> bool;

/// One node of a grammar.
pub enum Combinator<V: 'static> {
    Terminal(V),
    Predicate {
        label: Cow<'static, str>,
        test: Box<TokenTest<V>>,
    },
    Any,
    End,
    Sequence(Rc<[Pattern<V>]>),
    Choice(Rc<[Pattern<V>]>),
    ZeroOrMore(Pattern<V>),
    OneOrMore(Pattern<V>),
    Optional(Pattern<V>),
    Not(Pattern<V>),
    /// Late-bound reference to a namespace rule.
    Rule(RuleRef<V>),
    /// Any other actor that speaks the match protocol.
    Actor(Actor<Request<V>>),
}

/// Shared handle to a grammar node. Cloning is cheap.
pub struct Pattern<V: 'static>(Rc<Combinator<V>>);

impl<V: MatchValue> Pattern<V> {
    pub fn new(combinator: Combinator<V>) -> Self {
        Pattern(Rc::new(combinator))
    }

    /// Wrap an actor that already implements the match protocol.
    pub fn from_actor(actor: Actor<Request<V>>) -> Self {
        Self::new(Combinator::Actor(actor))
    }

    pub fn combinator(&self) -> &Combinator<V> {
        &self.0
    }

    /// Address of this pattern as an actor.
    pub fn actor(&self) -> Actor<Request<V>> {
        let behavior: Rc<dyn Behavior<Request<V>>> = self.0.clone();
        Actor::from_rc(behavior)
    }

    /// Queue `request` for this pattern.
    pub fn send(&self, sponsor: &mut EventLoop, request: Request<V>) {
        sponsor.send(&self.actor(), request);
    }
}

impl<V: 'static> Clone for Pattern<V> {
    fn clone(&self) -> Self {
        Pattern(Rc::clone(&self.0))
    }
}

impl<V: MatchValue> Behavior<Request<V>> for Combinator<V> {
    fn receive(&self, sponsor: &mut EventLoop, request: Request<V>) {
        match self {
            Combinator::Terminal(expected) => {
                if request.input.token() == Some(expected) {
                    consume(sponsor, request);
                } else {
                    reject(sponsor, request, Expected::Token(expected.clone()));
                }
            }
            Combinator::Predicate { label, test } => {
                if request.input.token().is_some_and(|token| test(token)) {
                    consume(sponsor, request);
                } else {
                    reject(sponsor, request, Expected::Label(label.clone()));
                }
            }
            Combinator::Any => {
                if request.input.is_end() {
                    reject(sponsor, request, Expected::AnyToken);
                } else {
                    consume(sponsor, request);
                }
            }
            Combinator::End => {
                if request.input.is_end() {
                    let Request { input, ok, .. } = request;
                    sponsor.send(&ok, empty_success(input));
                } else {
                    reject(sponsor, request, Expected::EndOfInput);
                }
            }
            Combinator::Sequence(items) => {
                let Request { input, ok, fail } = request;
                let frame = Rc::new(SequenceFrame {
                    items: Rc::clone(items),
                    start: input.clone(),
                    ok,
                    fail,
                });
                frame.step(sponsor, 0, input, Trail::new());
            }
            Combinator::Choice(items) => {
                let Request { input, ok, fail } = request;
                let frame = Rc::new(ChoiceFrame {
                    items: Rc::clone(items),
                    input,
                    ok,
                    fail,
                });
                frame.attempt(sponsor, 0, None);
            }
            Combinator::ZeroOrMore(body) => repeat(sponsor, body, 0, request),
            Combinator::OneOrMore(body) => repeat(sponsor, body, 1, request),
            Combinator::Optional(body) => {
                let Request { input, ok, .. } = request;
                let found = {
                    let ok = ok.clone();
                    Actor::from_fn(move |sponsor: &mut EventLoop, success: Success<V>| {
                        let Success { start, end, value } = success;
                        let value = V::list(vec![value]);
                        sponsor.send(&ok, Success { start, end, value });
                    })
                };
                let here = input.clone();
                let missing = Actor::from_fn(move |sponsor: &mut EventLoop, _: Failure<V>| {
                    let success = Success {
                        start: here.clone(),
                        end: here.clone(),
                        value: V::list(Vec::new()),
                    };
                    sponsor.send(&ok, success);
                });
                body.send(sponsor, Request::new(input, found, missing));
            }
            Combinator::Not(body) => {
                let Request { input, ok, fail } = request;
                let here = input.clone();
                let matched = Actor::from_fn(move |sponsor: &mut EventLoop, _: Success<V>| {
                    sponsor.send(&fail, Failure::unexpected(here.clone()));
                });
                let here = input.clone();
                let absent = Actor::from_fn(move |sponsor: &mut EventLoop, _: Failure<V>| {
                    sponsor.send(&ok, empty_success(here.clone()));
                });
                body.send(sponsor, Request::new(input, matched, absent));
            }
            Combinator::Rule(rule) => rule.dispatch(sponsor, request),
            Combinator::Actor(actor) => sponsor.send(actor, request),
        }
    }
}

fn empty_success<V: MatchValue>(at: Cursor<V>) -> Success<V> {
    Success {
        start: at.clone(),
        end: at,
        value: V::nothing(),
    }
}

fn reject<V: MatchValue>(sponsor: &mut EventLoop, request: Request<V>, expected: Expected<V>) {
    let Request { input, fail, .. } = request;
    sponsor.send(&fail, Failure::new(input, expected));
}

/// Take the current token and answer with the cursor after it.
fn consume<V: MatchValue>(sponsor: &mut EventLoop, request: Request<V>) {
    let Request { input, ok, .. } = request;
    let Some(token) = input.token().cloned() else {
        return;
    };
    let start = input.clone();
    let customer = Actor::from_fn(move |sponsor: &mut EventLoop, end: Cursor<V>| {
        let success = Success {
            start: start.clone(),
            end,
            value: token.clone(),
        };
        sponsor.send(&ok, success);
    });
    input.advance(sponsor, customer);
}

struct SequenceFrame<V: 'static> {
    items: Rc<[Pattern<V>]>,
    start: Cursor<V>,
    ok: Actor<Success<V>>,
    fail: Actor<Failure<V>>,
}

impl<V: MatchValue> SequenceFrame<V> {
    fn step(self: Rc<Self>, sponsor: &mut EventLoop, index: usize, at: Cursor<V>, values: Trail<V>) {
        let Some(item) = self.items.get(index).cloned() else {
            let success = Success {
                start: self.start.clone(),
                end: at,
                value: V::list(values.into_vec()),
            };
            sponsor.send(&self.ok, success);
            return;
        };
        let frame = Rc::clone(&self);
        // Each request is answered once, so the trail is taken out rather
        // than cloned and its links stay unshared.
        let slot = Cell::new(values);
        let ok = Actor::from_fn(move |sponsor: &mut EventLoop, success: Success<V>| {
            let values = slot.take().push(success.value);
            Rc::clone(&frame).step(sponsor, index + 1, success.end, values);
        });
        let frame = self;
        let fail = Actor::from_fn(move |sponsor: &mut EventLoop, failure: Failure<V>| {
            sponsor.send(&frame.fail, failure.at(frame.start.clone()));
        });
        item.send(sponsor, Request::new(at, ok, fail));
    }
}

struct ChoiceFrame<V: 'static> {
    items: Rc<[Pattern<V>]>,
    input: Cursor<V>,
    ok: Actor<Success<V>>,
    fail: Actor<Failure<V>>,
}

impl<V: MatchValue> ChoiceFrame<V> {
    fn attempt(self: Rc<Self>, sponsor: &mut EventLoop, index: usize, failed: Option<Failure<V>>) {
        let Some(item) = self.items.get(index).cloned() else {
            let failure = match failed {
                Some(failure) => failure.at(self.input.clone()),
                None => Failure::unexpected(self.input.clone()),
            };
            sponsor.send(&self.fail, failure);
            return;
        };
        let frame = Rc::clone(&self);
        let fail = Actor::from_fn(move |sponsor: &mut EventLoop, failure: Failure<V>| {
            let merged = match &failed {
                Some(earlier) => earlier.clone().merge(failure),
                None => failure,
            };
            Rc::clone(&frame).attempt(sponsor, index + 1, Some(merged));
        });
        item.send(sponsor, Request::new(self.input.clone(), self.ok.clone(), fail));
    }
}

struct RepeatFrame<V: 'static> {
    body: Pattern<V>,
    start: Cursor<V>,
    min: usize,
    ok: Actor<Success<V>>,
    fail: Actor<Failure<V>>,
}

fn repeat<V: MatchValue>(sponsor: &mut EventLoop, body: &Pattern<V>, min: usize, request: Request<V>) {
    let Request { input, ok, fail } = request;
    let frame = Rc::new(RepeatFrame {
        body: body.clone(),
        start: input.clone(),
        min,
        ok,
        fail,
    });
    frame.iterate(sponsor, input, Trail::new());
}

impl<V: MatchValue> RepeatFrame<V> {
    fn iterate(self: Rc<Self>, sponsor: &mut EventLoop, at: Cursor<V>, values: Trail<V>) {
        let frame = Rc::clone(&self);
        // Exactly one of `ok` and `fail` answers; whichever does takes the trail.
        let slot = Rc::new(Cell::new(values));
        let collected = Rc::clone(&slot);
        let ok = Actor::from_fn(move |sponsor: &mut EventLoop, success: Success<V>| {
            let values = collected.take();
            if success.consumed() == 0 {
                // A nullable body would match here forever.
                let values = if values.len() < frame.min {
                    values.push(success.value)
                } else {
                    values
                };
                frame.finish(sponsor, success.end, values);
            } else {
                Rc::clone(&frame).iterate(sponsor, success.end, values.push(success.value));
            }
        });
        let frame = Rc::clone(&self);
        let here = at.clone();
        let fail = Actor::from_fn(move |sponsor: &mut EventLoop, failure: Failure<V>| {
            let values = slot.take();
            if values.len() < frame.min {
                sponsor.send(&frame.fail, failure.at(frame.start.clone()));
            } else {
                frame.finish(sponsor, here.clone(), values);
            }
        });
        self.body.send(sponsor, Request::new(at, ok, fail));
    }

    fn finish(&self, sponsor: &mut EventLoop, end: Cursor<V>, values: Trail<V>) {
        let success = Success {
            start: self.start.clone(),
            end,
            value: V::list(values.into_vec()),
        };
        sponsor.send(&self.ok, success);
    }
}

/// Match exactly the token `value`.
pub fn terminal<V: MatchValue>(value: V) -> Pattern<V> {
    Pattern::new(Combinator::Terminal(value))
}

/// Match one token for which `test` returns `true`.
pub fn predicate<V, F>(test: F) -> Pattern<V>
where
    V: MatchValue,
    F: Fn(&V) -> bool + 'static,
{
    predicate_labeled("matching token", test)
}

/// Like [`predicate`], naming what the test accepts for failure reports.
pub fn predicate_labeled<V, F>(label: impl Into<Cow<'static, str>>, test: F) -> Pattern<V>
where
    V: MatchValue,
    F: Fn(&V) -> bool + 'static,
{
    Pattern::new(Combinator::Predicate {
        label: label.into(),
        test: Box::new(test),
    })
}

/// Match any single token.
pub fn any<V: MatchValue>() -> Pattern<V> {
    Pattern::new(Combinator::Any)
}

/// Match only at end of input.
pub fn end<V: MatchValue>() -> Pattern<V> {
    Pattern::new(Combinator::End)
}

pub fn sequence<V: MatchValue>(items: impl IntoIterator<Item = Pattern<V>>) -> Pattern<V> {
    Pattern::new(Combinator::Sequence(items.into_iter().collect()))
}

/// Ordered choice: alternatives are tried one after another, in order.
pub fn choice<V: MatchValue>(items: impl IntoIterator<Item = Pattern<V>>) -> Pattern<V> {
    Pattern::new(Combinator::Choice(items.into_iter().collect()))
}

pub fn zero_or_more<V: MatchValue>(body: Pattern<V>) -> Pattern<V> {
    Pattern::new(Combinator::ZeroOrMore(body))
}

pub fn one_or_more<V: MatchValue>(body: Pattern<V>) -> Pattern<V> {
    Pattern::new(Combinator::OneOrMore(body))
}

pub fn optional<V: MatchValue>(body: Pattern<V>) -> Pattern<V> {
    Pattern::new(Combinator::Optional(body))
}

/// Negative lookahead.
pub fn not<V: MatchValue>(body: Pattern<V>) -> Pattern<V> {
    Pattern::new(Combinator::Not(body))
}

impl<V: fmt::Debug + 'static> fmt::Debug for Combinator<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::Terminal(value) => f.debug_tuple("Terminal").field(value).finish(),
            Combinator::Predicate { label, .. } => f.debug_tuple("Predicate").field(label).finish(),
            Combinator::Any => f.write_str("Any"),
            Combinator::End => f.write_str("End"),
            Combinator::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Combinator::Choice(items) => f.debug_tuple("Choice").field(items).finish(),
            Combinator::ZeroOrMore(body) => f.debug_tuple("ZeroOrMore").field(body).finish(),
            Combinator::OneOrMore(body) => f.debug_tuple("OneOrMore").field(body).finish(),
            Combinator::Optional(body) => f.debug_tuple("Optional").field(body).finish(),
            Combinator::Not(body) => f.debug_tuple("Not").field(body).finish(),
            Combinator::Rule(rule) => f.debug_tuple("Rule").field(&rule.name()).finish(),
            Combinator::Actor(actor) => f.debug_tuple("Actor").field(actor).finish(),
        }
    }
}

impl<V: fmt::Debug + 'static> fmt::Debug for Pattern<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
