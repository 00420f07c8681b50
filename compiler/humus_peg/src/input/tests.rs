#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::cell::Cell;

use pretty_assertions::assert_eq;

use super::*;
use crate::combinator::{choice, end, one_or_more, predicate_labeled, sequence, terminal, zero_or_more};
use crate::driver::Parser;
use crate::namespace::Namespace;
use crate::value::Value;

fn positions(cursors: &[Cursor<Value>]) -> Vec<(usize, usize, usize)> {
    cursors
        .iter()
        .map(|c| {
            let p = c.position();
            (p.offset, p.row, p.col)
        })
        .collect()
}

fn tokens(cursors: &[Cursor<Value>]) -> Vec<Value> {
    cursors.iter().filter_map(|c| c.token().cloned()).collect()
}

fn class(label: &'static str, test: fn(char) -> bool) -> Pattern<Value> {
    predicate_labeled(label, move |v: &Value| v.as_char().is_some_and(test))
}

/// Words of letters, separated by spaces.
struct Words {
    ns: Namespace<Value>,
}

impl Words {
    fn new() -> Self {
        let mut ns = Namespace::new();
        ns.define("word", one_or_more(class("letter", |c| c.is_ascii_alphabetic())))
            .unwrap();
        ns.transform("word", |_, value: Value, _| Ok(Value::Text(value.flatten_text())))
            .unwrap();
        ns.define("space", zero_or_more(terminal(Value::Char(' '))))
            .unwrap();
        Words { ns }
    }

    fn stream(&self, text: &str) -> Stream<Value> {
        from_peg_skipping(
            from_str(text),
            Some(self.ns.lookup("space")),
            self.ns.lookup("word"),
        )
    }
}

fn text(s: &str) -> Value {
    Value::Text(s.into())
}

#[test]
fn character_positions_track_lines() {
    let cursors = collect(&from_str::<Value>("ab\nc"), EventLoopConfig::default()).unwrap();
    assert_eq!(
        positions(&cursors),
        vec![(0, 0, 0), (1, 0, 1), (2, 0, 2), (3, 1, 0), (4, 1, 1)]
    );
    assert!(cursors[4].is_end());
}

#[test]
fn empty_text_is_a_single_end_cursor() {
    let cursors = collect(&from_str::<Value>(""), EventLoopConfig::default()).unwrap();
    assert_eq!(cursors.len(), 1);
    assert!(cursors[0].is_end());
}

#[test]
fn values_are_indexed_by_offset() {
    let cursors = collect(
        &from_values([text("x"), text("y")]),
        EventLoopConfig::default(),
    )
    .unwrap();
    assert_eq!(positions(&cursors), vec![(0, 0, 0), (1, 0, 1), (2, 0, 2)]);
    assert_eq!(tokens(&cursors), vec![text("x"), text("y")]);
}

#[test]
fn constant_stream_repeats_its_cursor() {
    let cursor = Cursor::<Value>::end(Position::new(9, 2, 3));
    let stream = from_cursor(cursor);
    let cursors = collect(&stream, EventLoopConfig::default()).unwrap();
    assert_eq!(positions(&cursors), vec![(9, 2, 3)]);
}

#[test]
fn derived_stream_yields_one_token_per_match() {
    let words = Words::new();
    let cursors = collect(&words.stream("  ab cd\n"), EventLoopConfig::default()).unwrap();
    assert_eq!(tokens(&cursors), vec![text("ab"), text("cd")]);
    // Token offsets count tokens; rows and columns point past the spaces.
    assert_eq!(positions(&cursors), vec![(0, 0, 2), (1, 0, 5), (2, 0, 7)]);
    // The newline is neither a word nor a space.
    assert!(cursors[2].stall().is_some());
}

#[test]
fn trailing_trivia_ends_the_stream_cleanly() {
    let words = Words::new();
    let cursors = collect(&words.stream("ab   "), EventLoopConfig::default()).unwrap();
    assert_eq!(tokens(&cursors), vec![text("ab")]);
    let last = &cursors[1];
    assert!(last.is_end());
    assert!(last.stall().is_none());
}

#[test]
fn stall_keeps_the_lower_failure() {
    let words = Words::new();
    let cursors = collect(&words.stream("ab 12"), EventLoopConfig::default()).unwrap();
    assert_eq!(tokens(&cursors), vec![text("ab")]);
    let stall = cursors[1].stall().unwrap();
    assert_eq!(stall.furthest.position(), Position::new(3, 0, 3));
    assert_eq!(stall.expected_description(), "expected word");
}

#[test]
fn grammars_layer_over_derived_streams() {
    let words = Words::new();
    let pair = sequence([terminal(text("ab")), terminal(text("cd")), end()]);

    let layered = Parser::new(pair.clone()).parse(&words.stream("ab cd")).unwrap();

    let materialized = collect(&words.stream("ab cd"), EventLoopConfig::default()).unwrap();
    let direct = Parser::new(pair)
        .parse(&from_values(tokens(&materialized)))
        .unwrap();

    assert_eq!(layered.value, direct.value);
    assert_eq!(layered.span().end.offset, direct.span().end.offset);
}

#[test]
fn derived_positions_are_memoized() {
    let words = Words::new();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let word = words.ns.lookup("word");
    let counting = Pattern::from_actor(Actor::from_fn(
        move |sponsor: &mut EventLoop, request: Request<Value>| {
            counter.set(counter.get() + 1);
            word.send(sponsor, request);
        },
    ));
    let stream = from_peg_skipping(from_str("ab cd ef"), Some(words.ns.lookup("space")), counting);

    // Backtracking over the same tokens must not re-run the token pattern.
    let either = choice([
        sequence([terminal(text("ab")), terminal(text("cd")), terminal(text("zz"))]),
        sequence([terminal(text("ab")), terminal(text("cd")), terminal(text("ef"))]),
    ]);
    Parser::new(either).parse(&stream).unwrap();
    // Three tokens plus the end of input reached after `ef`.
    assert_eq!(calls.get(), 4);

    collect(&stream, EventLoopConfig::default()).unwrap();
    assert_eq!(calls.get(), 4);
}

#[test]
fn long_derived_streams_drop_safely() {
    let words = Words::new();
    let source = "ab ".repeat(50_000);
    let stream = words.stream(&source);
    let cursors = collect(&stream, EventLoopConfig::default()).unwrap();
    assert_eq!(cursors.len(), 50_001);
    drop(cursors);
    drop(stream);
}
