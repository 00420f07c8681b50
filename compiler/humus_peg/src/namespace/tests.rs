#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::cell::RefCell;

use pretty_assertions::assert_eq;

use super::*;
use crate::combinator::{choice, one_or_more, optional, predicate_labeled, sequence, terminal, zero_or_more};
use crate::driver::{ParseError, Parser};
use crate::error::RunError;
use crate::input;
use crate::value::Value;

fn ch(c: char) -> Pattern<Value> {
    terminal(Value::Char(c))
}

fn letter() -> Pattern<Value> {
    predicate_labeled("letter", |v: &Value| v.as_char().is_some_and(char::is_alphabetic))
}

fn parse(pattern: &Pattern<Value>, text: &str) -> Result<Success<Value>, ParseError<Value>> {
    Parser::new(pattern.clone()).parse(&input::from_str(text))
}

fn halted(result: Result<Success<Value>, ParseError<Value>>) -> GrammarError {
    match result {
        Err(ParseError::Halted(RunError::Grammar(error))) => error,
        other => panic!("expected a grammar fault, got {other:?}"),
    }
}

#[test]
fn rules_may_be_used_before_they_are_defined() {
    let mut ns = Namespace::new();
    ns.define("list", sequence([ch('['), ns.lookup("items"), ch(']')]))
        .unwrap();
    ns.define("items", zero_or_more(ns.lookup("list"))).unwrap();
    ns.seal().unwrap();

    let success = parse(&ns.lookup("list"), "[[][[]]]").unwrap();
    assert_eq!(success.end.offset(), 8);
}

#[test]
fn self_recursion_runs_deep() {
    let mut ns = Namespace::new();
    ns.define("nest", sequence([ch('('), optional(ns.lookup("nest")), ch(')')]))
        .unwrap();
    ns.transform("nest", |_, _, _| Ok(Value::Nothing)).unwrap();

    let depth = 20_000;
    let text = format!("{}{}", "(".repeat(depth), ")".repeat(depth));
    let success = parse(&ns.lookup("nest"), &text).unwrap();
    assert_eq!(success.end.offset(), depth * 2);
}

#[test]
fn transform_rewrites_the_rule_value() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let mut ns = Namespace::new();
    ns.define("word", one_or_more(letter())).unwrap();
    ns.transform("word", move |name, value: Value, span| {
        log.borrow_mut().push((name.to_owned(), span.start.offset, span.end.offset));
        Ok(Value::Text(value.flatten_text()))
    })
    .unwrap();
    let words = sequence([ns.lookup("word"), ch(' '), ns.lookup("word")]);

    let success = parse(&words, "hello world").unwrap();
    assert_eq!(
        success.value,
        Value::List(vec![
            Value::Text("hello".into()),
            Value::Char(' '),
            Value::Text("world".into()),
        ])
    );
    assert_eq!(
        *seen.borrow(),
        vec![("word".to_owned(), 0, 5), ("word".to_owned(), 6, 11)]
    );
}

#[test]
fn transform_may_be_attached_before_definition() {
    let mut ns = Namespace::new();
    ns.transform("x", |_, _, _| Ok(Value::Text("x!".into()))).unwrap();
    ns.define("x", ch('x')).unwrap();
    assert_eq!(parse(&ns.lookup("x"), "x").unwrap().value, Value::Text("x!".into()));
}

#[test]
fn rules_without_transforms_pass_values_through() {
    let mut ns = Namespace::new();
    ns.define("ab", sequence([ch('a'), ch('b')])).unwrap();
    let first = parse(&ns.lookup("ab"), "ab").unwrap();
    let second = parse(&ns.lookup("ab"), "ab").unwrap();
    assert_eq!(first.value, Value::List(vec![Value::Char('a'), Value::Char('b')]));
    assert_eq!(first.value, second.value);
}

#[test]
fn failing_rule_is_reported_by_name() {
    let mut ns = Namespace::new();
    ns.define("word", one_or_more(letter())).unwrap();
    ns.define("pair", sequence([ns.lookup("word"), ch('='), ns.lookup("word")]))
        .unwrap();

    let Err(ParseError::Failed(failure)) = parse(&ns.lookup("pair"), "a=1") else {
        panic!("expected failure");
    };
    assert_eq!(failure.furthest.offset(), 2);
    assert_eq!(failure.expected_description(), "expected word");
}

#[test]
fn undefined_rules_halt_the_parse() {
    let ns = Namespace::<Value>::new();
    let error = halted(parse(&ns.lookup("missing"), "x"));
    assert_eq!(error, GrammarError::Undefined("missing".into()));
}

#[test]
fn redefinition_is_rejected() {
    let mut ns = Namespace::new();
    ns.define("a", ch('a')).unwrap();
    assert_eq!(
        ns.define("a", ch('b')).unwrap_err(),
        GrammarError::Redefined("a".into())
    );
}

#[test]
fn matching_seals_the_namespace() {
    let mut ns = Namespace::new();
    ns.define("a", ch('a')).unwrap();
    assert!(!ns.is_sealed());
    parse(&ns.lookup("a"), "a").unwrap();
    assert!(ns.is_sealed());
    assert_eq!(
        ns.define("b", ch('b')).unwrap_err(),
        GrammarError::Sealed {
            name: "b".into(),
            action: "define"
        }
    );
    assert_eq!(
        ns.transform("a", |_, v, _| Ok(v)).unwrap_err(),
        GrammarError::Sealed {
            name: "a".into(),
            action: "transform"
        }
    );
}

#[test]
fn seal_lists_unresolved_rules() {
    let mut ns = Namespace::<Value>::new();
    ns.define("top", choice([ns.lookup("zeta"), ns.lookup("alpha")]))
        .unwrap();
    assert_eq!(
        ns.seal().unwrap_err(),
        GrammarError::Unresolved(vec!["alpha".into(), "zeta".into()])
    );
    assert!(ns.is_sealed());
}

#[test]
fn rejected_transform_halts_the_parse() {
    let mut ns = Namespace::new();
    ns.define("a", ch('a')).unwrap();
    ns.transform("a", |_, _, _| Err(TransformError::new("no thanks")))
        .unwrap();
    let error = halted(parse(&ns.lookup("a"), "a"));
    assert_eq!(
        error,
        GrammarError::Transform {
            rule: "a".into(),
            source: TransformError::new("no thanks"),
        }
    );
}

#[test]
fn patterns_do_not_outlive_their_namespace() {
    let pattern = {
        let mut ns = Namespace::new();
        ns.define("a", ch('a')).unwrap();
        ns.lookup("a")
    };
    assert_eq!(
        halted(parse(&pattern, "a")),
        GrammarError::Detached("a".into())
    );
}

#[test]
fn names_lists_defined_rules() {
    let mut ns = Namespace::new();
    ns.define("b", ch('b')).unwrap();
    ns.define("a", sequence([ch('a'), ns.lookup("c")])).unwrap();
    assert_eq!(ns.names(), vec!["a".to_owned(), "b".to_owned()]);
    assert!(ns.contains("a"));
    assert!(!ns.contains("c"));
}
