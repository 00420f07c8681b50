//! The assignment/arithmetic grammar, end to end.
//!
//! ```text
//! Assign <- Name "=" Assign / Expr
//! Name   <- [a-zA-Z]
//! Expr   <- Term ([-+] Term)*
//! Term   <- Factor ([/*] Factor)*
//! Factor <- "(" Assign ")" / Name / [0-9]+
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use humus_peg::{
    choice, end, input, one_or_more, predicate_labeled, sequence, terminal, zero_or_more,
    GrammarError, Namespace, ParseError, Parser, Pattern, TransformError, Value,
};
use pretty_assertions::assert_eq;

fn ch(c: char) -> Pattern<Value> {
    terminal(Value::Char(c))
}

fn one_of(label: &'static str, set: &'static str) -> Pattern<Value> {
    predicate_labeled(label, move |v: &Value| v.as_char().is_some_and(|c| set.contains(c)))
}

fn grammar() -> Result<Namespace<Value>, GrammarError> {
    let mut ns = Namespace::new();
    ns.define(
        "Assign",
        choice([
            sequence([ns.lookup("Name"), ch('='), ns.lookup("Assign")]),
            ns.lookup("Expr"),
        ]),
    )?;
    ns.define(
        "Name",
        predicate_labeled("name", |v: &Value| v.as_char().is_some_and(|c| c.is_ascii_alphabetic())),
    )?;
    ns.define(
        "Expr",
        sequence([
            ns.lookup("Term"),
            zero_or_more(sequence([one_of("'+' or '-'", "+-"), ns.lookup("Term")])),
        ]),
    )?;
    ns.define(
        "Term",
        sequence([
            ns.lookup("Factor"),
            zero_or_more(sequence([one_of("'*' or '/'", "*/"), ns.lookup("Factor")])),
        ]),
    )?;
    ns.define(
        "Factor",
        choice([
            sequence([ch('('), ns.lookup("Assign"), ch(')')]),
            ns.lookup("Name"),
            one_or_more(one_of("digit", "0123456789")),
        ]),
    )?;
    Ok(ns)
}

fn malformed(rule: &str) -> TransformError {
    TransformError::new(format!("unexpected shape for {rule}"))
}

/// Fold `first (op operand)*` into a left-nested prefix form.
fn fold_infix(rule: &str, value: &Value) -> Result<Value, TransformError> {
    let [first, rest] = value.as_list().ok_or_else(|| malformed(rule))? else {
        return Err(malformed(rule));
    };
    let mut acc = first.flatten_text();
    for pair in rest.as_list().ok_or_else(|| malformed(rule))? {
        let [op, operand] = pair.as_list().ok_or_else(|| malformed(rule))? else {
            return Err(malformed(rule));
        };
        acc = format!("({} {acc} {})", op.flatten_text(), operand.flatten_text());
    }
    Ok(Value::Text(acc))
}

/// Attach transforms rendering the parse as an S-expression.
fn with_printer(mut ns: Namespace<Value>) -> Result<Namespace<Value>, GrammarError> {
    ns.transform("Expr", |rule, value, _| fold_infix(rule, &value))?;
    ns.transform("Term", |rule, value, _| fold_infix(rule, &value))?;
    ns.transform("Factor", |_, value, _| match value.as_list() {
        Some([open, inner, _]) if *open == Value::Char('(') => Ok(inner.clone()),
        _ => Ok(Value::Text(value.flatten_text())),
    })?;
    ns.transform("Assign", |_, value, _| {
        if let Some([name, eq, rest]) = value.as_list() {
            if *eq == Value::Char('=') {
                let text = format!("(= {} {})", name.flatten_text(), rest.flatten_text());
                return Ok(Value::Text(text));
            }
        }
        Ok(value)
    })?;
    Ok(ns)
}

const SOURCE: &str = "x=y=10-2/3+4*5/(6-7)";

#[test]
fn parses_to_completion() {
    let ns = grammar().unwrap();
    ns.seal().unwrap();
    let success = Parser::new(ns.lookup("Assign"))
        .parse(&input::from_str(SOURCE))
        .unwrap();
    assert_eq!(success.consumed(), SOURCE.len());
    assert!(success.end.is_end());
}

#[test]
fn transforms_shape_the_result() {
    let ns = with_printer(grammar().unwrap()).unwrap();
    let success = Parser::new(ns.lookup("Assign"))
        .parse(&input::from_str(SOURCE))
        .unwrap();
    assert_eq!(
        success.value,
        Value::Text("(= x (= y (+ (- 10 (/ 2 3)) (/ (* 4 5) (- 6 7)))))".into())
    );
}

#[test]
fn unmatched_input_is_reported_where_the_match_stopped() {
    // Repetitions succeed with what they have, so the unbalanced group
    // surfaces as trailing input after `1`.
    let ns = grammar().unwrap();
    let whole = sequence([ns.lookup("Assign"), end()]);
    let error = Parser::new(whole)
        .parse(&input::from_str("1+(2*3"))
        .unwrap_err();
    let ParseError::Failed(failure) = error else {
        panic!("expected a match failure");
    };
    assert_eq!(failure.position.offset(), 0);
    assert_eq!(failure.furthest.offset(), 1);
    assert_eq!(failure.found(), "'+'");
    assert_eq!(failure.expected_description(), "expected end of input");
}

#[test]
fn group_failure_points_at_the_missing_parenthesis() {
    let ns = grammar().unwrap();
    let error = Parser::new(ns.lookup("Factor"))
        .parse(&input::from_str("(2*3"))
        .unwrap_err();
    let ParseError::Failed(failure) = error else {
        panic!("expected a match failure");
    };
    assert_eq!(failure.furthest.offset(), 4);
    assert_eq!(failure.found(), "end of input");
    assert_eq!(failure.expected_description(), "expected ')'");
}
