use pretty_assertions::assert_eq;

use super::*;
use crate::cursor::Position;
use crate::value::Value;

fn at(offset: usize) -> Cursor<Value> {
    Cursor::end(Position::new(offset, 0, offset))
}

#[test]
fn merge_keeps_the_further_failure() {
    let near = Failure::new(at(1), Expected::Token(Value::Char('a')));
    let far = Failure::new(at(4), Expected::Token(Value::Char('b')));
    let merged = near.merge(far).at(at(0));
    assert_eq!(merged.position.offset(), 0);
    assert_eq!(merged.furthest.offset(), 4);
    assert_eq!(merged.expected.to_vec(), vec![Expected::Token(Value::Char('b'))]);
}

#[test]
fn merge_unions_expectations_at_the_same_point() {
    let a = Failure::new(at(2), Expected::Token(Value::Char('a')));
    let b = Failure::new(at(2), Expected::Token(Value::Char('b')));
    let again = Failure::new(at(2), Expected::Token(Value::Char('a')));
    let merged = a.merge(b).merge(again);
    assert_eq!(
        merged.expected.to_vec(),
        vec![
            Expected::Token(Value::Char('a')),
            Expected::Token(Value::Char('b'))
        ]
    );
}

#[test]
fn nearer_failure_is_ignored() {
    let far = Failure::new(at(5), Expected::<Value>::EndOfInput);
    let near = Failure::new(at(1), Expected::AnyToken);
    let merged = far.merge(near);
    assert_eq!(merged.furthest.offset(), 5);
    assert_eq!(merged.expected.to_vec(), vec![Expected::EndOfInput]);
}

#[test]
fn relabel_only_applies_at_rule_start() {
    let name: Rc<str> = Rc::from("expr");
    let at_start = Failure::new(at(3), Expected::Token(Value::Char('(')));
    assert_eq!(
        at_start.relabel(&name).expected.to_vec(),
        vec![Expected::Rule(Rc::clone(&name))]
    );

    let deeper = Failure::new(at(6), Expected::Token(Value::Char(')'))).at(at(3));
    assert_eq!(
        deeper.relabel(&name).expected.to_vec(),
        vec![Expected::Token(Value::Char(')'))]
    );
}

#[test]
fn describes_expectations_in_order() {
    let failure = Failure::new(at(0), Expected::Label("digit".into()))
        .merge(Failure::new(at(0), Expected::Token(Value::Char('-'))))
        .merge(Failure::new(at(0), Expected::EndOfInput));
    assert_eq!(
        failure.expected_description(),
        "expected digit, '-' or end of input"
    );
    assert_eq!(failure.found(), "end of input");
    assert_eq!(
        failure.to_string(),
        "expected digit, '-' or end of input at 1:1, found end of input"
    );
}

#[test]
fn empty_expectations_read_as_unexpected() {
    let failure = Failure::<Value>::unexpected(at(0));
    assert_eq!(failure.expected_description(), "unexpected input");
}
