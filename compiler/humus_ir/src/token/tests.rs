#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn every_keyword_round_trips_through_its_spelling() {
    for keyword in Keyword::ALL {
        assert_eq!(Keyword::from_name(keyword.as_str()), Some(keyword));
    }
    assert_eq!(Keyword::from_name("println"), None);
    assert_eq!(Keyword::from_name("let"), None);
}

#[test]
fn question_mark_and_underscore_are_reserved() {
    assert_eq!(Keyword::from_name("?"), Some(Keyword::Undefined));
    assert_eq!(Keyword::from_name("_"), Some(Keyword::Any));
}

#[test]
fn numbers_in_other_radixes() {
    let n = Number::new(Some('-'), 16, "2a");
    assert_eq!(n.value, Some(-42));
    assert_eq!(n.to_string(), "-16#2a");

    assert_eq!(Number::new(None, 2, "1010").value, Some(10));
    assert_eq!(Number::new(None, 10, "007").value, Some(7));
}

#[test]
fn invalid_digits_have_no_value() {
    assert_eq!(Number::new(None, 8, "9").value, None);
    assert_eq!(Number::new(None, 40, "1").value, None);
    assert_eq!(Number::new(None, 10, "99999999999999999999").value, None);
}

#[test]
fn decimal_keeps_the_sign_apart() {
    assert_eq!(Number::decimal(-5), Number::new(Some('-'), 10, "5"));
    assert_eq!(Number::decimal(12).to_string(), "12");
}

#[test]
fn tokens_display_as_written() {
    assert_eq!(Token::Keyword(Keyword::Send).to_string(), "SEND");
    assert_eq!(Token::Punct('(').to_string(), "'('");
    assert_eq!(Token::Symbol("Hello".into()).to_string(), "#Hello");
    assert_eq!(Token::String("World".into()).to_string(), "\"World\"");
    assert_eq!(Token::Char('\n').to_string(), "'\\n'");
    assert_eq!(Token::Ident("println".into()).to_string(), "println");
}

#[test]
fn tokens_serialize_with_a_type_tag() {
    let json = serde_json::to_value(Token::Symbol("Hello".into())).unwrap();
    assert_eq!(json, serde_json::json!({"type": "symbol", "value": "Hello"}));

    let json = serde_json::to_value(Token::Number(Number::new(Some('-'), 16, "2a"))).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "type": "number",
            "value": {"sign": "-", "radix": 16, "digits": "2a", "value": -42}
        })
    );

    let json = serde_json::to_value(Token::Keyword(Keyword::SelfRef)).unwrap();
    assert_eq!(json, serde_json::json!({"type": "keyword", "value": "SELF"}));
}
