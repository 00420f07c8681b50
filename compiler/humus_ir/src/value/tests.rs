use super::*;

#[test]
fn text_flattens_nested_lists() {
    let value = Value::List(vec![
        Value::Char('a'),
        Value::List(vec![Value::Text("bc".into()), Value::Nothing]),
        Value::Char('d'),
    ]);
    assert_eq!(value.text(), "abcd");
}

#[test]
fn keyword_and_punct_checks() {
    let send = Value::from(Keyword::Send);
    assert!(send.is_keyword(Keyword::Send));
    assert!(!send.is_keyword(Keyword::To));
    assert!(Value::Token(Token::Punct('(')).is_punct('('));
    assert!(!Value::Char('(').is_punct('('));
}

#[test]
fn descriptions_read_like_source() {
    assert_eq!(Value::from(Keyword::Let).describe(), "LET");
    assert_eq!(Value::Token(Token::Punct(')')).describe(), "')'");
    assert_eq!(Value::Char('x').describe(), "'x'");
    assert_eq!(Value::Nothing.describe(), "nothing");
}
