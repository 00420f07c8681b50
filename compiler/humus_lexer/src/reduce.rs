//! Token reductions.
//!
//! Each transform turns the raw nested-list value of a rule into something
//! smaller: characters become text, text becomes [`Token`]s, and the trivia
//! rules reduce to [`Value::Nothing`].

use humus_ir::{Keyword, Number, Token, Value};
use humus_peg::{GrammarError, Namespace, Span, TransformError};

type Reduction = fn(&str, Value, &Span) -> Result<Value, TransformError>;

const REDUCTIONS: &[(&str, Reduction)] = &[
    ("tokens", reduce_tokens),
    ("token", reduce_token),
    ("symbol", reduce_symbol),
    ("number", reduce_number),
    ("char", reduce_char),
    ("string", reduce_string),
    ("qchar", reduce_qchar),
    ("ident", reduce_ident),
    ("name", reduce_name),
    ("punct", reduce_punct),
    ("_", reduce_trivia),
    ("EOF", reduce_trivia),
];

pub(crate) fn install(ns: &mut Namespace<Value>) -> Result<(), GrammarError> {
    for &(rule, reduction) in REDUCTIONS {
        ns.transform(rule, reduction)?;
    }
    Ok(())
}

fn malformed(rule: &str, value: &Value) -> TransformError {
    TransformError::new(format!("unexpected shape for {rule}: {value:?}"))
}

/// The `N` items of a sequence value.
fn parts<const N: usize>(rule: &str, value: Value) -> Result<[Value; N], TransformError> {
    match value {
        Value::List(items) => {
            <[Value; N]>::try_from(items).map_err(|items| malformed(rule, &Value::List(items)))
        }
        other => Err(malformed(rule, &other)),
    }
}

fn reduce_tokens(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let [tokens, _eof] = parts(rule, value)?;
    Ok(tokens)
}

fn reduce_token(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let [_trivia, token] = parts(rule, value)?;
    Ok(token)
}

fn reduce_symbol(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let [_hash, name] = parts(rule, value)?;
    let text = match name {
        Value::Token(Token::Punct(c)) => c.to_string(),
        Value::Text(text) => text,
        other => return Err(malformed(rule, &other)),
    };
    Ok(Token::Symbol(text).into())
}

fn reduce_number(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let [sign, leading, radix_part] = parts(rule, value)?;
    let sign = sign.text().chars().next();
    let leading = leading.text();
    let number = match radix_part.as_list() {
        Some([]) => Number::new(sign, 10, leading),
        Some([group]) => {
            let [_hash, digits] = parts(rule, group.clone())?;
            // An unparseable radix leaves the value undefined.
            let radix = leading.parse().unwrap_or(0);
            Number::new(sign, radix, digits.text())
        }
        _ => return Err(malformed(rule, &radix_part)),
    };
    Ok(Token::Number(number).into())
}

fn reduce_char(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let [_open, body, _close] = parts(rule, value)?;
    let text = body.text();
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Token::Char(c).into()),
        _ => Err(malformed(rule, &body)),
    }
}

fn reduce_string(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let [_open, body, _close] = parts(rule, value)?;
    Ok(Token::String(body.text()).into())
}

/// Character named by an escape letter.
pub(crate) fn unescape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        '\'' | '"' | '[' | ']' | '\\' => Some(c),
        _ => None,
    }
}

/// Character at a `\uXXXX` code point. Surrogates become U+FFFD.
pub(crate) fn unicode_escape(hex: &str) -> Option<char> {
    let code = u32::from_str_radix(hex, 16).ok()?;
    Some(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
}

fn reduce_qchar(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let decoded = match value.as_list() {
        Some([Value::Char('\\'), Value::Char(c)]) => unescape(*c),
        Some([Value::Char('\\'), Value::Char('u'), hex @ ..]) if hex.len() == 4 => {
            unicode_escape(&Value::List(hex.to_vec()).text())
        }
        Some([Value::Nothing, Value::Char(c)]) => Some(*c),
        _ => None,
    };
    decoded
        .map(Value::Char)
        .ok_or_else(|| malformed(rule, &value))
}

fn reduce_ident(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    let name = match value {
        Value::Text(name) => name,
        other => return Err(malformed(rule, &other)),
    };
    Ok(match Keyword::from_name(&name) {
        Some(keyword) => Token::Keyword(keyword),
        None => Token::Ident(name),
    }
    .into())
}

fn reduce_name(_: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    Ok(Value::Text(value.text()))
}

fn reduce_punct(rule: &str, value: Value, _: &Span) -> Result<Value, TransformError> {
    match value {
        Value::Char(c) => Ok(Token::Punct(c).into()),
        other => Err(malformed(rule, &other)),
    }
}

fn reduce_trivia(_: &str, _: Value, _: &Span) -> Result<Value, TransformError> {
    Ok(Value::Nothing)
}
