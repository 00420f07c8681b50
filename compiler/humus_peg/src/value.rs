//! Values produced by matches.
//!
//! The engine is generic over the value type. A sequence or repetition
//! builds its result with [`MatchValue::list`]; zero-width matches (negative
//! lookahead, end of input) produce [`MatchValue::nothing`]. Tokens flowing
//! through a stream are values too, which is what lets one grammar's output
//! become another grammar's input.

use std::fmt;

/// Requirements on the values a grammar produces and consumes.
pub trait MatchValue: Clone + PartialEq + fmt::Debug + 'static {
    /// Ordered list of child values (sequence, repetition, optional).
    fn list(items: Vec<Self>) -> Self;

    /// Value of a match that consumed nothing.
    fn nothing() -> Self;

    /// Short description used in failure reports.
    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

/// General-purpose value for character-level grammars.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Nothing,
    Char(char),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Concatenate every character and text fragment, depth first.
    pub fn flatten_text(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![self];
        while let Some(value) = stack.pop() {
            match value {
                Value::Nothing => {}
                Value::Char(c) => out.push(*c),
                Value::Text(s) => out.push_str(s),
                Value::List(items) => stack.extend(items.iter().rev()),
            }
        }
        out
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl MatchValue for Value {
    fn list(items: Vec<Self>) -> Self {
        Value::List(items)
    }

    fn nothing() -> Self {
        Value::Nothing
    }

    fn describe(&self) -> String {
        match self {
            Value::Nothing => "nothing".to_owned(),
            Value::Char(c) => format!("{c:?}"),
            Value::Text(s) => format!("{s:?}"),
            Value::List(items) => format!("list of {}", items.len()),
        }
    }
}
