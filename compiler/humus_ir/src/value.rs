//! The value type shared by both Humus grammar layers.
//!
//! The character layer starts from [`Value::Char`]s and reduces matches to
//! [`Value::Token`]s. The syntax layer consumes those tokens and reduces to
//! the syntax tree variants. Raw, unreduced matches stay as [`Value::List`]s.

use std::fmt;

use humus_peg::MatchValue;

use crate::ast::{Eqtn, Expr, Ptrn, Stmt};
use crate::token::{Keyword, Token};

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Nothing,
    Char(char),
    Text(String),
    List(Vec<Value>),
    Token(Token),
    Stmt(Stmt),
    Expr(Expr),
    Ptrn(Ptrn),
    Eqtn(Eqtn),
}

impl Value {
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Value::Token(token) => Some(token),
            _ => None,
        }
    }

    /// Returns `true` for the token of keyword `k`.
    pub fn is_keyword(&self, k: Keyword) -> bool {
        matches!(self, Value::Token(Token::Keyword(found)) if *found == k)
    }

    /// Returns `true` for the punctuation token `c`.
    pub fn is_punct(&self, c: char) -> bool {
        matches!(self, Value::Token(token) if token.is_punct(c))
    }

    /// Characters and text fragments concatenated, depth first.
    pub fn text(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![self];
        while let Some(value) = stack.pop() {
            match value {
                Value::Char(c) => out.push(*c),
                Value::Text(s) => out.push_str(s),
                Value::List(items) => stack.extend(items.iter().rev()),
                _ => {}
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

impl From<Token> for Value {
    fn from(token: Token) -> Self {
        Value::Token(token)
    }
}

impl From<Keyword> for Value {
    fn from(keyword: Keyword) -> Self {
        Value::Token(Token::Keyword(keyword))
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
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nothing => f.write_str("nothing"),
            Value::Char(c) => write!(f, "{c:?}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::List(items) => write!(f, "list of {}", items.len()),
            Value::Token(token) => write!(f, "{token}"),
            Value::Stmt(_) => f.write_str("statement"),
            Value::Expr(_) => f.write_str("expression"),
            Value::Ptrn(_) => f.write_str("pattern"),
            Value::Eqtn(_) => f.write_str("equation"),
        }
    }
}

#[cfg(test)]
mod tests;
